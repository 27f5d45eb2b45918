use itertools::{Itertools, MinMaxResult};

const MARKER: char = '*';
const LABEL_WIDTH: usize = 8;

/// Renders `series` as a text chart, one column per value and `height` rows,
/// top row first. Each row is labeled with the value it represents; the
/// last line is the x axis.
///
/// `width` is only advisory: callers are expected to have sampled the series
/// down to the number of columns they want.
pub fn render(series: &[f64], height: usize, width: usize) -> String {
    let (min, max) = match series.iter().copied().minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => return String::new(),
        MinMaxResult::OneElement(v) => (v, v),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    if height == 0 {
        return String::new();
    }
    if series.len() > width {
        trace!("chart has {} columns, wider than {width}", series.len());
    }

    let range = if max == min { 1.0 } else { max - min };
    let top = height - 1;

    // grid[0] is the bottom row
    let mut grid = vec![vec![' '; series.len()]; height];
    for (col, value) in series.iter().enumerate() {
        let row = (((value - min) / range) * top as f64) as usize;
        grid[row.min(top)][col] = MARKER;
    }

    let mut lines = Vec::with_capacity(height + 1);
    for (i, row) in grid.iter().rev().enumerate() {
        let label = if top == 0 {
            max
        } else {
            max - (max - min) * i as f64 / top as f64
        };
        let cells: String = row.iter().collect();
        lines.push(format!("{label:>LABEL_WIDTH$.0} |{cells}"));
    }
    lines.push(format!(
        "{} +{}",
        " ".repeat(LABEL_WIDTH),
        "-".repeat(series.len())
    ));
    lines.join("\n")
}
