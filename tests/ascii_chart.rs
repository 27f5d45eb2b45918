use roam_core::ascii_chart::render;

#[test]
fn flat_series() {
    let chart = render(&[5.0, 5.0, 5.0], 3, 3);
    let lines: Vec<&str> = chart.lines().collect();
    assert_eq!(lines.len(), 4);
    // all values sit on the bottom row
    assert_eq!(lines[0], "       5 |   ");
    assert_eq!(lines[1], "       5 |   ");
    assert_eq!(lines[2], "       5 |***");
    assert_eq!(lines[3], "         +---");
}

#[test]
fn one_marker_per_column() {
    let series: Vec<f64> = (0..60).map(|i| (i as f64 / 6.0).sin() * 1000.0).collect();
    let chart = render(&series, 10, 60);
    let lines: Vec<&str> = chart.lines().collect();
    assert_eq!(lines.len(), 11);
    let rows: Vec<Vec<char>> = lines[..10]
        .iter()
        .map(|l| l.split_once('|').unwrap().1.chars().collect())
        .collect();
    for col in 0..60 {
        assert_eq!(rows.iter().filter(|r| r[col] == '*').count(), 1);
    }
    assert!(lines[10].ends_with(&"-".repeat(60)));
}

#[test]
fn labels_run_from_max_to_min() {
    let chart = render(&[-100.0, 0.0, 300.0], 5, 3);
    let labels: Vec<f64> = chart
        .lines()
        .take(5)
        .map(|l| l.split_once('|').unwrap().0.trim().parse().unwrap())
        .collect();
    assert_eq!(labels, vec![300.0, 200.0, 100.0, 0.0, -100.0]);
}
