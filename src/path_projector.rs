use crate::error::{Result, RouteError};
use crate::geo_math::{distance_miles, GeoPoint};
use serde::Serialize;

pub const DEFAULT_STRIDE: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProjectionResult {
    pub distance_miles: f64,
    /// Index into whatever slice was scanned, which may be a subsample.
    pub vertex_index: usize,
}

/// Where a point of interest sits relative to the route.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TripPosition {
    /// Distance along the route from its origin to the matched vertex.
    pub trip_miles: f64,
    /// Straight-line distance from the point to the matched vertex.
    pub detour_miles: f64,
}

/// Running distance along `polyline`, one entry per vertex, starting at 0.
pub fn build_cumulative_distances(polyline: &[GeoPoint]) -> Result<Vec<f64>> {
    let first = polyline
        .first()
        .ok_or(RouteError::EmptyInput("cumulative distance table"))?;
    let mut table = Vec::with_capacity(polyline.len());
    let mut total = 0.0;
    let mut prev = first;
    for point in polyline {
        total += distance_miles(prev, point);
        table.push(total);
        prev = point;
    }
    Ok(table)
}

/// Exhaustive nearest-vertex scan. Ties resolve to the earliest index.
pub fn nearest_vertex(point: &GeoPoint, polyline: &[GeoPoint]) -> Result<ProjectionResult> {
    let mut best: Option<ProjectionResult> = None;
    for (i, vertex) in polyline.iter().enumerate() {
        let d = distance_miles(point, vertex);
        let is_better = match &best {
            Some(prev) => d < prev.distance_miles,
            None => true,
        };
        if is_better {
            best = Some(ProjectionResult {
                distance_miles: d,
                vertex_index: i,
            });
        }
    }
    best.ok_or(RouteError::EmptyInput("nearest vertex projection"))
}

/// Nearest-vertex projection over every `stride`-th vertex of a route.
///
/// This is an approximation: the match is only as fine as the stride, and it
/// never projects onto the segments between vertices. Trip miles are read
/// from the full-resolution table after mapping the subsample index back.
pub struct StridedProjector {
    polyline: Vec<GeoPoint>,
    cumulative: Vec<f64>,
    subsample: Vec<GeoPoint>,
    stride: usize,
}

impl StridedProjector {
    pub fn new(polyline: Vec<GeoPoint>, stride: usize) -> Result<Self> {
        let cumulative = build_cumulative_distances(&polyline)?;
        let stride = stride.max(1);
        let subsample = polyline.iter().step_by(stride).copied().collect();
        Ok(StridedProjector {
            polyline,
            cumulative,
            subsample,
            stride,
        })
    }

    pub fn polyline(&self) -> &[GeoPoint] {
        &self.polyline
    }

    pub fn cumulative_distances(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn total_miles(&self) -> f64 {
        // never empty, `new` rejects that
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Maps a subsample index back to full resolution.
    pub fn full_index(&self, sub_index: usize) -> usize {
        (sub_index * self.stride).min(self.cumulative.len() - 1)
    }

    pub fn locate(&self, point: &GeoPoint) -> Result<TripPosition> {
        let projection = nearest_vertex(point, &self.subsample)?;
        let index = self.full_index(projection.vertex_index);
        Ok(TripPosition {
            trip_miles: self.cumulative[index],
            detour_miles: projection.distance_miles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<GeoPoint> {
        (0..n).map(|i| GeoPoint::new(0.0, i as f64 * 0.01)).collect()
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(
            build_cumulative_distances(&[]),
            Err(RouteError::EmptyInput("cumulative distance table"))
        );
        assert!(matches!(
            nearest_vertex(&GeoPoint::new(0.0, 0.0), &[]),
            Err(RouteError::EmptyInput(_))
        ));
        assert!(StridedProjector::new(Vec::new(), 5).is_err());
    }

    #[test]
    fn single_vertex_table() {
        assert_eq!(
            build_cumulative_distances(&[GeoPoint::new(1.0, 1.0)]).unwrap(),
            vec![0.0]
        );
    }

    #[test]
    fn ties_go_to_first() {
        let p = GeoPoint::new(10.0, 10.0);
        let polyline = vec![GeoPoint::new(0.0, 0.0), p, p];
        let result = nearest_vertex(&p, &polyline).unwrap();
        assert_eq!(result.vertex_index, 1);
        assert_eq!(result.distance_miles, 0.0);
    }

    #[test]
    fn full_index_is_clamped() {
        // 12 vertices at stride 5: subsample is 0, 5, 10
        let projector = StridedProjector::new(line(12), 5).unwrap();
        assert_eq!(projector.full_index(2), 10);
        assert_eq!(projector.full_index(3), 11);
        assert_eq!(projector.stride(), 5);
    }

    #[test]
    fn zero_stride_behaves_as_one() {
        let projector = StridedProjector::new(line(3), 0).unwrap();
        let pos = projector.locate(&GeoPoint::new(0.0, 0.02)).unwrap();
        assert_eq!(pos.detour_miles, 0.0);
        assert_eq!(pos.trip_miles, projector.total_miles());
    }
}
