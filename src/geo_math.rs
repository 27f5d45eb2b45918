use serde::{Deserialize, Serialize};

// statute miles
const EARTH_RADIUS_MILES: f64 = 3956.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        GeoPoint {
            latitude,
            longitude,
        }
    }
}

// geo-types uses x = longitude, y = latitude.
impl From<GeoPoint> for geo_types::Coord<f64> {
    fn from(p: GeoPoint) -> Self {
        geo_types::Coord {
            x: p.longitude,
            y: p.latitude,
        }
    }
}

impl From<geo_types::Coord<f64>> for GeoPoint {
    fn from(c: geo_types::Coord<f64>) -> Self {
        GeoPoint::new(c.y, c.x)
    }
}

impl From<GeoPoint> for geo_types::Point<f64> {
    fn from(p: GeoPoint) -> Self {
        geo_types::Point::new(p.longitude, p.latitude)
    }
}

pub fn to_line_string(points: &[GeoPoint]) -> geo_types::LineString<f64> {
    points
        .iter()
        .map(|p| geo_types::Coord::from(*p))
        .collect::<Vec<_>>()
        .into()
}

/// Haversine great-circle distance in statute miles.
pub fn distance_miles(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let dlat = (p2.latitude - p1.latitude).to_radians();
    let dlon = (p2.longitude - p1.longitude).to_radians();
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}
