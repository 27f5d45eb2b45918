//! The subset of a routing provider response the core consumes.
//!
//! Field names follow the provider's camelCase JSON. Anything not listed here
//! is ignored on deserialization.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::geo_math::GeoPoint;

const MILES_PER_METER: f64 = 0.000621371;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl RouteResponse {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse route response")
    }

    pub fn first_route(&self) -> Option<&Route> {
        self.routes.first()
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Total duration as sent by the provider, e.g. `"1200s"`.
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub distance_meters: u64,
    #[serde(default)]
    pub polyline: EncodedPolyline,
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedPolyline {
    #[serde(default)]
    pub encoded_polyline: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub lat_lng: Option<GeoPoint>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    #[serde(default)]
    pub start_location: Option<Location>,
    #[serde(default)]
    pub end_location: Option<Location>,
    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStep {
    #[serde(default)]
    pub static_duration: Option<String>,
    #[serde(default)]
    pub distance_meters: u64,
    #[serde(default)]
    pub end_location: Option<Location>,
}

impl Route {
    pub fn duration_secs(&self) -> u64 {
        self.duration.as_deref().map(parse_duration_secs).unwrap_or(0)
    }

    pub fn distance_miles(&self) -> f64 {
        self.distance_meters as f64 * MILES_PER_METER
    }

    pub fn encoded_polyline(&self) -> &str {
        &self.polyline.encoded_polyline
    }

    pub fn start_point(&self) -> Option<GeoPoint> {
        self.legs.first().and_then(RouteLeg::start_point)
    }
}

impl RouteLeg {
    pub fn start_point(&self) -> Option<GeoPoint> {
        self.start_location.as_ref().and_then(|l| l.lat_lng)
    }

    pub fn end_point(&self) -> Option<GeoPoint> {
        self.end_location.as_ref().and_then(|l| l.lat_lng)
    }
}

impl RouteStep {
    pub fn duration_secs(&self) -> u64 {
        self.static_duration
            .as_deref()
            .map(parse_duration_secs)
            .unwrap_or(0)
    }

    pub fn end_point(&self) -> Option<GeoPoint> {
        self.end_location.as_ref().and_then(|l| l.lat_lng)
    }
}

/// Parses a provider duration such as `"42s"`. Unparseable input counts as 0.
pub fn parse_duration_secs(text: &str) -> u64 {
    text.trim().trim_end_matches('s').parse().unwrap_or(0)
}

pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(parse_duration_secs("42s"), 42);
        assert_eq!(parse_duration_secs("3600"), 3600);
        assert_eq!(parse_duration_secs(""), 0);
        assert_eq!(parse_duration_secs("soon"), 0);
        assert_eq!(parse_duration_secs("-5s"), 0);
    }

    #[test]
    fn formatting() {
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(59), "0m");
        assert_eq!(format_duration(2700), "45m");
        assert_eq!(format_duration(3900), "1h 5m");
        assert_eq!(format_duration(7200), "2h 0m");
    }

    #[test]
    fn parse_response() {
        let response = RouteResponse::from_json(
            r#"{
                "routes": [{
                    "duration": "1200s",
                    "distanceMeters": 16093,
                    "polyline": {"encodedPolyline": "_p~iF~ps|U"},
                    "legs": [{
                        "startLocation": {"latLng": {"latitude": 10, "longitude": 20}},
                        "endLocation": {},
                        "steps": [{
                            "staticDuration": "60s",
                            "navigationInstruction": {"maneuver": "TURN_LEFT"},
                            "endLocation": {"latLng": {"latitude": 10.5, "longitude": 20.5}}
                        }]
                    }]
                }]
            }"#,
        )
        .unwrap();
        let route = response.first_route().unwrap();
        assert_eq!(route.duration_secs(), 1200);
        assert!((route.distance_miles() - 10.0).abs() < 0.01);
        assert_eq!(route.encoded_polyline(), "_p~iF~ps|U");
        assert_eq!(route.start_point(), Some(GeoPoint::new(10.0, 20.0)));
        assert_eq!(route.legs[0].end_point(), None);
        assert_eq!(route.legs[0].steps[0].duration_secs(), 60);
        assert_eq!(route.legs[0].steps[0].distance_meters, 0);
    }

    #[test]
    fn malformed_response() {
        assert!(RouteResponse::from_json("{\"routes\": 3}").is_err());
    }
}
