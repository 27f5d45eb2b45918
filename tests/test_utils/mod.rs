#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roam_core::route::{Location, RouteLeg, RouteStep};
use roam_core::GeoPoint;

pub const LAS_VEGAS: GeoPoint = GeoPoint {
    latitude: 36.1699,
    longitude: -115.1398,
};
pub const BARSTOW: GeoPoint = GeoPoint {
    latitude: 34.8958,
    longitude: -117.0173,
};

pub fn quantize(p: GeoPoint) -> GeoPoint {
    GeoPoint::new(
        (p.latitude * 1e5).round() / 1e5,
        (p.longitude * 1e5).round() / 1e5,
    )
}

/// `n` evenly spaced vertices from `start` to `end`, both included.
pub fn straight_line(start: GeoPoint, end: GeoPoint, n: usize) -> Vec<GeoPoint> {
    (0..n)
        .map(|i| {
            let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
            quantize(GeoPoint::new(
                start.latitude + (end.latitude - start.latitude) * t,
                start.longitude + (end.longitude - start.longitude) * t,
            ))
        })
        .collect()
}

/// A wandering path of `n` quantized vertices.
pub fn random_walk(seed: u64, n: usize) -> Vec<GeoPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut lat: f64 = rng.random_range(-60.0..60.0);
    let mut lng: f64 = rng.random_range(-170.0..170.0);
    let mut points = Vec::with_capacity(n);
    for _ in 0..n {
        lat = (lat + rng.random_range(-0.05..0.05)).clamp(-89.0, 89.0);
        lng = (lng + rng.random_range(-0.05..0.05)).clamp(-179.0, 179.0);
        points.push(quantize(GeoPoint::new(lat, lng)));
    }
    points
}

pub fn location(p: GeoPoint) -> Option<Location> {
    Some(Location { lat_lng: Some(p) })
}

pub fn step(duration_secs: u64, end: GeoPoint) -> RouteStep {
    RouteStep {
        static_duration: Some(format!("{duration_secs}s")),
        distance_meters: 0,
        end_location: location(end),
    }
}

/// One leg whose steps all last `step_secs` and end at successive vertices of
/// a line from `start` to `end`.
pub fn uniform_leg(start: GeoPoint, end: GeoPoint, steps: usize, step_secs: u64) -> RouteLeg {
    let ends = straight_line(start, end, steps + 1);
    RouteLeg {
        start_location: location(start),
        end_location: location(end),
        steps: ends[1..].iter().map(|p| step(step_secs, *p)).collect(),
    }
}
