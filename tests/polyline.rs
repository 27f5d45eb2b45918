pub mod test_utils;

use assert_float_eq::assert_float_absolute_eq;
use roam_core::polyline::{decode, encode};
use roam_core::{GeoPoint, RouteError};
use test_utils::*;

#[test]
fn reference_line() {
    let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
    assert_eq!(points.len(), 3);
    assert_float_absolute_eq!(points[0].latitude, 38.5, 1e-9);
    assert_float_absolute_eq!(points[0].longitude, -120.2, 1e-9);
    assert_float_absolute_eq!(points[2].latitude, 43.252, 1e-9);
    assert_float_absolute_eq!(points[2].longitude, -126.453, 1e-9);
}

#[test]
fn round_trip() {
    for seed in 0..20 {
        let points = random_walk(seed, 200);
        let decoded = decode(&encode(&points)).unwrap();
        assert_eq!(decoded.len(), points.len());
        for (a, b) in points.iter().zip(&decoded) {
            assert_float_absolute_eq!(a.latitude, b.latitude, 1e-5);
            assert_float_absolute_eq!(a.longitude, b.longitude, 1e-5);
        }
    }
}

#[test]
fn round_trip_extremes() {
    let points = vec![
        GeoPoint::new(90.0, 180.0),
        GeoPoint::new(-90.0, -180.0),
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.00001, -0.00001),
    ];
    assert_eq!(decode(&encode(&points)).unwrap(), points);
}

#[test]
fn encoded_text_is_printable() {
    let text = encode(&random_walk(7, 500));
    assert!(text.bytes().all(|b| (63..=126).contains(&b)));
}

#[test]
fn every_truncation_is_rejected_or_shorter() {
    let points = straight_line(LAS_VEGAS, BARSTOW, 10);
    let text = encode(&points);
    for end in 0..text.len() {
        match decode(&text[..end]) {
            Ok(prefix) => {
                assert!(prefix.len() < points.len());
                assert_eq!(prefix[..], points[..prefix.len()]);
            }
            Err(err) => assert!(matches!(err, RouteError::MalformedInput { .. })),
        }
    }
}
