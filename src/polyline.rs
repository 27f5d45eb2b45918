//! Encoded polyline codec.
//!
//! The text form stores each coordinate as a 1e-5 degree fixed-point delta
//! from the previous vertex. Deltas are zigzag encoded and written as 5-bit
//! groups, least significant first, each offset by 63 so the output stays in
//! printable ASCII. Every group except the last of a value carries the 0x20
//! continuation bit.
//!
//! See <https://developers.google.com/maps/documentation/utilities/polylinealgorithm>.

use crate::error::{Result, RouteError};
use crate::geo_math::GeoPoint;

const PRECISION: f64 = 1e5;
const CHAR_OFFSET: u8 = 63;
const CONTINUATION_BIT: i64 = 0x20;
const GROUP_MASK: i64 = 0x1f;
// 13 groups already cover 65 bits, anything longer cannot come from `encode`.
const MAX_SHIFT: u32 = 60;

/// Running state for a single `decode` call.
struct DeltaDecoder<'a> {
    bytes: &'a [u8],
    index: usize,
    lat: i64,
    lng: i64,
}

impl<'a> DeltaDecoder<'a> {
    fn new(text: &'a str) -> Self {
        DeltaDecoder {
            bytes: text.as_bytes(),
            index: 0,
            lat: 0,
            lng: 0,
        }
    }

    fn is_done(&self) -> bool {
        self.index >= self.bytes.len()
    }

    fn malformed(&self, reason: &'static str) -> RouteError {
        RouteError::MalformedInput {
            position: self.index,
            reason,
        }
    }

    fn next_delta(&mut self) -> Result<i64> {
        let mut shift = 0;
        let mut result: u64 = 0;
        loop {
            let byte = match self.bytes.get(self.index) {
                Some(b) => *b,
                None => return Err(self.malformed("text ends inside a coordinate")),
            };
            if !(CHAR_OFFSET..=126).contains(&byte) {
                return Err(self.malformed("byte outside the polyline alphabet"));
            }
            if shift > MAX_SHIFT {
                return Err(self.malformed("coordinate has too many groups"));
            }
            let group = (byte - CHAR_OFFSET) as i64;
            let bits = (group & GROUP_MASK) as u64;
            if bits.leading_zeros() < shift {
                return Err(self.malformed("coordinate out of range"));
            }
            self.index += 1;

            result |= bits << shift;
            shift += 5;
            if group & CONTINUATION_BIT == 0 {
                break;
            }
        }
        let magnitude = (result >> 1) as i64;
        Ok(if result & 1 == 1 {
            !magnitude
        } else {
            magnitude
        })
    }

    fn next_point(&mut self) -> Result<GeoPoint> {
        let dlat = self.next_delta()?;
        if self.is_done() {
            return Err(self.malformed("latitude without a longitude"));
        }
        let dlng = self.next_delta()?;
        self.lat = self
            .lat
            .checked_add(dlat)
            .ok_or_else(|| self.malformed("coordinate out of range"))?;
        self.lng = self
            .lng
            .checked_add(dlng)
            .ok_or_else(|| self.malformed("coordinate out of range"))?;
        Ok(GeoPoint::new(
            self.lat as f64 / PRECISION,
            self.lng as f64 / PRECISION,
        ))
    }
}

pub fn decode(text: &str) -> Result<Vec<GeoPoint>> {
    let mut decoder = DeltaDecoder::new(text);
    let mut points = Vec::new();
    while !decoder.is_done() {
        points.push(decoder.next_point()?);
    }
    Ok(points)
}

pub fn encode(points: &[GeoPoint]) -> String {
    let mut encoded = String::new();
    let (mut prev_lat, mut prev_lng) = (0_i64, 0_i64);
    for point in points {
        let lat = quantize(point.latitude);
        let lng = quantize(point.longitude);
        encode_value(lat - prev_lat, &mut encoded);
        encode_value(lng - prev_lng, &mut encoded);
        prev_lat = lat;
        prev_lng = lng;
    }
    encoded
}

fn quantize(degrees: f64) -> i64 {
    (degrees * PRECISION).round() as i64
}

fn encode_value(value: i64, out: &mut String) {
    let mut value = if value < 0 { !(value << 1) } else { value << 1 };
    while value >= CONTINUATION_BIT {
        out.push(((CONTINUATION_BIT | (value & GROUP_MASK)) as u8 + CHAR_OFFSET) as char);
        value >>= 5;
    }
    out.push((value as u8 + CHAR_OFFSET) as char);
}
