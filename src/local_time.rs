use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::geo_math::GeoPoint;

const SECS_PER_HOUR: i32 = 3600;

/// Resolves the UTC offset in effect at a place and moment.
///
/// Built once by the caller and passed by reference to whatever needs local
/// times.
pub trait TimeZoneLookup: Send + Sync {
    fn offset_at(&self, point: &GeoPoint, at: DateTime<Utc>) -> FixedOffset;

    fn to_local(&self, point: &GeoPoint, at: DateTime<Utc>) -> DateTime<FixedOffset> {
        at.with_timezone(&self.offset_at(point, at))
    }
}

/// Same offset everywhere, e.g. the traveller's own zone or UTC.
pub struct FixedZone(pub FixedOffset);

impl FixedZone {
    pub fn utc() -> Self {
        FixedZone(Utc.fix())
    }
}

impl TimeZoneLookup for FixedZone {
    fn offset_at(&self, _: &GeoPoint, _: DateTime<Utc>) -> FixedOffset {
        self.0
    }
}

/// Nautical time: one zone per 15 degrees of longitude. Ignores political
/// borders and daylight saving, so it can be an hour or more off on land.
pub struct NauticalZone;

impl TimeZoneLookup for NauticalZone {
    fn offset_at(&self, point: &GeoPoint, _: DateTime<Utc>) -> FixedOffset {
        let hours = (point.longitude / 15.0).round().clamp(-12.0, 12.0) as i32;
        FixedOffset::east_opt(hours * SECS_PER_HOUR).unwrap_or(Utc.fix())
    }
}
