//! Putting the pieces together for one route: decode its geometry once, then
//! answer "where along the trip is this place" and "when will we be where".

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

use crate::ascii_chart;
use crate::config::CoreConfig;
use crate::forecast::{self, ForecastEntry, ForecastHorizon};
use crate::geo_math::{self, GeoPoint};
use crate::local_time::TimeZoneLookup;
use crate::path_projector::{StridedProjector, TripPosition};
use crate::polyline;
use crate::route::Route;
use crate::route_sampler::{RouteSample, RouteSampler};

const FEET_PER_METER: f64 = 3.28084;

/// A place search result that may carry a location.
pub trait PointOfInterest {
    fn location(&self) -> Option<GeoPoint>;
}

impl PointOfInterest for GeoPoint {
    fn location(&self) -> Option<GeoPoint> {
        Some(*self)
    }
}

impl PointOfInterest for serde_json::Value {
    fn location(&self) -> Option<GeoPoint> {
        let lat = self.pointer("/location/latitude")?.as_f64()?;
        let lng = self.pointer("/location/longitude")?.as_f64()?;
        Some(GeoPoint::new(lat, lng))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlaceOnRoute<P> {
    pub place: P,
    /// None when the place has no location or the route has no geometry.
    pub position: Option<TripPosition>,
}

impl<P> PlaceOnRoute<P> {
    pub fn trip_miles(&self) -> Option<f64> {
        self.position.map(|p| p.trip_miles)
    }

    pub fn detour_miles(&self) -> Option<f64> {
        self.position.map(|p| p.detour_miles)
    }
}

/// Attaches trip mile and detour to each place and sorts them into trip
/// order. Places that could not be located keep their relative order at the
/// end.
pub fn locate_places<P: PointOfInterest>(
    projector: Option<&StridedProjector>,
    places: Vec<P>,
) -> Vec<PlaceOnRoute<P>> {
    let mut located: Vec<PlaceOnRoute<P>> = places
        .into_iter()
        .map(|place| {
            let position = match (projector, place.location()) {
                (Some(projector), Some(point)) => projector.locate(&point).ok(),
                _ => None,
            };
            PlaceOnRoute { place, position }
        })
        .collect();
    let key = |p: &PlaceOnRoute<P>| p.trip_miles().unwrap_or(f64::INFINITY);
    located.sort_by(|a, b| key(a).total_cmp(&key(b)));
    located
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledSample {
    pub sample: RouteSample,
    pub target_time: DateTime<Utc>,
    pub local_time: DateTime<FixedOffset>,
    /// e.g. `02:30 PM`
    pub local_label: String,
    pub horizon: ForecastHorizon,
}

impl ScheduledSample {
    pub fn closest_forecast<'e, E: ForecastEntry>(&self, entries: &'e [E]) -> Option<&'e E> {
        forecast::closest(entries, self.target_time)
    }
}

/// Turns sample offsets into absolute times for a trip leaving at
/// `departure`, with local clock labels and which forecast product applies.
/// Samples whose time falls outside chrono's range are dropped.
pub fn schedule_samples(
    samples: impl IntoIterator<Item = RouteSample>,
    departure: DateTime<Utc>,
    now: DateTime<Utc>,
    zones: &dyn TimeZoneLookup,
    hourly_window: TimeDelta,
) -> Vec<ScheduledSample> {
    samples
        .into_iter()
        .filter_map(|sample| {
            let target_time = match sample_time(departure, sample.time_offset_secs) {
                Some(time) => time,
                None => {
                    debug!(
                        "dropping sample at +{}s, outside the representable time range",
                        sample.time_offset_secs
                    );
                    return None;
                }
            };
            let local_time = zones.to_local(&sample.point, target_time);
            Some(ScheduledSample {
                local_label: local_time.format("%I:%M %p").to_string(),
                horizon: ForecastHorizon::for_target(now, target_time, hourly_window),
                sample,
                target_time,
                local_time,
            })
        })
        .collect()
}

fn sample_time(departure: DateTime<Utc>, offset_secs: u64) -> Option<DateTime<Utc>> {
    let offset = TimeDelta::try_seconds(i64::try_from(offset_secs).ok()?)?;
    departure.checked_add_signed(offset)
}

#[derive(Clone, Debug, PartialEq)]
pub struct ElevationSummary {
    pub max_ft: f64,
    pub min_ft: f64,
    /// Highest minus lowest point, not cumulative climb.
    pub range_ft: f64,
    pub chart: String,
}

impl ElevationSummary {
    pub fn from_meters(meters: &[f64], height: usize, width: usize) -> Option<Self> {
        if meters.is_empty() {
            return None;
        }
        let feet: Vec<f64> = meters.iter().map(|m| m * FEET_PER_METER).collect();
        let max_ft = feet.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min_ft = feet.iter().copied().fold(f64::INFINITY, f64::min);
        Some(ElevationSummary {
            max_ft,
            min_ft,
            range_ft: max_ft - min_ft,
            chart: ascii_chart::render(&feet, height, width),
        })
    }
}

pub struct TripPlan<'r> {
    route: &'r Route,
    config: CoreConfig,
    projector: Option<StridedProjector>,
}

impl<'r> TripPlan<'r> {
    pub fn from_route(route: &'r Route, config: &CoreConfig) -> Result<Self> {
        config.validate()?;
        let points =
            polyline::decode(route.encoded_polyline()).context("failed to decode route polyline")?;
        let projector = if points.is_empty() {
            None
        } else {
            Some(StridedProjector::new(points, config.projection_stride)?)
        };
        if let Some(projector) = &projector {
            info!(
                "trip of {:.1} mi ({:.1} mi along {} vertices), {}s",
                route.distance_miles(),
                projector.total_miles(),
                projector.polyline().len(),
                route.duration_secs()
            );
        }
        Ok(TripPlan {
            route,
            config: config.clone(),
            projector,
        })
    }

    pub fn route(&self) -> &Route {
        self.route
    }

    pub fn projector(&self) -> Option<&StridedProjector> {
        self.projector.as_ref()
    }

    pub fn line_string(&self) -> Option<geo_types::LineString<f64>> {
        self.projector
            .as_ref()
            .map(|p| geo_math::to_line_string(p.polyline()))
    }

    /// A fresh sampler over the route's legs.
    pub fn samples(&self) -> RouteSampler<'r> {
        RouteSampler::for_route(self.route, self.config.sample_interval_secs)
    }

    pub fn schedule(
        &self,
        departure: DateTime<Utc>,
        now: DateTime<Utc>,
        zones: &dyn TimeZoneLookup,
    ) -> Vec<ScheduledSample> {
        schedule_samples(
            self.samples(),
            departure,
            now,
            zones,
            self.config.hourly_window(),
        )
    }

    pub fn locate_places<P: PointOfInterest>(&self, places: Vec<P>) -> Vec<PlaceOnRoute<P>> {
        locate_places(self.projector.as_ref(), places)
    }

    pub fn elevation_summary(&self, meters: &[f64]) -> Option<ElevationSummary> {
        ElevationSummary::from_meters(meters, self.config.chart_height, self.config.chart_width)
    }
}
