use serde::Serialize;

use crate::geo_math::GeoPoint;
use crate::route::{format_duration, Route, RouteLeg, RouteStep};

pub const DEFAULT_INTERVAL_SECS: u64 = 3600;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteSample {
    pub time_offset_secs: u64,
    pub point: GeoPoint,
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Start,
    Steps,
    Destination,
    Done,
}

/// Walks a route's legs and steps and yields sparse, time-labeled samples
/// roughly `interval` apart, bracketed by the start and the destination.
///
/// A sample's offset is the elapsed time *before* its step, while its point
/// is that step's end location.
///
/// Times are kept as `i128` so any `u64` provider duration fits.
pub struct RouteSampler<'a> {
    legs: &'a [RouteLeg],
    total_secs: i128,
    interval: i128,
    leg_idx: usize,
    step_idx: usize,
    elapsed: i128,
    last_sample: i128,
    stage: Stage,
}

impl<'a> RouteSampler<'a> {
    pub fn new(legs: &'a [RouteLeg], total_secs: u64, interval_secs: u64) -> Self {
        let interval = i128::from(interval_secs);
        RouteSampler {
            legs,
            total_secs: i128::from(total_secs),
            interval,
            leg_idx: 0,
            step_idx: 0,
            elapsed: 0,
            // so the walk can sample right away
            last_sample: -interval,
            stage: Stage::Start,
        }
    }

    pub fn for_route(route: &'a Route, interval_secs: u64) -> Self {
        Self::new(&route.legs, route.duration_secs(), interval_secs)
    }

    fn next_step(&mut self) -> Option<&'a RouteStep> {
        let legs = self.legs;
        while let Some(leg) = legs.get(self.leg_idx) {
            if let Some(step) = leg.steps.get(self.step_idx) {
                self.step_idx += 1;
                return Some(step);
            }
            self.leg_idx += 1;
            self.step_idx = 0;
        }
        None
    }

    fn offset_secs(offset: i128) -> u64 {
        u64::try_from(offset.max(0)).unwrap_or(u64::MAX)
    }

    fn sample(offset: i128, point: GeoPoint, label: String) -> RouteSample {
        RouteSample {
            time_offset_secs: Self::offset_secs(offset),
            point,
            label,
        }
    }
}

impl Iterator for RouteSampler<'_> {
    type Item = RouteSample;

    fn next(&mut self) -> Option<RouteSample> {
        loop {
            match self.stage {
                Stage::Start => {
                    self.stage = Stage::Steps;
                    if let Some(point) = self.legs.first().and_then(RouteLeg::start_point) {
                        return Some(Self::sample(0, point, "Start".to_string()));
                    }
                }
                Stage::Steps => {
                    let step = match self.next_step() {
                        Some(step) => step,
                        None => {
                            self.stage = Stage::Destination;
                            continue;
                        }
                    };
                    let mut sample = None;
                    if self.elapsed > self.last_sample + self.interval {
                        if let Some(point) = step.end_point() {
                            let label =
                                format!("En Route (+{})", format_duration(Self::offset_secs(self.elapsed)));
                            sample = Some(Self::sample(self.elapsed, point, label));
                            self.last_sample = self.elapsed;
                        }
                    }
                    self.elapsed = self
                        .elapsed
                        .saturating_add(i128::from(step.duration_secs()));
                    if sample.is_some() {
                        return sample;
                    }
                }
                Stage::Destination => {
                    self.stage = Stage::Done;
                    let end = self.legs.last().and_then(RouteLeg::end_point);
                    // total > last + interval / 2, kept in integers
                    let far_enough = 2 * self.total_secs > 2 * self.last_sample + self.interval;
                    match end {
                        Some(point) if far_enough => {
                            return Some(Self::sample(
                                self.total_secs,
                                point,
                                "Destination".to_string(),
                            ));
                        }
                        _ => {
                            debug!(
                                "skipping destination sample, last sample at {}s of {}s",
                                self.last_sample, self.total_secs
                            );
                        }
                    }
                }
                Stage::Done => return None,
            }
        }
    }
}
