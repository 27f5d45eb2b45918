#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub mod ascii_chart;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geo_math;
pub mod local_time;
pub mod logs;
pub mod path_projector;
pub mod polyline;
pub mod route;
pub mod route_sampler;
pub mod trip;

pub use error::RouteError;
pub use geo_math::GeoPoint;
