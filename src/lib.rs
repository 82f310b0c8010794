//! `Skybrief` - compact daytime weather summaries over HTTP
//!
//! This library resolves a coordinate to a National Weather Service forecast
//! through two sequential upstream lookups (point metadata, then forecast),
//! selects the period representing "now/today, daytime", classifies its
//! temperature, and serves the result as a small JSON summary.

pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod models;
pub mod nws;
pub mod selector;
pub mod web;

// Re-export core types for public API
pub use classify::{TemperatureCategory, classify_temperature};
pub use config::SkybriefConfig;
pub use error::SkybriefError;
pub use models::{Coordinate, ForecastPeriod, WeatherSummary};
pub use nws::{ForecastProvider, NwsClient};
pub use selector::select_daytime_period;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkybriefError>;
