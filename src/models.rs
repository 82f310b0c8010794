//! Domain models: validated coordinates, forecast periods, and the summary
//! returned to callers.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::TemperatureCategory;
use crate::error::SkybriefError;

/// Source label reported in every summary
pub const SOURCE_LABEL: &str = "api.weather.gov";

/// A validated latitude/longitude pair, rounded to the 4-decimal precision
/// the points endpoint supports
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Parse raw `lat`/`lon` query parameters into a bounded, rounded
    /// coordinate.
    ///
    /// # Errors
    /// Fails with a validation error when either parameter is absent, empty,
    /// not a floating-point number, or outside [-90, 90] / [-180, 180].
    pub fn parse(lat: Option<&str>, lon: Option<&str>) -> Result<Self, SkybriefError> {
        let lat_raw = lat.map(str::trim).unwrap_or_default();
        let lon_raw = lon.map(str::trim).unwrap_or_default();
        if lat_raw.is_empty() || lon_raw.is_empty() {
            return Err(SkybriefError::validation(
                "missing lat and/or lon query parameters",
            ));
        }

        let latitude: f64 = lat_raw
            .parse()
            .map_err(|_| SkybriefError::validation(format!("invalid lat: {lat_raw}")))?;
        let longitude: f64 = lon_raw
            .parse()
            .map_err(|_| SkybriefError::validation(format!("invalid lon: {lon_raw}")))?;

        // NaN fails both range checks
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(SkybriefError::validation(
                "lat must be -90..90, lon -180..180",
            ));
        }

        Ok(Self {
            latitude: round_to_precision(latitude, 4),
            longitude: round_to_precision(longitude, 4),
        })
    }
}

/// Round to `precision` decimal places, ties away from zero
fn round_to_precision(value: f64, precision: i32) -> f64 {
    let multiplier = 10_f64.powi(precision);
    (value * multiplier).round() / multiplier
}

/// One named window of the upstream forecast
///
/// Every field here is required: a payload missing or mis-typing any of them
/// fails the decode instead of silently defaulting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    /// Period label (e.g. "Today", "Monday Night")
    pub name: String,
    /// Start of the period's window, with the grid's local offset
    pub start_time: DateTime<FixedOffset>,
    /// Whether this period covers daytime hours
    pub is_daytime: bool,
    /// Forecast temperature, in whole degrees
    pub temperature: i32,
    /// Unit of the temperature ("F" or "C" from this provider)
    pub temperature_unit: String,
    /// Compact textual forecast (e.g. "Partly Sunny")
    pub short_forecast: String,
}

/// The externally visible result for one weather request; built once per
/// request and never mutated
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    pub lat: f64,
    pub lon: f64,
    pub period_name: String,
    pub short_forecast: String,
    pub temperature: i32,
    pub temperature_unit: String,
    pub temperature_type: TemperatureCategory,
    pub fetched_at: String,
    pub source: String,
}

impl WeatherSummary {
    /// Assemble the summary from already-validated parts. Performs no
    /// validation of its own.
    #[must_use]
    pub fn assemble(
        coordinate: Coordinate,
        period: &ForecastPeriod,
        category: TemperatureCategory,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            lat: coordinate.latitude,
            lon: coordinate.longitude,
            period_name: period.name.clone(),
            short_forecast: period.short_forecast.clone(),
            temperature: period.temperature,
            temperature_unit: period.temperature_unit.clone(),
            temperature_type: category,
            fetched_at: fetched_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            source: SOURCE_LABEL.to_string(),
        }
    }
}
