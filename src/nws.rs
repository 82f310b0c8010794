//! Remote forecast client for the National Weather Service API
//!
//! Resolves a coordinate to its forecast resource via the points endpoint,
//! then fetches and decodes the forecast itself. Envelope decoding tolerates
//! the many extra fields the provider sends; the fields a period must expose
//! are required and typed, so schema drift fails the request instead of
//! producing silent defaults.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::UpstreamConfig;
use crate::error::SkybriefError;
use crate::models::{Coordinate, ForecastPeriod};

const ACCEPT_GEO_JSON: &str = "application/geo+json";

/// Source of forecast data. The HTTP surface depends on this trait rather
/// than the concrete client so tests can substitute a fake.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Resolve a coordinate to the URL of its forecast resource
    async fn lookup_point(&self, coordinate: Coordinate) -> Result<String, SkybriefError>;

    /// Fetch a forecast resource and decode its period list
    async fn lookup_forecast(
        &self,
        forecast_url: &str,
    ) -> Result<Vec<ForecastPeriod>, SkybriefError>;
}

/// NWS API client
///
/// Holds a single `reqwest::Client` whose connection pool is safe to share
/// across concurrent requests; no other state is retained between calls.
pub struct NwsClient {
    client: reqwest::Client,
    base_url: String,
}

impl NwsClient {
    /// Build a client from the upstream configuration
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_geo_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SkybriefError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, ACCEPT_GEO_JSON)
            .send()
            .await
            .map_err(|e| SkybriefError::upstream(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SkybriefError::upstream(format!(
                "HTTP {} from {url}",
                status.as_u16()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SkybriefError::upstream(format!("invalid JSON from {url}: {e}")))
    }
}

#[async_trait]
impl ForecastProvider for NwsClient {
    #[instrument(skip(self))]
    async fn lookup_point(&self, coordinate: Coordinate) -> Result<String, SkybriefError> {
        let url = format!(
            "{}/points/{:.4},{:.4}",
            self.base_url, coordinate.latitude, coordinate.longitude
        );
        let envelope: PointsEnvelope = self.get_geo_json(&url).await?;
        forecast_reference(envelope)
    }

    #[instrument(skip(self))]
    async fn lookup_forecast(
        &self,
        forecast_url: &str,
    ) -> Result<Vec<ForecastPeriod>, SkybriefError> {
        let envelope: ForecastEnvelope = self.get_geo_json(forecast_url).await?;
        forecast_periods(envelope)
    }
}

#[derive(Debug, Deserialize)]
struct PointsEnvelope {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
struct PointsProperties {
    // Defaulted so an absent field and an empty one get the same explicit error
    #[serde(default)]
    forecast: String,
}

#[derive(Debug, Deserialize)]
struct ForecastEnvelope {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<ForecastPeriod>,
}

fn forecast_reference(envelope: PointsEnvelope) -> Result<String, SkybriefError> {
    if envelope.properties.forecast.is_empty() {
        return Err(SkybriefError::upstream(
            "missing forecast URL in points response",
        ));
    }
    Ok(envelope.properties.forecast)
}

fn forecast_periods(envelope: ForecastEnvelope) -> Result<Vec<ForecastPeriod>, SkybriefError> {
    if envelope.properties.periods.is_empty() {
        return Err(SkybriefError::upstream("no forecast periods available"));
    }
    Ok(envelope.properties.periods)
}
