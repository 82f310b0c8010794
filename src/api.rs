//! HTTP surface: the weather summary endpoint and its router

use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::get;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::classify::classify_temperature;
use crate::error::SkybriefError;
use crate::models::{Coordinate, WeatherSummary};
use crate::nws::ForecastProvider;
use crate::selector::select_daytime_period;

/// Shared per-process state: the injected forecast provider
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ForecastProvider>,
}

/// Raw query parameters; all validation happens in [`Coordinate::parse`]
#[derive(Debug, Deserialize)]
struct WeatherQuery {
    lat: Option<String>,
    lon: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

#[instrument(skip(state, params))]
async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherQuery>,
) -> Result<Json<WeatherSummary>, SkybriefError> {
    let coordinate = Coordinate::parse(params.lat.as_deref(), params.lon.as_deref())?;
    debug!(
        lat = coordinate.latitude,
        lon = coordinate.longitude,
        "resolving forecast"
    );

    let forecast_url = state.provider.lookup_point(coordinate).await?;
    let periods = state.provider.lookup_forecast(&forecast_url).await?;

    let now = Utc::now();
    let period = select_daytime_period(&periods, now)?;
    let category = classify_temperature(&period.temperature_unit, period.temperature);

    info!(period = %period.name, ?category, "serving weather summary");
    Ok(Json(WeatherSummary::assemble(
        coordinate, period, category, now,
    )))
}
