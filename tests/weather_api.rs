//! End-to-end tests for the weather summary endpoint
//!
//! Exercises the full router with a fake forecast provider substituted behind
//! the `ForecastProvider` trait, so every status path is observable without a
//! network.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use rstest::rstest;
use serde_json::Value;
use tower::ServiceExt;

use skybrief::api::{AppState, router};
use skybrief::error::SkybriefError;
use skybrief::models::{Coordinate, ForecastPeriod};
use skybrief::nws::ForecastProvider;

/// Fake provider: serves canned periods and counts upstream calls
struct FakeProvider {
    forecast_url: Option<String>,
    periods: Vec<ForecastPeriod>,
    point_calls: AtomicUsize,
    forecast_calls: AtomicUsize,
}

impl FakeProvider {
    fn with_periods(periods: Vec<ForecastPeriod>) -> Self {
        Self {
            forecast_url: Some("https://upstream.test/gridpoints/OKX/33,35/forecast".to_string()),
            periods,
            point_calls: AtomicUsize::new(0),
            forecast_calls: AtomicUsize::new(0),
        }
    }

    fn without_forecast_reference() -> Self {
        Self {
            forecast_url: None,
            periods: Vec::new(),
            point_calls: AtomicUsize::new(0),
            forecast_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ForecastProvider for FakeProvider {
    async fn lookup_point(&self, _coordinate: Coordinate) -> Result<String, SkybriefError> {
        self.point_calls.fetch_add(1, Ordering::SeqCst);
        self.forecast_url
            .clone()
            .ok_or_else(|| SkybriefError::upstream("missing forecast URL in points response"))
    }

    async fn lookup_forecast(
        &self,
        _forecast_url: &str,
    ) -> Result<Vec<ForecastPeriod>, SkybriefError> {
        self.forecast_calls.fetch_add(1, Ordering::SeqCst);
        if self.periods.is_empty() {
            return Err(SkybriefError::upstream("no forecast periods available"));
        }
        Ok(self.periods.clone())
    }
}

fn period(name: &str, hours_from_now: i64, is_daytime: bool, temperature: i32) -> ForecastPeriod {
    ForecastPeriod {
        name: name.to_string(),
        start_time: (Utc::now() + Duration::hours(hours_from_now)).fixed_offset(),
        is_daytime,
        temperature,
        temperature_unit: "F".to_string(),
        short_forecast: "Partly Sunny".to_string(),
    }
}

fn app_with(provider: Arc<FakeProvider>) -> axum::Router {
    router(AppState { provider })
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn read_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn weather_returns_summary_for_valid_coordinates() {
    let provider = Arc::new(FakeProvider::with_periods(vec![
        period("Tonight", 1, false, 68),
        period("Tomorrow", 6, true, 85),
    ]));
    let app = app_with(provider);

    let response = app
        .oneshot(get("/weather?lat=40.7128&lon=-74.0060"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["lat"], 40.7128);
    assert_eq!(body["lon"], -74.006);
    assert_eq!(body["periodName"], "Tomorrow");
    assert_eq!(body["shortForecast"], "Partly Sunny");
    assert_eq!(body["temperature"], 85);
    assert_eq!(body["temperatureUnit"], "F");
    assert_eq!(body["temperatureType"], "hot");
    assert_eq!(body["source"], "api.weather.gov");
    assert!(body["fetchedAt"].is_string());
}

#[tokio::test]
async fn weather_rounds_coordinates_before_lookup() {
    let provider = Arc::new(FakeProvider::with_periods(vec![period(
        "Today", 2, true, 45,
    )]));
    let app = app_with(provider);

    let response = app
        .oneshot(get("/weather?lat=40.712776&lon=-74.005974"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["lat"], 40.7128);
    assert_eq!(body["lon"], -74.006);
    assert_eq!(body["temperatureType"], "cold");
}

#[rstest]
#[case::no_parameters("/weather")]
#[case::missing_lon("/weather?lat=40.0")]
#[case::missing_lat("/weather?lon=-75.0")]
#[case::empty_lat("/weather?lat=&lon=-75.0")]
#[case::non_numeric_lat("/weather?lat=forty&lon=-75.0")]
#[case::non_numeric_lon("/weather?lat=40.0&lon=east")]
#[case::lat_out_of_range("/weather?lat=91&lon=0")]
#[case::lon_out_of_range("/weather?lat=0&lon=-180.5")]
#[tokio::test]
async fn weather_rejects_invalid_coordinates(#[case] uri: &str) {
    let provider = Arc::new(FakeProvider::with_periods(vec![period(
        "Today", 2, true, 70,
    )]));
    let app = app_with(provider.clone());

    let response = app.oneshot(get(uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert!(body["error"].is_string());

    // Validation failures never reach the upstream
    assert_eq!(provider.point_calls.load(Ordering::SeqCst), 0);
    assert_eq!(provider.forecast_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_forecast_reference_is_a_bad_gateway() {
    let app = app_with(Arc::new(FakeProvider::without_forecast_reference()));

    let response = app
        .oneshot(get("/weather?lat=40.0&lon=-75.0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = read_json(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("missing forecast URL")
    );
}

#[tokio::test]
async fn empty_period_list_is_a_bad_gateway() {
    let app = app_with(Arc::new(FakeProvider::with_periods(Vec::new())));

    let response = app
        .oneshot(get("/weather?lat=40.0&lon=-75.0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = read_json(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("no forecast periods")
    );
}

#[tokio::test]
async fn forecast_without_daytime_periods_is_a_bad_gateway() {
    let app = app_with(Arc::new(FakeProvider::with_periods(vec![
        period("Tonight", 1, false, 68),
        period("Overnight", 7, false, 61),
    ])));

    let response = app
        .oneshot(get("/weather?lat=40.0&lon=-75.0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = read_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("no daytime period"));
}

#[tokio::test]
async fn stale_daytime_forecast_falls_back_instead_of_failing() {
    let app = app_with(Arc::new(FakeProvider::with_periods(vec![
        period("This Morning", -6, true, 72),
        period("Tonight", 1, false, 60),
    ])));

    let response = app
        .oneshot(get("/weather?lat=40.0&lon=-75.0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["periodName"], "This Morning");
}

#[tokio::test]
async fn identical_requests_hit_upstream_independently() {
    let provider = Arc::new(FakeProvider::with_periods(vec![period(
        "Today", 2, true, 55,
    )]));
    let app = app_with(provider.clone());

    let first = app
        .clone()
        .oneshot(get("/weather?lat=40.0&lon=-75.0"))
        .await
        .unwrap();
    let second = app
        .oneshot(get("/weather?lat=40.0&lon=-75.0"))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);

    // No caching: each request performs its own two upstream calls
    assert_eq!(provider.point_calls.load(Ordering::SeqCst), 2);
    assert_eq!(provider.forecast_calls.load(Ordering::SeqCst), 2);

    let first_body = read_json(first).await;
    let second_body = read_json(second).await;
    let keys = |value: &Value| -> Vec<String> {
        value.as_object().unwrap().keys().cloned().collect()
    };
    assert_eq!(keys(&first_body), keys(&second_body));
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = app_with(Arc::new(FakeProvider::with_periods(vec![period(
        "Today", 2, true, 70,
    )])));

    let response = app.oneshot(get("/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}
