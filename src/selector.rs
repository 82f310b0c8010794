//! Selection of the forecast period that represents "now/today, daytime"

use chrono::{DateTime, Utc};

use crate::error::SkybriefError;
use crate::models::ForecastPeriod;

/// Pick the daytime period to report for `now`.
///
/// Prefers the earliest daytime period whose start is not already in the past,
/// with ties broken by input order. Upstream keeps a stale "today" period in
/// the list after its window has passed; when every daytime period is stale
/// the first daytime entry wins regardless of its start time. A forecast with
/// no daytime entries at all is unusable.
///
/// `now` is injected rather than read internally so the function stays pure.
///
/// # Errors
/// Fails with a selection error when the list contains no daytime period.
pub fn select_daytime_period(
    periods: &[ForecastPeriod],
    now: DateTime<Utc>,
) -> Result<&ForecastPeriod, SkybriefError> {
    let mut best: Option<&ForecastPeriod> = None;
    for period in periods.iter().filter(|p| p.is_daytime) {
        if period.start_time < now {
            continue;
        }
        if best.is_none_or(|b| period.start_time < b.start_time) {
            best = Some(period);
        }
    }

    best.or_else(|| periods.iter().find(|p| p.is_daytime))
        .ok_or_else(|| SkybriefError::selection("no daytime period found in forecast"))
}
