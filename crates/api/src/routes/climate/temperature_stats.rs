use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::Error;
use crate::{dates::DateRange, db::TemperatureStats, AppState};

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
         ("start" = String, Path, description = "First date included, yyyy-mm-dd"),
    ),
    responses(
        (status = OK, description = "Minimum, maximum and average temperature from the start date on", body = Vec<TemperatureStats>),
        (status = NOT_FOUND, description = "Invalid date or no measurements in range", body = super::ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset", body = super::ErrorBody)
    ))]
pub async fn temperature_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureStats>>, Error> {
    let range = DateRange::new(&start, None)?;

    let stats = state
        .climate_db
        .temperature_stats(&range)
        .await?
        .ok_or_else(|| Error::NoData(format!("Date entered {} yielded no result.", start)))?;

    Ok(Json(vec![stats]))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
         ("start" = String, Path, description = "First date included, yyyy-mm-dd"),
         ("end" = String, Path, description = "Last date included, yyyy-mm-dd"),
    ),
    responses(
        (status = OK, description = "Minimum, maximum and average temperature between both dates", body = Vec<TemperatureStats>),
        (status = NOT_FOUND, description = "Invalid dates, start after end, or no measurements in range", body = super::ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset", body = super::ErrorBody)
    ))]
pub async fn temperature_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureStats>>, Error> {
    let range = DateRange::new(&start, Some(&end))?;

    let stats = state
        .climate_db
        .temperature_stats(&range)
        .await?
        .ok_or_else(|| {
            Error::NoData(format!(
                "Start date '{}' and End date '{}' yielded no result.",
                start, end
            ))
        })?;

    Ok(Json(vec![stats]))
}
