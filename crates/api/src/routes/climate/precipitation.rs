use axum::{extract::State, Json};
use std::sync::Arc;

use super::Error;
use crate::{db::DailyValues, AppState};

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation per date over the last year of data", body = Vec<std::collections::BTreeMap<String, f64>>),
        (status = NOT_FOUND, description = "Dataset has no measurements", body = super::ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset", body = super::ErrorBody)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DailyValues>>, Error> {
    let precipitation = state
        .climate_db
        .precipitation_last_year()
        .await?
        .ok_or_else(|| Error::NoData("Dataset has no measurements.".to_string()))?;

    Ok(Json(vec![precipitation.values]))
}
