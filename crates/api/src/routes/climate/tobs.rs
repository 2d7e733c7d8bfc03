use axum::{extract::State, Json};
use log::debug;
use std::{collections::BTreeMap, sync::Arc};

use super::Error;
use crate::{
    db::{ActiveStation, DailyValues},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature observations of the most active station over its last year of data", body = Vec<BTreeMap<String, BTreeMap<String, f64>>>),
        (status = NOT_FOUND, description = "Station has no observations", body = super::ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset", body = super::ErrorBody)
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BTreeMap<String, DailyValues>>>, Error> {
    let station = match &state.active_station {
        ActiveStation::Fixed(station) => station.clone(),
        ActiveStation::MostObservations => state
            .climate_db
            .most_active_station()
            .await?
            .ok_or_else(|| Error::NoData("Dataset has no measurements.".to_string()))?,
    };
    debug!("reporting tobs for station {}", station);

    let temperatures = state
        .climate_db
        .station_temperatures(&station)
        .await?
        .ok_or_else(|| Error::NoData(format!("Station '{}' has no observations.", station)))?;

    Ok(Json(vec![BTreeMap::from([(
        temperatures.station,
        temperatures.values,
    )])]))
}
