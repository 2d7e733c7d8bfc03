use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};
use utoipa::ToSchema;

use super::Error;
use crate::{db::Station, AppState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StationInfo {
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub elevation: Option<f64>,
}

impl From<Station> for StationInfo {
    fn from(station: Station) -> Self {
        Self {
            name: station.name,
            lat: station.latitude,
            lng: station.longitude,
            elevation: station.elevation,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Every station keyed by its identifier", body = Vec<BTreeMap<String, StationInfo>>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset", body = super::ErrorBody)
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BTreeMap<String, StationInfo>>>, Error> {
    let stations = state.climate_db.stations().await?;

    Ok(Json(
        stations
            .into_iter()
            .map(|station| BTreeMap::from([(station.station.clone(), station.into())]))
            .collect(),
    ))
}
