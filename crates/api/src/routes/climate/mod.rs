pub mod error;
pub mod precipitation;
pub mod stations;
pub mod temperature_stats;
pub mod tobs;

pub use error::{Error, ErrorBody};
pub use precipitation::precipitation;
pub use stations::{stations, StationInfo};
pub use temperature_stats::{temperature_between, temperature_from};
pub use tobs::tobs;

use axum::{
    http::{StatusCode, Uri},
    Json,
};

/// JSON 404 for paths outside the route table
pub async fn not_found(uri: Uri) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: format!("No route for {}", uri.path()),
        }),
    )
}
