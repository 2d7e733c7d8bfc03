use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{dates::RangeError, db};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] RangeError),
    #[error("{0}")]
    NoData(String),
    #[error("Storage unavailable: {0}")]
    Storage(#[from] db::Error),
}

/// Body of every error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            // invalid input is reported as 404, same as an empty result
            Error::Validation(_) | Error::NoData(_) => StatusCode::NOT_FOUND,
            Error::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::Storage(e) => error!("error querying dataset: {}", e),
            other => warn!("{}", other),
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
