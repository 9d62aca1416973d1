//! API error type and its HTTP mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::types::ErrorResponse;
use crate::sim::StationError;

/// Errors returned by request handlers. All are client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Command value the station does not understand.
    #[error(transparent)]
    Station(#[from] StationError),

    /// Body that is not the expected JSON document.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Well-formed body with an unsupported value.
    #[error("{0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Station(_) | Self::InvalidBody(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!(error = %self, "client error");
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn station_error_maps_to_400_with_message() {
        let resp = ApiError::from(StationError::InvalidCommand("maybe".into())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json["error"],
            "invalid command \"maybe\", expected \"on\" or \"off\""
        );
    }
}
