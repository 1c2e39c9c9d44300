//! `ApiError`: the single error type returned by every HTTP handler, a
//! `thiserror`-derived enum with one catch-all internal variant mapped to
//! a `(StatusCode, Json<ErrorBody>)` response.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::domain::ValidationDetail;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<ValidationDetail>),

    #[error("illegal transition: {0}")]
    IllegalTransition(String),

    #[error("no configuration has been accepted")]
    NotConfigured,

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<ValidationDetail>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "validation failed".to_string(),
                    details: Some(details),
                },
            ),
            ApiError::IllegalTransition(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: message,
                    details: None,
                },
            ),
            ApiError::NotConfigured => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "no configuration has been accepted".to_string(),
                    details: None,
                },
            ),
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "internal error handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "internal error".to_string(),
                        details: None,
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
