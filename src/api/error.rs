use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::aggregates::FilterError;
use crate::domain::value_objects::{OrderIdError, PhoneError, PrintStatusError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<crate::Error> for ApiError {
    fn from(e: crate::Error) -> Self {
        use crate::Error::*;
        match e {
            OrderNotFound => ApiError::NotFound(e.to_string()),
            InvalidOrderId(_) | InvalidPhone(_) | InvalidPrintStatus(_) => ApiError::BadRequest(e.to_string()),
            Storage(_) | Source(_) => ApiError::Internal(e.to_string()),
        }
    }
}

macro_rules! bad_request_from {
    ($($err:ty),*) => {
        $(impl From<$err> for ApiError {
            fn from(e: $err) -> Self { ApiError::BadRequest(e.to_string()) }
        })*
    };
}

bad_request_from!(OrderIdError, PhoneError, PrintStatusError, FilterError);

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());
        ApiError::BadRequest(message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::Internal(m) => {
                tracing::error!("request failed: {}", m);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
