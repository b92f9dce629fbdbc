//! Mapping of pipeline failures onto HTTP responses.
//!
//! # Design
//! - `Validation` and `Body` are the client's fault and answer 400 (415 for a
//!   missing JSON content type).
//! - `NotFound` answers 404 with an empty body.
//! - `Store` answers 500. The cause is logged, never sent to the client.

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use todo_core::StoreError;
use tracing::{error, warn};
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("todo not found")]
    NotFound,

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Body(#[from] JsonRejection),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Validation(errors) => {
                let body = json!({ "errors": field_messages(&errors) });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::Body(rejection) => {
                let status = match &rejection {
                    JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, Json(json!({ "error": rejection.body_text() }))).into_response()
            }
            Self::Store(err) => {
                if err.is_cancelled() {
                    warn!("request cancelled before storage finished");
                } else {
                    error!(error = %err, "storage failure");
                }
                let body = json!({ "error": "internal server error" });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

/// Flatten validator output to `{"field": ["message", ...]}`.
fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
