//! # Error Handling Middleware
//!
//! Maps [`CollegeError`] onto HTTP status codes and a JSON body of the form
//! `{"error": message, "kind": kind}`. Referential conflicts also list the
//! collections that blocked the delete.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use college_core::errors::CollegeError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// Handlers return `Result<_, AppError>` and use `?` on anything yielding a
/// [`CollegeError`] or an `eyre::Report`.
#[derive(Debug)]
pub struct AppError(pub CollegeError);

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(CollegeError::NotFound(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CollegeError::NotFound(_) => StatusCode::NOT_FOUND,
            CollegeError::Validation(_) => StatusCode::BAD_REQUEST,
            CollegeError::ReferentialConflict { .. } => StatusCode::CONFLICT,
            CollegeError::Store(_) | CollegeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.0.kind();

        let body = match &self.0 {
            CollegeError::Store(report) => {
                tracing::error!("store failure: {report:?}");
                json!({ "error": "Internal server error", "kind": kind })
            }
            CollegeError::Internal(err) => {
                tracing::error!("internal failure: {err}");
                json!({ "error": "Internal server error", "kind": kind })
            }
            CollegeError::ReferentialConflict { dependents, .. } => json!({
                "error": self.0.to_string(),
                "kind": kind,
                "dependents": dependents,
            }),
            _ => json!({ "error": self.0.to_string(), "kind": kind }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CollegeError> for AppError {
    fn from(err: CollegeError) -> Self {
        AppError(err)
    }
}

/// Unparseable bodies, missing fields and wrong types are client errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(CollegeError::Validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// Wraps store reports as [`CollegeError::Store`].
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(CollegeError::Store(err))
    }
}
