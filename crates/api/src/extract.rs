//! Request extractors whose rejections flow through [`AppError`].

use axum::extract::FromRequest;

use crate::middleware::error_handling::AppError;

/// `axum::Json` with malformed or incomplete bodies reported as validation
/// errors in the usual `{"error", "kind"}` shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
