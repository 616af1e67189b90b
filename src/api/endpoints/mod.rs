//! HTTP endpoint handlers.
//!
//! Pages and JSON routes share the prediction pipeline in
//! [`crate::prediction`]; handlers only adapt its output.

pub mod auth;
pub mod health;
pub mod pages;
pub mod predict;

use axum::http::Uri;

use crate::api::error::ApiError;

/// Fallback for unknown `/api/*` routes.
pub async fn api_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
