use std::fmt::Debug;
use std::fmt::Display;

use axum::response::Html;
use axum::{http::StatusCode, response::IntoResponse};
use tracing::error;

pub struct AppError {
    pub inner: anyhow::Error,
}

impl AppError {
    /// A primary-key lookup that matched nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.inner.downcast_ref::<diesel::result::Error>(),
            Some(diesel::result::Error::NotFound)
        )
    }
}

// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.is_not_found() {
            return (StatusCode::NOT_FOUND, Html("<h1>Not Found</h1>".to_owned())).into_response();
        }

        error!(error = ?self.inner, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Something went wrong</h1>".to_owned()),
        )
            .into_response()
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.inner, f)
    }
}

impl Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.inner, f)
    }
}

// This enables using `?` on functions that return `Result<_, anyhow::Error>` to turn them into
// `Result<_, AppError>`. That way you don't need to do that manually.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self { inner: err.into() }
    }
}
