//! Response types.

use axum::response::{IntoResponse, Redirect, Response};
use coaster_common::AppError;
use serde::Serialize;

/// Result of a page handler.
pub type PageResult<T = Response> = Result<T, PageError>;

/// Error raised while rendering a page.
///
/// Missing entities redirect to `/404` and missing sessions to `/login`;
/// everything else renders as an [`AppError`].
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self.0 {
            ref err if err.is_not_found() => {
                tracing::debug!(error = %err, "Page target not found");
                Redirect::to("/404").into_response()
            }
            AppError::Unauthorized => Redirect::to("/login").into_response(),
            err => err.into_response(),
        }
    }
}

/// Body returned by the like endpoints.
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub likes: i32,
    pub status: &'static str,
}

impl LikeResponse {
    #[must_use]
    pub const fn success(likes: i32) -> Self {
        Self {
            likes,
            status: "success",
        }
    }
}
