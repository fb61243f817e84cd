//! HTTP layer for coaster-reviews.
//!
//! - **Endpoints**: HTML pages, form submissions and the JSON like endpoints
//! - **Extractors**: signed-in user for JSON and page handlers
//! - **Middleware**: session resolution from cookie or `Bearer` header
//! - **Session**: session and flash cookies
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;
pub mod session;

pub use endpoints::router;
pub use middleware::{AppState, auth_middleware};
