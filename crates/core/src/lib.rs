//! Core business logic for coaster-reviews.

pub mod services;

pub use services::*;

/// Round a rating or an average of ratings to two decimal places.
#[must_use]
pub fn round_score(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
