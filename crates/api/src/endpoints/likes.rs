//! Like endpoints.

use axum::{Json, Router, extract::State, routing::post};
use axum_extra::extract::WithRejection;
use coaster_common::{AppError, AppResult};
use serde::Deserialize;

use crate::{extractors::AuthUser, middleware::AppState, response::LikeResponse};

/// Like request.
#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    pub review_id: String,
}

/// Like a review.
async fn add_like(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    WithRejection(Json(req), _): WithRejection<Json<LikeRequest>, AppError>,
) -> AppResult<Json<LikeResponse>> {
    let review = state.like_service.add(&user.id, &req.review_id).await?;
    Ok(Json(LikeResponse::success(review.likes)))
}

/// Take back a like.
async fn remove_like(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    WithRejection(Json(req), _): WithRejection<Json<LikeRequest>, AppError>,
) -> AppResult<Json<LikeResponse>> {
    let review = state.like_service.remove(&user.id, &req.review_id).await?;
    Ok(Json(LikeResponse::success(review.likes)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add_like", post(add_like))
        .route("/remove_like", post(remove_like))
}
