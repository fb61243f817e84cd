//! Read-only HTML pages.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use coaster_views::{PageContext, pages};

use super::page_context;
use crate::{
    extractors::{MaybeAuthUser, PageAuthUser},
    middleware::AppState,
    response::PageResult,
};

/// Home page with the rankings.
async fn index(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    jar: CookieJar,
) -> PageResult {
    let rankings = state.ranking_service.index(Utc::now()).await?;

    let review_ids: Vec<String> = rankings
        .trending_reviews
        .iter()
        .map(|t| t.review.id.clone())
        .collect();
    let (jar, ctx) = page_context(&state, jar, user, &review_ids).await?;

    Ok((jar, Html(pages::index(&ctx, &rankings))).into_response())
}

/// Every rollercoaster.
async fn list_rollercoasters(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    jar: CookieJar,
) -> PageResult {
    let rollercoasters = state.rollercoaster_service.list_with_scores().await?;
    let (jar, ctx) = page_context(&state, jar, user, &[]).await?;

    Ok((jar, Html(pages::rollercoasters(&ctx, &rollercoasters))).into_response())
}

/// One rollercoaster with its reviews.
async fn show_rollercoaster(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    jar: CookieJar,
    Path(id): Path<String>,
) -> PageResult {
    let entry = state.rollercoaster_service.get_with_score(&id).await?;
    let reviews = state.review_service.list_for_rollercoaster(&id).await?;

    let review_ids: Vec<String> = reviews.iter().map(|r| r.review.id.clone()).collect();
    let (jar, ctx) = page_context(&state, jar, user, &review_ids).await?;

    Ok((jar, Html(pages::rollercoaster(&ctx, &entry, &reviews))).into_response())
}

/// One review.
async fn show_review(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    jar: CookieJar,
    Path(id): Path<String>,
) -> PageResult {
    let detail = state.review_service.get_detail(&id).await?;
    let (jar, ctx) = page_context(&state, jar, user, &[detail.review.id.clone()]).await?;

    Ok((jar, Html(pages::review(&ctx, &detail))).into_response())
}

/// Every user.
async fn list_users(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    jar: CookieJar,
) -> PageResult {
    let users = state.user_service.list().await?;
    let (jar, ctx) = page_context(&state, jar, user, &[]).await?;

    Ok((jar, Html(pages::users(&ctx, &users))).into_response())
}

/// The signed-in user's own profile.
async fn own_profile(PageAuthUser(user): PageAuthUser) -> Redirect {
    Redirect::to(&format!("/profile/{}", user.id))
}

/// A user's profile.
async fn show_profile(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    jar: CookieJar,
    Path(id): Path<String>,
) -> PageResult {
    let profile = state.review_service.profile(&id).await?;

    let review_ids: Vec<String> = profile.reviews.iter().map(|r| r.review.id.clone()).collect();
    let (jar, ctx) = page_context(&state, jar, user, &review_ids).await?;

    Ok((jar, Html(pages::profile(&ctx, &profile))).into_response())
}

/// Not-found page, also used as the router fallback.
pub(super) async fn not_found(MaybeAuthUser(user): MaybeAuthUser) -> Response {
    let ctx = PageContext::new(user, None);
    (StatusCode::NOT_FOUND, Html(pages::not_found(&ctx))).into_response()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/rollercoasters", get(list_rollercoasters))
        .route("/rollercoaster/{id}", get(show_rollercoaster))
        .route("/review/{id}", get(show_review))
        .route("/users", get(list_users))
        .route("/profile", get(own_profile))
        .route("/profile/{id}", get(show_profile))
        .route("/404", get(not_found))
}
