//! Review form.

use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use coaster_common::{AppError, AppResult};
use coaster_core::CreateReviewInput;
use coaster_db::entities::user;
use coaster_views::{Flash, PageContext, pages};
use serde::Deserialize;
use tracing::debug;

use super::page_context;
use crate::{
    extractors::PageAuthUser, middleware::AppState, response::PageResult, session::set_flash,
};

/// Review form submission.
///
/// `rating` stays a string so a malformed number re-renders the form instead
/// of failing extraction.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub rollercoaster: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub content: String,
}

async fn rollercoaster_names(state: &AppState) -> AppResult<Vec<String>> {
    Ok(state
        .rollercoaster_service
        .list()
        .await?
        .into_iter()
        .map(|rc| rc.name)
        .collect())
}

/// Show the review form.
async fn new_review(
    State(state): State<AppState>,
    PageAuthUser(user): PageAuthUser,
    jar: CookieJar,
) -> PageResult {
    let names = rollercoaster_names(&state).await?;
    let (jar, ctx) = page_context(&state, jar, Some(user), &[]).await?;

    Ok((jar, Html(pages::write_review(&ctx, &names, None))).into_response())
}

/// Create a review and return to its rollercoaster.
async fn create_review(
    State(state): State<AppState>,
    PageAuthUser(user): PageAuthUser,
    jar: CookieJar,
    Form(form): Form<ReviewForm>,
) -> PageResult {
    let Ok(rating) = form.rating.trim().parse::<f64>() else {
        return rejected(&state, user, "Rating must be a number").await;
    };

    let input = CreateReviewInput {
        rollercoaster: form.rollercoaster,
        rating,
        content: form.content,
    };

    match state.review_service.create(&user.id, input).await {
        Ok(review) => {
            let jar = set_flash(jar, Flash::ReviewWritten);
            let to = format!("/rollercoaster/{}", review.rollercoaster_id);
            Ok((jar, Redirect::to(&to)).into_response())
        }
        Err(AppError::Validation(message)) => {
            debug!(user_id = %user.id, %message, "Review rejected");
            rejected(&state, user, &message).await
        }
        Err(e) => Err(e.into()),
    }
}

/// Re-render the form with `message`.
async fn rejected(state: &AppState, user: user::Model, message: &str) -> PageResult {
    let names = rollercoaster_names(state).await?;
    let ctx = PageContext::new(Some(user), None);

    Ok((
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(pages::write_review(&ctx, &names, Some(message))),
    )
        .into_response())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/add_review", get(new_review).post(create_review))
}
