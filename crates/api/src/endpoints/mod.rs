//! HTTP endpoints.

mod auth;
mod likes;
mod pages;
mod reviews;

use std::collections::HashSet;

use axum::Router;
use axum_extra::extract::cookie::CookieJar;
use coaster_common::AppResult;
use coaster_db::entities::user;
use coaster_views::PageContext;

use crate::{middleware::AppState, session::take_flash};

/// Create the application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(pages::router())
        .merge(reviews::router())
        .merge(likes::router())
        .merge(auth::router())
        .fallback(pages::not_found)
}

/// Build the page context for `user`, consuming any pending flash message.
///
/// `review_ids` are the reviews shown on the page; the ones `user` has liked
/// are marked in the context.
async fn page_context(
    state: &AppState,
    jar: CookieJar,
    user: Option<user::Model>,
    review_ids: &[String],
) -> AppResult<(CookieJar, PageContext)> {
    let (jar, flash) = take_flash(jar);

    let liked = match &user {
        Some(u) if !review_ids.is_empty() => {
            state.like_service.liked_among(&u.id, review_ids).await?
        }
        _ => HashSet::new(),
    };

    Ok((jar, PageContext::new(user, flash).with_liked(liked)))
}
