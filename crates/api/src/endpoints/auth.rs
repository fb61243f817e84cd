//! Login, signup and logout.

use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use coaster_common::AppError;
use coaster_core::SignupInput;
use coaster_db::entities::user;
use coaster_views::{Flash, PageContext, pages};
use serde::Deserialize;

use super::page_context;
use crate::{
    extractors::{MaybeAuthUser, PageAuthUser},
    middleware::AppState,
    response::PageResult,
    session::{clear_session, set_flash, start_session},
};

const LOGIN_FAILED: &str = "Please check your login details and try again.";
const NAME_TAKEN: &str = "That name is already taken.";

/// Login form submission.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

async fn login_page(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    jar: CookieJar,
) -> PageResult {
    let (jar, ctx) = page_context(&state, jar, user, &[]).await?;
    Ok((jar, Html(pages::login(&ctx, None))).into_response())
}

async fn signup_page(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    jar: CookieJar,
) -> PageResult {
    let (jar, ctx) = page_context(&state, jar, user, &[]).await?;
    Ok((jar, Html(pages::signup(&ctx, None))).into_response())
}

/// Set the session cookie for `user` and send them to their profile.
fn signed_in(state: &AppState, jar: CookieJar, user: &user::Model) -> PageResult {
    let token = user
        .token
        .as_deref()
        .ok_or_else(|| AppError::Internal("Signed-in user has no session token".to_string()))?;

    let jar = start_session(jar, &state.session, token);
    let to = format!("/profile/{}", user.id);
    Ok((jar, Redirect::to(&to)).into_response())
}

/// Check credentials and start a session.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> PageResult {
    match state
        .user_service
        .authenticate(&form.name, &form.password)
        .await
    {
        Ok(user) => signed_in(&state, jar, &user),
        Err(AppError::Unauthorized) => Ok(form_error(
            StatusCode::UNAUTHORIZED,
            pages::login(&PageContext::anonymous(), Some(LOGIN_FAILED)),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Create an account and start a session.
async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(input): Form<SignupInput>,
) -> PageResult {
    match state.user_service.signup(input).await {
        Ok(user) => signed_in(&state, set_flash(jar, Flash::SignedUp), &user),
        Err(AppError::Validation(message)) => Ok(form_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            pages::signup(&PageContext::anonymous(), Some(&message)),
        )),
        Err(AppError::Conflict(_)) => Ok(form_error(
            StatusCode::CONFLICT,
            pages::signup(&PageContext::anonymous(), Some(NAME_TAKEN)),
        )),
        Err(e) => Err(e.into()),
    }
}

/// End every session of the signed-in user.
async fn logout(
    State(state): State<AppState>,
    PageAuthUser(user): PageAuthUser,
    jar: CookieJar,
) -> PageResult {
    state.user_service.logout(&user.id).await?;

    let jar = set_flash(clear_session(jar, &state.session), Flash::LoggedOut);
    Ok((jar, Redirect::to("/")).into_response())
}

fn form_error(status: StatusCode, html: String) -> Response {
    (status, Html(html)).into_response()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/signup", get(signup_page).post(signup))
        .route("/logout", post(logout))
}
