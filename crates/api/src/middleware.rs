//! Application state and request middleware.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use coaster_common::{AppError, Config, config::SessionConfig};
use coaster_core::{LikeService, RankingService, ReviewService, RollercoasterService, UserService};
use coaster_db::repositories::{
    LikesRepository, ReviewRepository, RollercoasterRepository, UserRepository,
};
use sea_orm::DatabaseConnection;
use tracing::{debug, warn};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub rollercoaster_service: RollercoasterService,
    pub review_service: ReviewService,
    pub like_service: LikeService,
    pub ranking_service: RankingService,
    pub session: SessionConfig,
}

impl AppState {
    /// Wire every repository and service onto one connection pool.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>, config: &Config) -> Self {
        let user_repo = UserRepository::new(Arc::clone(&db));
        let rollercoaster_repo = RollercoasterRepository::new(Arc::clone(&db));
        let review_repo = ReviewRepository::new(Arc::clone(&db));
        let likes_repo = LikesRepository::new(db);

        Self {
            user_service: UserService::new(user_repo.clone()),
            rollercoaster_service: RollercoasterService::new(
                rollercoaster_repo.clone(),
                review_repo.clone(),
            ),
            review_service: ReviewService::new(
                review_repo.clone(),
                user_repo.clone(),
                rollercoaster_repo.clone(),
            ),
            like_service: LikeService::new(likes_repo.clone(), review_repo.clone()),
            ranking_service: RankingService::new(
                review_repo,
                likes_repo,
                user_repo,
                rollercoaster_repo,
                config.rankings.clone(),
            ),
            session: config.session.clone(),
        }
    }
}

/// Session token from the `Authorization` header, else from the session cookie.
fn session_token(req: &Request<Body>, cookie_name: &str) -> Option<String> {
    if let Some(token) = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
    {
        return Some(token.to_string());
    }

    CookieJar::from_headers(req.headers())
        .get(cookie_name)
        .map(|c| c.value().to_string())
}

/// Authentication middleware.
///
/// Attaches the signed-in `user::Model` to the request extensions. Requests
/// with a stale token carry on anonymously.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = session_token(&req, &state.session.cookie_name) {
        match state.user_service.authenticate_by_token(&token).await {
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
            Err(AppError::Unauthorized) => debug!("Ignoring stale session token"),
            Err(e) => warn!(error = %e, "Session lookup failed"),
        }
    }

    next.run(req).await
}
