//! Like service.

use std::collections::HashSet;

use coaster_common::{AppError, AppResult};
use coaster_db::{
    entities::review,
    repositories::{LikesRepository, ReviewRepository},
};
use tracing::debug;

/// Like service for business logic.
#[derive(Clone)]
pub struct LikeService {
    likes_repo: LikesRepository,
    review_repo: ReviewRepository,
}

impl LikeService {
    /// Create a new like service.
    #[must_use]
    pub const fn new(likes_repo: LikesRepository, review_repo: ReviewRepository) -> Self {
        Self {
            likes_repo,
            review_repo,
        }
    }

    /// Like a review. Returns the review with its new like count.
    pub async fn add(&self, user_id: &str, review_id: &str) -> AppResult<review::Model> {
        self.review_repo.get_by_id(review_id).await?;

        if self.likes_repo.has_liked(user_id, review_id).await? {
            return Err(AppError::Conflict("Review already liked".to_string()));
        }

        let review = self.likes_repo.add(user_id, review_id).await?;
        debug!(user_id = %user_id, review_id = %review_id, likes = review.likes, "Review liked");

        Ok(review)
    }

    /// Take back a like. Returns the review with its new like count.
    pub async fn remove(&self, user_id: &str, review_id: &str) -> AppResult<review::Model> {
        self.review_repo.get_by_id(review_id).await?;

        let review = self.likes_repo.remove(user_id, review_id).await?;
        debug!(user_id = %user_id, review_id = %review_id, likes = review.likes, "Review unliked");

        Ok(review)
    }

    /// Of `review_ids`, the ones `user_id` has liked.
    pub async fn liked_among(
        &self,
        user_id: &str,
        review_ids: &[String],
    ) -> AppResult<HashSet<String>> {
        Ok(self
            .likes_repo
            .find_liked_review_ids(user_id, review_ids)
            .await?
            .into_iter()
            .collect())
    }
}
