//! Review service.

use std::collections::HashMap;

use crate::round_score;
use coaster_common::{AppError, AppResult, IdGenerator};
use coaster_db::{
    entities::{review, rollercoaster, user},
    repositories::{ReviewRepository, RollercoasterRepository, UserRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

/// Input for writing a review.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReviewInput {
    /// Exact name of the reviewed rollercoaster.
    #[validate(length(min = 1, message = "Choose a rollercoaster"))]
    pub rollercoaster: String,

    #[validate(range(min = 0.0, max = 10.0, message = "Rating must be 0-10"))]
    pub rating: f64,

    #[validate(length(min = 1, max = 400, message = "Review must be 1-400 characters"))]
    pub content: String,
}

/// A review with its author.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewWithAuthor {
    pub review: review::Model,
    pub author: user::Model,
}

/// A review with the rollercoaster it is about.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewWithRollercoaster {
    pub review: review::Model,
    pub rollercoaster: rollercoaster::Model,
}

/// A review with both its author and its rollercoaster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewDetail {
    pub review: review::Model,
    pub author: user::Model,
    pub rollercoaster: rollercoaster::Model,
}

/// Summary of a user's reviews shown on their profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileStats {
    pub total_reviews: usize,
    pub total_likes: i64,
    pub highest: Option<review::Model>,
    pub lowest: Option<review::Model>,
    pub average: Option<f64>,
}

impl ProfileStats {
    /// Compute the statistics over `reviews`.
    ///
    /// On equal ratings the first review in `reviews` wins.
    #[must_use]
    pub fn from_reviews<'a>(reviews: impl IntoIterator<Item = &'a review::Model>) -> Self {
        let mut stats = Self::default();
        let mut rating_sum = 0.0;

        for review in reviews {
            stats.total_reviews += 1;
            stats.total_likes += i64::from(review.likes);
            rating_sum += review.rating;

            if stats.highest.as_ref().is_none_or(|h| review.rating > h.rating) {
                stats.highest = Some(review.clone());
            }
            if stats.lowest.as_ref().is_none_or(|l| review.rating < l.rating) {
                stats.lowest = Some(review.clone());
            }
        }

        if stats.total_reviews > 0 {
            stats.average = Some(round_score(rating_sum / stats.total_reviews as f64));
        }

        stats
    }
}

/// Everything shown on a user's profile page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub user: user::Model,
    pub reviews: Vec<ReviewWithRollercoaster>,
    pub stats: ProfileStats,
}

/// Review service for business logic.
#[derive(Clone)]
pub struct ReviewService {
    review_repo: ReviewRepository,
    user_repo: UserRepository,
    rollercoaster_repo: RollercoasterRepository,
    id_gen: IdGenerator,
}

impl ReviewService {
    /// Create a new review service.
    #[must_use]
    pub const fn new(
        review_repo: ReviewRepository,
        user_repo: UserRepository,
        rollercoaster_repo: RollercoasterRepository,
    ) -> Self {
        Self {
            review_repo,
            user_repo,
            rollercoaster_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Write a review for the rollercoaster named in `input`.
    pub async fn create(&self, user_id: &str, input: CreateReviewInput) -> AppResult<review::Model> {
        let input = CreateReviewInput {
            content: input.content.trim().to_string(),
            ..input
        };
        input.validate()?;

        if !input.rating.is_finite() {
            return Err(AppError::Validation("Rating must be 0-10".to_string()));
        }

        let rollercoaster = self
            .rollercoaster_repo
            .find_by_name(&input.rollercoaster)
            .await?
            .ok_or_else(|| {
                AppError::Validation(format!("Unknown rollercoaster: {}", input.rollercoaster))
            })?;

        let model = review::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            rollercoaster_id: Set(rollercoaster.id),
            rating: Set(round_score(input.rating)),
            review_text: Set(input.content),
            likes: Set(0),
            created_at: Set(chrono::Utc::now().into()),
        };

        let review = self.review_repo.create(model).await?;
        info!(
            review_id = %review.id,
            user_id = %user_id,
            rollercoaster_id = %review.rollercoaster_id,
            "Review written"
        );

        Ok(review)
    }

    /// Get a review with its author and rollercoaster.
    pub async fn get_detail(&self, id: &str) -> AppResult<ReviewDetail> {
        let review = self.review_repo.get_by_id(id).await?;

        let author = self.user_repo.find_by_id(&review.user_id).await?;
        let rollercoaster = self
            .rollercoaster_repo
            .find_by_id(&review.rollercoaster_id)
            .await?;

        match (author, rollercoaster) {
            (Some(author), Some(rollercoaster)) => Ok(ReviewDetail {
                review,
                author,
                rollercoaster,
            }),
            _ => Err(AppError::ReviewNotFound(id.to_string())),
        }
    }

    /// Reviews of a rollercoaster with their authors, newest first.
    pub async fn list_for_rollercoaster(
        &self,
        rollercoaster_id: &str,
    ) -> AppResult<Vec<ReviewWithAuthor>> {
        let reviews = self.review_repo.find_by_rollercoaster(rollercoaster_id).await?;

        let user_ids: Vec<String> = reviews.iter().map(|r| r.user_id.clone()).collect();
        let authors: HashMap<String, user::Model> = self
            .user_repo
            .find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        Ok(reviews
            .into_iter()
            .filter_map(|review| {
                let author = authors.get(&review.user_id).cloned()?;
                Some(ReviewWithAuthor { review, author })
            })
            .collect())
    }

    /// Reviews written by a user with their rollercoasters, newest first.
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<ReviewWithRollercoaster>> {
        let reviews = self.review_repo.find_by_user(user_id).await?;

        let coaster_ids: Vec<String> = reviews.iter().map(|r| r.rollercoaster_id.clone()).collect();
        let rollercoasters: HashMap<String, rollercoaster::Model> = self
            .rollercoaster_repo
            .find_by_ids(&coaster_ids)
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        Ok(reviews
            .into_iter()
            .filter_map(|review| {
                let rollercoaster = rollercoasters.get(&review.rollercoaster_id).cloned()?;
                Some(ReviewWithRollercoaster {
                    review,
                    rollercoaster,
                })
            })
            .collect())
    }

    /// Assemble a user's profile: the user, their reviews and statistics.
    pub async fn profile(&self, user_id: &str) -> AppResult<UserProfile> {
        let user = self.user_repo.get_by_id(user_id).await?;
        let reviews = self.list_for_user(user_id).await?;
        let stats = ProfileStats::from_reviews(reviews.iter().map(|r| &r.review));

        Ok(UserProfile {
            user,
            reviews,
            stats,
        })
    }
}
