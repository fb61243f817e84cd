//! Review repository.

use std::sync::Arc;

use crate::entities::{Review, review};
use chrono::{DateTime, Utc};
use coaster_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, sea_query::Expr,
};

/// Number of reviews a rollercoaster received in some period.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct RollercoasterReviewCount {
    pub rollercoaster_id: String,
    pub review_count: i64,
}

/// Mean rating of a rollercoaster over all its reviews.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct RollercoasterAverage {
    pub rollercoaster_id: String,
    pub average_rating: f64,
    pub review_count: i64,
}

/// Likes received by one user, summed over their reviews.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct UserLikeTotal {
    pub user_id: String,
    pub total_likes: i64,
}

/// Review repository for database operations.
#[derive(Clone)]
pub struct ReviewRepository {
    db: Arc<DatabaseConnection>,
}

impl ReviewRepository {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a review by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<review::Model>> {
        Review::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a review by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<review::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ReviewNotFound(id.to_string()))
    }

    /// Find reviews by IDs.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<review::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        Review::find()
            .filter(review::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new review.
    pub async fn create(&self, model: review::ActiveModel) -> AppResult<review::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Reviews of a rollercoaster, newest first.
    pub async fn find_by_rollercoaster(
        &self,
        rollercoaster_id: &str,
    ) -> AppResult<Vec<review::Model>> {
        Review::find()
            .filter(review::Column::RollercoasterId.eq(rollercoaster_id))
            .order_by_desc(review::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Reviews written by a user, newest first.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<review::Model>> {
        Review::find()
            .filter(review::Column::UserId.eq(user_id))
            .order_by_desc(review::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Rollercoasters with the most reviews written since `since`.
    ///
    /// Ties go to the coaster reviewed most recently.
    pub async fn count_by_rollercoaster_since(
        &self,
        since: DateTime<Utc>,
        limit: u64,
    ) -> AppResult<Vec<RollercoasterReviewCount>> {
        Review::find()
            .select_only()
            .column(review::Column::RollercoasterId)
            .column_as(review::Column::Id.count(), "review_count")
            .filter(review::Column::CreatedAt.gte(since))
            .group_by(review::Column::RollercoasterId)
            .order_by_desc(Expr::cust("review_count"))
            .order_by_desc(review::Column::CreatedAt.max())
            .limit(limit)
            .into_model::<RollercoasterReviewCount>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Average rating per rollercoaster, best first.
    ///
    /// Coasters without reviews have no row. `None` returns every coaster.
    pub async fn average_by_rollercoaster(
        &self,
        limit: Option<u64>,
    ) -> AppResult<Vec<RollercoasterAverage>> {
        let mut query = Review::find()
            .select_only()
            .column(review::Column::RollercoasterId)
            .column_as(
                Expr::cust("CAST(AVG(rating) AS DOUBLE PRECISION)"),
                "average_rating",
            )
            .column_as(review::Column::Id.count(), "review_count")
            .group_by(review::Column::RollercoasterId)
            .order_by_desc(Expr::cust("average_rating"))
            .order_by_desc(Expr::cust("review_count"));

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        query
            .into_model::<RollercoasterAverage>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Average rating of a single rollercoaster, `None` if it has no reviews.
    pub async fn average_for_rollercoaster(&self, rollercoaster_id: &str) -> AppResult<Option<f64>> {
        #[derive(FromQueryResult)]
        struct AverageResult {
            average_rating: Option<f64>,
        }

        let result = Review::find()
            .select_only()
            .column_as(
                Expr::cust("CAST(AVG(rating) AS DOUBLE PRECISION)"),
                "average_rating",
            )
            .filter(review::Column::RollercoasterId.eq(rollercoaster_id))
            .into_model::<AverageResult>()
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.and_then(|r| r.average_rating))
    }

    /// Users whose reviews collected the most likes.
    ///
    /// Users with no likes at all are left out.
    pub async fn total_likes_by_user(&self, limit: u64) -> AppResult<Vec<UserLikeTotal>> {
        Review::find()
            .select_only()
            .column(review::Column::UserId)
            .column_as(
                Expr::cust("CAST(SUM(likes) AS BIGINT)"),
                "total_likes",
            )
            .group_by(review::Column::UserId)
            .having(Expr::cust("SUM(likes) > 0"))
            .order_by_desc(Expr::cust("total_likes"))
            .limit(limit)
            .into_model::<UserLikeTotal>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
