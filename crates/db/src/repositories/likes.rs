//! Likes repository.
//!
//! The `likes` counter on a review is derived from the rows of this table.
//! Every write here changes both inside one transaction.

use std::sync::Arc;

use crate::entities::{Likes, Review, likes, review};
use chrono::{DateTime, Utc};
use coaster_common::{AppError, AppResult};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr, TransactionTrait, TryInsertResult, sea_query::Expr,
};

/// Number of likes a review received in some period.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct ReviewLikeCount {
    pub review_id: String,
    pub like_count: i64,
}

/// Likes repository for database operations.
#[derive(Clone)]
pub struct LikesRepository {
    db: Arc<DatabaseConnection>,
}

impl LikesRepository {
    /// Create a new likes repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the like a user gave a review.
    pub async fn find_by_user_and_review(
        &self,
        user_id: &str,
        review_id: &str,
    ) -> AppResult<Option<likes::Model>> {
        Likes::find_by_id((user_id.to_string(), review_id.to_string()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a user has liked a review.
    pub async fn has_liked(&self, user_id: &str, review_id: &str) -> AppResult<bool> {
        Ok(self
            .find_by_user_and_review(user_id, review_id)
            .await?
            .is_some())
    }

    /// Of `review_ids`, the ones `user_id` has liked.
    pub async fn find_liked_review_ids(
        &self,
        user_id: &str,
        review_ids: &[String],
    ) -> AppResult<Vec<String>> {
        if review_ids.is_empty() {
            return Ok(vec![]);
        }

        Likes::find()
            .select_only()
            .column(likes::Column::ReviewId)
            .filter(likes::Column::UserId.eq(user_id))
            .filter(likes::Column::ReviewId.is_in(review_ids.to_vec()))
            .into_tuple::<String>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a like and bump the review's counter.
    ///
    /// Returns the review with its updated counter. A second like by the same
    /// user inserts nothing and fails with [`AppError::Conflict`], leaving the
    /// counter untouched.
    pub async fn add(&self, user_id: &str, review_id: &str) -> AppResult<review::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let like = likes::ActiveModel {
            user_id: Set(user_id.to_string()),
            review_id: Set(review_id.to_string()),
            created_at: Set(Utc::now().into()),
        };

        let inserted = Likes::insert(like)
            .on_conflict_do_nothing()
            .exec_without_returning(&txn)
            .await
            .map_err(like_insert_error)?;

        if !matches!(inserted, TryInsertResult::Inserted(n) if n > 0) {
            // Dropping `txn` rolls back.
            return Err(already_liked());
        }

        Review::update_many()
            .col_expr(review::Column::Likes, Expr::col(review::Column::Likes).add(1))
            .filter(review::Column::Id.eq(review_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let review = Review::find_by_id(review_id)
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::ReviewNotFound(review_id.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(review)
    }

    /// Delete a like and lower the review's counter (never below zero).
    ///
    /// Returns the review with its updated counter.
    pub async fn remove(&self, user_id: &str, review_id: &str) -> AppResult<review::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let deleted = Likes::delete_many()
            .filter(likes::Column::UserId.eq(user_id))
            .filter(likes::Column::ReviewId.eq(review_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if deleted.rows_affected == 0 {
            // Dropping `txn` rolls back.
            return Err(AppError::NotFound("Like not found".to_string()));
        }

        Review::update_many()
            .col_expr(review::Column::Likes, Expr::cust("GREATEST(likes - 1, 0)"))
            .filter(review::Column::Id.eq(review_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let review = Review::find_by_id(review_id)
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::ReviewNotFound(review_id.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(review)
    }

    /// Reviews that collected the most likes since `since`.
    pub async fn count_by_review_since(
        &self,
        since: DateTime<Utc>,
        limit: u64,
    ) -> AppResult<Vec<ReviewLikeCount>> {
        Likes::find()
            .select_only()
            .column(likes::Column::ReviewId)
            .column_as(likes::Column::UserId.count(), "like_count")
            .filter(likes::Column::CreatedAt.gte(since))
            .group_by(likes::Column::ReviewId)
            .order_by_desc(Expr::cust("like_count"))
            .order_by_desc(likes::Column::CreatedAt.max())
            .limit(limit)
            .into_model::<ReviewLikeCount>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

fn already_liked() -> AppError {
    AppError::Conflict("Review already liked".to_string())
}

fn like_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => already_liked(),
        _ => AppError::Database(err.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

    fn create_test_like(user_id: &str, review_id: &str) -> likes::Model {
        likes::Model {
            user_id: user_id.to_string(),
            review_id: review_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_review(id: &str, likes: i32) -> review::Model {
        review::Model {
            id: id.to_string(),
            user_id: "author".to_string(),
            rollercoaster_id: "rc1".to_string(),
            rating: 8.0,
            review_text: "Great pacing".to_string(),
            likes,
            created_at: Utc::now().into(),
        }
    }

    const fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn test_has_liked_true() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_like("user1", "rev1")]])
                .into_connection(),
        );

        let repo = LikesRepository::new(db);
        assert!(repo.has_liked("user1", "rev1").await.unwrap());
    }

    #[tokio::test]
    async fn test_has_liked_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<likes::Model>::new()])
                .into_connection(),
        );

        let repo = LikesRepository::new(db);
        assert!(!repo.has_liked("user1", "rev1").await.unwrap());
    }

    #[tokio::test]
    async fn test_add_returns_updated_review() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(1), exec(1)])
                .append_query_results([[create_test_review("rev1", 3)]])
                .into_connection(),
        );

        let repo = LikesRepository::new(db);
        let review = repo.add("user1", "rev1").await.unwrap();

        assert_eq!(review.id, "rev1");
        assert_eq!(review.likes, 3);
    }

    #[tokio::test]
    async fn test_add_existing_like_is_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(0)])
            .into_connection();

        let repo = LikesRepository::new(Arc::new(db));
        let result = repo.add("user1", "rev1").await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_add_skips_counter_on_conflict() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(0), exec(1)])
                .append_query_results([[create_test_review("rev1", 1)]])
                .into_connection(),
        );

        let repo = LikesRepository::new(Arc::clone(&db));
        assert!(repo.add("user1", "rev1").await.is_err());
        drop(repo);

        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        let sql: Vec<&str> = log
            .iter()
            .flat_map(|txn| txn.statements())
            .map(|stmt| stmt.sql.as_str())
            .collect();

        assert!(sql.iter().any(|s| s.contains("ON CONFLICT") && s.contains("DO NOTHING")));
        assert!(!sql.iter().any(|s| s.starts_with("UPDATE")));
    }

    #[tokio::test]
    async fn test_remove_without_like_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(0)])
                .into_connection(),
        );

        let repo = LikesRepository::new(db);
        let result = repo.remove("user1", "rev1").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_returns_updated_review() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(1), exec(1)])
                .append_query_results([[create_test_review("rev1", 0)]])
                .into_connection(),
        );

        let repo = LikesRepository::new(db);
        let review = repo.remove("user1", "rev1").await.unwrap();

        assert_eq!(review.likes, 0);
    }

    #[tokio::test]
    async fn test_find_liked_review_ids_empty_input() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = LikesRepository::new(db);
        let result = repo.find_liked_review_ids("user1", &[]).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_count_by_review_since() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    btreemap! {
                        "review_id" => Into::<Value>::into("rev2"),
                        "like_count" => Into::<Value>::into(6i64),
                    },
                    btreemap! {
                        "review_id" => Into::<Value>::into("rev1"),
                        "like_count" => Into::<Value>::into(2i64),
                    },
                ]])
                .into_connection(),
        );

        let repo = LikesRepository::new(db);
        let since = Utc::now() - chrono::Duration::hours(36);
        let result = repo.count_by_review_since(since, 5).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].review_id, "rev2");
        assert_eq!(result[0].like_count, 6);
    }
}
