//! Rankings shown on the index page.
//!
//! Each ranking is one aggregate query that yields ordered `(id, number)`
//! rows, followed by a batch lookup of the models those ids refer to. The
//! aggregate order is kept; rows whose model has disappeared in between are
//! dropped.

use std::collections::HashMap;

use crate::round_score;
use chrono::{DateTime, Duration, Utc};
use coaster_common::{AppResult, config::RankingsConfig};
use coaster_db::{
    entities::{review, rollercoaster, user},
    repositories::{LikesRepository, ReviewRepository, RollercoasterRepository, UserRepository},
};
use serde::Serialize;

/// A rollercoaster and how many reviews it got in the trending window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingRollercoaster {
    pub rollercoaster: rollercoaster::Model,
    pub review_count: i64,
}

/// A review and how many likes it got in the trending window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingReview {
    pub review: review::Model,
    pub author: user::Model,
    pub rollercoaster: rollercoaster::Model,
    pub like_count: i64,
}

/// A rollercoaster with its all-time average rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedRollercoaster {
    pub rollercoaster: rollercoaster::Model,
    pub average_score: f64,
    pub review_count: i64,
}

/// A user with the likes collected over all their reviews.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LikedUser {
    pub user: user::Model,
    pub total_likes: i64,
}

/// All four index rankings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndexRankings {
    pub trending_rollercoasters: Vec<TrendingRollercoaster>,
    pub trending_reviews: Vec<TrendingReview>,
    pub highest_rated: Vec<RatedRollercoaster>,
    pub most_liked_users: Vec<LikedUser>,
}

/// Ranking service.
#[derive(Clone)]
pub struct RankingService {
    review_repo: ReviewRepository,
    likes_repo: LikesRepository,
    user_repo: UserRepository,
    rollercoaster_repo: RollercoasterRepository,
    config: RankingsConfig,
}

impl RankingService {
    /// Create a new ranking service.
    #[must_use]
    pub const fn new(
        review_repo: ReviewRepository,
        likes_repo: LikesRepository,
        user_repo: UserRepository,
        rollercoaster_repo: RollercoasterRepository,
        config: RankingsConfig,
    ) -> Self {
        Self {
            review_repo,
            likes_repo,
            user_repo,
            rollercoaster_repo,
            config,
        }
    }

    /// Start of the trending window ending at `now`.
    #[must_use]
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::hours(self.config.window_hours)
    }

    /// Compute every index ranking.
    pub async fn index(&self, now: DateTime<Utc>) -> AppResult<IndexRankings> {
        Ok(IndexRankings {
            trending_rollercoasters: self.trending_rollercoasters(now).await?,
            trending_reviews: self.trending_reviews(now).await?,
            highest_rated: self.highest_rated().await?,
            most_liked_users: self.most_liked_users().await?,
        })
    }

    /// Rollercoasters with the most reviews in the trending window.
    pub async fn trending_rollercoasters(
        &self,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<TrendingRollercoaster>> {
        let counts = self
            .review_repo
            .count_by_rollercoaster_since(self.window_start(now), self.config.trending_limit)
            .await?;

        let ids: Vec<String> = counts.iter().map(|c| c.rollercoaster_id.clone()).collect();
        let rollercoasters = by_id(self.rollercoaster_repo.find_by_ids(&ids).await?, |c| {
            c.id.clone()
        });

        Ok(counts
            .into_iter()
            .filter_map(|c| {
                Some(TrendingRollercoaster {
                    rollercoaster: rollercoasters.get(&c.rollercoaster_id).cloned()?,
                    review_count: c.review_count,
                })
            })
            .collect())
    }

    /// Reviews with the most likes in the trending window.
    pub async fn trending_reviews(&self, now: DateTime<Utc>) -> AppResult<Vec<TrendingReview>> {
        let counts = self
            .likes_repo
            .count_by_review_since(self.window_start(now), self.config.trending_limit)
            .await?;

        let review_ids: Vec<String> = counts.iter().map(|c| c.review_id.clone()).collect();
        let reviews = self.review_repo.find_by_ids(&review_ids).await?;

        let user_ids: Vec<String> = reviews.iter().map(|r| r.user_id.clone()).collect();
        let coaster_ids: Vec<String> = reviews.iter().map(|r| r.rollercoaster_id.clone()).collect();

        let authors = by_id(self.user_repo.find_by_ids(&user_ids).await?, |u| u.id.clone());
        let rollercoasters = by_id(
            self.rollercoaster_repo.find_by_ids(&coaster_ids).await?,
            |c| c.id.clone(),
        );
        let reviews = by_id(reviews, |r| r.id.clone());

        Ok(counts
            .into_iter()
            .filter_map(|c| {
                let review = reviews.get(&c.review_id)?;
                Some(TrendingReview {
                    author: authors.get(&review.user_id).cloned()?,
                    rollercoaster: rollercoasters.get(&review.rollercoaster_id).cloned()?,
                    review: review.clone(),
                    like_count: c.like_count,
                })
            })
            .collect())
    }

    /// Rollercoasters with the best average rating of all time.
    pub async fn highest_rated(&self) -> AppResult<Vec<RatedRollercoaster>> {
        let averages = self
            .review_repo
            .average_by_rollercoaster(Some(self.config.top_limit))
            .await?;

        let ids: Vec<String> = averages.iter().map(|a| a.rollercoaster_id.clone()).collect();
        let rollercoasters = by_id(self.rollercoaster_repo.find_by_ids(&ids).await?, |c| {
            c.id.clone()
        });

        Ok(averages
            .into_iter()
            .filter_map(|a| {
                Some(RatedRollercoaster {
                    rollercoaster: rollercoasters.get(&a.rollercoaster_id).cloned()?,
                    average_score: round_score(a.average_rating),
                    review_count: a.review_count,
                })
            })
            .collect())
    }

    /// Users whose reviews collected the most likes. Users without likes are left out.
    pub async fn most_liked_users(&self) -> AppResult<Vec<LikedUser>> {
        let totals = self
            .review_repo
            .total_likes_by_user(self.config.top_limit)
            .await?;

        let ids: Vec<String> = totals.iter().map(|t| t.user_id.clone()).collect();
        let users = by_id(self.user_repo.find_by_ids(&ids).await?, |u| u.id.clone());

        Ok(totals
            .into_iter()
            .filter_map(|t| {
                Some(LikedUser {
                    user: users.get(&t.user_id).cloned()?,
                    total_likes: t.total_likes,
                })
            })
            .collect())
    }
}

fn by_id<M>(models: Vec<M>, id: impl Fn(&M) -> String) -> HashMap<String, M> {
    models.into_iter().map(|m| (id(&m), m)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Value};
    use std::sync::Arc;

    fn create_test_coaster(id: &str, name: &str) -> rollercoaster::Model {
        rollercoaster::Model {
            id: id.to_string(),
            name: name.to_string(),
            year: 2016,
            height: 30.0,
            length: 1320.0,
            manufacturer: "Intamin".to_string(),
            model: "Blitz Coaster".to_string(),
            inversions: 0,
            speed: 117.0,
        }
    }

    fn create_test_user(id: &str, name: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            name: name.to_string(),
            name_lower: name.to_lowercase(),
            password: "hash".to_string(),
            token: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_review(id: &str, user_id: &str, coaster_id: &str) -> review::Model {
        review::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            rollercoaster_id: coaster_id.to_string(),
            rating: 8.0,
            review_text: "Launch is brutal".to_string(),
            likes: 3,
            created_at: Utc::now().into(),
        }
    }

    fn service(db: DatabaseConnection) -> RankingService {
        let db = Arc::new(db);
        RankingService::new(
            ReviewRepository::new(Arc::clone(&db)),
            LikesRepository::new(Arc::clone(&db)),
            UserRepository::new(Arc::clone(&db)),
            RollercoasterRepository::new(db),
            RankingsConfig::default(),
        )
    }

    #[test]
    fn test_window_start() {
        let service = service(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let now = Utc::now();

        assert_eq!(service.window_start(now), now - Duration::hours(36));
    }

    #[tokio::test]
    async fn test_trending_rollercoasters_keeps_aggregate_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[
                btreemap! {
                    "rollercoaster_id" => Into::<Value>::into("rc2"),
                    "review_count" => Into::<Value>::into(5i64),
                },
                btreemap! {
                    "rollercoaster_id" => Into::<Value>::into("gone"),
                    "review_count" => Into::<Value>::into(3i64),
                },
                btreemap! {
                    "rollercoaster_id" => Into::<Value>::into("rc1"),
                    "review_count" => Into::<Value>::into(2i64),
                },
            ]])
            // Lookup order differs from ranking order.
            .append_query_results([[
                create_test_coaster("rc1", "Taron"),
                create_test_coaster("rc2", "Kingda Ka"),
            ]])
            .into_connection();

        let result = service(db).trending_rollercoasters(Utc::now()).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].rollercoaster.name, "Kingda Ka");
        assert_eq!(result[0].review_count, 5);
        assert_eq!(result[1].rollercoaster.name, "Taron");
    }

    #[tokio::test]
    async fn test_trending_rollercoasters_empty_window() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<std::collections::BTreeMap<&str, Value>>::new()])
            .into_connection();

        let result = service(db).trending_rollercoasters(Utc::now()).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_trending_reviews() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[
                btreemap! {
                    "review_id" => Into::<Value>::into("r2"),
                    "like_count" => Into::<Value>::into(4i64),
                },
                btreemap! {
                    "review_id" => Into::<Value>::into("r1"),
                    "like_count" => Into::<Value>::into(1i64),
                },
            ]])
            .append_query_results([[
                create_test_review("r1", "u1", "rc1"),
                create_test_review("r2", "u2", "rc1"),
            ]])
            .append_query_results([[create_test_user("u1", "Alice"), create_test_user("u2", "Bob")]])
            .append_query_results([[create_test_coaster("rc1", "Taron")]])
            .into_connection();

        let result = service(db).trending_reviews(Utc::now()).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].review.id, "r2");
        assert_eq!(result[0].author.name, "Bob");
        assert_eq!(result[0].like_count, 4);
        assert_eq!(result[1].rollercoaster.name, "Taron");
    }

    #[tokio::test]
    async fn test_highest_rated_rounds_average() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[btreemap! {
                "rollercoaster_id" => Into::<Value>::into("rc1"),
                "average_rating" => Into::<Value>::into(9.333_333f64),
                "review_count" => Into::<Value>::into(3i64),
            }]])
            .append_query_results([[create_test_coaster("rc1", "Taron")]])
            .into_connection();

        let result = service(db).highest_rated().await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].average_score, 9.33);
        assert_eq!(result[0].review_count, 3);
    }

    #[tokio::test]
    async fn test_most_liked_users() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[
                btreemap! {
                    "user_id" => Into::<Value>::into("u2"),
                    "total_likes" => Into::<Value>::into(10i64),
                },
                btreemap! {
                    "user_id" => Into::<Value>::into("u1"),
                    "total_likes" => Into::<Value>::into(1i64),
                },
            ]])
            .append_query_results([[create_test_user("u1", "Alice"), create_test_user("u2", "Bob")]])
            .into_connection();

        let result = service(db).most_liked_users().await.unwrap();

        let names: Vec<&str> = result.iter().map(|u| u.user.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice"]);
        assert_eq!(result[0].total_likes, 10);
    }
}
