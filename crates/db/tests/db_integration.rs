//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `coaster_test`)
//!   `TEST_DB_PASSWORD` (default: `coaster_test`)

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use coaster_common::AppError;
use coaster_db::{
    entities::{review, user},
    repositories::{LikesRepository, ReviewRepository, RollercoasterRepository, UserRepository},
    test_utils::{TestDatabase, TestDbConfig},
};
use sea_orm::Set;

async fn create_user(repo: &UserRepository, id: &str, name: &str) -> user::Model {
    repo.create(user::ActiveModel {
        id: Set(id.to_string()),
        name: Set(name.to_string()),
        name_lower: Set(name.to_lowercase()),
        password: Set("not-a-real-hash".to_string()),
        token: Set(None),
        created_at: Set(Utc::now().into()),
        updated_at: Set(None),
    })
    .await
    .unwrap()
}

async fn create_review(
    repo: &ReviewRepository,
    id: &str,
    user_id: &str,
    coaster_id: &str,
    rating: f64,
) -> review::Model {
    repo.create(review::ActiveModel {
        id: Set(id.to_string()),
        user_id: Set(user_id.to_string()),
        rollercoaster_id: Set(coaster_id.to_string()),
        rating: Set(rating),
        review_text: Set("Relentless airtime".to_string()),
        likes: Set(0),
        created_at: Set(Utc::now().into()),
    })
    .await
    .unwrap()
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_seeded_rollercoasters_present() {
    let db = TestDatabase::create_unique().await.unwrap();
    let conn = db.connection();

    let repo = RollercoasterRepository::new(conn);
    let all = repo.find_all().await.unwrap();
    assert!(!all.is_empty());

    let taron = repo.find_by_name("Taron").await.unwrap();
    assert_eq!(taron.unwrap().id, "rc-taron");

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_like_counter_follows_like_rows() {
    let db = TestDatabase::create_unique().await.unwrap();
    let conn = db.connection();

    let users = UserRepository::new(Arc::clone(&conn));
    let reviews = ReviewRepository::new(Arc::clone(&conn));
    let likes = LikesRepository::new(Arc::clone(&conn));

    create_user(&users, "u1", "Alice").await;
    create_user(&users, "u2", "Bob").await;
    create_review(&reviews, "r1", "u1", "rc-taron", 9.0).await;

    let after_like = likes.add("u2", "r1").await.unwrap();
    assert_eq!(after_like.likes, 1);
    assert!(likes.has_liked("u2", "r1").await.unwrap());

    // Second like from the same user is rejected and leaves the counter alone.
    let again = likes.add("u2", "r1").await;
    assert!(matches!(again, Err(AppError::Conflict(_))));
    assert_eq!(reviews.get_by_id("r1").await.unwrap().likes, 1);

    let after_unlike = likes.remove("u2", "r1").await.unwrap();
    assert_eq!(after_unlike.likes, 0);

    let missing = likes.remove("u2", "r1").await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
    assert_eq!(reviews.get_by_id("r1").await.unwrap().likes, 0);

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_aggregates() {
    let db = TestDatabase::create_unique().await.unwrap();
    let conn = db.connection();

    let users = UserRepository::new(Arc::clone(&conn));
    let reviews = ReviewRepository::new(Arc::clone(&conn));
    let likes = LikesRepository::new(Arc::clone(&conn));

    create_user(&users, "u1", "Alice").await;
    create_user(&users, "u2", "Bob").await;
    create_review(&reviews, "r1", "u1", "rc-taron", 9.0).await;
    create_review(&reviews, "r2", "u2", "rc-taron", 7.0).await;
    create_review(&reviews, "r3", "u2", "rc-nemesis", 6.5).await;
    likes.add("u2", "r1").await.unwrap();

    let since = Utc::now() - Duration::hours(36);

    let trending = reviews.count_by_rollercoaster_since(since, 5).await.unwrap();
    assert_eq!(trending[0].rollercoaster_id, "rc-taron");
    assert_eq!(trending[0].review_count, 2);

    let averages = reviews.average_by_rollercoaster(Some(5)).await.unwrap();
    assert_eq!(averages[0].rollercoaster_id, "rc-taron");
    assert!((averages[0].average_rating - 8.0).abs() < f64::EPSILON);

    let average = reviews.average_for_rollercoaster("rc-kingda-ka").await.unwrap();
    assert!(average.is_none());

    let totals = reviews.total_likes_by_user(5).await.unwrap();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].user_id, "u1");
    assert_eq!(totals[0].total_likes, 1);

    let liked = likes.count_by_review_since(since, 5).await.unwrap();
    assert_eq!(liked[0].review_id, "r1");

    db.drop_database().await.unwrap();
}

#[test]
fn test_config_from_env() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(!config.database.is_empty());
}

#[test]
fn test_postgres_url_format() {
    let config = TestDbConfig::default();
    let url = config.postgres_url();
    assert!(url.starts_with("postgres://"));
    assert!(url.ends_with("/postgres"));
}
