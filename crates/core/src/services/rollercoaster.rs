//! Rollercoaster service.

use std::collections::HashMap;

use crate::round_score;
use coaster_common::AppResult;
use coaster_db::{entities::rollercoaster, repositories::{ReviewRepository, RollercoasterRepository}};
use serde::Serialize;

/// A rollercoaster with the average rating of its reviews.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollercoasterWithScore {
    pub rollercoaster: rollercoaster::Model,
    /// `None` until the coaster has been reviewed.
    pub average_score: Option<f64>,
}

/// Rollercoaster service for business logic.
#[derive(Clone)]
pub struct RollercoasterService {
    rollercoaster_repo: RollercoasterRepository,
    review_repo: ReviewRepository,
}

impl RollercoasterService {
    /// Create a new rollercoaster service.
    #[must_use]
    pub const fn new(
        rollercoaster_repo: RollercoasterRepository,
        review_repo: ReviewRepository,
    ) -> Self {
        Self {
            rollercoaster_repo,
            review_repo,
        }
    }

    /// Get a rollercoaster together with its average score.
    pub async fn get_with_score(&self, id: &str) -> AppResult<RollercoasterWithScore> {
        let rollercoaster = self.rollercoaster_repo.get_by_id(id).await?;
        let average_score = self.average_score(id).await?;

        Ok(RollercoasterWithScore {
            rollercoaster,
            average_score,
        })
    }

    /// List every rollercoaster, ordered by name.
    pub async fn list(&self) -> AppResult<Vec<rollercoaster::Model>> {
        self.rollercoaster_repo.find_all().await
    }

    /// List every rollercoaster with its average score.
    pub async fn list_with_scores(&self) -> AppResult<Vec<RollercoasterWithScore>> {
        let rollercoasters = self.rollercoaster_repo.find_all().await?;
        let averages: HashMap<String, f64> = self
            .review_repo
            .average_by_rollercoaster(None)
            .await?
            .into_iter()
            .map(|a| (a.rollercoaster_id, a.average_rating))
            .collect();

        Ok(rollercoasters
            .into_iter()
            .map(|rollercoaster| {
                let average_score = averages.get(&rollercoaster.id).copied().map(round_score);
                RollercoasterWithScore {
                    rollercoaster,
                    average_score,
                }
            })
            .collect())
    }

    /// Mean rating of a rollercoaster, rounded to two decimals.
    pub async fn average_score(&self, id: &str) -> AppResult<Option<f64>> {
        Ok(self
            .review_repo
            .average_for_rollercoaster(id)
            .await?
            .map(round_score))
    }
}
