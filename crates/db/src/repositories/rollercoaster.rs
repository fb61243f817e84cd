//! Rollercoaster repository.

use std::sync::Arc;

use crate::entities::{Rollercoaster, rollercoaster};
use coaster_common::{AppError, AppResult};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

/// Rollercoaster repository for database operations.
#[derive(Clone)]
pub struct RollercoasterRepository {
    db: Arc<DatabaseConnection>,
}

impl RollercoasterRepository {
    /// Create a new rollercoaster repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a rollercoaster by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<rollercoaster::Model>> {
        Rollercoaster::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a rollercoaster by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<rollercoaster::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::RollercoasterNotFound(id.to_string()))
    }

    /// Find a rollercoaster by its exact name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<rollercoaster::Model>> {
        Rollercoaster::find()
            .filter(rollercoaster::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find rollercoasters by IDs.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<rollercoaster::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        Rollercoaster::find()
            .filter(rollercoaster::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get every rollercoaster, ordered by name.
    pub async fn find_all(&self) -> AppResult<Vec<rollercoaster::Model>> {
        Rollercoaster::find()
            .order_by_asc(rollercoaster::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
