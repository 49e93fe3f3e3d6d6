//! PlanetRepository trait implementation for SQLite

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::criteria::{Criteria, CriteriaPage};
use crate::data::error::DataError;
use crate::data::traits::PlanetRepository;
use crate::domain::planet::{Planet, PlanetDraft};

use super::SqliteService;
use super::repositories::planet;

#[async_trait]
impl PlanetRepository for Arc<SqliteService> {
    async fn create_planet(&self, draft: &PlanetDraft) -> Result<Planet, DataError> {
        planet::insert_planet(self.pool(), draft)
            .await
            .map_err(Into::into)
    }

    async fn get_planet(&self, id: i64) -> Result<Option<Planet>, DataError> {
        planet::get_planet(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn update_planet(&self, id: i64, draft: &PlanetDraft) -> Result<bool, DataError> {
        planet::update_planet(self.pool(), id, draft)
            .await
            .map_err(Into::into)
    }

    async fn delete_planet(&self, id: i64) -> Result<bool, DataError> {
        planet::delete_planet(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn list_planets(&self, criteria: &Criteria) -> Result<CriteriaPage<Planet>, DataError> {
        planet::list_planets(self.pool(), criteria)
            .await
            .map_err(Into::into)
    }
}
