//! Repository traits for database backends
//!
//! Route handlers talk to storage through these traits, so a backend
//! only has to implement them to be usable by the API.

use async_trait::async_trait;

use crate::data::criteria::{Criteria, CriteriaPage};
use crate::data::error::DataError;
use crate::domain::planet::{Planet, PlanetDraft};

// ============================================================================
// Planet Repository Trait
// ============================================================================

/// Repository trait for planet CRUD and criteria listing
#[async_trait]
pub trait PlanetRepository: Send + Sync {
    /// Insert a planet and return it with its assigned ID
    async fn create_planet(&self, draft: &PlanetDraft) -> Result<Planet, DataError>;

    /// Get a single planet by ID
    async fn get_planet(&self, id: i64) -> Result<Option<Planet>, DataError>;

    /// Replace a planet's fields. Returns false if the planet does not exist.
    async fn update_planet(&self, id: i64, draft: &PlanetDraft) -> Result<bool, DataError>;

    /// Delete a planet. Returns false if the planet does not exist.
    async fn delete_planet(&self, id: i64) -> Result<bool, DataError>;

    /// List planets matching parsed criteria
    async fn list_planets(&self, criteria: &Criteria) -> Result<CriteriaPage<Planet>, DataError>;
}
