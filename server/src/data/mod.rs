//! Data storage layer
//!
//! - `criteria` - Query criteria parsing and composition
//! - `sqlite` - Embedded database, schema, migrations and repositories
//! - `traits` - Repository traits used by the API
//! - `error` - Unified error type for repository operations

pub mod criteria;
pub mod error;
pub mod sqlite;
pub mod traits;

pub use error::DataError;
pub use sqlite::SqliteService;
pub use traits::PlanetRepository;
