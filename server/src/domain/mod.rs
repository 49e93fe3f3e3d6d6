//! Domain logic
//!
//! - `planet` - Planet entity, validation rules and fuel model

pub mod planet;

pub use planet::{Planet, PlanetDraft, PlanetType};
