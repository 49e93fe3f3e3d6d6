//! Planets catalog server
//!
//! - `core` - CLI, configuration, storage paths, shutdown
//! - `api` - HTTP routes and extractors
//! - `data` - Criteria translation and SQLite persistence
//! - `domain` - Planet entity and business rules
//! - `utils` - Shared helpers

mod app;

pub mod api;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;
