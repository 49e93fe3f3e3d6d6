//! SQLite repositories

pub mod planet;

pub use planet::{
    PlanetQuery, base_plan, delete_planet, get_planet, insert_planet, list_planets, update_planet,
};
