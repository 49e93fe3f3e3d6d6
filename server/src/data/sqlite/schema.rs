//! SQLite schema definitions
//!
//! `SCHEMA` always describes the latest version. Older databases are
//! brought forward by the incremental migrations in `migrations.rs`.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 2;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- Planets
-- =============================================================================
CREATE TABLE IF NOT EXISTS planets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK(length(name) >= 1),
    description TEXT NOT NULL CHECK(length(description) >= 1),
    distance INTEGER NOT NULL CHECK(distance > 10 AND distance < 1000),
    radius REAL NOT NULL CHECK(radius > 0.1 AND radius < 10),
    mass REAL NOT NULL CHECK(mass > 0.1 AND mass < 10),
    type TEXT NOT NULL CHECK(type IN ('gas_giant', 'terrestrial'))
);

CREATE INDEX IF NOT EXISTS idx_planets_type ON planets(type);
CREATE INDEX IF NOT EXISTS idx_planets_name ON planets(name);
"#;

/// v2: indexes for the commonly filtered columns
pub const MIGRATION_V2: &str = r#"
CREATE INDEX IF NOT EXISTS idx_planets_type ON planets(type);
CREATE INDEX IF NOT EXISTS idx_planets_name ON planets(name);
"#;
