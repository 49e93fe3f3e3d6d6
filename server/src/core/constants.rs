// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "Planets";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "planets";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".planets";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "planets.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "PLANETS_CONFIG";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "PLANETS_DEBUG";

/// Environment variable for server host
pub const ENV_HOST: &str = "PLANETS_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "PLANETS_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "PLANETS_LOG";

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "PLANETS_DATA_DIR";

/// Environment variable to override the database file location
pub const ENV_DB_PATH: &str = "PLANETS_DB_PATH";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8080;

/// Request body limit for JSON endpoints
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Mount point of the versioned API
pub const API_PREFIX: &str = "/api/v1";

// =============================================================================
// SQLite Database
// =============================================================================

/// SQLite database filename
pub const SQLITE_DB_FILENAME: &str = "planets.db";

/// SQLite connection pool max connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// SQLite cache size (negative = KB, so -16000 = 16MB)
pub const SQLITE_CACHE_SIZE: &str = "-16000";

/// SQLite WAL auto-checkpoint threshold (pages)
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// WAL checkpoint interval in seconds (5 minutes)
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// Shutdown
// =============================================================================

/// Time allowed for background tasks to finish after shutdown is triggered
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;
