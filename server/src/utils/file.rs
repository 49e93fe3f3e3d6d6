//! Path helpers

use std::path::PathBuf;

/// Resolve a user-supplied path to an absolute one.
///
/// `~` and `~/...` expand to the home directory. Relative paths (including
/// bare names) are joined onto the current directory. Absolute paths pass
/// through unchanged.
///
/// ```text
/// expand_path("~/.planets")    // -> /home/user/.planets
/// expand_path("./data")        // -> /current/dir/./data
/// expand_path("planets.db")    // -> /current/dir/planets.db
/// expand_path("/var/lib/db")   // -> /var/lib/db
/// ```
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = match path.strip_prefix('~') {
        Some("") => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        Some(rest) if rest.starts_with('/') || rest.starts_with('\\') => dirs::home_dir()
            .map(|home| home.join(&rest[1..]))
            .unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_unchanged() {
        assert_eq!(expand_path("/var/lib/planets"), PathBuf::from("/var/lib/planets"));
    }

    #[test]
    fn test_bare_name_joins_cwd() {
        let result = expand_path("planets.db");
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(result, cwd.join("planets.db"));
    }

    #[test]
    fn test_parent_relative() {
        let result = expand_path("../config");
        assert!(result.is_absolute());
        assert!(result.ends_with("config"));
    }

    #[test]
    fn test_tilde_expands_home() {
        let result = expand_path("~/.planets");
        assert!(!result.to_string_lossy().contains('~'));
        assert!(result.ends_with(".planets"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
        }
    }

    #[test]
    fn test_tilde_user_form_is_relative_name() {
        // Only the current user's home is expanded
        let result = expand_path("~other/data");
        assert!(result.is_absolute());
        assert!(result.to_string_lossy().contains("~other"));
    }

    #[test]
    fn test_trims_and_handles_empty() {
        assert_eq!(expand_path("  /srv/db  "), PathBuf::from("/srv/db"));
        assert!(expand_path("   ").is_absolute());
    }
}
