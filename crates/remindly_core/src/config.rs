//! Runtime configuration for hosts embedding the core.
//!
//! Resolution order per setting: explicit value, then environment variable,
//! then built-in default. Blank values are treated as unset.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "REMINDLY_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "REMINDLY_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "REMINDLY_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "remindly.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file backing the key-value provider.
    pub db_path: PathBuf,
    pub log_level: String,
    /// `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

/// Explicit settings supplied by the host (CLI flags, FFI arguments).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub db_path: Option<String>,
    pub log_level: Option<String>,
    pub log_dir: Option<String>,
}

impl CoreConfig {
    /// Resolves configuration from overrides and process environment.
    pub fn resolve(overrides: &ConfigOverrides) -> Self {
        Self::resolve_with(overrides, |name| std::env::var(name).ok())
    }

    pub fn from_env() -> Self {
        Self::resolve(&ConfigOverrides::default())
    }

    /// Resolves configuration with an injectable environment lookup.
    pub fn resolve_with(
        overrides: &ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let pick = |explicit: &Option<String>, env_name: &str| {
            non_blank(explicit.clone()).or_else(|| non_blank(lookup(env_name)))
        };

        let db_path = pick(&overrides.db_path, DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_level = pick(&overrides.log_level, LOG_LEVEL_ENV)
            .unwrap_or_else(|| default_log_level().to_string());
        let log_dir = pick(&overrides.log_dir, LOG_DIR_ENV).map(PathBuf::from);

        Self {
            db_path,
            log_level,
            log_dir,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}
