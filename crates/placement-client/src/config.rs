//! Client configuration loaded from environment variables.
//!
//! Every setting has a default, so the client starts with no configuration.

use std::path::PathBuf;
use std::str::FromStr;

use placement_shared::constants::DEFAULT_MAX_IN_FLIGHT;

/// Which engine backs the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Env: `PLACEMENT_STORE` (`sqlite` or `memory`)
    /// Default: `sqlite`
    pub store: StoreKind,

    /// SQLite database file.
    /// Env: `PLACEMENT_DB_PATH`
    /// Default: `None`, meaning the platform data directory.
    pub db_path: Option<PathBuf>,

    /// Cap on store operations running at once.
    /// Env: `PLACEMENT_MAX_IN_FLIGHT`
    /// Default: `4`
    pub max_in_flight: usize,

    /// Env: `PLACEMENT_WORKER_THREADS`
    /// Default: `2`
    pub worker_threads: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            store: StoreKind::Sqlite,
            db_path: None,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            worker_threads: 2,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`] but reading variables through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("PLACEMENT_STORE") {
            match val.parse() {
                Ok(kind) => config.store = kind,
                Err(e) => tracing::warn!(value = %val, error = %e, "Invalid PLACEMENT_STORE, using default"),
            }
        }

        if let Some(path) = lookup("PLACEMENT_DB_PATH") {
            if !path.trim().is_empty() {
                config.db_path = Some(PathBuf::from(path));
            }
        }

        if let Some(val) = lookup("PLACEMENT_MAX_IN_FLIGHT") {
            match parse_positive(&val) {
                Some(n) => config.max_in_flight = n,
                None => tracing::warn!(value = %val, "Invalid PLACEMENT_MAX_IN_FLIGHT, using default"),
            }
        }

        if let Some(val) = lookup("PLACEMENT_WORKER_THREADS") {
            match parse_positive(&val) {
                Some(n) => config.worker_threads = n,
                None => tracing::warn!(value = %val, "Invalid PLACEMENT_WORKER_THREADS, using default"),
            }
        }

        // RUST_LOG is read by the EnvFilter in init_tracing.

        config
    }
}

fn parse_positive(val: &str) -> Option<usize> {
    val.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_map(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = from_map(&[]);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.max_in_flight, 4);
        assert_eq!(config.store, StoreKind::Sqlite);
    }

    #[test]
    fn test_reads_every_variable() {
        let config = from_map(&[
            ("PLACEMENT_STORE", "Memory"),
            ("PLACEMENT_DB_PATH", "/tmp/placement.db"),
            ("PLACEMENT_MAX_IN_FLIGHT", "8"),
            ("PLACEMENT_WORKER_THREADS", "3"),
        ]);
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/placement.db")));
        assert_eq!(config.max_in_flight, 8);
        assert_eq!(config.worker_threads, 3);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = from_map(&[
            ("PLACEMENT_STORE", "postgres"),
            ("PLACEMENT_MAX_IN_FLIGHT", "0"),
            ("PLACEMENT_WORKER_THREADS", "many"),
        ]);
        assert_eq!(config, ClientConfig::default());
    }
}
