lazy_static::lazy_static! {
    pub static ref API_URL: String = std::env::var("API_URL").unwrap_or_else(|_| String::from(DEFAULT_API_URL));
}

pub const DEFAULT_API_URL: &str = "localhost:5000";

/// Settings for `--start-server`, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_address: String,
    pub database_url: Option<String>,
    pub workers: usize,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `BIND_ADDRESS` falls back to `API_URL` so client and server agree
    /// by default. `WORKERS` defaults to a single worker.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let bind_address = lookup("BIND_ADDRESS")
            .or_else(|| lookup("API_URL"))
            .unwrap_or_else(|| String::from(DEFAULT_API_URL));

        let workers = lookup("WORKERS")
            .and_then(|w| w.parse::<usize>().ok())
            .filter(|w| *w > 0)
            .unwrap_or(1);

        Self {
            bind_address,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            workers,
        }
    }
}

#[cfg(test)]
mod config_test {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.bind_address, DEFAULT_API_URL);
        assert_eq!(config.database_url, None);
        assert_eq!(config.workers, 1);
    }

    #[test]
    fn test_bind_address_prefers_explicit_value() {
        let config = config_from(&[
            ("API_URL", "localhost:7000"),
            ("BIND_ADDRESS", "0.0.0.0:8080"),
        ]);

        assert_eq!(config.bind_address, "0.0.0.0:8080");

        let config = config_from(&[("API_URL", "localhost:7000")]);

        assert_eq!(config.bind_address, "localhost:7000");
    }

    #[test]
    fn test_invalid_workers_fall_back() {
        assert_eq!(config_from(&[("WORKERS", "zero")]).workers, 1);
        assert_eq!(config_from(&[("WORKERS", "0")]).workers, 1);
        assert_eq!(config_from(&[("WORKERS", "4")]).workers, 4);
    }

    #[test]
    fn test_blank_database_url_is_unset() {
        let config = config_from(&[("DATABASE_URL", "  ")]);

        assert_eq!(config.database_url, None);
    }
}
