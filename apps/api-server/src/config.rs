//! Application configuration loaded from environment variables.

use std::env;

use postboard_infra::database::DatabaseConfig;

use crate::telemetry::TelemetryConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .map(|url| {
                let defaults = DatabaseConfig::new(url);
                DatabaseConfig {
                    max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections),
                    min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", defaults.min_connections),
                    create_schema: lookup("DB_CREATE_SCHEMA")
                        .map(|v| parse_flag(&v))
                        .unwrap_or(defaults.create_schema),
                    ..defaults
                }
            });

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080),
            database,
            telemetry: TelemetryConfig::from_lookup(&lookup),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// `1`, `true`, `yes` and `on` (any case) are true.
pub(crate) fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.database.is_none());
        assert!(!config.telemetry.json_logs);
    }

    #[test]
    fn database_settings_are_parsed() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite://posts.db?mode=rwc"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_CREATE_SCHEMA", "TRUE"),
            ("PORT", "not-a-port"),
        ]);

        let db = config.database.unwrap();
        assert_eq!(db.url, "sqlite://posts.db?mode=rwc");
        assert_eq!(db.max_connections, 4);
        assert_eq!(db.min_connections, 1);
        assert!(db.create_schema);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn empty_database_url_means_in_memory() {
        let config = config_from(&[("DATABASE_URL", "")]);
        assert!(config.database.is_none());
    }
}
