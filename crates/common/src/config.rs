//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Session cookie configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Index page ranking configuration.
    #[serde(default)]
    pub rankings: RankingsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL of this instance.
    pub url: String,
    /// Directory served under `/assets`.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Session cookie configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie holding the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Only send the cookie over HTTPS.
    #[serde(default)]
    pub secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            secure: false,
        }
    }
}

/// Rankings shown on the index page.
#[derive(Debug, Clone, Deserialize)]
pub struct RankingsConfig {
    /// Length of the trending window in hours.
    #[serde(default = "default_window_hours")]
    pub window_hours: i64,
    /// Number of entries in the trending lists.
    #[serde(default = "default_limit")]
    pub trending_limit: u64,
    /// Number of entries in the all-time lists.
    #[serde(default = "default_limit")]
    pub top_limit: u64,
}

impl Default for RankingsConfig {
    fn default() -> Self {
        Self {
            window_hours: default_window_hours(),
            trending_limit: default_limit(),
            top_limit: default_limit(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

const fn default_max_connections() -> u32 {
    100
}

const fn default_min_connections() -> u32 {
    5
}

fn default_cookie_name() -> String {
    "coaster_session".to_string()
}

const fn default_window_hours() -> i64 {
    36
}

const fn default_limit() -> u64 {
    5
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present, into the process environment)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `COASTER_ENV`)
    /// 4. Environment variables with `COASTER__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("COASTER_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("COASTER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("COASTER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_fill_optional_sections() {
        let config = from_toml(
            r#"
            [server]
            url = "http://localhost:3000"

            [database]
            url = "postgres://localhost/coaster"
            "#,
        );

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.assets_dir, "assets");
        assert_eq!(config.database.max_connections, 100);
        assert_eq!(config.session.cookie_name, "coaster_session");
        assert!(!config.session.secure);
        assert_eq!(config.rankings.window_hours, 36);
        assert_eq!(config.rankings.trending_limit, 5);
        assert_eq!(config.rankings.top_limit, 5);
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let config = from_toml(
            r#"
            [server]
            url = "https://coasters.example"
            port = 8080

            [database]
            url = "postgres://db/coaster"

            [session]
            secure = true

            [rankings]
            window_hours = 12
            top_limit = 10
            "#,
        );

        assert_eq!(config.server.port, 8080);
        assert!(config.session.secure);
        assert_eq!(config.rankings.window_hours, 12);
        assert_eq!(config.rankings.trending_limit, 5);
        assert_eq!(config.rankings.top_limit, 10);
    }
}
