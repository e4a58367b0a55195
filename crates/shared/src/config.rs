//! Application configuration management.

use serde::Deserialize;

use crate::auth::TokenKind;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Apply pending migrations on server startup.
    #[serde(default)]
    pub run_migrations: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
    /// Refresh token expiration in seconds.
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry_secs: u64,
    /// Whether presented tokens are checked against the blocklist.
    #[serde(default = "default_revocation_enabled")]
    pub revocation_enabled: bool,
    /// Comma-separated token kinds subject to the blocklist check.
    #[serde(default = "default_revocation_checks")]
    pub revocation_checks: String,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> u64 {
    604_800 // 7 days
}

fn default_revocation_enabled() -> bool {
    true
}

fn default_revocation_checks() -> String {
    "access,refresh".to_string()
}

impl JwtConfig {
    /// Returns the token kinds that must be checked against the blocklist.
    ///
    /// Unknown entries are ignored. Returns an empty list when revocation
    /// checking is disabled.
    #[must_use]
    pub fn checked_kinds(&self) -> Vec<TokenKind> {
        if !self.revocation_enabled {
            return Vec::new();
        }
        self.revocation_checks
            .split(',')
            .filter_map(|kind| kind.trim().parse().ok())
            .collect()
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BANKLINE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(enabled: bool, checks: &str) -> JwtConfig {
        JwtConfig {
            secret: "secret".to_string(),
            access_token_expiry_secs: default_access_token_expiry(),
            refresh_token_expiry_secs: default_refresh_token_expiry(),
            revocation_enabled: enabled,
            revocation_checks: checks.to_string(),
        }
    }

    #[test]
    fn test_checked_kinds_default() {
        let kinds = jwt(true, &default_revocation_checks()).checked_kinds();
        assert_eq!(kinds, vec![TokenKind::Access, TokenKind::Refresh]);
    }

    #[test]
    fn test_checked_kinds_ignores_unknown_entries() {
        let kinds = jwt(true, " refresh , bogus").checked_kinds();
        assert_eq!(kinds, vec![TokenKind::Refresh]);
    }

    #[test]
    fn test_checked_kinds_disabled() {
        assert!(jwt(false, "access,refresh").checked_kinds().is_empty());
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("BANKLINE__DATABASE__URL", Some("sqlite::memory:")),
                ("BANKLINE__JWT__SECRET", Some("env-secret")),
                ("BANKLINE__JWT__REVOCATION_ENABLED", Some("false")),
                ("BANKLINE__SERVER__PORT", Some("9090")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "sqlite::memory:");
                assert_eq!(config.database.max_connections, 10);
                assert!(!config.database.run_migrations);
                assert_eq!(config.jwt.secret, "env-secret");
                assert_eq!(config.jwt.access_token_expiry_secs, 900);
                assert!(!config.jwt.revocation_enabled);
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.server.host, "0.0.0.0");
            },
        );
    }

    #[test]
    fn test_load_requires_jwt_secret() {
        temp_env::with_vars(
            [
                ("BANKLINE__DATABASE__URL", Some("sqlite::memory:")),
                ("BANKLINE__JWT__SECRET", None::<&str>),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}
