use std::env;

use auth::PasswordParams;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordParams,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { http_port: 8080 }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection string; the in-memory store is used when absent
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,
}

fn default_ttl_seconds() -> i64 {
    3600
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

#[derive(Deserialize, Clone)]
pub struct BootstrapConfig {
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: "Admin1".to_string(),
        }
    }
}

impl std::fmt::Debug for BootstrapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapConfig")
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// `jwt.secret` has no default and must be supplied.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Environment::default())
    }

    fn load_with(environment: Environment) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(environment.separator("__").try_parsing(true))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> Result<Config, ConfigError> {
        ConfigBuilder::builder()
            .add_source(File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_defaults_applied() {
        let config = from_toml(
            r#"
            [jwt]
            secret = "test-secret-key-for-jwt-signing-at-least-32-bytes"
            "#,
        )
        .expect("Config should deserialize");

        assert_eq!(config.server.http_port, 8080);
        assert!(config.database.url.is_none());
        assert_eq!(config.jwt.ttl_seconds, 3600);
        assert_eq!(config.password, PasswordParams::default());
        assert_eq!(config.bootstrap.admin_username, "admin");
    }

    #[test]
    fn test_missing_secret_fails() {
        let result = from_toml(
            r#"
            [server]
            http_port = 9000
            "#,
        );

        assert!(result.is_err());
    }

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<std::collections::HashMap<_, _>>();
        Environment::default().source(Some(vars))
    }

    #[test]
    fn test_environment_supplies_secret() {
        let config = Config::load_with(environment(&[
            ("JWT__SECRET", "env-secret-key-for-jwt-signing-at-least-32-bytes"),
            ("JWT__TTL_SECONDS", "900"),
            ("SERVER__HTTP_PORT", "9090"),
        ]))
        .expect("Config should load from environment");

        assert_eq!(
            config.jwt.secret,
            "env-secret-key-for-jwt-signing-at-least-32-bytes"
        );
        assert_eq!(config.jwt.ttl_seconds, 900);
        assert_eq!(config.server.http_port, 9090);
    }

    #[test]
    fn test_environment_without_secret_fails() {
        let result = Config::load_with(environment(&[("SERVER__HTTP_PORT", "9090")]));

        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = from_toml(
            r#"
            [jwt]
            secret = "test-secret-key-for-jwt-signing-at-least-32-bytes"
            "#,
        )
        .unwrap();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("test-secret-key"));
        assert!(!rendered.contains("Admin1"));
    }
}
