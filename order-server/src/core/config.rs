use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

/// Server configuration
///
/// # Environment
///
/// Every setting can be overridden from the environment:
///
/// | Variable | Default | Meaning |
/// |----------|--------|------|
/// | WORK_DIR | ./data | work directory (database, logs) |
/// | DATABASE_FILE | orders.redb | database file name under WORK_DIR |
/// | HTTP_HOST | 0.0.0.0 | bind address |
/// | HTTP_PORT | 8080 | HTTP port |
/// | ENVIRONMENT | development | runtime environment |
/// | LOG_LEVEL | info | default log level (RUST_LOG wins) |
/// | LOG_DIR | - | daily rolling JSON log files when set |
/// | REQUEST_TIMEOUT_MS | 30000 | request timeout in ms |
/// | JWT_SECRET | generated in development | HMAC secret, required in production (≥32 chars) |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
/// | JWT_ISSUER / JWT_AUDIENCE | order-server / order-clients | token claims |
/// | ADMIN_USERNAME / ADMIN_PASSWORD / ADMIN_EMAIL | - | admin account created at startup |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/orders HTTP_PORT=9000 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory
    pub work_dir: String,
    pub database_file: String,
    pub http_host: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Token settings
    pub jwt: JwtConfig,
    /// Admin account ensured at startup
    pub admin: Option<AdminAccount>,
}

/// Bootstrap admin account
#[derive(Clone)]
pub struct AdminAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ServerError::Config(format!("{key} has an invalid value: {raw}"))),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Load from the environment
    ///
    /// Unset values take defaults; malformed values are an error, never a silent fallback.
    pub fn from_env() -> Result<Self> {
        let environment = env_or("ENVIRONMENT", "development");
        let jwt = JwtConfig::from_env(environment == "production")?;

        let admin = match (
            std::env::var("ADMIN_USERNAME"),
            std::env::var("ADMIN_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) => Some(AdminAccount {
                email: env_or("ADMIN_EMAIL", &format!("{username}@localhost")),
                username,
                password,
            }),
            (Ok(_), Err(_)) => {
                return Err(ServerError::Config(
                    "ADMIN_USERNAME is set but ADMIN_PASSWORD is missing".to_string(),
                ));
            }
            _ => None,
        };

        Ok(Self {
            work_dir: env_or("WORK_DIR", "./data"),
            database_file: env_or("DATABASE_FILE", "orders.redb"),
            http_host: env_or("HTTP_HOST", "0.0.0.0"),
            http_port: env_parse("HTTP_PORT", 8080)?,
            environment,
            log_level: env_or("LOG_LEVEL", "info"),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30_000)?,
            jwt,
            admin,
        })
    }

    /// Defaults plus the given token settings
    ///
    /// Mostly used by tests
    pub fn with_jwt(jwt: JwtConfig) -> Self {
        Self {
            work_dir: "./data".to_string(),
            database_file: "orders.redb".to_string(),
            http_host: "127.0.0.1".to_string(),
            http_port: 8080,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            log_dir: None,
            request_timeout_ms: 30_000,
            jwt,
            admin: None,
        }
    }

    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.database_file)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::with_jwt(JwtConfig::with_secret("k".repeat(32)));
        assert_eq!(
            config.database_path(),
            PathBuf::from("./data").join("orders.redb")
        );
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert!(!config.is_production());
    }

    #[test]
    fn test_admin_debug_hides_password() {
        let admin = AdminAccount {
            username: "root".to_string(),
            email: "root@localhost".to_string(),
            password: "hunter2-hunter2".to_string(),
        };
        assert!(!format!("{admin:?}").contains("hunter2"));
    }
}
