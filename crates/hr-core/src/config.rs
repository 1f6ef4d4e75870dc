//! Configuration loading from environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Secret used to verify tokens issued by the external auth provider.
    pub jwt_secret: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgres://localhost/hr_backend".into(),
                max_connections: 10,
                connect_timeout_secs: 30,
            },
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
            },
            auth: AuthConfig {
                jwt_secret: "insecure-dev-secret".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults per field.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database: DatabaseConfig {
                url: env_or("DATABASE_URL", defaults.database.url),
                max_connections: env_parsed("DB_MAX_CONNECTIONS", defaults.database.max_connections),
                connect_timeout_secs: env_parsed(
                    "DB_CONNECT_TIMEOUT",
                    defaults.database.connect_timeout_secs,
                ),
            },
            server: ServerConfig {
                host: env_or("SERVER_HOST", defaults.server.host),
                port: env_parsed("SERVER_PORT", defaults.server.port),
            },
            auth: AuthConfig {
                jwt_secret: env_or("JWT_SECRET", defaults.auth.jwt_secret),
            },
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_addr() {
        let config = AppConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
    }
}
