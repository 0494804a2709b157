//! Configuration module
//!
//! Environment-driven configuration for the API and services, covering the
//! server, database, asset storage, and upload limits. Values are read once
//! at startup via [`Config::from_env`] and validated before anything binds
//! a port or opens a pool.

use std::env;

use crate::storage_types::StorageBackend;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_UPLOAD_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    // Database
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Asset storage
    pub storage_backend: StorageBackend,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Upload limits
    pub upload_max_file_size_bytes: usize,
    pub upload_allowed_extensions: Vec<String>,
    pub upload_allowed_content_types: Vec<String>,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_list(key: &str, default: &str) -> Vec<String> {
    env_or(key, default)
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    /// Load configuration from the environment (and a `.env` file if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let storage_backend_name = env_or("STORAGE_BACKEND", "local");
        let storage_backend = StorageBackend::parse(&storage_backend_name).ok_or_else(|| {
            anyhow::anyhow!("Unknown STORAGE_BACKEND '{}'", storage_backend_name)
        })?;

        Ok(Config {
            environment: env_or("ENVIRONMENT", "development"),
            server_port: env_parsed("SERVER_PORT", DEFAULT_SERVER_PORT),
            cors_origins: env_list("CORS_ORIGINS", "*"),
            database_url,
            db_max_connections: env_parsed("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            db_timeout_seconds: env_parsed("DB_TIMEOUT_SECONDS", DEFAULT_CONNECTION_TIMEOUT_SECS),
            storage_backend,
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            upload_max_file_size_bytes: env_parsed(
                "UPLOAD_MAX_FILE_SIZE_BYTES",
                DEFAULT_UPLOAD_MAX_BYTES,
            ),
            upload_allowed_extensions: env_list("UPLOAD_ALLOWED_EXTENSIONS", "jpg,jpeg,png,gif"),
            upload_allowed_content_types: env_list(
                "UPLOAD_ALLOWED_CONTENT_TYPES",
                "image/jpeg,image/png,image/gif",
            ),
        })
    }

    /// Fail fast on configurations that cannot serve requests.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.upload_max_file_size_bytes == 0 {
            anyhow::bail!("UPLOAD_MAX_FILE_SIZE_BYTES must be at least 1");
        }
        if self.storage_backend == StorageBackend::Local {
            if self.local_storage_path.is_none() {
                anyhow::bail!("LOCAL_STORAGE_PATH must be set for the local storage backend");
            }
            if self.local_storage_base_url.is_none() {
                anyhow::bail!("LOCAL_STORAGE_BASE_URL must be set for the local storage backend");
            }
        }
        Ok(())
    }

    /// Check if the application is running in production mode.
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            environment: "development".to_string(),
            server_port: 3000,
            cors_origins: vec!["*".to_string()],
            database_url: "postgres://localhost/tienda".to_string(),
            db_max_connections: 20,
            db_timeout_seconds: 30,
            storage_backend: StorageBackend::Local,
            local_storage_path: Some("/tmp/tienda".to_string()),
            local_storage_base_url: Some("http://localhost:3000/assets".to_string()),
            upload_max_file_size_bytes: DEFAULT_UPLOAD_MAX_BYTES,
            upload_allowed_extensions: vec!["jpg".to_string()],
            upload_allowed_content_types: vec!["image/jpeg".to_string()],
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_local_backend_requires_path_and_url() {
        let mut config = base_config();
        config.local_storage_path = None;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.local_storage_base_url = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let mut config = base_config();
        config.db_max_connections = 0;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.upload_max_file_size_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_production() {
        let mut config = base_config();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
        config.environment = "prod".to_string();
        assert!(config.is_production());
    }
}
