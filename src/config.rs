//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/mottu-api/config.toml`).
//! Every section and key is optional; missing values take the defaults
//! below. `DATABASE_URL` and `JWT_SECRET` override the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::application::services::ListingConfig;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::{DatabaseConfig, DEFAULT_DATABASE_URL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds granted to in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySection {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    /// Require a bearer token on the moto and maintenance routes
    pub protect_resources: bool,
    pub bcrypt_cost: u32,
}

impl Default for SecuritySection {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            jwt_secret: jwt.secret,
            jwt_expiration_hours: jwt.expiration_hours,
            jwt_issuer: jwt.issuer,
            jwt_audience: jwt.audience,
            protect_resources: false,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl std::fmt::Debug for SecuritySection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecuritySection")
            .field("jwt_secret", &"***")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("protect_resources", &self.protect_resources)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default filter directive; `RUST_LOG` wins when set
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSection {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for ListingSection {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedSection {
    /// Insert demo data into empty tables on startup
    pub enabled: bool,
    pub demo_name: String,
    pub demo_email: String,
    pub demo_password: String,
}

impl Default for SeedSection {
    fn default() -> Self {
        Self {
            enabled: true,
            demo_name: "Demo".to_string(),
            demo_email: "demo@mottu.com".to_string(),
            demo_password: "123456".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub security: SecuritySection,
    pub logging: LoggingSection,
    pub listing: ListingSection,
    pub seed: SeedSection,
}

/// `<config dir>/mottu-api/config.toml`, falling back to the working directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mottu-api")
        .join("config.toml")
}

impl AppConfig {
    /// Load from `path`, writing a default file first when none exists.
    /// Environment overrides are applied and the result is validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(&raw)?
        } else {
            let config = Self::default();
            config.save(path)?;
            info!("Created default configuration at {}", path.display());
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw).map_err(io_err)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            self.database.url = url;
        }
        if let Some(secret) = var("JWT_SECRET").filter(|v| !v.trim().is_empty()) {
            self.security.jwt_secret = secret;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.security.jwt_secret.trim().is_empty() {
            return invalid("security.jwt_secret must not be empty");
        }
        if self.security.jwt_expiration_hours <= 0 {
            return invalid("security.jwt_expiration_hours must be positive");
        }
        if !(4..=31).contains(&self.security.bcrypt_cost) {
            return invalid("security.bcrypt_cost must be between 4 and 31");
        }
        if self.listing.default_page_size == 0 || self.listing.max_page_size == 0 {
            return invalid("listing page sizes must be positive");
        }
        if self.listing.default_page_size > self.listing.max_page_size {
            return invalid("listing.default_page_size must not exceed listing.max_page_size");
        }
        if !matches!(self.logging.format.to_lowercase().as_str(), "text" | "json") {
            return invalid("logging.format must be 'text' or 'json'");
        }
        Ok(())
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.server.api_host, self.server.api_port)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
        }
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.security.jwt_secret.clone(),
            expiration_hours: self.security.jwt_expiration_hours,
            issuer: self.security.jwt_issuer.clone(),
            audience: self.security.jwt_audience.clone(),
        }
    }

    pub fn listing_config(&self, base_path: impl Into<String>) -> ListingConfig {
        ListingConfig {
            base_path: base_path.into(),
            default_page_size: self.listing.default_page_size,
            max_page_size: self.listing.max_page_size,
        }
    }
}
