use std::collections::HashMap;
use std::net::IpAddr;
use thiserror::Error;

pub const DEFAULT_IMAGE_BASE_URL: &str = "/posters";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: String,
    /// Prefix for seed poster filenames.
    pub image_base_url: String,
    /// Bearer token for the admin API. The admin API is disabled when unset.
    pub admin_token: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let host = env_map
            .get("HOST")
            .map(|s| s.as_str())
            .unwrap_or("127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|_| {
                ConfigError::InvalidValue("HOST".to_string(), "must be an IP address".to_string())
            })?;

        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8000")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let image_base_url = env_map
            .get("IMAGE_BASE_URL")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string());
        if image_base_url.is_empty() {
            return Err(ConfigError::InvalidValue(
                "IMAGE_BASE_URL".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let admin_token = match env_map.get("ADMIN_TOKEN") {
            Some(token) if token.trim().is_empty() => {
                return Err(ConfigError::InvalidValue(
                    "ADMIN_TOKEN".to_string(),
                    "must not be empty when set".to_string(),
                ))
            }
            Some(token) => Some(token.trim().to_string()),
            None => None,
        };

        Ok(Config {
            host,
            port,
            database_path,
            image_base_url,
            admin_token,
        })
    }
}
