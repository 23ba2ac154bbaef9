use std::{env, fmt::Display, fs::read_to_string, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

pub const SECRETS_DIR: &str = "/run/secrets";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value: {reason}")]
    Invalid { key: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_url: String,
    pub admin_token: Option<String>,
    pub featured_limit: usize,
    pub regular_limit: usize,
    pub seed_fixtures: bool,
    pub cors_max_age: Duration,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            port: try_load("RUST_PORT", "8080")?,
            store_url: try_load("STORE_URL", "memory")?,
            admin_token: read_secret("ADMIN_TOKEN"),
            featured_limit: try_load("FEATURED_LIMIT", "3")?,
            regular_limit: try_load("REGULAR_LIMIT", "6")?,
            seed_fixtures: try_load("SEED_FIXTURES", "false")?,
            cors_max_age: Duration::from_secs(try_load("CORS_MAX_AGE_SECS", "3600")?),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            store_url: "memory".to_string(),
            admin_token: None,
            featured_limit: 3,
            regular_limit: 6,
            seed_fixtures: false,
            cors_max_age: Duration::from_secs(60 * 60),
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    parse(key, var(key), default)
}

fn parse<T: FromStr>(key: &str, value: Option<String>, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    value
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .trim()
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })
}

// secret file wins over the environment
fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("{SECRETS_DIR}/{secret_name}");

    let secret = read_to_string(&path)
        .map(|s| s.trim().to_string())
        .or_else(|e| {
            info!("Secret {secret_name} not readable from file ({e}), trying environment");
            env::var(secret_name)
        })
        .ok()
        .filter(|s| !s.is_empty());

    if secret.is_none() {
        warn!("{secret_name} not configured");
    }

    secret
}
