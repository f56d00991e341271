use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use validator::Validate;

use crate::domain::config::AppConfig;
use crate::domain::error::{AppError, Result};

/// Overrides the config file location
pub const CONFIG_PATH_ENV: &str = "CHISQ_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "chisquare.toml";
/// `CHISQ_SERVER__PORT=9000` sets `server.port`
pub const ENV_PREFIX: &str = "CHISQ_";

pub struct ConfigService;

impl ConfigService {
    /// Load `.env`, then layer defaults, the TOML file and `CHISQ_*` variables
    pub fn load() -> Result<AppConfig> {
        // A missing .env is the normal case outside development.
        let _ = dotenvy::dotenv();
        Self::extract(Self::figment())
    }

    pub fn figment() -> Figment {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn extract(figment: Figment) -> Result<AppConfig> {
        let config: AppConfig = figment
            .extract()
            .map_err(|e| AppError::Config(e.to_string()))?;
        config
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(config)
    }
}
