use serde::{Deserialize, Serialize};
use validator::Validate;

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub server: ServerConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// `tracing_subscriber::EnvFilter` directive (default: "info")
    #[validate(length(min = 1))]
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            analysis: AnalysisConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    /// HTTP worker threads
    #[validate(range(min = 1))]
    pub workers: usize,
    /// Largest accepted upload body (default: 10 MiB)
    #[validate(range(min = 1))]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            workers: 4,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Options for the chi-square computation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Apply Yates' continuity correction when the table has one degree of freedom
    pub yates_correction: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            yates_correction: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_host_rejected() {
        let mut config = AppConfig::default();
        config.server.host = String::new();
        assert!(config.validate().is_err());
    }
}
