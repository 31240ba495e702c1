use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub server: ServerConfig,
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Remote API the actions talk to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// `None` leaves timeouts to the HTTP client defaults; only
    /// `API_REQUEST_TIMEOUT_SECS` sets one
    pub request_timeout_secs: Option<u64>,
    /// Off in every preset; `API_ACCEPT_INVALID_CERTS=true` allows a local
    /// backend with a self-signed certificate
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub enable_cors: bool,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject unparsable room/attendee ids instead of sending `null`
    pub strict_attendee_ids: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("API_BASE_URL") {
            if !v.trim().is_empty() {
                self.api.base_url = v.trim().to_string();
            }
        }
        if let Ok(v) = env::var("API_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().ok().filter(|secs| *secs > 0);
        }
        if let Ok(v) = env::var("API_ACCEPT_INVALID_CERTS") {
            self.api.accept_invalid_certs = v.parse().unwrap_or(self.api.accept_invalid_certs);
        }

        // Server overrides
        if let Ok(v) = env::var("SERVER_PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("SERVER_ENABLE_CORS") {
            self.server.enable_cors = v.parse().unwrap_or(self.server.enable_cors);
        }
        if let Ok(v) = env::var("SERVER_ENABLE_REQUEST_LOGGING") {
            self.server.enable_request_logging = v.parse().unwrap_or(self.server.enable_request_logging);
        }

        // Validation overrides
        if let Ok(v) = env::var("VALIDATION_STRICT_ATTENDEE_IDS") {
            self.validation.strict_attendee_ids = v.parse().unwrap_or(self.validation.strict_attendee_ids);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "https://localhost:7001".to_string(),
                request_timeout_secs: None,
                accept_invalid_certs: false,
            },
            server: ServerConfig {
                port: 3000,
                enable_cors: true,
                enable_request_logging: true,
            },
            validation: ValidationConfig::default(),
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://api.staging.example.com".to_string(),
                request_timeout_secs: None,
                accept_invalid_certs: false,
            },
            server: ServerConfig {
                port: 3000,
                enable_cors: true,
                enable_request_logging: true,
            },
            validation: ValidationConfig::default(),
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://api.example.com".to_string(),
                request_timeout_secs: None,
                accept_invalid_certs: false,
            },
            server: ServerConfig {
                port: 8080,
                enable_cors: false,
                enable_request_logging: false,
            },
            validation: ValidationConfig::default(),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(config.server.enable_cors);
        assert!(!config.validation.strict_attendee_ids);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.server.port, 8080);
        assert!(!config.server.enable_cors);
    }

    #[test]
    fn test_presets_leave_timeouts_to_client() {
        for config in [AppConfig::development(), AppConfig::staging(), AppConfig::production()] {
            assert_eq!(config.api.request_timeout_secs, None, "{:?}", config.environment);
        }
    }

    #[test]
    fn test_presets_verify_certificates() {
        for config in [AppConfig::development(), AppConfig::staging(), AppConfig::production()] {
            assert!(!config.api.accept_invalid_certs, "{:?}", config.environment);
        }
    }
}
