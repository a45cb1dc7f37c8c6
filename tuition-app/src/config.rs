//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use tuition_hex::outbound::registration::{DEFAULT_STUDENT_INFO_PATH, DEFAULT_TIMEOUT};

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub registration: RegistrationConfig,
    pub otel_enabled: bool,
}

/// Where and how to reach the Registration service.
pub struct RegistrationConfig {
    pub base_url: String,
    pub student_info_path: String,
    pub timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let base_url = env::var("REGISTRATION_BASE_URL").map_err(|_| {
            anyhow::anyhow!("REGISTRATION_BASE_URL environment variable is required")
        })?;

        let student_info_path = env::var("REGISTRATION_STUDENT_INFO_PATH")
            .unwrap_or_else(|_| DEFAULT_STUDENT_INFO_PATH.to_string());

        let timeout = match env::var("REGISTRATION_TIMEOUT_SECS") {
            Ok(secs) => Duration::from_secs(secs.parse().map_err(|e| {
                anyhow::anyhow!("REGISTRATION_TIMEOUT_SECS must be a whole number: {}", e)
            })?),
            Err(_) => DEFAULT_TIMEOUT,
        };

        let otel_enabled = env::var("OTEL_ENABLED")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            port,
            database_url,
            registration: RegistrationConfig {
                base_url,
                student_info_path,
                timeout,
            },
            otel_enabled,
        })
    }
}
