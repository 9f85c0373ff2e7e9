use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_QUICK_DETAILS_DISMISS_MS: u64 = 1_000;

/// Distinguishes runtime behavior for different stages of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for a MovieLand session.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub catalog: CatalogConfig,
    pub session: SessionConfig,
    pub telemetry: TelemetryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: AppEnvironment::Development,
            catalog: CatalogConfig::default(),
            session: SessionConfig::default(),
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("MOVIELAND_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let path = env::var("MOVIELAND_CATALOG_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let seed = match env::var("MOVIELAND_SEED") {
            Ok(value) => Some(
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed { value })?,
            ),
            Err(_) => None,
        };

        let dismiss_ms = match env::var("MOVIELAND_QUICK_DETAILS_DISMISS_MS") {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidDismissDelay { value })?,
            Err(_) => DEFAULT_QUICK_DETAILS_DISMISS_MS,
        };

        let log_level = env::var("MOVIELAND_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            catalog: CatalogConfig { path, seed },
            session: SessionConfig {
                quick_details_dismiss: Duration::from_millis(dismiss_ms),
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where movies come from and how their jitter is seeded.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    /// Dataset override; the bundled dataset is used when unset.
    pub path: Option<PathBuf>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long the quick details popup lingers after a rating.
    pub quick_details_dismiss: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            quick_details_dismiss: Duration::from_millis(DEFAULT_QUICK_DETAILS_DISMISS_MS),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSeed { value: String },
    InvalidDismissDelay { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSeed { value } => {
                write!(f, "MOVIELAND_SEED must be a valid u64, got '{value}'")
            }
            ConfigError::InvalidDismissDelay { value } => write!(
                f,
                "MOVIELAND_QUICK_DETAILS_DISMISS_MS must be a whole number of milliseconds, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
