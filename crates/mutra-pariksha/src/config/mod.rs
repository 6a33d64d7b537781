use crate::workflows::pariksha::inference::{CompoundRulePolicy, InferenceConfig};
use std::env;
use std::fmt;
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = ".mutra-pariksha";

/// Stage the tool runs in; decides the default log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Interactive development sessions log more; everything else stays quiet
    /// so prompts and reports are not interleaved with events.
    pub fn default_log_level(self) -> &'static str {
        match self {
            Self::Development => "info",
            Self::Test | Self::Production => "warn",
        }
    }
}

/// Everything read from the environment (and `.env`) at start-up.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub storage: StorageConfig,
    pub telemetry: TelemetryConfig,
    pub inference: InferenceConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = optional_var("APP_ENV")
            .map(|raw| AppEnvironment::parse(&raw))
            .unwrap_or(AppEnvironment::Development);

        let data_dir = optional_var("APP_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let log_level = optional_var("APP_LOG_LEVEL")
            .unwrap_or_else(|| environment.default_log_level().to_string());

        let compound_rules = match optional_var("APP_COMPOUND_RULES") {
            Some(raw) => CompoundRulePolicy::parse(&raw)
                .ok_or(ConfigError::InvalidCompoundRules { value: raw })?,
            None => CompoundRulePolicy::default(),
        };

        Ok(Self {
            environment,
            storage: StorageConfig { data_dir },
            telemetry: TelemetryConfig { log_level },
            inference: InferenceConfig { compound_rules },
        })
    }
}

/// Set and non-blank, or `None`.
fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Where the file store keeps one JSON document per record.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidCompoundRules { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCompoundRules { value } => write!(
                f,
                "APP_COMPOUND_RULES must be 'both' or 'primary' (found '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
