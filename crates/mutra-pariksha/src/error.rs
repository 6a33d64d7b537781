use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::pariksha::{
    InvalidFormatError, NavigationError, PersistenceError, SubmissionError, VerdictError,
};
use std::fmt;

/// Failures surfaced to the command-line front end.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Storage(PersistenceError),
    Import(InvalidFormatError),
    Navigation(NavigationError),
    Submission(SubmissionError),
    Verdict(VerdictError),
    Json(serde_json::Error),
    Csv(csv::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "invalid configuration: {}", err),
            AppError::Telemetry(err) => write!(f, "logging setup failed: {}", err),
            AppError::Io(err) => write!(f, "file access failed: {}", err),
            AppError::Storage(err) => write!(f, "storage error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Navigation(err) => write!(f, "navigation error: {}", err),
            AppError::Submission(err) => write!(f, "submission rejected: {}", err),
            AppError::Verdict(err) => write!(f, "verdict rejected: {}", err),
            AppError::Json(err) => write!(f, "serialization error: {}", err),
            AppError::Csv(err) => write!(f, "csv error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Storage(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Navigation(err) => Some(err),
            AppError::Submission(err) => Some(err),
            AppError::Verdict(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Csv(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<PersistenceError> for AppError {
    fn from(value: PersistenceError) -> Self {
        Self::Storage(value)
    }
}

impl From<InvalidFormatError> for AppError {
    fn from(value: InvalidFormatError) -> Self {
        Self::Import(value)
    }
}

impl From<NavigationError> for AppError {
    fn from(value: NavigationError) -> Self {
        Self::Navigation(value)
    }
}

impl From<SubmissionError> for AppError {
    fn from(value: SubmissionError) -> Self {
        Self::Submission(value)
    }
}

impl From<VerdictError> for AppError {
    fn from(value: VerdictError) -> Self {
        Self::Verdict(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<csv::Error> for AppError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}
