use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from file: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    #[error("Invalid analysis filter in configuration: {0}")]
    Filter(#[from] FilterValidationError),

    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}

/// Raised when filter parameters are out of range. Never silently ignored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterValidationError {
    #[error("target month must be between 1 and 12, got {0}")]
    MonthOutOfRange(u32),

    #[error("unrecognized order status '{0}'")]
    UnknownOrderStatus(String),
}
