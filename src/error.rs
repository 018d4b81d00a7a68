//! Error types for notify-gate.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Time error: {0}")]
    Time(#[from] TimeError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Malformed time inputs reaching the quiet-hours evaluator.
///
/// Upstream validation is expected to have rejected these already;
/// the evaluator refuses to guess a default rather than silently
/// enabling or disabling a quiet-hours window.
#[derive(Debug, thiserror::Error)]
pub enum TimeError {
    #[error("Malformed timestamp (expected RFC 3339 with explicit offset): {0}")]
    MalformedTimestamp(String),

    #[error("Malformed time of day (expected HH:MM, 24h): {0}")]
    MalformedTimeOfDay(String),
}

/// Preference-store errors.
///
/// The in-memory backend never fails, but the trait leaves room for
/// a persistent backend. Absence of a record is not an error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
