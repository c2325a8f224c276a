use crate::platform::Permission;
use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Permission not granted: {permission}")]
    PermissionDenied { permission: Permission },

    #[error("Usage stats service unavailable")]
    UsageStatsUnavailable,

    #[error("Overlay error: {0}")]
    Overlay(String),

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Overlay service is already running")]
    AlreadyRunning,

    #[error("Overlay service is not running")]
    NotRunning,

    #[error("Timer error: {0}")]
    Timer(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Internal(String),
}

// For host bridges that only carry strings across the boundary
impl From<AppError> for String {
    fn from(e: AppError) -> Self {
        e.to_string()
    }
}
