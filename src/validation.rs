use crate::constants::MAX_PACKAGE_LEN;
use crate::error::AppError;
use crate::service::MonitorConfig;

/// Validate an application identifier such as `com.example.app`.
///
/// Dots are optional so desktop window classes (`firefox`) also pass.
pub fn validate_package_name(name: &str) -> Result<&str, AppError> {
    let err = |reason: String| AppError::InvalidInput {
        field: "target_package",
        reason,
    };

    if name.is_empty() {
        return Err(err("cannot be empty".into()));
    }
    if name.len() > MAX_PACKAGE_LEN {
        return Err(err(format!("cannot exceed {MAX_PACKAGE_LEN} characters")));
    }
    if let Some(c) = name
        .chars()
        .find(|&c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        return Err(err(format!("invalid character '{c}'")));
    }
    if name.split('.').any(str::is_empty) {
        return Err(err("empty segment between dots".into()));
    }

    Ok(name)
}

/// Validate a polling interval in milliseconds.
pub fn validate_poll_interval(ms: u64) -> Result<(), AppError> {
    if ms == 0 {
        return Err(AppError::InvalidInput {
            field: "poll_interval_ms",
            reason: "must be positive".into(),
        });
    }
    Ok(())
}

/// Validate the usage-stats lookback window in milliseconds.
pub fn validate_lookback_window(ms: u64) -> Result<(), AppError> {
    if ms == 0 {
        return Err(AppError::InvalidInput {
            field: "lookback_window_ms",
            reason: "must be positive".into(),
        });
    }
    Ok(())
}

pub fn validate_config(config: &MonitorConfig) -> Result<(), AppError> {
    validate_package_name(&config.target_package)?;
    validate_poll_interval(config.poll_interval_ms)?;
    validate_lookback_window(config.lookback_window_ms)
}
