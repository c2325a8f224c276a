#![allow(unsafe_code, reason = "AppKit accessors are exposed as unsafe fns")]

use super::UsageStatsSource;
use crate::error::AppError;
use crate::models::ForegroundSample;
use objc2_app_kit::NSWorkspace;

/// Reads the bundle identifier of `NSWorkspace.frontmostApplication`.
pub struct MacOSUsageSource;

impl Default for MacOSUsageSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MacOSUsageSource {
    pub fn new() -> Self {
        Self
    }
}

impl UsageStatsSource for MacOSUsageSource {
    fn query_usage(&self, _begin_ms: i64, end_ms: i64) -> Result<Vec<ForegroundSample>, AppError> {
        // SAFETY: read-only AppKit getters; no objects outlive this call.
        let bundle_id = unsafe {
            NSWorkspace::sharedWorkspace()
                .frontmostApplication()
                .and_then(|app| app.bundleIdentifier())
        };

        Ok(bundle_id
            .map(|id| ForegroundSample::new(id.to_string(), end_ms))
            .into_iter()
            .collect())
    }
}
