use crate::error::AppError;
use crate::models::{ForegroundSample, NotificationSpec, OverlayParams, RunStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two grants the overlay feature depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    DrawOverlay,
    ReadUsageStats,
}

impl Permission {
    /// Order in which missing grants are requested.
    pub const ALL: [Permission; 2] = [Permission::DrawOverlay, Permission::ReadUsageStats];
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::DrawOverlay => f.write_str("draw-overlay"),
            Permission::ReadUsageStats => f.write_str("read-usage-stats"),
        }
    }
}

/// Source of per-app "last used" timestamps.
pub trait UsageStatsSource: Send {
    /// All usage records whose last-used timestamp falls in `[begin_ms, end_ms]`.
    fn query_usage(&self, begin_ms: i64, end_ms: i64) -> Result<Vec<ForegroundSample>, AppError>;
}

/// Attaches and detaches floating views on the system window layer.
pub trait OverlayWindowManager: Send {
    type Handle: Send;

    fn attach(&mut self, params: &OverlayParams) -> Result<Self::Handle, AppError>;
    fn detach(&mut self, handle: Self::Handle) -> Result<(), AppError>;
}

/// Checks grants and launches the settings flow for a missing one.
pub trait PermissionGate {
    fn is_granted(&self, permission: Permission) -> bool;
    fn request(&mut self, permission: Permission);
}

/// Minimal status display owned by the controller.
pub trait StatusView {
    fn show_status(&mut self, status: RunStatus);
    /// Short-lived user-visible message.
    fn show_notice(&mut self, message: &str);
}

/// Keeps the background process alive while the monitor runs.
pub trait ServiceHost {
    fn start_foreground(&mut self, notification: &NotificationSpec);
    fn stop_foreground(&mut self);
}
