pub mod types;

pub use types::{
    OverlayWindowManager, Permission, PermissionGate, ServiceHost, StatusView, UsageStatsSource,
};

use crate::error::AppError;
use crate::models::{NotificationSpec, OverlayParams, RunStatus};
use log::info;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(target_os = "macos")]
pub use macos::MacOSUsageSource as NativeUsageSource;

#[cfg(target_os = "linux")]
pub use linux::X11UsageSource as NativeUsageSource;

#[cfg(target_os = "android")]
pub use android::DumpsysUsageSource as NativeUsageSource;

#[cfg(target_os = "linux")]
pub use linux::X11Overlay as NativeOverlay;

#[cfg(not(target_os = "linux"))]
pub use self::LoggingOverlay as NativeOverlay;

// Stub for development on other platforms
#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "android")))]
pub struct NativeUsageSource;

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "android")))]
impl UsageStatsSource for NativeUsageSource {
    fn query_usage(
        &self,
        _begin_ms: i64,
        _end_ms: i64,
    ) -> Result<Vec<crate::models::ForegroundSample>, AppError> {
        Ok(Vec::new())
    }
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "android")))]
impl NativeUsageSource {
    pub fn new() -> Self {
        Self
    }
}

/// Overlay backend for hosts without a window layer: logs and hands out ids.
#[derive(Debug, Default)]
pub struct LoggingOverlay {
    next_id: u64,
}

impl LoggingOverlay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OverlayWindowManager for LoggingOverlay {
    type Handle = u64;

    fn attach(&mut self, params: &OverlayParams) -> Result<u64, AppError> {
        self.next_id += 1;
        info!(
            "Overlay #{} attached: '{}' {:?} y={}",
            self.next_id, params.label, params.gravity, params.offset_y
        );
        Ok(self.next_id)
    }

    fn detach(&mut self, handle: u64) -> Result<(), AppError> {
        info!("Overlay #{handle} detached");
        Ok(())
    }
}

/// Desktop hosts have no grant screens.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysGranted;

impl PermissionGate for AlwaysGranted {
    fn is_granted(&self, _permission: Permission) -> bool {
        true
    }

    fn request(&mut self, _permission: Permission) {}
}

/// Service host that records the notification in the log only.
#[derive(Debug, Default)]
pub struct LoggingServiceHost {
    posted: Option<NotificationSpec>,
}

impl LoggingServiceHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_foreground(&self) -> bool {
        self.posted.is_some()
    }
}

impl ServiceHost for LoggingServiceHost {
    fn start_foreground(&mut self, notification: &NotificationSpec) {
        info!(
            "Foreground notification #{} on '{}': {}",
            notification.notification_id, notification.channel_id, notification.text
        );
        self.posted = Some(notification.clone());
    }

    fn stop_foreground(&mut self) {
        if let Some(notification) = self.posted.take() {
            info!("Foreground notification #{} removed", notification.notification_id);
        }
    }
}

/// Status display that writes to the log.
#[derive(Debug, Default)]
pub struct LogStatusView;

impl StatusView for LogStatusView {
    fn show_status(&mut self, status: RunStatus) {
        info!("{status} [{}]", status.action_label());
    }

    fn show_notice(&mut self, message: &str) {
        info!("{message}");
    }
}
