pub mod monitor;
pub mod timer;

pub use monitor::{MonitorConfig, OverlayMonitor, OverlayState, Transition};
pub use timer::{Periodic, RepeatingTimer, TimerHandle};

use crate::error::AppError;
use crate::models::{NotificationSpec, OverlayParams};
use crate::platform::{OverlayWindowManager, ServiceHost, UsageStatsSource};
use crate::validation::validate_config;
use log::{error, info};

const TIMER_NAME: &str = "overlay-monitor";

/// Starts and stops the long-running overlay monitor.
pub trait ServiceLauncher {
    fn start(&mut self) -> Result<(), AppError>;
    fn stop(&mut self) -> Result<(), AppError>;
    fn is_running(&self) -> bool;
}

/// Background service owning the monitor loop and its foreground notification.
///
/// Every start builds a fresh [`OverlayMonitor`], so nothing about a previous
/// run's overlay survives a stop.
pub struct OverlayService<S, W, H>
where
    S: UsageStatsSource + 'static,
    W: OverlayWindowManager + 'static,
    H: ServiceHost,
{
    config: MonitorConfig,
    params: OverlayParams,
    notification: NotificationSpec,
    host: H,
    idle: Option<(S, W)>,
    timer: Option<TimerHandle<OverlayMonitor<S, W>>>,
}

impl<S, W, H> OverlayService<S, W, H>
where
    S: UsageStatsSource + 'static,
    W: OverlayWindowManager + 'static,
    H: ServiceHost,
{
    pub fn new(config: MonitorConfig, source: S, windows: W, host: H) -> Self {
        Self {
            config,
            params: OverlayParams::default(),
            notification: NotificationSpec::default(),
            host,
            idle: Some((source, windows)),
            timer: None,
        }
    }

    #[must_use]
    pub fn with_overlay_params(mut self, params: OverlayParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_notification(mut self, notification: NotificationSpec) -> Self {
        self.notification = notification;
        self
    }
}

impl<S, W, H> ServiceLauncher for OverlayService<S, W, H>
where
    S: UsageStatsSource + 'static,
    W: OverlayWindowManager + 'static,
    H: ServiceHost,
{
    fn start(&mut self) -> Result<(), AppError> {
        if self.timer.is_some() {
            return Err(AppError::AlreadyRunning);
        }
        validate_config(&self.config)?;

        let (source, windows) = self
            .idle
            .take()
            .ok_or_else(|| AppError::Internal("monitor backends were lost".into()))?;
        let monitor = OverlayMonitor::new(self.config.clone(), source, windows)
            .with_params(self.params.clone());

        self.host.start_foreground(&self.notification);
        match RepeatingTimer::start(TIMER_NAME, self.config.poll_interval(), monitor) {
            Ok(handle) => {
                self.timer = Some(handle);
                info!(
                    "Overlay service started, watching {} every {}ms",
                    self.config.target_package, self.config.poll_interval_ms
                );
                Ok(())
            }
            Err(e) => {
                self.host.stop_foreground();
                Err(e)
            }
        }
    }

    fn stop(&mut self) -> Result<(), AppError> {
        let handle = self.timer.take().ok_or(AppError::NotRunning)?;
        // Cancelling removes the pending tick and detaches a shown overlay together.
        let result = handle.cancel();
        self.host.stop_foreground();

        match result {
            Ok(monitor) => {
                self.idle = Some(monitor.into_parts());
                info!("Overlay service stopped");
                Ok(())
            }
            Err(e) => {
                // The monitor died with its thread; the service is stopped but cannot restart.
                error!("Overlay monitor did not shut down cleanly: {e}");
                Err(e)
            }
        }
    }

    fn is_running(&self) -> bool {
        self.timer.is_some()
    }
}

impl<S, W, H> Drop for OverlayService<S, W, H>
where
    S: UsageStatsSource + 'static,
    W: OverlayWindowManager + 'static,
    H: ServiceHost,
{
    fn drop(&mut self) {
        if self.timer.is_some() {
            if let Err(e) = self.stop() {
                error!("Failed to stop overlay service: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ForegroundSample;
    use crate::models::Gravity;
    use crate::test_utils::{
        wait_until, OverlayEvent, PanickingSource, RecordingHost, RecordingWindows,
        ScriptedSource,
    };

    const TARGET: &str = "com.supercell.clashroyale";

    fn fast_config() -> MonitorConfig {
        MonitorConfig {
            poll_interval_ms: 5,
            ..MonitorConfig::default()
        }
    }

    #[test]
    fn test_start_and_stop() {
        let windows = RecordingWindows::new();
        let host = RecordingHost::new();
        let mut service = OverlayService::new(
            fast_config(),
            ScriptedSource::new(vec![]),
            windows.clone(),
            host.clone(),
        );

        assert!(!service.is_running());
        service.start().unwrap();
        assert!(service.is_running());
        assert!(host.is_foreground());

        service.stop().unwrap();
        assert!(!service.is_running());
        assert!(!host.is_foreground());
        assert!(windows.events().is_empty());
    }

    #[test]
    fn test_double_start_is_rejected() {
        let mut service = OverlayService::new(
            fast_config(),
            ScriptedSource::new(vec![]),
            RecordingWindows::new(),
            RecordingHost::new(),
        );
        service.start().unwrap();
        assert!(matches!(service.start(), Err(AppError::AlreadyRunning)));
        service.stop().unwrap();
        assert!(matches!(service.stop(), Err(AppError::NotRunning)));
    }

    #[test]
    fn test_stop_detaches_shown_overlay() {
        let windows = RecordingWindows::new();
        let source = ScriptedSource::repeating(vec![ForegroundSample::new(TARGET, 1)]);
        let mut service =
            OverlayService::new(fast_config(), source, windows.clone(), RecordingHost::new());

        service.start().unwrap();
        assert!(wait_until(|| windows.attach_count() == 1));

        service.stop().unwrap();
        assert_eq!(
            windows.events(),
            vec![OverlayEvent::Attached(1), OverlayEvent::Detached(1)]
        );
    }

    #[test]
    fn test_restart_uses_fresh_overlay() {
        let windows = RecordingWindows::new();
        let source = ScriptedSource::repeating(vec![ForegroundSample::new(TARGET, 1)]);
        let mut service =
            OverlayService::new(fast_config(), source, windows.clone(), RecordingHost::new());

        service.start().unwrap();
        assert!(wait_until(|| windows.attach_count() == 1));
        service.stop().unwrap();

        service.start().unwrap();
        assert!(wait_until(|| windows.attach_count() == 2));
        service.stop().unwrap();

        assert_eq!(
            windows.events(),
            vec![
                OverlayEvent::Attached(1),
                OverlayEvent::Detached(1),
                OverlayEvent::Attached(2),
                OverlayEvent::Detached(2),
            ]
        );
    }

    #[test]
    fn test_invalid_config_does_not_start() {
        let host = RecordingHost::new();
        let config = MonitorConfig {
            poll_interval_ms: 0,
            ..MonitorConfig::default()
        };
        let mut service = OverlayService::new(
            config,
            ScriptedSource::new(vec![]),
            RecordingWindows::new(),
            host.clone(),
        );

        assert!(matches!(
            service.start(),
            Err(AppError::InvalidInput { field: "poll_interval_ms", .. })
        ));
        assert!(!service.is_running());
        assert!(!host.is_foreground());
    }

    #[test]
    fn test_drop_while_running_cleans_up() {
        let windows = RecordingWindows::new();
        let host = RecordingHost::new();
        let source = ScriptedSource::repeating(vec![ForegroundSample::new(TARGET, 1)]);
        let mut service = OverlayService::new(fast_config(), source, windows.clone(), host.clone());

        service.start().unwrap();
        assert!(wait_until(|| windows.attach_count() == 1));
        drop(service);

        assert_eq!(windows.detach_count(), 1);
        assert!(!host.is_foreground());
    }

    #[test]
    fn test_custom_overlay_and_notification() {
        let windows = RecordingWindows::new();
        let host = RecordingHost::new();
        let params = OverlayParams {
            gravity: Gravity::Center,
            ..OverlayParams::default()
        };
        let notification = NotificationSpec {
            text: "Watching for the game".to_string(),
            ..NotificationSpec::default()
        };
        let source = ScriptedSource::repeating(vec![ForegroundSample::new(TARGET, 1)]);
        let mut service = OverlayService::new(fast_config(), source, windows.clone(), host.clone())
            .with_overlay_params(params.clone())
            .with_notification(notification.clone());

        service.start().unwrap();
        assert_eq!(host.notification(), Some(notification));
        assert!(wait_until(|| windows.attach_count() == 1));
        assert_eq!(windows.last_params(), Some(params));
        service.stop().unwrap();
    }

    #[test]
    fn test_crashed_monitor_still_counts_as_stopped() {
        let source = PanickingSource::new();
        let host = RecordingHost::new();
        let mut service = OverlayService::new(
            fast_config(),
            source.clone(),
            RecordingWindows::new(),
            host.clone(),
        );

        service.start().unwrap();
        assert!(wait_until(|| source.was_queried()));

        assert!(matches!(service.stop(), Err(AppError::Timer(_))));
        assert!(!service.is_running());
        assert!(!host.is_foreground());
        assert!(matches!(service.stop(), Err(AppError::NotRunning)));

        // The backends went down with the thread
        assert!(matches!(service.start(), Err(AppError::Internal(_))));
        assert!(!service.is_running());
        assert!(!host.is_foreground());
    }
}
