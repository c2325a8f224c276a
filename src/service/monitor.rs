use super::timer::Periodic;
use crate::constants::{LOOKBACK_WINDOW_MS, POLL_INTERVAL_MS, TARGET_PACKAGE};
use crate::models::{current_timestamp_ms, resolve_foreground, OverlayParams};
use crate::platform::{OverlayWindowManager, UsageStatsSource};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorConfig {
    pub target_package: String,
    pub poll_interval_ms: u64,
    pub lookback_window_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            target_package: TARGET_PACKAGE.to_string(),
            poll_interval_ms: POLL_INTERVAL_MS,
            lookback_window_ms: LOOKBACK_WINDOW_MS,
        }
    }
}

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    fn lookback_ms(&self) -> i64 {
        i64::try_from(self.lookback_window_ms).unwrap_or(i64::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Hidden,
    Shown,
}

/// What a single tick did to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Shown,
    Hidden,
}

/// Keeps overlay visibility in sync with whether the target app is in front.
///
/// The overlay handle is the only record of visibility: the monitor is
/// `Shown` exactly when it holds a handle.
pub struct OverlayMonitor<S, W>
where
    S: UsageStatsSource,
    W: OverlayWindowManager,
{
    config: MonitorConfig,
    params: OverlayParams,
    source: S,
    windows: W,
    overlay: Option<W::Handle>,
    last_foreground: Option<String>,
}

impl<S, W> OverlayMonitor<S, W>
where
    S: UsageStatsSource,
    W: OverlayWindowManager,
{
    pub fn new(config: MonitorConfig, source: S, windows: W) -> Self {
        Self {
            config,
            params: OverlayParams::default(),
            source,
            windows,
            overlay: None,
            last_foreground: None,
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: OverlayParams) -> Self {
        self.params = params;
        self
    }

    pub fn state(&self) -> OverlayState {
        if self.overlay.is_some() {
            OverlayState::Shown
        } else {
            OverlayState::Hidden
        }
    }

    pub fn is_overlay_visible(&self) -> bool {
        self.overlay.is_some()
    }

    /// Identity resolved by the most recent tick; `None` when unknown.
    pub fn last_foreground(&self) -> Option<&str> {
        self.last_foreground.as_deref()
    }

    /// Package used most recently within the lookback window ending at `now_ms`.
    pub fn resolve_foreground_app(&self, now_ms: i64) -> Option<String> {
        let begin_ms = now_ms.saturating_sub(self.config.lookback_ms());
        match self.source.query_usage(begin_ms, now_ms) {
            Ok(samples) => resolve_foreground(samples),
            Err(e) => {
                warn!("Usage query failed, treating foreground as unknown: {e}");
                None
            }
        }
    }

    pub fn tick(&mut self) -> Transition {
        self.tick_at(current_timestamp_ms())
    }

    pub fn tick_at(&mut self, now_ms: i64) -> Transition {
        let foreground = self.resolve_foreground_app(now_ms);
        let is_target = foreground.as_deref() == Some(self.config.target_package.as_str());
        debug!("Foreground app: {foreground:?} (target: {is_target})");

        let transition = match (is_target, self.overlay.is_some()) {
            (true, false) => self.show(),
            (false, true) => self.hide(),
            (true, true) | (false, false) => Transition::Unchanged,
        };

        self.last_foreground = foreground;
        transition
    }

    fn show(&mut self) -> Transition {
        match self.windows.attach(&self.params) {
            Ok(handle) => {
                self.overlay = Some(handle);
                info!("{} in foreground, overlay shown", self.config.target_package);
                Transition::Shown
            }
            Err(e) => {
                error!("Failed to attach overlay: {e}");
                Transition::Unchanged
            }
        }
    }

    fn hide(&mut self) -> Transition {
        let Some(handle) = self.overlay.take() else {
            return Transition::Unchanged;
        };
        // The handle is gone either way; a failed detach cannot be retried.
        if let Err(e) = self.windows.detach(handle) {
            error!("Failed to detach overlay: {e}");
        }
        info!("{} left foreground, overlay hidden", self.config.target_package);
        Transition::Hidden
    }

    /// Hide the overlay if shown. Called when monitoring stops.
    pub fn shutdown(&mut self) {
        self.hide();
        self.last_foreground = None;
    }

    /// Hand back the platform collaborators, hiding the overlay first.
    pub fn into_parts(mut self) -> (S, W) {
        self.shutdown();
        (self.source, self.windows)
    }
}

impl<S, W> Periodic for OverlayMonitor<S, W>
where
    S: UsageStatsSource + 'static,
    W: OverlayWindowManager + 'static,
{
    fn tick(&mut self) {
        self.tick_at(current_timestamp_ms());
    }

    fn finish(&mut self) {
        self.shutdown();
    }
}
