//! Shared test utilities for Clasher.
//!
//! Scripted stand-ins for the platform seams. Every fake is cheap to clone and
//! clones share state, so a test can keep one copy while the code under test
//! owns another (possibly on the timer thread).

#![cfg(test)]

use crate::error::AppError;
use crate::models::{ForegroundSample, NotificationSpec, OverlayParams, RunStatus};
use crate::platform::{
    OverlayWindowManager, Permission, PermissionGate, ServiceHost, StatusView, UsageStatsSource,
};
use crate::service::ServiceLauncher;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Poll `cond` until it holds or five seconds pass.
pub fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    cond()
}

#[derive(Default)]
struct SourceState {
    batches: VecDeque<Vec<ForegroundSample>>,
    repeat: Option<Vec<ForegroundSample>>,
    unavailable: bool,
    queries: Vec<(i64, i64)>,
}

/// Usage source that replays queued sample batches, then empty results.
#[derive(Clone, Default)]
pub struct ScriptedSource(Arc<Mutex<SourceState>>);

impl ScriptedSource {
    pub fn new(batches: Vec<Vec<ForegroundSample>>) -> Self {
        Self(Arc::new(Mutex::new(SourceState {
            batches: batches.into(),
            ..SourceState::default()
        })))
    }

    /// Returns the same batch on every query.
    pub fn repeating(batch: Vec<ForegroundSample>) -> Self {
        Self(Arc::new(Mutex::new(SourceState {
            repeat: Some(batch),
            ..SourceState::default()
        })))
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.0.lock().unwrap().unavailable = unavailable;
    }

    pub fn queries(&self) -> Vec<(i64, i64)> {
        self.0.lock().unwrap().queries.clone()
    }
}

impl UsageStatsSource for ScriptedSource {
    fn query_usage(&self, begin_ms: i64, end_ms: i64) -> Result<Vec<ForegroundSample>, AppError> {
        let mut state = self.0.lock().unwrap();
        state.queries.push((begin_ms, end_ms));
        if state.unavailable {
            return Err(AppError::UsageStatsUnavailable);
        }
        if let Some(batch) = state.batches.pop_front() {
            return Ok(batch);
        }
        Ok(state.repeat.clone().unwrap_or_default())
    }
}

/// Usage source whose first query takes the monitor thread down.
#[derive(Clone, Default)]
pub struct PanickingSource(Arc<AtomicBool>);

impl PanickingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn was_queried(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl UsageStatsSource for PanickingSource {
    #[allow(clippy::panic, reason = "simulates a backend crashing the timer thread")]
    fn query_usage(&self, _begin_ms: i64, _end_ms: i64) -> Result<Vec<ForegroundSample>, AppError> {
        self.0.store(true, Ordering::SeqCst);
        panic!("usage backend crashed");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    Attached(u64),
    Detached(u64),
}

#[derive(Default)]
struct WindowsState {
    next_id: u64,
    events: Vec<OverlayEvent>,
    fail_attach: bool,
    last_params: Option<OverlayParams>,
}

/// Window manager that records every attach and detach.
#[derive(Clone, Default)]
pub struct RecordingWindows(Arc<Mutex<WindowsState>>);

impl RecordingWindows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<OverlayEvent> {
        self.0.lock().unwrap().events.clone()
    }

    pub fn attach_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, OverlayEvent::Attached(_)))
            .count()
    }

    pub fn detach_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, OverlayEvent::Detached(_)))
            .count()
    }

    pub fn set_fail_attach(&self, fail: bool) {
        self.0.lock().unwrap().fail_attach = fail;
    }

    pub fn last_params(&self) -> Option<OverlayParams> {
        self.0.lock().unwrap().last_params.clone()
    }
}

impl OverlayWindowManager for RecordingWindows {
    type Handle = u64;

    fn attach(&mut self, params: &OverlayParams) -> Result<u64, AppError> {
        let mut state = self.0.lock().unwrap();
        if state.fail_attach {
            return Err(AppError::Overlay("attach refused".into()));
        }
        state.next_id += 1;
        let id = state.next_id;
        state.events.push(OverlayEvent::Attached(id));
        state.last_params = Some(params.clone());
        Ok(id)
    }

    fn detach(&mut self, handle: u64) -> Result<(), AppError> {
        self.0.lock().unwrap().events.push(OverlayEvent::Detached(handle));
        Ok(())
    }
}

/// Service host that remembers whether a notification is posted.
#[derive(Clone, Default)]
pub struct RecordingHost(Arc<Mutex<Option<NotificationSpec>>>);

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_foreground(&self) -> bool {
        self.0.lock().unwrap().is_some()
    }

    pub fn notification(&self) -> Option<NotificationSpec> {
        self.0.lock().unwrap().clone()
    }
}

impl ServiceHost for RecordingHost {
    fn start_foreground(&mut self, notification: &NotificationSpec) {
        *self.0.lock().unwrap() = Some(notification.clone());
    }

    fn stop_foreground(&mut self) {
        *self.0.lock().unwrap() = None;
    }
}

#[derive(Default)]
struct GateState {
    granted: HashSet<Permission>,
    requests: Vec<Permission>,
}

/// Permission gate whose grants a test flips by hand.
#[derive(Clone, Default)]
pub struct ToggleGate(Arc<Mutex<GateState>>);

impl ToggleGate {
    pub fn new(draw_overlay: bool, read_usage_stats: bool) -> Self {
        let gate = Self::default();
        if draw_overlay {
            gate.grant(Permission::DrawOverlay);
        }
        if read_usage_stats {
            gate.grant(Permission::ReadUsageStats);
        }
        gate
    }

    pub fn grant(&self, permission: Permission) {
        self.0.lock().unwrap().granted.insert(permission);
    }

    pub fn requests(&self) -> Vec<Permission> {
        self.0.lock().unwrap().requests.clone()
    }
}

impl PermissionGate for ToggleGate {
    fn is_granted(&self, permission: Permission) -> bool {
        self.0.lock().unwrap().granted.contains(&permission)
    }

    fn request(&mut self, permission: Permission) {
        self.0.lock().unwrap().requests.push(permission);
    }
}

/// Status view that keeps everything it was asked to show.
#[derive(Default)]
pub struct RecordingView {
    statuses: Vec<RunStatus>,
    notices: Vec<String>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statuses(&self) -> Vec<RunStatus> {
        self.statuses.clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.clone()
    }
}

impl StatusView for RecordingView {
    fn show_status(&mut self, status: RunStatus) {
        self.statuses.push(status);
    }

    fn show_notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

/// Launcher that counts calls instead of starting anything.
#[derive(Default)]
pub struct FakeLauncher {
    running: bool,
    starts: usize,
    stops: usize,
    failing: bool,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starts(&self) -> usize {
        self.starts
    }

    pub fn stops(&self) -> usize {
        self.stops
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }
}

impl ServiceLauncher for FakeLauncher {
    fn start(&mut self) -> Result<(), AppError> {
        if self.failing {
            return Err(AppError::Internal("launch failed".into()));
        }
        self.starts += 1;
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AppError> {
        if self.failing {
            return Err(AppError::Internal("launch failed".into()));
        }
        self.stops += 1;
        self.running = false;
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
