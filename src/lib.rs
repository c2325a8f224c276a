pub mod constants;
pub mod controller;
pub mod engine;
pub mod error;
pub mod models;
pub mod platform;
pub mod service;
#[cfg(test)]
mod test_utils;
pub mod validation;

use crate::controller::Controller;
use crate::error::AppError;
use crate::platform::{
    AlwaysGranted, LogStatusView, LoggingServiceHost, NativeOverlay, NativeUsageSource,
    PermissionGate, StatusView,
};
use crate::service::{MonitorConfig, OverlayService, ServiceLauncher};
use log::{info, warn};
use std::io::BufRead;

/// Treat every input line as a press of the toggle button until EOF, then
/// make sure the service is stopped.
pub fn run_console<G, V, L, R>(
    controller: &mut Controller<G, V, L>,
    input: R,
) -> Result<(), AppError>
where
    G: PermissionGate,
    V: StatusView,
    L: ServiceLauncher,
    R: BufRead,
{
    controller.on_create();

    for line in input.lines() {
        line?;
        if let Err(e) = controller.toggle() {
            warn!("Toggle refused: {e}");
        }
        info!("{}", controller.status_label());
    }

    if controller.status().is_running() {
        controller.toggle()?;
    }
    Ok(())
}

/// Run the overlay monitor on the native platform, driven from stdin.
pub fn run() -> Result<(), AppError> {
    let service = OverlayService::new(
        MonitorConfig::default(),
        NativeUsageSource::new(),
        NativeOverlay::new(),
        LoggingServiceHost::new(),
    );
    let mut controller = Controller::new(AlwaysGranted, LogStatusView, service);

    info!("Press Enter to start or stop the overlay service, Ctrl+D to quit");
    run_console(&mut controller, std::io::stdin().lock())
}
