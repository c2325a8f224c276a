use crate::error::AppError;
use crate::models::RunStatus;
use crate::platform::{Permission, PermissionGate, StatusView};
use crate::service::ServiceLauncher;
use log::{error, info};

pub const NOTICE_GRANT_PERMISSIONS: &str = "Please grant all permissions";
pub const NOTICE_STARTED: &str = "Overlay service started";
pub const NOTICE_STOPPED: &str = "Overlay service stopped";

/// Gates the overlay service behind its two permissions and flips it on demand.
pub struct Controller<G, V, L>
where
    G: PermissionGate,
    V: StatusView,
    L: ServiceLauncher,
{
    gate: G,
    view: V,
    launcher: L,
    status: RunStatus,
}

impl<G, V, L> Controller<G, V, L>
where
    G: PermissionGate,
    V: StatusView,
    L: ServiceLauncher,
{
    pub fn new(gate: G, view: V, launcher: L) -> Self {
        Self {
            gate,
            view,
            launcher,
            status: RunStatus::Stopped,
        }
    }

    /// First-launch setup: ask for anything missing and show the initial status.
    pub fn on_create(&mut self) {
        self.check_permissions();
        self.view.show_status(self.status);
    }

    /// First permission that is not granted, in request order.
    pub fn missing_permission(&self) -> Option<Permission> {
        Permission::ALL
            .into_iter()
            .find(|&permission| !self.gate.is_granted(permission))
    }

    /// True when both grants are present. Otherwise opens the request flow
    /// for the first missing one and returns false.
    pub fn check_permissions(&mut self) -> bool {
        match self.missing_permission() {
            Some(permission) => {
                info!("Requesting {permission} permission");
                self.gate.request(permission);
                false
            }
            None => true,
        }
    }

    /// Start the service when stopped, stop it when running.
    pub fn toggle(&mut self) -> Result<RunStatus, AppError> {
        if let Some(permission) = self.missing_permission() {
            self.gate.request(permission);
            self.view.show_notice(NOTICE_GRANT_PERMISSIONS);
            return Err(AppError::PermissionDenied { permission });
        }

        let (result, next, notice) = match self.status {
            RunStatus::Running => (self.launcher.stop(), RunStatus::Stopped, NOTICE_STOPPED),
            RunStatus::Stopped => (self.launcher.start(), RunStatus::Running, NOTICE_STARTED),
        };

        if let Err(e) = result {
            error!("Failed to toggle overlay service: {e}");
            // A failed stop can still leave the service down
            let actual = if self.launcher.is_running() {
                RunStatus::Running
            } else {
                RunStatus::Stopped
            };
            if actual != self.status {
                self.status = actual;
                self.view.show_status(actual);
            }
            self.view.show_notice(&e.to_string());
            return Err(e);
        }

        self.status = next;
        self.view.show_status(next);
        self.view.show_notice(notice);
        Ok(next)
    }

    /// Called when a permission settings screen returns.
    ///
    /// Re-checks the grants but never starts the service; the user has to
    /// toggle again.
    pub fn on_permission_result(&mut self, permission: Permission) -> bool {
        info!("Returned from {permission} settings");
        self.check_permissions()
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}
