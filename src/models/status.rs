use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the overlay service is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    #[default]
    Stopped,
}

impl RunStatus {
    pub fn is_running(self) -> bool {
        matches!(self, RunStatus::Running)
    }

    pub fn label(self) -> &'static str {
        match self {
            RunStatus::Running => "Service is running",
            RunStatus::Stopped => "Service is stopped",
        }
    }

    /// Text of the button that flips the status.
    pub fn action_label(self) -> &'static str {
        match self {
            RunStatus::Running => "Stop Service",
            RunStatus::Stopped => "Start Service",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
