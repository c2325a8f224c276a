pub mod overlay;
pub mod sample;
pub mod status;

pub use overlay::{Extent, Gravity, NotificationSpec, OverlayParams, PixelFormat};
pub use sample::{current_timestamp_ms, resolve_foreground, ForegroundSample};
pub use status::RunStatus;
