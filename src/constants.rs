// src/constants.rs

/// Package identifier of the game that triggers the overlay
pub const TARGET_PACKAGE: &str = "com.supercell.clashroyale";

/// Delay between two foreground checks, in milliseconds
pub const POLL_INTERVAL_MS: u64 = 1000;

/// Trailing window queried from the usage-stats provider, in milliseconds
pub const LOOKBACK_WINDOW_MS: u64 = 2000;

/// Vertical offset of the overlay from the top edge, in pixels
pub const OVERLAY_OFFSET_Y: i32 = 100;

/// Notification channel used by the foreground service
pub const NOTIFICATION_CHANNEL_ID: &str = "OverlayServiceChannel";

/// User-visible name of the notification channel
pub const NOTIFICATION_CHANNEL_NAME: &str = "Overlay Service Channel";

/// Identifier of the persistent service notification
pub const NOTIFICATION_ID: i32 = 1;

pub const APP_NAME: &str = "Clasher Engine";

/// Maximum package identifier length
pub const MAX_PACKAGE_LEN: usize = 255;
