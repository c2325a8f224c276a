use crate::constants::{
    APP_NAME, NOTIFICATION_CHANNEL_ID, NOTIFICATION_CHANNEL_NAME, NOTIFICATION_ID,
    OVERLAY_OFFSET_Y,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gravity {
    TopCenter,
    TopStart,
    TopEnd,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PixelFormat {
    Opaque,
    Translucent,
}

/// Size of one overlay axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Extent {
    WrapContent,
    Pixels(u32),
}

/// Layout of the floating overlay window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayParams {
    pub width: Extent,
    pub height: Extent,
    pub gravity: Gravity,
    pub offset_y: i32,
    pub focusable: bool,
    pub pixel_format: PixelFormat,
    pub label: String,
}

impl Default for OverlayParams {
    fn default() -> Self {
        Self {
            width: Extent::WrapContent,
            height: Extent::WrapContent,
            gravity: Gravity::TopCenter,
            offset_y: OVERLAY_OFFSET_Y,
            focusable: false,
            pixel_format: PixelFormat::Translucent,
            label: APP_NAME.to_string(),
        }
    }
}

/// The persistent notification a long-running monitor must keep posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSpec {
    pub channel_id: String,
    pub channel_name: String,
    pub notification_id: i32,
    pub title: String,
    pub text: String,
    pub low_priority: bool,
}

impl Default for NotificationSpec {
    fn default() -> Self {
        Self {
            channel_id: NOTIFICATION_CHANNEL_ID.to_string(),
            channel_name: NOTIFICATION_CHANNEL_NAME.to_string(),
            notification_id: NOTIFICATION_ID,
            title: APP_NAME.to_string(),
            text: "Overlay service is running".to_string(),
            low_priority: true,
        }
    }
}
