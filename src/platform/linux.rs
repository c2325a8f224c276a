use super::{OverlayWindowManager, UsageStatsSource};
use crate::error::AppError;
use crate::models::{Extent, ForegroundSample, Gravity, OverlayParams};
use log::warn;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    AtomEnum, ConnectionExt, CreateWindowAux, GetPropertyReply, PropMode, Window, WindowClass,
};
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as WrapperConnectionExt;
use x11rb::{COPY_DEPTH_FROM_PARENT, COPY_FROM_PARENT};

/// Overlay size used when the params ask for wrap-content.
const WRAP_WIDTH: u16 = 320;
const WRAP_HEIGHT: u16 = 48;

struct Display {
    conn: RustConnection,
    root: Window,
    width: u16,
    height: u16,
    background: u32,
}

fn connect_display() -> Option<Display> {
    match x11rb::connect(None) {
        Ok((conn, screen_num)) => {
            let Some(screen) = conn.setup().roots.get(screen_num) else {
                warn!(
                    "Invalid screen number {screen_num} (only {} screens available)",
                    conn.setup().roots.len()
                );
                return None;
            };
            let (root, width, height, background) = (
                screen.root,
                screen.width_in_pixels,
                screen.height_in_pixels,
                screen.black_pixel,
            );
            Some(Display {
                conn,
                root,
                width,
                height,
                background,
            })
        }
        Err(e) => {
            // Wayland or headless: queries degrade to "no foreground app"
            warn!("Failed to connect to X server: {e}");
            None
        }
    }
}

/// Reads the foreground app from the `_NET_ACTIVE_WINDOW` WM_CLASS.
pub struct X11UsageSource {
    display: Option<Display>,
}

impl Default for X11UsageSource {
    fn default() -> Self {
        Self::new()
    }
}

impl X11UsageSource {
    pub fn new() -> Self {
        Self {
            display: connect_display(),
        }
    }

    fn get_atom(display: &Display, name: &str) -> Option<u32> {
        display
            .conn
            .intern_atom(false, name.as_bytes())
            .ok()?
            .reply()
            .ok()
            .map(|r| r.atom)
    }

    fn get_active_window_id(display: &Display) -> Option<Window> {
        let atom = Self::get_atom(display, "_NET_ACTIVE_WINDOW")?;
        let reply = display
            .conn
            .get_property(false, display.root, atom, AtomEnum::WINDOW, 0, 1)
            .ok()?
            .reply()
            .ok()?;

        first_window(&reply)
    }

    fn get_window_class(display: &Display, window: Window) -> Option<String> {
        let reply = display
            .conn
            .get_property(false, window, AtomEnum::WM_CLASS, AtomEnum::STRING, 0, 1024)
            .ok()?
            .reply()
            .ok()?;

        // WM_CLASS is "instance\0class\0"
        let instance = reply.value.split(|&b| b == 0).next()?;
        if instance.is_empty() {
            return None;
        }
        String::from_utf8(instance.to_vec()).ok()
    }
}

impl UsageStatsSource for X11UsageSource {
    fn query_usage(&self, _begin_ms: i64, end_ms: i64) -> Result<Vec<ForegroundSample>, AppError> {
        let display = self.display.as_ref().ok_or(AppError::UsageStatsUnavailable)?;

        let sample = Self::get_active_window_id(display)
            .and_then(|window| Self::get_window_class(display, window))
            .map(|class| ForegroundSample::new(class, end_ms));

        Ok(sample.into_iter().collect())
    }
}

/// Override-redirect X11 window standing in for the overlay view.
pub struct X11Overlay {
    display: Option<Display>,
}

impl Default for X11Overlay {
    fn default() -> Self {
        Self::new()
    }
}

impl X11Overlay {
    pub fn new() -> Self {
        Self {
            display: connect_display(),
        }
    }
}

/// First non-zero window id in a 32-bit property reply.
fn first_window(reply: &GetPropertyReply) -> Option<Window> {
    reply.value32()?.next().filter(|&id| id != 0)
}

fn extent_px(extent: Extent, wrap: u16) -> u16 {
    match extent {
        Extent::WrapContent => wrap,
        Extent::Pixels(px) => u16::try_from(px).unwrap_or(u16::MAX),
    }
}

/// Top-left corner of a `width`x`height` window on a `screen_w`x`screen_h` screen.
fn place(
    gravity: Gravity,
    screen_w: u16,
    screen_h: u16,
    width: u16,
    height: u16,
    offset_y: i32,
) -> (i16, i16) {
    let centered_x = i32::from(screen_w.saturating_sub(width)) / 2;
    let (x, y) = match gravity {
        Gravity::TopCenter => (centered_x, offset_y),
        Gravity::TopStart => (0, offset_y),
        Gravity::TopEnd => (i32::from(screen_w.saturating_sub(width)), offset_y),
        Gravity::Center => (
            centered_x,
            i32::from(screen_h.saturating_sub(height)) / 2 + offset_y,
        ),
    };
    (
        i16::try_from(x).unwrap_or(i16::MAX),
        i16::try_from(y).unwrap_or(i16::MAX),
    )
}

fn overlay_err(e: impl std::fmt::Display) -> AppError {
    AppError::Overlay(e.to_string())
}

impl OverlayWindowManager for X11Overlay {
    type Handle = Window;

    fn attach(&mut self, params: &OverlayParams) -> Result<Window, AppError> {
        let display = self
            .display
            .as_ref()
            .ok_or_else(|| AppError::Overlay("no X server connection".into()))?;
        let conn = &display.conn;

        let width = extent_px(params.width, WRAP_WIDTH);
        let height = extent_px(params.height, WRAP_HEIGHT);
        let (x, y) = place(
            params.gravity,
            display.width,
            display.height,
            width,
            height,
            params.offset_y,
        );

        let window = conn.generate_id().map_err(overlay_err)?;
        let aux = CreateWindowAux::new()
            .override_redirect(1)
            .background_pixel(display.background);

        conn.create_window(
            COPY_DEPTH_FROM_PARENT,
            window,
            display.root,
            x,
            y,
            width,
            height,
            0,
            WindowClass::INPUT_OUTPUT,
            COPY_FROM_PARENT,
            &aux,
        )
        .map_err(overlay_err)?;
        conn.change_property8(
            PropMode::REPLACE,
            window,
            AtomEnum::WM_NAME,
            AtomEnum::STRING,
            params.label.as_bytes(),
        )
        .map_err(overlay_err)?;
        conn.map_window(window).map_err(overlay_err)?;
        conn.flush().map_err(overlay_err)?;

        Ok(window)
    }

    fn detach(&mut self, window: Window) -> Result<(), AppError> {
        let display = self
            .display
            .as_ref()
            .ok_or_else(|| AppError::Overlay("no X server connection".into()))?;

        display.conn.destroy_window(window).map_err(overlay_err)?;
        display.conn.flush().map_err(overlay_err)?;
        Ok(())
    }
}
