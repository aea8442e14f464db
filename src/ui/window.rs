//! The `WindowBackend` trait: the narrow set of native-window operations the
//! components need, and its eframe implementation.
//!
//! Components never hold an `egui::Context` for window management; they are
//! handed a backend for the duration of a call. Operations that a platform
//! may not offer return `AppError::Unsupported` so callers can skip them
//! without hiding other failures.

use egui::{ViewportCommand, ViewportId, WindowLevel};
use log::debug;

use crate::error::{AppError, Result, WindowAttribute};
use crate::geometry::Geometry;

pub trait WindowBackend {
    fn set_visible(&mut self, visible: bool);

    fn set_decorations(&mut self, decorated: bool);

    /// Best-effort.
    fn set_topmost(&mut self, topmost: bool) -> Result<()>;

    /// Best-effort; callers fall back to an explicit geometry.
    fn set_maximized(&mut self, maximized: bool) -> Result<()>;

    fn set_geometry(&mut self, geometry: Geometry);

    /// Pixel size of the screen the window is on, if the platform reports it.
    fn screen_size(&self) -> Option<(u32, u32)>;

    fn close(&mut self);
}

/// What the running platform can do with window levels.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    pub topmost: bool,
    pub maximize: bool,
}

impl Capabilities {
    pub fn detect() -> Self {
        let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
        Self::for_platform(std::env::consts::OS, wayland)
    }

    /// Wayland compositors ignore client window-level requests. X11 window
    /// managers maximize an undecorated window to the work area, not the
    /// whole screen, so there the window is sized to the screen instead.
    pub fn for_platform(os: &str, wayland: bool) -> Self {
        let linux = matches!(os, "linux" | "freebsd" | "dragonfly" | "netbsd" | "openbsd");
        Self {
            topmost: !(linux && wayland),
            maximize: !linux || wayland,
        }
    }
}

/// Drives one egui viewport through `ViewportCommand`s.
pub struct ViewportBackend<'a> {
    ctx: &'a egui::Context,
    id: ViewportId,
    caps: Capabilities,
}

impl<'a> ViewportBackend<'a> {
    pub fn new(ctx: &'a egui::Context, id: ViewportId, caps: Capabilities) -> Self {
        Self { ctx, id, caps }
    }

    pub fn root(ctx: &'a egui::Context, caps: Capabilities) -> Self {
        Self::new(ctx, ViewportId::ROOT, caps)
    }

    fn send(&self, command: ViewportCommand) {
        debug!("viewport {:?}: {command:?}", self.id);
        self.ctx.send_viewport_cmd_to(self.id, command);
    }
}

impl WindowBackend for ViewportBackend<'_> {
    fn set_visible(&mut self, visible: bool) {
        self.send(ViewportCommand::Visible(visible));
    }

    fn set_decorations(&mut self, decorated: bool) {
        self.send(ViewportCommand::Decorations(decorated));
    }

    fn set_topmost(&mut self, topmost: bool) -> Result<()> {
        if !self.caps.topmost {
            return Err(AppError::Unsupported(WindowAttribute::Topmost));
        }
        let level = if topmost {
            WindowLevel::AlwaysOnTop
        } else {
            WindowLevel::Normal
        };
        self.send(ViewportCommand::WindowLevel(level));
        Ok(())
    }

    fn set_maximized(&mut self, maximized: bool) -> Result<()> {
        if !self.caps.maximize {
            return Err(AppError::Unsupported(WindowAttribute::Maximize));
        }
        self.send(ViewportCommand::Maximized(maximized));
        Ok(())
    }

    fn set_geometry(&mut self, geometry: Geometry) {
        self.send(ViewportCommand::InnerSize(geometry.size()));
        self.send(ViewportCommand::OuterPosition(geometry.position()));
    }

    fn screen_size(&self) -> Option<(u32, u32)> {
        let size = self
            .ctx
            .input(|i| i.raw.viewports.get(&self.id).and_then(|v| v.monitor_size))?;
        Some((size.x.round() as u32, size.y.round() as u32))
    }

    fn close(&mut self) {
        self.send(ViewportCommand::Close);
    }
}
