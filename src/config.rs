//! Fixed application settings.
//!
//! There is no config file; every value here is a compile-time default and the
//! only runtime input is the initial color from the command line.

use std::ops::RangeInclusive;

use egui::{Color32, Vec2, vec2};

use crate::geometry::Geometry;

pub const APP_TITLE: &str = "MCT";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Placement of the main window when fullscreen is switched off.
    pub windowed_geometry: Geometry,
    /// Slider range; the upper bound stays below 1.0 and the lower bound is
    /// never reached by the guard.
    pub alpha_range: RangeInclusive<f32>,
    pub default_alpha: f32,
    /// On the 0-255 scale, below this the transparency panel refuses to close.
    pub close_guard_level: u8,
    /// Menu is posted this far from the pointer.
    pub menu_offset: Vec2,
    /// Transparency panel position relative to the main window's corner.
    pub panel_offset: Vec2,
    pub panel_size: Vec2,
    /// Menu window size before its content has been measured.
    pub menu_size: Vec2,
    /// Highlight behind the hovered menu entry.
    pub menu_active_background: Color32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            windowed_geometry: Geometry::new(200, 200, 100, 100),
            alpha_range: 0.0..=0.999,
            default_alpha: 0.999,
            close_guard_level: 50,
            menu_offset: vec2(1.0, 1.0),
            panel_offset: vec2(40.0, 40.0),
            panel_size: vec2(260.0, 72.0),
            menu_size: vec2(150.0, 290.0),
            menu_active_background: Color32::from_rgb(0x20, 0x20, 0x20),
        }
    }
}

impl Settings {
    pub fn clamp_alpha(&self, value: f32) -> f32 {
        value.clamp(*self.alpha_range.start(), *self.alpha_range.end())
    }
}
