//! The "Alpha" panel: a slider controlling the main window's opacity.
//!
//! The panel lives in its own viewport. It starts hidden, and closing it only
//! hides it so the slider position survives. While the opacity shown on the
//! 0-255 scale is below the guard level the panel refuses to close, so the
//! main window can't be left nearly invisible with no way back.

use std::ops::RangeInclusive;

use egui::{
    Pos2, Vec2, ViewportBuilder, ViewportClass, ViewportCommand, ViewportId, WindowLevel,
};
use log::debug;

use crate::config::Settings;
use crate::ui::main_window::Canvas;

/// Opacity on the 0-255 scale, after rounding to two decimals. Ties round to
/// even, so 0.125 shows as 0.12.
pub fn display_level(value: f32) -> u8 {
    let rounded = (f64::from(value) * 100.0).round_ties_even() / 100.0;
    (rounded * 255.0) as u8
}

pub struct TransparencyPanel {
    visible: bool,
    value: f32,
    close_enabled: bool,
    guard_level: u8,
    range: RangeInclusive<f32>,
    offset: Vec2,
    size: Vec2,
}

impl TransparencyPanel {
    pub fn new(settings: &Settings) -> Self {
        let value = settings.clamp_alpha(settings.default_alpha);
        Self {
            visible: false,
            value,
            close_enabled: display_level(value) >= settings.close_guard_level,
            guard_level: settings.close_guard_level,
            range: settings.alpha_range.clone(),
            offset: settings.panel_offset,
            size: settings.panel_size,
        }
    }

    pub fn viewport_id() -> ViewportId {
        ViewportId::from_hash_of("alpha_panel")
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn label(&self) -> String {
        format!("Alpha {} :", display_level(self.value))
    }

    /// Slider moved: apply the opacity immediately and re-evaluate the guard.
    pub fn on_change(&mut self, value: f32, canvas: &mut Canvas) -> u8 {
        let value = value.clamp(*self.range.start(), *self.range.end());
        self.value = value;
        canvas.set_alpha(value);

        let level = display_level(value);
        let close_enabled = level >= self.guard_level;
        if close_enabled != self.close_enabled {
            debug!("alpha level {level}, close enabled: {close_enabled}");
        }
        self.close_enabled = close_enabled;
        level
    }

    /// Hide the panel unless the guard is active. Returns whether it closed.
    pub fn request_close(&mut self) -> bool {
        if self.close_enabled {
            self.visible = false;
        }
        self.close_enabled
    }

    /// Draw the panel next to `anchor`, the main window's top-left corner.
    /// The panel stacks above the main window, which may itself be topmost.
    pub fn render(&mut self, ctx: &egui::Context, canvas: &mut Canvas, anchor: Option<Pos2>) {
        if !self.visible {
            return;
        }

        let title = self.label();
        let mut builder = ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size(self.size)
            .with_min_inner_size([160.0, self.size.y])
            .with_max_inner_size([4096.0, self.size.y])
            .with_resizable(true)
            .with_taskbar(false)
            .with_window_level(WindowLevel::AlwaysOnTop);
        if let Some(anchor) = anchor {
            builder = builder.with_position(anchor + self.offset);
        }

        ctx.show_viewport_immediate(Self::viewport_id(), builder, |ctx, class| {
            if matches!(class, ViewportClass::Embedded) {
                let mut open = true;
                egui::Window::new(title.as_str())
                    .id(egui::Id::new("alpha_panel"))
                    .collapsible(false)
                    .resizable([true, false])
                    .open(&mut open)
                    .show(ctx, |ui| self.slider_ui(ui, canvas));
                if !open {
                    self.request_close();
                }
            } else {
                egui::CentralPanel::default().show(ctx, |ui| self.slider_ui(ui, canvas));
                if ctx.input(|i| i.viewport().close_requested()) && !self.request_close() {
                    ctx.send_viewport_cmd(ViewportCommand::CancelClose);
                }
            }
        });
    }

    fn slider_ui(&mut self, ui: &mut egui::Ui, canvas: &mut Canvas) {
        ui.label(self.label());
        let width = ui.available_width();
        ui.spacing_mut().slider_width = width;
        let mut value = self.value;
        let slider = egui::Slider::new(&mut value, self.range.clone()).show_value(false);
        if ui.add(slider).changed() {
            self.on_change(value, canvas);
        }
    }
}

#[cfg(test)]
impl TransparencyPanel {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn close_enabled(&self) -> bool {
        self.close_enabled
    }
}
