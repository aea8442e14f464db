//! The main window: the colored canvas plus the window-level attributes
//! (decorations, size, stacking). It owns the menu, the custom color dialog
//! and the transparency panel, and carries out the commands the menu hands
//! back.

use egui::{Color32, PointerButton, Sense};
use log::{debug, info};

use crate::color::{ColorSpec, to_hex};
use crate::config::Settings;
use crate::error::{AppError, Result};
use crate::geometry::Geometry;
use crate::ui::color_dialog::{ColorDialog, DialogOutcome};
use crate::ui::color_menu::{ColorMenu, MenuCommand};
use crate::ui::transparency::TransparencyPanel;
use crate::ui::window::WindowBackend;

/// The painted surface. Its background color and alpha are the only state
/// the other components change.
#[derive(Debug, Clone)]
pub struct Canvas {
    background: ColorSpec,
    alpha: f32,
}

impl Canvas {
    pub fn new(alpha: f32) -> Self {
        Self {
            background: ColorSpec::BLACK,
            alpha,
        }
    }

    /// Set the background from a color string. On error the background is
    /// left as it was.
    pub fn configure(&mut self, color: &str) -> Result<ColorSpec> {
        let spec = color.parse::<ColorSpec>()?;
        self.set_background(spec);
        Ok(spec)
    }

    pub fn background(&self) -> ColorSpec {
        self.background
    }

    pub fn set_background(&mut self, spec: ColorSpec) {
        self.background = spec;
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    /// Background premultiplied by the window alpha.
    pub fn fill(&self) -> Color32 {
        let c = self.background.rgb();
        let a = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), a)
    }
}

/// Swallow only the "platform can't do that" class of error.
fn best_effort(result: Result<()>) -> Result<()> {
    match result {
        Err(e) if e.is_unsupported() => {
            debug!("skipped: {e}");
            Ok(())
        }
        other => other,
    }
}

pub struct MainWindow {
    canvas: Canvas,
    fullscreen: bool,
    windowed_geometry: Geometry,
    menu: ColorMenu,
    dialog: ColorDialog,
    /// Background to restore if the custom color dialog is cancelled.
    before_preview: Option<ColorSpec>,
    panel: TransparencyPanel,
}

impl MainWindow {
    /// Build the components and apply the initial color; an unknown color
    /// silently becomes black.
    pub fn new(settings: &Settings, initial_color: &str) -> Self {
        let mut canvas = Canvas::new(settings.default_alpha);
        let panel = TransparencyPanel::new(settings);
        let mut menu = ColorMenu::new(settings);
        if !menu.apply(&mut canvas, initial_color) {
            info!("{initial_color:?} is not a color, starting with black");
        }
        Self {
            canvas,
            fullscreen: true,
            windowed_geometry: settings.windowed_geometry,
            menu,
            dialog: ColorDialog::default(),
            before_preview: None,
            panel,
        }
    }

    /// Enter fullscreen, then reveal the window. The window is revealed
    /// even if fullscreen fails.
    pub fn initialize(&mut self, backend: &mut dyn WindowBackend) -> Result<()> {
        let result = self.set_fullscreen(true, backend);
        backend.set_visible(true);
        result
    }

    pub fn set_fullscreen(&mut self, enabled: bool, backend: &mut dyn WindowBackend) -> Result<()> {
        self.fullscreen = enabled;
        if enabled {
            backend.set_decorations(false);
            best_effort(backend.set_topmost(true))?;
            if let Err(e) = backend.set_maximized(true) {
                if !e.is_unsupported() {
                    return Err(e);
                }
                let (width, height) = backend.screen_size().ok_or(AppError::ScreenSizeUnknown)?;
                let geometry = Geometry::screen(width, height);
                debug!("{e}, sizing to {geometry}");
                backend.set_geometry(geometry);
            }
        } else {
            backend.set_decorations(true);
            best_effort(backend.set_topmost(false))?;
            best_effort(backend.set_maximized(false))?;
            backend.set_geometry(self.windowed_geometry);
        }
        Ok(())
    }

    pub fn invoke(&mut self, command: MenuCommand, backend: &mut dyn WindowBackend) -> Result<()> {
        debug!("menu command {command:?}");
        match command {
            MenuCommand::SelectPreset(p) => {
                self.menu.apply(&mut self.canvas, p.name());
            }
            MenuCommand::CustomColor => {
                let seed = self.menu.last_custom().unwrap_or(Color32::BLACK);
                if self.before_preview.is_none() {
                    self.before_preview = Some(self.canvas.background());
                }
                self.dialog.open(seed);
                self.preview();
            }
            MenuCommand::ToggleFullscreen => self.set_fullscreen(!self.fullscreen, backend)?,
            MenuCommand::ShowAlpha => self.panel.show(),
            MenuCommand::Exit => backend.close(),
        }
        Ok(())
    }

    /// Paint the color being edited while the dialog is open.
    fn preview(&mut self) {
        if let Some(c) = self.dialog.editing() {
            self.canvas.set_background(ColorSpec::Custom(c));
        }
    }

    /// A cancelled dialog puts the previous background back and changes
    /// nothing else.
    pub fn finish_dialog(&mut self, outcome: DialogOutcome) {
        let before = self.before_preview.take();
        match outcome {
            DialogOutcome::Confirmed(c) => {
                self.menu.apply(&mut self.canvas, &to_hex(c));
            }
            DialogOutcome::Cancelled => {
                debug!("custom color cancelled");
                if let Some(spec) = before {
                    self.canvas.set_background(spec);
                }
            }
        }
    }

    /// One frame: paint the canvas, route menu clicks, draw the popups.
    pub fn show(&mut self, ctx: &egui::Context, backend: &mut dyn WindowBackend) -> Result<()> {
        self.preview();
        let canvas_response = egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(self.canvas.fill()))
            .show(ctx, |ui| ui.allocate_rect(ui.max_rect(), Sense::click()))
            .inner;

        if canvas_response.clicked() {
            self.menu.unpost();
        }
        let menu_button = canvas_response.clicked_by(PointerButton::Secondary)
            || canvas_response.clicked_by(PointerButton::Middle);
        if menu_button
            && !self.dialog.is_open()
            && let Some(pointer) = canvas_response.interact_pointer_pos()
        {
            self.menu.post(pointer);
        }

        let (inner, outer) = ctx.input(|i| (i.viewport().inner_rect, i.viewport().outer_rect));
        if let Some(command) = self.menu.show(ctx, self.fullscreen, inner.map(|r| r.min)) {
            self.invoke(command, backend)?;
        }
        if let Some(outcome) = self.dialog.show(ctx) {
            self.finish_dialog(outcome);
        }

        self.panel.render(ctx, &mut self.canvas, outer.map(|r| r.min));
        Ok(())
    }
}

#[cfg(test)]
impl Canvas {
    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

#[cfg(test)]
impl MainWindow {
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn menu(&self) -> &ColorMenu {
        &self.menu
    }

    pub fn dialog(&self) -> &ColorDialog {
        &self.dialog
    }

    pub fn panel(&self) -> &TransparencyPanel {
        &self.panel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Preset;
    use crate::error::WindowAttribute;
    use crate::ui::color_menu::Selection;
    use crate::ui::window::testing::{Call, RecordingBackend, host_viewports, hosted_builder};
    use crate::ui::window::{Capabilities, ViewportBackend};
    use egui::{ViewportCommand, WindowLevel};

    fn window(color: &str) -> MainWindow {
        MainWindow::new(&Settings::default(), color)
    }

    #[test]
    fn starts_black_fullscreen_with_panel_hidden() {
        let mut main = window("black");
        let mut backend = RecordingBackend::default();
        main.initialize(&mut backend).unwrap();

        assert_eq!(main.canvas().background(), ColorSpec::BLACK);
        assert_eq!(main.menu().selection(), Selection::Preset(Preset::Black));
        assert!(main.is_fullscreen());
        assert!(!main.panel().is_visible());
        assert_eq!(main.canvas().alpha(), 0.999);
        assert_eq!(
            backend.calls,
            [
                Call::Decorations(false),
                Call::Topmost(true),
                Call::Maximized(true),
                Call::Visible(true),
            ]
        );
    }

    #[test]
    fn starts_with_named_color() {
        let main = window("red");
        assert_eq!(main.canvas().background(), ColorSpec::Preset(Preset::Red));
        assert_eq!(main.menu().selection().label(), "Red");
    }

    #[test]
    fn unknown_start_color_is_black() {
        let main = window("notacolor");
        assert_eq!(main.canvas().background(), ColorSpec::BLACK);
        assert_eq!(main.menu().selection().label(), "Black");
    }

    #[test]
    fn topmost_failure_is_ignored() {
        let mut main = window("black");
        let mut backend = RecordingBackend::default().without(WindowAttribute::Topmost);
        main.set_fullscreen(true, &mut backend).unwrap();
        assert!(!backend.state.decorated);
        assert!(!backend.state.topmost);
        assert!(backend.state.maximized);
    }

    #[test]
    fn maximize_falls_back_to_screen_geometry() {
        let mut main = window("black");
        let mut backend = RecordingBackend::default().without(WindowAttribute::Maximize);
        backend.screen = Some((1280, 1024));
        main.set_fullscreen(true, &mut backend).unwrap();
        assert_eq!(backend.state.geometry, Some(Geometry::screen(1280, 1024)));
        assert_eq!(backend.state.geometry.unwrap().to_string(), "1280x1024+0+0");
    }

    #[test]
    fn missing_screen_size_is_a_real_error() {
        let mut main = window("black");
        let mut backend = RecordingBackend::default().without(WindowAttribute::Maximize);
        backend.screen = None;
        let err = main.initialize(&mut backend).unwrap_err();
        assert!(matches!(err, AppError::ScreenSizeUnknown));
        // Still revealed.
        assert!(backend.state.visible);
    }

    #[test]
    fn windowed_mode_uses_fixed_geometry() {
        let mut main = window("black");
        let mut backend = RecordingBackend::default();
        main.set_fullscreen(false, &mut backend).unwrap();
        assert!(!main.is_fullscreen());
        assert!(backend.state.decorated);
        assert!(!backend.state.topmost);
        assert!(!backend.state.maximized);
        assert_eq!(
            backend.state.geometry.map(|g| g.to_string()).as_deref(),
            Some("200x200+100+100")
        );
    }

    #[test]
    fn fullscreen_off_then_on_restores_initial_state() {
        for caps in [None, Some(WindowAttribute::Topmost), Some(WindowAttribute::Maximize)] {
            let backend = || match caps {
                Some(attr) => RecordingBackend::default().without(attr),
                None => RecordingBackend::default(),
            };
            let mut main = window("black");
            let mut first = backend();
            main.initialize(&mut first).unwrap();

            let mut toggled = backend();
            main.initialize(&mut toggled).unwrap();
            main.invoke(MenuCommand::ToggleFullscreen, &mut toggled).unwrap();
            assert!(!main.is_fullscreen());
            main.invoke(MenuCommand::ToggleFullscreen, &mut toggled).unwrap();
            assert!(main.is_fullscreen());

            assert_eq!(toggled.state, first.state, "{caps:?}");
        }
    }

    #[test]
    fn set_fullscreen_twice_is_idempotent() {
        let mut main = window("black");
        let mut once = RecordingBackend::default();
        main.set_fullscreen(true, &mut once).unwrap();
        let mut twice = RecordingBackend::default();
        main.set_fullscreen(true, &mut twice).unwrap();
        main.set_fullscreen(true, &mut twice).unwrap();
        assert_eq!(once.state, twice.state);
    }

    #[test]
    fn preset_commands_set_background() {
        let mut main = window("black");
        let mut backend = RecordingBackend::default();
        for p in Preset::ALL {
            main.invoke(MenuCommand::SelectPreset(p), &mut backend).unwrap();
            assert_eq!(main.canvas().background().rgb(), p.rgb());
            assert_eq!(main.menu().selection(), Selection::Preset(p));
        }
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn custom_color_flow() {
        let mut main = window("black");
        let mut backend = RecordingBackend::default();
        let picked = Color32::from_rgb(10, 10, 10);

        main.invoke(MenuCommand::CustomColor, &mut backend).unwrap();
        assert_eq!(main.dialog().editing(), Some(Color32::BLACK));
        main.finish_dialog(DialogOutcome::Confirmed(picked));
        assert_eq!(main.canvas().background(), ColorSpec::Custom(picked));
        assert_eq!(main.menu().selection().label(), "Custom Color");

        main.invoke(MenuCommand::SelectPreset(Preset::White), &mut backend).unwrap();
        main.invoke(MenuCommand::CustomColor, &mut backend).unwrap();
        assert_eq!(main.dialog().editing(), Some(picked));
    }

    #[test]
    fn cancelled_custom_color_changes_nothing() {
        let mut main = window("blue");
        let mut backend = RecordingBackend::default();
        main.invoke(MenuCommand::CustomColor, &mut backend).unwrap();
        main.finish_dialog(DialogOutcome::Cancelled);
        assert_eq!(main.canvas().background(), ColorSpec::Preset(Preset::Blue));
        assert_eq!(main.menu().selection(), Selection::Preset(Preset::Blue));
        assert_eq!(main.menu().last_custom(), None);
    }

    #[test]
    fn custom_color_dialog_previews_cached_color() {
        let mut main = window("#102030");
        let mut backend = RecordingBackend::default();
        let cached = Color32::from_rgb(0x10, 0x20, 0x30);
        main.invoke(MenuCommand::SelectPreset(Preset::Green), &mut backend).unwrap();

        main.invoke(MenuCommand::CustomColor, &mut backend).unwrap();
        assert_eq!(main.canvas().background(), ColorSpec::Custom(cached));
        // The radio group is untouched until the dialog is confirmed.
        assert_eq!(main.menu().selection(), Selection::Preset(Preset::Green));

        main.finish_dialog(DialogOutcome::Cancelled);
        assert_eq!(main.canvas().background(), ColorSpec::Preset(Preset::Green));
    }

    #[test]
    fn custom_color_preview_follows_picker() {
        let ctx = egui::Context::default();
        let mut main = window("red");
        let mut backend = RecordingBackend::default();
        main.invoke(MenuCommand::CustomColor, &mut backend).unwrap();
        assert_eq!(main.canvas().background(), ColorSpec::Custom(Color32::BLACK));

        let picked = Color32::from_rgb(1, 2, 3);
        main.dialog.set_editing(picked);
        frame(&ctx, &mut main, vec![]);
        assert_eq!(main.canvas().background(), ColorSpec::Custom(picked));

        main.finish_dialog(DialogOutcome::Cancelled);
        assert_eq!(main.canvas().background(), ColorSpec::Preset(Preset::Red));
    }

    #[test]
    fn alpha_and_exit_commands() {
        let mut main = window("black");
        let mut backend = RecordingBackend::default();
        main.invoke(MenuCommand::ShowAlpha, &mut backend).unwrap();
        assert!(main.panel().is_visible());
        main.invoke(MenuCommand::Exit, &mut backend).unwrap();
        assert!(backend.state.closed);
    }

    #[test]
    fn fill_carries_alpha() {
        let mut canvas = Canvas::new(0.999);
        assert_eq!(canvas.fill(), Color32::BLACK);
        canvas.set_background(ColorSpec::Preset(Preset::Red));
        canvas.set_alpha(0.0);
        assert_eq!(canvas.fill(), Color32::TRANSPARENT);
    }

    #[test]
    fn configure_error_leaves_background() {
        let mut canvas = Canvas::new(0.999);
        canvas.configure("cyan").unwrap();
        assert!(canvas.configure("#12345").is_err());
        assert_eq!(canvas.background(), ColorSpec::Preset(Preset::Cyan));
    }

    fn frame(ctx: &egui::Context, main: &mut MainWindow, events: Vec<egui::Event>) {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(800.0, 600.0),
            )),
            events,
            ..Default::default()
        };
        let mut backend = RecordingBackend::default();
        let _ = ctx.run(input, |ctx| main.show(ctx, &mut backend).unwrap());
    }

    fn button(pos: egui::Pos2, button: PointerButton, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn with_monitor(width: f32, height: f32) -> egui::RawInput {
        let mut input = egui::RawInput::default();
        input.viewports.insert(
            egui::ViewportId::ROOT,
            egui::ViewportInfo {
                monitor_size: Some(egui::vec2(width, height)),
                ..Default::default()
            },
        );
        input
    }

    #[test]
    fn x11_fullscreen_covers_whole_screen() {
        let ctx = egui::Context::default();
        let mut main = window("black");
        let output = ctx.run(with_monitor(2560.0, 1440.0), |ctx| {
            let caps = Capabilities::for_platform("linux", false);
            let mut backend = ViewportBackend::root(ctx, caps);
            main.initialize(&mut backend).unwrap();
        });
        let commands = &output.viewport_output[&egui::ViewportId::ROOT].commands;
        assert_eq!(
            commands,
            &[
                ViewportCommand::Decorations(false),
                ViewportCommand::WindowLevel(WindowLevel::AlwaysOnTop),
                ViewportCommand::InnerSize(egui::vec2(2560.0, 1440.0)),
                ViewportCommand::OuterPosition(egui::Pos2::ZERO),
                ViewportCommand::Visible(true),
            ]
        );
    }

    #[test]
    fn alpha_panel_opens_above_topmost_canvas() {
        let ctx = egui::Context::default();
        host_viewports(&ctx);
        let mut main = window("black");
        let _ = ctx.run(with_monitor(1920.0, 1080.0), |ctx| {
            let caps = Capabilities::for_platform("windows", false);
            let mut backend = ViewportBackend::root(ctx, caps);
            main.initialize(&mut backend).unwrap();
            main.invoke(MenuCommand::ShowAlpha, &mut backend).unwrap();
            main.show(ctx, &mut backend).unwrap();
        });
        let panel = hosted_builder(TransparencyPanel::viewport_id()).unwrap();
        assert_eq!(panel.window_level, Some(WindowLevel::AlwaysOnTop));
    }

    #[test]
    fn right_click_posts_menu_next_to_pointer() {
        let ctx = egui::Context::default();
        let mut main = window("black");
        let pos = egui::pos2(300.0, 200.0);

        frame(&ctx, &mut main, vec![]);
        frame(
            &ctx,
            &mut main,
            vec![
                egui::Event::PointerMoved(pos),
                button(pos, PointerButton::Secondary, true),
            ],
        );
        frame(&ctx, &mut main, vec![button(pos, PointerButton::Secondary, false)]);

        assert_eq!(main.menu().posted_at(), Some(egui::pos2(301.0, 201.0)));
    }

    #[test]
    fn primary_click_does_not_post_menu() {
        let ctx = egui::Context::default();
        let mut main = window("black");
        let pos = egui::pos2(300.0, 200.0);

        frame(&ctx, &mut main, vec![]);
        frame(
            &ctx,
            &mut main,
            vec![
                egui::Event::PointerMoved(pos),
                button(pos, PointerButton::Primary, true),
            ],
        );
        frame(&ctx, &mut main, vec![button(pos, PointerButton::Primary, false)]);

        assert_eq!(main.menu().posted_at(), None);
    }
}
