//! The popup menu: preset colors, custom color, fullscreen, alpha and exit.
//!
//! The menu is a fixed table of entries built once; each non-separator entry
//! carries the `MenuCommand` it produces. The menu itself only tracks the
//! radio selection and the custom color cache, and hands commands back to
//! `MainWindow` to carry out.

use egui::{
    Color32, Key, Pos2, Vec2, ViewportBuilder, ViewportClass, ViewportId, WindowLevel, vec2,
};
use log::debug;

use crate::color::{ColorSpec, Preset};
use crate::config::Settings;
use crate::ui::colors::{self, EntryStyle, MENU_BACKGROUND, PLAIN};
use crate::ui::main_window::Canvas;

pub const CUSTOM_LABEL: &str = "Custom Color";
const MENU_TITLE: &str = "MCT menu";
const MENU_WIDTH: f32 = 140.0;

/// The radio group value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Preset(Preset),
    Custom,
}

impl Selection {
    pub fn label(self) -> &'static str {
        match self {
            Selection::Preset(p) => p.label(),
            Selection::Custom => CUSTOM_LABEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    SelectPreset(Preset),
    CustomColor,
    ToggleFullscreen,
    ShowAlpha,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Separator,
    Radio(Selection),
    Checkable,
    Action,
}

#[derive(Debug, Clone, Copy)]
pub struct MenuEntry {
    pub label: &'static str,
    pub kind: EntryKind,
    pub command: Option<MenuCommand>,
}

const SEPARATOR: MenuEntry = MenuEntry {
    label: "",
    kind: EntryKind::Separator,
    command: None,
};

const fn preset(label: &'static str, p: Preset) -> MenuEntry {
    MenuEntry {
        label,
        kind: EntryKind::Radio(Selection::Preset(p)),
        command: Some(MenuCommand::SelectPreset(p)),
    }
}

/// Display order of the menu.
pub const ENTRIES: [MenuEntry; 15] = [
    preset("Black", Preset::Black),
    preset("White", Preset::White),
    MenuEntry {
        label: CUSTOM_LABEL,
        kind: EntryKind::Radio(Selection::Custom),
        command: Some(MenuCommand::CustomColor),
    },
    SEPARATOR,
    preset("Red", Preset::Red),
    preset("Green", Preset::Green),
    preset("Blue", Preset::Blue),
    preset("Cyan", Preset::Cyan),
    preset("Magenta", Preset::Magenta),
    preset("Yellow", Preset::Yellow),
    SEPARATOR,
    MenuEntry {
        label: "Fullscreen",
        kind: EntryKind::Checkable,
        command: Some(MenuCommand::ToggleFullscreen),
    },
    MenuEntry {
        label: "Alpha",
        kind: EntryKind::Action,
        command: Some(MenuCommand::ShowAlpha),
    },
    SEPARATOR,
    MenuEntry {
        label: "Exit",
        kind: EntryKind::Action,
        command: Some(MenuCommand::Exit),
    },
];

pub struct ColorMenu {
    selection: Selection,
    last_custom: Option<Color32>,
    posted_at: Option<Pos2>,
    /// Set on the frame the menu is posted so the posting click does not
    /// count as a click outside it.
    just_posted: bool,
    offset: Vec2,
    active_background: Color32,
    /// Size of the menu window; measured from its content once drawn.
    size: Vec2,
    /// The menu window has had focus since it was posted.
    focused: bool,
}

impl ColorMenu {
    pub fn new(settings: &Settings) -> Self {
        Self {
            selection: Selection::Preset(Preset::Black),
            last_custom: None,
            posted_at: None,
            just_posted: false,
            offset: settings.menu_offset,
            active_background: settings.menu_active_background,
            size: settings.menu_size,
            focused: false,
        }
    }

    /// Set the canvas color from a color string.
    ///
    /// An unusable string leaves the canvas black and returns `false`. A
    /// color that is not a preset selects "Custom Color" and becomes the
    /// cached custom color.
    pub fn apply(&mut self, canvas: &mut Canvas, color: &str) -> bool {
        let (spec, applied) = match canvas.configure(color) {
            Ok(spec) => (spec, true),
            Err(e) => {
                debug!("{e}, falling back to black");
                canvas.set_background(ColorSpec::BLACK);
                (ColorSpec::BLACK, false)
            }
        };
        self.selection = match spec {
            ColorSpec::Preset(p) => Selection::Preset(p),
            ColorSpec::Custom(c) => {
                self.last_custom = Some(c);
                Selection::Custom
            }
        };
        debug!("background {spec}, selected {:?}", self.selection.label());
        applied
    }

    pub fn last_custom(&self) -> Option<Color32> {
        self.last_custom
    }

    /// Open the menu next to `pointer`, never directly under it.
    pub fn post(&mut self, pointer: Pos2) {
        self.posted_at = Some(pointer + self.offset);
        self.just_posted = true;
        self.focused = false;
    }

    pub fn unpost(&mut self) {
        self.posted_at = None;
        self.just_posted = false;
        self.focused = false;
    }

    pub fn entry_style(&self, entry: &MenuEntry) -> EntryStyle {
        match entry.kind {
            EntryKind::Radio(Selection::Preset(p)) => colors::preset_style(p),
            EntryKind::Radio(Selection::Custom) => colors::custom_style(self.last_custom),
            _ => PLAIN,
        }
    }

    pub fn viewport_id() -> ViewportId {
        ViewportId::from_hash_of("color_menu")
    }

    /// Draw the menu if posted. Returns the command of a clicked entry; the
    /// menu closes on any selection or a click outside it.
    ///
    /// The menu gets its own borderless window at `origin + posted_at`, so it
    /// can reach past a small main window. `origin` is the main window's
    /// inner top-left corner on the screen. Without multi-window support it
    /// falls back to a popup inside the main window.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        fullscreen: bool,
        origin: Option<Pos2>,
    ) -> Option<MenuCommand> {
        let pos = self.posted_at?;
        let mut builder = ViewportBuilder::default()
            .with_title(MENU_TITLE)
            .with_decorations(false)
            .with_resizable(false)
            .with_taskbar(false)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_inner_size(self.size);
        if let Some(origin) = origin {
            builder = builder.with_position(origin + pos.to_vec2());
        }

        let (chosen, dismissed) =
            ctx.show_viewport_immediate(Self::viewport_id(), builder, |ctx, class| {
                if matches!(class, ViewportClass::Embedded) {
                    self.popup_ui(ctx, pos, fullscreen)
                } else {
                    self.window_ui(ctx, fullscreen)
                }
            });

        self.just_posted = false;
        if chosen.is_some() || dismissed {
            self.unpost();
        }
        chosen
    }

    fn window_ui(
        &mut self,
        ctx: &egui::Context,
        fullscreen: bool,
    ) -> (Option<MenuCommand>, bool) {
        let frame = egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(MENU_BACKGROUND))
            .show(ctx, |ui| {
                egui::Frame::menu(ui.style())
                    .fill(MENU_BACKGROUND)
                    .show(ui, |ui| self.entries_ui(ui, fullscreen))
            })
            .inner;
        // The window follows its content from the next frame on.
        self.size = frame.response.rect.size().ceil();

        let (escape, close, focused) = ctx.input(|i| {
            (
                i.key_pressed(Key::Escape),
                i.viewport().close_requested(),
                i.viewport().focused,
            )
        });
        let lost_focus = self.focused && focused == Some(false);
        if focused == Some(true) {
            self.focused = true;
        }
        let dismissed = !self.just_posted && (escape || close || lost_focus);
        (frame.inner, dismissed)
    }

    fn popup_ui(
        &self,
        ctx: &egui::Context,
        pos: Pos2,
        fullscreen: bool,
    ) -> (Option<MenuCommand>, bool) {
        let max_height = (ctx.screen_rect().height() - 16.0).max(0.0);
        let area = egui::Area::new(egui::Id::new("color_menu"))
            .order(egui::Order::Foreground)
            .fixed_pos(pos)
            .show(ctx, |ui| {
                egui::Frame::menu(ui.style())
                    .fill(MENU_BACKGROUND)
                    .show(ui, |ui| {
                        egui::ScrollArea::vertical()
                            .max_height(max_height)
                            .show(ui, |ui| self.entries_ui(ui, fullscreen))
                            .inner
                    })
                    .inner
            });
        let dismissed = !self.just_posted && area.response.clicked_elsewhere();
        (area.inner, dismissed)
    }

    fn entries_ui(&self, ui: &mut egui::Ui, fullscreen: bool) -> Option<MenuCommand> {
        ui.set_min_width(MENU_WIDTH);
        ui.spacing_mut().item_spacing = vec2(0.0, 2.0);
        let mut chosen = None;
        for entry in &ENTRIES {
            if let Some(command) = self.entry_ui(ui, entry, fullscreen) {
                chosen = Some(command);
            }
        }
        chosen
    }

    fn entry_ui(
        &self,
        ui: &mut egui::Ui,
        entry: &MenuEntry,
        fullscreen: bool,
    ) -> Option<MenuCommand> {
        let style = self.entry_style(entry);
        let response = ui
            .scope(|ui| {
                let widgets = &mut ui.visuals_mut().widgets;
                widgets.inactive.fg_stroke.color = style.foreground;
                widgets.inactive.weak_bg_fill = Color32::TRANSPARENT;
                widgets.inactive.bg_stroke = egui::Stroke::NONE;
                for active in [&mut widgets.hovered, &mut widgets.active] {
                    active.fg_stroke.color = style.active_foreground;
                    active.weak_bg_fill = self.active_background;
                }

                match entry.kind {
                    EntryKind::Separator => {
                        ui.separator();
                        None
                    }
                    EntryKind::Radio(selection) => {
                        Some(ui.radio(self.selection == selection, entry.label))
                    }
                    EntryKind::Checkable => {
                        let mut checked = fullscreen;
                        Some(ui.checkbox(&mut checked, entry.label))
                    }
                    EntryKind::Action => {
                        Some(ui.add(egui::Button::new(entry.label).min_size(vec2(MENU_WIDTH, 0.0))))
                    }
                }
            })
            .inner?;
        if response.clicked() { entry.command } else { None }
    }
}

#[cfg(test)]
impl ColorMenu {
    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn posted_at(&self) -> Option<Pos2> {
        self.posted_at
    }
}
