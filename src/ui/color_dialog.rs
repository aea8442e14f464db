//! Modal custom-color chooser.

use egui::{Align2, Color32, DragValue};
use egui::color_picker::{Alpha, color_picker_color32};

use crate::color::to_hex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Confirmed(Color32),
    Cancelled,
}

/// Holds the color being edited while the dialog is open.
#[derive(Default)]
pub struct ColorDialog {
    editing: Option<Color32>,
}

impl ColorDialog {
    pub fn open(&mut self, seed: Color32) {
        self.editing = Some(seed);
    }

    pub fn is_open(&self) -> bool {
        self.editing.is_some()
    }

    /// The color currently picked, while the dialog is open.
    pub fn editing(&self) -> Option<Color32> {
        self.editing
    }

    pub fn set_editing(&mut self, color: Color32) {
        if self.editing.is_some() {
            self.editing = Some(color);
        }
    }

    pub fn confirm(&mut self) -> Option<DialogOutcome> {
        self.editing.take().map(DialogOutcome::Confirmed)
    }

    pub fn cancel(&mut self) -> Option<DialogOutcome> {
        self.editing.take().map(|_| DialogOutcome::Cancelled)
    }

    /// Draw the dialog. Returns once the user confirms or cancels.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<DialogOutcome> {
        let mut color = self.editing?;
        let mut open = true;
        let mut confirmed = false;
        let mut cancelled = false;

        egui::Window::new("Custom Color")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                color_picker_color32(ui, &mut color, Alpha::Opaque);

                ui.horizontal(|ui| {
                    let [mut r, mut g, mut b, _] = color.to_array();
                    ui.label("R");
                    ui.add(DragValue::new(&mut r));
                    ui.label("G");
                    ui.add(DragValue::new(&mut g));
                    ui.label("B");
                    ui.add(DragValue::new(&mut b));
                    color = Color32::from_rgb(r, g, b);
                });
                ui.label(to_hex(color));

                ui.separator();
                ui.horizontal(|ui| {
                    confirmed = ui.button("OK").clicked();
                    cancelled = ui.button("Cancel").clicked();
                });
            });

        self.set_editing(color);
        if confirmed {
            self.confirm()
        } else if cancelled || !open {
            self.cancel()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        let mut dialog = ColorDialog::default();
        assert!(!dialog.is_open());
        assert_eq!(dialog.confirm(), None);
        assert_eq!(dialog.cancel(), None);
    }

    #[test]
    fn confirm_returns_edited_color() {
        let mut dialog = ColorDialog::default();
        dialog.open(Color32::BLACK);
        assert_eq!(dialog.editing(), Some(Color32::BLACK));
        dialog.set_editing(Color32::from_rgb(10, 10, 10));
        assert_eq!(
            dialog.confirm(),
            Some(DialogOutcome::Confirmed(Color32::from_rgb(10, 10, 10)))
        );
        assert!(!dialog.is_open());
    }

    #[test]
    fn cancel_discards_edits() {
        let mut dialog = ColorDialog::default();
        dialog.open(Color32::WHITE);
        dialog.set_editing(Color32::from_rgb(1, 2, 3));
        assert_eq!(dialog.cancel(), Some(DialogOutcome::Cancelled));
        assert_eq!(dialog.editing(), None);
    }

    #[test]
    fn editing_requires_open_dialog() {
        let mut dialog = ColorDialog::default();
        dialog.set_editing(Color32::RED);
        assert!(!dialog.is_open());
    }

    #[test]
    fn open_dialog_renders_without_result() {
        let mut dialog = ColorDialog::default();
        dialog.open(Color32::from_rgb(10, 10, 10));
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            assert_eq!(dialog.show(ctx), None);
        });
        assert!(dialog.is_open());
    }
}
