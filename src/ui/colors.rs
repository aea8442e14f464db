//! Text colors for the color menu entries.

use egui::Color32;

use crate::color::Preset;

/// Foreground of a menu entry, normally and while highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryStyle {
    pub foreground: Color32,
    pub active_foreground: Color32,
}

/// Black text that turns white on the dark highlight.
pub const PLAIN: EntryStyle = EntryStyle {
    foreground: Color32::BLACK,
    active_foreground: Color32::WHITE,
};

/// Background of the popup itself.
pub const MENU_BACKGROUND: Color32 = Color32::from_rgb(0xd9, 0xd9, 0xd9);

/// Chromatic presets preview themselves; black and white would be invisible
/// on the menu or its highlight, so they use the plain style.
pub fn preset_style(preset: Preset) -> EntryStyle {
    if preset.is_achromatic() {
        return PLAIN;
    }
    let c = preset.rgb();
    EntryStyle {
        foreground: c,
        active_foreground: c,
    }
}

/// The custom entry previews the last custom color once there is one.
pub fn custom_style(last_custom: Option<Color32>) -> EntryStyle {
    match last_custom {
        Some(c) => EntryStyle {
            foreground: c,
            active_foreground: c,
        },
        None => PLAIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_and_white_use_plain_text() {
        assert_eq!(preset_style(Preset::Black), PLAIN);
        assert_eq!(preset_style(Preset::White), PLAIN);
    }

    #[test]
    fn chromatic_presets_preview_themselves() {
        for p in Preset::ALL.into_iter().filter(|p| !p.is_achromatic()) {
            let style = preset_style(p);
            assert_eq!(style.foreground, p.rgb());
            assert_eq!(style.active_foreground, p.rgb());
        }
    }

    #[test]
    fn custom_entry_follows_cache() {
        assert_eq!(custom_style(None), PLAIN);
        let c = Color32::from_rgb(10, 10, 10);
        assert_eq!(custom_style(Some(c)).foreground, c);
    }
}
