//! How on-screen keys look: caption, size and tint.

use eframe::egui::Color32;

use crate::keyboard::{category, Key, KeyCategory, KeyboardState};

/// Standard key height in points.
pub const KEY_HEIGHT: f32 = 52.0;

const KEY_WIDTH: f32 = 52.0;

/// Caption drawn on `key`, following the current Shift / Caps Lock state.
pub fn key_label(key: &Key, state: &KeyboardState) -> String {
    match key {
        Key::Char(c) if state.is_upper() => c.to_uppercase().collect(),
        Key::Char(c) => c.to_string(),
        Key::Space => "space".into(),
        Key::Return => "return".into(),
        Key::Delete => "delete".into(),
        Key::Tab => "tab".into(),
        Key::Shift => "shift".into(),
        Key::CapsLock => "caps".into(),
    }
}

pub fn key_width(key: &Key) -> f32 {
    match key {
        Key::Space => KEY_WIDTH * 7.0,
        Key::Char(_) => KEY_WIDTH,
        _ => KEY_WIDTH * 1.6,
    }
}

/// Whether `key` is a modifier that is currently latched on.
pub fn is_latched(key: &Key, state: &KeyboardState) -> bool {
    match key {
        Key::Shift => state.shift,
        Key::CapsLock => state.caps_lock,
        _ => false,
    }
}

/// Background for `key`.  Without colour coding every key is the same
/// light grey; latched modifiers are always blue.
pub fn key_fill(key: &Key, state: &KeyboardState, color_coding: bool) -> Color32 {
    if is_latched(key, state) {
        return Color32::from_rgb(70, 150, 240);
    }
    if !color_coding {
        return Color32::from_rgb(235, 235, 238);
    }
    match category(key) {
        KeyCategory::Vowel => Color32::from_rgb(221, 204, 250),
        KeyCategory::Consonant => Color32::from_rgb(254, 215, 170),
        KeyCategory::Punctuation => Color32::from_rgb(187, 247, 208),
        KeyCategory::Number => Color32::from_rgb(191, 219, 254),
        KeyCategory::Modifier => Color32::from_rgb(254, 240, 138),
        KeyCategory::Control => Color32::from_rgb(254, 202, 202),
        KeyCategory::Other => Color32::from_rgb(235, 235, 238),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_case_state() {
        let mut state = KeyboardState::default();
        assert_eq!(key_label(&Key::Char('a'), &state), "a");
        state.caps_lock = true;
        assert_eq!(key_label(&Key::Char('a'), &state), "A");
        assert_eq!(key_label(&Key::Char('?'), &state), "?");
        assert_eq!(key_label(&Key::CapsLock, &state), "caps");
    }

    #[test]
    fn space_is_the_widest_key() {
        assert!(key_width(&Key::Space) > key_width(&Key::Return));
        assert!(key_width(&Key::Return) > key_width(&Key::Char('q')));
    }

    #[test]
    fn colour_coding_distinguishes_categories() {
        let state = KeyboardState::default();
        let vowel = key_fill(&Key::Char('e'), &state, true);
        let consonant = key_fill(&Key::Char('t'), &state, true);
        assert_ne!(vowel, consonant);

        assert_eq!(
            key_fill(&Key::Char('e'), &state, false),
            key_fill(&Key::Char('t'), &state, false)
        );
    }

    #[test]
    fn latched_modifier_is_highlighted() {
        let state = KeyboardState {
            shift: true,
            caps_lock: false,
        };
        assert!(is_latched(&Key::Shift, &state));
        assert!(!is_latched(&Key::CapsLock, &state));
        assert_ne!(
            key_fill(&Key::Shift, &state, false),
            key_fill(&Key::CapsLock, &state, false)
        );
    }
}
