// Theme properties applied to widget controls. Loaded from an optional
// theme.json next to the executable; anything missing or malformed
// falls back to the built-in colors.

use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

use crate::ui_constants;

const THEME_FILE: &str = "theme.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThemeProperties {
    #[serde(default)]
    pub widgets: WidgetTheme,
    /// Gauge fill for the data size indicator, "#rrggbb"
    #[serde(default)]
    pub data_size_indicator_color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WidgetTheme {
    /// Slider bar color while datatiles are warm, "#rrggbb"
    #[serde(default)]
    pub datatile_active_color: Option<String>,
    /// Slider bar color while datatiles are cold, "#rrggbb"
    #[serde(default)]
    pub datatile_inactive_color: Option<String>,
    /// Background of select-style controls, "#rrggbb"
    #[serde(default)]
    pub background_color: Option<String>,
}

impl ThemeProperties {
    pub fn load_from_disk() -> Self {
        match std::fs::read_to_string(THEME_FILE) {
            Ok(raw) => match serde_json::from_str::<ThemeProperties>(&raw) {
                Ok(theme) => theme,
                Err(e) => {
                    log::warn!("{THEME_FILE} is malformed, using default theme: {e}");
                    ThemeProperties::default()
                }
            },
            // Missing file is the normal case.
            Err(_) => ThemeProperties::default(),
        }
    }

    pub fn datatile_active(&self) -> Color32 {
        color_or(
            self.widgets.datatile_active_color.as_deref(),
            ui_constants::DATATILE_ACTIVE_COLOR,
        )
    }

    pub fn datatile_inactive(&self) -> Color32 {
        color_or(
            self.widgets.datatile_inactive_color.as_deref(),
            ui_constants::DATATILE_INACTIVE_COLOR,
        )
    }

    pub fn select_background(&self) -> Color32 {
        color_or(
            self.widgets.background_color.as_deref(),
            ui_constants::SELECT_BACKGROUND,
        )
    }

    pub fn data_size_indicator(&self) -> Color32 {
        color_or(
            self.data_size_indicator_color.as_deref(),
            ui_constants::DATA_SIZE_INDICATOR_COLOR,
        )
    }
}

fn color_or(hex: Option<&str>, fallback: Color32) -> Color32 {
    hex.and_then(parse_color).unwrap_or(fallback)
}

/// Parse "#rrggbb" (leading '#' optional).
pub fn parse_color(s: &str) -> Option<Color32> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color32::from_rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_color("#ff0080"), Some(Color32::from_rgb(255, 0, 128)));
        assert_eq!(parse_color("102030"), Some(Color32::from_rgb(16, 32, 48)));
        assert_eq!(parse_color("#zzz"), None);
        assert_eq!(parse_color(""), None);
    }

    #[test]
    fn defaults_apply_when_fields_are_absent() {
        let theme: ThemeProperties = serde_json::from_str("{}").unwrap();
        assert_eq!(
            theme.datatile_active(),
            ui_constants::DATATILE_ACTIVE_COLOR
        );
        assert_eq!(
            theme.select_background(),
            ui_constants::SELECT_BACKGROUND
        );
    }

    #[test]
    fn configured_colors_override_defaults() {
        let theme: ThemeProperties = serde_json::from_str(
            r##"{"widgets": {"datatile_active_color": "#010203"}}"##,
        )
        .unwrap();
        assert_eq!(theme.datatile_active(), Color32::from_rgb(1, 2, 3));
        assert_eq!(
            theme.datatile_inactive(),
            ui_constants::DATATILE_INACTIVE_COLOR
        );
    }
}
