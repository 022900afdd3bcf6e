// Named constants for the widget controls and panels.

use eframe::egui::Color32;

/// Distinct-value cap before a dropdown/multiselect domain gets a warning
pub const MAX_DROPDOWN_VALUES: usize = 500;

/// Default control width in logical pixels
pub const WIDGET_WIDTH: f32 = 280.0;

/// Default control height in logical pixels
pub const WIDGET_HEIGHT: f32 = 32.0;

/// Width of the right-side widgets panel
pub const PANEL_WIDTH: f32 = 320.0;

/// Slider bar color while the datatile cache for the widget is warm
pub const DATATILE_ACTIVE_COLOR: Color32 = Color32::from_rgb(124, 179, 255);

/// Slider bar color while the datatile cache is cold
pub const DATATILE_INACTIVE_COLOR: Color32 = Color32::from_gray(110);

/// Background of select-style controls
pub const SELECT_BACKGROUND: Color32 = Color32::from_rgb(30, 30, 30);

/// Gauge fill for the data size indicator
pub const DATA_SIZE_INDICATOR_COLOR: Color32 = Color32::from_rgb(111, 192, 138);

/// UI spacing constants
pub mod spacing {
    /// Small spacing (4px)
    pub const SMALL: f32 = 4.0;

    /// Medium spacing (8px)
    pub const MEDIUM: f32 = 8.0;
}

/// Control-specific layout constants
pub mod control {
    /// Border radius of control containers
    pub const ROUNDING: f32 = 6.0;

    /// Track height inside slider containers
    pub const TRACK_HEIGHT: f32 = 8.0;

    /// Horizontal margin of the track inside its container
    pub const TRACK_MARGIN_H: f32 = 16.0;

    /// Max popup height for select menus
    pub const POPUP_MAX_HEIGHT: f32 = 240.0;
}
