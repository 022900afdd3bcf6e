pub mod items;
pub mod panel;
pub mod ui_helpers;
