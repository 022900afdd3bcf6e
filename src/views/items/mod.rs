pub mod gauge;
pub mod multi_select;
pub mod range_slider;
pub mod select_menu;
pub mod value_slider;
