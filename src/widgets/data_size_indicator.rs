// Read-only gauge of the rows passing all active filters. Contributes
// nothing to the query context.

use eframe::egui::Color32;

use crate::data::DataSource;
use crate::ui_constants;
use crate::widgets::{SliderControl, ThemeProperties};

/// `{X, Y}` series handed in by the controller; only `Y[0]` matters here.
#[derive(Debug, Clone, Default)]
pub struct SourceData {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct DataSizeIndicator {
    name: String,
    max_value: f64,
    source: f64,
    source_backup: f64,
    bar_color: Color32,
    width: f32,
    pub control: Option<SliderControl>,
}

impl Default for DataSizeIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSizeIndicator {
    pub fn new() -> Self {
        Self {
            name: "data_size_indicator".to_string(),
            max_value: 0.0,
            source: 0.0,
            source_backup: 0.0,
            bar_color: ui_constants::DATA_SIZE_INDICATOR_COLOR,
            width: ui_constants::WIDGET_WIDTH,
            control: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Size the gauge to the unfiltered row count and seed it full.
    pub fn initiate(&mut self, data: &dyn DataSource) {
        self.max_value = data.row_count() as f64;
        self.generate_chart();
        self.format_source_data(
            &SourceData {
                x: Vec::new(),
                y: vec![self.max_value],
            },
            false,
        );
    }

    fn generate_chart(&mut self) {
        self.control = Some(SliderControl {
            start: 0.0,
            end: self.max_value,
            step: 1.0,
            value: self.max_value,
            bar_color: self.bar_color,
            width: self.width,
            height: ui_constants::WIDGET_HEIGHT,
        });
    }

    /// Displayed (possibly patched) value.
    pub fn get_source_y_axis(&self) -> f64 {
        self.control.as_ref().map(|c| c.value).unwrap_or(self.source)
    }

    /// Patch updates move the displayed value only; full updates also
    /// keep a backup of the original for `reset_chart`.
    pub fn format_source_data(&mut self, source: &SourceData, patch_update: bool) {
        let y = source.y.first().copied().unwrap_or(0.0);
        if patch_update {
            if let Some(c) = &mut self.control {
                c.value = y.clamp(c.start, c.end);
            }
        } else {
            self.source = y;
            self.source_backup = y;
            if let Some(c) = &mut self.control {
                c.value = y.clamp(c.start, c.end);
            }
        }
    }

    /// `-1.0` restores the backed-up original; any other value is an
    /// explicit override.
    pub fn reset_chart(&mut self, data: f64) {
        let value = if data == -1.0 { self.source_backup } else { data };
        if let Some(c) = &mut self.control {
            c.value = value.clamp(c.start, c.end);
        }
    }

    pub fn apply_theme(&mut self, theme: &ThemeProperties) {
        self.bar_color = theme.data_size_indicator();
        if let Some(c) = &mut self.control {
            c.bar_color = self.bar_color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Column, ColumnTable};

    fn thousand_rows() -> ColumnTable {
        ColumnTable::new().with_column("id", Column::Int((0..1000).collect()))
    }

    #[test]
    fn patch_updates_display_and_reset_restores_backup() {
        let mut gauge = DataSizeIndicator::new();
        gauge.initiate(&thousand_rows());
        assert_eq!(gauge.max_value(), 1000.0);
        assert_eq!(gauge.get_source_y_axis(), 1000.0);

        gauge.format_source_data(
            &SourceData {
                x: Vec::new(),
                y: vec![420.0],
            },
            true,
        );
        assert_eq!(gauge.get_source_y_axis(), 420.0);

        gauge.reset_chart(-1.0);
        assert_eq!(gauge.get_source_y_axis(), 1000.0);
    }

    #[test]
    fn explicit_reset_overrides_display() {
        let mut gauge = DataSizeIndicator::new();
        gauge.initiate(&thousand_rows());
        gauge.reset_chart(77.0);
        assert_eq!(gauge.get_source_y_axis(), 77.0);
    }

    #[test]
    fn non_patch_update_moves_the_backup() {
        let mut gauge = DataSizeIndicator::new();
        gauge.initiate(&thousand_rows());
        gauge.format_source_data(
            &SourceData {
                x: Vec::new(),
                y: vec![500.0],
            },
            false,
        );
        gauge.reset_chart(-1.0);
        assert_eq!(gauge.get_source_y_axis(), 500.0);
    }
}
