// Single-handle float widget: `column == value`.

use eframe::egui::Color32;

use crate::data::{DataSource, Filter};
use crate::dashboard::QueryContext;
use crate::types::{ChangeEvent, Scalar};
use crate::ui_constants;
use crate::widgets::{
    default_step, SliderConfig, SliderControl, ThemeProperties, WidgetError, WidgetKind,
};

#[derive(Debug, Clone)]
pub struct FloatSlider {
    name: String,
    column: String,
    config: SliderConfig,
    stride: Option<f64>,
    min_value: f64,
    max_value: f64,
    datatile_loaded: bool,
    active_color: Color32,
    inactive_color: Color32,
    pub control: Option<SliderControl>,
}

impl FloatSlider {
    pub fn new(column: &str) -> Self {
        Self::with_config(column, SliderConfig::default())
    }

    pub fn with_config(column: &str, config: SliderConfig) -> Self {
        Self {
            name: format!("{column}_{}", WidgetKind::FloatSlider),
            column: column.to_string(),
            stride: config.step,
            config,
            min_value: 0.0,
            max_value: 0.0,
            datatile_loaded: false,
            active_color: ui_constants::DATATILE_ACTIVE_COLOR,
            inactive_color: ui_constants::DATATILE_INACTIVE_COLOR,
            control: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn value(&self) -> Option<f64> {
        self.control.as_ref().map(|c| c.value)
    }

    pub fn initiate(&mut self, data: &dyn DataSource) -> Result<(), WidgetError> {
        let (lo, hi) = data.min_max(&self.column)?;
        self.min_value = lo.as_f64().unwrap_or_default();
        self.max_value = hi.as_f64().unwrap_or_default();
        self.generate_widget();
        Ok(())
    }

    fn generate_widget(&mut self) {
        let value = self.config.value.unwrap_or(self.min_value);
        let step = self
            .stride
            .unwrap_or_else(|| default_step(self.min_value, self.max_value));
        self.control = Some(SliderControl {
            start: self.min_value,
            end: self.max_value,
            step,
            value: value.clamp(self.min_value, self.max_value),
            bar_color: self.inactive_color,
            width: self.config.width,
            height: self.config.height,
        });
        if self.stride.is_none() {
            self.stride = Some(step);
        }
    }

    pub fn set_value(&mut self, new: f64) -> Option<ChangeEvent<f64>> {
        self.control.as_mut()?.set_value(new)
    }

    pub fn compute_query(&self, ctx: &mut QueryContext) {
        let col = &self.column;
        match &self.control {
            Some(c) => {
                ctx.set_predicate(&self.name, format!("{col} == @{col}_value"));
                ctx.set_local(&format!("{col}_value"), Scalar::Float(c.value));
            }
            None => {
                ctx.remove_predicate(&self.name);
                ctx.remove_local(&format!("{col}_value"));
            }
        }
    }

    pub fn current_filter(&self) -> Option<Filter> {
        let c = self.control.as_ref()?;
        Some(Filter::Eq {
            column: self.column.clone(),
            value: Scalar::Float(c.value),
        })
    }

    pub fn datatile_loaded(&self) -> bool {
        self.datatile_loaded
    }

    pub fn set_datatile_loaded(&mut self, state: bool) {
        self.datatile_loaded = state;
        let color = if state {
            self.active_color
        } else {
            self.inactive_color
        };
        if let Some(c) = &mut self.control {
            c.bar_color = color;
        }
    }

    pub fn apply_theme(&mut self, theme: &ThemeProperties) {
        self.active_color = theme.datatile_active();
        self.inactive_color = theme.datatile_inactive();
        self.set_datatile_loaded(self.datatile_loaded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Column, ColumnTable};

    fn rating_table() -> ColumnTable {
        ColumnTable::new().with_column("rating", Column::Float(vec![1.5, 3.0, 4.5]))
    }

    #[test]
    fn value_defaults_to_min_and_binds_literal() {
        let mut w = FloatSlider::new("rating");
        w.initiate(&rating_table()).unwrap();
        assert_eq!(w.value(), Some(1.5));

        let mut ctx = QueryContext::new();
        w.compute_query(&mut ctx);
        assert_eq!(
            ctx.predicate("rating_float_slider"),
            Some("rating == @rating_value")
        );
        assert_eq!(ctx.local("rating_value"), Some(&Scalar::Float(1.5)));
    }

    #[test]
    fn change_event_carries_old_and_new() {
        let mut w = FloatSlider::new("rating");
        w.initiate(&rating_table()).unwrap();
        let ev = w.set_value(3.0).unwrap();
        assert_eq!(ev.old, 1.5);
        assert_eq!(ev.new, 3.0);
        assert!(w.set_value(3.0).is_none());
    }
}
