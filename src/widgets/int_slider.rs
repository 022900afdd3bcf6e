// Single-handle integer widget: `column == value`.

use eframe::egui::Color32;

use crate::data::{DataSource, Filter};
use crate::dashboard::QueryContext;
use crate::types::{ChangeEvent, Scalar};
use crate::ui_constants;
use crate::widgets::{SliderConfig, SliderControl, ThemeProperties, WidgetError, WidgetKind};

#[derive(Debug, Clone)]
pub struct IntSlider {
    name: String,
    column: String,
    config: SliderConfig,
    stride: Option<f64>,
    min_value: i64,
    max_value: i64,
    datatile_loaded: bool,
    active_color: Color32,
    inactive_color: Color32,
    pub control: Option<SliderControl>,
}

impl IntSlider {
    pub fn new(column: &str) -> Self {
        Self::with_config(column, SliderConfig::default())
    }

    pub fn with_config(column: &str, config: SliderConfig) -> Self {
        Self {
            name: format!("{column}_{}", WidgetKind::IntSlider),
            column: column.to_string(),
            stride: config.step,
            config,
            min_value: 0,
            max_value: 0,
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

    pub fn value(&self) -> Option<i64> {
        self.control.as_ref().map(|c| c.value as i64)
    }

    /// Probe bounds (truncated to integers) and build the control,
    /// defaulting the value to the minimum.
    pub fn initiate(&mut self, data: &dyn DataSource) -> Result<(), WidgetError> {
        let (lo, hi) = data.min_max(&self.column)?;
        self.min_value = lo.as_f64().unwrap_or_default() as i64;
        self.max_value = hi.as_f64().unwrap_or_default() as i64;
        self.generate_widget();
        Ok(())
    }

    fn generate_widget(&mut self) {
        let value = self
            .config
            .value
            .map(|v| v as i64)
            .unwrap_or(self.min_value);
        let step = self.stride.unwrap_or(1.0).max(1.0).round();
        self.control = Some(SliderControl {
            start: self.min_value as f64,
            end: self.max_value as f64,
            step,
            value: value.clamp(self.min_value, self.max_value) as f64,
            bar_color: self.inactive_color,
            width: self.config.width,
            height: self.config.height,
        });
        if self.stride.is_none() {
            self.stride = Some(step);
        }
    }

    pub fn set_value(&mut self, new: i64) -> Option<ChangeEvent<i64>> {
        let ev = self.control.as_mut()?.set_value(new as f64)?;
        Some(ChangeEvent {
            old: ev.old as i64,
            new: ev.new as i64,
        })
    }

    pub fn compute_query(&self, ctx: &mut QueryContext) {
        let col = &self.column;
        match &self.control {
            // A seeded control always has a value, so an initiated
            // slider always carries an equality predicate.
            Some(c) => {
                ctx.set_predicate(&self.name, format!("{col} == @{col}_value"));
                ctx.set_local(&format!("{col}_value"), Scalar::Int(c.value as i64));
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
            value: Scalar::Int(c.value as i64),
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

    fn visits_table() -> ColumnTable {
        ColumnTable::new().with_column("visits", Column::Float(vec![1.9, 7.2, 4.0]))
    }

    #[test]
    fn bounds_truncate_to_integers_and_value_defaults_to_min() {
        let mut w = IntSlider::new("visits");
        w.initiate(&visits_table()).unwrap();
        let c = w.control.as_ref().unwrap();
        assert_eq!(c.start, 1.0);
        assert_eq!(c.end, 7.0);
        assert_eq!(w.value(), Some(1));
    }

    #[test]
    fn initiated_slider_always_contributes_equality() {
        let mut w = IntSlider::new("visits");
        let mut ctx = QueryContext::new();
        w.compute_query(&mut ctx);
        assert!(ctx.is_empty());

        w.initiate(&visits_table()).unwrap();
        w.set_value(4).unwrap();
        w.compute_query(&mut ctx);
        assert_eq!(
            ctx.predicate("visits_int_slider"),
            Some("visits == @visits_value")
        );
        assert_eq!(ctx.local("visits_value"), Some(&Scalar::Int(4)));
        assert_eq!(
            w.current_filter(),
            Some(Filter::Eq {
                column: "visits".into(),
                value: Scalar::Int(4),
            })
        );
    }

    #[test]
    fn explicit_value_and_step_are_respected() {
        let mut w = IntSlider::with_config(
            "visits",
            SliderConfig {
                step: Some(2.0),
                value: Some(4.0),
                ..Default::default()
            },
        );
        w.initiate(&visits_table()).unwrap();
        assert_eq!(w.value(), Some(4));
        assert_eq!(w.control.as_ref().unwrap().step, 2.0);
    }
}
