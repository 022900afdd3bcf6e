// Two-handle numeric range widget: `low <= column <= high`.

use eframe::egui::Color32;

use crate::data::{DataSource, Filter};
use crate::dashboard::QueryContext;
use crate::types::{ChangeEvent, Scalar};
use crate::ui_constants;
use crate::widgets::{
    default_step, RangeControl, SliderConfig, StrideType, ThemeProperties, WidgetError, WidgetKind,
};

#[derive(Debug, Clone)]
pub struct RangeSlider {
    name: String,
    column: String,
    config: SliderConfig,
    stride: Option<f64>,
    stride_type: StrideType,
    min_value: f64,
    max_value: f64,
    datatile_loaded: bool,
    active_color: Color32,
    inactive_color: Color32,
    pub control: Option<RangeControl>,
}

impl RangeSlider {
    pub fn new(column: &str) -> Self {
        Self::with_config(column, SliderConfig::default())
    }

    pub fn with_config(column: &str, config: SliderConfig) -> Self {
        Self {
            name: format!("{column}_{}", WidgetKind::RangeSlider),
            column: column.to_string(),
            stride: config.step,
            config,
            stride_type: StrideType::Int,
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

    pub fn stride(&self) -> Option<f64> {
        self.stride
    }

    pub fn stride_type(&self) -> StrideType {
        self.stride_type
    }

    /// Probe column bounds and build the control seeded at full span.
    pub fn initiate(&mut self, data: &dyn DataSource) -> Result<(), WidgetError> {
        let (lo, hi) = data.min_max(&self.column)?;
        self.min_value = lo.as_f64().unwrap_or_default();
        self.max_value = hi.as_f64().unwrap_or_default();
        self.generate_widget();
        Ok(())
    }

    fn generate_widget(&mut self) {
        // Sub-unit spans cannot step in whole numbers.
        if self.stride_type == StrideType::Int && self.max_value < 1.0 {
            self.stride_type = StrideType::Float;
        }
        let step = self.stride.unwrap_or_else(|| {
            let raw = default_step(self.min_value, self.max_value);
            match self.stride_type {
                StrideType::Int => raw.round().max(1.0),
                StrideType::Float => raw,
            }
        });
        self.control = Some(RangeControl {
            start: self.min_value,
            end: self.max_value,
            step,
            value: (self.min_value, self.max_value),
            bar_color: self.inactive_color,
            width: self.config.width,
            height: self.config.height,
        });
        if self.stride.is_none() {
            self.stride = Some(step);
        }
    }

    /// Apply a new span from the UI; returns the change if the value moved.
    pub fn set_value(&mut self, new: (f64, f64)) -> Option<ChangeEvent<(f64, f64)>> {
        self.control.as_mut()?.set_value(new)
    }

    pub fn compute_query(&self, ctx: &mut QueryContext) {
        let col = &self.column;
        match &self.control {
            Some(c) if !c.is_full_span() => {
                let (lo, hi) = c.value;
                ctx.set_predicate(&self.name, format!("@{col}_min<={col}<=@{col}_max"));
                ctx.set_local(&format!("{col}_min"), Scalar::Float(lo));
                ctx.set_local(&format!("{col}_max"), Scalar::Float(hi));
            }
            _ => {
                ctx.remove_predicate(&self.name);
                ctx.remove_local(&format!("{col}_min"));
                ctx.remove_local(&format!("{col}_max"));
            }
        }
    }

    pub fn current_filter(&self) -> Option<Filter> {
        let c = self.control.as_ref()?;
        if c.is_full_span() {
            return None;
        }
        Some(Filter::Range {
            column: self.column.clone(),
            low: c.value.0,
            high: c.value.1,
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
        // Re-apply so the bar picks up the themed color immediately.
        self.set_datatile_loaded(self.datatile_loaded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Column, ColumnTable};

    fn age_table() -> ColumnTable {
        ColumnTable::new().with_column("age", Column::Int(vec![10, 20, 30]))
    }

    fn initiated() -> RangeSlider {
        let mut w = RangeSlider::new("age");
        w.initiate(&age_table()).unwrap();
        w
    }

    #[test]
    fn full_span_contributes_no_predicate() {
        let w = initiated();
        let mut ctx = QueryContext::new();
        w.compute_query(&mut ctx);
        assert!(ctx.is_empty());
        assert!(w.current_filter().is_none());
    }

    #[test]
    fn narrowed_span_contributes_range_predicate() {
        let mut w = initiated();
        assert!(w.set_value((15.0, 25.0)).is_some());
        let mut ctx = QueryContext::new();
        w.compute_query(&mut ctx);
        assert_eq!(
            ctx.predicate("age_range_slider"),
            Some("@age_min<=age<=@age_max")
        );
        assert_eq!(ctx.local("age_min"), Some(&Scalar::Float(15.0)));
        assert_eq!(ctx.local("age_max"), Some(&Scalar::Float(25.0)));
        assert_eq!(
            w.current_filter(),
            Some(Filter::Range {
                column: "age".into(),
                low: 15.0,
                high: 25.0,
            })
        );
    }

    #[test]
    fn reverting_to_full_span_removes_entry_idempotently() {
        let mut w = initiated();
        w.set_value((15.0, 25.0));
        let mut ctx = QueryContext::new();
        w.compute_query(&mut ctx);
        w.set_value((10.0, 30.0));
        w.compute_query(&mut ctx);
        assert!(ctx.is_empty());
        assert_eq!(ctx.local("age_min"), None);
        // Removing again is a no-op.
        w.compute_query(&mut ctx);
        assert!(ctx.is_empty());
    }

    #[test]
    fn set_value_clamps_and_orders() {
        let mut w = initiated();
        let ev = w.set_value((15.0, 45.0)).unwrap();
        assert_eq!(ev.old, (10.0, 30.0));
        assert_eq!(ev.new, (15.0, 30.0));
        // Clamping back to the full span reports no change.
        assert!(w.set_value((25.0, 18.0)).is_some());
        assert_eq!(w.control.as_ref().unwrap().value, (18.0, 25.0));
        assert!(w.set_value((18.0, 25.0)).is_none());
    }

    #[test]
    fn stride_defaults_to_control_step() {
        let w = initiated();
        assert_eq!(w.stride(), Some(w.control.as_ref().unwrap().step));
        // Integer stride type keeps whole-number default steps.
        assert_eq!(w.stride_type(), StrideType::Int);
        assert_eq!(w.control.as_ref().unwrap().step, 1.0);
        let mut explicit = RangeSlider::with_config(
            "age",
            SliderConfig {
                step: Some(5.0),
                ..Default::default()
            },
        );
        explicit.initiate(&age_table()).unwrap();
        assert_eq!(explicit.stride(), Some(5.0));
        assert_eq!(explicit.control.as_ref().unwrap().step, 5.0);
    }

    #[test]
    fn int_stride_demotes_to_float_for_sub_unit_columns() {
        let table =
            ColumnTable::new().with_column("score", Column::Float(vec![0.1, 0.5, 0.9]));
        let mut w = RangeSlider::new("score");
        w.initiate(&table).unwrap();
        assert_eq!(w.stride_type(), StrideType::Float);
        // The fractional default step survives instead of rounding to 1.
        let step = w.control.as_ref().unwrap().step;
        assert!(step > 0.0 && step < 1.0);
        assert_eq!(w.stride(), Some(step));
    }

    #[test]
    fn datatile_state_recolors_bar() {
        let mut w = initiated();
        w.set_datatile_loaded(true);
        assert_eq!(
            w.control.as_ref().unwrap().bar_color,
            ui_constants::DATATILE_ACTIVE_COLOR
        );
        w.set_datatile_loaded(false);
        assert_eq!(
            w.control.as_ref().unwrap().bar_color,
            ui_constants::DATATILE_INACTIVE_COLOR
        );
    }
}
