// Two-handle date range widget over a datetime column (epoch ms). The
// column type is validated before any control is built.

use eframe::egui::Color32;

use crate::data::{DataSource, Filter};
use crate::dashboard::QueryContext;
use crate::types::{ChangeEvent, DType, Scalar};
use crate::ui_constants;
use crate::widgets::{RangeControl, SliderConfig, ThemeProperties, WidgetError, WidgetKind};

#[derive(Debug, Clone)]
pub struct DateRangeSlider {
    name: String,
    column: String,
    config: SliderConfig,
    data_points: Option<usize>,
    stride: f64,
    min_value: i64,
    max_value: i64,
    datatile_loaded: bool,
    active_color: Color32,
    inactive_color: Color32,
    pub control: Option<RangeControl>,
}

impl DateRangeSlider {
    pub fn new(column: &str) -> Self {
        Self::with_config(column, SliderConfig::default())
    }

    pub fn with_config(column: &str, config: SliderConfig) -> Self {
        Self {
            name: format!("{column}_{}", WidgetKind::DateRangeSlider),
            column: column.to_string(),
            data_points: config.data_points,
            config,
            stride: 0.0,
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

    pub fn data_points(&self) -> Option<usize> {
        self.data_points
    }

    pub fn stride(&self) -> f64 {
        self.stride
    }

    /// Validate the column type, probe bounds and distinct count, then
    /// build the control seeded at full span.
    pub fn initiate(&mut self, data: &dyn DataSource) -> Result<(), WidgetError> {
        let dtype = data.dtype(&self.column)?;
        if dtype != DType::DateTime {
            return Err(WidgetError::NotDatetime {
                widget: "DateRangeSlider",
                column: self.column.clone(),
                dtype,
            });
        }
        let (lo, hi) = data.min_max(&self.column)?;
        self.min_value = lo.as_f64().unwrap_or_default() as i64;
        self.max_value = hi.as_f64().unwrap_or_default() as i64;
        if self.data_points.is_none() {
            self.data_points = Some(data.distinct_count(&self.column)?);
        }
        self.compute_stride();
        self.generate_widget();
        Ok(())
    }

    fn compute_stride(&mut self) {
        let points = self.data_points.unwrap_or(1).max(1);
        self.stride = (self.max_value - self.min_value) as f64 / points as f64;
    }

    fn generate_widget(&mut self) {
        self.control = Some(RangeControl {
            start: self.min_value as f64,
            end: self.max_value as f64,
            step: self.stride.max(1.0),
            value: (self.min_value as f64, self.max_value as f64),
            bar_color: self.inactive_color,
            width: self.config.width,
            height: self.config.height,
        });
    }

    /// Apply a new span (epoch ms) from the UI.
    pub fn set_value(&mut self, new: (i64, i64)) -> Option<ChangeEvent<(i64, i64)>> {
        let ev = self
            .control
            .as_mut()?
            .set_value((new.0 as f64, new.1 as f64))?;
        Some(ChangeEvent {
            old: (ev.old.0 as i64, ev.old.1 as i64),
            new: (ev.new.0 as i64, ev.new.1 as i64),
        })
    }

    pub fn compute_query(&self, ctx: &mut QueryContext) {
        let col = &self.column;
        match &self.control {
            Some(c) if !c.is_full_span() => {
                let (lo, hi) = c.value;
                ctx.set_predicate(&self.name, format!("@{col}_min<={col}<=@{col}_max"));
                ctx.set_local(&format!("{col}_min"), Scalar::DateTime(lo as i64));
                ctx.set_local(&format!("{col}_max"), Scalar::DateTime(hi as i64));
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
        self.set_datatile_loaded(self.datatile_loaded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Column, ColumnTable};

    const DAY_MS: i64 = 86_400_000;

    fn date_table() -> ColumnTable {
        // Four days, three distinct.
        ColumnTable::new().with_column(
            "signup",
            Column::DateTime(vec![0, DAY_MS, 2 * DAY_MS, DAY_MS]),
        )
    }

    #[test]
    fn non_datetime_column_fails_before_control_exists() {
        let table = ColumnTable::new().with_column("age", Column::Int(vec![1, 2]));
        let mut w = DateRangeSlider::new("age");
        let err = w.initiate(&table).unwrap_err();
        assert!(matches!(err, WidgetError::NotDatetime { .. }));
        assert!(w.control.is_none());
    }

    #[test]
    fn data_points_defaults_to_distinct_count() {
        let mut w = DateRangeSlider::new("signup");
        w.initiate(&date_table()).unwrap();
        assert_eq!(w.data_points(), Some(3));
        assert_eq!(w.stride(), (2 * DAY_MS) as f64 / 3.0);
    }

    #[test]
    fn narrowed_span_binds_datetime_literals() {
        let mut w = DateRangeSlider::new("signup");
        w.initiate(&date_table()).unwrap();
        let mut ctx = QueryContext::new();
        w.compute_query(&mut ctx);
        assert!(ctx.is_empty());

        w.set_value((DAY_MS, 2 * DAY_MS)).unwrap();
        w.compute_query(&mut ctx);
        assert_eq!(
            ctx.predicate("signup_date_range_slider"),
            Some("@signup_min<=signup<=@signup_max")
        );
        assert_eq!(ctx.local("signup_min"), Some(&Scalar::DateTime(DAY_MS)));
        assert_eq!(
            ctx.local("signup_max"),
            Some(&Scalar::DateTime(2 * DAY_MS))
        );

        w.set_value((0, 2 * DAY_MS)).unwrap();
        w.compute_query(&mut ctx);
        assert!(ctx.is_empty());
    }
}
