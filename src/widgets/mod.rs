// Filter widgets: each binds a control to one column of the dataset and
// follows the same lifecycle — probe the data for bounds or a domain,
// build the control, surface typed change events, contribute a predicate
// to the shared query context.

pub mod data_size_indicator;
pub mod date_range_slider;
pub mod dropdown;
pub mod float_slider;
pub mod int_slider;
pub mod multi_select;
pub mod range_slider;
pub mod theme;

pub use data_size_indicator::{DataSizeIndicator, SourceData};
pub use date_range_slider::DateRangeSlider;
pub use dropdown::DropDown;
pub use float_slider::FloatSlider;
pub use int_slider::IntSlider;
pub use multi_select::MultiSelect;
pub use range_slider::RangeSlider;
pub use theme::ThemeProperties;

use eframe::egui::Color32;
use thiserror::Error;

use crate::data::{DataError, DataSource, Filter};
use crate::dashboard::QueryContext;
use crate::types::{ChangeEvent, DType};
use crate::ui_constants;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("{widget}: column '{column}' must be a datetime column, got {dtype}")]
    NotDatetime {
        widget: &'static str,
        column: String,
        dtype: DType,
    },

    #[error(transparent)]
    Data(#[from] DataError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum WidgetKind {
    RangeSlider,
    DateRangeSlider,
    IntSlider,
    FloatSlider,
    DropDown,
    MultiSelect,
    DataSizeIndicator,
}

/// Step type for slider widgets. Integer strides demote to float when
/// the column maximum is below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrideType {
    Int,
    Float,
}

/// Recognized slider options; anything unset falls back to the control's
/// own defaults.
#[derive(Debug, Clone)]
pub struct SliderConfig {
    pub step: Option<f64>,
    pub value: Option<f64>,
    /// Date sliders: number of points the span is divided into.
    pub data_points: Option<usize>,
    pub width: f32,
    pub height: f32,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            step: None,
            value: None,
            data_points: None,
            width: ui_constants::WIDGET_WIDTH,
            height: ui_constants::WIDGET_HEIGHT,
        }
    }
}

/// Recognized options for select-style widgets.
#[derive(Debug, Clone)]
pub struct SelectConfig {
    /// Explicit (label, value) domain. When absent the domain is
    /// extracted from the dataset's unique values.
    pub label_map: Option<Vec<(String, String)>>,
    pub width: f32,
    pub height: f32,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            label_map: None,
            width: ui_constants::WIDGET_WIDTH,
            height: ui_constants::WIDGET_HEIGHT,
        }
    }
}

/// Two-handle range control state.
#[derive(Debug, Clone)]
pub struct RangeControl {
    pub start: f64,
    pub end: f64,
    pub step: f64,
    pub value: (f64, f64),
    pub bar_color: Color32,
    pub width: f32,
    pub height: f32,
}

impl RangeControl {
    pub fn is_full_span(&self) -> bool {
        self.value == (self.start, self.end)
    }

    /// Clamp, order and apply a new span; reports the change if any.
    pub fn set_value(&mut self, new: (f64, f64)) -> Option<ChangeEvent<(f64, f64)>> {
        let lo = new.0.clamp(self.start, self.end);
        let hi = new.1.clamp(self.start, self.end);
        let new = (lo.min(hi), hi.max(lo));
        if new == self.value {
            return None;
        }
        let old = self.value;
        self.value = new;
        Some(ChangeEvent { old, new })
    }
}

/// Single-handle slider control state.
#[derive(Debug, Clone)]
pub struct SliderControl {
    pub start: f64,
    pub end: f64,
    pub step: f64,
    pub value: f64,
    pub bar_color: Color32,
    pub width: f32,
    pub height: f32,
}

impl SliderControl {
    pub fn set_value(&mut self, new: f64) -> Option<ChangeEvent<f64>> {
        let new = new.clamp(self.start, self.end);
        if new == self.value {
            return None;
        }
        let old = self.value;
        self.value = new;
        Some(ChangeEvent { old, new })
    }
}

/// Single-choice select control state. `options` are (label, value)
/// pairs ending with the sentinel empty-string entry; `value` holds the
/// selected value (not label), the sentinel meaning "no filter".
#[derive(Debug, Clone)]
pub struct SelectControl {
    pub options: Vec<(String, String)>,
    pub value: String,
    pub background: Color32,
    pub width: f32,
    pub height: f32,
}

impl SelectControl {
    pub fn set_value(&mut self, new: &str) -> Option<ChangeEvent<String>> {
        if new == self.value || !self.options.iter().any(|(_, v)| v == new) {
            return None;
        }
        let old = std::mem::replace(&mut self.value, new.to_string());
        Some(ChangeEvent {
            old,
            new: new.to_string(),
        })
    }
}

/// Multi-choice select control state; an empty selection normalizes to
/// `[sentinel]`.
#[derive(Debug, Clone)]
pub struct MultiSelectControl {
    pub options: Vec<(String, String)>,
    pub values: Vec<String>,
    pub background: Color32,
    pub width: f32,
    pub height: f32,
}

impl MultiSelectControl {
    pub fn set_values(&mut self, new: Vec<String>) -> Option<ChangeEvent<Vec<String>>> {
        let new = if new.is_empty() {
            vec![String::new()]
        } else {
            new
        };
        if new == self.values {
            return None;
        }
        let old = std::mem::replace(&mut self.values, new.clone());
        Some(ChangeEvent { old, new })
    }
}

/// Distinct-value domain for select widgets: either the explicit label
/// map or the dataset's unique values, always with a trailing sentinel
/// empty-string entry meaning "no selection". Oversized extracted
/// domains get a non-fatal warning.
pub(crate) fn calc_select_domain(
    data: &dyn DataSource,
    column: &str,
    label_map: Option<&[(String, String)]>,
    kind: WidgetKind,
) -> Result<(Vec<(String, String)>, usize), WidgetError> {
    let mut domain = match label_map {
        Some(map) => map.to_vec(),
        None => {
            let unique = data.unique(column)?;
            if unique.len() > ui_constants::MAX_DROPDOWN_VALUES {
                log::warn!(
                    "{column}: {} distinct values make an unwieldy {kind} menu",
                    unique.len()
                );
            }
            unique
                .into_iter()
                .map(|v| {
                    let s = v.to_string();
                    (s.clone(), s)
                })
                .collect()
        }
    };
    domain.push((String::new(), String::new()));
    let data_points = domain.len() - 1;
    Ok((domain, data_points))
}

pub(crate) fn default_step(start: f64, end: f64) -> f64 {
    let span = end - start;
    if span <= 0.0 {
        1.0
    } else {
        span / 100.0
    }
}

/// A change surfaced by any widget's control, forwarded to the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueChange {
    Range(ChangeEvent<(f64, f64)>),
    DateRange(ChangeEvent<(i64, i64)>),
    Int(ChangeEvent<i64>),
    Float(ChangeEvent<f64>),
    Single(ChangeEvent<String>),
    Multi(ChangeEvent<Vec<String>>),
}

/// The widget variants the dashboard can host.
#[derive(Debug, Clone)]
pub enum FilterWidget {
    Range(RangeSlider),
    DateRange(DateRangeSlider),
    Int(IntSlider),
    Float(FloatSlider),
    DropDown(DropDown),
    MultiSelect(MultiSelect),
    DataSize(DataSizeIndicator),
}

impl FilterWidget {
    pub fn name(&self) -> &str {
        match self {
            FilterWidget::Range(w) => w.name(),
            FilterWidget::DateRange(w) => w.name(),
            FilterWidget::Int(w) => w.name(),
            FilterWidget::Float(w) => w.name(),
            FilterWidget::DropDown(w) => w.name(),
            FilterWidget::MultiSelect(w) => w.name(),
            FilterWidget::DataSize(w) => w.name(),
        }
    }

    /// The bound column; the data size indicator has none.
    pub fn column(&self) -> Option<&str> {
        match self {
            FilterWidget::Range(w) => Some(w.column()),
            FilterWidget::DateRange(w) => Some(w.column()),
            FilterWidget::Int(w) => Some(w.column()),
            FilterWidget::Float(w) => Some(w.column()),
            FilterWidget::DropDown(w) => Some(w.column()),
            FilterWidget::MultiSelect(w) => Some(w.column()),
            FilterWidget::DataSize(_) => None,
        }
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            FilterWidget::Range(_) => WidgetKind::RangeSlider,
            FilterWidget::DateRange(_) => WidgetKind::DateRangeSlider,
            FilterWidget::Int(_) => WidgetKind::IntSlider,
            FilterWidget::Float(_) => WidgetKind::FloatSlider,
            FilterWidget::DropDown(_) => WidgetKind::DropDown,
            FilterWidget::MultiSelect(_) => WidgetKind::MultiSelect,
            FilterWidget::DataSize(_) => WidgetKind::DataSizeIndicator,
        }
    }

    /// Probe the data and build the control. Type errors surface here,
    /// before any control exists.
    pub fn initiate(&mut self, data: &dyn DataSource) -> Result<(), WidgetError> {
        match self {
            FilterWidget::Range(w) => w.initiate(data),
            FilterWidget::DateRange(w) => w.initiate(data),
            FilterWidget::Int(w) => w.initiate(data),
            FilterWidget::Float(w) => w.initiate(data),
            FilterWidget::DropDown(w) => w.initiate(data),
            FilterWidget::MultiSelect(w) => w.initiate(data),
            FilterWidget::DataSize(w) => {
                w.initiate(data);
                Ok(())
            }
        }
    }

    /// Contribute (or withdraw) this widget's predicate. The indicator
    /// never contributes.
    pub fn compute_query(&self, ctx: &mut QueryContext) {
        match self {
            FilterWidget::Range(w) => w.compute_query(ctx),
            FilterWidget::DateRange(w) => w.compute_query(ctx),
            FilterWidget::Int(w) => w.compute_query(ctx),
            FilterWidget::Float(w) => w.compute_query(ctx),
            FilterWidget::DropDown(w) => w.compute_query(ctx),
            FilterWidget::MultiSelect(w) => w.compute_query(ctx),
            FilterWidget::DataSize(_) => {}
        }
    }

    /// Structured form of the current predicate, for execution.
    pub fn current_filter(&self) -> Option<Filter> {
        match self {
            FilterWidget::Range(w) => w.current_filter(),
            FilterWidget::DateRange(w) => w.current_filter(),
            FilterWidget::Int(w) => w.current_filter(),
            FilterWidget::Float(w) => w.current_filter(),
            FilterWidget::DropDown(w) => w.current_filter(),
            FilterWidget::MultiSelect(w) => w.current_filter(),
            FilterWidget::DataSize(_) => None,
        }
    }

    pub fn apply_theme(&mut self, theme: &ThemeProperties) {
        match self {
            FilterWidget::Range(w) => w.apply_theme(theme),
            FilterWidget::DateRange(w) => w.apply_theme(theme),
            FilterWidget::Int(w) => w.apply_theme(theme),
            FilterWidget::Float(w) => w.apply_theme(theme),
            FilterWidget::DropDown(w) => w.apply_theme(theme),
            FilterWidget::MultiSelect(w) => w.apply_theme(theme),
            FilterWidget::DataSize(w) => w.apply_theme(theme),
        }
    }

    /// Recolor slider bars for the datatile-loaded visual state. Select
    /// widgets and the indicator carry no such state.
    pub fn set_datatile_loaded(&mut self, state: bool) {
        match self {
            FilterWidget::Range(w) => w.set_datatile_loaded(state),
            FilterWidget::DateRange(w) => w.set_datatile_loaded(state),
            FilterWidget::Int(w) => w.set_datatile_loaded(state),
            FilterWidget::Float(w) => w.set_datatile_loaded(state),
            FilterWidget::DropDown(_)
            | FilterWidget::MultiSelect(_)
            | FilterWidget::DataSize(_) => {}
        }
    }

    /// Whether this widget's datatiles are built in cumulative (range)
    /// mode rather than discrete value counts.
    pub fn datatile_cumsum(&self) -> bool {
        matches!(
            self,
            FilterWidget::Range(_) | FilterWidget::DateRange(_) | FilterWidget::Int(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Column, ColumnTable};

    #[test]
    fn oversized_domains_warn_but_stay_usable() {
        let ids: Vec<i64> = (0..501).collect();
        let table = ColumnTable::new().with_column("id", Column::Int(ids));
        let (domain, data_points) =
            calc_select_domain(&table, "id", None, WidgetKind::DropDown).unwrap();
        // 501 distinct values exceed the cap; the warning is non-fatal
        // and the domain is still built in full.
        assert_eq!(data_points, 501);
        assert_eq!(domain.len(), 502);
        assert_eq!(domain.first(), Some(&("0".to_string(), "0".to_string())));
        assert_eq!(domain.last(), Some(&(String::new(), String::new())));
    }
}
