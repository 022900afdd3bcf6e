// Dashboard controller: active-view bookkeeping, the datatile cache,
// the shared query context, and the change-dispatch sequence every
// widget event goes through.

pub mod datatiles;
pub mod query;

pub use query::QueryContext;

use datatiles::DataTiles;

use crate::data::{DataSource, Filter};
use crate::widgets::{FilterWidget, ValueChange};

pub struct DashboardState<D: DataSource> {
    pub data: D,
    active_view: Option<String>,
    pub datatiles: DataTiles,
    pub query: QueryContext,
    filtered_rows: usize,
}

impl<D: DataSource> DashboardState<D> {
    pub fn new(data: D) -> Self {
        let filtered_rows = data.row_count();
        Self {
            data,
            active_view: None,
            datatiles: DataTiles::default(),
            query: QueryContext::new(),
            filtered_rows,
        }
    }

    pub fn active_view(&self) -> Option<&str> {
        self.active_view.as_deref()
    }

    /// Rows passing all active filters, as of the last recomputation.
    pub fn filtered_rows(&self) -> usize {
        self.filtered_rows
    }

    /// Repoint the active view; stale tiles are dropped.
    pub fn reset_current_view(&mut self, new_active_view: &str) {
        log::debug!("active view -> {new_active_view}");
        self.active_view = Some(new_active_view.to_string());
        self.datatiles.clear();
    }

    /// Warm the datatile cache for `column` over rows passing every
    /// *other* widget's filter. A failed scan leaves the cache cold and
    /// the direct-scan fallback in place.
    pub fn calc_data_tiles(&mut self, column: &str, cumsum: bool, other_filters: &[Filter]) {
        if cumsum {
            match self.data.column_as_f64(column, other_filters) {
                Ok(values) => self.datatiles.load_range(values),
                Err(e) => {
                    log::warn!("datatiles for '{column}' not built: {e}");
                    self.datatiles.clear();
                }
            }
        } else {
            match self.data.value_counts(column, other_filters) {
                Ok(counts) => self.datatiles.load_counts(counts),
                Err(e) => {
                    log::warn!("datatiles for '{column}' not built: {e}");
                    self.datatiles.clear();
                }
            }
        }
    }

    /// Recompute the filtered count for a new `(low, high)` span on the
    /// active column, preferring the warm tiles.
    pub fn query_datatiles_by_range(&mut self, range: (f64, f64), all_filters: &[Filter]) {
        self.filtered_rows = match self.datatiles.count_in_range(range.0, range.1) {
            Some(n) => n,
            None => self.data.count_rows(all_filters),
        };
    }

    /// Recompute the filtered count for a discrete selection change on
    /// the active column. Sentinel entries do not filter.
    pub fn query_datatiles_by_indices(
        &mut self,
        _old: &[String],
        new: &[String],
        all_filters: &[Filter],
    ) {
        let selected: Vec<String> = new.iter().filter(|v| !v.is_empty()).cloned().collect();
        self.filtered_rows = match self.datatiles.count_selected(&selected) {
            Some(n) => n,
            None => self.data.count_rows(all_filters),
        };
    }
}

/// The uniform dispatch sequence for a change surfaced by `widgets[idx]`:
/// activate the view and warm datatiles if it was not active, run the
/// variant-specific recomputation, refresh the widget's query
/// contribution, recolor datatile-loaded state.
pub fn dispatch_change<D: DataSource>(
    widgets: &mut [FilterWidget],
    idx: usize,
    change: &ValueChange,
    state: &mut DashboardState<D>,
) {
    let name = widgets[idx].name().to_string();
    let Some(column) = widgets[idx].column().map(str::to_string) else {
        return;
    };

    let all_filters: Vec<Filter> = widgets.iter().filter_map(|w| w.current_filter()).collect();

    if state.active_view() != Some(name.as_str()) {
        let other_filters: Vec<Filter> = widgets
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .filter_map(|(_, w)| w.current_filter())
            .collect();
        state.reset_current_view(&name);
        state.calc_data_tiles(&column, widgets[idx].datatile_cumsum(), &other_filters);
        let loaded = state.datatiles.is_loaded();
        for (i, w) in widgets.iter_mut().enumerate() {
            w.set_datatile_loaded(loaded && i == idx);
        }
    }

    match change {
        ValueChange::Range(ev) => state.query_datatiles_by_range(ev.new, &all_filters),
        ValueChange::DateRange(ev) => {
            state.query_datatiles_by_range((ev.new.0 as f64, ev.new.1 as f64), &all_filters)
        }
        ValueChange::Int(ev) => {
            // Int tiles are cumulative; equality is the degenerate range.
            state.query_datatiles_by_range((ev.new as f64, ev.new as f64), &all_filters)
        }
        ValueChange::Float(ev) => {
            state.query_datatiles_by_indices(&[], &[ev.new.to_string()], &all_filters)
        }
        ValueChange::Single(ev) => {
            state.query_datatiles_by_indices(&[], std::slice::from_ref(&ev.new), &all_filters)
        }
        ValueChange::Multi(ev) => state.query_datatiles_by_indices(&ev.old, &ev.new, &all_filters),
    }

    widgets[idx].compute_query(&mut state.query);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Column, ColumnTable};
    use crate::widgets::{IntSlider, MultiSelect, RangeSlider};

    fn table() -> ColumnTable {
        ColumnTable::new()
            .with_column("age", Column::Int(vec![10, 20, 30]))
            .with_column(
                "city",
                Column::Str(vec!["NY".into(), "LA".into(), "NY".into()]),
            )
    }

    fn setup() -> (Vec<FilterWidget>, DashboardState<ColumnTable>) {
        let state = DashboardState::new(table());
        let mut widgets = vec![
            FilterWidget::Range(RangeSlider::new("age")),
            FilterWidget::MultiSelect(MultiSelect::new("city")),
        ];
        for w in &mut widgets {
            w.initiate(&state.data).unwrap();
        }
        (widgets, state)
    }

    #[test]
    fn range_change_activates_view_and_recounts() {
        let (mut widgets, mut state) = setup();
        let ev = match &mut widgets[0] {
            FilterWidget::Range(w) => w.set_value((15.0, 25.0)).unwrap(),
            _ => unreachable!(),
        };
        dispatch_change(
            &mut widgets,
            0,
            &ValueChange::Range(ev),
            &mut state,
        );

        assert_eq!(state.active_view(), Some("age_range_slider"));
        assert!(state.datatiles.is_loaded());
        assert_eq!(state.filtered_rows(), 1);
        assert_eq!(
            state.query.predicate("age_range_slider"),
            Some("@age_min<=age<=@age_max")
        );
    }

    #[test]
    fn reverting_removes_the_contribution() {
        let (mut widgets, mut state) = setup();
        for value in [(15.0, 25.0), (10.0, 30.0)] {
            let ev = match &mut widgets[0] {
                FilterWidget::Range(w) => w.set_value(value).unwrap(),
                _ => unreachable!(),
            };
            dispatch_change(&mut widgets, 0, &ValueChange::Range(ev), &mut state);
        }
        assert!(state.query.is_empty());
        assert_eq!(state.filtered_rows(), 3);
    }

    #[test]
    fn tiles_respect_other_widgets_filters() {
        let (mut widgets, mut state) = setup();

        // Select NY first, then narrow the age range: the age tiles must
        // only cover NY rows.
        let ev = match &mut widgets[1] {
            FilterWidget::MultiSelect(w) => w.set_values(vec!["NY".into()]).unwrap(),
            _ => unreachable!(),
        };
        dispatch_change(&mut widgets, 1, &ValueChange::Multi(ev), &mut state);
        assert_eq!(state.filtered_rows(), 2);

        let ev = match &mut widgets[0] {
            FilterWidget::Range(w) => w.set_value((10.0, 15.0)).unwrap(),
            _ => unreachable!(),
        };
        dispatch_change(&mut widgets, 0, &ValueChange::Range(ev), &mut state);
        assert_eq!(state.active_view(), Some("age_range_slider"));
        // NY rows have ages 10 and 30; only 10 is in range.
        assert_eq!(state.filtered_rows(), 1);
    }

    #[test]
    fn int_change_counts_via_cumulative_tiles() {
        let table = ColumnTable::new().with_column("visits", Column::Int(vec![1, 2, 2, 3]));
        let mut state = DashboardState::new(table);
        let mut widgets = vec![FilterWidget::Int(IntSlider::new("visits"))];
        widgets[0].initiate(&state.data).unwrap();

        let ev = match &mut widgets[0] {
            FilterWidget::Int(w) => w.set_value(2).unwrap(),
            _ => unreachable!(),
        };
        dispatch_change(&mut widgets, 0, &ValueChange::Int(ev), &mut state);

        // Warm cumulative tiles answer the equality lookup directly.
        assert!(state.datatiles.is_loaded());
        assert_eq!(state.datatiles.count_in_range(2.0, 2.0), Some(2));
        assert_eq!(state.filtered_rows(), 2);
    }

    #[test]
    fn datatile_loaded_state_follows_the_active_widget() {
        let (mut widgets, mut state) = setup();
        let ev = match &mut widgets[0] {
            FilterWidget::Range(w) => w.set_value((15.0, 25.0)).unwrap(),
            _ => unreachable!(),
        };
        dispatch_change(&mut widgets, 0, &ValueChange::Range(ev), &mut state);
        match &widgets[0] {
            FilterWidget::Range(w) => assert!(w.datatile_loaded()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn query_invariant_keys_subset_of_active_widgets() {
        let (mut widgets, mut state) = setup();
        let ev = match &mut widgets[1] {
            FilterWidget::MultiSelect(w) => {
                w.set_values(vec!["NY".into(), "LA".into()]).unwrap()
            }
            _ => unreachable!(),
        };
        dispatch_change(&mut widgets, 1, &ValueChange::Multi(ev), &mut state);
        let keys: Vec<&str> = state.query.predicates().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["city_multi_select"]);
        assert_eq!(
            state.query.predicate("city_multi_select"),
            Some("city in (NY,LA)")
        );
        assert_eq!(state.filtered_rows(), 3);
    }
}
