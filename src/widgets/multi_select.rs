// Multi-choice categorical widget: equality for one selection,
// membership for several, nothing for the sentinel.

use eframe::egui::Color32;

use crate::data::{DataSource, Filter};
use crate::dashboard::QueryContext;
use crate::types::ChangeEvent;
use crate::ui_constants;
use crate::widgets::{
    calc_select_domain, MultiSelectControl, SelectConfig, ThemeProperties, WidgetError, WidgetKind,
};

#[derive(Debug, Clone)]
pub struct MultiSelect {
    name: String,
    column: String,
    config: SelectConfig,
    list_of_values: Vec<(String, String)>,
    data_points: usize,
    background: Color32,
    pub control: Option<MultiSelectControl>,
}

impl MultiSelect {
    pub fn new(column: &str) -> Self {
        Self::with_config(column, SelectConfig::default())
    }

    pub fn with_config(column: &str, config: SelectConfig) -> Self {
        Self {
            name: format!("{column}_{}", WidgetKind::MultiSelect),
            column: column.to_string(),
            config,
            list_of_values: Vec::new(),
            data_points: 0,
            background: ui_constants::SELECT_BACKGROUND,
            control: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn list_of_values(&self) -> &[(String, String)] {
        &self.list_of_values
    }

    pub fn data_points(&self) -> usize {
        self.data_points
    }

    /// Compute the domain and build the control defaulted to `[sentinel]`.
    pub fn initiate(&mut self, data: &dyn DataSource) -> Result<(), WidgetError> {
        let (domain, data_points) = calc_select_domain(
            data,
            &self.column,
            self.config.label_map.as_deref(),
            WidgetKind::MultiSelect,
        )?;
        self.list_of_values = domain;
        self.data_points = data_points;
        self.generate_widget();
        Ok(())
    }

    fn generate_widget(&mut self) {
        self.control = Some(MultiSelectControl {
            options: self.list_of_values.clone(),
            values: vec![String::new()],
            background: self.background,
            width: self.config.width,
            height: self.config.height,
        });
    }

    pub fn set_values(&mut self, new: Vec<String>) -> Option<ChangeEvent<Vec<String>>> {
        self.control.as_mut()?.set_values(new)
    }

    pub fn compute_query(&self, ctx: &mut QueryContext) {
        let Some(c) = &self.control else {
            ctx.remove_predicate(&self.name);
            return;
        };
        let col = &self.column;
        if c.values.is_empty() || c.values == [String::new()] {
            ctx.remove_predicate(&self.name);
        } else if c.values.len() == 1 {
            ctx.set_predicate(&self.name, format!("{col}=={}", c.values[0]));
        } else {
            ctx.set_predicate(&self.name, format!("{col} in ({})", c.values.join(",")));
        }
    }

    pub fn current_filter(&self) -> Option<Filter> {
        let c = self.control.as_ref()?;
        if c.values.is_empty() || c.values == [String::new()] {
            return None;
        }
        Some(Filter::In {
            column: self.column.clone(),
            values: c.values.clone(),
        })
    }

    pub fn apply_theme(&mut self, theme: &ThemeProperties) {
        self.background = theme.select_background();
        if let Some(c) = &mut self.control {
            c.background = self.background;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::{Column, ColumnTable};

    fn city_table() -> ColumnTable {
        ColumnTable::new().with_column(
            "city",
            Column::Str(vec!["NY".into(), "LA".into(), "SF".into()]),
        )
    }

    fn initiated() -> MultiSelect {
        let mut w = MultiSelect::new("city");
        w.initiate(&city_table()).unwrap();
        w
    }

    #[test]
    fn sentinel_selection_contributes_nothing() {
        let w = initiated();
        assert_eq!(w.control.as_ref().unwrap().values, vec![String::new()]);
        let mut ctx = QueryContext::new();
        w.compute_query(&mut ctx);
        assert!(ctx.is_empty());
        assert!(w.current_filter().is_none());
    }

    #[test]
    fn single_selection_is_equality() {
        let mut w = initiated();
        w.set_values(vec!["NY".into()]).unwrap();
        let mut ctx = QueryContext::new();
        w.compute_query(&mut ctx);
        assert_eq!(ctx.predicate("city_multi_select"), Some("city==NY"));
    }

    #[test]
    fn multiple_selection_is_membership_in_order() {
        let mut w = initiated();
        w.set_values(vec!["NY".into(), "LA".into()]).unwrap();
        let mut ctx = QueryContext::new();
        w.compute_query(&mut ctx);
        assert_eq!(
            ctx.predicate("city_multi_select"),
            Some("city in (NY,LA)")
        );
        assert_eq!(
            w.current_filter(),
            Some(Filter::In {
                column: "city".into(),
                values: vec!["NY".into(), "LA".into()],
            })
        );

        // Back to the sentinel: entry absent again.
        w.set_values(vec![String::new()]).unwrap();
        w.compute_query(&mut ctx);
        assert!(ctx.is_empty());
    }

    #[test]
    fn empty_selection_normalizes_to_sentinel() {
        let mut w = initiated();
        w.set_values(vec!["NY".into()]).unwrap();
        let ev = w.set_values(Vec::new()).unwrap();
        assert_eq!(ev.new, vec![String::new()]);
    }

    #[test]
    fn domain_carries_trailing_sentinel() {
        let w = initiated();
        assert_eq!(
            w.list_of_values().last(),
            Some(&(String::new(), String::new()))
        );
        assert_eq!(w.data_points(), 3);
    }
}
