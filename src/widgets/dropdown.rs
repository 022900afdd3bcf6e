// Single-choice categorical widget: `column == value`, sentinel empty
// string meaning "no filter".

use eframe::egui::Color32;

use crate::data::{DataSource, Filter};
use crate::dashboard::QueryContext;
use crate::types::{ChangeEvent, Scalar};
use crate::ui_constants;
use crate::widgets::{
    calc_select_domain, SelectConfig, SelectControl, ThemeProperties, WidgetError, WidgetKind,
};

#[derive(Debug, Clone)]
pub struct DropDown {
    name: String,
    column: String,
    config: SelectConfig,
    list_of_values: Vec<(String, String)>,
    data_points: usize,
    background: Color32,
    pub control: Option<SelectControl>,
}

impl DropDown {
    pub fn new(column: &str) -> Self {
        Self::with_config(column, SelectConfig::default())
    }

    pub fn with_config(column: &str, config: SelectConfig) -> Self {
        Self {
            name: format!("{column}_{}", WidgetKind::DropDown),
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

    /// Domain entries, sentinel included.
    pub fn list_of_values(&self) -> &[(String, String)] {
        &self.list_of_values
    }

    /// Domain size excluding the sentinel.
    pub fn data_points(&self) -> usize {
        self.data_points
    }

    /// Compute the domain and build the control defaulted to the sentinel.
    pub fn initiate(&mut self, data: &dyn DataSource) -> Result<(), WidgetError> {
        self.calc_list_of_values(data)?;
        self.generate_widget();
        Ok(())
    }

    fn calc_list_of_values(&mut self, data: &dyn DataSource) -> Result<(), WidgetError> {
        let (domain, data_points) = calc_select_domain(
            data,
            &self.column,
            self.config.label_map.as_deref(),
            WidgetKind::DropDown,
        )?;
        self.list_of_values = domain;
        self.data_points = data_points;
        Ok(())
    }

    fn generate_widget(&mut self) {
        self.control = Some(SelectControl {
            options: self.list_of_values.clone(),
            value: String::new(),
            background: self.background,
            width: self.config.width,
            height: self.config.height,
        });
    }

    pub fn set_value(&mut self, new: &str) -> Option<ChangeEvent<String>> {
        self.control.as_mut()?.set_value(new)
    }

    pub fn compute_query(&self, ctx: &mut QueryContext) {
        let col = &self.column;
        match &self.control {
            Some(c) if !c.value.is_empty() => {
                ctx.set_predicate(&self.name, format!("{col} == @{col}_value"));
                ctx.set_local(&format!("{col}_value"), Scalar::Str(c.value.clone()));
            }
            _ => {
                ctx.remove_predicate(&self.name);
                ctx.remove_local(&format!("{col}_value"));
            }
        }
    }

    pub fn current_filter(&self) -> Option<Filter> {
        let c = self.control.as_ref()?;
        if c.value.is_empty() {
            return None;
        }
        Some(Filter::Eq {
            column: self.column.clone(),
            value: Scalar::Str(c.value.clone()),
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
            Column::Str(vec!["NY".into(), "LA".into(), "NY".into()]),
        )
    }

    #[test]
    fn extracted_domain_ends_with_sentinel() {
        let mut w = DropDown::new("city");
        w.initiate(&city_table()).unwrap();
        assert_eq!(
            w.list_of_values(),
            &[
                ("NY".to_string(), "NY".to_string()),
                ("LA".to_string(), "LA".to_string()),
                (String::new(), String::new()),
            ]
        );
        assert_eq!(w.data_points(), 2);
        assert_eq!(w.control.as_ref().unwrap().value, "");
    }

    #[test]
    fn label_map_domain_ends_with_sentinel() {
        let map = vec![
            ("New York".to_string(), "NY".to_string()),
            ("Los Angeles".to_string(), "LA".to_string()),
        ];
        let mut w = DropDown::with_config(
            "city",
            SelectConfig {
                label_map: Some(map),
                ..Default::default()
            },
        );
        w.initiate(&city_table()).unwrap();
        let domain = w.list_of_values();
        assert_eq!(domain.last(), Some(&(String::new(), String::new())));
        assert_eq!(w.data_points(), domain.len() - 1);
    }

    #[test]
    fn sentinel_means_no_predicate() {
        let mut w = DropDown::new("city");
        w.initiate(&city_table()).unwrap();
        let mut ctx = QueryContext::new();
        w.compute_query(&mut ctx);
        assert!(ctx.is_empty());

        w.set_value("NY").unwrap();
        w.compute_query(&mut ctx);
        assert_eq!(
            ctx.predicate("city_drop_down"),
            Some("city == @city_value")
        );
        assert_eq!(ctx.local("city_value"), Some(&Scalar::Str("NY".into())));

        w.set_value("").unwrap();
        w.compute_query(&mut ctx);
        assert!(ctx.is_empty());
        assert_eq!(ctx.local("city_value"), None);
    }

    #[test]
    fn values_outside_the_domain_are_rejected() {
        let mut w = DropDown::new("city");
        w.initiate(&city_table()).unwrap();
        assert!(w.set_value("SF").is_none());
        assert_eq!(w.control.as_ref().unwrap().value, "");
    }
}
