// Application state and per-frame drawing. Widget events collected by
// the panel are dispatched here; the central panel shows the resulting
// query context.

use eframe::egui::RichText;
use eframe::{egui, App};

use crate::dashboard::{dispatch_change, DashboardState};
use crate::data::{ColumnTable, DataSource};
use crate::views::panel::draw_widgets_panel;
use crate::widgets::{
    DataSizeIndicator, DateRangeSlider, DropDown, FilterWidget, FloatSlider, IntSlider,
    MultiSelect, RangeSlider, SourceData, ThemeProperties,
};

mod demo;
mod logs_ui;

pub struct DashApp {
    state: DashboardState<ColumnTable>,
    widgets: Vec<FilterWidget>,
    theme: ThemeProperties,
}

impl DashApp {
    pub fn new(theme: ThemeProperties) -> Self {
        let state = DashboardState::new(demo::demo_table());
        let mut widgets = vec![
            FilterWidget::Range(RangeSlider::new("age")),
            FilterWidget::DateRange(DateRangeSlider::new("signup")),
            FilterWidget::Int(IntSlider::new("visits")),
            FilterWidget::Float(FloatSlider::new("rating")),
            FilterWidget::DropDown(DropDown::new("segment")),
            FilterWidget::MultiSelect(MultiSelect::new("city")),
            FilterWidget::DataSize(DataSizeIndicator::new()),
        ];
        widgets.retain_mut(|w| match w.initiate(&state.data) {
            Ok(()) => true,
            Err(e) => {
                log::error!("{} ({}): dropped from the panel: {e}", w.name(), w.kind());
                false
            }
        });
        let mut app = Self {
            state,
            widgets,
            theme,
        };
        app.apply_theme();
        app
    }

    fn apply_theme(&mut self) {
        for w in &mut self.widgets {
            w.apply_theme(&self.theme);
        }
    }
}

impl App for DashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Repaint when background log lines arrive while idle.
        if crate::logger::take_new_flag() {
            ctx.request_repaint();
        }
        logs_ui::draw_logs_viewport(ctx);

        let (events, logs_clicked) = draw_widgets_panel(ctx, &mut self.widgets);
        if logs_clicked {
            logs_ui::open_logs();
        }

        let had_events = !events.is_empty();
        for (idx, change) in &events {
            dispatch_change(&mut self.widgets, *idx, change, &mut self.state);
        }
        if had_events {
            // Patch the size readout without touching its backup.
            let filtered = self.state.filtered_rows() as f64;
            for w in &mut self.widgets {
                if let FilterWidget::DataSize(g) = w {
                    g.format_source_data(
                        &SourceData {
                            x: Vec::new(),
                            y: vec![filtered],
                        },
                        true,
                    );
                }
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Query").strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Reload theme").clicked() {
                        self.theme = ThemeProperties::load_from_disk();
                        self.apply_theme();
                    }
                });
            });
            ui.separator();

            let total = self.state.data.row_count();
            ui.label(format!(
                "{} of {total} rows pass the active filters",
                self.state.filtered_rows()
            ));
            let columns: Vec<&str> = self.state.data.column_names().collect();
            ui.label(format!("columns: {}", columns.join(", ")));
            if let Some(view) = self.state.active_view() {
                ui.label(format!("active view: {view}"));
            }
            ui.separator();

            let combined = self.state.query.combined();
            if combined.is_empty() {
                ui.add(egui::Label::new(RichText::new("no active filters").weak()));
            } else {
                ui.monospace(combined);
            }
            ui.add_space(8.0);
            for (name, pred) in self.state.query.predicates() {
                ui.monospace(format!("{name}: {pred}"));
            }
            for (name, value) in self.state.query.locals() {
                ui.monospace(format!("@{name} = {value}"));
            }
        });
    }
}
