use eframe::egui::{self, Layout, RichText};

use crate::types::{format_datetime, Scalar};
use crate::ui_constants;
use crate::views::items::{
    gauge::gauge, multi_select::multi_select_menu, range_slider::range_slider,
    select_menu::select_menu, value_slider::value_slider,
};
use crate::widgets::{FilterWidget, ValueChange};

fn fmt_num(v: f64) -> String {
    Scalar::Float(v).to_string()
}

/// Draws the right-side widgets panel. Widget state is updated in-place;
/// every change the user made this frame comes back as `(index, change)`
/// for the controller to dispatch.
pub fn draw_widgets_panel(
    ctx: &egui::Context,
    widgets: &mut [FilterWidget],
) -> (Vec<(usize, ValueChange)>, bool) {
    let mut events: Vec<(usize, ValueChange)> = Vec::new();
    let mut logs_clicked = false;

    egui::SidePanel::right("widgets_panel")
        .frame(
            egui::Frame::none()
                .fill(egui::Color32::from_rgb(30, 30, 30))
                .inner_margin(10.0),
        )
        .exact_width(ui_constants::PANEL_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(RichText::new("Filters").strong());
            ui.separator();

            for (idx, widget) in widgets.iter_mut().enumerate() {
                match widget {
                    FilterWidget::Range(w) => {
                        if let Some(control) = &w.control {
                            let text = format!(
                                "{} – {}",
                                fmt_num(control.value.0),
                                fmt_num(control.value.1)
                            );
                            let picked = range_slider(ui, w.name(), &text, control);
                            if let Some(value) = picked {
                                if let Some(ev) = w.set_value(value) {
                                    events.push((idx, ValueChange::Range(ev)));
                                }
                            }
                        }
                    }
                    FilterWidget::DateRange(w) => {
                        if let Some(control) = &w.control {
                            let text = format!(
                                "{} – {}",
                                format_datetime(control.value.0 as i64),
                                format_datetime(control.value.1 as i64)
                            );
                            let picked = range_slider(ui, w.name(), &text, control);
                            if let Some((low, high)) = picked {
                                if let Some(ev) = w.set_value((low as i64, high as i64)) {
                                    events.push((idx, ValueChange::DateRange(ev)));
                                }
                            }
                        }
                    }
                    FilterWidget::Int(w) => {
                        if let Some(control) = &w.control {
                            let text = format!("{}", control.value as i64);
                            let picked = value_slider(ui, w.name(), &text, control);
                            if let Some(value) = picked {
                                if let Some(ev) = w.set_value(value as i64) {
                                    events.push((idx, ValueChange::Int(ev)));
                                }
                            }
                        }
                    }
                    FilterWidget::Float(w) => {
                        if let Some(control) = &w.control {
                            let text = fmt_num(control.value);
                            let picked = value_slider(ui, w.name(), &text, control);
                            if let Some(value) = picked {
                                if let Some(ev) = w.set_value(value) {
                                    events.push((idx, ValueChange::Float(ev)));
                                }
                            }
                        }
                    }
                    FilterWidget::DropDown(w) => {
                        if let Some(control) = &w.control {
                            let picked = select_menu(ui, w.name(), control);
                            if let Some(value) = picked {
                                if let Some(ev) = w.set_value(&value) {
                                    events.push((idx, ValueChange::Single(ev)));
                                }
                            }
                        }
                    }
                    FilterWidget::MultiSelect(w) => {
                        if let Some(control) = &w.control {
                            let picked = multi_select_menu(ui, w.name(), control);
                            if let Some(values) = picked {
                                if let Some(ev) = w.set_values(values) {
                                    events.push((idx, ValueChange::Multi(ev)));
                                }
                            }
                        }
                    }
                    FilterWidget::DataSize(w) => {
                        if let Some(control) = &w.control {
                            gauge(ui, w.name(), control);
                        }
                    }
                }
                ui.separator();
            }

            ui.add_space(8.0);
            ui.with_layout(Layout::bottom_up(egui::Align::LEFT), |ui| {
                if ui.button("Logs").clicked() {
                    logs_clicked = true;
                }
            });
        });

    (events, logs_clicked)
}
