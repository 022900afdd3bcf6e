use eframe::egui::{
    self as egui, pos2, Color32, Id, Rounding, ScrollArea, Sense, Stroke, Ui, Vec2,
};

use crate::ui_constants::control::{POPUP_MAX_HEIGHT, ROUNDING};
use crate::ui_constants::spacing;
use crate::widgets::MultiSelectControl;

/// Multi-choice dropdown with toggle rows. The sentinel entry is hidden;
/// clearing every toggle reverts to it. Returns Some(values) when the
/// selection changed this frame.
pub fn multi_select_menu(
    ui: &mut Ui,
    name: &str,
    control: &MultiSelectControl,
) -> Option<Vec<String>> {
    let selected: Vec<&str> = control
        .values
        .iter()
        .filter(|v| !v.is_empty())
        .map(String::as_str)
        .collect();
    let summary = if selected.is_empty() {
        "(any)".to_string()
    } else {
        selected.join(", ")
    };
    crate::views::ui_helpers::item_header(ui, name, &summary);

    let border_color = Color32::from_gray(80);
    let hover_bg = Color32::from_rgba_premultiplied(255, 255, 255, 6);

    let available_width = ui.available_width().min(control.width);
    let height = control.height.clamp(28.0, 40.0);
    let (container_rect, response) =
        ui.allocate_exact_size(Vec2::new(available_width, height), Sense::click());
    let response = response.on_hover_cursor(egui::CursorIcon::PointingHand);
    let painter = ui.painter();

    painter.rect(
        container_rect,
        Rounding::same(ROUNDING),
        control.background,
        Stroke::new(1.0, border_color),
    );
    if response.hovered() {
        painter.rect(
            container_rect.shrink2(Vec2::new(2.0, 2.0)),
            Rounding::same(ROUNDING),
            hover_bg,
            Stroke::NONE,
        );
    }
    painter.text(
        pos2(
            container_rect.left() + spacing::MEDIUM,
            container_rect.center().y,
        ),
        egui::Align2::LEFT_CENTER,
        &summary,
        egui::FontId::proportional(14.0),
        Color32::from_gray(210),
    );

    let popup_id: Id = Id::new(("multi_select_menu", "popup", name.to_string()));
    let mut is_open = ui
        .memory(|m| m.data.get_temp::<bool>(popup_id))
        .unwrap_or(false);
    if response.clicked() {
        is_open = !is_open;
    }

    let mut changed_to: Option<Vec<String>> = None;
    if is_open {
        let popup_pos = pos2(container_rect.left(), container_rect.bottom() + spacing::SMALL);
        let popup_width = container_rect.width();

        let inner = crate::views::ui_helpers::show_popup_area(
            ui,
            popup_id,
            popup_pos,
            popup_width,
            control.background,
            border_color,
            |ui| {
                ScrollArea::vertical()
                    .max_height(POPUP_MAX_HEIGHT)
                    .show(ui, |ui| {
                        ui.set_width(popup_width - spacing::MEDIUM);
                        for (label, value) in &control.options {
                            if value.is_empty() {
                                continue;
                            }
                            let is_on = selected.contains(&value.as_str());
                            let row_height = ui.spacing().interact_size.y * 1.2;
                            let (row_rect, row_resp) = ui.allocate_exact_size(
                                Vec2::new(ui.available_width(), row_height),
                                Sense::click(),
                            );
                            let row_p = ui.painter();

                            if row_resp.hovered() || is_on {
                                row_p.rect(
                                    row_rect.shrink2(Vec2::new(2.0, 2.0)),
                                    Rounding::same(ROUNDING),
                                    hover_bg,
                                    Stroke::NONE,
                                );
                            }

                            let mark = if is_on { "☑" } else { "☐" };
                            row_p.text(
                                pos2(row_rect.left() + spacing::MEDIUM, row_rect.center().y),
                                egui::Align2::LEFT_CENTER,
                                format!("{mark} {label}"),
                                egui::FontId::proportional(14.0),
                                Color32::from_gray(210),
                            );

                            let row_resp = row_resp.on_hover_cursor(egui::CursorIcon::PointingHand);
                            if row_resp.clicked() {
                                let mut next: Vec<String> = selected
                                    .iter()
                                    .filter(|v| **v != value.as_str())
                                    .map(|v| v.to_string())
                                    .collect();
                                if !is_on {
                                    next.push(value.clone());
                                }
                                changed_to = Some(next);
                            }
                        }
                    });
            },
        );

        let popup_rect = inner.response.rect;
        if crate::views::ui_helpers::clicked_outside(ui, &[popup_rect, container_rect]) {
            is_open = false;
        }
    }

    ui.memory_mut(|m| {
        m.data.insert_temp(popup_id, is_open);
    });

    changed_to
}
