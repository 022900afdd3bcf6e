use eframe::egui::{
    self as egui, pos2, Color32, Id, Rounding, ScrollArea, Sense, Stroke, Ui, Vec2,
};

use crate::ui_constants::control::{POPUP_MAX_HEIGHT, ROUNDING};
use crate::ui_constants::spacing;
use crate::widgets::SelectControl;

fn row_label(label: &str) -> &str {
    if label.is_empty() {
        "(any)"
    } else {
        label
    }
}

/// Single-choice dropdown over the control's fixed option list.
/// Returns Some(value) when the user picks an entry, otherwise None.
pub fn select_menu(ui: &mut Ui, name: &str, control: &SelectControl) -> Option<String> {
    let current_label = control
        .options
        .iter()
        .find(|(_, v)| *v == control.value)
        .map(|(l, _)| l.as_str())
        .unwrap_or("");
    crate::views::ui_helpers::item_header(ui, name, row_label(current_label));

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
        row_label(current_label),
        egui::FontId::proportional(14.0),
        Color32::from_gray(210),
    );

    // Caret
    let cx = container_rect.right() - 14.0;
    let cy = container_rect.center().y + 1.0;
    let w = 8.0;
    let h = 5.0;

    let popup_id: Id = Id::new(("select_menu", "popup", name.to_string()));
    let mut is_open = ui
        .memory(|m| m.data.get_temp::<bool>(popup_id))
        .unwrap_or(false);
    if response.clicked() {
        is_open = !is_open;
    }

    let col = if is_open {
        Color32::from_gray(230)
    } else {
        Color32::from_gray(200)
    };
    if is_open {
        painter.line_segment(
            [pos2(cx - w * 0.5, cy + h * 0.5), pos2(cx, cy - h * 0.5)],
            Stroke::new(1.5, col),
        );
        painter.line_segment(
            [pos2(cx + w * 0.5, cy + h * 0.5), pos2(cx, cy - h * 0.5)],
            Stroke::new(1.5, col),
        );
    } else {
        painter.line_segment(
            [pos2(cx - w * 0.5, cy - h * 0.5), pos2(cx, cy + h * 0.5)],
            Stroke::new(1.5, col),
        );
        painter.line_segment(
            [pos2(cx + w * 0.5, cy - h * 0.5), pos2(cx, cy + h * 0.5)],
            Stroke::new(1.5, col),
        );
    }

    let mut pick: Option<String> = None;
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
                            let row_height = ui.spacing().interact_size.y * 1.2;
                            let (row_rect, row_resp) = ui.allocate_exact_size(
                                Vec2::new(ui.available_width(), row_height),
                                Sense::click(),
                            );
                            let row_p = ui.painter();

                            if row_resp.hovered() || *value == control.value {
                                row_p.rect(
                                    row_rect.shrink2(Vec2::new(2.0, 2.0)),
                                    Rounding::same(ROUNDING),
                                    hover_bg,
                                    Stroke::NONE,
                                );
                            }

                            row_p.text(
                                pos2(row_rect.left() + spacing::MEDIUM, row_rect.center().y),
                                egui::Align2::LEFT_CENTER,
                                row_label(label),
                                egui::FontId::proportional(14.0),
                                Color32::from_gray(210),
                            );

                            let row_resp = row_resp.on_hover_cursor(egui::CursorIcon::PointingHand);
                            if row_resp.clicked() {
                                pick = Some(value.clone());
                                is_open = false;
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

    pick
}
