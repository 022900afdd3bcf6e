use eframe::egui::{self, Color32, Rounding, Stroke};

/// Common popup area with consistent styling (Area + Frame + width),
/// returns Area::show inner response so callers can use `inner.response.rect`.
pub fn show_popup_area<F>(
    ui: &egui::Ui,
    popup_id: egui::Id,
    pos: egui::Pos2,
    popup_width: f32,
    fill: Color32,
    border_color: Color32,
    content: F,
) -> egui::InnerResponse<egui::InnerResponse<()>>
where
    F: FnOnce(&mut egui::Ui),
{
    egui::Area::new(popup_id)
        .order(egui::Order::Foreground)
        .fixed_pos(pos)
        .show(ui.ctx(), |ui| {
            egui::Frame::default()
                .fill(fill)
                .stroke(Stroke::new(1.0, border_color))
                .rounding(Rounding::same(crate::ui_constants::control::ROUNDING))
                .show(ui, |ui| {
                    ui.set_min_width(popup_width);
                    content(ui);
                })
        })
}

pub fn clicked_outside(ui: &egui::Ui, avoid_rects: &[egui::Rect]) -> bool {
    ui.input(|i| {
        i.pointer.any_click()
            && i.pointer
                .latest_pos()
                .map_or(false, |p| !avoid_rects.iter().any(|r| r.contains(p)))
    })
}

/// Header row shared by every panel item: widget name on the left,
/// current value readout on the right.
pub fn item_header(ui: &mut egui::Ui, name: &str, value_text: &str) {
    ui.horizontal(|ui| {
        ui.add(egui::Label::new(egui::RichText::new(name).weak()).selectable(false));
        ui.with_layout(
            egui::Layout::right_to_left(egui::Align::Center),
            |ui| {
                ui.add(egui::Label::new(egui::RichText::new(value_text)).selectable(false));
            },
        );
    });
}
