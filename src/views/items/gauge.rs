use eframe::egui::{pos2, Color32, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use crate::ui_constants::control::{ROUNDING, TRACK_HEIGHT, TRACK_MARGIN_H};
use crate::widgets::SliderControl;

/// Read-only horizontal bar for the data size readout. Same container
/// styling as the sliders, no interaction.
pub fn gauge(ui: &mut Ui, name: &str, control: &SliderControl) {
    let value_text = format!("{} / {}", control.value as u64, control.end as u64);
    crate::views::ui_helpers::item_header(ui, name, &value_text);

    let available_width = ui.available_width().min(control.width);
    let height = control.height.clamp(28.0, 40.0);
    let border_color = Color32::from_gray(80);
    let container_bg = Color32::from_rgb(30, 30, 30);
    let track_bg = Color32::from_rgb(25, 25, 25);
    let track_border = Color32::from_gray(60);

    let (container_rect, _) =
        ui.allocate_exact_size(Vec2::new(available_width, height), Sense::hover());
    let painter = ui.painter();
    painter.rect(
        container_rect,
        Rounding::same(ROUNDING),
        container_bg,
        Stroke::new(1.0, border_color),
    );

    let track_rect = Rect::from_min_max(
        pos2(
            container_rect.min.x + TRACK_MARGIN_H,
            container_rect.center().y - TRACK_HEIGHT * 0.5,
        ),
        pos2(
            container_rect.max.x - TRACK_MARGIN_H,
            container_rect.center().y + TRACK_HEIGHT * 0.5,
        ),
    );
    painter.rect(
        track_rect,
        Rounding::same(TRACK_HEIGHT * 0.5),
        track_bg,
        Stroke::new(1.0, track_border),
    );

    let span = control.end - control.start;
    let t = if span > 0.0 {
        ((control.value - control.start) / span).clamp(0.0, 1.0) as f32
    } else {
        0.0
    };
    if t > 0.0 {
        let fill_right = track_rect.left() + track_rect.width() * t;
        painter.rect(
            Rect::from_min_max(
                pos2(track_rect.left(), track_rect.top()),
                pos2(fill_right, track_rect.bottom()),
            ),
            Rounding::same(TRACK_HEIGHT * 0.5),
            control.bar_color,
            Stroke::NONE,
        );
    }
}
