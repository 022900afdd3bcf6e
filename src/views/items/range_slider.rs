use eframe::egui::{self, pos2, Color32, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use crate::ui_constants::control::{ROUNDING, TRACK_HEIGHT, TRACK_MARGIN_H};
use crate::widgets::RangeControl;

/// Two-thumb range slider over a continuous span, snapping to the
/// control's step. Header row: name on the left, active span on the right.
/// Returns Some((low, high)) if dragged to a new span this frame.
pub fn range_slider(
    ui: &mut Ui,
    name: &str,
    value_text: &str,
    control: &RangeControl,
) -> Option<(f64, f64)> {
    crate::views::ui_helpers::item_header(ui, name, value_text);

    let span = control.end - control.start;
    if span <= 0.0 {
        return None;
    }

    let available_width = ui.available_width().min(control.width);
    let height = control.height.clamp(28.0, 40.0);
    let border_color = Color32::from_gray(80);
    let container_bg = Color32::from_rgb(30, 30, 30);
    let track_bg = Color32::from_rgb(25, 25, 25);
    let track_border = Color32::from_gray(60);
    let thumb_fill = Color32::from_rgb(52, 52, 52);
    let thumb_outline = Color32::from_gray(50);

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

    let to_x = |v: f64| {
        let t = ((v - control.start) / span).clamp(0.0, 1.0) as f32;
        egui::lerp(track_rect.left()..=track_rect.right(), t)
    };
    let (low, high) = control.value;
    let low_x = to_x(low);
    let high_x = to_x(high);

    // Selected span in the widget's bar color; repainted on datatile load.
    painter.rect(
        Rect::from_min_max(
            pos2(low_x, track_rect.top()),
            pos2(high_x, track_rect.bottom()),
        ),
        Rounding::same(TRACK_HEIGHT * 0.5),
        control.bar_color,
        Stroke::NONE,
    );

    let thumb_size = Vec2::new(14.0, (height - 10.0).clamp(18.0, 28.0));
    let low_thumb = Rect::from_center_size(pos2(low_x, container_rect.center().y), thumb_size);
    let high_thumb = Rect::from_center_size(pos2(high_x, container_rect.center().y), thumb_size);

    let id = ui.id().with("range_slider").with(name.to_string());
    let response = ui
        .interact(container_rect, id, Sense::click_and_drag())
        .on_hover_cursor(egui::CursorIcon::PointingHand);

    let mut changed_to: Option<(f64, f64)> = None;
    if response.clicked() || response.dragged() {
        if let Some(pointer) = response.interact_pointer_pos() {
            let x = pointer.x.clamp(track_rect.left(), track_rect.right());
            let t = if track_rect.width() > 0.0 {
                (x - track_rect.left()) / track_rect.width()
            } else {
                0.0
            }
            .clamp(0.0, 1.0);

            let raw = control.start + t as f64 * span;
            let step = if control.step > 0.0 { control.step } else { 1.0 };
            let snapped = (control.start + ((raw - control.start) / step).round() * step)
                .clamp(control.start, control.end);

            // The nearer thumb follows the pointer.
            let candidate = if (x - low_x).abs() <= (x - high_x).abs() {
                (snapped.min(high), high)
            } else {
                (low, snapped.max(low))
            };
            if candidate != (low, high) {
                changed_to = Some(candidate);
            }
        }
    }

    let hovered = response.hovered();
    let thumb_fill_col = if hovered {
        Color32::from_rgb(
            thumb_fill.r().saturating_add(6),
            thumb_fill.g().saturating_add(6),
            thumb_fill.b().saturating_add(6),
        )
    } else {
        thumb_fill
    };
    for thumb_rect in [low_thumb, high_thumb] {
        painter.rect(
            thumb_rect,
            Rounding::same(4.0),
            thumb_fill_col,
            Stroke::new(1.0, thumb_outline),
        );
    }

    changed_to
}
