use eframe::egui::{self, pos2, Color32, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use crate::ui_constants::control::{ROUNDING, TRACK_HEIGHT, TRACK_MARGIN_H};
use crate::widgets::SliderControl;

/// Single-thumb slider snapping to the control's step.
/// Returns Some(new_value) if dragged to a new value this frame.
pub fn value_slider(
    ui: &mut Ui,
    name: &str,
    value_text: &str,
    control: &SliderControl,
) -> Option<f64> {
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

    let t_cur = ((control.value - control.start) / span).clamp(0.0, 1.0) as f32;
    let thumb_x = egui::lerp(track_rect.left()..=track_rect.right(), t_cur);

    // Fill up to the thumb in the widget's bar color.
    painter.rect(
        Rect::from_min_max(
            pos2(track_rect.left(), track_rect.top()),
            pos2(thumb_x, track_rect.bottom()),
        ),
        Rounding::same(TRACK_HEIGHT * 0.5),
        control.bar_color,
        Stroke::NONE,
    );

    let thumb_size = Vec2::new(14.0, (height - 10.0).clamp(18.0, 28.0));
    let mut thumb_rect =
        Rect::from_center_size(pos2(thumb_x, container_rect.center().y), thumb_size);

    let id = ui.id().with("value_slider").with(name.to_string());
    let response = ui
        .interact(container_rect, id, Sense::click_and_drag())
        .on_hover_cursor(egui::CursorIcon::PointingHand);

    let mut changed_to: Option<f64> = None;
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
            if snapped != control.value {
                changed_to = Some(snapped);
                let new_t = ((snapped - control.start) / span).clamp(0.0, 1.0) as f32;
                let new_x = egui::lerp(track_rect.left()..=track_rect.right(), new_t);
                thumb_rect =
                    Rect::from_center_size(pos2(new_x, container_rect.center().y), thumb_size);
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
    painter.rect(
        thumb_rect,
        Rounding::same(4.0),
        thumb_fill_col,
        Stroke::new(1.0, thumb_outline),
    );

    changed_to
}
