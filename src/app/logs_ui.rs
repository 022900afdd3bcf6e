// Log window in its own OS viewport, fed by the in-app logger buffer.

use std::sync::atomic::{AtomicBool, Ordering};

use eframe::egui;
use log::Level;

static OPEN: AtomicBool = AtomicBool::new(false);
static FOLLOW_TAIL: AtomicBool = AtomicBool::new(true);

pub fn open_logs() {
    OPEN.store(true, Ordering::Relaxed);
}

pub fn draw_logs_viewport(ctx: &egui::Context) {
    if !OPEN.load(Ordering::Relaxed) {
        return;
    }

    ctx.show_viewport_deferred(
        egui::ViewportId::from_hash_of("logs_window"),
        egui::ViewportBuilder::default()
            .with_title("Logs")
            .with_inner_size([760.0, 480.0])
            .with_resizable(true),
        move |ctx, _class| {
            if ctx.input(|i| i.viewport().close_requested()) {
                OPEN.store(false, Ordering::Relaxed);
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
            egui::CentralPanel::default().show(ctx, |ui| {
                toolbar(ui);
                ui.separator();
                log_lines(ui);
            });
        },
    );
}

fn toolbar(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        if ui.button("Clear").clicked() {
            crate::logger::clear();
        }
        if ui.button("Copy").clicked() {
            let text = crate::logger::all_lines().join("\n");
            ui.output_mut(|o| o.copied_text = text);
        }
        let mut follow = FOLLOW_TAIL.load(Ordering::Relaxed);
        if ui.checkbox(&mut follow, "Follow tail").changed() {
            FOLLOW_TAIL.store(follow, Ordering::Relaxed);
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(format!("{} lines", crate::logger::len()));
        });
    });
}

// Virtualized: only the visible rows are laid out, batched into one job.
fn log_lines(ui: &mut egui::Ui) {
    let mut scroll = egui::ScrollArea::vertical().auto_shrink([false, false]);
    if FOLLOW_TAIL.load(Ordering::Relaxed) {
        scroll = scroll.stick_to_bottom(true);
    }

    let total = crate::logger::len();
    let row_height = ui.text_style_height(&egui::TextStyle::Monospace) + 2.0;
    scroll.show_rows(ui, row_height, total, |ui, rows| {
        let mut job = egui::text::LayoutJob::default();
        crate::logger::for_each_range(rows.start, rows.end, |e| {
            let fmt = egui::TextFormat {
                color: level_color(e.level),
                font_id: egui::FontId::monospace(12.0),
                ..Default::default()
            };
            job.append(&format!("{:>5} | {}: {}\n", e.level, e.target, e.msg), 0.0, fmt);
        });
        ui.label(job);
    });
}

fn level_color(level: Level) -> egui::Color32 {
    match level {
        Level::Error => egui::Color32::from_rgb(225, 85, 85),
        Level::Warn => egui::Color32::from_rgb(230, 195, 90),
        Level::Info => egui::Color32::from_rgb(205, 205, 205),
        Level::Debug => egui::Color32::from_rgb(115, 175, 250),
        Level::Trace => egui::Color32::from_rgb(150, 150, 150),
    }
}
