#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
// Entry point stays minimal: window config and app startup only.
// Application logic lives in the app module (src/app.rs).

use eframe::{egui, egui_wgpu::WgpuConfiguration};

mod app;
mod dashboard;
mod data;
mod logger;
mod types;
mod ui_constants;
mod views;
mod widgets;

fn main() -> eframe::Result<()> {
    // Initialize in-app GUI logger (also mirrors to stderr)
    logger::init();
    let theme = widgets::ThemeProperties::load_from_disk();

    let wgpu_options = WgpuConfiguration {
        present_mode: eframe::wgpu::PresentMode::AutoNoVsync,
        ..Default::default()
    };
    let native_options = eframe::NativeOptions {
        renderer: eframe::Renderer::Wgpu,
        vsync: false,
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        wgpu_options,
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_resizable(true),
        ..Default::default()
    };

    let res = eframe::run_native(
        "siftboard",
        native_options,
        Box::new(|_cc| Box::new(app::DashApp::new(theme))),
    );
    if let Err(ref e) = res {
        log::error!("eframe::run_native failed: {e}");
    }
    res
}
