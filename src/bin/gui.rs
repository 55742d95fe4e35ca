// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use eframe::egui::ViewportBuilder;
use hs_trends::{
    config::{consts::{WINDOW_H, WINDOW_W}, options::{AppOptions, LogOptions}},
    gui, logging,
};

fn main() {
    let log = LogOptions::from_env();
    if let Err(e) = logging::init(log.level, log.file.as_deref()) {
        eprintln!("Logger unavailable: {e}");
    }
    let opts = AppOptions::from_env();

    let native = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("HS Trends")
            .with_inner_size([WINDOW_W, WINDOW_H]),
        ..Default::default()
    };

    if let Err(e) = gui::run(native, opts) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
