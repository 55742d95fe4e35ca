// src/gui/app.rs
//
// Page shell: header, status line, and the Ranking Display in the middle.

use std::{error::Error, sync::Arc, time::Instant};

use eframe::egui;

use crate::{
    api::{ApiClient, SchoolApi},
    config::options::AppOptions,
    geocode::{Geocoder, GoogleGeocoder},
};

use super::components::ranking_display::{self, RankingDisplay};

pub fn run(native: eframe::NativeOptions, opts: AppOptions) -> Result<(), Box<dyn Error>> {
    let api: Arc<dyn SchoolApi> = Arc::new(ApiClient::new(&opts.api)?);
    let geocoder: Arc<dyn Geocoder> = Arc::new(GoogleGeocoder::new(&opts.maps, opts.api.timeout)?);

    eframe::run_native(
        "HS Trends",
        native,
        Box::new(move |cc| Ok(Box::new(App::new(&opts, api, geocoder, Some(cc.egui_ctx.clone()))))),
    )?;
    Ok(())
}

pub struct App {
    pub display: RankingDisplay,
    /// Bottom status line (backend + maps configuration)
    pub status: String,
}

impl App {
    pub fn new(
        opts: &AppOptions,
        api: Arc<dyn SchoolApi>,
        geocoder: Arc<dyn Geocoder>,
        repaint: Option<egui::Context>,
    ) -> Self {
        let maps = if opts.has_maps_key() { "configured" } else { "no API key" };
        let status = join!("API: ", &opts.api.base_url, "  |  Maps: ", maps);
        logf!("Init: api={} maps={maps}", opts.api.base_url);

        Self {
            display: RankingDisplay::new(api, geocoder, repaint),
            status,
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.display.poll(now);

        // Wake up for a pending debounced search even without input.
        if let Some(at) = self.display.next_deadline() {
            ctx.request_repaint_after(at.saturating_duration_since(now));
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("HS Trends");
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.weak(&self.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("page_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ranking_display::draw(ui, &mut self.display);
                });
        });
    }
}
