// src/gui/components/location_card.rs
//
// School address card with a geocoded static map. Geocodes on mount and
// whenever the school changes; failures render inline inside the card and
// never leave it.

use std::sync::Arc;

use eframe::egui::{self, ColorImage, RichText, TextureHandle, TextureOptions, load::SizedTexture};

use crate::{
    error::{FetchError, Result},
    geocode::{self, Geocoder, MapImage},
    model::{Coordinates, School},
    task::{self, Inbox, RequestSeq},
};

#[derive(Clone, Debug, PartialEq)]
pub enum LocationStatus {
    Loading,
    Ready {
        at: Coordinates,
        /// Static map could not be fetched; coordinates still shown.
        map_error: Option<String>,
    },
    Failed(String),
}

/// What a finished geocode job hands back to the card.
#[derive(Debug)]
pub struct Located {
    pub at: Coordinates,
    pub map: Result<MapImage>,
}

/// Geocode `query`, then fetch the map image. Only the geocode step is fatal.
pub fn locate(geo: &dyn Geocoder, query: &str) -> Result<Located> {
    let at = geo.geocode(query)?;
    let map = geo.static_map(at);
    if let Err(e) = &map {
        logw!("Location: map image unavailable: {e}");
    }
    Ok(Located { at, map })
}

pub struct LocationCard {
    pub school: School,
    pub status: LocationStatus,
    seq: RequestSeq,
    inbox: Inbox<Result<Located>>,
    pixels: Option<MapImage>,
    texture: Option<TextureHandle>,
}

impl LocationCard {
    /// Mount for `school` and start geocoding it.
    pub fn mount(
        school: School,
        geo: &Arc<dyn Geocoder>,
        repaint: Option<egui::Context>,
    ) -> Self {
        let mut card = Self {
            school: School::default(),
            status: LocationStatus::Loading,
            seq: RequestSeq::default(),
            inbox: Inbox::default(),
            pixels: None,
            texture: None,
        };
        card.begin(school, geo, repaint);
        card
    }

    /// Switch to another school. The same school (by id and address) that
    /// is already located only takes the fresh detail; anything else
    /// geocodes again.
    pub fn set_school(
        &mut self,
        school: School,
        geo: &Arc<dyn Geocoder>,
        repaint: Option<egui::Context>,
    ) {
        let located = matches!(self.status, LocationStatus::Ready { .. });
        let same_place = school.id == self.school.id
            && geocode::postal_query(&school) == geocode::postal_query(&self.school);
        if located && same_place {
            let location = self.school.location;
            self.school = School { location, ..school };
            return;
        }
        self.begin(school, geo, repaint);
    }

    fn begin(
        &mut self,
        school: School,
        geo: &Arc<dyn Geocoder>,
        repaint: Option<egui::Context>,
    ) {
        let seq = self.seq.issue();
        self.pixels = None;
        self.texture = None;
        self.school = school;

        let Some(query) = geocode::postal_query(&self.school) else {
            self.status = failed(&FetchError::Config(s!("School has no postal address")));
            return;
        };

        logf!("Location: seq={seq} geocoding {query:?}");
        self.status = LocationStatus::Loading;
        let geo = Arc::clone(geo);
        task::spawn(repaint, self.inbox.sender(), seq, move || {
            locate(geo.as_ref(), &query)
        });
    }

    pub fn poll(&mut self) {
        for (seq, result) in self.inbox.drain() {
            self.apply(seq, result);
        }
    }

    /// Latest request wins; answers to superseded requests are dropped,
    /// whatever the current status. Returns whether applied.
    pub fn apply(&mut self, seq: u64, result: Result<Located>) -> bool {
        if !self.seq.is_latest(seq) {
            logd!("Location: stale seq={seq} dropped");
            return false;
        }
        match result {
            Ok(Located { at, map }) => {
                logf!("Location: seq={seq} at {:.5},{:.5}", at.lat, at.lng);
                self.school.location = Some(at);
                let map_error = match map {
                    Ok(img) => {
                        self.pixels = Some(img);
                        None
                    }
                    Err(e) => Some(e.to_string()),
                };
                self.status = LocationStatus::Ready { at, map_error };
            }
            Err(e) => {
                loge!("Location: seq={seq} failed: {e}");
                self.status = failed(&e);
            }
        }
        true
    }

    pub fn has_map_image(&self) -> bool {
        self.pixels.is_some() || self.texture.is_some()
    }

    /// Upload pending pixels once; later frames reuse the handle.
    fn texture(&mut self, ctx: &egui::Context) -> Option<&TextureHandle> {
        if let Some(img) = self.pixels.take() {
            let color = ColorImage::from_rgba_unmultiplied(img.size, &img.rgba);
            let handle = ctx.load_texture("school_static_map", color, TextureOptions::LINEAR);
            self.texture = Some(handle);
        }
        self.texture.as_ref()
    }
}

fn failed(e: &FetchError) -> LocationStatus {
    LocationStatus::Failed(format!("Failed to load map location: {e}"))
}

fn field(ui: &mut egui::Ui, label: &str, value: &Option<String>) {
    ui.label(RichText::new(label).strong());
    ui.label(value.as_deref().unwrap_or("—"));
    ui.end_row();
}

pub fn draw(ui: &mut egui::Ui, card: &mut LocationCard) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.heading(format!("{} Key Takeaways", card.school.name()));

        ui.horizontal_top(|ui| {
            egui::Grid::new("location_card_address").num_columns(2).show(ui, |ui| {
                field(ui, "Address:", &card.school.address);
                field(ui, "City:", &card.school.city);
                field(ui, "State:", &card.school.state);
            });
            ui.add_space(32.0);
            egui::Grid::new("location_card_district").num_columns(2).show(ui, |ui| {
                field(ui, "District:", &card.school.district);
                field(ui, "Grades:", &card.school.grades);
                field(ui, "Phone:", &card.school.phone);
            });
        });

        ui.add_space(8.0);

        match card.status.clone() {
            LocationStatus::Loading => {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.spinner();
                    ui.add_space(40.0);
                });
            }
            LocationStatus::Failed(msg) => {
                ui.colored_label(ui.visuals().error_fg_color, msg);
            }
            LocationStatus::Ready { at, map_error } => {
                let ctx = ui.ctx().clone();
                if let Some(tex) = card.texture(&ctx) {
                    let width = ui.available_width().min(tex.size_vec2().x);
                    ui.add(egui::Image::new(SizedTexture::from_handle(tex)).max_width(width));
                }
                if let Some(err) = map_error {
                    ui.weak(format!("Map image unavailable: {err}"));
                }
                ui.horizontal(|ui| {
                    ui.label(format!("{:.5}, {:.5}", at.lat, at.lng));
                    ui.hyperlink_to("Open in Google Maps", geocode::maps_link(at));
                });
            }
        }
    });
}
