// src/geocode.rs
//
// Address → coordinates via the Google Geocoding API, plus the static map
// image shown in the location card. Blocking; run from a worker thread.

use reqwest::{Url, blocking::Client};
use serde::Deserialize;

use crate::{
    config::{consts::{MAP_SIZE, MAP_ZOOM, USER_AGENT}, options::MapsOptions},
    error::{FetchError, Result},
    model::{Coordinates, School},
};

pub trait Geocoder: Send + Sync {
    /// Resolve a single-line postal address.
    fn geocode(&self, address: &str) -> Result<Coordinates>;

    /// Map image centred on `at` with one marker.
    fn static_map(&self, at: Coordinates) -> Result<MapImage>;
}

/// Decoded RGBA pixels, ready to upload as a texture.
#[derive(Clone, Debug, PartialEq)]
pub struct MapImage {
    pub size: [usize; 2],
    pub rgba: Vec<u8>,
}

impl MapImage {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let (w, h) = img.dimensions();
        Ok(Self { size: [w as usize, h as usize], rgba: img.into_raw() })
    }
}

/// `"{address}, {city}, {state}"`, skipping blank parts.
pub fn postal_query(school: &School) -> Option<String> {
    let parts: Vec<&str> = [&school.address, &school.city, &school.state]
        .into_iter()
        .filter_map(|p| p.as_deref().map(str::trim))
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() { None } else { Some(parts.join(", ")) }
}

/// Browser link for the coordinates.
pub fn maps_link(at: Coordinates) -> String {
    format!("https://www.google.com/maps/search/?api=1&query={:.6},{:.6}", at.lat, at.lng)
}

/* ---------- provider payload ---------- */

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Interpret a geocoding response body. Anything but `"OK"` with at least
/// one result is a provider error.
pub fn parse_geocode(body: &str) -> Result<Coordinates> {
    let resp: GeocodeResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    if resp.status == "OK" {
        if let Some(first) = resp.results.first() {
            let LatLng { lat, lng } = first.geometry.location;
            return Ok(Coordinates { lat, lng });
        }
    }

    let reason = match resp.error_message {
        Some(msg) if !msg.trim().is_empty() => msg,
        _ if resp.status == "OK" => s!("Unable to geocode address"),
        _ => format!("Unable to geocode address ({})", resp.status),
    };
    Err(FetchError::Provider(reason))
}

/* ---------- Google client ---------- */

pub struct GoogleGeocoder {
    http: Client,
    key: Option<String>,
    geocode_url: String,
    static_map_url: String,
}

impl GoogleGeocoder {
    pub fn new(maps: &MapsOptions, timeout: std::time::Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Config(format!("HTTP client: {e}")))?;
        Ok(Self::with_client(maps, http))
    }

    pub fn with_client(maps: &MapsOptions, http: Client) -> Self {
        Self {
            http,
            key: maps.api_key.clone(),
            geocode_url: maps.geocode_url.clone(),
            static_map_url: maps.static_map_url.clone(),
        }
    }

    fn key(&self) -> Result<&str> {
        self.key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| FetchError::Config(s!("Google Maps API key is missing or undefined")))
    }

    fn endpoint(base: &str, params: &[(&str, &str)]) -> Result<Url> {
        Url::parse_with_params(base, params)
            .map_err(|e| FetchError::Config(format!("Invalid maps endpoint {base:?}: {e}")))
    }
}

impl Geocoder for GoogleGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinates> {
        let key = self.key()?;
        let url = Self::endpoint(&self.geocode_url, &[("address", address), ("key", key)])?;
        logd!("Geocode: GET address={address:?}");

        let resp = self.http.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            let status = status.as_u16();
            return Err(FetchError::Status { what: "Geocoding request failed", status });
        }
        let body = resp.text()?;
        parse_geocode(&body)
    }

    fn static_map(&self, at: Coordinates) -> Result<MapImage> {
        let key = self.key()?;
        let center = format!("{:.6},{:.6}", at.lat, at.lng);
        let size = format!("{}x{}", MAP_SIZE.0, MAP_SIZE.1);
        let zoom = MAP_ZOOM.to_string();
        let url = Self::endpoint(
            &self.static_map_url,
            &[
                ("center", center.as_str()),
                ("zoom", zoom.as_str()),
                ("size", size.as_str()),
                ("markers", center.as_str()),
                ("key", key),
            ],
        )?;

        let resp = self.http.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            let status = status.as_u16();
            return Err(FetchError::Status { what: "Map image request failed", status });
        }
        let bytes = resp.bytes()?;
        MapImage::decode(&bytes)
    }
}
