// src/config/consts.rs

// Backend
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

// Google Maps
pub const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const STATIC_MAP_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";
pub const MAP_ZOOM: u8 = 15;
pub const MAP_SIZE: (u32, u32) = (640, 300);

// Net
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const USER_AGENT: &str = concat!("hs_trends/", env!("CARGO_PKG_VERSION"));

// Search
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

// Env keys (first match wins)
pub const ENV_API_URL: &[&str] = &["HS_TRENDS_API_URL", "REACT_APP_API_URL"];
pub const ENV_MAPS_KEY: &[&str] = &["GOOGLE_MAPS_API_KEY", "REACT_APP_GOOGLE_MAPS_API_KEY"];
pub const ENV_TIMEOUT: &str = "HS_TRENDS_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "HS_TRENDS_LOG";
pub const ENV_LOG_FILE: &str = "HS_TRENDS_LOG_FILE";

// Window
pub const WINDOW_W: f32 = 1100.0;
pub const WINDOW_H: f32 = 800.0;
