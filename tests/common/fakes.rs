// tests/common/fakes.rs
//
// In-memory SchoolApi / Geocoder with call recording.

use std::collections::HashMap;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use hs_trends::api::SchoolApi;
use hs_trends::error::{FetchError, Result};
use hs_trends::geocode::{Geocoder, MapImage};
use hs_trends::model::{Coordinates, RankingRecord, School, SchoolSummary};

#[derive(Default)]
pub struct FakeApi {
    pub schools: HashMap<String, School>,
    pub rankings: HashMap<String, Result<Vec<RankingRecord>>>,
    pub results: Vec<SchoolSummary>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl SchoolApi for FakeApi {
    fn get_school(&self, id: &str) -> Result<School> {
        self.record(format!("school {id}"));
        self.schools
            .get(id)
            .cloned()
            .ok_or(FetchError::Status { what: "Failed to fetch school data", status: 404 })
    }

    fn search_schools(&self, name: &str) -> Result<Vec<SchoolSummary>> {
        self.record(format!("search {name}"));
        let needle = name.to_lowercase();
        Ok(self
            .results
            .iter()
            .filter(|s| s.name().to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn get_rankings(&self, id: &str) -> Result<Vec<RankingRecord>> {
        self.record(format!("rankings {id}"));
        self.rankings.get(id).cloned().unwrap_or(Err(FetchError::NotFound))
    }
}

#[derive(Default)]
pub struct FakeGeocoder {
    /// query → answer; unknown queries get ZERO_RESULTS
    pub answers: HashMap<String, Coordinates>,
    pub map_error: Option<FetchError>,
    pub queries: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl Geocoder for FakeGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinates> {
        self.queries.lock().unwrap().push(address.to_string());
        self.answers
            .get(address)
            .copied()
            .ok_or_else(|| FetchError::Provider("Unable to geocode address (ZERO_RESULTS)".into()))
    }

    fn static_map(&self, _at: Coordinates) -> Result<MapImage> {
        match &self.map_error {
            Some(e) => Err(e.clone()),
            None => Ok(MapImage { size: [2, 1], rgba: vec![255; 8] }),
        }
    }
}

pub fn summary(id: &str, name: &str, city: &str, state: &str) -> SchoolSummary {
    SchoolSummary {
        id: id.into(),
        name: Some(name.into()),
        city: Some(city.into()),
        state: Some(state.into()),
    }
}

pub fn school(id: &str, name: &str, address: Option<&str>) -> School {
    School {
        id: id.into(),
        name: Some(name.into()),
        address: address.map(String::from),
        city: Some("Springfield".into()),
        state: Some("IL".into()),
        ..School::default()
    }
}

pub fn record(year: i32, rank: u32, medal: Option<&str>) -> RankingRecord {
    RankingRecord {
        year,
        national_rank: rank,
        medal_awarded: medal.map(String::from),
        ..RankingRecord::default()
    }
}

pub const LINCOLN_QUERY: &str = "1 Main St, Springfield, IL";
pub const LINCOLN_AT: Coordinates = Coordinates { lat: 39.7817, lng: -89.6501 };

/// Lincoln (42) has two years of history in reverse order; Quiet (7) has none.
pub fn backend() -> FakeApi {
    let mut api = FakeApi::default();
    api.schools.insert("42".into(), school("42", "Lincoln High", Some("1 Main St")));
    api.schools.insert("7".into(), school("7", "Quiet High", Some("9 Elm St")));
    api.rankings.insert(
        "42".into(),
        Ok(vec![record(2021, 50, Some("Gold")), record(2020, 60, Some("Silver"))]),
    );
    api.results = vec![
        summary("42", "Lincoln High", "Springfield", "IL"),
        summary("7", "Quiet High", "Springfield", "IL"),
    ];
    api
}

pub fn geocoder() -> FakeGeocoder {
    let mut geo = FakeGeocoder::default();
    geo.answers.insert(LINCOLN_QUERY.into(), LINCOLN_AT);
    geo
}

/// Spin until `step` reports done. Panics after 5 s.
pub fn wait_for<F>(mut step: F)
where
    F: FnMut() -> bool,
{
    let deadline = Instant::now() + Duration::from_secs(5);
    while !step() {
        assert!(Instant::now() < deadline, "timed out waiting for background work");
        thread::sleep(Duration::from_millis(5));
    }
}
