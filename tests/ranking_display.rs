// tests/ranking_display.rs
//
// Selection → fetch → view state, driven through RankingDisplay with
// in-memory backends.
mod common;

use std::sync::Arc;
use std::time::Instant;

use common::fakes::{self, FakeApi, FakeGeocoder, LINCOLN_AT, summary, wait_for};
use hs_trends::api::SchoolApi;
use hs_trends::error::FetchError;
use hs_trends::geocode::Geocoder;
use hs_trends::gui::components::location_card::LocationStatus;
use hs_trends::gui::components::ranking_display::{RankingDisplay, SchoolData, load_school};
use hs_trends::model::RankingField;
use hs_trends::rankings::SortDir;

type Harness = (RankingDisplay, Arc<FakeApi>, Arc<FakeGeocoder>);

fn display_with(api: FakeApi, geo: FakeGeocoder) -> Harness {
    let api = Arc::new(api);
    let geo = Arc::new(geo);
    let dyn_api: Arc<dyn SchoolApi> = api.clone();
    let dyn_geo: Arc<dyn Geocoder> = geo.clone();
    (RankingDisplay::new(dyn_api, dyn_geo, None), api, geo)
}

fn settle(d: &mut RankingDisplay) {
    wait_for(|| {
        d.poll(Instant::now());
        let located = d
            .location
            .as_ref()
            .is_none_or(|card| card.status != LocationStatus::Loading);
        !d.view.loading && located
    });
}

#[test]
fn selecting_a_school_loads_history_in_year_order() {
    let (mut d, api, _) = display_with(fakes::backend(), fakes::geocoder());
    d.select(summary("42", "Lincoln High", "Springfield", "IL"));
    assert!(d.view.loading);
    assert!(!d.view.has_data());
    settle(&mut d);

    let mut calls = api.calls();
    calls.sort();
    assert_eq!(calls, vec!["rankings 42", "school 42"]);

    assert!(d.view.has_data());
    assert_eq!(d.view.error, None);
    assert_eq!(d.view.table().years(), vec![2020, 2021]);

    let chart = d.view.chart();
    assert_eq!(chart.points, vec![[2020.0, 60.0], [2021.0, 50.0]]);
    assert!(chart.invert_y);

    let card = d.location.as_ref().unwrap();
    assert_eq!(card.school.name(), "Lincoln High");
    assert_eq!(card.status, LocationStatus::Ready { at: LINCOLN_AT, map_error: None });
    assert_eq!(card.school.location, Some(LINCOLN_AT));
    assert!(card.has_map_image());
}

#[test]
fn missing_rankings_show_the_soft_message() {
    let (mut d, _, geo) = display_with(fakes::backend(), fakes::geocoder());
    d.select(summary("7", "Quiet High", "Springfield", "IL"));
    settle(&mut d);

    let err = d.view.error.clone().unwrap();
    assert_eq!(err.message, "No ranking data available for this school");
    assert!(err.soft);
    assert!(!d.view.has_data());
    assert!(d.view.records.is_empty());
    assert!(d.location.is_none());
    assert!(geo.queries().is_empty());
}

#[test]
fn geocode_failure_stays_inside_the_card() {
    let (mut d, _, _) = display_with(fakes::backend(), FakeGeocoder::default());
    d.select(summary("42", "Lincoln High", "Springfield", "IL"));
    settle(&mut d);

    assert!(d.view.has_data());
    assert_eq!(d.view.error, None);
    assert_eq!(
        d.location.as_ref().unwrap().status,
        LocationStatus::Failed(
            "Failed to load map location: Unable to geocode address (ZERO_RESULTS)".into()
        )
    );
}

#[test]
fn map_image_failure_keeps_the_coordinates() {
    let mut geo = fakes::geocoder();
    geo.map_error = Some(FetchError::Config("Google Maps API key is missing or undefined".into()));
    let (mut d, _, _) = display_with(fakes::backend(), geo);
    d.select(summary("42", "Lincoln High", "Springfield", "IL"));
    settle(&mut d);

    let card = d.location.as_ref().unwrap();
    assert_eq!(
        card.status,
        LocationStatus::Ready {
            at: LINCOLN_AT,
            map_error: Some("Google Maps API key is missing or undefined".into()),
        }
    );
    assert!(!card.has_map_image());
}

#[test]
fn superseded_selection_is_dropped() {
    let (mut d, _, _) = display_with(fakes::backend(), fakes::geocoder());
    let first = d.select(summary("42", "Lincoln High", "Springfield", "IL"));
    let second = d.select(summary("7", "Quiet High", "Springfield", "IL"));
    assert!(second > first);

    let late = SchoolData {
        school: fakes::school("42", "Lincoln High", None),
        records: vec![fakes::record(2020, 1, None)],
    };
    assert!(!d.apply(first, Ok(late)));
    assert!(d.view.loading);

    settle(&mut d);
    assert_eq!(d.view.selected.as_ref().map(|s| s.id.as_str()), Some("7"));
    assert!(d.view.records.is_empty());
    assert!(d.view.error.as_ref().is_some_and(|e| e.soft));
}

#[test]
fn sort_and_filter_only_touch_the_view() {
    let (mut d, _, _) = display_with(fakes::backend(), fakes::geocoder());
    d.select(summary("42", "Lincoln High", "Springfield", "IL"));
    settle(&mut d);

    d.toggle_sort(RankingField::Year);
    assert_eq!(d.view.sort.dir, SortDir::Desc);
    assert_eq!(d.view.table().years(), vec![2021, 2020]);

    d.set_filter("silver");
    assert_eq!(d.view.table().years(), vec![2020]);
    assert_eq!(d.view.chart().points, vec![[2020.0, 60.0]]);

    // canonical history is untouched
    let years: Vec<i32> = d.view.records.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![2020, 2021]);

    // a fresh fetch resets sort and filter
    d.select(summary("42", "Lincoln High", "Springfield", "IL"));
    settle(&mut d);
    assert_eq!(d.view.filter, "");
    assert_eq!(d.view.table().years(), vec![2020, 2021]);
}

#[test]
fn reselecting_same_school_keeps_the_located_card() {
    let (mut d, _, geo) = display_with(fakes::backend(), fakes::geocoder());
    d.select(summary("42", "Lincoln High", "Springfield", "IL"));
    settle(&mut d);
    d.select(summary("42", "Lincoln High", "Springfield", "IL"));
    settle(&mut d);

    assert_eq!(geo.queries(), vec![fakes::LINCOLN_QUERY]);
    assert!(matches!(d.location.as_ref().unwrap().status, LocationStatus::Ready { .. }));
}

#[test]
fn rankings_error_wins_when_both_lookups_fail() {
    let api = FakeApi::default();
    let err = load_school(&api, "13").unwrap_err();
    assert_eq!(err, FetchError::NotFound);
}

#[test]
fn detail_failure_fails_the_selection() {
    let mut api = fakes::backend();
    api.schools.remove("42");
    let (mut d, _, _) = display_with(api, fakes::geocoder());
    d.select(summary("42", "Lincoln High", "Springfield", "IL"));
    settle(&mut d);

    let err = d.view.error.clone().unwrap();
    assert_eq!(err.message, "Failed to fetch school data (HTTP 404)");
    assert!(!err.soft);
    assert!(!d.view.has_data());
}
