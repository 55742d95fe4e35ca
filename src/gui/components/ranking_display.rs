// src/gui/components/ranking_display.rs
//
// Composition root of the page: owns the selection, the ranking history,
// loading/error state, sort and filter. Mounts the selector, the chart,
// the table and the location card.
//
// ViewState is replaced wholesale on every selection; background answers
// carry the request seq and only the latest one lands.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use eframe::egui::{self, RichText};

use crate::{
    api::SchoolApi,
    error::{FetchError, Result},
    geocode::Geocoder,
    model::{RankingField, RankingRecord, School, SchoolSummary},
    rankings::{self, ChartSeries, RankingView, SortState},
    task::{self, Inbox, RequestSeq},
};

use super::{
    location_card::{self, LocationCard},
    ranking_chart, ranking_table,
    school_search::{self, SchoolSearch},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewError {
    pub message: String,
    /// "No data" rather than a failure; rendered muted.
    pub soft: bool,
}

impl From<&FetchError> for ViewError {
    fn from(e: &FetchError) -> Self {
        Self { message: e.to_string(), soft: e.is_soft() }
    }
}

/// Everything shown for the current selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    pub selected: Option<SchoolSummary>,
    pub school: Option<School>,
    /// Canonical history, ascending by year
    pub records: Vec<RankingRecord>,
    pub loading: bool,
    pub error: Option<ViewError>,
    pub sort: SortState,
    pub filter: String,
}

impl ViewState {
    fn loading_for(summary: SchoolSummary) -> Self {
        Self { selected: Some(summary), loading: true, ..Self::default() }
    }

    pub fn has_data(&self) -> bool {
        self.selected.is_some() && !self.records.is_empty()
    }

    /// Sorted, then filtered rows for the table.
    pub fn table(&self) -> RankingView<'_> {
        RankingView::build(&self.records, self.sort, &self.filter)
    }

    pub fn chart(&self) -> ChartSeries {
        ChartSeries::from_view(&self.table())
    }
}

/// Detail + history for one school.
#[derive(Clone, Debug, PartialEq)]
pub struct SchoolData {
    pub school: School,
    pub records: Vec<RankingRecord>,
}

/// Fetch detail and rankings in parallel; both must succeed. When both
/// fail, the rankings error is reported.
pub fn load_school(api: &dyn SchoolApi, id: &str) -> Result<SchoolData> {
    let (detail, rankings) = thread::scope(|s| {
        let detail = s.spawn(|| api.get_school(id));
        let rankings = api.get_rankings(id);
        (detail.join(), rankings)
    });
    let detail = detail.unwrap_or_else(|_| Err(FetchError::Network(s!("school lookup aborted"))));

    let mut records = rankings?;
    let school = detail?;
    rankings::sort_by_year(&mut records);
    Ok(SchoolData { school, records })
}

pub struct RankingDisplay {
    pub view: ViewState,
    pub search: SchoolSearch,
    pub location: Option<LocationCard>,
    seq: RequestSeq,
    inbox: Inbox<Result<SchoolData>>,
    api: Arc<dyn SchoolApi>,
    geocoder: Arc<dyn Geocoder>,
    repaint: Option<egui::Context>,
}

impl RankingDisplay {
    pub fn new(
        api: Arc<dyn SchoolApi>,
        geocoder: Arc<dyn Geocoder>,
        repaint: Option<egui::Context>,
    ) -> Self {
        Self::with_search(api, geocoder, repaint, SchoolSearch::default())
    }

    pub fn with_search(
        api: Arc<dyn SchoolApi>,
        geocoder: Arc<dyn Geocoder>,
        repaint: Option<egui::Context>,
        search: SchoolSearch,
    ) -> Self {
        Self {
            view: ViewState::default(),
            search,
            location: None,
            seq: RequestSeq::default(),
            inbox: Inbox::default(),
            api,
            geocoder,
            repaint,
        }
    }

    /// Selection event from the selector: reset the view and fetch.
    pub fn select(&mut self, summary: SchoolSummary) -> u64 {
        let seq = self.seq.issue();
        let id = summary.id.clone();
        logf!("Fetch: seq={seq} id={id}");

        // The card stays mounted (hidden while loading) so its own seq
        // drops the previous school's geocode answer.
        self.view = ViewState::loading_for(summary);

        let api = Arc::clone(&self.api);
        task::spawn(self.repaint.clone(), self.inbox.sender(), seq, move || {
            load_school(api.as_ref(), &id)
        });
        seq
    }

    /// Returns whether the answer was current.
    pub fn apply(&mut self, seq: u64, result: Result<SchoolData>) -> bool {
        if !self.seq.is_latest(seq) {
            logd!("Fetch: stale seq={seq} dropped");
            return false;
        }
        self.view.loading = false;
        match result {
            Ok(SchoolData { school, records }) => {
                logf!("Fetch: OK seq={seq} id={} years={}", school.id, records.len());
                self.mount_location(school.clone());
                self.view.school = Some(school);
                self.view.records = records;
                self.view.error = None;
                self.view.sort = SortState::default();
                self.view.filter.clear();
            }
            Err(e) => {
                if e.is_soft() {
                    logf!("Fetch: seq={seq} {e}");
                } else {
                    loge!("Fetch: seq={seq} failed: {e}");
                }
                self.view.school = None;
                self.view.records.clear();
                self.view.error = Some(ViewError::from(&e));
                self.location = None;
            }
        }
        true
    }

    fn mount_location(&mut self, school: School) {
        let repaint = self.repaint.clone();
        match self.location.as_mut() {
            Some(card) => card.set_school(school, &self.geocoder, repaint),
            None => self.location = Some(LocationCard::mount(school, &self.geocoder, repaint)),
        }
    }

    pub fn toggle_sort(&mut self, field: RankingField) {
        self.view.sort.toggle(field);
        logd!("UI: Sort → {:?} {:?}", self.view.sort.field, self.view.sort.dir);
    }

    pub fn set_filter(&mut self, text: &str) {
        self.view.filter = s!(text);
    }

    /// Per-frame housekeeping: land finished requests, fire due searches.
    pub fn poll(&mut self, now: Instant) {
        for (seq, result) in self.inbox.drain() {
            self.apply(seq, result);
        }
        self.search.poll();
        self.search.pump(&self.api, self.repaint.clone(), now);
        if let Some(card) = &mut self.location {
            card.poll();
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.search.next_deadline()
    }
}

pub fn draw(ui: &mut egui::Ui, display: &mut RankingDisplay) {
    ui.heading("School National Rank Comparison");
    ui.add_space(6.0);

    if let Some(summary) = school_search::draw(ui, &mut display.search) {
        display.select(summary);
    }

    if display.view.loading {
        ui.label("Loading...");
    }
    if let Some(err) = &display.view.error {
        if err.soft {
            ui.colored_label(ui.visuals().warn_fg_color, &err.message);
        } else {
            ui.colored_label(ui.visuals().error_fg_color, &err.message);
        }
    }

    if !display.view.has_data() {
        return;
    }

    ui.add_space(12.0);
    if let Some(card) = &mut display.location {
        location_card::draw(ui, card);
        ui.add_space(12.0);
    }

    ranking_chart::draw(ui, &display.view.chart());

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Filter table").strong());
        ui.add(
            egui::TextEdit::singleline(&mut display.view.filter)
                .hint_text("any column")
                .desired_width(f32::INFINITY),
        );
    });
    ui.add_space(8.0);

    let clicked = ranking_table::draw(ui, &display.view.table(), display.view.sort);
    if let Some(field) = clicked {
        display.toggle_sort(field);
    }
}
