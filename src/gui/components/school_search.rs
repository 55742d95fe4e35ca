// src/gui/components/school_search.rs
//
// Searchable school selector: free-text box, debounced backend search,
// option list. Drawing returns the selection event (if any) to the parent.
//
// Idle → (300 ms quiet) → Searching → Idle. Empty text clears the options
// right away and never hits the network.

use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui::{self, RichText, widgets::Spinner};

use crate::{
    api::SchoolApi,
    config::consts::SEARCH_DEBOUNCE_MS,
    debounce::Debouncer,
    error::Result,
    model::SchoolSummary,
    task::{self, Inbox, RequestSeq},
};

pub struct SchoolSearch {
    pub input: String,
    pub options: Vec<SchoolSummary>,
    pub loading: bool,
    /// Option list is hidden after a pick until the text changes again.
    pub open: bool,
    debounce: Debouncer<String>,
    seq: RequestSeq,
    inbox: Inbox<Result<Vec<SchoolSummary>>>,
}

impl Default for SchoolSearch {
    fn default() -> Self {
        Self::new(Duration::from_millis(SEARCH_DEBOUNCE_MS))
    }
}

impl SchoolSearch {
    pub fn new(delay: Duration) -> Self {
        Self {
            input: s!(),
            options: Vec::new(),
            loading: false,
            open: false,
            debounce: Debouncer::new(delay),
            seq: RequestSeq::default(),
            inbox: Inbox::default(),
        }
    }

    /// Replace the text (as if typed) and react to the change.
    pub fn set_input(&mut self, text: &str, now: Instant) {
        self.input = s!(text);
        self.input_changed(now);
    }

    /// Call after `input` was edited in place (the text box does this).
    pub fn input_changed(&mut self, now: Instant) {
        self.open = true;
        if self.input.is_empty() {
            self.debounce.cancel();
            self.seq.invalidate();
            self.options.clear();
            self.loading = false;
            logd!("Search: cleared");
        } else {
            self.debounce.push(self.input.clone(), now);
        }
    }

    /// Due query, if the quiet period has elapsed. Marks the selector busy.
    pub fn tick(&mut self, now: Instant) -> Option<(u64, String)> {
        let query = self.debounce.poll(now)?;
        let seq = self.seq.issue();
        self.loading = true;
        logf!("Search: seq={seq} q={query:?}");
        Some((seq, query))
    }

    /// Fire the due query (if any) on a worker.
    pub fn pump(&mut self, api: &Arc<dyn SchoolApi>, repaint: Option<egui::Context>, now: Instant) {
        if let Some((seq, query)) = self.tick(now) {
            let api = Arc::clone(api);
            task::spawn(repaint, self.inbox.sender(), seq, move || api.search_schools(&query));
        }
    }

    /// Apply finished searches that arrived since the last frame.
    pub fn poll(&mut self) {
        for (seq, result) in self.inbox.drain() {
            self.apply(seq, result);
        }
    }

    /// Latest request wins; older answers are dropped. Returns whether applied.
    pub fn apply(&mut self, seq: u64, result: Result<Vec<SchoolSummary>>) -> bool {
        if !self.seq.is_latest(seq) {
            logd!("Search: stale seq={seq} dropped");
            return false;
        }
        self.loading = false;
        match result {
            Ok(options) => {
                logd!("Search: seq={seq} → {} option(s)", options.len());
                self.options = options;
            }
            Err(e) => {
                loge!("Search: seq={seq} failed: {e}");
                self.options.clear();
            }
        }
        true
    }

    /// Selection event for option `index`. Every pick emits, repeats included.
    pub fn select(&mut self, index: usize) -> Option<SchoolSummary> {
        let picked = self.options.get(index).cloned()?;
        self.input = picked.label();
        self.debounce.cancel();
        self.open = false;
        logf!("Search: selected id={} ({})", picked.id, picked.name());
        Some(picked)
    }

    /// When the UI must wake up to fire a pending search.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }
}

pub fn draw(ui: &mut egui::Ui, search: &mut SchoolSearch) -> Option<SchoolSummary> {
    ui.horizontal(|ui| {
        let resp = ui.add(
            egui::TextEdit::singleline(&mut search.input)
                .hint_text("Search for schools")
                .desired_width(420.0),
        );
        if resp.changed() {
            search.input_changed(Instant::now());
        }
        if resp.gained_focus() && !search.options.is_empty() {
            search.open = true;
        }
        if search.loading {
            ui.add(Spinner::new().size(16.0));
        }
    });

    if !search.open || search.options.is_empty() {
        let settled = !search.loading && !search.debounce.is_pending();
        if search.open && settled && !search.input.is_empty() {
            ui.weak("No matching schools");
        }
        return None;
    }

    let mut picked = None;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        egui::ScrollArea::vertical()
            .id_salt("school_search_options")
            .max_height(220.0)
            .show(ui, |ui| {
                for (idx, option) in search.options.iter().enumerate() {
                    let resp = ui.selectable_label(false, RichText::new(option.name()).strong());
                    if let Some(locality) = option.locality() {
                        ui.label(RichText::new(locality).small().weak());
                    }
                    if resp.clicked() {
                        picked = Some(idx);
                    }
                }
            });
    });

    picked.and_then(|idx| search.select(idx))
}
