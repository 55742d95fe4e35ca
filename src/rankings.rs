// src/rankings.rs
//
// View-layer derivations over a school's ranking history.
//
// - SortState: active column + direction, with header-click toggling.
// - RankingView: zero-copy sorted-then-filtered view (row indexes into the
//                canonical record slice).
// - ChartSeries: year → national rank points for the line chart.
//
// The canonical Vec<RankingRecord> is owned by the Ranking Display and is
// never reordered by user actions; only the views are.

use std::cmp::Ordering;

use crate::model::{RankingField, RankingRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn flip(self) -> Self {
        match self { SortDir::Asc => SortDir::Desc, SortDir::Desc => SortDir::Asc }
    }

    pub fn arrow(self) -> &'static str {
        match self { SortDir::Asc => "▲", SortDir::Desc => "▼" }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState {
    pub field: RankingField,
    pub dir: SortDir,
}

impl Default for SortState {
    fn default() -> Self {
        Self { field: RankingField::Year, dir: SortDir::Asc }
    }
}

impl SortState {
    /// Header click: same column flips direction, another column starts ascending.
    pub fn toggle(&mut self, field: RankingField) {
        if self.field == field {
            self.dir = self.dir.flip();
        } else {
            self.field = field;
            self.dir = SortDir::Asc;
        }
    }

    pub fn compare(&self, a: &RankingRecord, b: &RankingRecord) -> Ordering {
        let ord = self.field.value(a).cmp(&self.field.value(b));
        match self.dir { SortDir::Asc => ord, SortDir::Desc => ord.reverse() }
    }

    /// Direction shown on `field`'s header, if it is the active column.
    pub fn indicator(&self, field: RankingField) -> Option<SortDir> {
        (self.field == field).then_some(self.dir)
    }
}

/// Canonical post-fetch order: ascending by year, stable.
pub fn sort_by_year(records: &mut [RankingRecord]) {
    records.sort_by_key(|r| r.year);
}

/// Case-insensitive substring match over every field's display text.
/// `needle` must already be lowercased.
pub fn matches_filter(r: &RankingRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    RankingField::ALL
        .iter()
        .any(|f| f.value(r).to_string().to_lowercase().contains(needle))
}

/// Sorted, then filtered, projection of the canonical records.
#[derive(Clone, Debug)]
pub struct RankingView<'a> {
    /// Positions of kept rows in the canonical slice, in display order
    pub row_ix: Vec<usize>,
    raw: &'a [RankingRecord],
}

impl<'a> RankingView<'a> {
    pub fn build(raw: &'a [RankingRecord], sort: SortState, filter: &str) -> Self {
        let mut row_ix: Vec<usize> = (0..raw.len()).collect();
        // stable: equal keys keep canonical (year) order
        row_ix.sort_by(|&a, &b| sort.compare(&raw[a], &raw[b]));

        let needle = filter.to_lowercase();
        row_ix.retain(|&i| matches_filter(&raw[i], &needle));

        Self { row_ix, raw }
    }

    pub fn len(&self) -> usize { self.row_ix.len() }
    pub fn is_empty(&self) -> bool { self.row_ix.is_empty() }

    pub fn row(&self, i: usize) -> Option<&'a RankingRecord> {
        self.row_ix.get(i).and_then(|&ix| self.raw.get(ix))
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a RankingRecord> + '_ {
        self.row_ix.iter().filter_map(|&ix| self.raw.get(ix))
    }

    pub fn years(&self) -> Vec<i32> {
        self.rows().map(|r| r.year).collect()
    }
}

/// Line chart data: x = year, y = national rank, drawn with rank 1 on top.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSeries {
    /// `[year, rank]`, ordered by year
    pub points: Vec<[f64; 2]>,
    /// `(min year, max year)` of the data; None when empty
    pub x_range: Option<(f64, f64)>,
    /// `(best rank, worst rank)`; None when empty
    pub rank_range: Option<(f64, f64)>,
    pub invert_y: bool,
}

impl ChartSeries {
    pub fn from_view(view: &RankingView<'_>) -> Self {
        let mut points: Vec<[f64; 2]> = view
            .rows()
            .map(|r| [r.year as f64, r.national_rank as f64])
            .collect();
        points.sort_by(|a, b| a[0].total_cmp(&b[0]));

        let span = |col: usize| {
            let mut it = points.iter().map(|p| p[col]);
            let first = it.next()?;
            Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
        };
        let x_range = span(0);
        let rank_range = span(1);

        Self { points, x_range, rank_range, invert_y: true }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in plot space. The plot's Y axis grows upward, so an inverted
    /// axis is drawn by negating ranks and un-negating the tick labels.
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|&[x, y]| [x, self.to_plot_y(y)]).collect()
    }

    pub fn to_plot_y(&self, rank: f64) -> f64 {
        if self.invert_y { -rank } else { rank }
    }

    pub fn from_plot_y(&self, y: f64) -> f64 {
        if self.invert_y { -y } else { y }
    }
}
