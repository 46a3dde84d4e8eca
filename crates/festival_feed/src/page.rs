use std::time::Instant;

use chrono::NaiveDate;
use rand::Rng;
use shared::protocol::FestivalRecord;

use crate::{
    display_order, loading::LoadingTicker, map::MapView, map::MarkerSelection, matches_month,
    recommend,
};

/// Per-view state of the festival list: the fetched batch plus transient
/// selections. Dropped when the view is left.
#[derive(Debug, Clone)]
pub struct FestivalPage {
    records: Vec<FestivalRecord>,
    loading: bool,
    ticker: LoadingTicker,
    selected_month: Option<u32>,
    recommended: Option<usize>,
    markers: MarkerSelection,
}

impl FestivalPage {
    pub fn new(now: Instant) -> Self {
        Self {
            records: Vec::new(),
            loading: true,
            ticker: LoadingTicker::new(now),
            selected_month: None,
            recommended: None,
            markers: MarkerSelection::default(),
        }
    }

    /// Replaces the batch. A failed fetch arrives here as an empty list.
    pub fn finish_loading(&mut self, records: Vec<FestivalRecord>) {
        self.records = records;
        self.loading = false;
        self.recommended = None;
        self.reset_markers();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn records(&self) -> &[FestivalRecord] {
        &self.records
    }

    pub fn loading_message(&self) -> &'static str {
        self.ticker.message()
    }

    pub fn ticker(&self) -> &LoadingTicker {
        &self.ticker
    }

    pub fn tick_loading<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> bool {
        self.loading && self.ticker.tick(now, rng)
    }

    pub fn selected_month(&self) -> Option<u32> {
        self.selected_month
    }

    /// Selecting the active month again clears the filter.
    pub fn toggle_month(&mut self, month: u32) {
        if !(1..=12).contains(&month) {
            return;
        }
        self.selected_month = if self.selected_month == Some(month) {
            None
        } else {
            Some(month)
        };
        self.reset_markers();
    }

    fn passes_filter(&self, record: &FestivalRecord) -> bool {
        self.selected_month
            .map_or(true, |month| matches_month(record, month))
    }

    fn reset_markers(&mut self) {
        let shown_len = self
            .records
            .iter()
            .filter(|record| self.passes_filter(record))
            .count();
        self.markers.reset_for(shown_len);
    }

    /// Batch indices of the shown list: display order, then the month filter.
    pub fn shown_indices(&self, today: NaiveDate) -> Vec<usize> {
        display_order(&self.records, today)
            .into_iter()
            .filter(|&index| self.passes_filter(&self.records[index]))
            .collect()
    }

    pub fn shown(&self, today: NaiveDate) -> Vec<&FestivalRecord> {
        self.shown_indices(today)
            .into_iter()
            .map(|index| &self.records[index])
            .collect()
    }

    /// Rolls a new recommendation. No-op on an empty batch.
    pub fn recommend<R: Rng + ?Sized>(
        &mut self,
        today: NaiveDate,
        rng: &mut R,
    ) -> Option<&FestivalRecord> {
        if let Some(index) = recommend(&self.records, self.selected_month, today, rng) {
            self.recommended = Some(index);
        }
        self.recommended()
    }

    pub fn recommended(&self) -> Option<&FestivalRecord> {
        self.recommended.and_then(|index| self.records.get(index))
    }

    pub fn map_view(&self, today: NaiveDate) -> MapView {
        MapView::for_festivals(&self.shown(today))
    }

    pub fn active_marker(&self) -> Option<usize> {
        self.markers.active()
    }

    pub fn select_marker(&mut self, index: usize) {
        self.markers.select(index);
    }

    pub fn close_marker(&mut self) {
        self.markers.close();
    }

    pub fn empty_state_message(&self, name: Option<&str>) -> String {
        match (self.selected_month, name.filter(|name| !name.is_empty())) {
            (Some(month), Some(name)) => format!(
                "Nothing listed for month {month} yet, {name}. We'll update as soon as we find some."
            ),
            (Some(month), None) => format!(
                "Nothing listed for month {month} yet. We'll update as soon as we find some."
            ),
            (None, _) => "No festival info available.".to_string(),
        }
    }
}
