//! Festival feed shaping: past/upcoming classification, display ordering,
//! month filtering and the random recommendation pool.
//!
//! Every operation takes `today` from the caller so that classification is
//! recomputed against the current clock on each call.

use chrono::NaiveDate;
use rand::{seq::SliceRandom, Rng};
use shared::protocol::FestivalRecord;
use tracing::debug;
use url::Url;

pub mod loading;
pub mod map;
pub mod page;

pub use loading::LoadingTicker;
pub use map::{GeoPoint, MapMarker, MapView, MarkerSelection};
pub use page::FestivalPage;

pub const SEARCH_BASE_URL: &str = "https://search.naver.com/search.naver";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FestivalStatus {
    Upcoming = 0,
    Past = 1,
}

/// Parses a festival date at day granularity. Anything after the date part
/// (a time of day, a timezone) is ignored.
pub fn parse_festival_date(text: Option<&str>) -> Option<NaiveDate> {
    let text = text?.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, DATE_FORMAT) {
        return Some(date);
    }
    let prefix = text.get(..10)?;
    NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok()
}

pub fn start_date(record: &FestivalRecord) -> Option<NaiveDate> {
    parse_festival_date(record.start_date.as_deref())
}

/// Missing or unparseable dates are never past.
pub fn classify(record: &FestivalRecord, today: NaiveDate) -> FestivalStatus {
    match start_date(record) {
        Some(date) if date < today => FestivalStatus::Past,
        _ => FestivalStatus::Upcoming,
    }
}

pub fn is_past(record: &FestivalRecord, today: NaiveDate) -> bool {
    classify(record, today) == FestivalStatus::Past
}

fn display_key(record: &FestivalRecord, today: NaiveDate) -> (FestivalStatus, NaiveDate) {
    (
        classify(record, today),
        start_date(record).unwrap_or(NaiveDate::MAX),
    )
}

/// Batch indices in display order: upcoming before past, then ascending start
/// date with undated records last in their group. The sort is stable.
pub fn display_order(records: &[FestivalRecord], today: NaiveDate) -> Vec<usize> {
    let mut keyed: Vec<(usize, (FestivalStatus, NaiveDate))> = records
        .iter()
        .enumerate()
        .map(|(index, record)| (index, display_key(record, today)))
        .collect();
    keyed.sort_by_key(|(_, key)| *key);
    keyed.into_iter().map(|(index, _)| index).collect()
}

/// Sorted copy of the batch; the input is left untouched.
pub fn sort_for_display(records: &[FestivalRecord], today: NaiveDate) -> Vec<FestivalRecord> {
    display_order(records, today)
        .into_iter()
        .map(|index| records[index].clone())
        .collect()
}

/// Month component of a `YYYY-MM-DD` text, read leniently from its leading
/// digits. Returns 0 when there is nothing to read.
pub fn month_of(text: Option<&str>) -> u32 {
    let Some(component) = text.and_then(|text| text.split('-').nth(1)) else {
        return 0;
    };
    let digits: String = component
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

pub fn matches_month(record: &FestivalRecord, month: u32) -> bool {
    month_of(record.start_date.as_deref()) == month
}

pub fn filter_by_month(records: &[FestivalRecord], month: u32) -> Vec<FestivalRecord> {
    records
        .iter()
        .filter(|record| matches_month(record, month))
        .cloned()
        .collect()
}

/// Which fallback produced the recommendation candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolTier {
    UpcomingInMonth,
    Upcoming,
    Everything,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationPool {
    pub tier: PoolTier,
    pub indices: Vec<usize>,
}

/// Candidate batch indices for a recommendation. Empty only for an empty batch.
pub fn recommendation_pool(
    records: &[FestivalRecord],
    month: Option<u32>,
    today: NaiveDate,
) -> RecommendationPool {
    let upcoming: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| !is_past(record, today))
        .map(|(index, _)| index)
        .collect();

    if let Some(month) = month {
        let in_month: Vec<usize> = upcoming
            .iter()
            .copied()
            .filter(|&index| matches_month(&records[index], month))
            .collect();
        if !in_month.is_empty() {
            return RecommendationPool {
                tier: PoolTier::UpcomingInMonth,
                indices: in_month,
            };
        }
    }

    if !upcoming.is_empty() {
        return RecommendationPool {
            tier: PoolTier::Upcoming,
            indices: upcoming,
        };
    }

    RecommendationPool {
        tier: PoolTier::Everything,
        indices: (0..records.len()).collect(),
    }
}

/// Uniformly picks a batch index from the first non-empty pool.
pub fn recommend<R: Rng + ?Sized>(
    records: &[FestivalRecord],
    month: Option<u32>,
    today: NaiveDate,
    rng: &mut R,
) -> Option<usize> {
    let pool = recommendation_pool(records, month, today);
    let picked = pool.indices.choose(rng).copied();
    debug!(
        tier = ?pool.tier,
        candidates = pool.indices.len(),
        picked = ?picked,
        "festival recommendation rolled"
    );
    picked
}

/// First word of the road address, e.g. the province.
pub fn region_label(record: &FestivalRecord) -> Option<&str> {
    record.road_address.as_deref()?.split_whitespace().next()
}

pub fn search_url(festival_name: &str) -> Result<Url, url::ParseError> {
    Url::parse_with_params(SEARCH_BASE_URL, &[("query", festival_name)])
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
