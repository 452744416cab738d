// Filter and pagination engine for the admin table

use crate::application::dataset::DatasetStore;
use crate::domain::telemetry::TelemetryRecord;
use chrono::{DateTime, Utc};

/// Rows per admin table page.
pub const PAGE_SIZE: usize = 12;

/// Active admin filters. All fields optional; an empty criteria set passes
/// every record through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub entity_id: Option<String>,
    pub free_text: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }
}

/// Apply the criteria to the full dataset, returning indices into the store
/// in dataset order. The engine never copies records.
pub fn apply(store: &DatasetStore, criteria: &FilterCriteria) -> Vec<usize> {
    let needle = criteria
        .free_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    store
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(record, criteria, needle.as_deref()))
        .map(|(i, _)| i)
        .collect()
}

fn matches(record: &TelemetryRecord, criteria: &FilterCriteria, needle: Option<&str>) -> bool {
    // Date bounds only apply to records that carry a parsed timestamp; rows
    // with an unparseable date stay visible under any range.
    if let (Some(from), Some(ts)) = (criteria.from, record.timestamp) {
        if ts < from {
            return false;
        }
    }
    if let (Some(to), Some(ts)) = (criteria.to, record.timestamp) {
        if ts > to {
            return false;
        }
    }
    if let Some(entity) = criteria.entity_id.as_deref() {
        if record.entity_id.as_deref() != Some(entity) {
            return false;
        }
    }
    if let Some(needle) = needle {
        if !haystack(record).contains(needle) {
            return false;
        }
    }
    true
}

/// Concatenated searchable text for the free-text filter.
fn haystack(record: &TelemetryRecord) -> String {
    fn opt_f64(v: Option<f64>) -> String {
        v.map(|n| n.to_string()).unwrap_or_default()
    }

    format!(
        "{} {} {} {} {}",
        record.entity_id.as_deref().unwrap_or(""),
        opt_f64(record.ambient_temp),
        opt_f64(record.object_temp),
        opt_f64(record.heart_rate),
        record.raw_timestamp,
    )
    .to_lowercase()
}

pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE).max(1)
}

/// Slice of the filtered indices shown on a 1-based page.
pub fn page_slice(filtered: &[usize], page: usize) -> &[usize] {
    let page = page.max(1);
    let start = (page - 1) * PAGE_SIZE;
    if start >= filtered.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(filtered.len());
    &filtered[start..end]
}

/// One pagination control in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Prev(usize),
    Page { number: usize, active: bool },
    Next(usize),
}

/// Button set around the current page: up to two numbers either side, clamped
/// to the valid range, with prev/next only where they lead somewhere.
pub fn page_controls(current: usize, total: usize) -> Vec<PageControl> {
    let pages = page_count(total);
    let current = current.clamp(1, pages);
    let start = current.saturating_sub(2).max(1);
    let end = (current + 2).min(pages);

    let mut controls = Vec::new();
    if current > 1 {
        controls.push(PageControl::Prev(current - 1));
    }
    for number in start..=end {
        controls.push(PageControl::Page {
            number,
            active: number == current,
        });
    }
    if current < pages {
        controls.push(PageControl::Next(current + 1));
    }
    controls
}
