// Dataset store - single owner of the normalized telemetry records

use crate::domain::telemetry::TelemetryRecord;
use std::cmp::Ordering;

/// Number of history rows extracted per entity for the admin charts.
pub const HISTORY_LIMIT: usize = 200;

/// Source of truth for both views. Holds the full normalized dataset sorted
/// newest-first; derived views keep indices into it, never copies, so a
/// single refresh updates every view consistently.
#[derive(Debug, Default)]
pub struct DatasetStore {
    records: Vec<TelemetryRecord>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole dataset with a fresh snapshot.
    ///
    /// The endpoint's ordering is not trusted: records are re-sorted
    /// descending by parsed timestamp, un-timestamped records after all
    /// timestamped ones (stable sort keeps their relative order).
    pub fn replace(&mut self, mut records: Vec<TelemetryRecord>) {
        records.sort_by(|a, b| match (a.timestamp, b.timestamp) {
            (Some(ta), Some(tb)) => tb.cmp(&ta),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        self.records = records;
    }

    pub fn records(&self) -> &[TelemetryRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&TelemetryRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent record; the sort invariant makes this the first element.
    pub fn latest(&self) -> Option<&TelemetryRecord> {
        self.records.first()
    }

    /// Sorted, de-duplicated entity ids for the filter select.
    pub fn entity_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .records
            .iter()
            .filter_map(|r| r.entity_id.clone())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Indices of one entity's records in chronological order, capped to the
    /// most recent [`HISTORY_LIMIT`]. The dataset is newest-first, so the cap
    /// is a prefix take before reversing for the charts.
    pub fn history_for(&self, entity_id: &str) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.entity_id.as_deref() == Some(entity_id))
            .map(|(i, _)| i)
            .take(HISTORY_LIMIT)
            .collect();
        indices.reverse();
        indices
    }

    /// Locate a record by its opaque id, used to re-anchor the admin
    /// selection after a snapshot replacement.
    pub fn find_by_id(&self, id: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.id.as_deref() == Some(id))
    }

    pub fn contains_entity(&self, entity_id: &str) -> bool {
        self.records
            .iter()
            .any(|r| r.entity_id.as_deref() == Some(entity_id))
    }
}
