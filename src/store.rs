use dashmap::DashMap;

use crate::types::AnalysisRecord;

/// In-memory map from venue name to its latest analysis snapshot. At most one
/// record per venue; a new computation overwrites, never appends. Individual
/// reads are atomic, but a snapshot taken during a refresh may mix fresh and
/// one-refresh-old records.
#[derive(Debug, Default)]
pub struct AnalysisStore {
    records: DashMap<String, AnalysisRecord>,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Replaces any existing record for the same venue. Does not touch the
    /// recommended flag on other records; the analyzer owns that invariant.
    pub fn upsert(&self, record: AnalysisRecord) {
        self.records.insert(record.venue_name.clone(), record);
    }

    pub fn get(&self, venue_name: &str) -> Option<AnalysisRecord> {
        self.records.get(venue_name).map(|r| r.value().clone())
    }

    /// Snapshot of all current records, unordered.
    pub fn get_all(&self) -> Vec<AnalysisRecord> {
        self.records.iter().map(|r| r.value().clone()).collect()
    }

    /// Clears the recommended flag on every record except `keep`. Used by the
    /// analyzer on rotation so a stale record cannot keep a second flag alive
    /// when its venue fails the forced refresh.
    pub fn clear_recommended_except(&self, keep: &str) {
        for mut entry in self.records.iter_mut() {
            if entry.key() != keep {
                entry.value_mut().is_recommended = false;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
