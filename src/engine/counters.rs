use crate::types::{CleanupTableRow, SummaryTableRow};

/// Tally of one pipeline run. Starts at zero and only ever grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub examined: u64,
    pub accepted: u64,
    pub rejected: u64,
}

impl RunCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn examine(&mut self) {
        self.examined += 1;
    }

    pub fn reject(&mut self) {
        self.rejected += 1;
    }

    pub fn accept(&mut self, count: usize) {
        self.accepted += count as u64;
    }

    pub fn summary_row(&self) -> SummaryTableRow {
        SummaryTableRow {
            examined: self.examined,
            added: self.accepted,
            skipped: self.rejected,
        }
    }

    /// Row for runs whose accepted items are playlists that were cleaned.
    pub fn cleanup_row(&self) -> CleanupTableRow {
        CleanupTableRow {
            examined: self.examined,
            cleaned: self.accepted,
            skipped: self.rejected,
        }
    }
}
