use std::collections::HashSet;

/// The outcome of one deduplication run. A fresh report is produced by every
/// execution, so counts can never leak from a previous run.
///
/// Only the two table-wide passes are accounted for here: rows removed by the
/// radio-crossing pass are intentionally absent (they no longer exist by the
/// time the table-wide passes compute their duplicate groups).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupeReport {
    /// The eci value of every row deleted by the table-wide eci pass, one
    /// entry per row (a duplicated value appears as many times as rows
    /// carried it).
    pub removed_eci: Vec<i64>,
    /// Same, for the table-wide nci pass.
    pub removed_nci: Vec<i64>,
}

impl DedupeReport {
    /// Number of rows deleted by the table-wide eci pass.
    pub fn removed_by_eci(&self) -> u64 {
        self.removed_eci.len() as u64
    }

    /// Number of rows deleted by the table-wide nci pass.
    pub fn removed_by_nci(&self) -> u64 {
        self.removed_nci.len() as u64
    }

    /// Distinct eci values involved in the removals, for reporting.
    pub fn distinct_eci(&self) -> HashSet<i64> {
        self.removed_eci.iter().copied().collect()
    }

    /// Distinct nci values involved in the removals, for reporting.
    pub fn distinct_nci(&self) -> HashSet<i64> {
        self.removed_nci.iter().copied().collect()
    }
}
