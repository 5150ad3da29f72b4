pub const RUN_STARTS: &str = "cellref_janitor_run_starts";
pub const RUN_TIME: &str = "cellref_janitor_total_run_ms";
pub const RUN_ENDS: &str = "cellref_janitor_run_ends";

pub const ECI_REMOVED_COUNT: &str = "cellref_janitor_duplicate_eci_rows_removed";
pub const NCI_REMOVED_COUNT: &str = "cellref_janitor_duplicate_nci_rows_removed";

// Staging-table depth after each run, for operators watching an import.
pub const STAGING_DEPTH: &str = "cellref_staged_cells";
