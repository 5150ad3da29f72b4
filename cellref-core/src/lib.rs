mod ops;

// We do this pattern (privately use a module, then re-export parts of it) so we can
// refactor the internals without breaking the public API.

// Types
mod types;
pub use types::DedupeReport;

// Errors
mod error;
pub use error::StagingError;

// The deduplication step itself
mod dedupe;
pub use dedupe::Deduplicator;

// Config
mod config;
pub use config::PoolConfig;

/// Default name of the staging table the upstream pipeline loads candidate
/// cells into. Deployments with several staging areas override it.
pub const DEFAULT_STAGING_TABLE: &str = "cell_staging";
