use std::time::Instant;

use cellref_core::{Deduplicator, StagingError};
use sqlx::postgres::PgPool;
use tracing::{info, warn};

use crate::{
    config::{JanitorConfig, JanitorSettings},
    metrics_constants::*,
};

// The janitor reports its own metrics, this is mostly for testing purposes
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CleanupResult {
    pub removed_by_eci: u64,
    pub removed_by_nci: u64,
}

pub struct Janitor {
    pub inner: Deduplicator,
    pub settings: JanitorSettings,
    pub metrics_labels: Vec<(&'static str, String)>,
}

impl Janitor {
    pub async fn new(config: JanitorConfig) -> Result<Self, StagingError> {
        let settings = config.settings;
        let inner = Deduplicator::new(config.pool, &settings.table_name).await?;

        Ok(Self {
            metrics_labels: metrics_labels(&settings),
            inner,
            settings,
        })
    }

    pub fn from_pool(pool: PgPool, settings: JanitorSettings) -> Self {
        Self {
            inner: Deduplicator::from_pool(pool, &settings.table_name),
            metrics_labels: metrics_labels(&settings),
            settings,
        }
    }

    pub async fn run_once(&self) -> Result<CleanupResult, StagingError> {
        info!("running cell identifier cleanup");
        metrics::counter!(RUN_STARTS, &self.metrics_labels).increment(1);
        let start = Instant::now();

        let report = self.inner.dedupe_cell_identifiers().await?;

        metrics::histogram!(RUN_TIME, &self.metrics_labels)
            .record(start.elapsed().as_millis() as f64);

        let removed_by_eci = report.removed_by_eci();
        if removed_by_eci > 0 {
            warn!(
                "{} rows dropped for an ECI duplicated across cells, eci values: {:?}",
                removed_by_eci,
                report.distinct_eci()
            );
        }
        metrics::counter!(ECI_REMOVED_COUNT, &self.metrics_labels).increment(removed_by_eci);

        let removed_by_nci = report.removed_by_nci();
        if removed_by_nci > 0 {
            warn!(
                "{} rows dropped for an NCI duplicated across cells, nci values: {:?}",
                removed_by_nci,
                report.distinct_nci()
            );
        }
        metrics::counter!(NCI_REMOVED_COUNT, &self.metrics_labels).increment(removed_by_nci);

        let staged = self.inner.staged_cell_count().await?;
        metrics::gauge!(STAGING_DEPTH, &self.metrics_labels).set(staged as f64);

        metrics::counter!(RUN_ENDS, &self.metrics_labels).increment(1);
        info!("cell identifier cleanup complete");

        Ok(CleanupResult {
            removed_by_eci,
            removed_by_nci,
        })
    }
}

fn metrics_labels(settings: &JanitorSettings) -> Vec<(&'static str, String)> {
    vec![
        ("janitor_id", settings.id.clone()),
        ("table", settings.table_name.clone()),
    ]
}
