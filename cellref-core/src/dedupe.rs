use sqlx::PgPool;

use crate::{
    error::StagingError,
    ops::{
        count_staged_cells, delete_duplicate_eci, delete_duplicate_nci,
        delete_radio_crossing_duplicates,
    },
    types::DedupeReport,
    PoolConfig,
};

// Thin layer on top of the raw staging operations - mostly just avoids users
// having to take a dep on sqlx, and owns the transaction boundary.
pub struct Deduplicator {
    pool: PgPool,
    table: String,
}

impl Deduplicator {
    pub async fn new(config: PoolConfig, table: &str) -> Result<Self, StagingError> {
        let pool = config
            .connect()
            .await
            .map_err(|error| StagingError::PoolCreationError { error })?;

        Ok(Self::from_pool(pool, table))
    }

    pub fn from_pool(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            table: table.to_owned(),
        }
    }

    /// Remove duplicate cell identifiers from the staging table.
    ///
    /// Three passes run in strict order inside a single transaction:
    /// 1. the radio-crossing purge (non-radio rows sharing an eci, nci or
    ///    lcid with any other row),
    /// 2. the table-wide eci purge,
    /// 3. the table-wide nci purge.
    ///
    /// The order is load-bearing: rows removed by the first pass no longer
    /// count towards the duplicate groups of the later passes. Any failure
    /// aborts the transaction, leaving the table exactly as it was, and no
    /// report is produced.
    ///
    /// There is no table-wide lcid pass; see DESIGN.md.
    pub async fn dedupe_cell_identifiers(&self) -> Result<DedupeReport, StagingError> {
        let mut tx =
            self.pool
                .begin()
                .await
                .map_err(|error| StagingError::TransactionError {
                    command: "BEGIN".to_owned(),
                    error,
                })?;

        delete_radio_crossing_duplicates(&mut *tx, &self.table).await?;
        let removed_eci = delete_duplicate_eci(&mut *tx, &self.table).await?;
        let removed_nci = delete_duplicate_nci(&mut *tx, &self.table).await?;

        tx.commit()
            .await
            .map_err(|error| StagingError::TransactionError {
                command: "COMMIT".to_owned(),
                error,
            })?;

        Ok(DedupeReport {
            removed_eci,
            removed_nci,
        })
    }

    /// Number of rows currently in the staging table.
    pub async fn staged_cell_count(&self) -> Result<u64, StagingError> {
        count_staged_cells(&self.pool, &self.table).await
    }
}
