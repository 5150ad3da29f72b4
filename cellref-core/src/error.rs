use thiserror::Error;

/// Enumeration of errors for operations against the cell staging table.
/// Errors originate from sqlx and are wrapped by us to provide additional context,
/// in particular which delete pass was running when the transaction was aborted.
#[derive(Error, Debug)]
pub enum StagingError {
    #[error("pool creation failed with: {error}")]
    PoolCreationError { error: sqlx::Error },
    #[error("{command} query failed with: {error}")]
    QueryError { command: String, error: sqlx::Error },
    #[error("transaction {command} failed with: {error}")]
    TransactionError { command: String, error: sqlx::Error },
}
