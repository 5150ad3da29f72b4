use crate::error::StagingError;

// The staging table name varies per deployment, and sqlx does not support
// binding identifiers, so the (quoted) table name is interpolated into each
// statement. Nothing else is interpolated; values always go through binds.

/// The radio-crossing purge: delete every non-radio row whose eci, nci or
/// lcid is shared with at least one other row. The duplicate counts consider
/// all rows, radio or not; only the deletion itself is restricted to
/// `is_radio = false`. The UNION collapses rows matching several predicates,
/// so each row is deleted exactly once.
///
/// Returns the number of rows deleted. Callers do not report this count:
/// these rows never reach the table-wide passes below.
pub async fn delete_radio_crossing_duplicates<'c, E>(
    executor: E,
    table: &str,
) -> Result<u64, StagingError>
where
    E: sqlx::Executor<'c, Database = sqlx::Postgres>,
{
    let base_query = format!(
        r#"
DELETE FROM "{0}" WHERE id IN (
    SELECT id FROM "{0}" sc
    WHERE sc.eci IS NOT NULL
    AND (SELECT COUNT(*) FROM "{0}" sc2 WHERE sc2.eci = sc.eci) > 1
    AND is_radio = false
    UNION
    SELECT id FROM "{0}" sc
    WHERE sc.nci IS NOT NULL
    AND (SELECT COUNT(*) FROM "{0}" sc2 WHERE sc2.nci = sc.nci) > 1
    AND is_radio = false
    UNION
    SELECT id FROM "{0}" sc
    WHERE sc.lcid IS NOT NULL
    AND (SELECT COUNT(*) FROM "{0}" sc2 WHERE sc2.lcid = sc.lcid) > 1
    AND is_radio = false
)
        "#,
        table
    );

    let result = sqlx::query(&base_query)
        .execute(executor)
        .await
        .map_err(|error| StagingError::QueryError {
            command: "DELETE radio-crossing duplicates".to_owned(),
            error,
        })?;

    Ok(result.rows_affected())
}

/// The table-wide eci purge: delete every row (regardless of is_radio) whose
/// eci is shared by two or more remaining rows, returning the eci of each
/// deleted row. Rows with a NULL eci never match (`eci IN (NULL)` is not
/// true), so they are left alone.
pub async fn delete_duplicate_eci<'c, E>(executor: E, table: &str) -> Result<Vec<i64>, StagingError>
where
    E: sqlx::Executor<'c, Database = sqlx::Postgres>,
{
    let base_query = format!(
        r#"
DELETE FROM "{0}" WHERE eci IN (
    SELECT eci FROM "{0}"
    GROUP BY eci
    HAVING COUNT(*) > 1
)
RETURNING eci
        "#,
        table
    );

    sqlx::query_scalar(&base_query)
        .fetch_all(executor)
        .await
        .map_err(|error| StagingError::QueryError {
            command: "DELETE duplicate eci".to_owned(),
            error,
        })
}

/// The table-wide nci purge, same shape as the eci purge.
pub async fn delete_duplicate_nci<'c, E>(executor: E, table: &str) -> Result<Vec<i64>, StagingError>
where
    E: sqlx::Executor<'c, Database = sqlx::Postgres>,
{
    let base_query = format!(
        r#"
DELETE FROM "{0}" WHERE nci IN (
    SELECT nci FROM "{0}"
    GROUP BY nci
    HAVING COUNT(*) > 1
)
RETURNING nci
        "#,
        table
    );

    sqlx::query_scalar(&base_query)
        .fetch_all(executor)
        .await
        .map_err(|error| StagingError::QueryError {
            command: "DELETE duplicate nci".to_owned(),
            error,
        })
}

/// Number of rows currently staged. Reported as a gauge by the janitor.
pub async fn count_staged_cells<'c, E>(executor: E, table: &str) -> Result<u64, StagingError>
where
    E: sqlx::Executor<'c, Database = sqlx::Postgres>,
{
    let base_query = format!(r#"SELECT COUNT(*) FROM "{0}""#, table);

    let count: i64 = sqlx::query_scalar(&base_query)
        .fetch_one(executor)
        .await
        .map_err(|error| StagingError::QueryError {
            command: "SELECT staged cell count".to_owned(),
            error,
        })?;

    Ok(count as u64)
}
