//! Job Repository
//!
//! Handles all database operations related to job records.

use gauge_core::domain::job::JobRecord;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Create a new job record
///
/// The name is unique; inserting a duplicate is an error, never a second
/// row.
pub async fn create(pool: &SqlitePool, name: &str) -> Result<JobRecord, sqlx::Error> {
    let record = JobRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        eval_id: None,
        data_id: None,
        created_at: chrono::Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO jobs (id, name, created_at)
        VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(record.id.to_string())
    .bind(&record.name)
    .bind(record.created_at)
    .execute(pool)
    .await?;

    Ok(record)
}

/// Find a job record by its unique name
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<JobRecord>, sqlx::Error> {
    let row = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, name, eval_id, data_id, created_at
        FROM jobs
        WHERE name = ?1
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    row.map(JobRecord::try_from).transpose()
}

/// Look up a record by name, creating it on first use
pub async fn find_or_create(pool: &SqlitePool, name: &str) -> Result<JobRecord, sqlx::Error> {
    if let Some(record) = find_by_name(pool, name).await? {
        return Ok(record);
    }

    create(pool, name).await
}

/// List all job records, newest first
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<JobRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, name, eval_id, data_id, created_at
        FROM jobs
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(JobRecord::try_from).collect()
}

/// Record the remote eval identifier once the resource exists
pub async fn set_eval_id(pool: &SqlitePool, id: Uuid, eval_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE jobs SET eval_id = ?1 WHERE id = ?2")
        .bind(eval_id)
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(())
}

/// Record the uploaded dataset identifier
pub async fn set_data_id(pool: &SqlitePool, id: Uuid, data_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE jobs SET data_id = ?1 WHERE id = ?2")
        .bind(data_id)
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(())
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct JobRow {
    id: String,
    name: String,
    eval_id: Option<String>,
    data_id: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<JobRow> for JobRecord {
    type Error = sqlx::Error;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id).map_err(|e| sqlx::Error::ColumnDecode {
            index: "id".to_string(),
            source: Box::new(e),
        })?;

        Ok(JobRecord {
            id,
            name: row.name,
            eval_id: row.eval_id,
            data_id: row.data_id,
            created_at: row.created_at,
        })
    }
}
