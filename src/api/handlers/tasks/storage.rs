use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use tracing::{info_span, Instrument};

const TASK_COLUMNS: &str = "id, title, description, completed, user_id, created_at, updated_at";

pub struct TaskRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn record(row: &PgRow) -> TaskRecord {
    TaskRecord {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        completed: row.get("completed"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

pub async fn insert_task(
    pool: &PgPool,
    user_id: i64,
    title: &str,
    description: &str,
) -> Result<TaskRecord, sqlx::Error> {
    let query = format!(
        "INSERT INTO tasks (title, description, user_id) VALUES ($1, $2, $3) \
         RETURNING {TASK_COLUMNS}"
    );
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = %query
    );
    let row = sqlx::query(&query)
        .bind(title)
        .bind(description)
        .bind(user_id)
        .fetch_one(pool)
        .instrument(span)
        .await?;

    Ok(record(&row))
}

pub async fn list_tasks(pool: &PgPool, user_id: i64) -> Result<Vec<TaskRecord>, sqlx::Error> {
    let query = format!(
        "SELECT {TASK_COLUMNS} FROM tasks \
         WHERE user_id = $1 AND deleted_at IS NULL ORDER BY id"
    );
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = %query
    );
    let rows = sqlx::query(&query)
        .bind(user_id)
        .fetch_all(pool)
        .instrument(span)
        .await?;

    Ok(rows.iter().map(record).collect())
}

pub async fn find_task(
    pool: &PgPool,
    user_id: i64,
    task_id: i64,
) -> Result<Option<TaskRecord>, sqlx::Error> {
    let query = format!(
        "SELECT {TASK_COLUMNS} FROM tasks \
         WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL"
    );
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = %query
    );
    let row = sqlx::query(&query)
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    Ok(row.as_ref().map(record))
}

pub async fn update_task(
    pool: &PgPool,
    user_id: i64,
    task_id: i64,
    title: &str,
    description: &str,
    completed: bool,
) -> Result<Option<TaskRecord>, sqlx::Error> {
    let query = format!(
        "UPDATE tasks SET title = $1, description = $2, completed = $3, updated_at = NOW() \
         WHERE id = $4 AND user_id = $5 AND deleted_at IS NULL \
         RETURNING {TASK_COLUMNS}"
    );
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = %query
    );
    let row = sqlx::query(&query)
        .bind(title)
        .bind(description)
        .bind(completed)
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    Ok(row.as_ref().map(record))
}

/// Soft delete; the row stays behind the `deleted_at` marker.
pub async fn soft_delete_task(
    pool: &PgPool,
    user_id: i64,
    task_id: i64,
) -> Result<bool, sqlx::Error> {
    let query = "UPDATE tasks SET deleted_at = NOW(), updated_at = NOW() \
                 WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL RETURNING id";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    Ok(row.is_some())
}
