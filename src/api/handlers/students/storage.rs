use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use tracing::{info_span, Instrument};

const STUDENT_COLUMNS: &str = "id, nis, nama, jenis_kelamin, tempat_lahir, tanggal_lahir, \
                               alamat, no_telepon, email, kelas, tahun_masuk, created_at, \
                               updated_at";

pub struct StudentRecord {
    pub id: i64,
    pub nis: String,
    pub name: String,
    pub gender: String,
    pub birth_place: String,
    pub birth_date: Option<NaiveDate>,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub class: String,
    pub enrollment_year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn record(row: &PgRow) -> StudentRecord {
    StudentRecord {
        id: row.get("id"),
        nis: row.get("nis"),
        name: row.get("nama"),
        gender: row.get("jenis_kelamin"),
        birth_place: row.get("tempat_lahir"),
        birth_date: row.get("tanggal_lahir"),
        address: row.get("alamat"),
        phone: row.get("no_telepon"),
        email: row.get("email"),
        class: row.get("kelas"),
        enrollment_year: row.get("tahun_masuk"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Duplicate check for NIS, optionally excluding one record (updates).
pub async fn nis_exists(
    pool: &PgPool,
    nis: &str,
    exclude_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    let query = "SELECT EXISTS(SELECT 1 FROM students \
                 WHERE nis = $1 AND id != $2 AND deleted_at IS NULL) AS exists";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(nis)
        .bind(exclude_id.unwrap_or(0))
        .fetch_one(pool)
        .instrument(span)
        .await?;

    Ok(row.get("exists"))
}

/// Duplicate check for email, optionally excluding one record (updates).
pub async fn email_exists(
    pool: &PgPool,
    email: &str,
    exclude_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    let query = "SELECT EXISTS(SELECT 1 FROM students \
                 WHERE email = $1 AND id != $2 AND deleted_at IS NULL) AS exists";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(email)
        .bind(exclude_id.unwrap_or(0))
        .fetch_one(pool)
        .instrument(span)
        .await?;

    Ok(row.get("exists"))
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_student(
    pool: &PgPool,
    nis: &str,
    name: &str,
    gender: &str,
    birth_place: &str,
    birth_date: Option<NaiveDate>,
    address: &str,
    phone: &str,
    email: Option<&str>,
    class: &str,
    enrollment_year: i32,
) -> Result<StudentRecord, sqlx::Error> {
    let query = format!(
        "INSERT INTO students \
             (nis, nama, jenis_kelamin, tempat_lahir, tanggal_lahir, alamat, no_telepon, \
              email, kelas, tahun_masuk) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING {STUDENT_COLUMNS}"
    );
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = %query
    );
    let row = sqlx::query(&query)
        .bind(nis)
        .bind(name)
        .bind(gender)
        .bind(birth_place)
        .bind(birth_date)
        .bind(address)
        .bind(phone)
        .bind(email)
        .bind(class)
        .bind(enrollment_year)
        .fetch_one(pool)
        .instrument(span)
        .await?;

    Ok(record(&row))
}

pub async fn count_students(pool: &PgPool, search: &str) -> Result<i64, sqlx::Error> {
    let query = "SELECT COUNT(*) AS total FROM students \
                 WHERE deleted_at IS NULL AND (nama ILIKE $1 OR nis ILIKE $1)";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(search_pattern(search))
        .fetch_one(pool)
        .instrument(span)
        .await?;

    Ok(row.get("total"))
}

pub async fn list_students(
    pool: &PgPool,
    search: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<StudentRecord>, sqlx::Error> {
    let query = format!(
        "SELECT {STUDENT_COLUMNS} FROM students \
         WHERE deleted_at IS NULL AND (nama ILIKE $1 OR nis ILIKE $1) \
         ORDER BY created_at DESC LIMIT $2 OFFSET $3"
    );
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = %query
    );
    let rows = sqlx::query(&query)
        .bind(search_pattern(search))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .instrument(span)
        .await?;

    Ok(rows.iter().map(record).collect())
}

pub async fn find_student(pool: &PgPool, id: i64) -> Result<Option<StudentRecord>, sqlx::Error> {
    let query =
        format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1 AND deleted_at IS NULL");
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = %query
    );
    let row = sqlx::query(&query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    Ok(row.as_ref().map(record))
}

/// Write back a merged record.
pub async fn update_student(
    pool: &PgPool,
    student: &StudentRecord,
) -> Result<Option<StudentRecord>, sqlx::Error> {
    let query = format!(
        "UPDATE students SET nis = $1, nama = $2, jenis_kelamin = $3, tempat_lahir = $4, \
             tanggal_lahir = $5, alamat = $6, no_telepon = $7, email = $8, kelas = $9, \
             tahun_masuk = $10, updated_at = NOW() \
         WHERE id = $11 AND deleted_at IS NULL \
         RETURNING {STUDENT_COLUMNS}"
    );
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = %query
    );
    let row = sqlx::query(&query)
        .bind(&student.nis)
        .bind(&student.name)
        .bind(&student.gender)
        .bind(&student.birth_place)
        .bind(student.birth_date)
        .bind(&student.address)
        .bind(&student.phone)
        .bind(student.email.as_deref())
        .bind(&student.class)
        .bind(student.enrollment_year)
        .bind(student.id)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    Ok(row.as_ref().map(record))
}

/// Soft delete; the row stays behind the `deleted_at` marker.
pub async fn soft_delete_student(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let query = "UPDATE students SET deleted_at = NOW(), updated_at = NOW() \
                 WHERE id = $1 AND deleted_at IS NULL RETURNING id";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    Ok(row.is_some())
}

/// `%%` when no search term, so the filter matches every row.
fn search_pattern(search: &str) -> String {
    format!("%{}%", search.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_pattern() {
        assert_eq!(search_pattern(""), "%%");
        assert_eq!(search_pattern(" budi "), "%budi%");
    }
}
