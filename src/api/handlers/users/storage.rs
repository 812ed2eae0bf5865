use sqlx::{PgPool, Row};
use tracing::{info_span, Instrument};

pub struct AccountRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Fast-path duplicate check; the unique index on `email` remains the
/// authoritative conflict source at insert time.
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    let query =
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND deleted_at IS NULL) AS exists";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(email)
        .fetch_one(pool)
        .instrument(span)
        .await?;

    Ok(row.get("exists"))
}

pub async fn insert_account(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<i64, sqlx::Error> {
    let query = "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING id";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .instrument(span)
        .await?;

    Ok(row.get("id"))
}

/// Resolve a login identifier against email OR display name; first match
/// wins when both happen to match.
pub async fn find_by_identifier(
    pool: &PgPool,
    identifier: &str,
) -> Result<Option<AccountRecord>, sqlx::Error> {
    let query = "SELECT id, name, email, password FROM users \
                 WHERE (email = $1 OR name = $1) AND deleted_at IS NULL LIMIT 1";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(identifier)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    Ok(row.map(|row| AccountRecord {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password: row.get("password"),
    }))
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}
