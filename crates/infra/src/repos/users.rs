use sqlx::{PgExecutor, Result as SqlxResult};

use crate::models::UserRow;

pub async fn list<'e>(executor: impl PgExecutor<'e>) -> SqlxResult<Vec<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, username, password AS password_hash, created_at, updated_at
        FROM users
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: i32) -> SqlxResult<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, username, password AS password_hash, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn get_by_username<'e>(
    executor: impl PgExecutor<'e>,
    username: &str,
) -> SqlxResult<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, username, password AS password_hash, created_at, updated_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(executor)
    .await
}

/// Insert a new user. The caller hashes the password; a duplicate username
/// surfaces as the driver's unique-violation error, which the caller is
/// expected to inspect rather than pre-check.
pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    username: &str,
    password_hash: &str,
) -> SqlxResult<UserRow> {
    sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (username, password)
        VALUES ($1, $2)
        RETURNING id, username, password AS password_hash, created_at, updated_at
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(executor)
    .await
}
