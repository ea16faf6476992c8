use sqlx::{PgExecutor, Result as SqlxResult};

use crate::models::LeagueRow;

pub async fn list<'e>(executor: impl PgExecutor<'e>) -> SqlxResult<Vec<LeagueRow>> {
    sqlx::query_as::<_, LeagueRow>(
        r#"
        SELECT id, name, created_at, updated_at
        FROM leagues
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: i32) -> SqlxResult<Option<LeagueRow>> {
    sqlx::query_as::<_, LeagueRow>(
        r#"
        SELECT id, name, created_at, updated_at
        FROM leagues
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, name: &str) -> SqlxResult<LeagueRow> {
    sqlx::query_as::<_, LeagueRow>(
        r#"
        INSERT INTO leagues (name)
        VALUES ($1)
        RETURNING id, name, created_at, updated_at
        "#,
    )
    .bind(name)
    .fetch_one(executor)
    .await
}

/// Rename a league. Returns `None` when no row matches the id.
pub async fn update_name<'e>(
    executor: impl PgExecutor<'e>,
    id: i32,
    name: &str,
) -> SqlxResult<Option<LeagueRow>> {
    sqlx::query_as::<_, LeagueRow>(
        r#"
        UPDATE leagues
        SET name = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING id, name, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(name)
    .fetch_optional(executor)
    .await
}

/// Delete by id, returning the number of rows removed.
pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: i32) -> SqlxResult<u64> {
    let result = sqlx::query("DELETE FROM leagues WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
