use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};

use infra::models::LeagueRow;

#[derive(SimpleObject)]
pub struct League {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LeagueRow> for League {
    fn from(row: LeagueRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
