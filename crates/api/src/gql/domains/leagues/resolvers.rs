use async_graphql::{Context, Object, Result};

use crate::gql::error::GqlError;
use crate::state::AppState;
use infra::repos::leagues;

use super::types::League;

#[derive(Default)]
pub struct LeagueQuery;

#[Object]
impl LeagueQuery {
    async fn leagues(&self, ctx: &Context<'_>) -> Result<Vec<League>> {
        let state = ctx.data::<AppState>()?;
        let rows = leagues::list(&state.db).await.map_err(GqlError::from)?;
        Ok(rows.into_iter().map(League::from).collect())
    }

    /// Look up a single league; absent ids resolve to null, not an error.
    async fn league(&self, ctx: &Context<'_>, id: i32) -> Result<Option<League>> {
        let state = ctx.data::<AppState>()?;
        let row = leagues::get_by_id(&state.db, id)
            .await
            .map_err(GqlError::from)?;
        Ok(row.map(League::from))
    }
}

#[derive(Default)]
pub struct LeagueMutation;

#[Object]
impl LeagueMutation {
    async fn create_league(&self, ctx: &Context<'_>, name: String) -> Result<League> {
        let state = ctx.data::<AppState>()?;
        let row = leagues::create(&state.db, &name)
            .await
            .map_err(GqlError::from)?;
        Ok(row.into())
    }

    /// Rename a league. With no `name` argument the existing record is
    /// returned unchanged; an absent id resolves to null.
    async fn update_league(
        &self,
        ctx: &Context<'_>,
        id: i32,
        name: Option<String>,
    ) -> Result<Option<League>> {
        let state = ctx.data::<AppState>()?;

        let row = match name {
            Some(name) => leagues::update_name(&state.db, id, &name)
                .await
                .map_err(GqlError::from)?,
            None => leagues::get_by_id(&state.db, id)
                .await
                .map_err(GqlError::from)?,
        };

        Ok(row.map(League::from))
    }

    /// Delete by id. Reports bare success: a missing row and a storage
    /// failure both come back as `false` (the latter is logged).
    async fn delete_league(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        let state = ctx.data::<AppState>()?;

        match leagues::delete(&state.db, id).await {
            Ok(rows_affected) => Ok(rows_affected > 0),
            Err(err) => {
                tracing::warn!("league delete failed: {err}");
                Ok(false)
            }
        }
    }
}
