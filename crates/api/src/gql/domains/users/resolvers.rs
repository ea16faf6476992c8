use async_graphql::{Context, Object, Result};
use tower_sessions::Session;

use crate::auth::PasswordService;
use crate::gql::error::{GqlError, ResultExt};
use crate::session;
use crate::state::AppState;
use infra::repos::users;

use super::types::{User, UserResponse, UsernamePasswordInput};

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let state = ctx.data::<AppState>()?;
        let rows = users::list(&state.db).await.map_err(GqlError::from)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    /// The user this session is authenticated as. Null when anonymous, or
    /// when the stored id no longer resolves to a user. Pure read; never
    /// touches session state.
    async fn current_user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let sess = ctx.data::<Session>()?;

        let Some(user_id) = session::current_user_id(sess)
            .await
            .gql_err("Failed to load session")?
        else {
            return Ok(None);
        };

        let state = ctx.data::<AppState>()?;
        let row = users::get_by_id(&state.db, user_id)
            .await
            .map_err(GqlError::from)?;
        Ok(row.map(User::from))
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Create an account and log it in. Validation failures and duplicate
    /// usernames come back as field errors in the payload.
    async fn register(
        &self,
        ctx: &Context<'_>,
        options: UsernamePasswordInput,
    ) -> Result<UserResponse> {
        if options.username.chars().count() < 3 {
            return Ok(UserResponse::field_error(
                "username",
                "Username must be at least 3 characters long",
            ));
        }

        if options.password.chars().count() < 3 {
            return Ok(UserResponse::field_error(
                "password",
                "Password must be at least 3 characters long",
            ));
        }

        let state = ctx.data::<AppState>()?;
        let sess = ctx.data::<Session>()?;

        let password_hash = PasswordService::hash_password(&options.password)
            .gql_err("Failed to hash password")?;

        // Insert first and inspect the driver error instead of pre-checking
        // existence; a check-then-insert would race with concurrent
        // registrations of the same username.
        let row = match users::create(&state.db, &options.username, &password_hash).await {
            Ok(row) => row,
            Err(err) if is_unique_violation(&err) => {
                return Ok(UserResponse::field_error(
                    "username",
                    "Username has already been taken",
                ));
            }
            Err(err) => return Err(GqlError::from(err).into()),
        };

        // Log user in after sign up
        session::establish(sess, row.id)
            .await
            .gql_err("Failed to establish session")?;

        Ok(UserResponse::for_user(row.into()))
    }

    async fn login(
        &self,
        ctx: &Context<'_>,
        options: UsernamePasswordInput,
    ) -> Result<UserResponse> {
        let state = ctx.data::<AppState>()?;
        let sess = ctx.data::<Session>()?;

        let Some(row) = users::get_by_username(&state.db, &options.username)
            .await
            .map_err(GqlError::from)?
        else {
            return Ok(UserResponse::field_error("username", "Invalid username"));
        };

        let valid = PasswordService::verify_password(&options.password, &row.password_hash)
            .gql_err("Failed to verify password")?;
        if !valid {
            return Ok(UserResponse::field_error("password", "Invalid password"));
        }

        session::establish(sess, row.id)
            .await
            .gql_err("Failed to establish session")?;

        Ok(UserResponse::for_user(row.into()))
    }

    /// Destroy the session record and clear the cookie. Failure is reported
    /// as `false`, never thrown.
    async fn logout(&self, ctx: &Context<'_>) -> Result<bool> {
        let sess = ctx.data::<Session>()?;

        match sess.flush().await {
            Ok(()) => Ok(true),
            Err(err) => {
                tracing::warn!("session destroy failed: {err}");
                Ok(false)
            }
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
