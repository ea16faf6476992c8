use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, Utc};

use infra::models::UserRow;

/// Outward-facing user. The password hash stays on `UserRow` and is never
/// part of this type, so it cannot leak through the schema.
#[derive(SimpleObject)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(InputObject)]
pub struct UsernamePasswordInput {
    pub username: String,
    pub password: String,
}

/// A domain validation failure, addressed to the offending input field so
/// clients can render it inline.
#[derive(SimpleObject)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Payload for `register`/`login`: either the user or a list of field
/// errors, never a thrown error for expected failures.
#[derive(SimpleObject)]
pub struct UserResponse {
    pub errors: Option<Vec<FieldError>>,
    pub user: Option<User>,
}

impl UserResponse {
    pub fn field_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: Some(vec![FieldError {
                field: field.into(),
                message: message.into(),
            }]),
            user: None,
        }
    }

    pub fn for_user(user: User) -> Self {
        Self {
            errors: None,
            user: Some(user),
        }
    }
}
