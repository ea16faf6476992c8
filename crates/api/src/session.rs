use tower_sessions::{session::Error as SessionError, Session};

/// Key under which the authenticated user's id is stored in the
/// server-side session record.
pub const USER_ID_KEY: &str = "userId";

/// Read the authenticated user id, if any. Never transitions session state.
pub async fn current_user_id(session: &Session) -> Result<Option<i32>, SessionError> {
    session.get::<i32>(USER_ID_KEY).await
}

/// Mark the session as authenticated for the given user.
pub async fn establish(session: &Session, user_id: i32) -> Result<(), SessionError> {
    session.insert(USER_ID_KEY, &user_id).await
}
