//! Session state helpers and the login gate
//!
//! The cookie-backed session carries at most two keys: the logged-in user's id
//! and, for anonymous browsers that follow a short link, a generated visitor
//! id used to attribute visits.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;
use crate::model::User;
use crate::store::AppState;

/// Session key holding the logged-in user's id
pub const USER_ID_KEY: &str = "user_id";

/// Session key holding the anonymous visitor id
pub const VISITOR_ID_KEY: &str = "visitor_id";

/// Extractor for routes that require a logged-in user
///
/// Resolves the session's `user_id` against the user store. Requests without a
/// valid one are redirected to the login page.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, message)| AppError::Internal(message.to_string()))?;
        match current_user(&session, state).await? {
            Some(user) => Ok(CurrentUser(user)),
            None => Err(AppError::NotLoggedIn),
        }
    }
}

/// Resolves the session's user, if any
///
/// A `user_id` pointing at a deleted or unknown account counts as logged out.
pub async fn current_user(session: &Session, state: &AppState) -> Result<Option<User>, AppError> {
    let user_id: Option<String> = session.get(USER_ID_KEY).await?;
    Ok(user_id.and_then(|id| state.user(&id)))
}

/// Marks the session as belonging to the given user
pub async fn log_in(session: &Session, user_id: &str) -> Result<(), AppError> {
    session.insert(USER_ID_KEY, user_id).await?;
    Ok(())
}

/// Discards the whole session, including any visitor id
pub async fn log_out(session: &Session) -> Result<(), AppError> {
    session.flush().await?;
    Ok(())
}

/// Returns the session's anonymous visitor id, generating one on first use
///
/// Repeat visits from the same browser attribute to the same visitor id.
pub async fn visitor_id(session: &Session) -> Result<String, AppError> {
    if let Some(id) = session.get::<String>(VISITOR_ID_KEY).await? {
        return Ok(id);
    }
    let id = Uuid::new_v4().to_string();
    session.insert(VISITOR_ID_KEY, &id).await?;
    Ok(id)
}
