//! HTTP request handlers for the link shortener
//!
//! This module implements all the core business logic for:
//! - Creating, listing, viewing, editing, and deleting short links
//! - Redirecting short codes to their original destinations with visit logging
//! - Account registration, login, and logout over cookie sessions

use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use bcrypt::{hash, verify, DEFAULT_COST};
use rand::{distr::Alphanumeric, Rng};
use std::collections::BTreeMap;
use tower_sessions::Session;

use crate::error::AppError;
use crate::model::{CredentialsForm, Link, LinkForm, User};
use crate::session::{current_user, log_in, log_out, visitor_id, CurrentUser};
use crate::store::AppState;
use crate::view;

/// Generates a random 6-character alphanumeric short code
///
/// Uniform draw from `[a-zA-Z0-9]`. Collisions are not checked.
fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect()
}

/// Landing page
///
/// Logged-in browsers go straight to their link list; everyone else gets the
/// welcome page.
pub async fn welcome(State(state): State<AppState>, session: Session) -> Result<Response, AppError> {
    if current_user(&session, &state).await?.is_some() {
        return Ok(Redirect::to("/urls").into_response());
    }
    Ok(view::welcome_page().into_response())
}

/// Dumps the link table as JSON
///
/// # Response
///
/// A flat object mapping every short code to its long URL:
///
/// ```json
/// {
///   "9sm5xK": "http://www.google.com",
///   "b2xVn2": "http://www.lighthouselabs.ca"
/// }
/// ```
pub async fn urls_json(State(state): State<AppState>) -> Json<BTreeMap<String, String>> {
    Json(state.link_table())
}

/// Lists the current user's links
///
/// # Response
///
/// - **200 OK** - HTML table of the user's links, oldest first
/// - **303 See Other** - No session, redirected to `/login`
pub async fn list_links(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    let links = state.links_for_user(&user.id);
    Ok(view::urls_index(&user, &links).into_response())
}

/// Renders the new-link form
pub async fn new_link_form(CurrentUser(user): CurrentUser) -> Result<Response, AppError> {
    Ok(view::urls_new(&user, &[], "").into_response())
}

/// Creates a new short link
///
/// Generates a random 6-character code, stores the link under the current
/// user, and sends the browser to the link's detail page.
///
/// # Response
///
/// - **303 See Other** - Created, redirected to `/urls/{code}`
/// - **400 Bad Request** - Empty long URL, form re-rendered with errors
/// - **303 See Other** - No session, redirected to `/login`
pub async fn create_link(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<LinkForm>,
) -> Result<Response, AppError> {
    let long_url = form.long_url.trim();
    if long_url.is_empty() {
        let errors = vec!["Please enter a URL to shorten.".to_string()];
        return Ok((
            StatusCode::BAD_REQUEST,
            view::urls_new(&user, &errors, &form.long_url),
        )
            .into_response());
    }

    let code = generate_code();
    tracing::debug!(%code, user_id = %user.id, "creating short link");
    state.add_link(Link::new(code.clone(), long_url.to_string(), user.id));

    Ok(Redirect::to(&format!("/urls/{}", code)).into_response())
}

/// Shows one link: its URLs, an edit form, and the visit log
///
/// # Response
///
/// - **200 OK** - Detail page
/// - **403 Forbidden** - Logged in but not the owner
/// - **404 Not Found** - Unknown short code
/// - **303 See Other** - No session, redirected to `/login`
pub async fn show_link(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(code): Path<String>,
) -> Result<Response, AppError> {
    let link = state.link(&code).ok_or_else(|| AppError::NotFound(code.clone()))?;
    if link.user_id != user.id {
        return Err(AppError::Forbidden("You do not own this link.".to_string()));
    }
    Ok(view::urls_show(&user, &link, &[]).into_response())
}

/// Replaces a link's long URL
///
/// Ownership is verified before the store is touched.
///
/// # Response
///
/// - **303 See Other** - Updated, redirected to `/urls`
/// - **400 Bad Request** - Empty replacement URL, detail page re-rendered
/// - **403 Forbidden** - Logged in but not the owner
/// - **404 Not Found** - Unknown short code
pub async fn update_link(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(code): Path<String>,
    Form(form): Form<LinkForm>,
) -> Result<Response, AppError> {
    let link = state.link(&code).ok_or_else(|| AppError::NotFound(code.clone()))?;
    if link.user_id != user.id {
        return Err(AppError::Forbidden("You do not own this link.".to_string()));
    }

    let long_url = form.long_url.trim();
    if long_url.is_empty() {
        let errors = vec!["Please enter a replacement URL.".to_string()];
        return Ok((StatusCode::BAD_REQUEST, view::urls_show(&user, &link, &errors)).into_response());
    }

    state.update_link(&code, long_url);
    tracing::debug!(%code, "updated short link");
    Ok(Redirect::to("/urls").into_response())
}

/// Deletes a link after verifying ownership
///
/// # Response
///
/// - **303 See Other** - Deleted, redirected to `/urls`
/// - **403 Forbidden** - Logged in but not the owner
/// - **404 Not Found** - Unknown short code
pub async fn delete_link(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(code): Path<String>,
) -> Result<Response, AppError> {
    let link = state.link(&code).ok_or_else(|| AppError::NotFound(code.clone()))?;
    if link.user_id != user.id {
        return Err(AppError::Forbidden("You do not own this link.".to_string()));
    }

    state.remove_link(&code);
    tracing::debug!(%code, "deleted short link");
    Ok(Redirect::to("/urls").into_response())
}

/// Redirects a short code to its original destination
///
/// This is the public endpoint that makes the shortener work. Every follow is
/// appended to the link's visit log, attributed to the logged-in user when
/// there is one and to a per-browser anonymous visitor id otherwise.
///
/// # Response
///
/// - **307 Temporary Redirect** - Sends the browser to the long URL
/// - **303 See Other** - Unknown code, redirected to the landing page
///
/// # Note
///
/// Uses a temporary redirect rather than a permanent one so browsers keep
/// coming back and visits keep being logged even after the link is edited.
pub async fn follow_link(
    State(state): State<AppState>,
    session: Session,
    Path(code): Path<String>,
) -> Result<Response, AppError> {
    let Some(link) = state.link(&code) else {
        tracing::debug!(%code, "unknown short code, redirecting to landing page");
        return Ok(Redirect::to("/").into_response());
    };

    // Attribute the visit to the logged-in user, or to the browser's
    // anonymous visitor id, generating one on first contact.
    let visitor = match current_user(&session, &state).await? {
        Some(user) => user.id,
        None => visitor_id(&session).await?,
    };
    state.record_visit(&code, &visitor);

    Ok(Redirect::temporary(&link.long_url).into_response())
}

/// Renders the login form
pub async fn login_form(State(state): State<AppState>, session: Session) -> Result<Response, AppError> {
    if current_user(&session, &state).await?.is_some() {
        return Ok(Redirect::to("/urls").into_response());
    }
    Ok(view::login_page(&[], "").into_response())
}

/// Logs a user in
///
/// Looks the account up by email and checks the password against the stored
/// bcrypt hash.
///
/// # Response
///
/// - **303 See Other** - Logged in, redirected to `/urls`
/// - **403 Forbidden** - Unknown email or wrong password, form re-rendered
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    let failed = || {
        let errors = vec!["Invalid email or password.".to_string()];
        (StatusCode::FORBIDDEN, view::login_page(&errors, &form.email)).into_response()
    };

    let Some(user) = state.user_by_email(form.email.trim()) else {
        return Ok(failed());
    };
    if !verify(&form.password, &user.password_hash)? {
        return Ok(failed());
    }

    log_in(&session, &user.id).await?;
    tracing::debug!(user_id = %user.id, "logged in");
    Ok(Redirect::to("/urls").into_response())
}

/// Discards the session and returns to the login page
pub async fn logout(session: Session) -> Result<Response, AppError> {
    log_out(&session).await?;
    Ok(Redirect::to("/login").into_response())
}

/// Renders the registration form
pub async fn register_form(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    if current_user(&session, &state).await?.is_some() {
        return Ok(Redirect::to("/urls").into_response());
    }
    Ok(view::register_page(&[], "").into_response())
}

/// Registers a new account
///
/// Validates the form, checks that the email is not already taken (not
/// atomically with the insert), hashes the password, and logs the new user in.
///
/// # Response
///
/// - **303 See Other** - Registered and logged in, redirected to `/urls`
/// - **400 Bad Request** - Empty field or email already registered, form
///   re-rendered with the error list
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    let email = form.email.trim().to_string();

    let mut errors = Vec::new();
    if email.is_empty() {
        errors.push("Email must not be empty.".to_string());
    }
    if form.password.is_empty() {
        errors.push("Password must not be empty.".to_string());
    }
    if !email.is_empty() && state.user_by_email(&email).is_some() {
        errors.push("That email is already registered.".to_string());
    }
    if !errors.is_empty() {
        return Ok((StatusCode::BAD_REQUEST, view::register_page(&errors, &email)).into_response());
    }

    let password_hash = hash(&form.password, DEFAULT_COST)?;
    let user = User::new(email, password_hash);
    let user_id = user.id.clone();
    state.add_user(user);

    log_in(&session, &user_id).await?;
    tracing::debug!(%user_id, "registered new user");
    Ok(Redirect::to("/urls").into_response())
}
