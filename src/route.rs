//! Route definitions for the link shortener
//!
//! This module configures all HTTP routes and maps them to their respective
//! handlers. It creates the Axum router with the application state and the
//! cookie session layer.

use axum::routing::{get, post};
use axum::Router;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::handler::{
    create_link, delete_link, follow_link, list_links, login, login_form, logout, new_link_form,
    register, register_form, show_link, update_link, urls_json, welcome,
};
use crate::store::AppState;

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `GET /` - Welcome page (redirects to `/urls` when logged in)
/// - `GET /urls.json` - JSON dump of the link table (public)
/// - `GET /urls` - Lists the current user's links
/// - `POST /urls` - Creates a new short link
/// - `GET /urls/new` - New-link form
/// - `GET /urls/{code}` - Link detail page with edit form and visit log
/// - `POST /urls/{code}` - Updates the link's long URL
/// - `POST /urls/{code}/delete` - Deletes the link
/// - `GET /u/{code}` - Redirects to the original URL, logging the visit (public)
/// - `GET /login`, `POST /login` - Login form and credential check
/// - `POST /logout` - Discards the session
/// - `GET /register`, `POST /register` - Registration form and account creation
///
/// The session layer is applied here so integration tests exercise the same
/// app `main` serves. Sessions live in an in-memory store and the cookie is
/// not marked `Secure`, matching local plain-HTTP use.
///
/// # Arguments
///
/// * `state` - Application state containing the shared link and user stores
///
/// # Returns
///
/// Configured Axum Router ready to handle requests
pub fn create_app(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store).with_secure(false);

    Router::new()
        .route("/", get(welcome))
        .route("/urls.json", get(urls_json))
        .route("/urls", get(list_links).post(create_link))
        .route("/urls/new", get(new_link_form))
        .route("/urls/{code}", get(show_link).post(update_link))
        .route("/urls/{code}/delete", post(delete_link))
        .route("/u/{code}", get(follow_link))
        .route("/login", get(login_form).post(login))
        .route("/logout", post(logout))
        .route("/register", get(register_form).post(register))
        .layer(session_layer)
        .with_state(state)
}
