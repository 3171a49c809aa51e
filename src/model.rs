//! Data models for the link shortener application
//!
//! This module defines all the data structures used throughout the application:
//! the stored link and user records, the per-link visit log entries, and the
//! form payloads submitted by the HTML pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// A single recorded visit to a short link
///
/// The visitor id is either the id of the logged-in user who followed the
/// link, or a generated anonymous visitor id kept in the browser's session.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Visit {
    /// User id or anonymous visitor id that followed the link
    pub visitor_id: String,

    /// Timestamp when the visit occurred
    pub visited_at: DateTime<Utc>,
}

/// A stored short link
///
/// Every link is owned by exactly one user. The visit log grows by one entry
/// each time the public redirect endpoint is followed.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Link {
    /// Random 6-character alphanumeric short code (e.g., "b2xVn2")
    pub code: String,

    /// The original long URL this code redirects to
    pub long_url: String,

    /// Id of the user who created the link
    pub user_id: String,

    /// Timestamp when this link was created
    pub created_at: DateTime<Utc>,

    /// Ordered visit log, oldest first
    #[serde(default)]
    pub visits: Vec<Visit>,
}

impl Link {
    /// Creates a new link with an empty visit log, stamped with the current time
    pub fn new(code: String, long_url: String, user_id: String) -> Self {
        Self {
            code,
            long_url,
            user_id,
            created_at: Utc::now(),
            visits: Vec::new(),
        }
    }
}

/// A registered account
///
/// Users are created on registration and never deleted. The `links` set mirrors
/// the link store: it holds the short codes this user owns.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    /// Random v4 UUID identifying the user
    pub id: String,

    /// Email address used to log in (uniqueness checked at registration)
    pub email: String,

    /// bcrypt hash of the user's password, never rendered or serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Short codes of the links this user owns
    #[serde(default)]
    pub links: HashSet<String>,
}

impl User {
    /// Creates a new user with a fresh UUID and no links
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash,
            links: HashSet::new(),
        }
    }
}

/// Form payload for creating or editing a link
#[derive(Deserialize)]
pub struct LinkForm {
    /// The long URL to shorten (or the replacement URL when editing)
    pub long_url: String,
}

/// Form payload for the login and registration pages
#[derive(Deserialize)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
}
