//! In-memory stores and shared application state
//!
//! This module holds the two stores the whole application runs on: the link
//! table (short code to link record) and the user table (user id to account).
//! Both live in process memory for the lifetime of the server; nothing is
//! persisted. Handlers share them through `AppState`, which is cheap to clone.

use chrono::Utc;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::model::{Link, User, Visit};

/// Application state shared across all request handlers
///
/// Wraps the link and user maps in `Arc<RwLock<..>>` so the Axum router can
/// clone the state into every handler. Lock poisoning is treated as fatal.
#[derive(Clone, Default)]
pub struct AppState {
    /// Short code -> link record
    links: Arc<RwLock<HashMap<String, Link>>>,

    /// User id -> account record
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl AppState {
    /// Creates empty stores
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a link and registers its code in the owner's link set
    ///
    /// No collision check is performed on the code: a colliding insert
    /// replaces the previous record.
    pub fn add_link(&self, link: Link) {
        let mut links = self.links.write().unwrap();
        let mut users = self.users.write().unwrap();
        if let Some(owner) = users.get_mut(&link.user_id) {
            owner.links.insert(link.code.clone());
        }
        links.insert(link.code.clone(), link);
    }

    /// Looks up a link by short code
    pub fn link(&self, code: &str) -> Option<Link> {
        self.links.read().unwrap().get(code).cloned()
    }

    /// Lists the links owned by a user, oldest first
    pub fn links_for_user(&self, user_id: &str) -> Vec<Link> {
        let links = self.links.read().unwrap();
        let mut owned: Vec<Link> = links
            .values()
            .filter(|link| link.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        owned
    }

    /// Dumps the whole link table as short code -> long URL
    ///
    /// Backs the JSON endpoint; a `BTreeMap` keeps the dump stably ordered.
    pub fn link_table(&self) -> BTreeMap<String, String> {
        self.links
            .read()
            .unwrap()
            .iter()
            .map(|(code, link)| (code.clone(), link.long_url.clone()))
            .collect()
    }

    /// Replaces a link's long URL in place
    ///
    /// Returns `false` if the code does not exist.
    pub fn update_link(&self, code: &str, long_url: &str) -> bool {
        match self.links.write().unwrap().get_mut(code) {
            Some(link) => {
                link.long_url = long_url.to_string();
                true
            }
            None => false,
        }
    }

    /// Removes a link and unregisters it from the owner's link set
    ///
    /// Returns the removed record, or `None` if the code does not exist.
    pub fn remove_link(&self, code: &str) -> Option<Link> {
        let mut links = self.links.write().unwrap();
        let mut users = self.users.write().unwrap();
        let link = links.remove(code)?;
        if let Some(owner) = users.get_mut(&link.user_id) {
            owner.links.remove(code);
        }
        Some(link)
    }

    /// Appends a visit to a link's visit log, stamped with the current time
    ///
    /// Returns `false` if the code does not exist.
    pub fn record_visit(&self, code: &str, visitor_id: &str) -> bool {
        match self.links.write().unwrap().get_mut(code) {
            Some(link) => {
                link.visits.push(Visit {
                    visitor_id: visitor_id.to_string(),
                    visited_at: Utc::now(),
                });
                true
            }
            None => false,
        }
    }

    /// Inserts a new user record
    pub fn add_user(&self, user: User) {
        self.users.write().unwrap().insert(user.id.clone(), user);
    }

    /// Looks up a user by id
    pub fn user(&self, id: &str) -> Option<User> {
        self.users.read().unwrap().get(id).cloned()
    }

    /// Looks up a user by email with a linear scan
    ///
    /// Email uniqueness is checked at registration but not atomically with the
    /// insert, so in a race this returns an arbitrary matching account.
    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .unwrap()
            .values()
            .find(|user| user.email == email)
            .cloned()
    }

    /// Short codes owned by a user, straight from the account record
    pub fn codes_for_user(&self, user_id: &str) -> HashSet<String> {
        self.users
            .read()
            .unwrap()
            .get(user_id)
            .map(|user| user.links.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new(email.to_string(), "hash".to_string())
    }

    #[test]
    fn add_link_registers_code_with_owner() {
        let state = AppState::new();
        let owner = user("a@example.com");
        let owner_id = owner.id.clone();
        state.add_user(owner);

        state.add_link(Link::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            owner_id.clone(),
        ));

        assert!(state.link("abc123").is_some());
        assert!(state.codes_for_user(&owner_id).contains("abc123"));
        assert_eq!(state.links_for_user(&owner_id).len(), 1);
    }

    #[test]
    fn remove_link_unregisters_code_from_owner() {
        let state = AppState::new();
        let owner = user("b@example.com");
        let owner_id = owner.id.clone();
        state.add_user(owner);
        state.add_link(Link::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            owner_id.clone(),
        ));

        let removed = state.remove_link("abc123");
        assert!(removed.is_some());
        assert!(state.link("abc123").is_none());
        assert!(state.codes_for_user(&owner_id).is_empty());
        assert!(state.remove_link("abc123").is_none());
    }

    #[test]
    fn update_link_replaces_long_url() {
        let state = AppState::new();
        let owner = user("c@example.com");
        let owner_id = owner.id.clone();
        state.add_user(owner);
        state.add_link(Link::new(
            "abc123".to_string(),
            "https://old.example.com".to_string(),
            owner_id,
        ));

        assert!(state.update_link("abc123", "https://new.example.com"));
        assert_eq!(state.link("abc123").unwrap().long_url, "https://new.example.com");
        assert!(!state.update_link("missing", "https://new.example.com"));
    }

    #[test]
    fn record_visit_appends_in_order() {
        let state = AppState::new();
        let owner = user("d@example.com");
        let owner_id = owner.id.clone();
        state.add_user(owner);
        state.add_link(Link::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            owner_id,
        ));

        assert!(state.record_visit("abc123", "visitor-1"));
        assert!(state.record_visit("abc123", "visitor-2"));
        assert!(!state.record_visit("missing", "visitor-1"));

        let visits = state.link("abc123").unwrap().visits;
        assert_eq!(visits.len(), 2);
        assert_eq!(visits[0].visitor_id, "visitor-1");
        assert_eq!(visits[1].visitor_id, "visitor-2");
    }

    #[test]
    fn user_lookup_by_email() {
        let state = AppState::new();
        let account = user("find@example.com");
        let id = account.id.clone();
        state.add_user(account);

        assert_eq!(state.user_by_email("find@example.com").unwrap().id, id);
        assert!(state.user_by_email("missing@example.com").is_none());
        assert!(state.user(&id).is_some());
    }
}
