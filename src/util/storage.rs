//! Browser localStorage access and the persisted credential record.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session token and user profile are mirrored into `localStorage` so a
//! page reload can rebuild the session without signing in again. The mirror is
//! written only by `SessionState` mutations and read once at startup.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::net::types::User;

/// Storage entry holding the bearer token as a plain string.
pub const TOKEN_KEY: &str = "token";
/// Storage entry holding the JSON-serialized user profile.
pub const USER_KEY: &str = "user";

/// Minimal string key/value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`. Every browser failure degrades to a no-op.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "csr")]
impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory store for tests and non-browser builds.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Self { entries: RefCell::new(map) }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Credentials recovered from storage at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersistedCredentials {
    pub token: Option<String>,
    pub user: Option<User>,
    /// A `user` entry was present but could not be parsed.
    pub user_malformed: bool,
}

/// Typed view over the `token` and `user` storage entries.
#[derive(Clone)]
pub struct CredentialStore {
    store: Rc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read both entries. An unparsable profile loads as absent and is
    /// flagged in `user_malformed`.
    pub fn load(&self) -> PersistedCredentials {
        let token = self.store.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let mut user_malformed = false;
        let user = self.store.get(USER_KEY).and_then(|raw| {
            match serde_json::from_str::<Option<User>>(&raw) {
                Ok(user) => user,
                Err(e) => {
                    log::warn!("ignoring malformed persisted user: {e}");
                    user_malformed = true;
                    None
                }
            }
        });
        PersistedCredentials { token, user, user_malformed }
    }

    pub fn save(&self, token: &str, user: &User) {
        self.store.set(TOKEN_KEY, token);
        self.save_user(user);
    }

    pub fn save_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(raw) => self.store.set(USER_KEY, &raw),
            Err(e) => log::warn!("failed to serialize user for storage: {e}"),
        }
    }

    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
    }
}
