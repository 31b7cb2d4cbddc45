//! Persistence of the session pair (token + profile) and small UI preferences
//! in an origin-scoped key-value store. Values are stored as JSON text.

use crate::{error::StorageError, types::UserProfile};
use serde::{Serialize, de::DeserializeOwned};
use std::{cell::RefCell, collections::BTreeMap, rc::Rc};
use tracing::{debug, warn};

pub const TOKEN_KEY: &str = "sms_token";
pub const USER_KEY: &str = "sms_user";
pub const THEME_KEY: &str = "sms_theme";

/// Every key the application owns.
pub const APP_KEYS: [&str; 3] = [TOKEN_KEY, USER_KEY, THEME_KEY];

/// Synchronous string key-value backend (browser `localStorage` or memory).
pub trait KeyValueStore {
    /// # Errors
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    /// Returns an error if the backend rejects the write (quota, privacy mode).
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    /// Returns an error if the backend cannot remove the entry.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory backend. Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored text for `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Outcome of reading a stored value. Separates "nothing stored" from
/// "stored but unreadable" so callers can purge corrupt entries.
#[derive(Clone, Debug, PartialEq)]
pub enum Loaded<T> {
    Value(T),
    Empty,
    Corrupt(String),
}

impl<T> Loaded<T> {
    /// The value, treating `Empty` and `Corrupt` alike.
    pub fn ok(self) -> Option<T> {
        match self {
            Loaded::Value(value) => Some(value),
            Loaded::Empty | Loaded::Corrupt(_) => None,
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Loaded::Corrupt(_))
    }
}

/// Typed JSON view over a [`KeyValueStore`].
#[derive(Clone, Debug, Default)]
pub struct SessionStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Reads and deserializes the value at `key`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Loaded<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Loaded::Empty,
            Err(err) => {
                warn!(key, error = %err, "storage read failed");
                return Loaded::Empty;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Loaded::Value(value),
            Err(err) => {
                warn!(key, error = %err, "stored value is not valid JSON");
                Loaded::Corrupt(err.to_string())
            }
        }
    }

    /// Serializes and writes `value` at `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded or the backend rejects
    /// the write. The failure is also logged.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(value).map_err(|err| StorageError::Encode {
            key: key.to_string(),
            reason: err.to_string(),
        });
        let result = encoded.and_then(|encoded| self.backend.set(key, &encoded));
        if let Err(err) = &result {
            warn!(key, error = %err, "storage write failed");
        }
        result
    }

    /// Removes `key`. Removing a missing key is not an error.
    pub fn clear(&self, key: &str) {
        if let Err(err) = self.backend.remove(key) {
            warn!(key, error = %err, "storage remove failed");
        }
    }

    /// Persists the token and profile together. If either write fails both
    /// entries are removed so the store never holds half a session.
    ///
    /// # Errors
    ///
    /// Returns the first write failure.
    pub fn save_session(&self, token: &str, profile: &UserProfile) -> Result<(), StorageError> {
        let result = self
            .save(TOKEN_KEY, token)
            .and_then(|()| self.save(USER_KEY, profile));
        if result.is_err() {
            self.clear_session();
        }
        result
    }

    /// Stored token and profile, if both are present and readable.
    pub fn load_session(&self) -> (Loaded<String>, Loaded<UserProfile>) {
        (self.load(TOKEN_KEY), self.load(USER_KEY))
    }

    /// Removes both session entries.
    pub fn clear_session(&self) {
        self.clear(TOKEN_KEY);
        self.clear(USER_KEY);
        debug!("session entries cleared");
    }

    /// Removes every application entry, preferences included.
    pub fn clear_all(&self) {
        for key in APP_KEYS {
            self.clear(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Role;

    fn profile() -> UserProfile {
        UserProfile {
            id: Some("17".to_string()),
            email: "ravi.kumar.2024@sms.edu.in".to_string(),
            role: Some(Role::Student),
            first_name: Some("Ravi".to_string()),
            last_name: Some("Kumar".to_string()),
            must_change_password: false,
        }
    }

    /// Backend that accepts reads but rejects writes to one key.
    struct RejectingStore {
        inner: MemoryStore,
        reject: &'static str,
    }

    impl KeyValueStore for RejectingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == self.reject {
                return Err(StorageError::Write {
                    key: key.to_string(),
                    reason: "QuotaExceededError".to_string(),
                });
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn save_then_load_returns_equal_profile() -> Result<(), StorageError> {
        let store = SessionStore::new(MemoryStore::new());
        store.save(USER_KEY, &profile())?;
        assert_eq!(store.load::<UserProfile>(USER_KEY), Loaded::Value(profile()));
        Ok(())
    }

    #[test]
    fn profile_is_stored_in_camel_case() -> Result<(), StorageError> {
        let backend = MemoryStore::new();
        let store = SessionStore::new(backend.clone());
        store.save(USER_KEY, &profile())?;

        let raw = backend.raw(USER_KEY).unwrap_or_default();
        assert!(raw.contains(r#""firstName":"Ravi""#));
        assert!(raw.contains(r#""mustChangePassword":false"#));
        Ok(())
    }

    #[test]
    fn missing_and_corrupt_values_are_distinguished() -> Result<(), StorageError> {
        let backend = MemoryStore::new();
        backend.set(USER_KEY, "{not json")?;
        let store = SessionStore::new(backend);

        assert_eq!(store.load::<UserProfile>(TOKEN_KEY), Loaded::Empty);
        let corrupt = store.load::<UserProfile>(USER_KEY);
        assert!(corrupt.is_corrupt());
        assert_eq!(corrupt.ok(), None);
        Ok(())
    }

    #[test]
    fn clear_is_idempotent() {
        let store = SessionStore::new(MemoryStore::new());
        store.clear(TOKEN_KEY);
        store.clear(TOKEN_KEY);
        assert!(store.backend().is_empty());
    }

    #[test]
    fn failed_profile_write_rolls_back_token() {
        let inner = MemoryStore::new();
        let store = SessionStore::new(RejectingStore {
            inner: inner.clone(),
            reject: USER_KEY,
        });

        let result = store.save_session("h.c.s", &profile());
        assert!(matches!(result, Err(StorageError::Write { .. })));
        assert!(inner.is_empty());
    }

    #[test]
    fn clear_all_removes_preferences_too() -> Result<(), StorageError> {
        let backend = MemoryStore::new();
        let store = SessionStore::new(backend.clone());
        store.save_session("h.c.s", &profile())?;
        store.save(THEME_KEY, "dark")?;
        backend.set("unrelated", "1")?;

        store.clear_all();
        assert_eq!(backend.raw("unrelated").as_deref(), Some("1"));
        for key in APP_KEYS {
            assert!(!backend.contains(key));
        }
        Ok(())
    }
}
