//! Light/dark preference persisted next to the session, outside its lifecycle.

use crate::store::{KeyValueStore, SessionStore, THEME_KEY};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

/// Stored preference, or the system preference when nothing usable is stored.
pub fn initial_theme<S: KeyValueStore>(store: &SessionStore<S>, system_prefers_dark: bool) -> ThemeMode {
    store.load::<ThemeMode>(THEME_KEY).ok().unwrap_or_else(|| {
        if system_prefers_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    })
}

/// Persists an explicit choice. Write failures are logged by the store.
pub fn remember_theme<S: KeyValueStore>(store: &SessionStore<S>, mode: ThemeMode) {
    if store.save(THEME_KEY, &mode).is_ok() {
        debug!(theme = mode.as_str(), "theme preference saved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn stored_choice_beats_system_preference() {
        let store = SessionStore::new(MemoryStore::new());
        assert_eq!(initial_theme(&store, true), ThemeMode::Dark);
        assert_eq!(initial_theme(&store, false), ThemeMode::Light);

        remember_theme(&store, ThemeMode::Light);
        assert_eq!(initial_theme(&store, true), ThemeMode::Light);
        assert_eq!(store.backend().raw(THEME_KEY).as_deref(), Some(r#""light""#));
    }

    #[test]
    fn unknown_stored_value_falls_back_to_system() {
        let backend = MemoryStore::new();
        assert!(backend.set(THEME_KEY, r#""sepia""#).is_ok());
        let store = SessionStore::new(backend);
        assert_eq!(initial_theme(&store, true), ThemeMode::Dark);
    }

    #[test]
    fn toggle_flips_mode() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert!(ThemeMode::Light.toggled().is_dark());
        assert_eq!(ThemeMode::Dark.toggled().as_str(), "light");
    }
}
