//! User preferences
//!
//! Favorites, light/dark theme, and the daily-notification time, all
//! persisted in the key-value store. The notification time is stored only;
//! actual scheduling belongs to a native frontend and is out of scope here.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::quotes::Quote;
use crate::store::{Store, StoreError};

const FAVORITES_KEY: &str = "favorites";
const THEME_KEY: &str = "theme";
const NOTIFICATION_KEY: &str = "notification_time";

/// Handle to the persisted user preferences
#[derive(Clone)]
pub struct Preferences {
    store: Arc<Store>,
}

impl Preferences {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Favorited quotes, in the order they were added
    pub fn favorites(&self) -> Vec<Quote> {
        self.store.get(FAVORITES_KEY).unwrap_or_default()
    }

    /// Whether a quote id is currently favorited
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites().iter().any(|q| q.id == id)
    }

    /// Add or remove a quote from the favorites.
    ///
    /// Returns `true` when the quote is favorited after the call.
    pub fn toggle_favorite(&self, quote: &Quote) -> PrefsResult<bool> {
        let mut favorites = self.favorites();

        let favorited = if let Some(pos) = favorites.iter().position(|q| q.id == quote.id) {
            favorites.remove(pos);
            false
        } else {
            favorites.push(quote.clone());
            true
        };

        self.store.set(FAVORITES_KEY, &favorites)?;
        Ok(favorited)
    }

    /// Current theme, defaulting to light
    pub fn theme(&self) -> Theme {
        self.store.get(THEME_KEY).unwrap_or_default()
    }

    /// Persist a theme choice
    pub fn set_theme(&self, theme: Theme) -> PrefsResult<()> {
        self.store.set(THEME_KEY, &theme)?;
        Ok(())
    }

    /// Flip the theme and return the new value
    pub fn toggle_theme(&self) -> PrefsResult<Theme> {
        let next = match self.theme() {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.set_theme(next)?;
        Ok(next)
    }

    /// Configured daily-notification time, if any
    pub fn notification_time(&self) -> Option<NotificationTime> {
        self.store.get(NOTIFICATION_KEY)
    }

    /// Persist the daily-notification time
    pub fn set_notification_time(&self, hour: u32, minute: u32) -> PrefsResult<()> {
        if hour >= 24 || minute >= 60 {
            return Err(PrefsError::InvalidTime { hour, minute });
        }
        self.store
            .set(NOTIFICATION_KEY, &NotificationTime { hour, minute })?;
        Ok(())
    }

    /// Clear every stored value: favorites, preferences, and cached quotes
    pub fn reset(&self) -> PrefsResult<()> {
        self.store.clear()?;
        Ok(())
    }
}

/// UI theme preference
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse a user-supplied theme name (CLI input)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// Daily-notification time of day (local)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationTime {
    pub hour: u32,
    pub minute: u32,
}

impl std::fmt::Display for NotificationTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Errors that can occur in the preferences layer
#[derive(Error, Debug)]
pub enum PrefsError {
    /// Notification time outside a valid wall-clock time
    #[error("Invalid notification time {hour}:{minute}")]
    InvalidTime { hour: u32, minute: u32 },

    /// Persisting the preference failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for preference operations
pub type PrefsResult<T> = Result<T, PrefsError>;
