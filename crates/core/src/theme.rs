//! Persisted light/dark preference.

use core::fmt;

use tracing::warn;

use crate::storage::Storage;

/// Storage key holding the theme preference.
pub const THEME_KEY: &str = "hc-theme";

/// Site color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    /// Dark theme, used unless the visitor chose otherwise.
    #[default]
    Dark,
    /// Light theme.
    Light,
}

impl Theme {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Read a stored value. Unknown values yield `None`.
    #[must_use]
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Returns true for the light theme.
    #[must_use]
    pub const fn is_light(self) -> bool {
        matches!(self, Self::Light)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read the visitor's theme, defaulting to dark.
pub async fn load_theme<S: Storage>(storage: &S) -> Theme {
    match storage.get_item(THEME_KEY).await {
        Ok(Some(value)) => Theme::from_stored(&value).unwrap_or_default(),
        Ok(None) => Theme::default(),
        Err(e) => {
            warn!(error = %e, "Failed to read theme preference");
            Theme::default()
        }
    }
}

/// Flip the visitor's theme and persist it.
///
/// Returns the theme now in effect, which is the old one if the write failed.
pub async fn toggle_theme<S: Storage>(storage: &S) -> Theme {
    let current = load_theme(storage).await;
    let next = current.toggled();
    match storage.set_item(THEME_KEY, next.as_str().to_owned()).await {
        Ok(()) => next,
        Err(e) => {
            warn!(error = %e, "Failed to save theme preference");
            current
        }
    }
}
