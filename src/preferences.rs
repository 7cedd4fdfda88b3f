//! Preferences

use std::fmt;

use crate::{
    payout::SaleKind,
    storage::{KeyValueStore, StorageError},
};

/// Store key for the colour mode.
pub const MODE_KEY: &str = "prefs.mode";

/// Store key for the accent theme.
pub const ACCENT_KEY: &str = "prefs.accent";

/// Store key for the last selected sale kind.
pub const SALE_KIND_KEY: &str = "prefs.sale_kind";

/// Colour mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Light background.
    #[default]
    Light,

    /// Dark background.
    Dark,
}

impl Mode {
    const ALL: [Mode; 2] = [Mode::Light, Mode::Dark];

    /// Stable lowercase identifier, as persisted.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }
}

/// Accent theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Accent {
    /// No accent.
    #[default]
    None,

    /// Orange to pink.
    Sunset,

    /// Black and white.
    Bw,
}

impl Accent {
    const ALL: [Accent; 3] = [Accent::None, Accent::Sunset, Accent::Bw];

    /// Stable lowercase identifier, as persisted.
    pub const fn as_str(self) -> &'static str {
        match self {
            Accent::None => "none",
            Accent::Sunset => "sunset",
            Accent::Bw => "bw",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remembered UI preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    /// Colour mode.
    pub mode: Mode,

    /// Accent theme.
    pub accent: Accent,

    /// Last selected sale structure.
    pub sale_kind: SaleKind,
}

impl Preferences {
    /// Load preferences, falling back to the default for missing or unknown values.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be read.
    pub fn load(store: &impl KeyValueStore) -> Result<Self, StorageError> {
        let mode = store
            .get(MODE_KEY)?
            .and_then(|key| Mode::ALL.into_iter().find(|mode| mode.as_str() == key))
            .unwrap_or_default();

        let accent = store
            .get(ACCENT_KEY)?
            .and_then(|key| Accent::ALL.into_iter().find(|accent| accent.as_str() == key))
            .unwrap_or_default();

        let sale_kind = store
            .get(SALE_KIND_KEY)?
            .and_then(|key| SaleKind::from_key(&key))
            .unwrap_or_default();

        Ok(Self {
            mode,
            accent,
            sale_kind,
        })
    }

    /// Persist every preference.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be written.
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        store.set(MODE_KEY, self.mode.as_str().to_string())?;
        store.set(ACCENT_KEY, self.accent.as_str().to_string())?;
        store.set(SALE_KIND_KEY, self.sale_kind.as_str().to_string())?;

        Ok(())
    }
}
