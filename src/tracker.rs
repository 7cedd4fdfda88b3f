//! Tracker
//!
//! Running tally of recomputed payouts for the period.

use crate::storage::{KeyValueStore, StorageError};

/// Store key for the tracked deal count.
pub const DEALS_KEY: &str = "tracker.deals";

/// Store key for the tracked earnings.
pub const EARNINGS_KEY: &str = "tracker.earnings";

/// Deals and earnings recorded so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tracker {
    deals: u64,
    earnings: i64,
}

impl Tracker {
    /// Create a tracker with existing totals.
    pub const fn new(deals: u64, earnings: i64) -> Self {
        Self { deals, earnings }
    }

    /// Deals recorded.
    pub const fn deals(&self) -> u64 {
        self.deals
    }

    /// Earnings recorded, in dollars.
    pub const fn earnings(&self) -> i64 {
        self.earnings
    }

    /// Record a payout. Zero totals are not counted; returns whether it was recorded.
    pub fn record(&mut self, total: i64) -> bool {
        if total == 0 {
            return false;
        }

        self.deals = self.deals.saturating_add(1);
        self.earnings = self.earnings.saturating_add(total);

        true
    }

    /// Load totals from `store`; missing or unparsable values load as zero.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be read.
    pub fn load(store: &impl KeyValueStore) -> Result<Self, StorageError> {
        let deals = store
            .get(DEALS_KEY)?
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0);

        let earnings = store
            .get(EARNINGS_KEY)?
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0);

        Ok(Self { deals, earnings })
    }

    /// Persist totals to `store`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be written.
    pub fn persist(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        store.set(DEALS_KEY, self.deals.to_string())?;
        store.set(EARNINGS_KEY, self.earnings.to_string())?;

        Ok(())
    }

    /// Zero the totals and remove them from `store`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be written.
    pub fn reset(&mut self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        *self = Self::default();

        store.remove(DEALS_KEY)?;
        store.remove(EARNINGS_KEY)?;

        Ok(())
    }
}
