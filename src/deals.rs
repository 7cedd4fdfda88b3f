//! Saved Deals
//!
//! Named snapshots of a payout computation, newest first and capped at
//! [`SAVED_DEALS_CAP`]. A snapshot is frozen when saved: only its name can
//! change afterwards.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    payout::{PayoutInput, SaleKind},
    storage::{KeyValueStore, StorageError},
};

/// Store key holding the serialized list.
pub const SAVED_DEALS_KEY: &str = "deals.saved";

/// Most saved deals kept; the oldest is evicted beyond this.
pub const SAVED_DEALS_CAP: usize = 12;

/// Errors that can occur while managing saved deals.
#[derive(Debug, Error)]
pub enum DealError {
    /// No saved deal has this id.
    #[error("no saved deal with id {0}")]
    NotFound(Uuid),

    /// The list could not be serialized.
    #[error("failed to serialize saved deals: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The store could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A frozen snapshot of one payout computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDeal {
    /// Unique id.
    pub id: Uuid,

    /// User-chosen name.
    pub name: String,

    /// Deals closed.
    pub deals: u32,

    /// Price per watt.
    pub ppw: f64,

    /// System size in watts.
    pub watts: f64,

    /// Payout total at save time.
    pub total: i64,

    /// When the deal was saved.
    pub created_at: Timestamp,

    /// Sale structure; absent on records saved before it was tracked.
    #[serde(default)]
    pub sale_kind: Option<SaleKind>,
}

impl SavedDeal {
    /// Inputs to recompute this deal, using `fallback` when no sale kind was recorded.
    pub fn input(&self, fallback: SaleKind) -> PayoutInput {
        PayoutInput {
            deals: self.deals,
            ppw: self.ppw,
            watts: self.watts,
            sale_kind: self.sale_kind.unwrap_or(fallback),
        }
    }

    /// Whether every whitespace-separated token of `query` appears in this
    /// deal's searchable text. Matching is case-insensitive; an empty query
    /// matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();

        if query.is_empty() {
            return true;
        }

        let haystack = format!(
            "{} {:.2} {} {} {}",
            self.name,
            self.ppw,
            self.watts,
            self.total,
            self.sale_kind.map_or("", SaleKind::as_str)
        )
        .to_lowercase();

        query.split_whitespace().all(|token| haystack.contains(token))
    }
}

/// The saved deal list, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedDeals {
    deals: Vec<SavedDeal>,
}

impl SavedDeals {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the list from `store`.
    ///
    /// A missing key loads as an empty list, as does an unreadable one (which
    /// is logged and overwritten on the next save).
    ///
    /// # Errors
    ///
    /// Returns a [`DealError::Storage`] if the store cannot be read.
    pub fn load(store: &impl KeyValueStore) -> Result<Self, DealError> {
        let Some(raw) = store.get(SAVED_DEALS_KEY)? else {
            return Ok(Self::new());
        };

        match serde_json::from_str::<Vec<SavedDeal>>(&raw) {
            Ok(mut deals) => {
                deals.truncate(SAVED_DEALS_CAP);

                Ok(Self { deals })
            }
            Err(error) => {
                warn!(%error, "discarding unreadable saved deals");

                Ok(Self::new())
            }
        }
    }

    /// Write the list to `store`.
    ///
    /// # Errors
    ///
    /// Returns a [`DealError`] if the list cannot be serialized or stored.
    pub fn persist(&self, store: &mut impl KeyValueStore) -> Result<(), DealError> {
        store.set(SAVED_DEALS_KEY, serde_json::to_string(&self.deals)?)?;

        Ok(())
    }

    /// Snapshot `input` and its payout at the front of the list, evicting the
    /// oldest entry beyond the cap. A blank `name` becomes `Deal {n}`.
    pub fn save(&mut self, name: Option<&str>, input: &PayoutInput) -> SavedDeal {
        let name = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map_or_else(|| format!("Deal {}", self.deals.len() + 1), str::to_string);

        let deal = SavedDeal {
            id: Uuid::now_v7(),
            name,
            deals: input.deals,
            ppw: input.ppw,
            watts: input.watts,
            total: input.compute().total,
            created_at: Timestamp::now(),
            sale_kind: Some(input.sale_kind),
        };

        info!(id = %deal.id, name = %deal.name, total = deal.total, "saved deal");

        self.deals.insert(0, deal.clone());
        self.deals.truncate(SAVED_DEALS_CAP);

        deal
    }

    /// Rename a saved deal. A blank `name` leaves it unchanged and returns `false`.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::NotFound`] if no deal has this id.
    pub fn rename(&mut self, id: Uuid, name: &str) -> Result<bool, DealError> {
        let deal = self
            .deals
            .iter_mut()
            .find(|deal| deal.id == id)
            .ok_or(DealError::NotFound(id))?;

        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }

        name.clone_into(&mut deal.name);

        info!(%id, name, "renamed deal");

        Ok(true)
    }

    /// Delete a saved deal, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::NotFound`] if no deal has this id.
    pub fn delete(&mut self, id: Uuid) -> Result<SavedDeal, DealError> {
        let position = self
            .deals
            .iter()
            .position(|deal| deal.id == id)
            .ok_or(DealError::NotFound(id))?;

        let deal = self.deals.remove(position);

        info!(%id, name = %deal.name, "deleted deal");

        Ok(deal)
    }

    /// Look up a saved deal by id.
    pub fn get(&self, id: Uuid) -> Option<&SavedDeal> {
        self.deals.iter().find(|deal| deal.id == id)
    }

    /// Saved deals matching `query`, newest first.
    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a SavedDeal> + 'a {
        self.deals.iter().filter(move |deal| deal.matches(query))
    }

    /// Saved deals, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &SavedDeal> {
        self.deals.iter()
    }

    /// Number of saved deals.
    pub fn len(&self) -> usize {
        self.deals.len()
    }

    /// Whether no deals are saved.
    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }
}

impl<'a> IntoIterator for &'a SavedDeals {
    type Item = &'a SavedDeal;
    type IntoIter = std::slice::Iter<'a, SavedDeal>;

    fn into_iter(self) -> Self::IntoIter {
        self.deals.iter()
    }
}
