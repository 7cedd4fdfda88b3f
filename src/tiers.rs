//! Tiers
//!
//! Ordered range tables backing the payout ladders. Each row names its own
//! lower and upper bound (inclusive, exclusive or unbounded) and the first row
//! whose range contains a value wins. Rows are checked in declaration order and
//! never merged, so a boundary test maps directly onto a single row.

use std::ops::{Bound, RangeBounds};

/// A single row of a [`TierTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier<T, V> {
    lower: Bound<T>,
    upper: Bound<T>,
    value: V,
}

impl<T, V> Tier<T, V> {
    /// Create a tier covering `lower..upper` that yields `value`.
    pub const fn new(lower: Bound<T>, upper: Bound<T>, value: V) -> Self {
        Self {
            lower,
            upper,
            value,
        }
    }

    /// Return the lower bound.
    pub const fn lower(&self) -> &Bound<T> {
        &self.lower
    }

    /// Return the upper bound.
    pub const fn upper(&self) -> &Bound<T> {
        &self.upper
    }

    /// Return the value this tier yields.
    pub const fn value(&self) -> &V {
        &self.value
    }
}

impl<T, V> RangeBounds<T> for Tier<T, V> {
    fn start_bound(&self) -> Bound<&T> {
        self.lower.as_ref()
    }

    fn end_bound(&self) -> Bound<&T> {
        self.upper.as_ref()
    }
}

/// An ordered, first-match-wins table of [`Tier`]s.
#[derive(Debug, Clone, Copy)]
pub struct TierTable<T: 'static, V: 'static> {
    tiers: &'static [Tier<T, V>],
}

impl<T: PartialOrd, V> TierTable<T, V> {
    /// Create a table from rows in priority order.
    pub const fn new(tiers: &'static [Tier<T, V>]) -> Self {
        Self { tiers }
    }

    /// Return the rows in priority order.
    pub const fn tiers(&self) -> &'static [Tier<T, V>] {
        self.tiers
    }

    /// Find the first tier whose range contains `value`.
    ///
    /// Values that compare unordered against a bound (`NaN`) never match a
    /// bounded row.
    pub fn tier_for(&self, value: &T) -> Option<&'static Tier<T, V>> {
        self.tiers.iter().find(|tier| tier.contains(value))
    }
}

impl<T: PartialOrd, V: Copy> TierTable<T, V> {
    /// Return the value of the first matching tier, or `fallback` when no row matches.
    pub fn value_or(&self, value: &T, fallback: V) -> V {
        self.tier_for(value).map_or(fallback, |tier| tier.value)
    }
}
