//! Payout
//!
//! The commission payout engine. Every function here is pure and total: any
//! deal count, PPW or wattage (negative, fractional, non-finite) produces a
//! result, with out-of-range inputs landing in the zero row of each ladder.

use std::{
    fmt,
    ops::Bound::{Excluded, Included, Unbounded},
};

use serde::{Deserialize, Serialize};

use crate::tiers::{Tier, TierTable};

/// Base payout in dollars, keyed by deals closed in the period.
pub static BASE_PAYOUT: TierTable<u32, i64> = TierTable::new(&[
    Tier::new(Included(7), Unbounded, 2500),
    Tier::new(Included(4), Excluded(7), 2200),
    Tier::new(Included(1), Excluded(4), 1800),
]);

/// PPW bonus in dollars per kW, keyed by price per watt.
pub static PPW_BONUS_RATE: TierTable<f64, u32> = TierTable::new(&[
    Tier::new(Included(2.8), Included(2.99), 25),
    Tier::new(Included(3.0), Included(3.2), 50),
    Tier::new(Excluded(3.2), Included(3.5), 75),
    Tier::new(Excluded(3.5), Included(4.5), 100),
]);

/// System size (kW) at which the system bonus starts.
pub const SYSTEM_BONUS_FLOOR_KW: f64 = 10.0;

/// System size (kW) beyond which the system bonus stops growing.
pub const SYSTEM_BONUS_CAP_KW: f64 = 20.0;

/// System bonus paid at exactly [`SYSTEM_BONUS_FLOOR_KW`].
pub const SYSTEM_BONUS_FLOOR: f64 = 200.0;

/// System bonus added per kW above the floor.
pub const SYSTEM_BONUS_PER_KW: f64 = 50.0;

/// Sale structure a payout is computed under.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SaleKind {
    /// Loan or cash sale; bonuses scale with price and system size.
    #[default]
    Loan,

    /// Third-party ownership (lease/PPA); only deal volume counts.
    Tpo,
}

impl SaleKind {
    /// Every sale kind, in display order.
    pub const ALL: [SaleKind; 2] = [SaleKind::Loan, SaleKind::Tpo];

    /// Stable lowercase identifier, as persisted.
    pub const fn as_str(self) -> &'static str {
        match self {
            SaleKind::Loan => "loan",
            SaleKind::Tpo => "tpo",
        }
    }

    /// Parse the persisted identifier.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == key)
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            SaleKind::Loan => "Loan/Cash",
            SaleKind::Tpo => "TPO/PPA",
        }
    }
}

impl fmt::Display for SaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs to a payout computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PayoutInput {
    /// Deals closed in the period.
    pub deals: u32,

    /// Price per watt.
    pub ppw: f64,

    /// System size in watts.
    pub watts: f64,

    /// Sale structure.
    pub sale_kind: SaleKind,
}

impl PayoutInput {
    /// Compute the payout for these inputs.
    pub fn compute(&self) -> PayoutResult {
        compute(self.sale_kind, self.deals, self.ppw, self.watts)
    }
}

/// A computed payout, in whole dollars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutResult {
    /// Payout for deal volume.
    pub base: i64,

    /// Bonus for pricing above cost thresholds.
    pub ppw_bonus: i64,

    /// Bonus for large installations.
    pub big_system_bonus: i64,

    /// Sum of all components.
    pub total: i64,
}

/// Compute the payout for the given sale structure.
pub fn compute(sale_kind: SaleKind, deals: u32, ppw: f64, watts: f64) -> PayoutResult {
    match sale_kind {
        SaleKind::Loan => compute_loan_payout(deals, ppw, watts),
        SaleKind::Tpo => compute_tpo_payout(deals, ppw, watts),
    }
}

/// Compute a loan/cash payout: base, PPW bonus and system bonus.
pub fn compute_loan_payout(deals: u32, ppw: f64, watts: f64) -> PayoutResult {
    let kw = watts / 1000.0;

    let base = BASE_PAYOUT.value_or(&deals, 0);
    let rate = PPW_BONUS_RATE.value_or(&ppw, 0);
    let ppw_bonus = round_dollars(f64::from(rate) * kw);
    let big_system_bonus = big_system_bonus(kw);

    PayoutResult {
        base,
        ppw_bonus,
        big_system_bonus,
        total: base
            .saturating_add(ppw_bonus)
            .saturating_add(big_system_bonus),
    }
}

/// Compute a TPO/PPA payout: the loan base with both bonuses forced to zero.
pub fn compute_tpo_payout(deals: u32, ppw: f64, watts: f64) -> PayoutResult {
    let loan = compute_loan_payout(deals, ppw, watts);

    PayoutResult {
        base: loan.base,
        ppw_bonus: 0,
        big_system_bonus: 0,
        total: loan.base,
    }
}

/// System bonus for a system of `kw` kilowatts.
///
/// Zero below [`SYSTEM_BONUS_FLOOR_KW`], then $50 per kW from a $200 floor,
/// capped at [`SYSTEM_BONUS_CAP_KW`].
pub fn big_system_bonus(kw: f64) -> i64 {
    if kw >= SYSTEM_BONUS_FLOOR_KW {
        let clamped = kw.min(SYSTEM_BONUS_CAP_KW);

        round_dollars(SYSTEM_BONUS_FLOOR + SYSTEM_BONUS_PER_KW * (clamped - SYSTEM_BONUS_FLOOR_KW))
    } else {
        0
    }
}

/// Round to whole dollars, ties towards positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
///
/// `NaN` becomes zero and infinities saturate.
#[expect(
    clippy::cast_possible_truncation,
    reason = "float to int casts saturate, which is the intended clamp"
)]
pub fn round_dollars(amount: f64) -> i64 {
    let floor = amount.floor();

    if amount - floor >= 0.5 {
        (floor + 1.0) as i64
    } else {
        floor as i64
    }
}
