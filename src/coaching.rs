//! Coaching
//!
//! A one-line tip pointing at the nearest payout improvement for the current
//! inputs.

use std::fmt;

use crate::{
    celebration::CELEBRATION_THRESHOLD,
    payout::{SYSTEM_BONUS_CAP_KW, SYSTEM_BONUS_FLOOR_KW, SaleKind},
};

/// Largest PPW increase worth suggesting.
pub const PPW_NUDGE: f64 = 0.1;

/// Largest system size increase (kW) worth suggesting.
pub const KW_NUDGE: f64 = 1.0;

/// A coaching tip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoachTip {
    /// Only deal volume matters for TPO/PPA sales.
    Tpo,

    /// A small PPW bump reaches the next bonus tier.
    PpwTier {
        /// PPW increase needed.
        delta: f64,

        /// PPW of the next tier.
        tier: f64,

        /// Bonus per kW at that tier.
        per_kw: u32,
    },

    /// A few more panels reach the next system bonus step.
    SystemSize {
        /// Watts to add.
        watts_needed: f64,

        /// System size to reach, in kW.
        target_kw: f64,

        /// Whether reaching the target starts the system bonus.
        starts_bonus: bool,
    },

    /// The payout is short of the celebration threshold.
    PushToTarget,

    /// The payout is already strong.
    LockItIn,
}

/// Pick the tip for the current inputs and payout total.
pub fn coach_tip(sale_kind: SaleKind, ppw: f64, watts: f64, total: i64) -> CoachTip {
    if sale_kind == SaleKind::Tpo {
        return CoachTip::Tpo;
    }

    if let Some(tier) = next_ppw_tier(ppw) {
        let delta = tier - ppw;

        if delta > 0.0 && delta <= PPW_NUDGE {
            return CoachTip::PpwTier {
                delta,
                tier,
                per_kw: tier_rate(tier),
            };
        }
    }

    let kw = watts / 1000.0;

    if let Some(target_kw) = next_kw_step(kw) {
        let delta = target_kw - kw;

        if delta > 0.0 && delta <= KW_NUDGE {
            return CoachTip::SystemSize {
                watts_needed: (delta * 1000.0).ceil(),
                target_kw,
                starts_bonus: target_kw <= SYSTEM_BONUS_FLOOR_KW,
            };
        }
    }

    if total < CELEBRATION_THRESHOLD {
        CoachTip::PushToTarget
    } else {
        CoachTip::LockItIn
    }
}

/// The lowest PPW in the next bonus tier above `ppw`, if one exists.
///
/// Nothing is suggested from the top tier: above 4.5 the PPW bonus stops.
fn next_ppw_tier(ppw: f64) -> Option<f64> {
    if ppw < 3.0 {
        Some(3.0)
    } else if ppw <= 3.2 {
        Some(3.21)
    } else if ppw <= 3.5 {
        Some(3.51)
    } else {
        None
    }
}

fn tier_rate(tier: f64) -> u32 {
    if tier >= 3.5 {
        100
    } else if tier > 3.2 {
        75
    } else if tier >= 3.0 {
        50
    } else {
        25
    }
}

/// The next system size (kW) that changes the system bonus.
fn next_kw_step(kw: f64) -> Option<f64> {
    if kw < SYSTEM_BONUS_FLOOR_KW {
        Some(SYSTEM_BONUS_FLOOR_KW)
    } else if kw < SYSTEM_BONUS_CAP_KW {
        Some(kw.floor() + 1.0)
    } else {
        None
    }
}

impl fmt::Display for CoachTip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoachTip::Tpo => f.write_str(
                "TPO/PPA selected: Only base payout varies with monthly deals. \
                 PPW & system bonuses are not applied.",
            ),
            CoachTip::PpwTier {
                delta,
                tier,
                per_kw,
            } => write!(
                f,
                "Bump PPW by {delta:.2} to reach tier {tier:.2} and unlock ~${per_kw}/kW."
            ),
            CoachTip::SystemSize {
                watts_needed,
                target_kw,
                starts_bonus,
            } => {
                let reward = if *starts_bonus {
                    "start the $200 system bonus"
                } else {
                    "add another $50 system bonus"
                };

                write!(
                    f,
                    "Add ~{watts_needed} watts to hit {target_kw} kW and {reward}."
                )
            }
            CoachTip::PushToTarget => f.write_str(
                "Push to $2.5k: raise PPW slightly or add panels to reach the next bonus tier.",
            ),
            CoachTip::LockItIn => f.write_str(
                "Nice! Lock it in. If homeowner is value-focused, anchor on lifetime savings vs. payment.",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tpo_always_gets_the_tpo_tip() {
        assert_eq!(coach_tip(SaleKind::Tpo, 3.19, 9900.0, 0), CoachTip::Tpo);
    }

    #[test]
    fn close_ppw_tier_is_suggested_first() {
        let tip = coach_tip(SaleKind::Loan, 2.95, 9900.0, 1000);

        assert!(matches!(
            tip,
            CoachTip::PpwTier { tier, per_kw: 50, .. } if (tier - 3.0).abs() < f64::EPSILON
        ));
        assert_eq!(
            tip.to_string(),
            "Bump PPW by 0.05 to reach tier 3.00 and unlock ~$50/kW."
        );
    }

    #[test]
    fn ppw_tier_rates_follow_the_tier() {
        assert!(matches!(
            coach_tip(SaleKind::Loan, 3.15, 0.0, 0),
            CoachTip::PpwTier { per_kw: 75, .. }
        ));
        assert!(matches!(
            coach_tip(SaleKind::Loan, 3.45, 0.0, 0),
            CoachTip::PpwTier { per_kw: 100, .. }
        ));
    }

    #[test]
    fn top_tier_is_never_bumped_past() {
        assert_eq!(coach_tip(SaleKind::Loan, 4.45, 30_000.0, 5000), CoachTip::LockItIn);
    }

    #[test]
    fn close_system_size_starts_the_bonus() {
        let tip = coach_tip(SaleKind::Loan, 2.5, 9750.0, 1800);

        assert_eq!(
            tip,
            CoachTip::SystemSize {
                watts_needed: 250.0,
                target_kw: 10.0,
                starts_bonus: true,
            }
        );
        assert_eq!(
            tip.to_string(),
            "Add ~250 watts to hit 10 kW and start the $200 system bonus."
        );
    }

    #[test]
    fn whole_kw_steps_to_the_next_kw() {
        assert_eq!(
            coach_tip(SaleKind::Loan, 2.5, 12_000.0, 2000),
            CoachTip::SystemSize {
                watts_needed: 1000.0,
                target_kw: 13.0,
                starts_bonus: false,
            }
        );
    }

    #[test]
    fn capped_systems_fall_through_to_total() {
        assert_eq!(coach_tip(SaleKind::Loan, 2.5, 20_000.0, 2499), CoachTip::PushToTarget);
        assert_eq!(coach_tip(SaleKind::Loan, 2.5, 20_000.0, 2500), CoachTip::LockItIn);
    }

    #[test]
    fn distant_targets_fall_through_to_total() {
        assert_eq!(coach_tip(SaleKind::Loan, 2.5, 5000.0, 0), CoachTip::PushToTarget);
    }
}
