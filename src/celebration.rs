//! Celebration

/// Payout total (dollars) at which a recompute is celebrated.
pub const CELEBRATION_THRESHOLD: i64 = 2500;

/// Whether a payout total earns a celebration.
///
/// Depends only on the final number, not on the sale structure that produced it.
pub const fn should_celebrate(total: i64) -> bool {
    total >= CELEBRATION_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        assert!(!should_celebrate(2499));
        assert!(should_celebrate(2500));
        assert!(should_celebrate(4500));
    }

    #[test]
    fn zero_and_negative_totals_are_quiet() {
        assert!(!should_celebrate(0));
        assert!(!should_celebrate(i64::MIN));
    }
}
