//! Quotes

use std::time::Duration;

/// How long each quote stays up.
pub const QUOTE_INTERVAL: Duration = Duration::from_secs(15);

/// Motivational quotes, in rotation order.
pub const QUOTES: [&str; 6] = [
    "Momentum wins. Execution > hesitation.",
    "One-call close: go for the decision today.",
    "Price is a story. Value is the plot.",
    "Clarity + urgency = signatures.",
    "Every objection is a request for confidence.",
    "Anchor on lifetime savings, not today's bill.",
];

/// The quote shown after `tick` rotations.
pub fn quote_at(tick: u64) -> &'static str {
    let len = QUOTES.len() as u64;

    usize::try_from(tick % len)
        .ok()
        .and_then(|idx| QUOTES.get(idx))
        .copied()
        .unwrap_or(QUOTES[0])
}

/// The quote shown `elapsed` after the rotation started.
pub fn quote_for_elapsed(elapsed: Duration) -> &'static str {
    let tick = elapsed.as_secs() / QUOTE_INTERVAL.as_secs();

    quote_at(tick)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps() {
        assert_eq!(quote_at(0), QUOTES[0]);
        assert_eq!(quote_at(5), QUOTES[5]);
        assert_eq!(quote_at(6), QUOTES[0]);
        assert_eq!(quote_at(u64::MAX), QUOTES[3]);
    }

    #[test]
    fn quotes_change_every_interval() {
        assert_eq!(quote_for_elapsed(Duration::from_secs(14)), QUOTES[0]);
        assert_eq!(quote_for_elapsed(Duration::from_secs(15)), QUOTES[1]);
        assert_eq!(quote_for_elapsed(Duration::from_secs(95)), QUOTES[0]);
    }
}
