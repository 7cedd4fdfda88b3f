//! Calculator
//!
//! Host-side session state: the current inputs, the pending text of the PPW
//! and watts entry fields, and the payout computed from them. Every input
//! change recomputes the payout; [`Calculator::recompute`] is the explicit
//! user action that also feeds the tracker and the celebration check.

use crate::{
    celebration::should_celebrate,
    coaching::{CoachTip, coach_tip},
    deals::SavedDeal,
    inputs::{clamp_deals, commit_ppw, commit_watts},
    payout::{PayoutInput, PayoutResult, SaleKind},
    tracker::Tracker,
};

/// Outcome of an explicit recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recompute {
    /// The recomputed payout.
    pub result: PayoutResult,

    /// Whether the payout earns a celebration.
    pub celebrate: bool,

    /// Whether the payout was added to the tracker.
    pub recorded: bool,
}

/// A calculator session.
#[derive(Debug, Clone)]
pub struct Calculator {
    input: PayoutInput,
    ppw_text: String,
    watts_text: String,
    result: PayoutResult,
    tracker: Tracker,
}

impl Calculator {
    /// Start a session with zeroed inputs.
    pub fn new(sale_kind: SaleKind, tracker: Tracker) -> Self {
        let input = PayoutInput {
            sale_kind,
            ..PayoutInput::default()
        };

        Self {
            input,
            ppw_text: "0".to_string(),
            watts_text: "0".to_string(),
            result: input.compute(),
            tracker,
        }
    }

    /// Current inputs.
    pub const fn input(&self) -> &PayoutInput {
        &self.input
    }

    /// Payout for the current inputs.
    pub const fn result(&self) -> PayoutResult {
        self.result
    }

    /// Tracked deals and earnings.
    pub const fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Pending PPW entry text.
    pub fn ppw_text(&self) -> &str {
        &self.ppw_text
    }

    /// Pending watts entry text.
    pub fn watts_text(&self) -> &str {
        &self.watts_text
    }

    /// Set the deal count, clamped to the picker range.
    pub fn set_deals(&mut self, deals: i64) -> PayoutResult {
        self.input.deals = clamp_deals(deals);

        self.refresh()
    }

    /// Set PPW directly, as the slider does.
    pub fn set_ppw(&mut self, ppw: f64) -> PayoutResult {
        self.input.ppw = ppw;
        self.ppw_text = ppw.to_string();

        self.refresh()
    }

    /// Set the system size directly, as the slider does.
    pub fn set_watts(&mut self, watts: f64) -> PayoutResult {
        self.input.watts = watts;
        self.watts_text = watts.to_string();

        self.refresh()
    }

    /// Switch sale structure.
    pub fn set_sale_kind(&mut self, sale_kind: SaleKind) -> PayoutResult {
        self.input.sale_kind = sale_kind;

        self.refresh()
    }

    /// Replace the pending PPW text without committing it.
    pub fn edit_ppw_text(&mut self, text: impl Into<String>) {
        self.ppw_text = text.into();
    }

    /// Replace the pending watts text without committing it.
    pub fn edit_watts_text(&mut self, text: impl Into<String>) {
        self.watts_text = text.into();
    }

    /// Commit the pending PPW text, normalising both the value and the text.
    pub fn commit_ppw_text(&mut self) -> PayoutResult {
        let ppw = commit_ppw(&self.ppw_text);

        self.set_ppw(ppw)
    }

    /// Commit the pending watts text, normalising both the value and the text.
    pub fn commit_watts_text(&mut self) -> PayoutResult {
        let watts = commit_watts(&self.watts_text);

        self.set_watts(f64::from(watts))
    }

    /// Load a saved deal's inputs. The sale kind is kept when the deal has none.
    pub fn load(&mut self, deal: &SavedDeal) -> PayoutResult {
        self.input = deal.input(self.input.sale_kind);
        self.ppw_text = format!("{:.2}", deal.ppw);
        self.watts_text = deal.watts.to_string();

        self.refresh()
    }

    /// Recompute on demand, recording non-zero payouts in the tracker.
    pub fn recompute(&mut self) -> Recompute {
        let result = self.refresh();
        let recorded = self.tracker.record(result.total);

        Recompute {
            result,
            celebrate: should_celebrate(result.total),
            recorded,
        }
    }

    /// Coaching tip for the current inputs.
    pub fn coach_tip(&self) -> CoachTip {
        coach_tip(
            self.input.sale_kind,
            self.input.ppw,
            self.input.watts,
            self.result.total,
        )
    }

    fn refresh(&mut self) -> PayoutResult {
        self.result = self.input.compute();

        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deals::SavedDeals;

    #[test]
    fn every_change_recomputes() {
        let mut calculator = Calculator::new(SaleKind::Loan, Tracker::default());

        assert_eq!(calculator.result().total, 0);

        calculator.set_deals(1);
        calculator.set_ppw(3.0);
        let result = calculator.set_watts(8000.0);

        assert_eq!(result.total, 2200);
        assert_eq!(calculator.result(), result);
        assert_eq!(calculator.set_sale_kind(SaleKind::Tpo).total, 1800);
    }

    #[test]
    fn committed_text_is_normalised() {
        let mut calculator = Calculator::new(SaleKind::Loan, Tracker::default());

        calculator.edit_ppw_text("3.456");
        calculator.commit_ppw_text();
        calculator.edit_watts_text("14,000 W");
        calculator.commit_watts_text();

        assert_eq!(calculator.ppw_text(), "3.46");
        assert_eq!(calculator.watts_text(), "14000");
        assert_eq!(calculator.result().ppw_bonus, 1050);
    }

    #[test]
    fn deals_are_clamped() {
        let mut calculator = Calculator::new(SaleKind::Loan, Tracker::default());

        calculator.set_deals(99);

        assert_eq!(calculator.input().deals, 50);
    }

    #[test]
    fn recompute_records_and_celebrates() {
        let mut calculator = Calculator::new(SaleKind::Tpo, Tracker::default());

        let quiet = calculator.recompute();
        assert!(!quiet.recorded);
        assert!(!quiet.celebrate);

        calculator.set_deals(7);
        let loud = calculator.recompute();

        assert!(loud.recorded);
        assert!(loud.celebrate);
        assert_eq!(calculator.tracker(), &Tracker::new(1, 2500));
    }

    #[test]
    fn loading_a_deal_recomputes_with_its_inputs() {
        let mut saved = SavedDeals::new();
        let deal = saved.save(
            Some("Jones"),
            &PayoutInput {
                deals: 7,
                ppw: 3.6,
                watts: 14_000.0,
                sale_kind: SaleKind::Loan,
            },
        );

        let mut calculator = Calculator::new(SaleKind::Tpo, Tracker::default());
        let result = calculator.load(&deal);

        assert_eq!(result.total, 4300);
        assert_eq!(calculator.input().sale_kind, SaleKind::Loan);
        assert_eq!(calculator.ppw_text(), "3.60");
        assert_eq!(calculator.watts_text(), "14000");
    }

    #[test]
    fn tip_follows_current_inputs() {
        let mut calculator = Calculator::new(SaleKind::Tpo, Tracker::default());

        assert_eq!(calculator.coach_tip(), CoachTip::Tpo);

        calculator.set_sale_kind(SaleKind::Loan);
        calculator.set_deals(7);
        calculator.set_ppw(3.6);
        calculator.set_watts(25_000.0);

        assert_eq!(calculator.coach_tip(), CoachTip::LockItIn);
    }
}
