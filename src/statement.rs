//! Statement
//!
//! Terminal rendering of a payout breakdown and of the saved deal list.

use std::io;

use rusty_money::{Money, iso};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    coaching::CoachTip,
    deals::SavedDeal,
    payout::{PayoutInput, PayoutResult},
};

/// Errors that can occur when writing a statement.
#[derive(Debug, Error)]
pub enum StatementError {
    /// Writing to the output failed.
    #[error("failed to write statement: {0}")]
    Io(#[from] io::Error),
}

/// Format whole dollars as USD.
pub fn usd(dollars: i64) -> Money<'static, iso::Currency> {
    Money::from_minor(dollars.saturating_mul(100), iso::USD)
}

/// A rendered payout breakdown.
#[derive(Debug, Clone)]
pub struct Statement<'a> {
    input: &'a PayoutInput,
    result: PayoutResult,
    tip: Option<CoachTip>,
    quote: Option<&'static str>,
    celebrate: bool,
}

impl<'a> Statement<'a> {
    /// Create a statement for `result`, computed from `input`.
    pub fn new(input: &'a PayoutInput, result: PayoutResult) -> Self {
        Self {
            input,
            result,
            tip: None,
            quote: None,
            celebrate: false,
        }
    }

    /// Print the celebration line, as an explicit recompute does for big totals.
    #[must_use]
    pub const fn with_celebration(mut self, celebrate: bool) -> Self {
        self.celebrate = celebrate;
        self
    }

    /// Append a coaching tip.
    #[must_use]
    pub fn with_tip(mut self, tip: CoachTip) -> Self {
        self.tip = Some(tip);
        self
    }

    /// Append a quote.
    #[must_use]
    pub fn with_quote(mut self, quote: &'static str) -> Self {
        self.quote = Some(quote);
        self
    }

    /// Write the statement to `out`.
    ///
    /// # Errors
    ///
    /// Returns a [`StatementError`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), StatementError> {
        let input = self.input;

        writeln!(
            out,
            "\n{} · {} deals · ${:.2}/W · {:.2} kW",
            input.sale_kind.label(),
            input.deals,
            input.ppw,
            input.watts / 1000.0
        )?;

        let mut builder = Builder::default();
        builder.push_record(["", "Amount"]);
        builder.push_record(["Base".to_string(), usd(self.result.base).to_string()]);
        builder.push_record(["PPW bonus".to_string(), usd(self.result.ppw_bonus).to_string()]);
        builder.push_record([
            "System bonus".to_string(),
            usd(self.result.big_system_bonus).to_string(),
        ]);
        builder.push_record(["Total".to_string(), usd(self.result.total).to_string()]);

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);
        theme.insert_horizontal_line(4, separator);

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Rows::last(), Color::BOLD);
        table.modify(Columns::new(1..), Alignment::right());

        writeln!(out, "{table}")?;

        if self.celebrate {
            writeln!(out, "🎉 {} and climbing!", usd(self.result.total))?;
        }

        if let Some(tip) = &self.tip {
            writeln!(out, "Tip: {tip}")?;
        }

        if let Some(quote) = self.quote {
            writeln!(out, "“{quote}”")?;
        }

        Ok(())
    }
}

/// Write the saved deal list as a table.
///
/// # Errors
///
/// Returns a [`StatementError`] if writing fails.
pub fn write_saved_deals<'d>(
    mut out: impl io::Write,
    deals: impl IntoIterator<Item = &'d SavedDeal>,
) -> Result<(), StatementError> {
    let mut builder = Builder::default();
    builder.push_record(["Id", "Name", "Kind", "Deals", "PPW", "Watts", "Total", "Saved"]);

    let mut rows = 0_usize;
    for deal in deals {
        builder.push_record([
            deal.id.to_string(),
            deal.name.clone(),
            deal.sale_kind
                .map_or_else(String::new, |kind| kind.label().to_string()),
            deal.deals.to_string(),
            format!("{:.2}", deal.ppw),
            deal.watts.to_string(),
            usd(deal.total).to_string(),
            deal.created_at.strftime("%Y-%m-%d %H:%M").to_string(),
        ]);
        rows += 1;
    }

    if rows == 0 {
        writeln!(out, "No saved deals.")?;

        return Ok(());
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..7), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        deals::SavedDeals,
        payout::{SaleKind, compute},
    };

    fn input() -> PayoutInput {
        PayoutInput {
            deals: 7,
            ppw: 3.6,
            watts: 14_000.0,
            sale_kind: SaleKind::Loan,
        }
    }

    fn render(statement: &Statement<'_>) -> Result<String, StatementError> {
        let mut out = Vec::new();
        statement.write_to(&mut out)?;

        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn statement_lists_every_component() -> TestResult {
        let input = input();
        let result = compute(input.sale_kind, input.deals, input.ppw, input.watts);
        let text = render(&Statement::new(&input, result))?;

        assert!(text.contains("Loan/Cash"));
        assert!(text.contains("2,500"));
        assert!(text.contains("1,400"));
        assert!(text.contains("4,300"));
        assert!(!text.contains("and climbing"));

        Ok(())
    }

    #[test]
    fn celebration_line_only_when_asked() -> TestResult {
        let input = input();
        let result = compute(input.sale_kind, input.deals, input.ppw, input.watts);
        let text = render(&Statement::new(&input, result).with_celebration(true))?;

        assert!(text.contains("🎉"));
        assert!(text.contains("4,300.00 and climbing!"));

        Ok(())
    }

    #[test]
    fn tip_and_quote_follow_the_table() -> TestResult {
        let input = PayoutInput {
            deals: 1,
            ..input()
        };
        let result = PayoutResult {
            base: 1800,
            ppw_bonus: 0,
            big_system_bonus: 0,
            total: 1800,
        };
        let text = render(
            &Statement::new(&input, result)
                .with_tip(CoachTip::PushToTarget)
                .with_quote("Clarity + urgency = signatures."),
        )?;

        assert!(text.contains("Tip: Push to $2.5k"));
        assert!(text.contains("Clarity + urgency"));

        Ok(())
    }

    #[test]
    fn saved_deals_render_as_table() -> TestResult {
        let mut saved = SavedDeals::new();
        saved.save(Some("Smith"), &input());

        let mut out = Vec::new();
        write_saved_deals(&mut out, &saved)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Smith"));
        assert!(text.contains("3.60"));
        assert!(text.contains("14000"));

        Ok(())
    }

    #[test]
    fn empty_list_says_so() -> TestResult {
        let mut out = Vec::new();
        write_saved_deals(&mut out, &SavedDeals::new())?;

        assert_eq!(String::from_utf8(out)?, "No saved deals.\n");

        Ok(())
    }
}
