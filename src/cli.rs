//! Command runner
//!
//! Executes one [`Command`] against a store, writing human-readable output.

use std::{io, time::SystemTime};

use thiserror::Error;
use tracing::debug;

use crate::{
    access::{AccessError, AccessGate, Credentials},
    calculator::Calculator,
    config::{Command, PayoutArgs},
    deals::{DealError, SavedDeals},
    preferences::Preferences,
    quotes::quote_for_elapsed,
    statement::{Statement, StatementError, usd, write_saved_deals},
    storage::{KeyValueStore, StorageError},
    tracker::Tracker,
};

/// Errors surfaced to the user by the command runner.
#[derive(Debug, Error)]
pub enum CliError {
    /// The gate is enabled and no session is recorded.
    #[error("sign in first: commission login <username> <password>")]
    SignInRequired,

    /// Sign-in failed.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Saved deal operation failed.
    #[error(transparent)]
    Deal(#[from] DealError),

    /// Store read or write failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Output could not be written.
    #[error(transparent)]
    Statement(#[from] StatementError),
}

impl From<io::Error> for CliError {
    fn from(error: io::Error) -> Self {
        Self::Statement(StatementError::Io(error))
    }
}

/// Run `command` against `store`, writing output to `out`.
///
/// When `credentials` are configured, every command other than `login` and
/// `logout` requires a recorded session.
///
/// # Errors
///
/// Returns a [`CliError`] if the gate refuses the command, a saved deal is
/// missing, or the store or output fails.
pub fn run(
    command: Command,
    credentials: Option<Credentials>,
    store: &mut impl KeyValueStore,
    mut out: impl io::Write,
) -> Result<(), CliError> {
    let gate = credentials.map(AccessGate::new);

    match &command {
        Command::Login { username, password } => {
            if let Some(gate) = &gate {
                gate.login(store, username, password)?;
                writeln!(out, "Signed in.")?;
            } else {
                writeln!(out, "No credentials configured; sign-in is not required.")?;
            }

            return Ok(());
        }
        Command::Logout => {
            AccessGate::logout(store)?;
            writeln!(out, "Signed out.")?;

            return Ok(());
        }
        _ => {}
    }

    if gate.is_some() && !AccessGate::is_authed(&*store)? {
        return Err(CliError::SignInRequired);
    }

    debug!(?command, "running command");

    let prefs = Preferences::load(&*store)?;

    match command {
        Command::Compute(args) => {
            let calculator = calculator_for(&args, prefs, Tracker::load(&*store)?);
            write_statement(&mut out, &calculator, false)?;
        }
        Command::Recompute(args) => {
            let mut calculator = calculator_for(&args, prefs, Tracker::load(&*store)?);
            let outcome = calculator.recompute();

            write_statement(&mut out, &calculator, outcome.celebrate)?;

            if outcome.recorded {
                calculator.tracker().persist(store)?;
            }

            write_tracker(&mut out, calculator.tracker())?;
        }
        Command::Tip(args) => {
            let calculator = calculator_for(&args, prefs, Tracker::default());
            writeln!(out, "{}", calculator.coach_tip())?;
        }
        Command::Prefs {
            mode,
            accent,
            sale_kind,
        } => {
            let updated = Preferences {
                mode: mode.unwrap_or(prefs.mode),
                accent: accent.unwrap_or(prefs.accent),
                sale_kind: sale_kind.unwrap_or(prefs.sale_kind),
            };

            if updated != prefs {
                updated.save(store)?;
            }

            writeln!(
                out,
                "mode: {}\naccent: {}\nsale kind: {}",
                updated.mode, updated.accent, updated.sale_kind
            )?;
        }
        Command::Tracker { reset } => {
            let mut tracker = Tracker::load(&*store)?;

            if reset {
                tracker.reset(store)?;
            }

            write_tracker(&mut out, &tracker)?;
        }
        command => run_saved_deal_command(command, prefs, store, out)?,
    }

    Ok(())
}

fn run_saved_deal_command(
    command: Command,
    prefs: Preferences,
    store: &mut impl KeyValueStore,
    mut out: impl io::Write,
) -> Result<(), CliError> {
    let mut saved = SavedDeals::load(&*store)?;

    match command {
        Command::Save { name, payout } => {
            let calculator = calculator_for(&payout, prefs, Tracker::default());
            let deal = saved.save(name.as_deref(), calculator.input());
            saved.persist(store)?;

            writeln!(out, "Saved {} ({}) as {}", deal.name, usd(deal.total), deal.id)?;
        }
        Command::List { query } => {
            write_saved_deals(&mut out, saved.search(&query.join(" ")))?;
        }
        Command::Rename { id, name } => {
            if saved.rename(id, &name)? {
                saved.persist(store)?;
                writeln!(out, "Renamed {id} to {}", name.trim())?;
            } else {
                writeln!(out, "Name is blank; {id} unchanged.")?;
            }
        }
        Command::Delete { id } => {
            let deal = saved.delete(id)?;
            saved.persist(store)?;

            writeln!(out, "Deleted {}", deal.name)?;
        }
        Command::Load { id } => {
            let deal = saved.get(id).ok_or(DealError::NotFound(id))?;

            let mut calculator = Calculator::new(prefs.sale_kind, Tracker::default());
            calculator.load(deal);

            writeln!(out, "{}", deal.name)?;
            write_statement(&mut out, &calculator, false)?;
        }
        Command::Compute(_)
        | Command::Recompute(_)
        | Command::Tip(_)
        | Command::Prefs { .. }
        | Command::Tracker { .. }
        | Command::Login { .. }
        | Command::Logout => {}
    }

    Ok(())
}

/// Build a session from typed inputs, committing the text fields the way the
/// entry fields do.
fn calculator_for(args: &PayoutArgs, prefs: Preferences, tracker: Tracker) -> Calculator {
    let mut calculator = Calculator::new(args.sale_kind.unwrap_or(prefs.sale_kind), tracker);

    calculator.set_deals(args.deals);
    calculator.edit_ppw_text(args.ppw.as_str());
    calculator.commit_ppw_text();
    calculator.edit_watts_text(args.watts.as_str());
    calculator.commit_watts_text();

    calculator
}

fn write_statement(
    out: &mut impl io::Write,
    calculator: &Calculator,
    celebrate: bool,
) -> Result<(), CliError> {
    let elapsed = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();

    Statement::new(calculator.input(), calculator.result())
        .with_tip(calculator.coach_tip())
        .with_quote(quote_for_elapsed(elapsed))
        .with_celebration(celebrate)
        .write_to(out)?;

    Ok(())
}

fn write_tracker(out: &mut impl io::Write, tracker: &Tracker) -> Result<(), CliError> {
    writeln!(
        out,
        "Tracked: {} deals, {} earned",
        tracker.deals(),
        usd(tracker.earnings())
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;
    use crate::{config::CliConfig, storage::MemoryStore};

    fn exec(store: &mut MemoryStore, args: &[&str]) -> Result<String, CliError> {
        let config = CliConfig::try_parse_from(
            ["commission"].into_iter().chain(args.iter().copied()),
        )
        .map_err(|error| CliError::Statement(StatementError::Io(io::Error::other(error))))?;

        let mut out = Vec::new();
        run(config.command, config.access.credentials(), store, &mut out)?;

        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    fn with_gate<'a>(command: &[&'a str]) -> Vec<&'a str> {
        ["--username", "rep", "--password", "pw"]
            .into_iter()
            .chain(command.iter().copied())
            .collect()
    }

    #[test]
    fn recompute_feeds_the_tracker() -> TestResult {
        let mut store = MemoryStore::new();

        exec(&mut store, &["recompute", "-d", "7", "-p", "3.6", "-w", "14000"])?;
        let text = exec(&mut store, &["tracker"])?;

        assert!(text.contains("1 deals"));
        assert!(text.contains("4,300"));

        exec(&mut store, &["tracker", "--reset"])?;
        assert!(exec(&mut store, &["tracker"])?.contains("0 deals"));

        Ok(())
    }

    #[test]
    fn only_recompute_celebrates() -> TestResult {
        let mut store = MemoryStore::new();
        let computed = exec(&mut store, &["compute", "-d", "7", "-p", "3.6", "-w", "14000"])?;
        assert!(computed.contains("4,300"));
        assert!(!computed.contains("and climbing"));

        exec(&mut store, &["save", "-n", "Jones", "-d", "7", "-p", "3.6", "-w", "14000"])?;
        let Some(id) = SavedDeals::load(&store)?.iter().next().map(|deal| deal.id.to_string())
        else {
            panic!("expected a saved deal");
        };
        assert!(!exec(&mut store, &["load", id.as_str()])?.contains("and climbing"));

        let recomputed = exec(&mut store, &["recompute", "-d", "7", "-p", "3.6", "-w", "14000"])?;
        assert!(recomputed.contains("and climbing"));

        let quiet = exec(&mut store, &["recompute", "-d", "1", "-p", "2.5", "-w", "5000"])?;
        assert!(!quiet.contains("and climbing"));

        Ok(())
    }

    #[test]
    fn compute_does_not_touch_the_tracker() -> TestResult {
        let mut store = MemoryStore::new();

        let text = exec(&mut store, &["compute", "-d", "1", "-p", "3.0", "-w", "8000"])?;

        assert!(text.contains("2,200"));
        assert!(exec(&mut store, &["tracker"])?.contains("0 deals"));

        Ok(())
    }

    #[test]
    fn sale_kind_defaults_to_preference() -> TestResult {
        let mut store = MemoryStore::new();

        exec(&mut store, &["prefs", "--sale-kind", "tpo"])?;
        let text = exec(&mut store, &["compute", "-d", "7", "-p", "3.6", "-w", "20000"])?;

        assert!(text.contains("TPO/PPA"));
        assert!(text.contains("Tip: TPO/PPA selected"));

        Ok(())
    }

    #[test]
    fn saved_deals_lifecycle() -> TestResult {
        let mut store = MemoryStore::new();

        exec(&mut store, &["save", "-n", "Smith", "-d", "1", "-p", "3.05", "-w", "8400"])?;
        exec(&mut store, &["save", "-n", "Jones", "-d", "7", "-p", "3.6", "-w", "20000"])?;

        let saved = SavedDeals::load(&store)?;
        let smith = saved.search("smith").map(|deal| deal.id).next();
        let Some(smith) = smith.map(|id| id.to_string()) else {
            panic!("expected a saved deal named Smith");
        };

        let listed = exec(&mut store, &["list", "jones"])?;
        assert!(listed.contains("Jones"));
        assert!(!listed.contains("Smith"));

        exec(&mut store, &["rename", smith.as_str(), "Smith 8.4kW"])?;
        assert!(exec(&mut store, &["load", smith.as_str()])?.contains("Smith 8.4kW"));

        exec(&mut store, &["delete", smith.as_str()])?;
        assert!(matches!(
            exec(&mut store, &["load", smith.as_str()]),
            Err(CliError::Deal(DealError::NotFound(_)))
        ));

        Ok(())
    }

    #[test]
    fn gate_blocks_until_signed_in() -> TestResult {
        let mut store = MemoryStore::new();

        assert!(matches!(
            exec(&mut store, &with_gate(&["tracker"])),
            Err(CliError::SignInRequired)
        ));
        assert!(matches!(
            exec(&mut store, &with_gate(&["login", "rep", "PW"])),
            Err(CliError::Access(AccessError::InvalidCredentials))
        ));

        assert!(matches!(
            exec(&mut store, &with_gate(&["login", "someone", "pw"])),
            Err(CliError::Access(AccessError::InvalidCredentials))
        ));
        assert!(matches!(
            exec(&mut store, &with_gate(&["tracker"])),
            Err(CliError::SignInRequired)
        ));

        exec(&mut store, &with_gate(&["login", "rep", "pw"]))?;
        exec(&mut store, &with_gate(&["tracker"]))?;
        exec(&mut store, &with_gate(&["logout"]))?;

        assert!(matches!(
            exec(&mut store, &with_gate(&["tracker"])),
            Err(CliError::SignInRequired)
        ));

        Ok(())
    }
}
