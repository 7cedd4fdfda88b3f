//! Command line & environment configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use crate::{
    access::Credentials,
    payout::SaleKind,
    preferences::{Accent, Mode},
};

/// Commission calculator configuration.
#[derive(Debug, Parser)]
#[command(
    name = "commission",
    about = "Solar commission payout calculator",
    long_about = None
)]
pub struct CliConfig {
    /// File backing preferences, saved deals and the tracker
    #[arg(long, env = "COMMISSION_STORE", default_value = "commission.yml")]
    pub store: PathBuf,

    /// Logging settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Sign-in settings.
    #[command(flatten)]
    pub access: AccessConfig,

    /// Action to run.
    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Load configuration from `.env`, the environment and CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed.
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Sign-in settings. The gate is active only when both values are set.
#[derive(Debug, Args)]
pub struct AccessConfig {
    /// Username required to use the calculator
    #[arg(long = "username", id = "gate_username", env = "COMMISSION_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password required to use the calculator
    #[arg(
        long = "password",
        id = "gate_password",
        env = "COMMISSION_PASSWORD",
        hide_env_values = true,
        global = true
    )]
    pub password: Option<String>,
}

impl AccessConfig {
    /// Configured credentials, if the gate is enabled.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials::new(username, password)),
            _ => None,
        }
    }
}

/// Payout inputs, as typed into the entry fields.
#[derive(Debug, Clone, Args)]
pub struct PayoutArgs {
    /// Deals closed this month (clamped to 0..=50)
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub deals: i64,

    /// Price per watt (clamped to 2.40..=5.00)
    #[arg(short, long, default_value = "0")]
    pub ppw: String,

    /// System size in watts (clamped to 4001..=30000)
    #[arg(short, long, default_value = "0")]
    pub watts: String,

    /// Sale structure; defaults to the remembered preference
    #[arg(short = 'k', long, value_enum)]
    pub sale_kind: Option<SaleKind>,
}

/// Calculator actions.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the payout for the given inputs
    Compute(PayoutArgs),

    /// Compute the payout and add it to the tracker
    Recompute(PayoutArgs),

    /// Show a coaching tip for the given inputs
    Tip(PayoutArgs),

    /// Save the given inputs as a named deal
    Save {
        /// Name for the deal
        #[arg(short, long)]
        name: Option<String>,

        /// Inputs to save.
        #[command(flatten)]
        payout: PayoutArgs,
    },

    /// List saved deals, optionally filtered
    List {
        /// Search terms; every term must match
        query: Vec<String>,
    },

    /// Rename a saved deal
    Rename {
        /// Deal id
        id: Uuid,

        /// New name
        name: String,
    },

    /// Delete a saved deal
    Delete {
        /// Deal id
        id: Uuid,
    },

    /// Recompute a saved deal
    Load {
        /// Deal id
        id: Uuid,
    },

    /// Show or change preferences
    Prefs {
        /// Colour mode
        #[arg(long, value_enum)]
        mode: Option<Mode>,

        /// Accent theme
        #[arg(long, value_enum)]
        accent: Option<Accent>,

        /// Default sale structure
        #[arg(long, value_enum)]
        sale_kind: Option<SaleKind>,
    },

    /// Show or reset the earnings tracker
    Tracker {
        /// Zero the tracked deals and earnings
        #[arg(long)]
        reset: bool,
    },

    /// Sign in
    Login {
        /// Username
        username: String,

        /// Password
        password: String,
    },

    /// Sign out
    Logout,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn compute_parses_text_inputs() -> TestResult {
        let config = CliConfig::try_parse_from([
            "commission", "compute", "-d", "7", "-p", "3.6", "-w", "14,000", "-k", "tpo",
        ])?;

        let Command::Compute(args) = config.command else {
            panic!("expected compute command");
        };

        assert_eq!(args.deals, 7);
        assert_eq!(args.ppw, "3.6");
        assert_eq!(args.watts, "14,000");
        assert_eq!(args.sale_kind, Some(SaleKind::Tpo));

        Ok(())
    }

    #[test]
    fn gate_needs_both_credentials() -> TestResult {
        let config = CliConfig::try_parse_from(["commission", "--username", "rep", "logout"])?;

        assert!(config.access.credentials().is_none());

        let config = CliConfig::try_parse_from([
            "commission", "--username", "rep", "--password", "pw", "logout",
        ])?;

        assert!(config.access.credentials().is_some());

        Ok(())
    }

    #[test]
    fn login_values_stay_apart_from_configured_credentials() -> TestResult {
        let config = CliConfig::try_parse_from([
            "commission", "--username", "rep", "--password", "pw", "login", "someone", "PW",
        ])?;

        let Command::Login { username, password } = config.command else {
            panic!("expected login command");
        };

        assert_eq!(username, "someone");
        assert_eq!(password, "PW");
        assert_eq!(config.access.username.as_deref(), Some("rep"));
        assert_eq!(config.access.password.as_deref(), Some("pw"));

        Ok(())
    }

    #[test]
    fn rename_takes_a_uuid() {
        assert!(CliConfig::try_parse_from(["commission", "rename", "not-a-uuid", "x"]).is_err());
    }
}
