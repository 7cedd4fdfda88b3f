//! Commission
//!
//! Commission is a payout calculator for solar sales reps: a tiered base payout
//! by monthly deal count, a price-per-watt bonus and a big-system bonus, with
//! saved deals, an earnings tracker and coaching tips around it.

pub mod access;
pub mod calculator;
pub mod celebration;
pub mod cli;
pub mod coaching;
pub mod config;
pub mod deals;
pub mod inputs;
pub mod observability;
pub mod payout;
pub mod preferences;
pub mod quotes;
pub mod statement;
pub mod storage;
pub mod tiers;
pub mod tracker;
