//! Financial health scorecards for oil & gas equities.
//!
//! A [`scoring::Ledger`] of normalized metrics is run through the eighteen
//! checks of the [`scoring::RuleLibrary`], producing one explainable
//! [`scoring::Verdict`] per check and an aggregate [`scoring::Scorecard`].
//! The [`analysis`] module resolves tickers to ledgers and exposes the
//! scorecard over HTTP.

pub mod analysis;
pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
