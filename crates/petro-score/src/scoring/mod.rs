//! Ledger model, rule library and evaluator.

pub mod catalog;
pub mod derive;
mod engine;
mod ledger;
pub mod rules;
mod scorecard;
pub mod thresholds;
mod verdict;

#[cfg(test)]
mod tests;

pub use engine::{Evaluator, IntegrityError, RuleDescriptor, RuleLibrary};
pub use ledger::{Evidence, Ledger, Metric, MetricError, MetricQuality};
pub use rules::{Category, Direction, Rule, RuleId, RuleMeta, ValueUnit};
pub use scorecard::Scorecard;
pub use thresholds::{Band, ThresholdError, ThresholdTable};
pub use verdict::{Status, Verdict};
