use super::ledger::Evidence;
use super::rules::{Category, RuleId};
use serde::{Deserialize, Serialize};

/// Traffic-light outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Ok,
    Watch,
    Red,
    Na,
}

impl Status {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Watch => "WATCH",
            Self::Red => "RED",
            Self::Na => "N/A",
        }
    }

    pub const fn is_applicable(self) -> bool {
        !matches!(self, Self::Na)
    }
}

/// Explainable result of one rule against one ledger.
///
/// `value` is `Some` exactly when `status` is not [`Status::Na`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub rule_id: RuleId,
    pub check_name: String,
    pub category: Category,
    pub value: Option<f64>,
    pub status: Status,
    pub interpretation: String,
    pub formula: String,
    pub evidence: Vec<Evidence>,
}

impl Verdict {
    pub fn is_red_flag(&self) -> bool {
        self.status == Status::Red
    }
}
