use super::verdict::{Status, Verdict};
use serde::Serialize;

/// Ordered verdicts with their aggregate. Built once by the evaluator and
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    verdicts: Vec<Verdict>,
    score: usize,
    total: usize,
}

impl Scorecard {
    pub(crate) fn from_verdicts(verdicts: Vec<Verdict>) -> Self {
        let score = verdicts
            .iter()
            .filter(|verdict| verdict.status == Status::Ok)
            .count();
        let total = verdicts
            .iter()
            .filter(|verdict| verdict.status.is_applicable())
            .count();

        Self {
            verdicts,
            score,
            total,
        }
    }

    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    /// Number of checks that passed.
    pub fn score(&self) -> usize {
        self.score
    }

    /// Number of checks that could be evaluated.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn red_flags(&self) -> impl Iterator<Item = &Verdict> {
        self.verdicts.iter().filter(|verdict| verdict.is_red_flag())
    }

    pub fn count(&self, status: Status) -> usize {
        self.verdicts
            .iter()
            .filter(|verdict| verdict.status == status)
            .count()
    }

    pub fn into_verdicts(self) -> Vec<Verdict> {
        self.verdicts
    }
}
