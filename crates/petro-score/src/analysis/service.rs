use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::source::{LedgerBuildError, LedgerSource};
use crate::scoring::{
    Evaluator, Ledger, MetricQuality, RuleDescriptor, Scorecard, Status, Verdict,
};

/// Service pairing a ledger source with the evaluator.
pub struct AnalysisService<S> {
    source: Arc<S>,
    evaluator: Evaluator,
}

impl<S> AnalysisService<S>
where
    S: LedgerSource + 'static,
{
    pub fn new(source: Arc<S>, evaluator: Evaluator) -> Self {
        Self { source, evaluator }
    }

    /// Resolve, score and package a ticker. The evaluator only runs once a
    /// ledger has been built.
    pub fn analyze(&self, ticker: &str) -> Result<AnalysisReport, AnalysisServiceError> {
        let ledger = match self.source.build_ledger(ticker) {
            Ok(ledger) => ledger,
            Err(err) => {
                warn!(ticker, error = %err, "ledger construction failed");
                return Err(err.into());
            }
        };

        Ok(self.score(ledger))
    }

    /// Score a ledger supplied by the caller.
    pub fn score(&self, ledger: Ledger) -> AnalysisReport {
        let scorecard = self.evaluator.evaluate(&ledger);
        let report = AnalysisReport::new(ledger, scorecard);

        info!(
            ticker = %report.ticker,
            score = report.score,
            total = report.total,
            red_flags = report.red_flags.len(),
            "analysis complete"
        );
        report
    }

    pub fn rules(&self) -> RuleCatalogView {
        let library = self.evaluator.library();
        RuleCatalogView {
            table_version: library.table_version().to_string(),
            rules: library.describe(),
        }
    }
}

/// Error raised by the analysis service.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerBuildError),
}

/// Response body for an analysis: headline, verdicts and the ledger behind
/// them.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub ticker: String,
    pub summary: String,
    pub score: usize,
    pub total: usize,
    pub red_flags: Vec<String>,
    pub scorecard: Vec<Verdict>,
    pub ledger: Ledger,
    pub evidence: Vec<EvidenceEntry>,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisReport {
    pub fn new(ledger: Ledger, scorecard: Scorecard) -> Self {
        let ticker = ledger.ticker().to_string();
        let summary = summary_line(&ticker, &scorecard);
        let red_flags = scorecard
            .red_flags()
            .map(|verdict| verdict.check_name.clone())
            .collect();
        let evidence = evidence_entries(&ledger);

        Self {
            ticker,
            summary,
            score: scorecard.score(),
            total: scorecard.total(),
            red_flags,
            scorecard: scorecard.into_verdicts(),
            ledger,
            evidence,
            generated_at: Utc::now(),
        }
    }

    pub fn count(&self, status: Status) -> usize {
        self.scorecard
            .iter()
            .filter(|verdict| verdict.status == status)
            .count()
    }
}

/// `Analysis complete for XOM. Score: 12/18 OK. Red Flags: 2.`
pub fn summary_line(ticker: &str, scorecard: &Scorecard) -> String {
    format!(
        "Analysis complete for {}. Score: {}/{} OK. Red Flags: {}.",
        ticker,
        scorecard.score(),
        scorecard.verdicts().len(),
        scorecard.red_flags().count()
    )
}

/// One cited figure from the ledger, flattened for audit tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceEntry {
    pub metric: String,
    pub value: Option<f64>,
    pub quality: MetricQuality,
    pub text: String,
    pub source: String,
    pub snippet_hash: String,
}

fn evidence_entries(ledger: &Ledger) -> Vec<EvidenceEntry> {
    ledger
        .metrics()
        .flat_map(|metric| {
            metric.evidence().iter().map(move |evidence| EvidenceEntry {
                metric: metric.name().to_string(),
                value: metric.value(),
                quality: metric.quality(),
                text: evidence.text().to_string(),
                source: evidence.source().to_string(),
                snippet_hash: evidence.snippet_hash().to_string(),
            })
        })
        .collect()
}

/// Rule metadata for dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct RuleCatalogView {
    pub table_version: String,
    pub rules: Vec<RuleDescriptor>,
}
