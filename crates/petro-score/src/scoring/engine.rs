use super::catalog;
use super::ledger::Ledger;
use super::rules::{evaluate_rule, standard_rules, Category, Direction, Rule, RuleId, ValueUnit};
use super::scorecard::Scorecard;
use super::thresholds::{Band, ThresholdTable};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Raised when a rule library is assembled inconsistently. The service
/// refuses to start rather than score with a broken library.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrityError {
    #[error("rule '{0}' is registered more than once")]
    DuplicateRule(RuleId),
    #[error("rule '{rule}' requires unknown metric '{metric}'")]
    UnknownMetric { rule: RuleId, metric: &'static str },
    #[error("rule '{0}' declares no required metrics")]
    NoRequirements(RuleId),
    #[error("threshold table {version} has no band for rule '{rule}'")]
    MissingBand { rule: RuleId, version: String },
    #[error("band for rule '{rule}' is invalid: {reason}")]
    InvalidBand { rule: RuleId, reason: String },
}

/// Validated rules paired with their bands, in category order.
pub struct RuleLibrary {
    entries: Vec<(Box<dyn Rule>, Band)>,
    table_version: String,
}

impl RuleLibrary {
    pub fn new(rules: Vec<Box<dyn Rule>>, table: &ThresholdTable) -> Result<Self, IntegrityError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(rules.len());

        for rule in rules {
            let meta = *rule.meta();
            if !seen.insert(meta.id) {
                return Err(IntegrityError::DuplicateRule(meta.id));
            }
            if meta.required_metrics.is_empty() {
                return Err(IntegrityError::NoRequirements(meta.id));
            }
            if let Some(metric) = meta
                .required_metrics
                .iter()
                .copied()
                .find(|name| !catalog::is_known(name))
            {
                return Err(IntegrityError::UnknownMetric {
                    rule: meta.id,
                    metric,
                });
            }

            let band = table
                .band(meta.id)
                .ok_or_else(|| IntegrityError::MissingBand {
                    rule: meta.id,
                    version: table.version().to_string(),
                })?;
            validate_band(meta.id, meta.direction, band)?;

            entries.push((rule, band));
        }

        // Stable: declaration order is kept within a category.
        entries.sort_by_key(|(rule, _)| rule.meta().category);

        Ok(Self {
            entries,
            table_version: table.version().to_string(),
        })
    }

    /// The eighteen built-in rules against the supplied table.
    pub fn with_table(table: &ThresholdTable) -> Result<Self, IntegrityError> {
        Self::new(standard_rules(), table)
    }

    pub fn standard() -> Result<Self, IntegrityError> {
        Self::with_table(&ThresholdTable::standard())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn table_version(&self) -> &str {
        &self.table_version
    }

    pub fn describe(&self) -> Vec<RuleDescriptor> {
        self.entries
            .iter()
            .map(|(rule, band)| {
                let meta = rule.meta();
                RuleDescriptor {
                    id: meta.id,
                    name: meta.name,
                    category: meta.category,
                    direction: meta.direction,
                    unit: meta.unit,
                    required_metrics: meta.required_metrics.to_vec(),
                    formula: meta.formula,
                    band: *band,
                }
            })
            .collect()
    }
}

fn validate_band(rule: RuleId, direction: Direction, band: Band) -> Result<(), IntegrityError> {
    if !band.ok.is_finite() || !band.watch.is_finite() {
        return Err(IntegrityError::InvalidBand {
            rule,
            reason: "cut points must be finite".to_string(),
        });
    }
    if !direction.accepts(band) {
        return Err(IntegrityError::InvalidBand {
            rule,
            reason: format!(
                "ok {} and watch {} are inverted for a {:?} rule",
                band.ok, band.watch, direction
            ),
        });
    }
    Ok(())
}

/// Public description of a rule for dashboards and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleDescriptor {
    pub id: RuleId,
    pub name: &'static str,
    pub category: Category,
    pub direction: Direction,
    pub unit: ValueUnit,
    pub required_metrics: Vec<&'static str>,
    pub formula: &'static str,
    pub band: Band,
}

/// Stateless evaluator that applies the rule library to a ledger.
#[derive(Clone)]
pub struct Evaluator {
    library: Arc<RuleLibrary>,
}

impl Evaluator {
    pub fn new(library: RuleLibrary) -> Self {
        Self {
            library: Arc::new(library),
        }
    }

    pub fn library(&self) -> &RuleLibrary {
        &self.library
    }

    /// One verdict per rule, in library order. Reads the ledger only.
    pub fn evaluate(&self, ledger: &Ledger) -> Scorecard {
        let verdicts = self
            .library
            .entries
            .iter()
            .map(|(rule, band)| {
                let verdict = evaluate_rule(rule.as_ref(), *band, ledger);
                debug!(
                    ticker = ledger.ticker(),
                    rule = %verdict.rule_id,
                    status = verdict.status.label(),
                    "rule evaluated"
                );
                verdict
            })
            .collect();

        Scorecard::from_verdicts(verdicts)
    }
}
