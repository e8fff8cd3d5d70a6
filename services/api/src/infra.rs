use crate::cli::ScoringArgs;
use metrics_exporter_prometheus::PrometheusHandle;
use petro_score::analysis::{AnalysisService, DirectoryLedgerSource};
use petro_score::config::ScoringConfig;
use petro_score::error::AppError;
use petro_score::scoring::{Evaluator, RuleLibrary, ThresholdTable};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Applies command-line overrides on top of the environment.
pub(crate) fn apply_overrides(mut config: ScoringConfig, args: ScoringArgs) -> ScoringConfig {
    if let Some(dir) = args.ledger_dir {
        config.ledger_dir = dir;
    }
    if let Some(path) = args.thresholds {
        config.thresholds_path = Some(path);
    }
    config
}

/// Loads the threshold table and validates the rule library against it.
/// Any inconsistency is fatal.
pub(crate) fn build_evaluator(config: &ScoringConfig) -> Result<Evaluator, AppError> {
    let table = match &config.thresholds_path {
        Some(path) => ThresholdTable::from_path(path)?,
        None => ThresholdTable::standard(),
    };
    let library = RuleLibrary::with_table(&table)?;

    info!(
        rules = library.len(),
        table_version = library.table_version(),
        "rule library validated"
    );
    Ok(Evaluator::new(library))
}

pub(crate) fn build_service(
    config: &ScoringConfig,
) -> Result<AnalysisService<DirectoryLedgerSource>, AppError> {
    let evaluator = build_evaluator(config)?;
    let source = DirectoryLedgerSource::new(config.ledger_dir.clone(), config.assumptions);
    Ok(AnalysisService::new(Arc::new(source), evaluator))
}
