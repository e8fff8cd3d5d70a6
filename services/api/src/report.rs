use crate::cli::ScoringArgs;
use crate::infra::{apply_overrides, build_evaluator, build_service};
use clap::Args;
use petro_score::analysis::{AnalysisReport, RuleCatalogView};
use petro_score::config::AppConfig;
use petro_score::error::AppError;
use petro_score::telemetry;
use petro_score::scoring::{Category, MetricQuality, RuleDescriptor, RuleId, Status};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Ticker symbol to score (case-insensitive)
    pub(crate) ticker: String,
    #[command(flatten)]
    pub(crate) scoring: ScoringArgs,
    /// Print the full report as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RulesArgs {
    /// JSON threshold table replacing the built-in bands
    #[arg(long)]
    pub(crate) thresholds: Option<PathBuf>,
    /// Print the rule catalog as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        ticker,
        scoring,
        json,
    } = args;

    let config = apply_overrides(cli_config()?.scoring, scoring);
    let service = build_service(&config)?;
    let report = service.analyze(&ticker)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report, &service.rules()));
    }
    Ok(())
}

pub(crate) fn run_rules(args: RulesArgs) -> Result<(), AppError> {
    let RulesArgs { thresholds, json } = args;

    let config = apply_overrides(
        cli_config()?.scoring,
        ScoringArgs {
            ledger_dir: None,
            thresholds,
        },
    );
    let evaluator = build_evaluator(&config)?;
    let library = evaluator.library();
    let catalog = RuleCatalogView {
        table_version: library.table_version().to_string(),
        rules: library.describe(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        print!("{}", render_catalog(&catalog));
    }
    Ok(())
}

/// Loads configuration and routes logs to stderr, leaving stdout to the report.
fn cli_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

pub(crate) fn render_report(report: &AnalysisReport, catalog: &RuleCatalogView) -> String {
    let descriptors: HashMap<RuleId, &RuleDescriptor> =
        catalog.rules.iter().map(|rule| (rule.id, rule)).collect();
    let mut out = String::new();

    let _ = writeln!(out, "{}", report.summary);
    let _ = writeln!(
        out,
        "Thresholds {} | {} OK / {} WATCH / {} RED / {} NA",
        catalog.table_version,
        report.count(Status::Ok),
        report.count(Status::Watch),
        report.count(Status::Red),
        report.count(Status::Na)
    );

    for category in Category::ordered() {
        let verdicts: Vec<_> = report
            .scorecard
            .iter()
            .filter(|verdict| verdict.category == category)
            .collect();
        if verdicts.is_empty() {
            continue;
        }

        let _ = writeln!(out, "\n{}", category.label());
        for verdict in verdicts {
            let value = match (verdict.value, descriptors.get(&verdict.rule_id)) {
                (Some(value), Some(descriptor)) => descriptor.unit.format(value),
                (Some(value), None) => format!("{value:.4}"),
                (None, _) => "-".to_string(),
            };
            let _ = writeln!(
                out,
                "  [{:<5}] {:<28} {:>12}  {}",
                verdict.status.label(),
                verdict.check_name,
                value,
                verdict.interpretation
            );
        }
    }

    if !report.red_flags.is_empty() {
        let _ = writeln!(out, "\nRed flags: {}", report.red_flags.join(", "));
    }

    let _ = writeln!(
        out,
        "\nLedger: {} present, {} estimated, {} missing",
        report.ledger.count_by_quality(MetricQuality::Present),
        report.ledger.count_by_quality(MetricQuality::Estimated),
        report.ledger.count_by_quality(MetricQuality::Missing)
    );
    out
}

pub(crate) fn render_catalog(catalog: &RuleCatalogView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} rules | thresholds {}",
        catalog.rules.len(),
        catalog.table_version
    );

    for rule in &catalog.rules {
        let _ = writeln!(
            out,
            "- {} ({}): OK at {}, WATCH to {}",
            rule.name,
            rule.category.label(),
            rule.unit.format(rule.band.ok),
            rule.unit.format(rule.band.watch)
        );
        let _ = writeln!(out, "    {}", rule.formula);
    }
    out
}
