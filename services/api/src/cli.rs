use crate::report::{run_analyze, run_rules, AnalyzeArgs, RulesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use petro_score::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Petro Score",
    about = "Score oil & gas equities against an explainable financial health checklist",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single ticker and print its scorecard
    Analyze(AnalyzeArgs),
    /// List the rule library with its threshold bands
    Rules(RulesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) scoring: ScoringArgs,
}

/// Overrides shared by every command that builds a rule library.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct ScoringArgs {
    /// Directory holding `<TICKER>.csv` ledger extracts
    #[arg(long)]
    pub(crate) ledger_dir: Option<PathBuf>,
    /// JSON threshold table replacing the built-in bands
    #[arg(long)]
    pub(crate) thresholds: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args),
        Command::Rules(args) => run_rules(args),
    }
}
