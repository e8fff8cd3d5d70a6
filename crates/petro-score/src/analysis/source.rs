use super::estimates::{self, EstimateAssumptions};
use super::importer::{LedgerExtract, LedgerImportError, LedgerImporter};
use crate::scoring::Ledger;
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolves a ticker to a completed ledger. Implementations own all I/O so
/// the evaluator stays pure.
pub trait LedgerSource: Send + Sync {
    fn build_ledger(&self, ticker: &str) -> Result<Ledger, LedgerBuildError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerBuildError {
    #[error("ticker not found: {0}")]
    TickerNotFound(String),
    #[error("invalid ticker symbol: '{0}'")]
    InvalidTicker(String),
    #[error("{ticker} rejected: industry '{industry}' is not oil & gas")]
    IndustryRejected { ticker: String, industry: String },
    #[error("ledger for {ticker} could not be loaded: {source}")]
    Import {
        ticker: String,
        #[source]
        source: LedgerImportError,
    },
}

/// Upper-cases a symbol and rejects anything that is not a plausible listing.
pub fn normalize_ticker(raw: &str) -> Result<String, LedgerBuildError> {
    let ticker = raw.trim().to_ascii_uppercase();
    let valid = (1..=10).contains(&ticker.len())
        && ticker
            .chars()
            .next()
            .is_some_and(|first| first.is_ascii_alphanumeric())
        && ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');

    if valid {
        Ok(ticker)
    } else {
        Err(LedgerBuildError::InvalidTicker(raw.to_string()))
    }
}

/// Keywords that place a declared industry in the oil & gas universe.
const OIL_AND_GAS_KEYWORDS: [&str; 4] = ["oil", "gas", "energy", "petroleum"];

/// Whether a declared industry falls inside the oil & gas universe.
pub fn is_oil_and_gas(industry: &str) -> bool {
    let industry = industry.to_ascii_lowercase();
    OIL_AND_GAS_KEYWORDS
        .iter()
        .any(|keyword| industry.contains(keyword))
}

/// Reads `<root>/<TICKER>.csv` extracts and runs the estimation pass.
#[derive(Debug, Clone)]
pub struct DirectoryLedgerSource {
    root: PathBuf,
    assumptions: EstimateAssumptions,
}

impl DirectoryLedgerSource {
    pub fn new(root: impl Into<PathBuf>, assumptions: EstimateAssumptions) -> Self {
        Self {
            root: root.into(),
            assumptions,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Tickers with an extract on disk, sorted.
    pub fn tickers(&self) -> std::io::Result<Vec<String>> {
        let mut tickers: Vec<String> = std::fs::read_dir(&self.root)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "csv"))
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .collect();
        tickers.sort();
        Ok(tickers)
    }
}

impl LedgerSource for DirectoryLedgerSource {
    fn build_ledger(&self, ticker: &str) -> Result<Ledger, LedgerBuildError> {
        let ticker = normalize_ticker(ticker)?;
        let path = self.root.join(format!("{ticker}.csv"));
        if !path.is_file() {
            return Err(LedgerBuildError::TickerNotFound(ticker));
        }

        let LedgerExtract { industry, metrics } =
            LedgerImporter::from_path(&path).map_err(|source| LedgerBuildError::Import {
                ticker: ticker.clone(),
                source,
            })?;
        if let Some(industry) = industry.filter(|industry| !is_oil_and_gas(industry)) {
            return Err(LedgerBuildError::IndustryRejected { ticker, industry });
        }
        let ledger = estimates::complete(Ledger::new(ticker, metrics), &self.assumptions);

        info!(
            ticker = ledger.ticker(),
            path = %path.display(),
            present = ledger.count_by_quality(crate::scoring::MetricQuality::Present),
            estimated = ledger.count_by_quality(crate::scoring::MetricQuality::Estimated),
            "ledger built"
        );
        Ok(ledger)
    }
}
