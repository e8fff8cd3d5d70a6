//! Ticker resolution, ledger import and the HTTP surface around the
//! evaluator.

pub mod estimates;
pub mod importer;
pub mod router;
pub mod service;
pub mod source;

#[cfg(test)]
mod tests;

pub use estimates::EstimateAssumptions;
pub use importer::{LedgerExtract, LedgerImportError, LedgerImporter, INDUSTRY_ROW};
pub use router::analysis_router;
pub use service::{
    summary_line, AnalysisReport, AnalysisService, AnalysisServiceError, EvidenceEntry,
    RuleCatalogView,
};
pub use source::{
    is_oil_and_gas, normalize_ticker, DirectoryLedgerSource, LedgerBuildError, LedgerSource,
};
