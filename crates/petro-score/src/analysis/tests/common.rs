use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::response::Response;
use serde_json::Value;

use crate::analysis::{normalize_ticker, AnalysisService, LedgerBuildError, LedgerSource};
use crate::scoring::catalog::*;
use crate::scoring::{Evaluator, Evidence, Ledger, Metric, RuleLibrary};

pub(super) fn xom_ledger() -> Ledger {
    let values = [
        (TOTAL_PRODUCTION_BOE, 1_400_000_000.0),
        (LEASE_OPERATING_EXPENSE, 12_600_000_000.0),
        (GATHERING_TRANSPORT_EXPENSE, 2_800_000_000.0),
        (GENERAL_ADMIN_EXPENSE, 3_500_000_000.0),
        (CASH_OPERATING_COSTS, 19_600_000_000.0),
        (REALIZED_PRICE_PER_BOE, 58.0),
        (REVENUE, 344_000_000_000.0),
        (EBITDA, 74_000_000_000.0),
        (ROIC, 0.13),
        (WACC, 0.085),
        (FINDING_DEVELOPMENT_COST_PER_BOE, 14.0),
        (CAPEX, 24_000_000_000.0),
        (OPERATING_CASH_FLOW, 55_000_000_000.0),
        (RESERVES_ADDED_BOE, 1_500_000_000.0),
        (PRODUCTION_CAPACITY_BOE, 1_550_000_000.0),
        (TOTAL_DEBT, 41_000_000_000.0),
        (CASH, 31_000_000_000.0),
        (FREE_CASH_FLOW, 31_000_000_000.0),
        (MARKET_CAP, 470_000_000_000.0),
        (SHARE_PRICE, 110.0),
        (SHARES_OUTSTANDING, 4_270_000_000.0),
        (DIVIDEND_PAYING_YEARS, 42.0),
        (TRAILING_EPS, 8.1),
        (DIVIDEND_YIELD, 0.035),
        (DIVIDEND_PER_SHARE, 3.84),
        (SHARE_REPURCHASES, 17_500_000_000.0),
    ];

    Ledger::new(
        "XOM",
        values.into_iter().map(|(name, value)| {
            Metric::present(name, value)
                .expect("finite fixture value")
                .with_evidence(Evidence::new(format!("{name}: {value}"), "10-K 2024"))
        }),
    )
}

/// In-memory source that counts lookups.
#[derive(Default)]
pub(super) struct MemoryLedgerSource {
    ledgers: HashMap<String, Ledger>,
    lookups: AtomicUsize,
}

impl MemoryLedgerSource {
    pub(super) fn with(ledgers: impl IntoIterator<Item = Ledger>) -> Self {
        Self {
            ledgers: ledgers
                .into_iter()
                .map(|ledger| (ledger.ticker().to_string(), ledger))
                .collect(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub(super) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl LedgerSource for MemoryLedgerSource {
    fn build_ledger(&self, ticker: &str) -> Result<Ledger, LedgerBuildError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let ticker = normalize_ticker(ticker)?;
        self.ledgers
            .get(&ticker)
            .cloned()
            .ok_or(LedgerBuildError::TickerNotFound(ticker))
    }
}

pub(super) fn build_service() -> (AnalysisService<MemoryLedgerSource>, Arc<MemoryLedgerSource>) {
    let source = Arc::new(MemoryLedgerSource::with([xom_ledger()]));
    let evaluator = Evaluator::new(RuleLibrary::standard().expect("standard library"));
    (AnalysisService::new(source.clone(), evaluator), source)
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

pub(super) fn empty_body() -> Body {
    Body::empty()
}
