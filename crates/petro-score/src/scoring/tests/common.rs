use std::collections::BTreeMap;

use crate::scoring::catalog::*;
use crate::scoring::{Evaluator, Evidence, Ledger, Metric, RuleId, RuleLibrary, Scorecard, Verdict};

/// A producer that clears every check.
pub(super) fn healthy_values() -> BTreeMap<&'static str, f64> {
    BTreeMap::from([
        (TOTAL_PRODUCTION_BOE, 50_000_000.0),
        (LEASE_OPERATING_EXPENSE, 300_000_000.0),
        (GATHERING_TRANSPORT_EXPENSE, 100_000_000.0),
        (GENERAL_ADMIN_EXPENSE, 100_000_000.0),
        (PRODUCTION_TAXES, 150_000_000.0),
        (CASH_OPERATING_COSTS, 550_000_000.0),
        (REALIZED_PRICE_PER_BOE, 55.0),
        (REVENUE, 2_750_000_000.0),
        (EBITDA, 1_650_000_000.0),
        (OPERATING_INCOME, 1_200_000_000.0),
        (TOTAL_EQUITY, 8_000_000_000.0),
        (INTEREST_EXPENSE, 75_000_000.0),
        (ROIC, 0.12),
        (WACC, 0.08),
        (FINDING_DEVELOPMENT_COST_PER_BOE, 12.0),
        (CAPEX, 600_000_000.0),
        (OPERATING_CASH_FLOW, 1_500_000_000.0),
        (RESERVES_ADDED_BOE, 60_000_000.0),
        (PRODUCTION_CAPACITY_BOE, 55_000_000.0),
        (TOTAL_DEBT, 1_500_000_000.0),
        (CASH, 500_000_000.0),
        (FREE_CASH_FLOW, 900_000_000.0),
        (MARKET_CAP, 4_000_000_000.0),
        (SHARE_PRICE, 20.0),
        (SHARES_OUTSTANDING, 200_000_000.0),
        (DIVIDEND_PAYING_YEARS, 25.0),
        (TRAILING_EPS, 5.0),
        (DIVIDEND_YIELD, 0.04),
        (DIVIDEND_PER_SHARE, 2.0),
        (SHARE_REPURCHASES, 300_000_000.0),
    ])
}

pub(super) fn ledger_from(values: &BTreeMap<&'static str, f64>) -> Ledger {
    Ledger::new(
        "PSX",
        values.iter().map(|(name, value)| {
            Metric::present(*name, *value)
                .expect("finite fixture value")
                .with_evidence(Evidence::new(
                    format!("{name} reported as {value}"),
                    "10-K 2024",
                ))
        }),
    )
}

pub(super) fn healthy_ledger() -> Ledger {
    ledger_from(&healthy_values())
}

pub(super) fn ledger_with(overrides: &[(&'static str, f64)]) -> Ledger {
    let mut values = healthy_values();
    values.extend(overrides.iter().copied());
    ledger_from(&values)
}

pub(super) fn ledger_without(removed: &[&str]) -> Ledger {
    let mut values = healthy_values();
    values.retain(|name, _| !removed.contains(name));
    ledger_from(&values)
}

pub(super) fn evaluator() -> Evaluator {
    Evaluator::new(RuleLibrary::standard().expect("standard library is consistent"))
}

pub(super) fn verdict(scorecard: &Scorecard, id: RuleId) -> &Verdict {
    scorecard
        .verdicts()
        .iter()
        .find(|verdict| verdict.rule_id == id)
        .expect("every rule yields a verdict")
}
