//! Fills cash costs, ROIC and WACC from their components when a ledger
//! lacks them. Supplied figures are never overridden.

use crate::scoring::catalog::*;
use crate::scoring::{Evidence, Ledger, Metric};
use tracing::debug;

/// Capital-market assumptions behind the ROIC and WACC estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateAssumptions {
    pub tax_rate: f64,
    pub cost_of_equity: f64,
    pub default_cost_of_debt: f64,
}

impl Default for EstimateAssumptions {
    fn default() -> Self {
        Self {
            tax_rate: 0.21,
            cost_of_equity: 0.10,
            default_cost_of_debt: 0.05,
        }
    }
}

/// LOE + production taxes + GP&T.
pub fn cash_operating_costs(ledger: &Ledger) -> Option<f64> {
    Some(
        ledger.value(LEASE_OPERATING_EXPENSE)?
            + ledger.value(PRODUCTION_TAXES)?
            + ledger.value(GATHERING_TRANSPORT_EXPENSE)?,
    )
}

/// After-tax operating income over equity plus net debt.
pub fn roic(ledger: &Ledger, assumptions: &EstimateAssumptions) -> Option<f64> {
    let operating_income = ledger.value(OPERATING_INCOME)?;
    let invested_capital =
        ledger.value(TOTAL_EQUITY)? + ledger.value(TOTAL_DEBT)? - ledger.value(CASH)?;
    if invested_capital <= 0.0 {
        return None;
    }
    Some(operating_income * (1.0 - assumptions.tax_rate) / invested_capital)
}

/// Market-value weighted cost of equity and after-tax cost of debt. The cost
/// of debt is implied from interest expense when both figures exist.
pub fn wacc(ledger: &Ledger, assumptions: &EstimateAssumptions) -> Option<f64> {
    let equity = ledger.value(MARKET_CAP)?;
    let debt = ledger.value(TOTAL_DEBT)?;
    let firm_value = equity + debt;
    if equity < 0.0 || debt < 0.0 || firm_value <= 0.0 {
        return None;
    }

    let cost_of_debt = match ledger.value(INTEREST_EXPENSE) {
        Some(interest) if debt > 0.0 && interest >= 0.0 => interest / debt,
        _ => assumptions.default_cost_of_debt,
    };

    Some(
        equity / firm_value * assumptions.cost_of_equity
            + debt / firm_value * cost_of_debt * (1.0 - assumptions.tax_rate),
    )
}

/// Returns the ledger with any derivable gaps filled as estimated metrics.
pub fn complete(ledger: Ledger, assumptions: &EstimateAssumptions) -> Ledger {
    let candidates = [
        (
            CASH_OPERATING_COSTS,
            cash_operating_costs(&ledger),
            "lease_operating_expense + production_taxes + gathering_transport_expense".to_string(),
        ),
        (
            ROIC,
            roic(&ledger, assumptions),
            format!(
                "operating_income x (1 - {}) / (total_equity + total_debt - cash)",
                assumptions.tax_rate
            ),
        ),
        (
            WACC,
            wacc(&ledger, assumptions),
            format!(
                "E/V x {} + D/V x cost of debt x (1 - {})",
                assumptions.cost_of_equity, assumptions.tax_rate
            ),
        ),
    ];

    let additions: Vec<Metric> = candidates
        .into_iter()
        .filter(|(name, _, _)| ledger.value(name).is_none())
        .filter_map(|(name, value, formula)| {
            let metric = Metric::estimated(name, value?).ok()?;
            debug!(ticker = ledger.ticker(), metric = name, "estimated missing metric");
            Some(metric.with_evidence(Evidence::new(
                format!("{name} estimated as {formula}"),
                "estimate",
            )))
        })
        .collect();

    if additions.is_empty() {
        return ledger;
    }

    let ticker = ledger.ticker().to_string();
    Ledger::new(ticker, ledger.into_metrics().chain(additions))
}
