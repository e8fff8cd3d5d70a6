//! Shared derived quantities. Every rule that needs one of these figures
//! calls the same function, so two verdicts built on the same quantity agree
//! exactly.

use super::catalog::*;
use super::ledger::Ledger;
use std::fmt;

/// Free cash flow multiple used for the napkin valuation.
pub const NAPKIN_FCF_MULTIPLE: f64 = 8.0;

/// Why a derived figure could not be produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Undefined {
    /// Required metrics that are missing from the ledger.
    Missing(Vec<&'static str>),
    /// Inputs were present but the arithmetic is meaningless.
    Degenerate(String),
}

impl fmt::Display for Undefined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Undefined::Missing(names) => write!(f, "missing {}", names.join(", ")),
            Undefined::Degenerate(reason) => f.write_str(reason),
        }
    }
}

pub type Derived = Result<f64, Undefined>;

fn require(ledger: &Ledger, name: &'static str) -> Derived {
    ledger
        .value(name)
        .ok_or_else(|| Undefined::Missing(vec![name]))
}

/// Fetches several inputs at once so a verdict can name every gap.
fn require_all<const N: usize>(
    ledger: &Ledger,
    names: [&'static str; N],
) -> Result<[f64; N], Undefined> {
    let mut values = [0.0; N];
    let mut missing = Vec::new();
    for (slot, name) in values.iter_mut().zip(names) {
        match ledger.value(name) {
            Some(value) => *slot = value,
            None => missing.push(name),
        }
    }
    if missing.is_empty() {
        Ok(values)
    } else {
        Err(Undefined::Missing(missing))
    }
}

/// Divides, rejecting non-positive denominators and non-finite results.
pub fn divide(numerator: f64, denominator: f64, denominator_name: &str) -> Derived {
    if denominator <= 0.0 {
        return Err(Undefined::Degenerate(format!(
            "{denominator_name} is not positive ({denominator})"
        )));
    }
    finite(numerator / denominator)
}

fn finite(value: f64) -> Derived {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Undefined::Degenerate("result is not finite".to_string()))
    }
}

/// Ratio of two ledger metrics.
pub fn ratio(ledger: &Ledger, numerator: &'static str, denominator: &'static str) -> Derived {
    let [top, bottom] = require_all(ledger, [numerator, denominator])?;
    divide(top, bottom, denominator)
}

/// An expense normalized by annual production.
pub fn per_boe(ledger: &Ledger, metric: &'static str) -> Derived {
    ratio(ledger, metric, TOTAL_PRODUCTION_BOE)
}

/// Realized price less cash operating costs per BOE.
pub fn cash_netback_per_boe(ledger: &Ledger) -> Derived {
    let [price, _, _] = require_all(
        ledger,
        [
            REALIZED_PRICE_PER_BOE,
            CASH_OPERATING_COSTS,
            TOTAL_PRODUCTION_BOE,
        ],
    )?;
    let costs_per_boe = per_boe(ledger, CASH_OPERATING_COSTS)?;
    finite(price - costs_per_boe)
}

pub fn cash_netback_margin(ledger: &Ledger) -> Derived {
    let netback = cash_netback_per_boe(ledger)?;
    let price = require(ledger, REALIZED_PRICE_PER_BOE)?;
    divide(netback, price, REALIZED_PRICE_PER_BOE)
}

pub fn recycle_ratio(ledger: &Ledger) -> Derived {
    let netback = match cash_netback_per_boe(ledger) {
        Err(Undefined::Missing(mut names)) => {
            if ledger.value(FINDING_DEVELOPMENT_COST_PER_BOE).is_none() {
                names.push(FINDING_DEVELOPMENT_COST_PER_BOE);
            }
            return Err(Undefined::Missing(names));
        }
        other => other?,
    };
    let cost = require(ledger, FINDING_DEVELOPMENT_COST_PER_BOE)?;
    divide(netback, cost, FINDING_DEVELOPMENT_COST_PER_BOE)
}

pub fn ebitda_margin(ledger: &Ledger) -> Derived {
    ratio(ledger, EBITDA, REVENUE)
}

pub fn roic_minus_wacc(ledger: &Ledger) -> Derived {
    let [roic, wacc] = require_all(ledger, [ROIC, WACC])?;
    finite(roic - wacc)
}

/// Total debt less cash. Negative when the company holds net cash.
pub fn net_debt(ledger: &Ledger) -> Derived {
    let [debt, cash] = require_all(ledger, [TOTAL_DEBT, CASH])?;
    finite(debt - cash)
}

pub fn net_debt_to_ebitda(ledger: &Ledger) -> Derived {
    let [_, _, ebitda] = require_all(ledger, [TOTAL_DEBT, CASH, EBITDA])?;
    divide(net_debt(ledger)?, ebitda, EBITDA)
}

/// A cash amount as a fraction of equity market value.
pub fn market_cap_yield(ledger: &Ledger, metric: &'static str) -> Derived {
    ratio(ledger, metric, MARKET_CAP)
}

pub fn fcf_yield(ledger: &Ledger) -> Derived {
    market_cap_yield(ledger, FREE_CASH_FLOW)
}

/// `(FCF × multiple + cash − debt) / shares`.
pub fn napkin_value_per_share(ledger: &Ledger) -> Derived {
    let [fcf, _, _, shares] = require_all(
        ledger,
        [FREE_CASH_FLOW, TOTAL_DEBT, CASH, SHARES_OUTSTANDING],
    )?;
    let equity_value = fcf * NAPKIN_FCF_MULTIPLE - net_debt(ledger)?;
    divide(equity_value, shares, SHARES_OUTSTANDING)
}

pub fn napkin_value_upside(ledger: &Ledger) -> Derived {
    let [_, _, _, _, price] = require_all(
        ledger,
        [
            FREE_CASH_FLOW,
            TOTAL_DEBT,
            CASH,
            SHARES_OUTSTANDING,
            SHARE_PRICE,
        ],
    )?;
    let value = napkin_value_per_share(ledger)?;
    divide(value - price, price, SHARE_PRICE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ledger::Metric;

    fn ledger(values: &[(&'static str, f64)]) -> Ledger {
        Ledger::new(
            "TEST",
            values
                .iter()
                .map(|(name, value)| Metric::present(*name, *value).expect("finite")),
        )
    }

    #[test]
    fn per_boe_rejects_zero_production() {
        let ledger = ledger(&[
            (LEASE_OPERATING_EXPENSE, 1000.0),
            (TOTAL_PRODUCTION_BOE, 0.0),
        ]);
        let err = per_boe(&ledger, LEASE_OPERATING_EXPENSE).expect_err("zero production");
        assert_eq!(
            err,
            Undefined::Degenerate("total_production_boe is not positive (0)".to_string())
        );
    }

    #[test]
    fn missing_inputs_are_all_named() {
        let ledger = ledger(&[(SHARE_PRICE, 10.0)]);
        let err = napkin_value_upside(&ledger).expect_err("inputs missing");
        assert_eq!(
            err,
            Undefined::Missing(vec![FREE_CASH_FLOW, TOTAL_DEBT, CASH, SHARES_OUTSTANDING])
        );
    }

    #[test]
    fn recycle_ratio_names_netback_and_cost_gaps_together() {
        let ledger = ledger(&[(REALIZED_PRICE_PER_BOE, 60.0)]);
        let err = recycle_ratio(&ledger).expect_err("inputs missing");
        assert_eq!(
            err,
            Undefined::Missing(vec![
                CASH_OPERATING_COSTS,
                TOTAL_PRODUCTION_BOE,
                FINDING_DEVELOPMENT_COST_PER_BOE
            ])
        );
    }

    #[test]
    fn negative_numerators_are_valid() {
        let ledger = ledger(&[(FREE_CASH_FLOW, -50.0), (MARKET_CAP, 1000.0)]);
        assert_eq!(fcf_yield(&ledger), Ok(-0.05));
    }

    #[test]
    fn net_cash_gives_negative_leverage() {
        let ledger = ledger(&[(TOTAL_DEBT, 100.0), (CASH, 300.0), (EBITDA, 400.0)]);
        assert_eq!(net_debt_to_ebitda(&ledger), Ok(-0.5));
    }

    #[test]
    fn napkin_value_adds_net_cash() {
        let ledger = ledger(&[
            (FREE_CASH_FLOW, 15.0),
            (TOTAL_DEBT, 20.0),
            (CASH, 40.0),
            (SHARES_OUTSTANDING, 10.0),
            (SHARE_PRICE, 10.0),
        ]);
        assert_eq!(napkin_value_per_share(&ledger), Ok(14.0));
        assert_eq!(napkin_value_upside(&ledger), Ok(0.4));
    }
}
