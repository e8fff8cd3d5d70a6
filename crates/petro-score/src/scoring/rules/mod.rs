//! Declarative health checks and the single procedure that turns a rule and
//! its band into a verdict.

mod capital;
mod cost;
mod profitability;
mod returns;
mod valuation;

use super::derive::{Derived, Undefined};
use super::ledger::{Ledger, MetricQuality};
use super::thresholds::Band;
use super::verdict::{Status, Verdict};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use profitability::{CashNetbackMarginRule, RoicSpreadRule};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Cost,
    Profitability,
    CapitalDiscipline,
    ShareholderReturns,
    Valuation,
}

impl Category {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Cost,
            Self::Profitability,
            Self::CapitalDiscipline,
            Self::ShareholderReturns,
            Self::Valuation,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cost => "Cost",
            Self::Profitability => "Profitability",
            Self::CapitalDiscipline => "Capital Discipline",
            Self::ShareholderReturns => "Shareholder Returns",
            Self::Valuation => "Valuation",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    LoePerBoe,
    GptPerBoe,
    GnaPerBoe,
    CashNetbackMargin,
    EbitdaMargin,
    RoicMinusWacc,
    RecycleRatio,
    ReinvestmentRate,
    CapexPerBoe,
    ReserveReplacementRatio,
    ProductionEfficiency,
    NetDebtToEbitda,
    DividendYield,
    DividendPersistence,
    PayoutRatio,
    BuybackYield,
    FcfYield,
    NapkinValueUpside,
}

impl RuleId {
    pub const fn ordered() -> [Self; 18] {
        [
            Self::LoePerBoe,
            Self::GptPerBoe,
            Self::GnaPerBoe,
            Self::CashNetbackMargin,
            Self::EbitdaMargin,
            Self::RoicMinusWacc,
            Self::RecycleRatio,
            Self::ReinvestmentRate,
            Self::CapexPerBoe,
            Self::ReserveReplacementRatio,
            Self::ProductionEfficiency,
            Self::NetDebtToEbitda,
            Self::DividendYield,
            Self::DividendPersistence,
            Self::PayoutRatio,
            Self::BuybackYield,
            Self::FcfYield,
            Self::NapkinValueUpside,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoePerBoe => "loe_per_boe",
            Self::GptPerBoe => "gpt_per_boe",
            Self::GnaPerBoe => "gna_per_boe",
            Self::CashNetbackMargin => "cash_netback_margin",
            Self::EbitdaMargin => "ebitda_margin",
            Self::RoicMinusWacc => "roic_minus_wacc",
            Self::RecycleRatio => "recycle_ratio",
            Self::ReinvestmentRate => "reinvestment_rate",
            Self::CapexPerBoe => "capex_per_boe",
            Self::ReserveReplacementRatio => "reserve_replacement_ratio",
            Self::ProductionEfficiency => "production_efficiency",
            Self::NetDebtToEbitda => "net_debt_to_ebitda",
            Self::DividendYield => "dividend_yield",
            Self::DividendPersistence => "dividend_persistence",
            Self::PayoutRatio => "payout_ratio",
            Self::BuybackYield => "buyback_yield",
            Self::FcfYield => "fcf_yield",
            Self::NapkinValueUpside => "napkin_value_upside",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

impl Direction {
    /// Cut points resolve to the favourable side.
    pub fn classify(self, value: f64, band: Band) -> Status {
        match self {
            Self::HigherIsBetter if value >= band.ok => Status::Ok,
            Self::HigherIsBetter if value >= band.watch => Status::Watch,
            Self::LowerIsBetter if value <= band.ok => Status::Ok,
            Self::LowerIsBetter if value <= band.watch => Status::Watch,
            _ => Status::Red,
        }
    }

    /// Whether `band` orders its cut points consistently with this direction.
    pub fn accepts(self, band: Band) -> bool {
        match self {
            Self::HigherIsBetter => band.ok >= band.watch,
            Self::LowerIsBetter => band.ok <= band.watch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueUnit {
    UsdPerBoe,
    Percent,
    Multiple,
    Years,
}

impl ValueUnit {
    pub fn format(self, value: f64) -> String {
        match self {
            Self::UsdPerBoe => format!("${value:.2}/BOE"),
            Self::Percent => format!("{:.1}%", value * 100.0),
            Self::Multiple => format!("{value:.2}x"),
            Self::Years => format!("{value:.0} years"),
        }
    }
}

/// Static description of a rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleMeta {
    pub id: RuleId,
    pub name: &'static str,
    pub category: Category,
    pub direction: Direction,
    pub unit: ValueUnit,
    pub required_metrics: &'static [&'static str],
    pub formula: &'static str,
}

/// A classified value handed to [`Rule::interpret`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub status: Status,
    pub band: Band,
}

/// A single health check. Implementors only compute a scalar; missing
/// inputs, degenerate arithmetic and classification are handled by
/// [`evaluate_rule`] for every rule alike.
pub trait Rule: Send + Sync {
    fn meta(&self) -> &RuleMeta;

    fn compute(&self, ledger: &Ledger) -> Derived;

    fn interpret(&self, _ledger: &Ledger, reading: &Reading) -> String {
        standard_interpretation(self.meta(), reading)
    }
}

/// Rule whose value is a plain function of the ledger.
pub struct FormulaRule {
    meta: RuleMeta,
    compute: fn(&Ledger) -> Derived,
}

impl FormulaRule {
    pub fn new(meta: RuleMeta, compute: fn(&Ledger) -> Derived) -> Self {
        Self { meta, compute }
    }
}

impl Rule for FormulaRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn compute(&self, ledger: &Ledger) -> Derived {
        (self.compute)(ledger)
    }
}

pub fn standard_interpretation(meta: &RuleMeta, reading: &Reading) -> String {
    let value = meta.unit.format(reading.value);
    let ok = meta.unit.format(reading.band.ok);
    let watch = meta.unit.format(reading.band.watch);
    let name = meta.name;

    match (meta.direction, reading.status) {
        (Direction::LowerIsBetter, Status::Ok) => {
            format!("{name} of {value} is within the {ok} target")
        }
        (Direction::LowerIsBetter, Status::Watch) => {
            format!("{name} of {value} is above the {ok} target but within the {watch} limit")
        }
        (Direction::LowerIsBetter, _) => {
            format!("{name} of {value} exceeds the {watch} limit")
        }
        (Direction::HigherIsBetter, Status::Ok) => {
            format!("{name} of {value} meets the {ok} target")
        }
        (Direction::HigherIsBetter, Status::Watch) => {
            format!("{name} of {value} is short of the {ok} target but clears the {watch} floor")
        }
        (Direction::HigherIsBetter, _) => {
            format!("{name} of {value} is below the {watch} floor")
        }
    }
}

/// Runs one rule against a ledger.
pub fn evaluate_rule(rule: &dyn Rule, band: Band, ledger: &Ledger) -> Verdict {
    let meta = rule.meta();
    let evidence = ledger.evidence_for(meta.required_metrics);
    let missing = ledger.missing_of(meta.required_metrics);

    let outcome = if missing.is_empty() {
        rule.compute(ledger).and_then(|value| {
            if value.is_finite() {
                Ok(value)
            } else {
                Err(Undefined::Degenerate(
                    "result is not finite".to_string(),
                ))
            }
        })
    } else {
        Err(Undefined::Missing(missing))
    };

    let (value, status, interpretation) = match outcome {
        Ok(value) => {
            let status = meta.direction.classify(value, band);
            let reading = Reading {
                value,
                status,
                band,
            };
            let mut interpretation = rule.interpret(ledger, &reading);
            let estimated = estimated_inputs(ledger, meta.required_metrics);
            if !estimated.is_empty() {
                interpretation.push_str(&format!(" (estimated: {})", estimated.join(", ")));
            }
            (Some(value), status, interpretation)
        }
        Err(undefined) => (
            None,
            Status::Na,
            format!("{} not computed: {undefined}", meta.name),
        ),
    };

    Verdict {
        rule_id: meta.id,
        check_name: meta.name.to_string(),
        category: meta.category,
        value,
        status,
        interpretation,
        formula: meta.formula.to_string(),
        evidence,
    }
}

fn estimated_inputs<'a>(ledger: &Ledger, names: &[&'a str]) -> Vec<&'a str> {
    names
        .iter()
        .copied()
        .filter(|name| {
            ledger
                .get(name)
                .is_some_and(|metric| metric.quality() == MetricQuality::Estimated)
        })
        .collect()
}

/// The eighteen built-in checks in category order.
pub fn standard_rules() -> Vec<Box<dyn Rule>> {
    let mut rules = cost::rules();
    rules.extend(profitability::rules());
    rules.extend(capital::rules());
    rules.extend(returns::rules());
    rules.extend(valuation::rules());
    rules
}
