use super::{
    standard_interpretation, Category, Direction, FormulaRule, Reading, Rule, RuleId, RuleMeta,
    ValueUnit,
};
use crate::scoring::catalog::*;
use crate::scoring::derive::{self, Derived};
use crate::scoring::ledger::Ledger;

const CASH_NETBACK_MARGIN: RuleMeta = RuleMeta {
    id: RuleId::CashNetbackMargin,
    name: "Cash Netback Margin",
    category: Category::Profitability,
    direction: Direction::HigherIsBetter,
    unit: ValueUnit::Percent,
    required_metrics: &[
        REALIZED_PRICE_PER_BOE,
        CASH_OPERATING_COSTS,
        TOTAL_PRODUCTION_BOE,
    ],
    formula: "(Realized Price per BOE - Cash Operating Costs per BOE) / Realized Price per BOE",
};

const EBITDA_MARGIN: RuleMeta = RuleMeta {
    id: RuleId::EbitdaMargin,
    name: "EBITDA Margin",
    category: Category::Profitability,
    direction: Direction::HigherIsBetter,
    unit: ValueUnit::Percent,
    required_metrics: &[EBITDA, REVENUE],
    formula: "EBITDA / Revenue",
};

const ROIC_MINUS_WACC: RuleMeta = RuleMeta {
    id: RuleId::RoicMinusWacc,
    name: "ROIC vs WACC",
    category: Category::Profitability,
    direction: Direction::HigherIsBetter,
    unit: ValueUnit::Percent,
    required_metrics: &[ROIC, WACC],
    formula: "Return on Invested Capital - Weighted Average Cost of Capital",
};

const RECYCLE_RATIO: RuleMeta = RuleMeta {
    id: RuleId::RecycleRatio,
    name: "Recycle Ratio",
    category: Category::Profitability,
    direction: Direction::HigherIsBetter,
    unit: ValueUnit::Multiple,
    required_metrics: &[
        REALIZED_PRICE_PER_BOE,
        CASH_OPERATING_COSTS,
        TOTAL_PRODUCTION_BOE,
        FINDING_DEVELOPMENT_COST_PER_BOE,
    ],
    formula: "Cash Netback per BOE / Finding & Development Cost per BOE",
};

/// Margin check that also reports the per-barrel netback behind it.
pub struct CashNetbackMarginRule;

impl Rule for CashNetbackMarginRule {
    fn meta(&self) -> &RuleMeta {
        &CASH_NETBACK_MARGIN
    }

    fn compute(&self, ledger: &Ledger) -> Derived {
        derive::cash_netback_margin(ledger)
    }

    fn interpret(&self, ledger: &Ledger, reading: &Reading) -> String {
        let summary = standard_interpretation(self.meta(), reading);
        match (
            derive::cash_netback_per_boe(ledger),
            ledger.value(REALIZED_PRICE_PER_BOE),
        ) {
            (Ok(netback), Some(price)) => format!(
                "{summary}; netback {} on a {} realized price",
                ValueUnit::UsdPerBoe.format(netback),
                ValueUnit::UsdPerBoe.format(price)
            ),
            _ => summary,
        }
    }
}

/// Value creation spread, reported with both legs.
pub struct RoicSpreadRule;

impl Rule for RoicSpreadRule {
    fn meta(&self) -> &RuleMeta {
        &ROIC_MINUS_WACC
    }

    fn compute(&self, ledger: &Ledger) -> Derived {
        derive::roic_minus_wacc(ledger)
    }

    fn interpret(&self, ledger: &Ledger, reading: &Reading) -> String {
        let summary = standard_interpretation(self.meta(), reading);
        match (ledger.value(ROIC), ledger.value(WACC)) {
            (Some(roic), Some(wacc)) => format!(
                "{summary} (ROIC {}, WACC {})",
                ValueUnit::Percent.format(roic),
                ValueUnit::Percent.format(wacc)
            ),
            _ => summary,
        }
    }
}

pub(super) fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(CashNetbackMarginRule),
        Box::new(FormulaRule::new(EBITDA_MARGIN, derive::ebitda_margin)),
        Box::new(RoicSpreadRule),
        Box::new(FormulaRule::new(RECYCLE_RATIO, derive::recycle_ratio)),
    ]
}
