use super::{Category, Direction, FormulaRule, Rule, RuleId, RuleMeta, ValueUnit};
use crate::scoring::catalog::*;
use crate::scoring::derive;

const FCF_YIELD: RuleMeta = RuleMeta {
    id: RuleId::FcfYield,
    name: "FCF Yield",
    category: Category::Valuation,
    direction: Direction::HigherIsBetter,
    unit: ValueUnit::Percent,
    required_metrics: &[FREE_CASH_FLOW, MARKET_CAP],
    formula: "Free Cash Flow / Market Capitalization",
};

const NAPKIN_VALUE_UPSIDE: RuleMeta = RuleMeta {
    id: RuleId::NapkinValueUpside,
    name: "Napkin Value Upside",
    category: Category::Valuation,
    direction: Direction::HigherIsBetter,
    unit: ValueUnit::Percent,
    required_metrics: &[
        FREE_CASH_FLOW,
        TOTAL_DEBT,
        CASH,
        SHARES_OUTSTANDING,
        SHARE_PRICE,
    ],
    formula: "((FCF x 8 + Cash - Total Debt) / Shares Outstanding - Share Price) / Share Price",
};

pub(super) fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FormulaRule::new(FCF_YIELD, derive::fcf_yield)),
        Box::new(FormulaRule::new(
            NAPKIN_VALUE_UPSIDE,
            derive::napkin_value_upside,
        )),
    ]
}
