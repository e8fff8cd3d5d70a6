use super::{Category, Direction, FormulaRule, Rule, RuleId, RuleMeta, ValueUnit};
use crate::scoring::catalog::*;
use crate::scoring::derive::{self, Undefined};

const DIVIDEND_YIELD_RULE: RuleMeta = RuleMeta {
    id: RuleId::DividendYield,
    name: "Dividend Yield",
    category: Category::ShareholderReturns,
    direction: Direction::HigherIsBetter,
    unit: ValueUnit::Percent,
    required_metrics: &[DIVIDEND_YIELD],
    formula: "Annual Dividends per Share / Share Price",
};

const DIVIDEND_PERSISTENCE: RuleMeta = RuleMeta {
    id: RuleId::DividendPersistence,
    name: "Dividend Persistence",
    category: Category::ShareholderReturns,
    direction: Direction::HigherIsBetter,
    unit: ValueUnit::Years,
    required_metrics: &[DIVIDEND_PAYING_YEARS],
    formula: "Years with Dividends Paid",
};

const PAYOUT_RATIO: RuleMeta = RuleMeta {
    id: RuleId::PayoutRatio,
    name: "Payout Ratio",
    category: Category::ShareholderReturns,
    direction: Direction::LowerIsBetter,
    unit: ValueUnit::Percent,
    required_metrics: &[DIVIDEND_PER_SHARE, TRAILING_EPS],
    formula: "Dividends per Share / Trailing EPS",
};

const BUYBACK_YIELD: RuleMeta = RuleMeta {
    id: RuleId::BuybackYield,
    name: "Buyback Yield",
    category: Category::ShareholderReturns,
    direction: Direction::HigherIsBetter,
    unit: ValueUnit::Percent,
    required_metrics: &[SHARE_REPURCHASES, MARKET_CAP],
    formula: "Share Repurchases / Market Capitalization",
};

pub(super) fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FormulaRule::new(DIVIDEND_YIELD_RULE, |ledger| {
            ledger
                .value(DIVIDEND_YIELD)
                .ok_or_else(|| Undefined::Missing(vec![DIVIDEND_YIELD]))
        })),
        Box::new(FormulaRule::new(DIVIDEND_PERSISTENCE, |ledger| {
            ledger
                .value(DIVIDEND_PAYING_YEARS)
                .ok_or_else(|| Undefined::Missing(vec![DIVIDEND_PAYING_YEARS]))
        })),
        Box::new(FormulaRule::new(PAYOUT_RATIO, |ledger| {
            derive::ratio(ledger, DIVIDEND_PER_SHARE, TRAILING_EPS)
        })),
        Box::new(FormulaRule::new(BUYBACK_YIELD, |ledger| {
            derive::market_cap_yield(ledger, SHARE_REPURCHASES)
        })),
    ]
}
