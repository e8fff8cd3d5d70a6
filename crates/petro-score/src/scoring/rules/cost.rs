use super::{Category, Direction, FormulaRule, Rule, RuleId, RuleMeta, ValueUnit};
use crate::scoring::catalog::*;
use crate::scoring::derive;

const LOE_PER_BOE: RuleMeta = RuleMeta {
    id: RuleId::LoePerBoe,
    name: "LOE per BOE",
    category: Category::Cost,
    direction: Direction::LowerIsBetter,
    unit: ValueUnit::UsdPerBoe,
    required_metrics: &[LEASE_OPERATING_EXPENSE, TOTAL_PRODUCTION_BOE],
    formula: "Lease Operating Expense / Total Production (BOE)",
};

const GPT_PER_BOE: RuleMeta = RuleMeta {
    id: RuleId::GptPerBoe,
    name: "GP&T per BOE",
    category: Category::Cost,
    direction: Direction::LowerIsBetter,
    unit: ValueUnit::UsdPerBoe,
    required_metrics: &[GATHERING_TRANSPORT_EXPENSE, TOTAL_PRODUCTION_BOE],
    formula: "Gathering, Processing & Transportation Expense / Total Production (BOE)",
};

const GNA_PER_BOE: RuleMeta = RuleMeta {
    id: RuleId::GnaPerBoe,
    name: "G&A per BOE",
    category: Category::Cost,
    direction: Direction::LowerIsBetter,
    unit: ValueUnit::UsdPerBoe,
    required_metrics: &[GENERAL_ADMIN_EXPENSE, TOTAL_PRODUCTION_BOE],
    formula: "General & Administrative Expense / Total Production (BOE)",
};

pub(super) fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FormulaRule::new(LOE_PER_BOE, |ledger| {
            derive::per_boe(ledger, LEASE_OPERATING_EXPENSE)
        })),
        Box::new(FormulaRule::new(GPT_PER_BOE, |ledger| {
            derive::per_boe(ledger, GATHERING_TRANSPORT_EXPENSE)
        })),
        Box::new(FormulaRule::new(GNA_PER_BOE, |ledger| {
            derive::per_boe(ledger, GENERAL_ADMIN_EXPENSE)
        })),
    ]
}
