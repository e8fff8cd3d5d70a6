use super::{Category, Direction, FormulaRule, Rule, RuleId, RuleMeta, ValueUnit};
use crate::scoring::catalog::*;
use crate::scoring::derive;

const REINVESTMENT_RATE: RuleMeta = RuleMeta {
    id: RuleId::ReinvestmentRate,
    name: "Reinvestment Rate",
    category: Category::CapitalDiscipline,
    direction: Direction::LowerIsBetter,
    unit: ValueUnit::Percent,
    required_metrics: &[CAPEX, OPERATING_CASH_FLOW],
    formula: "Capital Expenditures / Operating Cash Flow",
};

const CAPEX_PER_BOE: RuleMeta = RuleMeta {
    id: RuleId::CapexPerBoe,
    name: "Capex per BOE",
    category: Category::CapitalDiscipline,
    direction: Direction::LowerIsBetter,
    unit: ValueUnit::UsdPerBoe,
    required_metrics: &[CAPEX, TOTAL_PRODUCTION_BOE],
    formula: "Capital Expenditures / Total Production (BOE)",
};

const RESERVE_REPLACEMENT_RATIO: RuleMeta = RuleMeta {
    id: RuleId::ReserveReplacementRatio,
    name: "Reserve Replacement Ratio",
    category: Category::CapitalDiscipline,
    direction: Direction::HigherIsBetter,
    unit: ValueUnit::Percent,
    required_metrics: &[RESERVES_ADDED_BOE, TOTAL_PRODUCTION_BOE],
    formula: "Reserves Added (BOE) / Total Production (BOE)",
};

const PRODUCTION_EFFICIENCY: RuleMeta = RuleMeta {
    id: RuleId::ProductionEfficiency,
    name: "Production Efficiency",
    category: Category::CapitalDiscipline,
    direction: Direction::HigherIsBetter,
    unit: ValueUnit::Percent,
    required_metrics: &[TOTAL_PRODUCTION_BOE, PRODUCTION_CAPACITY_BOE],
    formula: "Total Production (BOE) / Production Capacity (BOE)",
};

const NET_DEBT_TO_EBITDA: RuleMeta = RuleMeta {
    id: RuleId::NetDebtToEbitda,
    name: "Net Debt / EBITDA",
    category: Category::CapitalDiscipline,
    direction: Direction::LowerIsBetter,
    unit: ValueUnit::Multiple,
    required_metrics: &[TOTAL_DEBT, CASH, EBITDA],
    formula: "(Total Debt - Cash) / EBITDA",
};

pub(super) fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FormulaRule::new(REINVESTMENT_RATE, |ledger| {
            derive::ratio(ledger, CAPEX, OPERATING_CASH_FLOW)
        })),
        Box::new(FormulaRule::new(CAPEX_PER_BOE, |ledger| {
            derive::per_boe(ledger, CAPEX)
        })),
        Box::new(FormulaRule::new(RESERVE_REPLACEMENT_RATIO, |ledger| {
            derive::per_boe(ledger, RESERVES_ADDED_BOE)
        })),
        Box::new(FormulaRule::new(PRODUCTION_EFFICIENCY, |ledger| {
            derive::ratio(ledger, TOTAL_PRODUCTION_BOE, PRODUCTION_CAPACITY_BOE)
        })),
        Box::new(FormulaRule::new(
            NET_DEBT_TO_EBITDA,
            derive::net_debt_to_ebitda,
        )),
    ]
}
