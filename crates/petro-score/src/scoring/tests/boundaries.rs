use super::common::*;
use crate::scoring::catalog::*;
use crate::scoring::{RuleId, Status};

type Inputs = &'static [(&'static str, f64)];

/// Inputs placing a rule exactly on its ok cut, exactly on its watch cut,
/// and just past the watch cut.
struct Cuts {
    rule: RuleId,
    at_ok: Inputs,
    at_watch: Inputs,
    past_watch: Inputs,
}

const CUTS: &[Cuts] = &[
    Cuts {
        rule: RuleId::LoePerBoe,
        at_ok: &[(LEASE_OPERATING_EXPENSE, 8_000.0), (TOTAL_PRODUCTION_BOE, 1_000.0)],
        at_watch: &[(LEASE_OPERATING_EXPENSE, 12_000.0), (TOTAL_PRODUCTION_BOE, 1_000.0)],
        past_watch: &[(LEASE_OPERATING_EXPENSE, 12_001.0), (TOTAL_PRODUCTION_BOE, 1_000.0)],
    },
    Cuts {
        rule: RuleId::GptPerBoe,
        at_ok: &[(GATHERING_TRANSPORT_EXPENSE, 2_500.0), (TOTAL_PRODUCTION_BOE, 1_000.0)],
        at_watch: &[(GATHERING_TRANSPORT_EXPENSE, 4_000.0), (TOTAL_PRODUCTION_BOE, 1_000.0)],
        past_watch: &[(GATHERING_TRANSPORT_EXPENSE, 4_001.0), (TOTAL_PRODUCTION_BOE, 1_000.0)],
    },
    Cuts {
        rule: RuleId::GnaPerBoe,
        at_ok: &[(GENERAL_ADMIN_EXPENSE, 3_000.0), (TOTAL_PRODUCTION_BOE, 1_000.0)],
        at_watch: &[(GENERAL_ADMIN_EXPENSE, 5_000.0), (TOTAL_PRODUCTION_BOE, 1_000.0)],
        past_watch: &[(GENERAL_ADMIN_EXPENSE, 5_001.0), (TOTAL_PRODUCTION_BOE, 1_000.0)],
    },
    Cuts {
        rule: RuleId::CashNetbackMargin,
        at_ok: &[
            (REALIZED_PRICE_PER_BOE, 40.0),
            (CASH_OPERATING_COSTS, 20_000.0),
            (TOTAL_PRODUCTION_BOE, 1_000.0),
        ],
        at_watch: &[
            (REALIZED_PRICE_PER_BOE, 50.0),
            (CASH_OPERATING_COSTS, 35_000.0),
            (TOTAL_PRODUCTION_BOE, 1_000.0),
        ],
        past_watch: &[
            (REALIZED_PRICE_PER_BOE, 50.0),
            (CASH_OPERATING_COSTS, 36_000.0),
            (TOTAL_PRODUCTION_BOE, 1_000.0),
        ],
    },
    Cuts {
        rule: RuleId::EbitdaMargin,
        at_ok: &[(EBITDA, 40.0), (REVENUE, 100.0)],
        at_watch: &[(EBITDA, 25.0), (REVENUE, 100.0)],
        past_watch: &[(EBITDA, 24.0), (REVENUE, 100.0)],
    },
    Cuts {
        rule: RuleId::RoicMinusWacc,
        at_ok: &[(ROIC, 0.08), (WACC, 0.08)],
        at_watch: &[(ROIC, -0.02), (WACC, 0.0)],
        past_watch: &[(ROIC, -0.03), (WACC, 0.0)],
    },
    Cuts {
        rule: RuleId::RecycleRatio,
        at_ok: &[
            (REALIZED_PRICE_PER_BOE, 40.0),
            (CASH_OPERATING_COSTS, 20_000.0),
            (TOTAL_PRODUCTION_BOE, 1_000.0),
            (FINDING_DEVELOPMENT_COST_PER_BOE, 10.0),
        ],
        at_watch: &[
            (REALIZED_PRICE_PER_BOE, 50.0),
            (CASH_OPERATING_COSTS, 35_000.0),
            (TOTAL_PRODUCTION_BOE, 1_000.0),
            (FINDING_DEVELOPMENT_COST_PER_BOE, 10.0),
        ],
        past_watch: &[
            (REALIZED_PRICE_PER_BOE, 50.0),
            (CASH_OPERATING_COSTS, 35_000.0),
            (TOTAL_PRODUCTION_BOE, 1_000.0),
            (FINDING_DEVELOPMENT_COST_PER_BOE, 11.0),
        ],
    },
    Cuts {
        rule: RuleId::ReinvestmentRate,
        at_ok: &[(CAPEX, 60.0), (OPERATING_CASH_FLOW, 100.0)],
        at_watch: &[(CAPEX, 80.0), (OPERATING_CASH_FLOW, 100.0)],
        past_watch: &[(CAPEX, 81.0), (OPERATING_CASH_FLOW, 100.0)],
    },
    Cuts {
        rule: RuleId::CapexPerBoe,
        at_ok: &[(CAPEX, 15_000.0), (TOTAL_PRODUCTION_BOE, 1_000.0)],
        at_watch: &[(CAPEX, 25_000.0), (TOTAL_PRODUCTION_BOE, 1_000.0)],
        past_watch: &[(CAPEX, 25_001.0), (TOTAL_PRODUCTION_BOE, 1_000.0)],
    },
    Cuts {
        rule: RuleId::ReserveReplacementRatio,
        at_ok: &[(RESERVES_ADDED_BOE, 1_000.0), (TOTAL_PRODUCTION_BOE, 1_000.0)],
        at_watch: &[(RESERVES_ADDED_BOE, 800.0), (TOTAL_PRODUCTION_BOE, 1_000.0)],
        past_watch: &[(RESERVES_ADDED_BOE, 799.0), (TOTAL_PRODUCTION_BOE, 1_000.0)],
    },
    Cuts {
        rule: RuleId::ProductionEfficiency,
        at_ok: &[(TOTAL_PRODUCTION_BOE, 850.0), (PRODUCTION_CAPACITY_BOE, 1_000.0)],
        at_watch: &[(TOTAL_PRODUCTION_BOE, 750.0), (PRODUCTION_CAPACITY_BOE, 1_000.0)],
        past_watch: &[(TOTAL_PRODUCTION_BOE, 749.0), (PRODUCTION_CAPACITY_BOE, 1_000.0)],
    },
    Cuts {
        rule: RuleId::NetDebtToEbitda,
        at_ok: &[(TOTAL_DEBT, 150.0), (CASH, 0.0), (EBITDA, 100.0)],
        at_watch: &[(TOTAL_DEBT, 250.0), (CASH, 0.0), (EBITDA, 100.0)],
        past_watch: &[(TOTAL_DEBT, 251.0), (CASH, 0.0), (EBITDA, 100.0)],
    },
    Cuts {
        rule: RuleId::DividendYield,
        at_ok: &[(DIVIDEND_YIELD, 0.03)],
        at_watch: &[(DIVIDEND_YIELD, 0.015)],
        past_watch: &[(DIVIDEND_YIELD, 0.0149)],
    },
    Cuts {
        rule: RuleId::DividendPersistence,
        at_ok: &[(DIVIDEND_PAYING_YEARS, 5.0)],
        at_watch: &[(DIVIDEND_PAYING_YEARS, 2.0)],
        past_watch: &[(DIVIDEND_PAYING_YEARS, 1.0)],
    },
    Cuts {
        rule: RuleId::PayoutRatio,
        at_ok: &[(DIVIDEND_PER_SHARE, 1.0), (TRAILING_EPS, 2.0)],
        at_watch: &[(DIVIDEND_PER_SHARE, 4.0), (TRAILING_EPS, 5.0)],
        past_watch: &[(DIVIDEND_PER_SHARE, 4.1), (TRAILING_EPS, 5.0)],
    },
    Cuts {
        rule: RuleId::BuybackYield,
        at_ok: &[(SHARE_REPURCHASES, 2.0), (MARKET_CAP, 100.0)],
        at_watch: &[(SHARE_REPURCHASES, 5.0), (MARKET_CAP, 1_000.0)],
        past_watch: &[(SHARE_REPURCHASES, 4.0), (MARKET_CAP, 1_000.0)],
    },
    Cuts {
        rule: RuleId::FcfYield,
        at_ok: &[(FREE_CASH_FLOW, 8.0), (MARKET_CAP, 100.0)],
        at_watch: &[(FREE_CASH_FLOW, 4.0), (MARKET_CAP, 100.0)],
        past_watch: &[(FREE_CASH_FLOW, 3.0), (MARKET_CAP, 100.0)],
    },
    Cuts {
        rule: RuleId::NapkinValueUpside,
        at_ok: &[
            (FREE_CASH_FLOW, 15.0),
            (CASH, 0.0),
            (TOTAL_DEBT, 0.0),
            (SHARES_OUTSTANDING, 10.0),
            (SHARE_PRICE, 10.0),
        ],
        at_watch: &[
            (FREE_CASH_FLOW, 15.0),
            (CASH, 0.0),
            (TOTAL_DEBT, 0.0),
            (SHARES_OUTSTANDING, 10.0),
            (SHARE_PRICE, 12.0),
        ],
        past_watch: &[
            (FREE_CASH_FLOW, 15.0),
            (CASH, 0.0),
            (TOTAL_DEBT, 0.0),
            (SHARES_OUTSTANDING, 10.0),
            (SHARE_PRICE, 13.0),
        ],
    },
];

fn status_for(rule: RuleId, inputs: Inputs) -> (Status, Option<f64>) {
    let scorecard = evaluator().evaluate(&ledger_with(inputs));
    let verdict = verdict(&scorecard, rule);
    (verdict.status, verdict.value)
}

#[test]
fn every_rule_has_cut_fixtures() {
    for id in RuleId::ordered() {
        assert!(
            CUTS.iter().any(|cuts| cuts.rule == id),
            "{id} has no cut fixtures"
        );
    }
}

#[test]
fn ok_cut_resolves_to_ok() {
    for cuts in CUTS {
        let (status, value) = status_for(cuts.rule, cuts.at_ok);
        assert_eq!(status, Status::Ok, "{} at ok cut ({value:?})", cuts.rule);
    }
}

#[test]
fn watch_cut_resolves_to_watch() {
    for cuts in CUTS {
        let (status, value) = status_for(cuts.rule, cuts.at_watch);
        assert_eq!(
            status,
            Status::Watch,
            "{} at watch cut ({value:?})",
            cuts.rule
        );
    }
}

#[test]
fn past_watch_cut_is_red() {
    for cuts in CUTS {
        let (status, value) = status_for(cuts.rule, cuts.past_watch);
        assert_eq!(status, Status::Red, "{} past watch cut ({value:?})", cuts.rule);
    }
}

#[test]
fn loe_of_exactly_eight_dollars_is_ok() {
    let scorecard = evaluator().evaluate(&ledger_with(&[
        (LEASE_OPERATING_EXPENSE, 8_000.0),
        (TOTAL_PRODUCTION_BOE, 1_000.0),
    ]));
    let loe = verdict(&scorecard, RuleId::LoePerBoe);
    assert_eq!(loe.value, Some(8.0));
    assert_eq!(loe.status, Status::Ok);
}

#[test]
fn zero_value_creation_spread_is_ok() {
    let scorecard = evaluator().evaluate(&ledger_with(&[(ROIC, 0.09), (WACC, 0.09)]));
    let spread = verdict(&scorecard, RuleId::RoicMinusWacc);
    assert_eq!(spread.value, Some(0.0));
    assert_eq!(spread.status, Status::Ok);
}
