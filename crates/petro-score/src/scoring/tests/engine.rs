use super::common::*;
use crate::scoring::catalog::*;
use crate::scoring::derive::Derived;
use crate::scoring::rules::{standard_rules, Reading};
use crate::scoring::{
    Band, Category, Direction, Evaluator, IntegrityError, Ledger, Rule, RuleId, RuleLibrary,
    RuleMeta, Status, ThresholdTable, ValueUnit,
};
use std::collections::BTreeMap;

struct StubRule {
    meta: RuleMeta,
    value: f64,
}

impl StubRule {
    fn boxed(id: RuleId, category: Category, required: &'static [&'static str], value: f64) -> Box<dyn Rule> {
        Box::new(Self {
            meta: RuleMeta {
                id,
                name: "Stub",
                category,
                direction: Direction::HigherIsBetter,
                unit: ValueUnit::Multiple,
                required_metrics: required,
                formula: "stub",
            },
            value,
        })
    }
}

impl Rule for StubRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn compute(&self, _ledger: &Ledger) -> Derived {
        Ok(self.value)
    }

    fn interpret(&self, _ledger: &Ledger, reading: &Reading) -> String {
        format!("stub {}", reading.value)
    }
}

fn table_without(id: RuleId) -> ThresholdTable {
    let bands: BTreeMap<RuleId, Band> = ThresholdTable::standard()
        .bands()
        .filter(|(rule, _)| *rule != id)
        .collect();
    ThresholdTable::new("partial", bands)
}

fn table_with(id: RuleId, band: Band) -> ThresholdTable {
    let mut bands: BTreeMap<RuleId, Band> = ThresholdTable::standard().bands().collect();
    bands.insert(id, band);
    ThresholdTable::new("custom", bands)
}

#[test]
fn standard_library_is_complete_and_ordered() {
    let library = RuleLibrary::standard().expect("consistent");
    assert_eq!(library.len(), 18);
    assert_eq!(library.table_version(), "2025.1");

    let ids: Vec<RuleId> = library.describe().iter().map(|rule| rule.id).collect();
    assert_eq!(ids, RuleId::ordered().to_vec());

    let categories: Vec<Category> = library.describe().iter().map(|rule| rule.category).collect();
    let mut sorted = categories.clone();
    sorted.sort();
    assert_eq!(categories, sorted);
}

#[test]
fn duplicate_rules_are_rejected() {
    let mut rules = standard_rules();
    rules.extend(standard_rules());
    let err = RuleLibrary::new(rules, &ThresholdTable::standard()).err();
    assert_eq!(err, Some(IntegrityError::DuplicateRule(RuleId::LoePerBoe)));
}

#[test]
fn unknown_metric_names_are_rejected() {
    let rules = vec![StubRule::boxed(
        RuleId::LoePerBoe,
        Category::Cost,
        &["lease_operating_cost"],
        1.0,
    )];
    let err = RuleLibrary::new(rules, &ThresholdTable::standard()).err();
    assert_eq!(
        err,
        Some(IntegrityError::UnknownMetric {
            rule: RuleId::LoePerBoe,
            metric: "lease_operating_cost",
        })
    );
}

#[test]
fn rules_without_requirements_are_rejected() {
    let rules = vec![StubRule::boxed(RuleId::FcfYield, Category::Valuation, &[], 1.0)];
    let err = RuleLibrary::new(rules, &ThresholdTable::standard()).err();
    assert_eq!(err, Some(IntegrityError::NoRequirements(RuleId::FcfYield)));
}

#[test]
fn missing_bands_are_rejected() {
    let err = RuleLibrary::with_table(&table_without(RuleId::PayoutRatio)).err();
    assert_eq!(
        err,
        Some(IntegrityError::MissingBand {
            rule: RuleId::PayoutRatio,
            version: "partial".to_string(),
        })
    );
}

#[test]
fn inverted_and_non_finite_bands_are_rejected() {
    let inverted = RuleLibrary::with_table(&table_with(RuleId::LoePerBoe, Band::new(12.0, 8.0)));
    assert!(matches!(
        inverted,
        Err(IntegrityError::InvalidBand {
            rule: RuleId::LoePerBoe,
            ..
        })
    ));

    let infinite = RuleLibrary::with_table(&table_with(
        RuleId::FcfYield,
        Band::new(f64::INFINITY, 0.04),
    ));
    assert!(matches!(
        infinite,
        Err(IntegrityError::InvalidBand {
            rule: RuleId::FcfYield,
            ..
        })
    ));
}

#[test]
fn verdicts_follow_category_then_declaration_order() {
    let rules = vec![
        StubRule::boxed(RuleId::FcfYield, Category::Valuation, &[FREE_CASH_FLOW], 1.0),
        StubRule::boxed(RuleId::LoePerBoe, Category::Cost, &[LEASE_OPERATING_EXPENSE], 1.0),
        StubRule::boxed(RuleId::NapkinValueUpside, Category::Valuation, &[SHARE_PRICE], 1.0),
        StubRule::boxed(RuleId::GnaPerBoe, Category::Cost, &[GENERAL_ADMIN_EXPENSE], 1.0),
    ];
    let table = ThresholdTable::new(
        "stub",
        [
            RuleId::FcfYield,
            RuleId::LoePerBoe,
            RuleId::NapkinValueUpside,
            RuleId::GnaPerBoe,
        ]
        .into_iter()
        .map(|id| (id, Band::new(1.0, 0.5)))
        .collect(),
    );
    let evaluator = Evaluator::new(RuleLibrary::new(rules, &table).expect("consistent"));
    let scorecard = evaluator.evaluate(&healthy_ledger());

    let order: Vec<RuleId> = scorecard.verdicts().iter().map(|v| v.rule_id).collect();
    assert_eq!(
        order,
        vec![
            RuleId::LoePerBoe,
            RuleId::GnaPerBoe,
            RuleId::FcfYield,
            RuleId::NapkinValueUpside
        ]
    );
}

#[test]
fn non_finite_rule_output_becomes_na() {
    let rules = vec![StubRule::boxed(
        RuleId::FcfYield,
        Category::Valuation,
        &[FREE_CASH_FLOW],
        f64::NAN,
    )];
    let table = ThresholdTable::new("stub", [(RuleId::FcfYield, Band::new(0.08, 0.04))].into());
    let evaluator = Evaluator::new(RuleLibrary::new(rules, &table).expect("consistent"));

    let scorecard = evaluator.evaluate(&healthy_ledger());
    let fcf = verdict(&scorecard, RuleId::FcfYield);
    assert_eq!(fcf.status, Status::Na);
    assert!(fcf.value.is_none());
    assert_eq!(scorecard.total(), 0);
}

#[test]
fn evaluation_is_idempotent_and_leaves_ledger_untouched() {
    let ledger = ledger_without(&[ROIC, SHARE_PRICE]);
    let before = ledger.clone();
    let evaluator = evaluator();

    let first = evaluator.evaluate(&ledger);
    let second = evaluator.evaluate(&ledger);

    assert_eq!(first, second);
    assert_eq!(ledger, before);
}

#[test]
fn overridden_table_changes_classification_not_direction() {
    let strict = table_with(RuleId::LoePerBoe, Band::new(5.0, 5.5));
    let evaluator = Evaluator::new(RuleLibrary::with_table(&strict).expect("consistent"));
    let scorecard = evaluator.evaluate(&healthy_ledger());

    let loe = verdict(&scorecard, RuleId::LoePerBoe);
    assert_eq!(loe.value, Some(6.0));
    assert_eq!(loe.status, Status::Red);
    assert_eq!(scorecard.score(), 17);
}
