//! Closed set of metric names a ledger carries.

use serde::Serialize;

pub const TOTAL_PRODUCTION_BOE: &str = "total_production_boe";
pub const LEASE_OPERATING_EXPENSE: &str = "lease_operating_expense";
pub const GATHERING_TRANSPORT_EXPENSE: &str = "gathering_transport_expense";
pub const GENERAL_ADMIN_EXPENSE: &str = "general_admin_expense";
pub const PRODUCTION_TAXES: &str = "production_taxes";
pub const CASH_OPERATING_COSTS: &str = "cash_operating_costs";
pub const REALIZED_PRICE_PER_BOE: &str = "realized_price_per_boe";
pub const REVENUE: &str = "revenue";
pub const EBITDA: &str = "ebitda";
pub const OPERATING_INCOME: &str = "operating_income";
pub const TOTAL_EQUITY: &str = "total_equity";
pub const INTEREST_EXPENSE: &str = "interest_expense";
pub const ROIC: &str = "roic";
pub const WACC: &str = "wacc";
pub const FINDING_DEVELOPMENT_COST_PER_BOE: &str = "finding_development_cost_per_boe";
pub const CAPEX: &str = "capex";
pub const OPERATING_CASH_FLOW: &str = "operating_cash_flow";
pub const RESERVES_ADDED_BOE: &str = "reserves_added_boe";
pub const PRODUCTION_CAPACITY_BOE: &str = "production_capacity_boe";
pub const TOTAL_DEBT: &str = "total_debt";
pub const CASH: &str = "cash";
pub const FREE_CASH_FLOW: &str = "free_cash_flow";
pub const MARKET_CAP: &str = "market_cap";
pub const SHARE_PRICE: &str = "share_price";
pub const SHARES_OUTSTANDING: &str = "shares_outstanding";
pub const TRAILING_PE: &str = "trailing_pe";
pub const TRAILING_EPS: &str = "trailing_eps";
pub const DIVIDEND_YIELD: &str = "dividend_yield";
pub const DIVIDEND_PER_SHARE: &str = "dividend_per_share";
pub const DIVIDEND_PAYING_YEARS: &str = "dividend_paying_years";
pub const SHARE_REPURCHASES: &str = "share_repurchases";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricDefinition {
    pub name: &'static str,
    pub unit: &'static str,
    pub description: &'static str,
}

const fn metric(
    name: &'static str,
    unit: &'static str,
    description: &'static str,
) -> MetricDefinition {
    MetricDefinition {
        name,
        unit,
        description,
    }
}

pub static CATALOG: [MetricDefinition; 31] = [
    metric(
        TOTAL_PRODUCTION_BOE,
        "BOE/yr",
        "Annual production in barrels of oil equivalent",
    ),
    metric(
        LEASE_OPERATING_EXPENSE,
        "USD",
        "Lease operating expense for the period",
    ),
    metric(
        GATHERING_TRANSPORT_EXPENSE,
        "USD",
        "Gathering, processing and transportation expense",
    ),
    metric(
        GENERAL_ADMIN_EXPENSE,
        "USD",
        "General and administrative expense",
    ),
    metric(PRODUCTION_TAXES, "USD", "Severance and production taxes"),
    metric(
        CASH_OPERATING_COSTS,
        "USD",
        "Field-level cash costs: LOE, production taxes and GP&T",
    ),
    metric(
        REALIZED_PRICE_PER_BOE,
        "USD/BOE",
        "Average realized price per barrel of oil equivalent",
    ),
    metric(REVENUE, "USD", "Total revenue"),
    metric(EBITDA, "USD", "Earnings before interest, taxes, D&A"),
    metric(OPERATING_INCOME, "USD", "Operating income"),
    metric(TOTAL_EQUITY, "USD", "Total shareholders' equity"),
    metric(INTEREST_EXPENSE, "USD", "Interest expense"),
    metric(ROIC, "fraction", "Return on invested capital"),
    metric(WACC, "fraction", "Weighted average cost of capital"),
    metric(
        FINDING_DEVELOPMENT_COST_PER_BOE,
        "USD/BOE",
        "Finding and development cost per BOE of reserves added",
    ),
    metric(CAPEX, "USD", "Capital expenditures"),
    metric(OPERATING_CASH_FLOW, "USD", "Cash flow from operations"),
    metric(
        RESERVES_ADDED_BOE,
        "BOE",
        "Proved reserves added during the period",
    ),
    metric(
        PRODUCTION_CAPACITY_BOE,
        "BOE/yr",
        "Nameplate production capacity",
    ),
    metric(TOTAL_DEBT, "USD", "Total debt"),
    metric(CASH, "USD", "Cash and cash equivalents"),
    metric(FREE_CASH_FLOW, "USD", "Free cash flow"),
    metric(MARKET_CAP, "USD", "Equity market capitalization"),
    metric(SHARE_PRICE, "USD", "Last traded share price"),
    metric(SHARES_OUTSTANDING, "shares", "Diluted shares outstanding"),
    metric(TRAILING_PE, "multiple", "Price over trailing earnings per share"),
    metric(
        TRAILING_EPS,
        "USD/share",
        "Trailing twelve-month earnings per share",
    ),
    metric(DIVIDEND_YIELD, "fraction", "Forward dividend yield"),
    metric(
        DIVIDEND_PER_SHARE,
        "USD/share",
        "Dividends declared per share",
    ),
    metric(
        DIVIDEND_PAYING_YEARS,
        "years",
        "Calendar years in which a dividend was paid",
    ),
    metric(
        SHARE_REPURCHASES,
        "USD",
        "Cash spent on share repurchases",
    ),
];

pub fn is_known(name: &str) -> bool {
    definition(name).is_some()
}

pub fn definition(name: &str) -> Option<&'static MetricDefinition> {
    CATALOG.iter().find(|definition| definition.name == name)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|definition| definition.name)
}
