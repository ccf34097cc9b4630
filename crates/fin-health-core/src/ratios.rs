//! Ratio derivation.
//!
//! Profitability, solvency, efficiency and cash-flow/leverage ratios, all
//! from a single [`FinancialRecord`]. Division by zero never propagates:
//! every guarded ratio resolves to `0.0`, except interest coverage (`+inf`
//! when there is no interest expense) and the two turnover-day counts
//! (`+inf` when the turnover rate is zero).

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::FinHealthError;
use crate::record::FinancialRecord;
use crate::types::{JsonFloat, Money, Multiple, Rate};

pub const DAYS_PER_YEAR: f64 = 365.0;

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioName {
    GrossProfitMargin,
    OperatingProfitMargin,
    NetProfitMargin,
    Roe,
    Roa,
    NetProfitGrowthRate,
    RevenueGrowthRate,
    ProfitCashContent,
    CurrentRatio,
    QuickRatio,
    InterestCoverageRatio,
    InventoryTurnoverRate,
    InventoryTurnoverDays,
    AccountsReceivableTurnoverRate,
    AccountsReceivableTurnoverDays,
    FreeCashFlow,
    FinancingToOperatingCashFlowRatio,
    DebtRatio,
    FinancialExpenseToRevenueRatio,
    NetDebt,
}

impl RatioName {
    pub const ALL: [RatioName; 20] = [
        RatioName::GrossProfitMargin,
        RatioName::OperatingProfitMargin,
        RatioName::NetProfitMargin,
        RatioName::Roe,
        RatioName::Roa,
        RatioName::NetProfitGrowthRate,
        RatioName::RevenueGrowthRate,
        RatioName::ProfitCashContent,
        RatioName::CurrentRatio,
        RatioName::QuickRatio,
        RatioName::InterestCoverageRatio,
        RatioName::InventoryTurnoverRate,
        RatioName::InventoryTurnoverDays,
        RatioName::AccountsReceivableTurnoverRate,
        RatioName::AccountsReceivableTurnoverDays,
        RatioName::FreeCashFlow,
        RatioName::FinancingToOperatingCashFlowRatio,
        RatioName::DebtRatio,
        RatioName::FinancialExpenseToRevenueRatio,
        RatioName::NetDebt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RatioName::GrossProfitMargin => "gross_profit_margin",
            RatioName::OperatingProfitMargin => "operating_profit_margin",
            RatioName::NetProfitMargin => "net_profit_margin",
            RatioName::Roe => "roe",
            RatioName::Roa => "roa",
            RatioName::NetProfitGrowthRate => "net_profit_growth_rate",
            RatioName::RevenueGrowthRate => "revenue_growth_rate",
            RatioName::ProfitCashContent => "profit_cash_content",
            RatioName::CurrentRatio => "current_ratio",
            RatioName::QuickRatio => "quick_ratio",
            RatioName::InterestCoverageRatio => "interest_coverage_ratio",
            RatioName::InventoryTurnoverRate => "inventory_turnover_rate",
            RatioName::InventoryTurnoverDays => "inventory_turnover_days",
            RatioName::AccountsReceivableTurnoverRate => "accounts_receivable_turnover_rate",
            RatioName::AccountsReceivableTurnoverDays => "accounts_receivable_turnover_days",
            RatioName::FreeCashFlow => "free_cash_flow",
            RatioName::FinancingToOperatingCashFlowRatio => {
                "financing_to_operating_cash_flow_ratio"
            }
            RatioName::DebtRatio => "debt_ratio",
            RatioName::FinancialExpenseToRevenueRatio => "financial_expense_to_revenue_ratio",
            RatioName::NetDebt => "net_debt",
        }
    }
}

/// How a ratio is read and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Decimal fraction, shown as a percentage. Margins, rates and every
    /// `_ratio` key read this way.
    Percent,
    Days,
    Currency,
}

impl RatioName {
    pub fn unit(self) -> Unit {
        match self {
            RatioName::InventoryTurnoverDays | RatioName::AccountsReceivableTurnoverDays => {
                Unit::Days
            }
            RatioName::FreeCashFlow | RatioName::NetDebt => Unit::Currency,
            _ => Unit::Percent,
        }
    }
}

impl fmt::Display for RatioName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RatioName {
    type Err = FinHealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RatioName::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| FinHealthError::UnknownField(s.trim().to_string()))
    }
}

// ---------------------------------------------------------------------------
// RatioSet
// ---------------------------------------------------------------------------

/// Every derived ratio for one record. Recomputed wholesale, never patched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioSet {
    // Profitability
    pub gross_profit_margin: Rate,
    pub operating_profit_margin: Rate,
    pub net_profit_margin: Rate,
    pub roe: Rate,
    pub roa: Rate,
    pub net_profit_growth_rate: Rate,
    pub revenue_growth_rate: Rate,
    pub profit_cash_content: Multiple,
    // Solvency
    pub current_ratio: Multiple,
    pub quick_ratio: Multiple,
    pub interest_coverage_ratio: Multiple,
    // Efficiency
    pub inventory_turnover_rate: Multiple,
    pub inventory_turnover_days: f64,
    pub accounts_receivable_turnover_rate: Multiple,
    pub accounts_receivable_turnover_days: f64,
    // Cash flow / leverage
    pub free_cash_flow: Money,
    pub financing_to_operating_cash_flow_ratio: Multiple,
    pub debt_ratio: Rate,
    pub financial_expense_to_revenue_ratio: Rate,
    pub net_debt: Money,
}

impl RatioSet {
    pub fn get(&self, name: RatioName) -> f64 {
        match name {
            RatioName::GrossProfitMargin => self.gross_profit_margin,
            RatioName::OperatingProfitMargin => self.operating_profit_margin,
            RatioName::NetProfitMargin => self.net_profit_margin,
            RatioName::Roe => self.roe,
            RatioName::Roa => self.roa,
            RatioName::NetProfitGrowthRate => self.net_profit_growth_rate,
            RatioName::RevenueGrowthRate => self.revenue_growth_rate,
            RatioName::ProfitCashContent => self.profit_cash_content,
            RatioName::CurrentRatio => self.current_ratio,
            RatioName::QuickRatio => self.quick_ratio,
            RatioName::InterestCoverageRatio => self.interest_coverage_ratio,
            RatioName::InventoryTurnoverRate => self.inventory_turnover_rate,
            RatioName::InventoryTurnoverDays => self.inventory_turnover_days,
            RatioName::AccountsReceivableTurnoverRate => self.accounts_receivable_turnover_rate,
            RatioName::AccountsReceivableTurnoverDays => self.accounts_receivable_turnover_days,
            RatioName::FreeCashFlow => self.free_cash_flow,
            RatioName::FinancingToOperatingCashFlowRatio => {
                self.financing_to_operating_cash_flow_ratio
            }
            RatioName::DebtRatio => self.debt_ratio,
            RatioName::FinancialExpenseToRevenueRatio => self.financial_expense_to_revenue_ratio,
            RatioName::NetDebt => self.net_debt,
        }
    }

    /// Look up a ratio by its string key.
    pub fn get_by_key(&self, key: &str) -> Option<f64> {
        key.parse::<RatioName>().ok().map(|name| self.get(name))
    }

    /// All ratios in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (RatioName, f64)> + '_ {
        RatioName::ALL.iter().map(move |&name| (name, self.get(name)))
    }
}

/// JSON has no infinity; `+inf` is written as the string `"Infinity"`.
impl Serialize for RatioSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(RatioName::ALL.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name.as_str(), &JsonFloat(value))?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `num / den`, or `0.0` when the denominator is zero.
pub fn safe_div(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// `num / den`, or `+inf` when the denominator is zero.
pub fn div_or_infinity(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        f64::INFINITY
    } else {
        num / den
    }
}

/// Year-over-year relative change, `0.0` without a prior value.
pub fn yoy_change(current: f64, prior: f64) -> Rate {
    safe_div(current - prior, prior)
}

/// Average of opening and closing balances; the closing balance alone when
/// the opening one is missing.
fn average_balance(current: f64, prior: f64) -> f64 {
    if prior != 0.0 {
        (current + prior) / 2.0
    } else {
        current
    }
}

/// Days needed to turn a balance over once at `rate` turns per year.
pub fn turnover_days(rate: f64) -> f64 {
    div_or_infinity(DAYS_PER_YEAR, rate)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the full ratio set from a record.
pub fn compute_ratios(r: &FinancialRecord) -> RatioSet {
    let revenue = r.operating_revenue;
    let cogs = r.cost_of_goods_sold;
    let net_profit = r.net_profit_after_tax;
    let total_liabilities = r.total_liabilities();

    // -- Profitability ---------------------------------------------------------
    let gross_profit_margin = safe_div(revenue - cogs, revenue);
    let operating_profit_margin = safe_div(revenue - cogs - r.operating_expenses, revenue);
    let net_profit_margin = safe_div(net_profit, revenue);
    let roe = safe_div(net_profit, r.shareholders_equity);
    let roa = safe_div(net_profit, r.total_assets);
    let net_profit_growth_rate = yoy_change(net_profit, r.prev_year_net_profit_after_tax);
    let revenue_growth_rate = yoy_change(revenue, r.prev_year_operating_revenue);
    let profit_cash_content = safe_div(r.operating_cash_flow, net_profit);

    // -- Solvency --------------------------------------------------------------
    let current_ratio = safe_div(r.current_assets, r.current_liabilities);
    let quick_ratio = safe_div(r.current_assets - r.inventory, r.current_liabilities);
    let ebit = r.net_profit_before_tax + r.interest_expense;
    let interest_coverage_ratio = div_or_infinity(ebit, r.interest_expense);

    // -- Efficiency ------------------------------------------------------------
    let avg_inventory = average_balance(r.inventory, r.prev_year_inventory);
    let inventory_turnover_rate = safe_div(cogs, avg_inventory);
    let avg_receivables = average_balance(r.accounts_receivable, r.prev_year_accounts_receivable);
    let accounts_receivable_turnover_rate = safe_div(revenue, avg_receivables);

    // -- Cash flow / leverage --------------------------------------------------
    let free_cash_flow = r.operating_cash_flow - r.capital_expenditures;

    let ratios = RatioSet {
        gross_profit_margin,
        operating_profit_margin,
        net_profit_margin,
        roe,
        roa,
        net_profit_growth_rate,
        revenue_growth_rate,
        profit_cash_content,
        current_ratio,
        quick_ratio,
        interest_coverage_ratio,
        inventory_turnover_rate,
        inventory_turnover_days: turnover_days(inventory_turnover_rate),
        accounts_receivable_turnover_rate,
        accounts_receivable_turnover_days: turnover_days(accounts_receivable_turnover_rate),
        free_cash_flow,
        financing_to_operating_cash_flow_ratio: safe_div(
            r.financing_cash_flow,
            r.operating_cash_flow,
        ),
        debt_ratio: safe_div(total_liabilities, r.total_assets),
        financial_expense_to_revenue_ratio: safe_div(r.interest_expense, revenue),
        net_debt: total_liabilities - r.cash_and_equivalents,
    };
    tracing::debug!(
        roe = ratios.roe,
        debt_ratio = ratios.debt_ratio,
        free_cash_flow = ratios.free_cash_flow,
        "ratios computed"
    );
    ratios
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn sample() -> FinancialRecord {
        FinancialRecord {
            operating_revenue: 1_000_000.0,
            cost_of_goods_sold: 600_000.0,
            operating_expenses: 200_000.0,
            net_profit_after_tax: 150_000.0,
            net_profit_before_tax: 190_000.0,
            shareholders_equity: 750_000.0,
            total_assets: 1_500_000.0,
            current_assets: 600_000.0,
            current_liabilities: 300_000.0,
            inventory: 120_000.0,
            prev_year_inventory: 80_000.0,
            accounts_receivable: 100_000.0,
            interest_expense: 10_000.0,
            operating_cash_flow: 180_000.0,
            capital_expenditures: 50_000.0,
            financing_cash_flow: -36_000.0,
            cash_and_equivalents: 200_000.0,
            prev_year_net_profit_after_tax: 120_000.0,
            prev_year_operating_revenue: 800_000.0,
            ..FinancialRecord::default()
        }
    }

    #[test]
    fn test_profitability() {
        let r = compute_ratios(&sample());
        assert!(approx(r.gross_profit_margin, 0.40));
        assert!(approx(r.operating_profit_margin, 0.20));
        assert!(approx(r.net_profit_margin, 0.15));
        assert!(approx(r.roe, 0.20));
        assert!(approx(r.roa, 0.10));
        assert!(approx(r.net_profit_growth_rate, 0.25));
        assert!(approx(r.revenue_growth_rate, 0.25));
        assert!(approx(r.profit_cash_content, 1.2));
    }

    #[test]
    fn test_solvency() {
        let r = compute_ratios(&sample());
        assert!(approx(r.current_ratio, 2.0));
        assert!(approx(r.quick_ratio, 1.6));
        // (190k + 10k) / 10k
        assert!(approx(r.interest_coverage_ratio, 20.0));
    }

    #[test]
    fn test_inventory_uses_average_with_prior() {
        let r = compute_ratios(&sample());
        // 600k / ((120k + 80k) / 2)
        assert!(approx(r.inventory_turnover_rate, 6.0));
        assert!(approx(r.inventory_turnover_days, 365.0 / 6.0));
    }

    #[test]
    fn test_receivables_without_prior_use_closing_balance() {
        let r = compute_ratios(&sample());
        assert!(approx(r.accounts_receivable_turnover_rate, 10.0));
        assert!(approx(r.accounts_receivable_turnover_days, 36.5));
    }

    #[test]
    fn test_cash_flow_and_leverage() {
        let r = compute_ratios(&sample());
        assert!(approx(r.free_cash_flow, 130_000.0));
        assert!(approx(r.financing_to_operating_cash_flow_ratio, -0.2));
        assert!(approx(r.debt_ratio, 0.5));
        assert!(approx(r.financial_expense_to_revenue_ratio, 0.01));
        // liabilities 750k - cash 200k
        assert!(approx(r.net_debt, 550_000.0));
    }

    #[test]
    fn test_empty_record_is_guarded() {
        let r = compute_ratios(&FinancialRecord::default());
        for (name, value) in r.iter() {
            assert!(!value.is_nan(), "{name} is NaN");
        }
        assert_eq!(r.interest_coverage_ratio, f64::INFINITY);
        assert_eq!(r.inventory_turnover_days, f64::INFINITY);
        assert_eq!(r.accounts_receivable_turnover_days, f64::INFINITY);
        assert_eq!(r.current_ratio, 0.0);
        assert_eq!(r.free_cash_flow, 0.0);
    }

    #[test]
    fn test_lookup_by_key() {
        let r = compute_ratios(&sample());
        assert_eq!(r.get_by_key("roe"), Some(r.roe));
        assert_eq!(r.get_by_key("ebitda_margin"), None);
    }

    #[test]
    fn test_serialize_infinity_as_string() {
        let r = compute_ratios(&FinancialRecord::default());
        let v = serde_json::to_value(r).unwrap();
        assert_eq!(v["interest_coverage_ratio"], "Infinity");
        assert_eq!(v["current_ratio"], 0.0);
        assert_eq!(v.as_object().unwrap().len(), 20);
    }

    #[test]
    fn test_units() {
        assert_eq!(RatioName::Roe.unit(), Unit::Percent);
        assert_eq!(RatioName::ProfitCashContent.unit(), Unit::Percent);
        assert_eq!(RatioName::CurrentRatio.unit(), Unit::Percent);
        assert_eq!(RatioName::InterestCoverageRatio.unit(), Unit::Percent);
        assert_eq!(RatioName::InventoryTurnoverRate.unit(), Unit::Percent);
        assert_eq!(RatioName::AccountsReceivableTurnoverRate.unit(), Unit::Percent);
        assert_eq!(RatioName::AccountsReceivableTurnoverDays.unit(), Unit::Days);
        assert_eq!(RatioName::NetDebt.unit(), Unit::Currency);
    }

    #[test]
    fn test_helpers() {
        assert_eq!(safe_div(1.0, 0.0), 0.0);
        assert_eq!(div_or_infinity(-5.0, 0.0), f64::INFINITY);
        assert!(approx(yoy_change(110.0, 100.0), 0.1));
        assert_eq!(yoy_change(110.0, 0.0), 0.0);
        assert_eq!(turnover_days(0.0), f64::INFINITY);
    }
}
