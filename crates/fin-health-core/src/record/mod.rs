//! The raw financial figures for one analysis session.
//!
//! `FinancialRecord` has a fixed schema: every scalar is an `f64` that
//! defaults to `0.0`, plus one three-element series. Writes by name go
//! through [`coerce`], so anything that reaches the ratio engine is a
//! finite float.

pub mod coerce;
pub mod import;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FinHealthError;
use crate::FinHealthResult;

const SERIES_NAME: &str = "three_year_operating_cash_flows";

macro_rules! financial_fields {
    ($( $(#[$doc:meta])* $field:ident => $variant:ident, )+) => {
        /// Raw inputs: current period, prior period and industry benchmarks.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(default, deny_unknown_fields)]
        pub struct FinancialRecord {
            $( $(#[$doc])* pub $field: f64, )+
            /// Operating cash flow for the last three years, oldest first.
            pub three_year_operating_cash_flows: [f64; 3],
        }

        impl Default for FinancialRecord {
            fn default() -> Self {
                Self {
                    $( $field: 0.0, )+
                    three_year_operating_cash_flows: [0.0; 3],
                }
            }
        }

        /// Every recognised input name.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Field {
            $( $variant, )+
            ThreeYearOperatingCashFlows,
        }

        impl Field {
            pub const ALL: &'static [Field] = &[
                $( Field::$variant, )+
                Field::ThreeYearOperatingCashFlows,
            ];

            pub fn as_str(self) -> &'static str {
                match self {
                    $( Field::$variant => stringify!($field), )+
                    Field::ThreeYearOperatingCashFlows => SERIES_NAME,
                }
            }
        }

        impl FinancialRecord {
            fn scalar_mut(&mut self, field: Field) -> Option<&mut f64> {
                match field {
                    $( Field::$variant => Some(&mut self.$field), )+
                    Field::ThreeYearOperatingCashFlows => None,
                }
            }

            /// Scalar value of `field`; `None` for the series field.
            pub fn scalar(&self, field: Field) -> Option<f64> {
                match field {
                    $( Field::$variant => Some(self.$field), )+
                    Field::ThreeYearOperatingCashFlows => None,
                }
            }
        }
    };
}

financial_fields! {
    operating_revenue => OperatingRevenue,
    cost_of_goods_sold => CostOfGoodsSold,
    operating_expenses => OperatingExpenses,
    net_profit_after_tax => NetProfitAfterTax,
    shareholders_equity => ShareholdersEquity,
    total_assets => TotalAssets,
    current_assets => CurrentAssets,
    current_liabilities => CurrentLiabilities,
    inventory => Inventory,
    accounts_receivable => AccountsReceivable,
    interest_expense => InterestExpense,
    net_profit_before_tax => NetProfitBeforeTax,
    operating_cash_flow => OperatingCashFlow,
    investing_cash_flow => InvestingCashFlow,
    financing_cash_flow => FinancingCashFlow,
    capital_expenditures => CapitalExpenditures,
    cash_dividends_paid => CashDividendsPaid,
    non_recurring_gain_loss => NonRecurringGainLoss,
    /// Profit base for the non-recurring share (pre-tax or net, caller's choice).
    total_profit => TotalProfit,
    cash_and_equivalents => CashAndEquivalents,
    short_term_borrowing => ShortTermBorrowing,
    accounts_payable_days => AccountsPayableDays,
    prev_year_net_profit_after_tax => PrevYearNetProfitAfterTax,
    prev_year_operating_revenue => PrevYearOperatingRevenue,
    prev_year_inventory => PrevYearInventory,
    prev_year_accounts_receivable => PrevYearAccountsReceivable,
    prev_year_inventory_turnover_rate => PrevYearInventoryTurnoverRate,
    prev_year_accounts_receivable_turnover_days => PrevYearAccountsReceivableTurnoverDays,
    prev_year_gross_profit_margin => PrevYearGrossProfitMargin,
    /// Zero means "not supplied"; the YoY payable-days change then reads as 0.
    prev_year_accounts_payable_days => PrevYearAccountsPayableDays,
    industry_avg_roe => IndustryAvgRoe,
    industry_avg_revenue_growth_rate => IndustryAvgRevenueGrowthRate,
    /// Average borrowing rate as a decimal (0.03 = 3%).
    cost_of_debt_interest_rate => CostOfDebtInterestRate,
    prev_total_liabilities => PrevTotalLiabilities,
    prev_total_assets => PrevTotalAssets,
    prev_net_debt => PrevNetDebt,
}

impl Field {
    pub fn is_series(self) -> bool {
        self == Field::ThreeYearOperatingCashFlows
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = FinHealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == name)
            .ok_or_else(|| FinHealthError::UnknownField(name.to_string()))
    }
}

impl FinancialRecord {
    /// Set a scalar field.
    ///
    /// A non-finite value is rejected: the field is reset to its default and
    /// the error is handed back as a warning.
    pub fn set(&mut self, field: Field, value: f64) -> FinHealthResult<()> {
        if field.is_series() {
            self.three_year_operating_cash_flows = [0.0; 3];
            return Err(reject(FinHealthError::MalformedSeries {
                field: SERIES_NAME.into(),
                reason: "expected exactly three values, got one".into(),
            }));
        }
        let slot = match self.scalar_mut(field) {
            Some(slot) => slot,
            None => return Ok(()),
        };
        if !value.is_finite() {
            *slot = 0.0;
            return Err(reject(FinHealthError::NonFiniteValue {
                field: field.as_str().into(),
            }));
        }
        *slot = value;
        Ok(())
    }

    /// Set the three-year operating cash flow series (oldest first).
    pub fn set_series(&mut self, values: [f64; 3]) -> FinHealthResult<()> {
        if values.iter().any(|v| !v.is_finite()) {
            self.three_year_operating_cash_flows = [0.0; 3];
            return Err(reject(FinHealthError::MalformedSeries {
                field: SERIES_NAME.into(),
                reason: "values must be finite".into(),
            }));
        }
        self.three_year_operating_cash_flows = values;
        Ok(())
    }

    /// Set a field by name from user-entered text.
    ///
    /// Unknown names leave the record untouched. Unparsable text resets the
    /// field to its default. Either way the error is returned as a warning.
    pub fn set_raw(&mut self, name: &str, raw: &str) -> FinHealthResult<()> {
        let field = name.parse::<Field>().map_err(reject)?;
        if field.is_series() {
            return match coerce::parse_series(SERIES_NAME, raw) {
                Ok(values) => self.set_series(values),
                Err(e) => {
                    self.three_year_operating_cash_flows = [0.0; 3];
                    Err(reject(e))
                }
            };
        }
        match coerce::coerce_number(field.as_str(), raw) {
            Ok(value) => self.set(field, value),
            Err(e) => {
                if let Some(slot) = self.scalar_mut(field) {
                    *slot = 0.0;
                }
                Err(reject(e))
            }
        }
    }

    /// Set a field by name from a JSON value (number, numeric string, null,
    /// or for the series an array / comma-separated string).
    pub fn set_json(&mut self, name: &str, value: &Value) -> FinHealthResult<()> {
        let field = name.parse::<Field>().map_err(reject)?;
        if field.is_series() {
            return match coerce::json_series(SERIES_NAME, value) {
                Ok(values) => self.set_series(values),
                Err(e) => {
                    self.three_year_operating_cash_flows = [0.0; 3];
                    Err(reject(e))
                }
            };
        }
        match coerce::json_number(field.as_str(), value) {
            Ok(v) => self.set(field, v),
            Err(e) => {
                if let Some(slot) = self.scalar_mut(field) {
                    *slot = 0.0;
                }
                Err(reject(e))
            }
        }
    }

    /// Total liabilities are not an input: assets minus equity.
    pub fn total_liabilities(&self) -> f64 {
        self.total_assets - self.shareholders_equity
    }

    /// Prior-year debt ratio, 0 when prior assets are missing.
    pub fn prev_debt_ratio(&self) -> f64 {
        if self.prev_total_assets != 0.0 {
            self.prev_total_liabilities / self.prev_total_assets
        } else {
            0.0
        }
    }
}

fn reject(err: FinHealthError) -> FinHealthError {
    tracing::warn!(error = %err, "financial input rejected");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_are_zero() {
        let r = FinancialRecord::default();
        for field in Field::ALL {
            if let Some(v) = r.scalar(*field) {
                assert_eq!(v, 0.0, "{field}");
            }
        }
        assert_eq!(r.three_year_operating_cash_flows, [0.0; 3]);
    }

    #[test]
    fn test_field_names_are_unique_and_parse_back() {
        let mut seen = std::collections::HashSet::new();
        for field in Field::ALL {
            assert!(seen.insert(field.as_str()), "duplicate {field}");
            assert_eq!(field.as_str().parse::<Field>().unwrap(), *field);
        }
        assert_eq!(Field::ALL.len(), 37);
    }

    #[test]
    fn test_unknown_field_rejected_without_side_effects() {
        let mut r = FinancialRecord::default();
        r.operating_revenue = 10.0;
        let before = r.clone();
        let err = r.set_raw("ebitda", "100").unwrap_err();
        assert_eq!(err, FinHealthError::UnknownField("ebitda".into()));
        assert_eq!(r, before);
    }

    #[test]
    fn test_set_raw_coerces_text() {
        let mut r = FinancialRecord::default();
        r.set_raw("operating_revenue", " 1,000,000 ").unwrap();
        assert_eq!(r.operating_revenue, 1_000_000.0);
    }

    #[test]
    fn test_set_raw_invalid_resets_default() {
        let mut r = FinancialRecord::default();
        r.inventory = 500.0;
        assert!(matches!(
            r.set_raw("inventory", "lots"),
            Err(FinHealthError::InvalidNumber { .. })
        ));
        assert_eq!(r.inventory, 0.0);
    }

    #[test]
    fn test_set_rejects_non_finite() {
        let mut r = FinancialRecord::default();
        assert!(r.set(Field::TotalAssets, f64::NAN).is_err());
        assert_eq!(r.total_assets, 0.0);
        assert!(r.set(Field::TotalAssets, f64::INFINITY).is_err());
        assert_eq!(r.total_assets, 0.0);
    }

    #[test]
    fn test_series_from_text() {
        let mut r = FinancialRecord::default();
        r.set_raw(SERIES_NAME, "100, 200, 300").unwrap();
        assert_eq!(r.three_year_operating_cash_flows, [100.0, 200.0, 300.0]);
    }

    #[test]
    fn test_malformed_series_resets() {
        let mut r = FinancialRecord::default();
        r.three_year_operating_cash_flows = [1.0, 2.0, 3.0];
        assert!(matches!(
            r.set_raw(SERIES_NAME, "100, abc, 300"),
            Err(FinHealthError::MalformedSeries { .. })
        ));
        assert_eq!(r.three_year_operating_cash_flows, [0.0; 3]);
    }

    #[test]
    fn test_set_json_number_and_string() {
        let mut r = FinancialRecord::default();
        r.set_json("total_assets", &json!(2500.5)).unwrap();
        r.set_json("shareholders_equity", &json!("1000")).unwrap();
        r.set_json(SERIES_NAME, &json!([1, 2, 3])).unwrap();
        assert_eq!(r.total_assets, 2500.5);
        assert_eq!(r.shareholders_equity, 1000.0);
        assert_eq!(r.three_year_operating_cash_flows, [1.0, 2.0, 3.0]);
        assert_eq!(r.total_liabilities(), 1500.5);
    }

    #[test]
    fn test_strict_deserialize_rejects_unknown_keys() {
        let ok: FinancialRecord =
            serde_json::from_value(json!({ "operating_revenue": 5.0 })).unwrap();
        assert_eq!(ok.operating_revenue, 5.0);
        assert_eq!(ok.total_assets, 0.0);
        assert!(serde_json::from_value::<FinancialRecord>(json!({ "ebitda": 1.0 })).is_err());
    }

    #[test]
    fn test_prev_debt_ratio_guarded() {
        let mut r = FinancialRecord::default();
        r.prev_total_liabilities = 40.0;
        assert_eq!(r.prev_debt_ratio(), 0.0);
        r.prev_total_assets = 100.0;
        assert_eq!(r.prev_debt_ratio(), 0.4);
    }
}
