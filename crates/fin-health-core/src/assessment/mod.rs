//! The six rule-based assessment modules.
//!
//! Each module is a pure function of an [`AnalysisContext`]: it extracts a
//! fixed, ordered set of yes/no flags, scores a handful of weighted factors
//! and picks a narrative conclusion. Modules never fail; missing inputs just
//! push the score towards zero.

pub mod cash_flow;
pub mod debt_solvency;
pub mod investment_expansion;
pub mod liquidity_risk;
pub mod operational_efficiency;
pub mod profit_quality;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::locale::{Locale, Text};
use crate::ratios::RatioSet;
use crate::record::FinancialRecord;
use crate::scoring::{Detail, FactorScore};
use crate::types::Points;

pub use cash_flow::assess_cash_flow;
pub use debt_solvency::assess_debt_solvency;
pub use investment_expansion::assess_investment_expansion;
pub use liquidity_risk::assess_liquidity_risk;
pub use operational_efficiency::assess_operational_efficiency;
pub use profit_quality::assess_profit_quality;

/// Everything a module may read. Borrowed, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub record: &'a FinancialRecord,
    pub ratios: &'a RatioSet,
    pub locale: Locale,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(record: &'a FinancialRecord, ratios: &'a RatioSet, locale: Locale) -> Self {
        Self {
            record,
            ratios,
            locale,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    ProfitQuality,
    CashFlow,
    LiquidityRisk,
    DebtSolvency,
    OperationalEfficiency,
    InvestmentExpansion,
}

impl ModuleKind {
    /// Report order.
    pub const ALL: [ModuleKind; 6] = [
        ModuleKind::ProfitQuality,
        ModuleKind::CashFlow,
        ModuleKind::LiquidityRisk,
        ModuleKind::DebtSolvency,
        ModuleKind::OperationalEfficiency,
        ModuleKind::InvestmentExpansion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModuleKind::ProfitQuality => "profit_quality",
            ModuleKind::CashFlow => "cash_flow",
            ModuleKind::LiquidityRisk => "liquidity_risk",
            ModuleKind::DebtSolvency => "debt_solvency",
            ModuleKind::OperationalEfficiency => "operational_efficiency",
            ModuleKind::InvestmentExpansion => "investment_expansion",
        }
    }

    pub fn title(self) -> Text {
        match self {
            ModuleKind::ProfitQuality => Text::new("Profit Quality", "獲利品質分析"),
            ModuleKind::CashFlow => Text::new("Cash Flow", "現金流量分析"),
            ModuleKind::LiquidityRisk => Text::new("Liquidity Risk", "流動性風險評估"),
            ModuleKind::DebtSolvency => Text::new("Debt & Solvency", "負債與償債能力"),
            ModuleKind::OperationalEfficiency => {
                Text::new("Operational Efficiency", "營運效率與周轉")
            }
            ModuleKind::InvestmentExpansion => {
                Text::new("Investment & Expansion", "投資與擴張合理性")
            }
        }
    }

    /// Highest score the module's factor weights can reach.
    pub fn max_score(self) -> Points {
        match self {
            ModuleKind::InvestmentExpansion => investment_expansion::MAX_POINTS,
            _ => crate::scoring::MAX_SCORE,
        }
    }

    pub fn assess(self, ctx: &AnalysisContext<'_>) -> AssessmentResult {
        let result = match self {
            ModuleKind::ProfitQuality => assess_profit_quality(ctx),
            ModuleKind::CashFlow => assess_cash_flow(ctx),
            ModuleKind::LiquidityRisk => assess_liquidity_risk(ctx),
            ModuleKind::DebtSolvency => assess_debt_solvency(ctx),
            ModuleKind::OperationalEfficiency => assess_operational_efficiency(ctx),
            ModuleKind::InvestmentExpansion => assess_investment_expansion(ctx),
        };
        tracing::debug!(module = self.as_str(), score = result.score, "module assessed");
        result
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResult {
    pub module: ModuleKind,
    /// Weighted score, clamped to `[0, 100]`.
    pub score: Points,
    pub conclusion: String,
    pub details: Vec<Detail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_conclusion: Option<String>,
    pub factors: Vec<FactorScore>,
}

impl AssessmentResult {
    /// Answer to the `index`-th diagnostic question.
    pub fn passed(&self, index: usize) -> Option<bool> {
        self.details.get(index).map(|d| d.passed)
    }
}

/// `(current - prior) / prior`, 0 when there is no prior value.
pub(crate) fn relative_change(current: f64, prior: f64) -> f64 {
    crate::ratios::yoy_change(current, prior)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratios::compute_ratios;

    #[test]
    fn test_all_modules_in_report_order() {
        let record = FinancialRecord::default();
        let ratios = compute_ratios(&record);
        let ctx = AnalysisContext::new(&record, &ratios, Locale::En);
        let results: Vec<_> = ModuleKind::ALL.iter().map(|m| m.assess(&ctx)).collect();
        let kinds: Vec<_> = results.iter().map(|r| r.module).collect();
        assert_eq!(kinds, ModuleKind::ALL.to_vec());
        for r in &results {
            assert!((0.0..=100.0).contains(&r.score), "{}: {}", r.module, r.score);
            assert!(!r.conclusion.is_empty());
        }
    }

    #[test]
    fn test_module_titles_localized() {
        assert_eq!(ModuleKind::CashFlow.title().get(Locale::ZhTw), "現金流量分析");
        assert_eq!(ModuleKind::DebtSolvency.title().get(Locale::En), "Debt & Solvency");
    }
}
