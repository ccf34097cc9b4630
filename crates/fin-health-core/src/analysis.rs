//! End-to-end driver: derive ratios once, run every module, wrap the lot in
//! the standard output envelope.

use std::time::Instant;

use serde::Serialize;
use serde_json::json;

use crate::assessment::{AnalysisContext, AssessmentResult, ModuleKind};
use crate::locale::Locale;
use crate::ratios::{compute_ratios, RatioSet, DAYS_PER_YEAR};
use crate::record::FinancialRecord;
use crate::types::{with_metadata, ComputationOutput};

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub locale: Locale,
}

/// Ratios plus one result per module, in report order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub ratios: RatioSet,
    pub assessments: Vec<AssessmentResult>,
}

impl HealthReport {
    pub fn assessment(&self, module: ModuleKind) -> Option<&AssessmentResult> {
        self.assessments.iter().find(|a| a.module == module)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[cfg(not(feature = "parallel"))]
fn run_modules(ctx: &AnalysisContext<'_>) -> Vec<AssessmentResult> {
    ModuleKind::ALL.iter().map(|m| m.assess(ctx)).collect()
}

#[cfg(feature = "parallel")]
fn run_modules(ctx: &AnalysisContext<'_>) -> Vec<AssessmentResult> {
    use rayon::prelude::*;
    ModuleKind::ALL[..].par_iter().map(|m| m.assess(ctx)).collect()
}

/// Inputs whose absence silently zeroes whole groups of ratios.
fn data_gap_warnings(record: &FinancialRecord) -> Vec<String> {
    let mut warnings = Vec::new();
    if record.operating_revenue == 0.0 {
        warnings.push("operating_revenue is zero; margins and revenue ratios read as 0".into());
    }
    if record.total_assets == 0.0 {
        warnings.push("total_assets is zero; ROA and debt ratio read as 0".into());
    }
    if record.shareholders_equity <= 0.0 {
        warnings.push("shareholders_equity is not positive; ROE is not meaningful".into());
    }
    if record.net_profit_after_tax == 0.0 {
        warnings.push("net_profit_after_tax is zero; profit cash content reads as 0".into());
    }
    if record.total_liabilities() < 0.0 {
        warnings.push("shareholders_equity exceeds total_assets; liabilities are negative".into());
    }
    if record.three_year_operating_cash_flows == [0.0; 3] {
        warnings.push("three_year_operating_cash_flows not supplied".into());
    }
    warnings
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full assessment on one record.
pub fn analyze(
    record: &FinancialRecord,
    options: &AnalysisOptions,
) -> ComputationOutput<HealthReport> {
    let start = Instant::now();
    let warnings = data_gap_warnings(record);

    let ratios = compute_ratios(record);
    let ctx = AnalysisContext::new(record, &ratios, options.locale);
    let assessments = run_modules(&ctx);

    let assumptions = json!({
        "locale": options.locale.to_string(),
        "days_per_year": DAYS_PER_YEAR,
        "total_liabilities": "total_assets - shareholders_equity",
        "zero_denominator": "0, except interest coverage and turnover days (+inf)",
        "investment_expansion_max_score": ModuleKind::InvestmentExpansion.max_score(),
    });
    let elapsed = start.elapsed().as_micros() as u64;

    with_metadata(
        "Ratio derivation with six weighted rule-based assessment modules",
        &assumptions,
        warnings,
        elapsed,
        HealthReport {
            ratios,
            assessments,
        },
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FinancialRecord {
        FinancialRecord {
            operating_revenue: 1_000_000.0,
            cost_of_goods_sold: 600_000.0,
            net_profit_after_tax: 100_000.0,
            shareholders_equity: 500_000.0,
            total_assets: 900_000.0,
            operating_cash_flow: 150_000.0,
            three_year_operating_cash_flows: [100_000.0, 120_000.0, 150_000.0],
            ..FinancialRecord::default()
        }
    }

    #[test]
    fn test_six_results_in_order() {
        let out = analyze(&record(), &AnalysisOptions::default());
        let kinds: Vec<_> = out.result.assessments.iter().map(|a| a.module).collect();
        assert_eq!(kinds, ModuleKind::ALL.to_vec());
        assert!(out.warnings.is_empty(), "{:?}", out.warnings);
        assert_eq!(out.metadata.precision, "f64_ieee754");
    }

    #[test]
    fn test_idempotent() {
        let r = record();
        let a = analyze(&r, &AnalysisOptions::default()).result;
        let b = analyze(&r, &AnalysisOptions::default()).result;
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_record_warns() {
        let out = analyze(&FinancialRecord::default(), &AnalysisOptions::default());
        assert!(out.warnings.iter().any(|w| w.contains("operating_revenue")));
        assert!(out
            .result
            .assessment(ModuleKind::InvestmentExpansion)
            .and_then(|a| a.overall_conclusion.as_ref())
            .is_some());
    }

    #[test]
    fn test_envelope_serializes() {
        let out = analyze(&FinancialRecord::default(), &AnalysisOptions::default());
        let v = serde_json::to_value(&out).unwrap();
        assert_eq!(v["result"]["ratios"]["interest_coverage_ratio"], "Infinity");
        assert_eq!(v["result"]["assessments"].as_array().unwrap().len(), 6);
        assert_eq!(v["assumptions"]["locale"], "en");
    }
}
