//! Liquidity risk: can the company meet short-term obligations from cash,
//! liquid assets and operations?

use super::{AnalysisContext, AssessmentResult, ModuleKind};
use crate::locale::Text;
use crate::ratios::{div_or_infinity, turnover_days};
use crate::scoring::{
    details, flag, select_conclusion, total_score, Bracket, Excluded, Factor, Included, Rule,
    Scale, Unbounded,
};

// ---------------------------------------------------------------------------
// Factors
// ---------------------------------------------------------------------------

const CASH_TO_SHORT_DEBT_BANDS: &[Bracket] = &[
    Bracket::new(Included(2.0), Unbounded, 25.0),
    Bracket::new(Included(1.0), Excluded(2.0), 16.7),
    Bracket::new(Included(0.5), Excluded(1.0), 8.3),
    Bracket::otherwise(0.0),
];

/// Scored on the tier from [`ocf_trend_tier`].
const OCF_TREND_BANDS: &[Bracket] = &[
    Bracket::new(Included(5.0), Unbounded, 25.0),
    Bracket::new(Included(4.0), Excluded(5.0), 20.0),
    Bracket::new(Included(3.0), Excluded(4.0), 15.0),
    Bracket::new(Included(2.0), Excluded(3.0), 10.0),
    Bracket::new(Included(1.0), Excluded(2.0), 5.0),
    Bracket::otherwise(0.0),
];

const CURRENT_RATIO_BANDS: &[Bracket] = &[
    Bracket::new(Excluded(3.0), Unbounded, 15.0),
    Bracket::new(Included(2.5), Included(3.0), 12.0),
    Bracket::new(Included(2.0), Excluded(2.5), 9.0),
    Bracket::new(Included(1.5), Excluded(2.0), 6.0),
    Bracket::new(Included(1.0), Excluded(1.5), 3.0),
    Bracket::otherwise(0.0),
];

const OCF_INTEREST_COVER_BANDS: &[Bracket] = &[
    Bracket::new(Excluded(5.0), Unbounded, 10.0),
    Bracket::new(Included(3.0), Included(5.0), 8.0),
    Bracket::new(Included(1.0), Excluded(3.0), 6.0),
    Bracket::new(Included(0.5), Excluded(1.0), 4.0),
    Bracket::new(Included(0.2), Excluded(0.5), 2.0),
    Bracket::otherwise(0.0),
];

const QUICK_RATIO_BANDS: &[Bracket] = &[
    Bracket::new(Excluded(2.0), Unbounded, 10.0),
    Bracket::new(Included(1.5), Included(2.0), 8.0),
    Bracket::new(Included(1.2), Excluded(1.5), 6.0),
    Bracket::new(Included(1.0), Excluded(1.2), 4.0),
    Bracket::new(Included(0.7), Excluded(1.0), 2.0),
    Bracket::otherwise(0.0),
];

const CASH_TO_SHORT_DEBT: Factor = Factor {
    name: Text::new("Cash / short-term borrowing", "現金及約當現金 / 短期借款"),
    weight: 25.0,
    scale: Scale::Brackets(CASH_TO_SHORT_DEBT_BANDS),
};

const OCF_TREND: Factor = Factor {
    name: Text::new("Three-year operating cash flow", "近三年營業現金流"),
    weight: 25.0,
    scale: Scale::Brackets(OCF_TREND_BANDS),
};

const CURRENT_RATIO: Factor = Factor {
    name: Text::new("Current ratio", "流動比率"),
    weight: 15.0,
    scale: Scale::Brackets(CURRENT_RATIO_BANDS),
};

const INVENTORY_DAYS_TREND: Factor = Factor {
    name: Text::new("Inventory days stable or down", "存貨周轉天數穩定或下降"),
    weight: 15.0,
    scale: Scale::Binary {
        pass: 15.0,
        fail: 0.0,
    },
};

const OCF_INTEREST_COVER: Factor = Factor {
    name: Text::new("Operating cash flow / interest", "營業現金流 / 利息支出"),
    weight: 10.0,
    scale: Scale::Brackets(OCF_INTEREST_COVER_BANDS),
};

const QUICK_RATIO: Factor = Factor {
    name: Text::new("Quick ratio", "速動比率"),
    weight: 10.0,
    scale: Scale::Brackets(QUICK_RATIO_BANDS),
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Grade the three-year operating cash flow series, checked in order:
/// 5 all positive and non-decreasing, 4 all positive, 3 current year
/// positive, 2 two positive years, 1 one positive year, else 0.
pub fn ocf_trend_tier(series: &[f64; 3], current_ocf: f64) -> u8 {
    let positive = series.iter().filter(|v| **v > 0.0).count();
    let non_decreasing = series.windows(2).all(|w| w[0] <= w[1]);
    match positive {
        3 if non_decreasing => 5,
        3 => 4,
        _ if current_ocf > 0.0 => 3,
        2 => 2,
        1 => 1,
        _ => 0,
    }
}

/// Whether inventory days held or fell. An infinite prior (no prior
/// turnover) always counts as stable or improving.
pub fn inventory_days_stable_or_down(current_days: f64, prior_days: f64) -> bool {
    prior_days.is_infinite() || current_days <= prior_days
}

// ---------------------------------------------------------------------------
// Flags and conclusions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flags {
    current_ok: bool,
    quick_ok: bool,
    ocf_positive: bool,
    inventory_ok: bool,
    cash_covers_borrowing: bool,
    ocf_covers_interest: bool,
}

impl Flags {
    fn checks(&self) -> [(Text, bool); 6] {
        [
            (Text::new("Current ratio > 2?", "流動比率 > 2?"), self.current_ok),
            (Text::new("Quick ratio > 1?", "速動比率 > 1?"), self.quick_ok),
            (
                Text::new("Operating cash flow positive?", "營業現金流為正?"),
                self.ocf_positive,
            ),
            (
                Text::new("Inventory days stable or down?", "存貨周轉天數穩定或下降?"),
                self.inventory_ok,
            ),
            (
                Text::new(
                    "Cash and equivalents > short-term borrowing?",
                    "現金及約當現金 > 短期借款?",
                ),
                self.cash_covers_borrowing,
            ),
            (
                Text::new(
                    "Operating cash flow covers interest expense?",
                    "營業現金流能覆蓋利息支出?",
                ),
                self.ocf_covers_interest,
            ),
        ]
    }

    fn all_ok(&self) -> bool {
        self.current_ok
            && self.quick_ok
            && self.ocf_positive
            && self.inventory_ok
            && self.cash_covers_borrowing
            && self.ocf_covers_interest
    }
}

fn rules() -> [Rule<Flags>; 6] {
    [
        Rule::new(
            |f: &Flags| f.all_ok(),
            Text::new(
                "Short-term liquidity is ample with no immediate repayment risk and sound cash management. Finances are very healthy.",
                "公司短期流動性充足，無立即償債風險，現金管理穩健。財務狀況非常健康。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.current_ok && !f.quick_ok,
            Text::new(
                "Liquidity may depend on selling inventory; check whether inventory turnover is deteriorating and beware of stock build-up.",
                "流動性可能依賴存貨變現，需檢查存貨周轉率是否惡化。應警惕存貨積壓風險。",
            ),
        ),
        Rule::new(
            |f: &Flags| !f.current_ok && !f.quick_ok && f.ocf_positive,
            Text::new(
                "Surviving on operating cash flow; any operational problem would cause a funding squeeze. Short-term solvency is doubtful and risk is high.",
                "靠著本業現金流維持，但營運一出現問題便陷入資金困境。短期償債能力有疑慮，風險較高。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.current_ok && f.quick_ok && !f.ocf_positive,
            Text::new(
                "Solvency ratios are acceptable but cash flow is unusually weak; poor earnings quality may create short-term funding risk. Profit may not be turning into cash.",
                "償債比率尚可，但現金流異常偏弱，需提防盈餘品質不佳導致短期資金風險。利潤可能未轉化為現金。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.inventory_ok && !f.all_ok(),
            Text::new(
                "Some operating efficiency, but the financial structure is unbalanced and cash flow insufficient: high risk. Inventory is well managed, yet overall liquidity needs improvement.",
                "有一定營運效率，但財務結構失衡、現金流不足，風險高。存貨管理良好，但整體流動性仍需改善。",
            ),
        ),
        Rule::new(
            |f: &Flags| !f.ocf_positive,
            Text::new(
                "Even if the current ratio is adequate, operations generate no cash, which may hide profit-quality problems. Negative operating cash flow is a serious warning.",
                "即使流動比率達標，營運活動未產生現金，可能隱藏獲利品質問題。營業現金流為負是嚴重警訊。",
            ),
        ),
    ]
}

const FALLBACK: Text = Text::new(
    "Overall liquidity risk requires further case-by-case analysis of the figures.",
    "流動性風險綜合判斷，需根據具體數據進一步分析。",
);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn assess_liquidity_risk(ctx: &AnalysisContext<'_>) -> AssessmentResult {
    let r = ctx.record;
    let ratios = ctx.ratios;
    let ocf = r.operating_cash_flow;
    let cash_to_short_debt = div_or_infinity(r.cash_and_equivalents, r.short_term_borrowing);
    let ocf_interest_cover = div_or_infinity(ocf, r.interest_expense);
    let inventory_days_now = turnover_days(ratios.inventory_turnover_rate);
    let inventory_days_prior = turnover_days(r.prev_year_inventory_turnover_rate);
    let tier = ocf_trend_tier(&r.three_year_operating_cash_flows, ocf);

    let flags = Flags {
        current_ok: ratios.current_ratio > 2.0,
        quick_ok: ratios.quick_ratio > 1.0,
        ocf_positive: ocf > 0.0,
        inventory_ok: inventory_days_stable_or_down(inventory_days_now, inventory_days_prior),
        cash_covers_borrowing: cash_to_short_debt >= 1.0,
        ocf_covers_interest: ocf_interest_cover > 1.0,
    };

    let factors = vec![
        CASH_TO_SHORT_DEBT.score(cash_to_short_debt, ctx.locale),
        OCF_TREND.score(f64::from(tier), ctx.locale),
        CURRENT_RATIO.score(ratios.current_ratio, ctx.locale),
        INVENTORY_DAYS_TREND.score(flag(flags.inventory_ok), ctx.locale),
        OCF_INTEREST_COVER.score(ocf_interest_cover, ctx.locale),
        QUICK_RATIO.score(ratios.quick_ratio, ctx.locale),
    ];

    AssessmentResult {
        module: ModuleKind::LiquidityRisk,
        score: total_score(&factors),
        conclusion: select_conclusion(&rules(), &flags, FALLBACK)
            .get(ctx.locale)
            .to_string(),
        details: details(&flags.checks(), ctx.locale),
        overall_conclusion: None,
        factors,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::ratios::compute_ratios;
    use crate::record::FinancialRecord;

    fn run(record: &FinancialRecord) -> AssessmentResult {
        let ratios = compute_ratios(record);
        assess_liquidity_risk(&AnalysisContext::new(record, &ratios, Locale::En))
    }

    #[test]
    fn test_ocf_tiers() {
        assert_eq!(ocf_trend_tier(&[100.0, 200.0, 300.0], 300.0), 5);
        assert_eq!(ocf_trend_tier(&[300.0, 200.0, 100.0], 100.0), 4);
        assert_eq!(ocf_trend_tier(&[-1.0, -1.0, 5.0], 10.0), 3);
        assert_eq!(ocf_trend_tier(&[1.0, 2.0, -3.0], -3.0), 2);
        assert_eq!(ocf_trend_tier(&[1.0, -2.0, -3.0], 0.0), 1);
        assert_eq!(ocf_trend_tier(&[0.0, 0.0, 0.0], 0.0), 0);
    }

    #[test]
    fn test_growing_series_scores_full_trend_factor() {
        let record = FinancialRecord {
            three_year_operating_cash_flows: [100.0, 200.0, 300.0],
            ..FinancialRecord::default()
        };
        let r = run(&record);
        assert_eq!(r.factors[1].points, 25.0);
        assert_eq!(r.factors[1].weight, 25.0);
    }

    #[test]
    fn test_inventory_days_stability() {
        assert!(inventory_days_stable_or_down(f64::INFINITY, f64::INFINITY));
        assert!(inventory_days_stable_or_down(40.0, f64::INFINITY));
        assert!(inventory_days_stable_or_down(40.0, 40.0));
        assert!(!inventory_days_stable_or_down(f64::INFINITY, 40.0));
        assert!(!inventory_days_stable_or_down(50.0, 40.0));
    }

    #[test]
    fn test_ample_liquidity() {
        let record = FinancialRecord {
            current_assets: 700.0,
            inventory: 100.0,
            current_liabilities: 200.0,
            operating_cash_flow: 600.0,
            interest_expense: 100.0,
            cash_and_equivalents: 400.0,
            short_term_borrowing: 100.0,
            cost_of_goods_sold: 1200.0,
            prev_year_inventory_turnover_rate: 10.0,
            three_year_operating_cash_flows: [400.0, 500.0, 600.0],
            ..FinancialRecord::default()
        };
        let r = run(&record);
        assert!(r.details.iter().all(|d| d.passed), "{:?}", r.details);
        assert!(r.conclusion.starts_with("Short-term liquidity is ample"));
        // cash 4x 25, trend 25, current 3.5 15, inventory 15, cover 6 10, quick 3 10
        assert_eq!(r.score, 100.0);
    }

    #[test]
    fn test_relies_on_inventory() {
        let record = FinancialRecord {
            current_assets: 500.0,
            inventory: 400.0,
            current_liabilities: 200.0,
            operating_cash_flow: 50.0,
            ..FinancialRecord::default()
        };
        let r = run(&record);
        assert_eq!(r.passed(0), Some(true));
        assert_eq!(r.passed(1), Some(false));
        assert!(r.conclusion.starts_with("Liquidity may depend on selling inventory"));
    }

    #[test]
    fn test_no_borrowing_or_interest_is_infinite_cover() {
        let r = run(&FinancialRecord::default());
        assert_eq!(r.factors[0].value, f64::INFINITY);
        assert_eq!(r.factors[0].points, 25.0);
        assert_eq!(r.factors[4].value, f64::INFINITY);
        assert_eq!(r.factors[4].points, 10.0);
        assert_eq!(r.passed(4), Some(true));
        assert_eq!(r.passed(5), Some(true));
        assert_eq!(r.passed(2), Some(false));
    }
}
