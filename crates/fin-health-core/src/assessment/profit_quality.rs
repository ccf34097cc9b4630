//! Profit quality: is reported profit backed by cash, collected promptly,
//! recurring and growing?
//!
//! Weights: profit cash content 30, receivable days 30, non-recurring share
//! 15, net profit growth 25.

use super::{AnalysisContext, AssessmentResult, ModuleKind};
use crate::locale::Text;
use crate::ratios::safe_div;
use crate::scoring::{
    details, flag, select_conclusion, total_score, Bracket, Excluded, Factor, Included, Rule,
    Scale, Unbounded,
};

// ---------------------------------------------------------------------------
// Factors
// ---------------------------------------------------------------------------

const PROFIT_CASH_CONTENT_BANDS: &[Bracket] = &[
    Bracket::new(Included(1.0), Unbounded, 30.0),
    Bracket::new(Included(0.8), Excluded(1.0), 24.0),
    Bracket::new(Included(0.7), Excluded(0.8), 21.0),
    Bracket::new(Included(0.5), Excluded(0.7), 16.5),
    Bracket::new(Included(0.35), Excluded(0.5), 9.0),
    Bracket::new(Included(0.0), Excluded(0.35), 6.0),
    Bracket::otherwise(3.0),
];

/// Contiguous bands; whole-day cut-offs leave no gap at 20-21, 45-46 or 90-91 days.
const RECEIVABLE_DAYS_BANDS: &[Bracket] = &[
    Bracket::new(Unbounded, Included(20.0), 30.0),
    Bracket::new(Excluded(20.0), Included(45.0), 24.0),
    Bracket::new(Excluded(45.0), Included(90.0), 18.0),
    Bracket::new(Excluded(90.0), Included(140.0), 12.0),
    Bracket::otherwise(3.0),
];

const NET_PROFIT_GROWTH_BANDS: &[Bracket] = &[
    Bracket::new(Included(0.70), Unbounded, 25.0),
    Bracket::new(Included(0.30), Excluded(0.70), 20.0),
    Bracket::new(Included(0.0), Excluded(0.30), 15.0),
    Bracket::otherwise(10.0),
];

const PROFIT_CASH_CONTENT: Factor = Factor {
    name: Text::new("Profit cash content", "獲利含金量"),
    weight: 30.0,
    scale: Scale::Brackets(PROFIT_CASH_CONTENT_BANDS),
};

const RECEIVABLE_DAYS: Factor = Factor {
    name: Text::new("Receivable turnover days", "應收帳款周轉天數"),
    weight: 30.0,
    scale: Scale::Brackets(RECEIVABLE_DAYS_BANDS),
};

const NON_RECURRING_SHARE: Factor = Factor {
    name: Text::new("Non-recurring share <= 10%", "非經常性損益佔比 <= 10%"),
    weight: 15.0,
    scale: Scale::Binary {
        pass: 15.0,
        fail: 7.5,
    },
};

const NET_PROFIT_GROWTH: Factor = Factor {
    name: Text::new("Net profit growth", "淨利成長率"),
    weight: 25.0,
    scale: Scale::Brackets(NET_PROFIT_GROWTH_BANDS),
};

pub const NON_RECURRING_LIMIT: f64 = 0.10;
pub const RECEIVABLE_DAYS_LIMIT: f64 = 45.0;

// ---------------------------------------------------------------------------
// Flags and conclusions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flags {
    cash_backed: bool,
    collects_fast: bool,
    recurring: bool,
    growing: bool,
}

impl Flags {
    fn checks(&self) -> [(Text, bool); 4] {
        [
            (Text::new("Profit cash content >= 100%?", "獲利含金量 >= 100%?"), self.cash_backed),
            (
                Text::new("Receivable turnover days <= 45?", "應收帳款周轉天數 <= 45天?"),
                self.collects_fast,
            ),
            (
                Text::new("Non-recurring share <= 10%?", "非經常性損益佔比 <= 10%?"),
                self.recurring,
            ),
            (Text::new("Net profit growth > 0%?", "淨利成長率 > 0%?"), self.growing),
        ]
    }
}

fn rules() -> [Rule<Flags>; 5] {
    [
        Rule::new(
            |f: &Flags| f.cash_backed && f.collects_fast && f.recurring && f.growing,
            Text::new(
                "Excellent profit quality. Earnings are strong and stable, cash flow is healthy and receivables are managed efficiently.",
                "獲利品質極佳。公司盈利能力強勁且穩定，現金流健康，應收帳款管理高效。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.cash_backed && f.collects_fast && f.recurring && !f.growing,
            Text::new(
                "Good profit quality but weak growth momentum. Earnings quality is high, yet net profit is not growing; watch for market changes.",
                "獲利品質良好但成長動能不足。盈利質量高，但淨利潤未能持續增長，需關注市場變化。",
            ),
        ),
        Rule::new(
            |f: &Flags| !f.cash_backed && f.collects_fast && f.recurring && f.growing,
            Text::new(
                "Profit quality needs improvement. Net profit grows strongly and receivables are well managed, but cash content is low; beware of inflated profit.",
                "獲利品質有待提升。淨利潤增長強勁且應收帳款管理良好，但獲利含金量不足，需警惕利潤虛增。",
            ),
        ),
        Rule::new(
            |f: &Flags| !f.collects_fast && f.recurring,
            Text::new(
                "Profit quality is questionable: slow collection of receivables is the main problem and may hurt cash flow.",
                "獲利品質存在疑慮，應收帳款回款慢是主要問題，可能影響現金流。",
            ),
        ),
        Rule::new(
            |f: &Flags| !f.recurring,
            Text::new(
                "Profit quality is unstable: non-recurring items are a large share of profit and may mask core business performance.",
                "獲利品質不穩定，非經常性損益佔比較高，可能掩蓋核心業務的真實表現。",
            ),
        ),
    ]
}

const FALLBACK: Text = Text::new(
    "Overall profit quality requires further case-by-case analysis of the figures.",
    "獲利品質綜合判斷，需根據具體數據進一步分析。",
);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// `|non_recurring_gain_loss| / total_profit`, 0 without a profit base.
pub fn non_recurring_ratio(non_recurring_gain_loss: f64, total_profit: f64) -> f64 {
    safe_div(non_recurring_gain_loss.abs(), total_profit)
}

pub fn assess_profit_quality(ctx: &AnalysisContext<'_>) -> AssessmentResult {
    let ratios = ctx.ratios;
    let pcc = ratios.profit_cash_content;
    let ar_days = ratios.accounts_receivable_turnover_days;
    let nr_ratio = non_recurring_ratio(ctx.record.non_recurring_gain_loss, ctx.record.total_profit);
    let growth = ratios.net_profit_growth_rate;

    let flags = Flags {
        cash_backed: pcc >= 1.0,
        collects_fast: ar_days <= RECEIVABLE_DAYS_LIMIT,
        recurring: nr_ratio <= NON_RECURRING_LIMIT,
        growing: growth > 0.0,
    };

    let factors = vec![
        PROFIT_CASH_CONTENT.score(pcc, ctx.locale),
        RECEIVABLE_DAYS.score(ar_days, ctx.locale),
        NON_RECURRING_SHARE.score(flag(flags.recurring), ctx.locale),
        NET_PROFIT_GROWTH.score(growth, ctx.locale),
    ];

    AssessmentResult {
        module: ModuleKind::ProfitQuality,
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
        assess_profit_quality(&AnalysisContext::new(record, &ratios, Locale::En))
    }

    fn healthy() -> FinancialRecord {
        FinancialRecord {
            operating_revenue: 1_000_000.0,
            accounts_receivable: 50_000.0,
            net_profit_after_tax: 100_000.0,
            prev_year_net_profit_after_tax: 50_000.0,
            operating_cash_flow: 120_000.0,
            non_recurring_gain_loss: 5_000.0,
            total_profit: 100_000.0,
            ..FinancialRecord::default()
        }
    }

    #[test]
    fn test_excellent_profile_scores_full_marks() {
        let r = run(&healthy());
        // pcc 1.2 -> 30, ar days 18.25 -> 30, nr 5% -> 15, growth 100% -> 25
        assert_eq!(r.score, 100.0);
        assert!(r.details.iter().all(|d| d.passed));
        assert!(r.conclusion.starts_with("Excellent profit quality"));
    }

    #[test]
    fn test_receivable_day_bands_are_contiguous() {
        let bands = |days: f64| RECEIVABLE_DAYS.scale.points(days);
        assert_eq!(bands(20.0), 30.0);
        assert_eq!(bands(20.5), 24.0);
        assert_eq!(bands(45.0), 24.0);
        assert_eq!(bands(45.5), 18.0);
        assert_eq!(bands(90.5), 12.0);
        assert_eq!(bands(140.5), 3.0);
        assert_eq!(bands(f64::INFINITY), 3.0);
    }

    #[test]
    fn test_no_growth_rule() {
        let mut record = healthy();
        record.prev_year_net_profit_after_tax = 100_000.0;
        let r = run(&record);
        assert_eq!(r.passed(3), Some(false));
        assert!(r.conclusion.starts_with("Good profit quality but weak growth"));
        // growth 0 -> 15
        assert_eq!(r.score, 90.0);
    }

    #[test]
    fn test_high_non_recurring_share() {
        let mut record = healthy();
        record.non_recurring_gain_loss = -30_000.0;
        let r = run(&record);
        assert_eq!(r.passed(2), Some(false));
        assert!(r.conclusion.starts_with("Profit quality is unstable"));
        assert_eq!(r.factors[2].points, 7.5);
    }

    #[test]
    fn test_empty_record_is_zero_leaning() {
        let r = run(&FinancialRecord::default());
        // pcc 0 -> 6, ar days inf -> 3, nr 0 -> 15, growth 0 -> 15
        assert_eq!(r.score, 39.0);
        assert_eq!(r.details.len(), 4);
    }

    #[test]
    fn test_non_recurring_ratio_guarded() {
        assert_eq!(non_recurring_ratio(500.0, 0.0), 0.0);
        assert_eq!(non_recurring_ratio(-500.0, 1000.0), 0.5);
    }

    #[test]
    fn test_localized_output() {
        let record = healthy();
        let ratios = compute_ratios(&record);
        let r = assess_profit_quality(&AnalysisContext::new(&record, &ratios, Locale::ZhTw));
        assert_eq!(r.details[0].question, "獲利含金量 >= 100%?");
        assert_eq!(r.details[0].answer, "是");
        assert!(r.conclusion.starts_with("獲利品質極佳"));
    }
}
