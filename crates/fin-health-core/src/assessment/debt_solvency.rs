//! Debt and solvency: leverage, interest coverage, and whether borrowed
//! money earns more than it costs.

use super::{AnalysisContext, AssessmentResult, ModuleKind};
use crate::locale::Text;
use crate::scoring::{
    details, flag, select_conclusion, total_score, Bracket, Excluded, Factor, Included, Rule,
    Scale, Unbounded,
};

// ---------------------------------------------------------------------------
// Factors
// ---------------------------------------------------------------------------

const INTEREST_COVERAGE_BANDS: &[Bracket] = &[
    Bracket::new(Excluded(5.0), Unbounded, 25.0),
    Bracket::new(Included(3.0), Included(5.0), 20.0),
    Bracket::new(Included(1.0), Excluded(3.0), 10.0),
    Bracket::otherwise(0.0),
];

const DEBT_RATIO_BANDS: &[Bracket] = &[
    Bracket::new(Unbounded, Excluded(0.3), 20.0),
    Bracket::new(Included(0.3), Excluded(0.5), 15.0),
    Bracket::new(Included(0.5), Excluded(0.7), 10.0),
    Bracket::new(Included(0.7), Excluded(0.9), 5.0),
    Bracket::otherwise(0.0),
];

const FINANCIAL_EXPENSE_BANDS: &[Bracket] = &[
    Bracket::new(Unbounded, Excluded(0.01), 15.0),
    Bracket::new(Included(0.01), Excluded(0.03), 10.0),
    Bracket::new(Included(0.03), Excluded(0.05), 5.0),
    Bracket::otherwise(0.0),
];

const INTEREST_COVERAGE: Factor = Factor {
    name: Text::new("Interest coverage", "利息保障倍數"),
    weight: 25.0,
    scale: Scale::Brackets(INTEREST_COVERAGE_BANDS),
};

const ROA_OVER_COST_OF_DEBT: Factor = Factor {
    name: Text::new("ROA above cost of debt", "ROA 高於負債利率"),
    weight: 20.0,
    scale: Scale::Binary {
        pass: 20.0,
        fail: 0.0,
    },
};

const FCF_COVERS_DIVIDENDS: Factor = Factor {
    name: Text::new("Free cash flow covers dividends", "自由現金流足以支付股利"),
    weight: 20.0,
    scale: Scale::Binary {
        pass: 20.0,
        fail: 0.0,
    },
};

const DEBT_RATIO: Factor = Factor {
    name: Text::new("Debt ratio", "負債比率"),
    weight: 20.0,
    scale: Scale::Brackets(DEBT_RATIO_BANDS),
};

const FINANCIAL_EXPENSE: Factor = Factor {
    name: Text::new("Financial expense / revenue", "財務費用佔營收比例"),
    weight: 15.0,
    scale: Scale::Brackets(FINANCIAL_EXPENSE_BANDS),
};

pub const HIGH_DEBT_RATIO: f64 = 0.50;
pub const HIGH_FINANCIAL_EXPENSE: f64 = 0.05;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Dividends are covered when FCF reaches them, or when nothing is paid and
/// FCF is not negative.
pub fn fcf_covers_dividends(free_cash_flow: f64, dividends: f64) -> bool {
    (free_cash_flow >= dividends && dividends > 0.0) || (dividends == 0.0 && free_cash_flow >= 0.0)
}

/// With no stated borrowing cost, ROA always clears it.
pub fn roa_above_cost_of_debt(roa: f64, cost_of_debt: f64) -> bool {
    cost_of_debt == 0.0 || roa > cost_of_debt
}

// ---------------------------------------------------------------------------
// Flags and conclusions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flags {
    coverage_ok: bool,
    roa_above_cost: bool,
    dividends_covered: bool,
    debt_high: bool,
    expense_high: bool,
    debt_increased: bool,
}

impl Flags {
    fn checks(&self) -> [(Text, bool); 6] {
        [
            (Text::new("Interest coverage > 3?", "利息保障倍數 > 3?"), self.coverage_ok),
            (Text::new("ROA > cost of debt?", "ROA > 負債利率?"), self.roa_above_cost),
            (
                Text::new(
                    "Free cash flow sufficient for dividends?",
                    "自由現金流足以支付股利?",
                ),
                self.dividends_covered,
            ),
            (Text::new("Debt ratio > 50%?", "負債比率 > 50%?"), self.debt_high),
            (
                Text::new("Financial expense > 5% of revenue?", "財務費用佔營收比例 > 5%?"),
                self.expense_high,
            ),
            (
                Text::new("Debt ratio up on last year?", "負債比率較去年上升?"),
                self.debt_increased,
            ),
        ]
    }
}

fn rules() -> [Rule<Flags>; 9] {
    [
        Rule::new(
            |f: &Flags| f.coverage_ok && !f.debt_high,
            Text::new(
                "Low debt, earnings comfortably service it and capital is used efficiently. The financial structure is sound and solvency strong.",
                "負債少、賺錢亦夠還債，用錢有效率。公司財務結構穩健，償債能力強勁。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.coverage_ok && f.debt_high,
            Text::new(
                "Debt is high but current earnings cover the interest; watch interest-rate risk. Leverage is heavy, though solvency is not yet a problem.",
                "雖負債高，但當前獲利足以支撐利息，需關注未來利率變動風險。公司槓桿運用較高，但償債能力暫無問題。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.debt_high && !f.dividends_covered,
            Text::new(
                "High debt with weak cash generation; new borrowing may be needed to repay old debt and financial risk is rising. Funding pressure is heavy and solvency is a concern.",
                "高負債下現金生成不足，可能需借新還舊，財務風險升高。公司資金壓力較大，償債能力堪憂。",
            ),
        ),
        Rule::new(
            |f: &Flags| {
                !f.coverage_ok
                    && !f.roa_above_cost
                    && !f.dividends_covered
                    && !f.debt_high
                    && !f.expense_high
            },
            Text::new(
                "Low debt and strong solvency, but possibly too conservative, missing the benefit of leverage. Finances are stable though growth potential may be limited.",
                "低負債且償債能力強，但可能過度保守，錯失槓桿獲利機會。公司財務狀況穩健，但成長潛力可能受限。",
            ),
        ),
        Rule::new(
            |f: &Flags| !f.coverage_ok,
            Text::new(
                "Interest coverage is insufficient and repayment pressure is high. Debt and repayment capacity are weak.",
                "利息保障倍數不足，償債壓力大。負債與償還能力不佳。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.coverage_ok && !f.roa_above_cost,
            Text::new(
                "Interest is covered, but return on assets is below the borrowing rate, so debt costs more than the assets earn. Debt and repayment capacity are weak.",
                "雖然利息有保障，但資產報酬率低於負債利率，借款成本高於資產效益。負債與償還能力不佳。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.coverage_ok && f.roa_above_cost && !f.dividends_covered,
            Text::new(
                "Profitable with asset returns above the cost of debt, but free cash flow cannot cover dividends and liquidity may be tight. Debt and repayment capacity are weak.",
                "有能力賺錢且資產效益高於負債成本，但自由現金流不足以支付股利，資金周轉可能緊張。負債與償還能力不佳。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.coverage_ok && f.roa_above_cost && f.dividends_covered && f.debt_high,
            Text::new(
                "Most indicators are good, but the debt ratio is still above 50%, a high leverage risk. Debt and repayment capacity are weak.",
                "多數指標良好，但負債比率仍高於50%，存在較高槓桿風險。負債與償還能力不佳。",
            ),
        ),
        Rule::new(
            |f: &Flags| {
                f.coverage_ok
                    && f.roa_above_cost
                    && f.dividends_covered
                    && !f.debt_high
                    && f.expense_high
            },
            Text::new(
                "Solvency is strong and the debt ratio moderate, but financial expense is too high a share of revenue, showing inefficient use of leverage. Debt and repayment capacity are weak.",
                "償債能力強且負債比率不高，但財務費用佔營收比例過高，顯示財務槓桿使用效率不佳。負債與償還能力不佳。",
            ),
        ),
    ]
}

const FALLBACK: Text = Text::new(
    "Overall debt and solvency position requires further case-by-case analysis of the figures.",
    "負債與償債能力綜合判斷，需根據具體數據進一步分析。",
);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn assess_debt_solvency(ctx: &AnalysisContext<'_>) -> AssessmentResult {
    let r = ctx.record;
    let ratios = ctx.ratios;
    let prev_debt_ratio = r.prev_debt_ratio();

    let flags = Flags {
        coverage_ok: ratios.interest_coverage_ratio > 3.0,
        roa_above_cost: roa_above_cost_of_debt(ratios.roa, r.cost_of_debt_interest_rate),
        dividends_covered: fcf_covers_dividends(ratios.free_cash_flow, r.cash_dividends_paid),
        debt_high: ratios.debt_ratio > HIGH_DEBT_RATIO,
        expense_high: ratios.financial_expense_to_revenue_ratio > HIGH_FINANCIAL_EXPENSE,
        debt_increased: ratios.debt_ratio > prev_debt_ratio && prev_debt_ratio != 0.0,
    };

    let factors = vec![
        INTEREST_COVERAGE.score(ratios.interest_coverage_ratio, ctx.locale),
        ROA_OVER_COST_OF_DEBT.score(flag(flags.roa_above_cost), ctx.locale),
        FCF_COVERS_DIVIDENDS.score(flag(flags.dividends_covered), ctx.locale),
        DEBT_RATIO.score(ratios.debt_ratio, ctx.locale),
        FINANCIAL_EXPENSE.score(ratios.financial_expense_to_revenue_ratio, ctx.locale),
    ];

    AssessmentResult {
        module: ModuleKind::DebtSolvency,
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
