//! Investment and expansion: is capital spending funded sensibly and
//! earning more than peers?
//!
//! Five factors of 10 points each, so the score tops out at 50 rather than
//! 100. The module also grades the company as a whole from that score.

use super::{relative_change, AnalysisContext, AssessmentResult, ModuleKind};
use crate::locale::{Locale, Text};
use crate::ratios::safe_div;
use crate::scoring::{
    details, flag, select_conclusion, total_score, Bracket, Excluded, Factor, Included, Rule,
    Scale, Unbounded,
};
use crate::types::Points;

pub const MAX_POINTS: Points = 50.0;

// ---------------------------------------------------------------------------
// Factors
// ---------------------------------------------------------------------------

/// Free cash flow as a share of revenue.
const FCF_MARGIN_BANDS: &[Bracket] = &[
    Bracket::new(Excluded(0.3), Unbounded, 10.0),
    Bracket::new(Excluded(0.1), Included(0.3), 8.0),
    Bracket::new(Excluded(0.0), Included(0.1), 5.0),
    Bracket::otherwise(2.0),
];

const CAPEX_TO_OCF_BANDS: &[Bracket] = &[
    Bracket::new(Excluded(0.8), Unbounded, 10.0),
    Bracket::new(Excluded(0.5), Included(0.8), 8.0),
    Bracket::new(Excluded(0.2), Included(0.5), 5.0),
    Bracket::otherwise(2.0),
];

const ROE_GAP_BANDS: &[Bracket] = &[
    Bracket::new(Excluded(0.05), Unbounded, 10.0),
    Bracket::new(Excluded(0.02), Included(0.05), 8.0),
    Bracket::new(Included(-0.02), Included(0.02), 5.0),
    Bracket::otherwise(2.0),
];

/// Shared by net debt and debt ratio: falling is best.
const DEBT_CHANGE_BANDS: &[Bracket] = &[
    Bracket::new(Unbounded, Excluded(-0.05), 10.0),
    Bracket::new(Included(-0.05), Included(0.05), 8.0),
    Bracket::new(Excluded(0.05), Included(0.15), 5.0),
    Bracket::otherwise(2.0),
];

const FCF_MARGIN: Factor = Factor {
    name: Text::new("Free cash flow / revenue", "自由現金流狀態"),
    weight: 10.0,
    scale: Scale::Brackets(FCF_MARGIN_BANDS),
};

/// Used instead of [`FCF_MARGIN`] when there is no positive revenue.
const FCF_SIGN: Factor = Factor {
    name: Text::new("Free cash flow positive", "自由現金流為正"),
    weight: 10.0,
    scale: Scale::Binary {
        pass: 5.0,
        fail: 2.0,
    },
};

const CAPEX_TO_OCF: Factor = Factor {
    name: Text::new("Capex / operating cash flow", "資本支出 / 營業現金流"),
    weight: 10.0,
    scale: Scale::Brackets(CAPEX_TO_OCF_BANDS),
};

const ROE_GAP: Factor = Factor {
    name: Text::new("ROE above industry", "ROE 超過同業幅度"),
    weight: 10.0,
    scale: Scale::Brackets(ROE_GAP_BANDS),
};

const NET_DEBT_CHANGE: Factor = Factor {
    name: Text::new("Net debt change", "淨負債變動"),
    weight: 10.0,
    scale: Scale::Brackets(DEBT_CHANGE_BANDS),
};

const DEBT_RATIO_CHANGE: Factor = Factor {
    name: Text::new("Debt ratio change", "負債比率變化"),
    weight: 10.0,
    scale: Scale::Brackets(DEBT_CHANGE_BANDS),
};

pub const HIGH_CAPEX_SHARE: f64 = 0.5;

// ---------------------------------------------------------------------------
// Flags and conclusions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flags {
    capex_high: bool,
    roe_above_industry: bool,
    debt_ratio_up: bool,
    fcf_positive: bool,
    net_debt_up: bool,
}

impl Flags {
    fn checks(&self) -> [(Text, bool); 5] {
        [
            (
                Text::new(
                    "Capex > 50% of operating cash flow?",
                    "資本支出佔營業現金流比例 > 50%?",
                ),
                self.capex_high,
            ),
            (Text::new("ROE > industry average?", "ROE > 同業平均?"), self.roe_above_industry),
            (
                Text::new("Debt ratio up on last year?", "負債比率較去年上升?"),
                self.debt_ratio_up,
            ),
            (Text::new("Free cash flow positive?", "自由現金流為正?"), self.fcf_positive),
            (Text::new("Net debt increased?", "淨負債增加?"), self.net_debt_up),
        ]
    }
}

const NEGATIVE_FCF_LEAD: Text = Text::new(
    "Free cash flow is negative: whatever else holds, the company faces short-term funding pressure and expansion or investment is unlikely.",
    "自由現金流為負數，不論其他條件，公司短期內都面臨資金壓力，擴張與投資的可能性偏低。",
);

/// Follow-up sentences after [`NEGATIVE_FCF_LEAD`]; none may apply.
fn negative_fcf_rules() -> [Rule<Flags>; 3] {
    [
        Rule::new(
            |f: &Flags| f.capex_high && f.roe_above_industry && !f.debt_ratio_up && !f.net_debt_up,
            Text::new(
                "However, heavy capex is earning high returns without a marked rise in debt; leverage and capex are growing together and both efficiency and returns stand out, the mark of a growth company that deploys capital well.",
                "然而，高資本支出帶來高回報且負債未顯著增加，顯示財務槓桿與資本支出同步提升，營運效率與投資回報皆表現亮眼，屬於具備良好資金運用能力的成長企業。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.capex_high && !f.roe_above_industry,
            Text::new(
                "Despite heavy capex, ROE does not beat peers; the investment has not paid off, suggesting over-expansion or low project returns.",
                "儘管高資本支出，但ROE未優於同業，投資效益未顯現，可能過度擴張或專案報酬率低。",
            ),
        ),
        Rule::new(
            |f: &Flags| {
                !f.capex_high && !f.roe_above_industry && !f.debt_ratio_up && !f.net_debt_up
            },
            Text::new(
                "Neither spending nor earning: the company is too conservative or has lost its growth momentum.",
                "沒在花錢也沒賺錢，公司太保守或已無成長動能。",
            ),
        ),
    ]
}

fn positive_fcf_rules() -> [Rule<Flags>; 4] {
    [
        Rule::new(
            |f: &Flags| f.capex_high && f.roe_above_industry,
            Text::new(
                "Heavy investment is bringing high returns and the expansion strategy works. The company is in an active and effective growth phase.",
                "高投資帶來高回報，擴張策略有效。公司處於積極且有效的成長階段。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.capex_high && !f.roe_above_industry,
            Text::new(
                "Investment has not paid off, suggesting over-expansion or low project returns. Project returns need careful review.",
                "投資效益未顯現，可能過度擴張或專案報酬率低。需審慎評估投資專案回報。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.debt_ratio_up,
            Text::new(
                "The debt ratio is up on last year; assess whether expansion leans too heavily on financing. The strategy may carry higher financial risk.",
                "負債比率較去年上升，需評估是否過度依賴融資支撐擴張。公司擴張策略可能伴隨較高財務風險。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.roe_above_industry && !f.capex_high,
            Text::new(
                "Little is invested and returns are ordinary, but there is no reckless expansion. Expansion is conservative with acceptable returns.",
                "投資花得少，回報普通但沒亂擴張。公司擴張保守，但投資回報尚可接受。",
            ),
        ),
    ]
}

const STEADY_EXPANSION: Text = Text::new(
    "Investment and expansion are sound: the company is growing while keeping its finances healthy.",
    "投資與擴張策略穩健，公司在成長的同時保持了健康的財務狀況。",
);

fn conclusion(flags: &Flags, locale: Locale) -> String {
    if flags.fcf_positive {
        return select_conclusion(&positive_fcf_rules(), flags, STEADY_EXPANSION)
            .get(locale)
            .to_string();
    }
    let lead = NEGATIVE_FCF_LEAD.get(locale);
    match negative_fcf_rules().iter().find(|rule| (rule.when)(flags)) {
        Some(rule) => format!("{lead} {}", rule.text.get(locale)),
        None => lead.to_string(),
    }
}

/// Company-level grade from the 50-point score.
pub fn overall_conclusion(score: Points) -> Text {
    if score >= 40.0 {
        Text::new(
            "Expanding actively with strong funding and returns: a quality expansion company.",
            "積極擴張且資金與回報俱佳，屬於「優質擴張企業」。",
        )
    } else if score >= 30.0 {
        Text::new(
            "Expanding steadily, with some indicators such as leverage or cash flow to monitor: a growth-stage company.",
            "穩健擴張中，部分指標如槓桿或現金流需持續觀察，屬於「成長型企業」。",
        )
    } else if score >= 20.0 {
        Text::new(
            "Expansion or returns are mediocre, or there is financial pressure; monitor carefully.",
            "擴張或回報力道普通，或存在財務壓力，需審慎觀察。",
        )
    } else {
        Text::new(
            "Low investment and expansion momentum, or excessive leverage risk; invest with caution.",
            "投資與擴張動能低，或槓桿風險過高，應審慎投資。",
        )
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn assess_investment_expansion(ctx: &AnalysisContext<'_>) -> AssessmentResult {
    let r = ctx.record;
    let ratios = ctx.ratios;
    let capex = r.capital_expenditures;
    let fcf = ratios.free_cash_flow;
    let capex_to_ocf = safe_div(capex, r.operating_cash_flow);
    let roe_gap = ratios.roe - r.industry_avg_roe;
    let net_debt_change = safe_div(ratios.net_debt - r.prev_net_debt, r.prev_net_debt.abs());
    let debt_ratio_change = relative_change(ratios.debt_ratio, r.prev_debt_ratio());

    let flags = Flags {
        capex_high: capex_to_ocf > HIGH_CAPEX_SHARE && capex > 0.0,
        roe_above_industry: roe_gap > 0.0,
        debt_ratio_up: debt_ratio_change > 0.0,
        fcf_positive: fcf > 0.0,
        net_debt_up: net_debt_change > 0.0,
    };

    let fcf_factor = if r.operating_revenue > 0.0 {
        FCF_MARGIN.score(fcf / r.operating_revenue, ctx.locale)
    } else {
        FCF_SIGN.score(flag(flags.fcf_positive), ctx.locale)
    };
    let factors = vec![
        fcf_factor,
        CAPEX_TO_OCF.score(capex_to_ocf, ctx.locale),
        ROE_GAP.score(roe_gap, ctx.locale),
        NET_DEBT_CHANGE.score(net_debt_change, ctx.locale),
        DEBT_RATIO_CHANGE.score(debt_ratio_change, ctx.locale),
    ];
    let score = total_score(&factors);

    AssessmentResult {
        module: ModuleKind::InvestmentExpansion,
        score,
        conclusion: conclusion(&flags, ctx.locale),
        details: details(&flags.checks(), ctx.locale),
        overall_conclusion: Some(overall_conclusion(score).get(ctx.locale).to_string()),
        factors,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
