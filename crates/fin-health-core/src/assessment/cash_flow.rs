//! Cash flow: size and quality of operating and free cash flow, and what
//! the investing and financing flows say about the company's stage.

use super::{AnalysisContext, AssessmentResult, ModuleKind};
use crate::locale::Text;
use crate::ratios::safe_div;
use crate::scoring::{
    details, select_conclusion, total_score, Bracket, Excluded, Factor, Included, Rule, Scale,
    Unbounded,
};

// ---------------------------------------------------------------------------
// Factors
// ---------------------------------------------------------------------------

const OPERATING_CASH_FLOW_BANDS: &[Bracket] = &[
    Bracket::new(Excluded(5_000_000.0), Unbounded, 30.0),
    Bracket::new(Included(2_000_000.0), Included(5_000_000.0), 21.0),
    Bracket::new(Included(500_000.0), Excluded(2_000_000.0), 12.0),
    Bracket::new(Included(0.0), Excluded(500_000.0), 7.5),
    Bracket::otherwise(0.0),
];

const FREE_CASH_FLOW_BANDS: &[Bracket] = &[
    Bracket::new(Excluded(3_000_000.0), Unbounded, 25.0),
    Bracket::new(Included(1_000_000.0), Included(3_000_000.0), 17.5),
    Bracket::new(Included(500_000.0), Excluded(1_000_000.0), 10.0),
    Bracket::new(Included(-500_000.0), Excluded(500_000.0), 6.25),
    Bracket::otherwise(0.0),
];

const OCF_TO_NET_PROFIT_BANDS: &[Bracket] = &[
    Bracket::new(Included(1.5), Unbounded, 20.0),
    Bracket::new(Included(1.0), Excluded(1.5), 14.0),
    Bracket::new(Included(0.7), Excluded(1.0), 8.0),
    Bracket::new(Included(0.3), Excluded(0.7), 5.0),
    Bracket::otherwise(0.0),
];

/// Negative (cash out) but at most half of operating cash flow is best.
const INVESTING_TO_OCF_BANDS: &[Bracket] = &[
    Bracket::new(Included(-0.5), Excluded(0.0), 15.0),
    Bracket::new(Unbounded, Excluded(-0.5), 7.5),
    Bracket::otherwise(0.0),
];

const FINANCING_TO_OCF_BANDS: &[Bracket] = &[
    Bracket::new(Included(-0.3), Included(0.3), 10.0),
    Bracket::new(Excluded(0.3), Included(1.0), 8.0),
    Bracket::new(Included(-1.0), Excluded(-0.3), 7.0),
    Bracket::new(Excluded(1.0), Unbounded, 4.0),
    Bracket::otherwise(3.0),
];

const OPERATING_CASH_FLOW: Factor = Factor {
    name: Text::new("Operating cash flow", "營業活動現金流"),
    weight: 30.0,
    scale: Scale::Brackets(OPERATING_CASH_FLOW_BANDS),
};

const FREE_CASH_FLOW: Factor = Factor {
    name: Text::new("Free cash flow", "自由現金流"),
    weight: 25.0,
    scale: Scale::Brackets(FREE_CASH_FLOW_BANDS),
};

const OCF_TO_NET_PROFIT: Factor = Factor {
    name: Text::new("Operating cash flow / net profit", "營業現金流 / 淨利"),
    weight: 20.0,
    scale: Scale::Brackets(OCF_TO_NET_PROFIT_BANDS),
};

const INVESTING_TO_OCF: Factor = Factor {
    name: Text::new("Investing / operating cash flow", "投資現金流 / 營業現金流"),
    weight: 15.0,
    scale: Scale::Brackets(INVESTING_TO_OCF_BANDS),
};

const FINANCING_TO_OCF: Factor = Factor {
    name: Text::new("Financing / operating cash flow", "融資現金流 / 營業現金流"),
    weight: 10.0,
    scale: Scale::Brackets(FINANCING_TO_OCF_BANDS),
};

// ---------------------------------------------------------------------------
// Flags and conclusions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flags {
    ocf_positive: bool,
    fcf_positive: bool,
    ocf_above_profit: bool,
    investing_out: bool,
    financing_out: bool,
}

impl Flags {
    fn checks(&self) -> [(Text, bool); 5] {
        [
            (
                Text::new("Operating cash flow positive?", "營業現金流為正?"),
                self.ocf_positive,
            ),
            (Text::new("Free cash flow positive?", "自由現金流為正?"), self.fcf_positive),
            (
                Text::new("Operating cash flow > net profit?", "營業現金流 > 淨利?"),
                self.ocf_above_profit,
            ),
            (
                Text::new("Investing cash flow negative?", "投資現金流為負?"),
                self.investing_out,
            ),
            (
                Text::new("Financing cash flow negative?", "融資現金流為負?"),
                self.financing_out,
            ),
        ]
    }
}

fn rules() -> [Rule<Flags>; 9] {
    [
        Rule::new(
            |f: &Flags| {
                f.ocf_positive
                    && f.fcf_positive
                    && f.ocf_above_profit
                    && f.investing_out
                    && f.financing_out
            },
            Text::new(
                "The company generates cash, invests and can repay debt. Cash flow is excellent across the board and finances are healthy.",
                "公司有現金、投資、及有還債能力。現金流狀況極佳，各項指標表現優異，財務健康。",
            ),
        ),
        Rule::new(
            |f: &Flags| {
                f.ocf_positive
                    && !f.ocf_above_profit
                    && f.investing_out
                    && !f.financing_out
                    && !f.fcf_positive
            },
            Text::new(
                "Heavy investment under way in expectation of future returns. This is a cash-burning investment phase; watch the eventual returns.",
                "大量進行投資中，期望未來會有回報。此為投資燒錢階段，需關注未來回報情況。",
            ),
        ),
        Rule::new(
            |f: &Flags| {
                !f.ocf_positive
                    && !f.ocf_above_profit
                    && f.investing_out
                    && !f.financing_out
                    && !f.fcf_positive
            },
            Text::new(
                "Negative operating inflow while burning cash on investment: high risk. Cash flow is very poor; beware of a funding gap.",
                "現金流入為負、投資燒錢，風險高。公司現金流狀況非常不佳，需警惕資金斷裂風險。",
            ),
        ),
        Rule::new(
            |f: &Flags| {
                f.ocf_positive
                    && f.ocf_above_profit
                    && !f.investing_out
                    && f.financing_out
                    && f.fcf_positive
            },
            Text::new(
                "Stable income with no further need to borrow; the company can start making money. Cash flow is solid and self-funding.",
                "有穩定收入了，不再缺錢或借貸，可以開始賺錢了。公司現金流穩健，具備自我造血能力。",
            ),
        ),
        Rule::new(
            |f: &Flags| !f.ocf_positive,
            Text::new(
                "Operating cash flow is negative; even if other indicators look acceptable, this may hide profit-quality problems.",
                "營業現金流為負，即使其他指標尚可，也可能隱藏獲利品質問題。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.ocf_positive && !f.fcf_positive,
            Text::new(
                "Operating cash flow is positive but free cash flow is negative: investment or operations consume a lot of cash; watch for funding pressure.",
                "營業現金流為正但自由現金流為負，現金在投資或營運上消耗較大，需警惕資金壓力。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.ocf_positive && f.fcf_positive && !f.ocf_above_profit,
            Text::new(
                "Operating and free cash flow are positive but not clearly above net profit; cash content of earnings could improve.",
                "營業現金流為正且自由現金流為正，但未顯著大於淨利，獲利含金量有待提高。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.ocf_positive && f.fcf_positive && f.ocf_above_profit && !f.investing_out,
            Text::new(
                "Most indicators are good, but investing cash flow is not negative, suggesting little investment activity or capital expenditure.",
                "多數指標良好，但投資現金流不是負值，可能表示投資活動不夠積極或沒有大量資本支出。",
            ),
        ),
        Rule::new(
            |f: &Flags| {
                f.ocf_positive
                    && f.fcf_positive
                    && f.ocf_above_profit
                    && f.investing_out
                    && !f.financing_out
            },
            Text::new(
                "Operating and investing cash flows look good, but financing cash flow is not negative: the company may still rely on external funding or face repayment pressure.",
                "營運與投資現金流表現良好，但融資現金流不是負值，可能意味公司仍在依賴外部融資或有償還外部借款壓力。",
            ),
        ),
    ]
}

const FALLBACK: Text = Text::new(
    "Overall cash flow position requires further case-by-case analysis of the figures.",
    "現金流狀況綜合判斷，需根據具體數據進一步分析。",
);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn assess_cash_flow(ctx: &AnalysisContext<'_>) -> AssessmentResult {
    let r = ctx.record;
    let ocf = r.operating_cash_flow;
    let fcf = ctx.ratios.free_cash_flow;
    let ocf_to_np = safe_div(ocf, r.net_profit_after_tax);
    let investing_to_ocf = safe_div(r.investing_cash_flow, ocf);
    let financing_to_ocf = ctx.ratios.financing_to_operating_cash_flow_ratio;

    let flags = Flags {
        ocf_positive: ocf > 0.0,
        fcf_positive: fcf > 0.0,
        ocf_above_profit: ocf_to_np > 1.0,
        investing_out: r.investing_cash_flow < 0.0,
        financing_out: r.financing_cash_flow < 0.0,
    };

    let factors = vec![
        OPERATING_CASH_FLOW.score(ocf, ctx.locale),
        FREE_CASH_FLOW.score(fcf, ctx.locale),
        OCF_TO_NET_PROFIT.score(ocf_to_np, ctx.locale),
        INVESTING_TO_OCF.score(investing_to_ocf, ctx.locale),
        FINANCING_TO_OCF.score(financing_to_ocf, ctx.locale),
    ];

    AssessmentResult {
        module: ModuleKind::CashFlow,
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
