//! Operational efficiency: year-over-year movement in turnover, margins
//! and working-capital growth relative to revenue and the industry.

use super::{relative_change, AnalysisContext, AssessmentResult, ModuleKind};
use crate::locale::Text;
use crate::scoring::{
    details, flag, select_conclusion, total_score, Bracket, Excluded, Factor, Included, Rule,
    Scale, Unbounded,
};

// ---------------------------------------------------------------------------
// Factors
// ---------------------------------------------------------------------------

const INVENTORY_TURNOVER_CHANGE_BANDS: &[Bracket] = &[
    Bracket::new(Excluded(0.10), Unbounded, 25.0),
    Bracket::new(Included(0.0), Included(0.10), 20.0),
    Bracket::new(Included(-0.10), Excluded(0.0), 10.0),
    Bracket::otherwise(0.0),
];

const RECEIVABLE_DAYS_CHANGE_BANDS: &[Bracket] = &[
    Bracket::new(Unbounded, Excluded(-0.10), 20.0),
    Bracket::new(Included(-0.10), Included(0.05), 15.0),
    Bracket::new(Excluded(0.05), Included(0.20), 5.0),
    Bracket::otherwise(0.0),
];

/// Inventory growth minus revenue growth.
const INVENTORY_GROWTH_GAP_BANDS: &[Bracket] = &[
    Bracket::new(Unbounded, Included(0.0), 20.0),
    Bracket::new(Excluded(0.0), Included(0.05), 10.0),
    Bracket::new(Excluded(0.05), Included(0.15), 5.0),
    Bracket::otherwise(0.0),
];

/// Absolute change in gross margin.
const GROSS_MARGIN_SWING_BANDS: &[Bracket] = &[
    Bracket::new(Unbounded, Included(0.03), 15.0),
    Bracket::new(Excluded(0.03), Included(0.05), 10.0),
    Bracket::new(Excluded(0.05), Included(0.10), 5.0),
    Bracket::otherwise(0.0),
];

/// Revenue growth minus industry average growth.
const REVENUE_VS_INDUSTRY_BANDS: &[Bracket] = &[
    Bracket::new(Excluded(0.02), Unbounded, 10.0),
    Bracket::new(Included(-0.02), Included(0.02), 7.0),
    Bracket::new(Included(-0.05), Excluded(-0.02), 3.0),
    Bracket::otherwise(0.0),
];

/// Receivables growth minus revenue growth.
const RECEIVABLE_GROWTH_GAP_BANDS: &[Bracket] = &[
    Bracket::new(Unbounded, Included(0.0), 5.0),
    Bracket::new(Excluded(0.0), Included(0.05), 3.0),
    Bracket::otherwise(0.0),
];

const INVENTORY_TURNOVER_CHANGE: Factor = Factor {
    name: Text::new("Inventory turnover change", "存貨周轉率變化"),
    weight: 25.0,
    scale: Scale::Brackets(INVENTORY_TURNOVER_CHANGE_BANDS),
};

const RECEIVABLE_DAYS_CHANGE: Factor = Factor {
    name: Text::new("Receivable days change", "應收帳款周轉天數變化"),
    weight: 20.0,
    scale: Scale::Brackets(RECEIVABLE_DAYS_CHANGE_BANDS),
};

const INVENTORY_GROWTH_GAP: Factor = Factor {
    name: Text::new("Inventory vs revenue growth", "營收與存貨成長同步性"),
    weight: 20.0,
    scale: Scale::Brackets(INVENTORY_GROWTH_GAP_BANDS),
};

const GROSS_MARGIN_SWING: Factor = Factor {
    name: Text::new("Gross margin stability", "毛利率穩定性"),
    weight: 15.0,
    scale: Scale::Brackets(GROSS_MARGIN_SWING_BANDS),
};

const REVENUE_VS_INDUSTRY: Factor = Factor {
    name: Text::new("Revenue growth vs industry", "營收成長 vs. 同業"),
    weight: 10.0,
    scale: Scale::Brackets(REVENUE_VS_INDUSTRY_BANDS),
};

const PAYABLE_DAYS_NORMAL: Factor = Factor {
    name: Text::new("Payable days without anomaly", "應付帳款天數無異常"),
    weight: 5.0,
    scale: Scale::Binary {
        pass: 5.0,
        fail: 0.0,
    },
};

const RECEIVABLE_GROWTH_GAP: Factor = Factor {
    name: Text::new("Receivables vs revenue growth", "營收與應收帳款成長同步"),
    weight: 5.0,
    scale: Scale::Brackets(RECEIVABLE_GROWTH_GAP_BANDS),
};

pub const STABLE_MARGIN_SWING: f64 = 0.03;
pub const NORMAL_PAYABLE_DAYS_SWING: f64 = 0.05;

// ---------------------------------------------------------------------------
// Flags and conclusions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flags {
    turnover_down: bool,
    margin_stable: bool,
    beats_industry: bool,
    receivable_days_ok: bool,
    payable_days_ok: bool,
    inventory_in_step: bool,
    receivables_in_step: bool,
}

impl Flags {
    fn checks(&self) -> [(Text, bool); 7] {
        [
            (Text::new("Inventory turnover down?", "存貨周轉率下降?"), self.turnover_down),
            (Text::new("Gross margin stable?", "毛利率維持穩定?"), self.margin_stable),
            (
                Text::new("Revenue growth > industry average?", "營收成長率 > 同業平均?"),
                self.beats_industry,
            ),
            (
                Text::new(
                    "Receivable turnover days stable or down?",
                    "應收帳款周轉天數穩定或下降?",
                ),
                self.receivable_days_ok,
            ),
            (
                Text::new("Payable days without obvious anomaly?", "應付帳款天數無明顯異常?"),
                self.payable_days_ok,
            ),
            (
                Text::new("Revenue and inventory growing in step?", "營收與存貨成長同步?"),
                self.inventory_in_step,
            ),
            (
                Text::new("Revenue and receivables growing in step?", "營收與應收帳款成長同步?"),
                self.receivables_in_step,
            ),
        ]
    }

    fn any(&self) -> bool {
        self.turnover_down
            || self.margin_stable
            || self.beats_industry
            || self.receivable_days_ok
            || self.payable_days_ok
            || self.inventory_in_step
            || self.receivables_in_step
    }
}

fn rules() -> [Rule<Flags>; 7] {
    [
        Rule::new(
            |f: &Flags| !f.turnover_down && f.margin_stable,
            Text::new(
                "Operational efficiency is good: gross margin is stable and inventory turns well, indicating healthy operations and profitability.",
                "營運效率良好，毛利穩定且存貨周轉情況不錯。這表示公司在營運和盈利能力上表現健康。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.turnover_down && !f.margin_stable,
            Text::new(
                "Operational efficiency is deteriorating: slowing inventory turnover and a volatile gross margin point to slow sales or price pressure. Beware of inventory write-downs and falling profitability.",
                "營運效率惡化，存貨周轉問題與毛利率波動並存，可能面臨滯銷或價格戰壓力。需警惕存貨跌價損失和盈利能力下降。",
            ),
        ),
        Rule::new(
            |f: &Flags| !f.turnover_down && f.receivable_days_ok,
            Text::new(
                "Inventory and receivables both turn over well and efficiency is high: cash comes back quickly and assets are used efficiently.",
                "存貨和應收帳款周轉都表現良好，營運效率較高。這顯示公司資金回籠快，資產利用效率高。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.turnover_down && f.payable_days_ok && !f.inventory_in_step,
            Text::new(
                "Inventory turnover is falling and inventory is outgrowing revenue; despite normal payable days, overall efficiency is poor and stock may be building up. Watch tied-up capital and operating risk.",
                "存貨周轉率下降、營收與存貨成長不同步，儘管應付帳款天數正常，但整體營運效率不佳，可能存在存貨積壓問題。需警惕資金占用和經營風險。",
            ),
        ),
        Rule::new(
            |f: &Flags| !f.receivable_days_ok && !f.beats_industry && f.margin_stable,
            Text::new(
                "Gross margin is stable and inventory turnover acceptable, but receivable turnover is worsening and revenue growth lags peers. Watch customer payment risk and market-share loss.",
                "毛利穩定且存貨周轉尚可，但應收帳款周轉惡化且營收成長不及同業。可能需提防客戶付款風險或市場份額流失。",
            ),
        ),
        Rule::new(
            |f: &Flags| f.beats_industry && f.turnover_down,
            Text::new(
                "Revenue is growing fast, but falling inventory turnover may signal blind expansion or inventory management problems. Watch the quality of growth.",
                "營收成長雖快，但存貨周轉率下降可能預示著盲目擴張或存貨管理問題。需警惕成長的質量。",
            ),
        ),
        Rule::new(
            |f: &Flags| !f.any(),
            Text::new(
                "Every efficiency indicator is poor; the company may face serious operating difficulties and funding pressure. Its strategy should be reviewed immediately.",
                "各項營運效率指標均表現不佳，可能面臨嚴重的經營困境和資金壓力。建議立即審視公司策略。",
            ),
        ),
    ]
}

const FALLBACK: Text = Text::new(
    "Overall operational efficiency requires further case-by-case analysis of the figures.",
    "營運效率綜合判斷，需根據具體數據進一步分析。",
);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn assess_operational_efficiency(ctx: &AnalysisContext<'_>) -> AssessmentResult {
    let r = ctx.record;
    let ratios = ctx.ratios;

    let turnover_change = relative_change(
        ratios.inventory_turnover_rate,
        r.prev_year_inventory_turnover_rate,
    );
    let receivable_days_change = relative_change(
        ratios.accounts_receivable_turnover_days,
        r.prev_year_accounts_receivable_turnover_days,
    );
    let margin_swing = (ratios.gross_profit_margin - r.prev_year_gross_profit_margin).abs();
    let revenue_growth = ratios.revenue_growth_rate;
    let inventory_growth = relative_change(r.inventory, r.prev_year_inventory);
    let receivables_growth = relative_change(r.accounts_receivable, r.prev_year_accounts_receivable);
    let payable_days_change =
        relative_change(r.accounts_payable_days, r.prev_year_accounts_payable_days);

    let flags = Flags {
        turnover_down: turnover_change < 0.0,
        margin_stable: margin_swing <= STABLE_MARGIN_SWING,
        beats_industry: revenue_growth > r.industry_avg_revenue_growth_rate,
        receivable_days_ok: receivable_days_change <= 0.0,
        payable_days_ok: payable_days_change.abs() <= NORMAL_PAYABLE_DAYS_SWING,
        inventory_in_step: inventory_growth <= revenue_growth,
        receivables_in_step: receivables_growth <= revenue_growth,
    };

    let factors = vec![
        INVENTORY_TURNOVER_CHANGE.score(turnover_change, ctx.locale),
        RECEIVABLE_DAYS_CHANGE.score(receivable_days_change, ctx.locale),
        INVENTORY_GROWTH_GAP.score(inventory_growth - revenue_growth, ctx.locale),
        GROSS_MARGIN_SWING.score(margin_swing, ctx.locale),
        REVENUE_VS_INDUSTRY.score(
            revenue_growth - r.industry_avg_revenue_growth_rate,
            ctx.locale,
        ),
        PAYABLE_DAYS_NORMAL.score(flag(flags.payable_days_ok), ctx.locale),
        RECEIVABLE_GROWTH_GAP.score(receivables_growth - revenue_growth, ctx.locale),
    ];

    AssessmentResult {
        module: ModuleKind::OperationalEfficiency,
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
        assess_operational_efficiency(&AnalysisContext::new(record, &ratios, Locale::En))
    }

    /// Revenue up 20%, inventory and receivables up 10%, turnover improving.
    fn improving() -> FinancialRecord {
        FinancialRecord {
            operating_revenue: 1200.0,
            prev_year_operating_revenue: 1000.0,
            cost_of_goods_sold: 720.0,
            prev_year_gross_profit_margin: 0.40,
            inventory: 110.0,
            prev_year_inventory: 100.0,
            prev_year_inventory_turnover_rate: 5.0,
            accounts_receivable: 110.0,
            prev_year_accounts_receivable: 100.0,
            prev_year_accounts_receivable_turnover_days: 40.0,
            industry_avg_revenue_growth_rate: 0.10,
            accounts_payable_days: 60.0,
            prev_year_accounts_payable_days: 60.0,
            ..FinancialRecord::default()
        }
    }

    #[test]
    fn test_improving_operations() {
        let r = run(&improving());
        // turnover 720 / 105 = 6.86 (+37%) -> 25; ar days 365 / (1200 / 105) = 31.9 (-20%) -> 20;
        // inventory gap -0.10 -> 20; margin swing 0 -> 15; vs industry +0.10 -> 10;
        // payables 5; receivables gap -0.10 -> 5
        assert_eq!(r.score, 100.0);
        assert_eq!(r.passed(0), Some(false));
        assert!(r.conclusion.starts_with("Operational efficiency is good"));
        assert_eq!(r.details.len(), 7);
    }

    #[test]
    fn test_deteriorating_operations() {
        let mut record = improving();
        record.prev_year_inventory_turnover_rate = 10.0;
        record.prev_year_gross_profit_margin = 0.55;
        let r = run(&record);
        assert_eq!(r.passed(0), Some(true));
        assert_eq!(r.passed(1), Some(false));
        assert!(r.conclusion.starts_with("Operational efficiency is deteriorating"));
        // turnover change -31% -> 0; margin swing 0.15 -> 0
        assert_eq!(r.factors[0].points, 0.0);
        assert_eq!(r.factors[3].points, 0.0);
    }

    #[test]
    fn test_missing_prior_payable_days_reads_as_no_change() {
        let mut record = improving();
        record.prev_year_accounts_payable_days = 0.0;
        let r = run(&record);
        assert_eq!(r.passed(4), Some(true));
        assert_eq!(r.factors[5].points, 5.0);
    }

    #[test]
    fn test_payable_days_jump_is_anomaly() {
        let mut record = improving();
        record.accounts_payable_days = 90.0;
        let r = run(&record);
        assert_eq!(r.passed(4), Some(false));
        assert_eq!(r.factors[5].points, 0.0);
    }

    #[test]
    fn test_no_prior_data_has_no_nan() {
        let r = run(&FinancialRecord::default());
        for f in &r.factors {
            assert!(!f.value.is_nan(), "{}", f.name);
        }
        // every change reads 0: 20 + 15 + 20 + 15 + 7 + 5 + 5
        assert_eq!(r.score, 87.0);
    }
}
