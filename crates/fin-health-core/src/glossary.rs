//! Plain-language definitions of every input field and derived ratio.

use serde::Serialize;

use crate::locale::{Locale, Text};
use crate::ratios::RatioName;
use crate::record::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub key: &'static str,
    pub label: Text,
    pub definition: Text,
}

/// An entry resolved to one locale, for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub definition: &'static str,
}

impl Entry {
    pub fn localized(&self, locale: Locale) -> LocalizedEntry {
        LocalizedEntry {
            key: self.key,
            label: self.label.get(locale),
            definition: self.definition.get(locale),
        }
    }
}

const fn entry(
    key: &'static str,
    label: (&'static str, &'static str),
    definition: (&'static str, &'static str),
) -> Entry {
    Entry {
        key,
        label: Text::new(label.0, label.1),
        definition: Text::new(definition.0, definition.1),
    }
}

const ENTRIES: &[Entry] = &[
    // -- Current period ----------------------------------------------------
    entry(
        "operating_revenue",
        ("Operating revenue", "營業收入"),
        (
            "Income from selling goods or services in the ordinary course of business; the core revenue of the company.",
            "指企業在日常經營活動中銷售商品或提供服務所獲得的收入，是公司本業的核心收入。",
        ),
    ),
    entry(
        "cost_of_goods_sold",
        ("Cost of goods sold", "銷貨成本"),
        (
            "Costs directly tied to the goods or services sold, such as materials, direct labour and manufacturing overhead.",
            "指銷售商品或提供服務直接相關的成本，如原材料、直接人工和製造費用。",
        ),
    ),
    entry(
        "operating_expenses",
        ("Operating expenses", "營業費用"),
        (
            "Costs of running the business that are not directly tied to production, such as selling, administrative and R&D expense.",
            "指企業在經營活動中發生的，與生產銷售不直接相關但維持企業運營所需的費用，如銷售費用、管理費用和研發費用。",
        ),
    ),
    entry(
        "net_profit_after_tax",
        ("Net profit after tax", "稅後淨利"),
        (
            "Profit attributable to shareholders after all costs, expenses and taxes; the bottom-line measure of profitability.",
            "指企業在扣除所有成本、費用和稅款後，最終歸屬於股東的利潤，是衡量公司盈利能力的最終指標。",
        ),
    ),
    entry(
        "shareholders_equity",
        ("Shareholders' equity", "股東權益"),
        (
            "Assets minus liabilities: the owners' stake, including share capital, capital surplus and retained earnings.",
            "指公司資產扣除負債後的淨值，代表股東在公司中的所有權。包括股本、資本公積、保留盈餘等。",
        ),
    ),
    entry(
        "total_assets",
        ("Total assets", "總資產"),
        (
            "Every resource the company owns, current and non-current; a key measure of size.",
            "指公司所擁有的一切資源，包括流動資產、非流動資產等，是衡量公司規模的重要指標。",
        ),
    ),
    entry(
        "current_assets",
        ("Current assets", "流動資產"),
        (
            "Assets expected to be realised or consumed within a year, such as cash, receivables and inventory.",
            "指預期在一年內可以變現或消耗掉的資產，如現金、應收帳款、存貨等。",
        ),
    ),
    entry(
        "current_liabilities",
        ("Current liabilities", "流動負債"),
        (
            "Obligations due within a year, such as short-term borrowing and accounts payable.",
            "指預期在一年內必須償還的債務，如短期借款、應付帳款等。",
        ),
    ),
    entry(
        "inventory",
        ("Inventory", "存貨"),
        (
            "Goods and materials held for sale or consumed in production.",
            "指公司持有以供銷售、生產過程中使用或將在生產過程中耗用的商品或材料。",
        ),
    ),
    entry(
        "accounts_receivable",
        ("Accounts receivable", "應收帳款"),
        (
            "Amounts owed by customers for goods or services already delivered.",
            "指公司因銷售商品或提供服務而應向客戶收取的款項。",
        ),
    ),
    entry(
        "interest_expense",
        ("Interest expense", "利息費用"),
        (
            "The cost of using borrowed money.",
            "指公司為使用借入資金而支付的成本。",
        ),
    ),
    entry(
        "net_profit_before_tax",
        ("Net profit before tax", "稅前淨利"),
        (
            "Profit after all costs and expenses except income tax.",
            "指公司在扣除所有成本和費用（不包括所得稅）後的利潤。",
        ),
    ),
    entry(
        "operating_cash_flow",
        ("Operating cash flow", "營業活動現金流"),
        (
            "Cash generated or consumed by day-to-day operations; positive means the core business brings in cash.",
            "指公司透過日常營運活動（銷售商品、提供服務）所產生或消耗的現金，正數表示本業能賺現金。",
        ),
    ),
    entry(
        "investing_cash_flow",
        ("Investing cash flow", "投資活動現金流"),
        (
            "Cash from buying or selling fixed assets and investments; negative usually means the company is expanding or investing.",
            "指公司透過投資活動（如購買或出售固定資產、投資其他公司）所產生或消耗的現金，負數通常表示公司在擴張或投資新項目。",
        ),
    ),
    entry(
        "financing_cash_flow",
        ("Financing cash flow", "籌資活動現金流"),
        (
            "Cash from issuing shares, borrowing, repaying debt and paying dividends.",
            "指公司透過籌資活動（如發行股票、借款、償還債務、發放股利）所產生或消耗的現金。",
        ),
    ),
    entry(
        "capital_expenditures",
        ("Capital expenditures", "資本支出"),
        (
            "Spending to buy, upgrade or maintain fixed assets such as plant and equipment; a major part of investing cash flow.",
            "指公司用於購買、升級或維護固定資產（如廠房、設備）所花的資金，是投資活動現金流的重要組成部分。",
        ),
    ),
    entry(
        "cash_dividends_paid",
        ("Cash dividends paid", "現金股利"),
        (
            "Cash distributed to shareholders, usually out of profit.",
            "公司向股東支付的現金分配，通常是從公司利潤中撥出。",
        ),
    ),
    entry(
        "non_recurring_gain_loss",
        ("Non-recurring gain/loss", "非經常性損益"),
        (
            "One-off gains or losses outside normal operations, such as asset disposals or litigation settlements. A large share undermines profit quality.",
            "指公司在正常經營活動之外發生的，不具持續性的損益，如出售資產的利得或損失、訴訟賠償等。過高可能影響獲利品質的穩定性。",
        ),
    ),
    entry(
        "total_profit",
        ("Total profit", "利潤總額"),
        (
            "Pre-tax or net profit, used here as the base for the non-recurring share.",
            "通常指稅前利潤或淨利潤，在此工具中主要用於計算非經常性損益佔比。",
        ),
    ),
    entry(
        "cash_and_equivalents",
        ("Cash and equivalents", "現金及約當現金"),
        (
            "Cash plus highly liquid short-term investments, typically maturing within three months.",
            "指公司持有的現金和可以迅速轉換為現金的資產，如短期、流動性高且容易變現的投資，這些投資到期日通常在三個月以內。",
        ),
    ),
    entry(
        "short_term_borrowing",
        ("Short-term borrowing", "短期借款"),
        (
            "Debt due within a year, usually taken on for working capital.",
            "指公司在一年內必須償還的債務，通常是為了滿足短期營運資金需求。",
        ),
    ),
    entry(
        "accounts_payable_days",
        ("Accounts payable days", "應付帳款天數"),
        (
            "Average days taken to pay suppliers. Longer means more use of supplier credit, but too long can strain supplier relations.",
            "衡量公司支付供應商款項的平均天數。天數越長表示公司利用供應商信用的能力越強，但過長可能影響供應商關係。",
        ),
    ),
    // -- Prior period ------------------------------------------------------
    entry(
        "prev_year_net_profit_after_tax",
        ("Prior-year net profit after tax", "去年稅後淨利"),
        (
            "Compared with this year's net profit to give the net profit growth rate.",
            "用於計算稅後淨利成長率，與本期稅後淨利比較，判斷盈利成長動能。",
        ),
    ),
    entry(
        "prev_year_operating_revenue",
        ("Prior-year operating revenue", "去年營業收入"),
        (
            "Compared with this year's revenue to give the revenue growth rate.",
            "用於計算營收成長率，與本期營業收入比較，判斷營收增長情況。",
        ),
    ),
    entry(
        "prev_year_inventory",
        ("Prior-year inventory", "去年存貨"),
        (
            "Opening inventory; averaged with the closing balance for turnover and used for inventory growth.",
            "期初存貨，與期末存貨平均後用於計算存貨周轉率，並用於計算存貨成長率。",
        ),
    ),
    entry(
        "prev_year_accounts_receivable",
        ("Prior-year accounts receivable", "去年應收帳款"),
        (
            "Opening receivables; averaged with the closing balance for turnover and used for receivables growth.",
            "期初應收帳款，與期末應收帳款平均後用於計算應收帳款周轉率，並用於計算應收帳款成長率。",
        ),
    ),
    entry(
        "prev_year_inventory_turnover_rate",
        ("Prior-year inventory turnover", "去年存貨周轉率"),
        (
            "Compared with this year's inventory turnover to show the trend in inventory management.",
            "用於與本期存貨周轉率比較，判斷存貨管理效率的變化趨勢。",
        ),
    ),
    entry(
        "prev_year_accounts_receivable_turnover_days",
        ("Prior-year receivable turnover days", "去年應收帳款周轉天數"),
        (
            "Compared with this year's receivable days to show whether customers pay faster or slower.",
            "用於與本期應收帳款周轉天數比較，判斷客戶付款速度的變化趨勢。",
        ),
    ),
    entry(
        "prev_year_gross_profit_margin",
        ("Prior-year gross margin", "去年毛利率"),
        (
            "Compared with this year's gross margin to judge the stability of core profitability.",
            "用於與本期毛利率比較，判斷公司核心業務盈利能力的穩定性。",
        ),
    ),
    entry(
        "prev_year_accounts_payable_days",
        ("Prior-year accounts payable days", "去年應付帳款天數"),
        (
            "Compared with this year's payable days to spot unusual changes in supplier payment terms. Zero means not supplied.",
            "用於與本期應付帳款天數比較，判斷支付供應商款項的天數是否明顯異常。未提供時視為 0。",
        ),
    ),
    // -- Benchmarks --------------------------------------------------------
    entry(
        "industry_avg_roe",
        ("Industry average ROE", "行業平均ROE"),
        (
            "Industry average return on equity, compared with the company's own ROE.",
            "股東權益報酬率的行業平均值，用於與公司自身的ROE比較，判斷公司在行業內的盈利能力水平。",
        ),
    ),
    entry(
        "industry_avg_revenue_growth_rate",
        ("Industry average revenue growth", "行業平均營收成長率"),
        (
            "Average revenue growth of the industry, to judge whether the company is outgrowing its peers.",
            "行業的平均營收增長速度，用於與公司自身的營收成長率比較，判斷公司是否跑贏行業。",
        ),
    ),
    entry(
        "cost_of_debt_interest_rate",
        ("Cost of debt", "負債利率"),
        (
            "Average interest rate on the company's debt (0.03 = 3%), compared with ROA.",
            "公司所承擔債務的平均利率成本，用於判斷資產報酬率是否足以覆蓋負債成本。",
        ),
    ),
    entry(
        "prev_total_liabilities",
        ("Prior-year total liabilities", "去年總負債"),
        (
            "With prior-year total assets, gives last year's debt ratio for the year-on-year comparison.",
            "用於計算負債比率的年度變化，評估公司負債水平的趨勢。",
        ),
    ),
    entry(
        "prev_total_assets",
        ("Prior-year total assets", "去年總資產"),
        (
            "With prior-year total liabilities, gives last year's debt ratio for the year-on-year comparison.",
            "用於計算負債比率的年度變化，評估公司負債水平的趨勢。",
        ),
    ),
    entry(
        "prev_net_debt",
        ("Prior-year net debt", "去年淨負債"),
        (
            "Compared with this year's net debt to show the trend in the debt burden.",
            "用於計算淨負債的年度變化，判斷公司債務負擔的變動趨勢。",
        ),
    ),
    entry(
        "three_year_operating_cash_flows",
        ("Three-year operating cash flows", "近三年營業現金流"),
        (
            "Operating cash flow for each of the last three years, oldest first, to judge stability and persistence.",
            "公司過去連續三年的營業活動現金流量，用於評估營運現金流的穩定性和持續性。",
        ),
    ),
    // -- Ratios ------------------------------------------------------------
    entry(
        "gross_profit_margin",
        ("Gross profit margin", "毛利率"),
        (
            "(Revenue - COGS) / revenue. Profitability of the core business: pricing power and cost control.",
            "(營業收入 - 銷貨成本) / 營業收入。衡量公司核心業務的盈利能力，反映銷售價格與成本控制的效率。",
        ),
    ),
    entry(
        "operating_profit_margin",
        ("Operating profit margin", "營業利益率"),
        (
            "(Revenue - COGS - operating expenses) / revenue. Profit earned from the core operations.",
            "(營業收入 - 銷貨成本 - 營業費用) / 營業收入。衡量公司從本業經營中獲取利潤的能力，反映營運效率。",
        ),
    ),
    entry(
        "net_profit_margin",
        ("Net profit margin", "淨利率"),
        (
            "Net profit after tax / revenue. Bottom-line profit per unit of sales.",
            "稅後淨利 / 營業收入。衡量公司最終盈利效率，反映所有成本和費用扣除後的最終利潤。",
        ),
    ),
    entry(
        "roe",
        ("Return on equity (ROE)", "股東權益報酬率 (ROE)"),
        (
            "Net profit after tax / shareholders' equity. How efficiently shareholders' capital earns profit.",
            "稅後淨利 / 股東權益。衡量公司利用股東資本創造利潤的效率。",
        ),
    ),
    entry(
        "roa",
        ("Return on assets (ROA)", "總資產報酬率 (ROA)"),
        (
            "Net profit after tax / total assets. How efficiently total assets earn profit.",
            "稅後淨利 / 總資產。衡量公司利用總資產創造利潤的效率。",
        ),
    ),
    entry(
        "net_profit_growth_rate",
        ("Net profit growth rate", "淨利成長率"),
        (
            "(Net profit - prior net profit) / prior net profit.",
            "(當期稅後淨利 - 去年同期稅後淨利) / 去年同期稅後淨利。衡量公司淨利潤的增長速度。",
        ),
    ),
    entry(
        "revenue_growth_rate",
        ("Revenue growth rate", "營收成長率"),
        (
            "(Revenue - prior revenue) / prior revenue. Speed of top-line growth.",
            "(當期營業收入 - 去年同期營業收入) / 去年同期營業收入。衡量公司營業收入的增長速度，反映市場拓展能力。",
        ),
    ),
    entry(
        "profit_cash_content",
        ("Profit cash content", "獲利含金量"),
        (
            "Operating cash flow / net profit after tax. Share of profit actually received in cash; above 100% usually means high-quality earnings.",
            "營業活動現金流 / 稅後淨利。衡量公司淨利潤中有多少比例是實際收到的現金，高於100%通常表示獲利品質較高。",
        ),
    ),
    entry(
        "current_ratio",
        ("Current ratio", "流動比率"),
        (
            "Current assets / current liabilities. Short-term solvency; above 1 generally means adequate liquidity.",
            "流動資產 / 流動負債。衡量公司短期償債能力，通常大於1表示流動性較佳。",
        ),
    ),
    entry(
        "quick_ratio",
        ("Quick ratio", "速動比率"),
        (
            "(Current assets - inventory) / current liabilities. A stricter liquidity test that excludes inventory.",
            "(流動資產 - 存貨) / 流動負債。比流動比率更保守的短期償債能力指標，排除了流動性較差的存貨。",
        ),
    ),
    entry(
        "interest_coverage_ratio",
        ("Interest coverage ratio", "利息保障倍數"),
        (
            "EBIT / interest expense, with EBIT = pre-tax profit + interest. Infinite when there is no interest expense.",
            "稅前息前利潤 (EBIT) / 利息費用。衡量公司經營利潤支付利息的能力，數值越高表示償債能力越強。",
        ),
    ),
    entry(
        "inventory_turnover_rate",
        ("Inventory turnover", "存貨周轉率"),
        (
            "COGS / average inventory. How quickly stock is sold and replaced.",
            "銷貨成本 / 平均存貨。衡量公司銷售和補充存貨的效率，周轉率越高通常表示存貨管理越有效率。",
        ),
    ),
    entry(
        "inventory_turnover_days",
        ("Inventory turnover days", "存貨周轉天數"),
        (
            "365 / inventory turnover. Average days inventory is held; infinite when turnover is zero.",
            "365 / 存貨周轉率。衡量存貨平均持有天數，天數越少表示存貨去化越快。",
        ),
    ),
    entry(
        "accounts_receivable_turnover_rate",
        ("Receivable turnover", "應收帳款周轉率"),
        (
            "Revenue / average receivables. How quickly customers pay.",
            "營業收入 / 應收帳款。衡量公司收回應收帳款的速度，周轉率越高表示收款越快。",
        ),
    ),
    entry(
        "accounts_receivable_turnover_days",
        ("Receivable turnover days", "應收帳款周轉天數"),
        (
            "365 / receivable turnover. Average days to collect; infinite when turnover is zero.",
            "365 / 應收帳款周轉率。衡量公司收回應收帳款所需的平均天數，天數越少表示收款越快。",
        ),
    ),
    entry(
        "free_cash_flow",
        ("Free cash flow (FCF)", "自由現金流"),
        (
            "Operating cash flow - capital expenditures. Cash left after funding operations and investment.",
            "營業活動現金流 - 資本支出。指公司在滿足自身營運和資本投資需求後，可以自由支配的現金，是衡量公司財務健康和價值的關鍵指標。",
        ),
    ),
    entry(
        "financing_to_operating_cash_flow_ratio",
        ("Financing / operating cash flow", "融資現金流與營運現金流比例"),
        (
            "Financing cash flow / operating cash flow. How much operating cash goes to financing, or how financing fills an operating shortfall.",
            "籌資活動現金流 / 營業活動現金流。衡量公司營運活動產生的現金流有多少用於融資活動，或融資活動如何彌補營運現金流的不足。",
        ),
    ),
    entry(
        "debt_ratio",
        ("Debt ratio", "負債比率"),
        (
            "Total liabilities / total assets, with liabilities = assets - equity. Financial leverage.",
            "總負債 / 總資產。衡量公司資產中由負債提供資金的比例，反映公司的財務槓桿水平。",
        ),
    ),
    entry(
        "financial_expense_to_revenue_ratio",
        ("Financial expense / revenue", "財務費用佔營收比例"),
        (
            "Interest expense / revenue. How much financing costs weigh on sales.",
            "財務費用 / 營業收入。衡量公司財務成本在營收中的佔比，反映公司負債對盈利能力的影響。",
        ),
    ),
    entry(
        "net_debt",
        ("Net debt", "淨負債"),
        (
            "Total liabilities - cash and equivalents. The debt burden net of available cash.",
            "總負債 - 現金及約當現金。衡量公司扣除可用現金後的實際負債水平，更準確反映公司的債務負擔。",
        ),
    ),
];

/// Every entry: input fields first, then ratios.
pub fn entries() -> &'static [Entry] {
    ENTRIES
}

pub fn lookup(key: &str) -> Option<&'static Entry> {
    let key = key.trim();
    ENTRIES.iter().find(|e| e.key == key)
}

pub fn definition(key: &str, locale: Locale) -> Option<&'static str> {
    lookup(key).map(|e| e.definition.get(locale))
}

pub fn field_label(field: Field) -> Text {
    lookup(field.as_str()).map_or(Text::new(field.as_str(), field.as_str()), |e| e.label)
}

pub fn ratio_label(ratio: RatioName) -> Text {
    lookup(ratio.as_str()).map_or(Text::new(ratio.as_str(), ratio.as_str()), |e| e.label)
}
