#![cfg(feature = "report")]

use fin_health_core::report::{render_report, ReportOptions, KEY_RATIOS};
use fin_health_core::{analyze, AnalysisOptions, FinancialRecord, Locale};

// ===========================================================================
// Text report tests
// ===========================================================================

fn record() -> FinancialRecord {
    FinancialRecord {
        operating_revenue: 2_000_000.0,
        cost_of_goods_sold: 1_200_000.0,
        net_profit_after_tax: 250_000.0,
        shareholders_equity: 1_000_000.0,
        total_assets: 3_000_000.0,
        current_assets: 900_000.0,
        current_liabilities: 600_000.0,
        interest_expense: 40_000.0,
        net_profit_before_tax: 320_000.0,
        operating_cash_flow: 1_400_000.0,
        capital_expenditures: 165_432.1,
        cash_and_equivalents: 500_000.0,
        accounts_payable_days: 60.0,
        ..FinancialRecord::default()
    }
}

fn render(locale: Locale) -> String {
    let record = record();
    let report = analyze(&record, &AnalysisOptions { locale }).result;
    render_report(
        &report,
        &record,
        &ReportOptions {
            locale,
            ..ReportOptions::default()
        },
    )
}

#[test]
fn test_key_ratio_count() {
    assert_eq!(KEY_RATIOS.len(), 17);
}

#[test]
fn test_currency_rows_grouped() {
    let text = render(Locale::En);
    // 1,400,000 - 165,432.10
    assert!(text.contains("1,234,567.90"), "{text}");
    // 2,000,000 liabilities - 500,000 cash
    assert!(text.contains("1,500,000.00"), "{text}");
}

#[test]
fn test_ratios_and_margins_as_percentages() {
    let text = render(Locale::En);
    let line = |label: &str| {
        text.lines()
            .find(|l| l.starts_with(label))
            .unwrap_or_else(|| panic!("no row {label}"))
            .to_string()
    };
    assert!(line("Current ratio").ends_with("150.00%"));
    assert!(line("Interest coverage ratio").ends_with("900.00%"));
    assert!(line("Debt ratio").ends_with("66.67%"));
    assert!(line("Net profit margin").ends_with("12.50%"));
}

#[test]
fn test_columns_aligned() {
    let text = render(Locale::En);
    let table: Vec<&str> = text
        .lines()
        .skip_while(|l| !l.starts_with("Ratio"))
        .take_while(|l| !l.is_empty())
        .collect();
    let bar = table[0].find(" | ").unwrap();
    for row in &table[2..] {
        assert_eq!(row.find(" | "), Some(bar), "{row}");
    }
    assert!(table[1].contains("-+-"));
}

#[test]
fn test_zh_tw_currency_suffix() {
    let text = render(Locale::ZhTw);
    assert!(text.contains("1,234,567.90 元"));
    assert!(text.contains("應付帳款天數"));
    assert!(text.contains("60天"));
}

#[test]
fn test_report_is_deterministic_without_timestamp() {
    assert_eq!(render(Locale::En), render(Locale::En));
}
