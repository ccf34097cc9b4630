//! Plain-text rendering of a [`HealthReport`]: key-ratio table followed by
//! one summary section per assessment module.
//!
//! Formatting only. Every number printed here was computed upstream.

use chrono::NaiveDateTime;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::analysis::HealthReport;
use crate::assessment::ModuleKind;
use crate::glossary::{field_label, ratio_label};
use crate::locale::{Locale, Text};
use crate::ratios::{RatioName, Unit};
use crate::record::{Field, FinancialRecord};

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub locale: Locale,
    /// Printed in the header as `YYYY-MM-DD HH:MM`; omitted when `None`.
    pub generated_at: Option<NaiveDateTime>,
    /// List each module's question/answer pairs under its conclusion.
    pub include_details: bool,
}

/// Ratios shown in the key-ratio table, in display order.
pub const KEY_RATIOS: [RatioName; 17] = [
    RatioName::GrossProfitMargin,
    RatioName::OperatingProfitMargin,
    RatioName::NetProfitMargin,
    RatioName::Roe,
    RatioName::Roa,
    RatioName::NetProfitGrowthRate,
    RatioName::RevenueGrowthRate,
    RatioName::ProfitCashContent,
    RatioName::CurrentRatio,
    RatioName::QuickRatio,
    RatioName::InterestCoverageRatio,
    RatioName::InventoryTurnoverRate,
    RatioName::AccountsReceivableTurnoverDays,
    RatioName::FreeCashFlow,
    RatioName::DebtRatio,
    RatioName::FinancialExpenseToRevenueRatio,
    RatioName::NetDebt,
];

const TITLE: Text = Text::new("Comprehensive Financial Analysis Report", "綜合財務分析報告");
const RATIO_SECTION: Text = Text::new("Key Financial Ratios", "關鍵財務比率一覽");
const RATIO_HEADER: Text = Text::new("Ratio", "比率名稱");
const VALUE_HEADER: Text = Text::new("Value", "數值");
const SUMMARY: Text = Text::new("Summary", "總結");
const SCORE: Text = Text::new("Score", "評分");
const CONCLUSION: Text = Text::new("Conclusion", "結論");
const OVERALL: Text = Text::new("Overall", "綜合結論");
const NO_CONCLUSION: Text = Text::new("No conclusion", "無結論");

// ---------------------------------------------------------------------------
// Value formatting
// ---------------------------------------------------------------------------

/// Format one value according to its unit.
pub fn format_value(value: f64, unit: Unit, locale: Locale) -> String {
    if value.is_nan() {
        return "-".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    match unit {
        Unit::Percent => format!("{:.2}%", value * 100.0),
        Unit::Days => match locale {
            Locale::En => format!("{value:.0} days"),
            Locale::ZhTw => format!("{value:.0}天"),
        },
        Unit::Currency => match locale {
            Locale::En => format_currency(value),
            Locale::ZhTw => format!("{} 元", format_currency(value)),
        },
    }
}

/// Two decimal places with thousands separators, e.g. `-1,234,567.89`.
pub fn format_currency(value: f64) -> String {
    let plain = match Decimal::from_f64(value) {
        Some(d) => format!("{:.2}", d.round_dp(2)),
        None => format!("{value:.2}"),
    };
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if sign == "-" && grouped.chars().all(|c| c == '0' || c == ',') && frac_part == "00" {
        return format!("{grouped}.{frac_part}");
    }
    format!("{sign}{grouped}.{frac_part}")
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    let mut out = String::from(s);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    out
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

fn ratio_rows(report: &HealthReport, record: &FinancialRecord, locale: Locale) -> Vec<[String; 2]> {
    let mut rows: Vec<[String; 2]> = KEY_RATIOS
        .iter()
        .map(|&name| {
            [
                ratio_label(name).get(locale).to_string(),
                format_value(report.ratios.get(name), name.unit(), locale),
            ]
        })
        .collect();
    rows.push([
        field_label(Field::AccountsPayableDays).get(locale).to_string(),
        format_value(record.accounts_payable_days, Unit::Days, locale),
    ]);
    rows
}

fn render_table(header: [&str; 2], rows: &[[String; 2]]) -> Vec<String> {
    let mut widths = [header[0].chars().count(), header[1].chars().count()];
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 2]| {
        format!("{} | {}", pad(cells[0], widths[0]), pad(cells[1], widths[1]))
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(header));
    lines.push(format!("{}-+-{}", "-".repeat(widths[0]), "-".repeat(widths[1])));
    for row in rows {
        lines.push(line([row[0].as_str(), row[1].as_str()]));
    }
    lines
}

fn render_module(report: &HealthReport, kind: ModuleKind, options: &ReportOptions) -> Vec<String> {
    let locale = options.locale;
    let mut lines = vec![format!(
        "--- {} {} ---",
        kind.title().get(locale),
        SUMMARY.get(locale)
    )];

    let Some(result) = report.assessment(kind) else {
        lines.push(format!(
            "{}: {}",
            CONCLUSION.get(locale),
            NO_CONCLUSION.get(locale)
        ));
        return lines;
    };

    lines.push(format!(
        "{}: {:.2} / {:.0}",
        SCORE.get(locale),
        result.score,
        kind.max_score()
    ));
    let conclusion = if result.conclusion.is_empty() {
        NO_CONCLUSION.get(locale)
    } else {
        result.conclusion.as_str()
    };
    lines.push(format!("{}: {}", CONCLUSION.get(locale), conclusion));
    if let Some(overall) = &result.overall_conclusion {
        lines.push(format!("{}: {}", OVERALL.get(locale), overall));
    }
    if options.include_details {
        for d in &result.details {
            lines.push(format!("  {} {}", d.question, d.answer));
        }
    }
    lines
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render the full text report.
pub fn render_report(
    report: &HealthReport,
    record: &FinancialRecord,
    options: &ReportOptions,
) -> String {
    let locale = options.locale;
    let mut lines = Vec::new();

    let title = TITLE.get(locale);
    lines.push(match options.generated_at {
        Some(ts) => format!("===== {title} ({}) =====", ts.format("%Y-%m-%d %H:%M")),
        None => format!("===== {title} ====="),
    });
    lines.push(String::new());
    lines.push(format!("--- {} ---", RATIO_SECTION.get(locale)));
    lines.extend(render_table(
        [RATIO_HEADER.get(locale), VALUE_HEADER.get(locale)],
        &ratio_rows(report, record, locale),
    ));

    for kind in ModuleKind::ALL {
        lines.push(String::new());
        lines.extend(render_module(report, kind, options));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze, AnalysisOptions};
    use chrono::NaiveDate;

    fn sample() -> FinancialRecord {
        FinancialRecord {
            operating_revenue: 1_000_000.0,
            cost_of_goods_sold: 600_000.0,
            net_profit_after_tax: 100_000.0,
            shareholders_equity: 500_000.0,
            total_assets: 900_000.0,
            current_assets: 300_000.0,
            current_liabilities: 150_000.0,
            operating_cash_flow: 150_000.0,
            capital_expenditures: 20_000.0,
            accounts_payable_days: 45.0,
            ..FinancialRecord::default()
        }
    }

    fn render(locale: Locale) -> String {
        let record = sample();
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
    fn test_currency_grouping() {
        assert_eq!(format_currency(1_234_567.891), "1,234,567.89");
        assert_eq!(format_currency(-1_234.5), "-1,234.50");
        assert_eq!(format_currency(999.0), "999.00");
        assert_eq!(format_currency(100_000.0), "100,000.00");
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(-0.001), "0.00");
    }

    #[test]
    fn test_unit_formats() {
        assert_eq!(format_value(0.1234, Unit::Percent, Locale::En), "12.34%");
        assert_eq!(format_value(2.0, Unit::Percent, Locale::En), "200.00%");
        assert_eq!(format_value(45.4, Unit::Days, Locale::En), "45 days");
        assert_eq!(format_value(45.4, Unit::Days, Locale::ZhTw), "45天");
        assert_eq!(format_value(1500.0, Unit::Currency, Locale::ZhTw), "1,500.00 元");
        assert_eq!(format_value(f64::INFINITY, Unit::Percent, Locale::En), "∞");
    }

    #[test]
    fn test_ratio_suffixed_keys_print_as_percent() {
        let record = FinancialRecord {
            current_assets: 300.0,
            current_liabilities: 150.0,
            ..FinancialRecord::default()
        };
        let report = analyze(&record, &AnalysisOptions::default()).result;
        let text = render_report(&report, &record, &ReportOptions::default());
        let row = text
            .lines()
            .find(|l| l.starts_with("Current ratio"))
            .unwrap();
        assert!(row.ends_with("200.00%"), "{row}");
    }

    #[test]
    fn test_table_has_eighteen_rows() {
        let text = render(Locale::En);
        let start = text
            .lines()
            .position(|l| l.starts_with("Ratio"))
            .unwrap();
        let rows: Vec<&str> = text
            .lines()
            .skip(start + 2)
            .take_while(|l| !l.is_empty())
            .collect();
        assert_eq!(rows.len(), 18);
        assert!(rows[0].starts_with("Gross profit margin"));
        assert!(rows[0].ends_with("40.00%"));
        assert!(rows[17].starts_with("Accounts payable days"));
        assert!(rows[17].ends_with("45 days"));
        assert!(text.contains("∞"), "no interest expense renders as infinity");
    }

    #[test]
    fn test_sections_in_module_order() {
        let text = render(Locale::En);
        let mut last = 0;
        for kind in ModuleKind::ALL {
            let heading = format!("--- {} Summary ---", kind.title().en);
            let at = text.find(&heading).unwrap();
            assert!(at > last, "{heading} out of order");
            last = at;
        }
        assert!(text.contains("/ 50"));
        assert!(text.contains("Overall: "));
        assert!(text.starts_with("===== Comprehensive Financial Analysis Report ====="));
    }

    #[test]
    fn test_zh_tw_report() {
        let text = render(Locale::ZhTw);
        assert!(text.starts_with("===== 綜合財務分析報告 ====="));
        assert!(text.contains("--- 關鍵財務比率一覽 ---"));
        assert!(text.contains("--- 獲利品質分析 總結 ---"));
        assert!(text.contains("評分: "));
        assert!(text.contains("綜合結論: "));
        assert!(text.contains("45天"));
    }

    #[test]
    fn test_timestamp_and_details() {
        let record = sample();
        let report = analyze(&record, &AnalysisOptions::default()).result;
        let ts = NaiveDate::from_ymd_opt(2024, 3, 31)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        let text = render_report(
            &report,
            &record,
            &ReportOptions {
                generated_at: Some(ts),
                include_details: true,
                ..ReportOptions::default()
            },
        );
        assert!(text.starts_with("===== Comprehensive Financial Analysis Report (2024-03-31 09:05) ====="));
        let first_question = &report.assessments[0].details[0];
        assert!(text.contains(&format!(
            "  {} {}",
            first_question.question, first_question.answer
        )));
    }
}
