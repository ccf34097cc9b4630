use fin_health_core::ratios::{compute_ratios, RatioName, Unit};
use fin_health_core::FinancialRecord;
use pretty_assertions::assert_eq;

// ===========================================================================
// Ratio derivation tests
// ===========================================================================

fn manufacturer() -> FinancialRecord {
    FinancialRecord {
        operating_revenue: 1_000_000.0,
        cost_of_goods_sold: 600_000.0,
        operating_expenses: 200_000.0,
        net_profit_after_tax: 1_000_000.0,
        shareholders_equity: 4_000_000.0,
        total_assets: 10_000_000.0,
        current_assets: 3_000_000.0,
        current_liabilities: 1_500_000.0,
        inventory: 500_000.0,
        interest_expense: 100_000.0,
        net_profit_before_tax: 1_150_000.0,
        operating_cash_flow: 1_200_000.0,
        capital_expenditures: 450_000.0,
        cash_and_equivalents: 2_000_000.0,
        ..FinancialRecord::default()
    }
}

#[test]
fn test_gross_margin_forty_percent() {
    let r = compute_ratios(&manufacturer());
    assert!((r.gross_profit_margin - 0.40).abs() < 1e-12);
    assert!((r.operating_profit_margin - 0.20).abs() < 1e-12);
}

#[test]
fn test_free_cash_flow_exact() {
    let r = compute_ratios(&manufacturer());
    assert_eq!(r.free_cash_flow, 750_000.0);
    assert_eq!(r.get(RatioName::FreeCashFlow), 750_000.0);
}

#[test]
fn test_liabilities_derived_from_equity() {
    let r = compute_ratios(&manufacturer());
    // 10M assets - 4M equity = 6M liabilities
    assert!((r.debt_ratio - 0.6).abs() < 1e-12);
    assert_eq!(r.net_debt, 4_000_000.0);
}

#[test]
fn test_interest_coverage_adds_back_interest() {
    let r = compute_ratios(&manufacturer());
    // (1.15M + 100k) / 100k
    assert!((r.interest_coverage_ratio - 12.5).abs() < 1e-12);
}

#[test]
fn test_zero_current_liabilities() {
    let record = FinancialRecord {
        current_liabilities: 0.0,
        ..manufacturer()
    };
    let r = compute_ratios(&record);
    assert_eq!(r.current_ratio, 0.0);
    assert_eq!(r.quick_ratio, 0.0);
}

#[test]
fn test_zero_interest_is_infinite_cover() {
    let record = FinancialRecord {
        interest_expense: 0.0,
        ..manufacturer()
    };
    let r = compute_ratios(&record);
    assert!(r.interest_coverage_ratio.is_infinite());
    assert!(r.interest_coverage_ratio > 0.0);
}

#[test]
fn test_zero_net_profit() {
    let record = FinancialRecord {
        net_profit_after_tax: 0.0,
        ..manufacturer()
    };
    let r = compute_ratios(&record);
    assert_eq!(r.roe, 0.0);
    assert_eq!(r.roa, 0.0);
    assert_eq!(r.profit_cash_content, 0.0);
}

#[test]
fn test_default_record_has_no_nan() {
    let r = compute_ratios(&FinancialRecord::default());
    for (name, value) in r.iter() {
        assert!(!value.is_nan(), "{name} is NaN");
    }
}

#[test]
fn test_recomputed_wholesale() {
    let mut record = manufacturer();
    let before = compute_ratios(&record);
    record.operating_revenue = 2_000_000.0;
    let after = compute_ratios(&record);
    assert_ne!(before.gross_profit_margin, after.gross_profit_margin);
    assert_eq!(before, compute_ratios(&manufacturer()));
}

#[test]
fn test_every_ratio_has_a_unit_and_key() {
    let r = compute_ratios(&manufacturer());
    for name in RatioName::ALL {
        assert_eq!(r.get_by_key(name.as_str()), Some(r.get(name)));
        let _: Unit = name.unit();
    }
    assert_eq!(RatioName::CurrentRatio.unit(), Unit::Percent);
    assert_eq!(RatioName::QuickRatio.unit(), Unit::Percent);
    assert_eq!(RatioName::InventoryTurnoverRate.unit(), Unit::Percent);
    assert_eq!(RatioName::NetDebt.unit(), Unit::Currency);
}
