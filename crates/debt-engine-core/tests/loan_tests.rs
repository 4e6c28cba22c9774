use chrono::NaiveDate;
use debt_engine_core::loan::{
    calculate_declining_balance_loan, calculate_fixed_installment_loan, calculate_loan,
    InterestType, LoanCalculationInput,
};
use debt_engine_core::{DebtEngineError, Decimal};
use pretty_assertions::assert_eq;

fn input(principal: &str, rate: &str, months: u32, interest_type: InterestType) -> LoanCalculationInput {
    LoanCalculationInput {
        principal: principal.to_string(),
        annual_interest_rate: rate.to_string(),
        number_of_months: months,
        interest_type,
        start_date: Some(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()),
    }
}

// ===========================================================================
// Fixed installment (annuity)
// ===========================================================================

#[test]
fn test_fixed_installment_standard_schedule() {
    // 100k at 24% annual (2% monthly) over 12 months:
    // payment = 100000 * 0.02 * 1.02^12 / (1.02^12 - 1) ≈ 9455.96
    let result = calculate_loan(&input("100000", "24", 12, InterestType::Fixed)).unwrap();

    assert!(result.monthly_payment.is_greater_than(Decimal::parse("9000")));
    assert!(result.monthly_payment.is_less_than(Decimal::parse("9500")));
    assert!(result.total_interest.is_greater_than(Decimal::parse("13000")));
    assert_eq!(result.amortization_schedule.len(), 12);

    // Final balance is clamped to exactly zero
    let last = result.amortization_schedule.last().unwrap();
    assert!(last.remaining_balance.is_zero());
}

#[test]
fn test_fixed_installment_rows_are_consistent() {
    let result = calculate_loan(&input("100000", "24", 12, InterestType::Fixed)).unwrap();

    for (i, row) in result.amortization_schedule.iter().enumerate() {
        // Contiguous 1-based month index
        assert_eq!(row.month, i as u32 + 1);
        // payment == principal + interest for every interest-bearing row
        assert!(row.payment.is_equal(row.principal.add(row.interest)));
        // Constant installment
        assert!(row.payment.is_equal(result.monthly_payment));
    }
}

#[test]
fn test_fixed_installment_balance_strictly_decreasing() {
    let result = calculate_loan(&input("50000", "18", 24, InterestType::Fixed)).unwrap();

    let mut previous = Decimal::parse("50000");
    for row in &result.amortization_schedule {
        assert!(row.remaining_balance.is_less_than(previous));
        previous = row.remaining_balance;
    }
}

#[test]
fn test_fixed_installment_totals() {
    let result = calculate_loan(&input("100000", "24", 12, InterestType::Fixed)).unwrap();

    // Headline total is payment * n, not a re-sum of the rows
    let expected_total = result.monthly_payment.multiply(Decimal::from(12u32));
    assert!(result.total_payment.is_equal(expected_total));

    // Accumulated splits add back up to the total
    let splits = result.total_interest.add(result.total_principal);
    assert!(splits.is_equal(result.total_payment));
}

#[test]
fn test_fixed_installment_zero_rate() {
    // Interest-free: 1200 over 12 months is a flat 100/month
    let result = calculate_loan(&input("1200", "0", 12, InterestType::Fixed)).unwrap();

    assert_eq!(result.monthly_payment.to_fixed(2), "100.00");
    assert!(result.total_interest.is_zero());
    assert!(result.total_payment.is_equal(Decimal::parse("1200")));

    for row in &result.amortization_schedule {
        assert!(row.interest.is_zero());
        assert!(row.principal.is_equal(row.payment));
    }
    assert!(result
        .amortization_schedule
        .last()
        .unwrap()
        .remaining_balance
        .is_zero());
}

#[test]
fn test_fixed_installment_min_max_equal_constant_payment() {
    let result = calculate_loan(&input("100000", "24", 12, InterestType::Fixed)).unwrap();
    assert!(result.min_payment.is_equal(result.monthly_payment));
    assert!(result.max_payment.is_equal(result.monthly_payment));
}

// ===========================================================================
// Declining balance
// ===========================================================================

#[test]
fn test_declining_balance_constant_principal() {
    // 60k over 10 months: principal portion is 6000.00 every month
    let result = calculate_loan(&input("60000", "20", 10, InterestType::Declining)).unwrap();

    assert_eq!(result.amortization_schedule.len(), 10);
    for row in &result.amortization_schedule {
        assert!(row.principal.is_equal(Decimal::parse("6000")));
    }
}

#[test]
fn test_declining_balance_payments_strictly_decrease() {
    let result = calculate_loan(&input("60000", "20", 10, InterestType::Declining)).unwrap();

    let mut previous: Option<Decimal> = None;
    for row in &result.amortization_schedule {
        if let Some(prev) = previous {
            assert!(row.payment.is_less_than(prev));
        }
        previous = Some(row.payment);
    }
}

#[test]
fn test_declining_balance_monthly_payment_is_first_period() {
    // First month: 6000 principal + 60000 * (20/100/12) = 6000 + 1000
    let result = calculate_loan(&input("60000", "20", 10, InterestType::Declining)).unwrap();

    assert!(result.monthly_payment.is_equal(Decimal::parse("7000")));
    let first = &result.amortization_schedule[0];
    let last = result.amortization_schedule.last().unwrap();
    assert!(result.monthly_payment.is_equal(first.payment));
    assert!(result.max_payment.is_equal(first.payment));
    assert!(result.min_payment.is_equal(last.payment));
}

#[test]
fn test_declining_balance_totals() {
    let result = calculate_loan(&input("60000", "20", 10, InterestType::Declining)).unwrap();

    assert!(result.total_principal.is_equal(Decimal::parse("60000")));
    let summed = result
        .amortization_schedule
        .iter()
        .fold(Decimal::ZERO, |sum, row| sum.add(row.payment));
    assert!(result.total_payment.is_equal(summed));
    assert!(result
        .amortization_schedule
        .last()
        .unwrap()
        .remaining_balance
        .is_zero());
}

// ===========================================================================
// Validation and dates
// ===========================================================================

#[test]
fn test_zero_principal_rejected() {
    let err = calculate_loan(&input("0", "10", 12, InterestType::Fixed)).unwrap_err();
    match err {
        DebtEngineError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
        other => panic!("Expected InvalidInput for principal, got {other:?}"),
    }
}

#[test]
fn test_unparseable_principal_rejected() {
    // Lenient parsing turns garbage into zero, which then fails validation
    let err = calculate_loan(&input("not a number", "10", 12, InterestType::Fixed)).unwrap_err();
    match err {
        DebtEngineError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
        other => panic!("Expected InvalidInput for principal, got {other:?}"),
    }
}

#[test]
fn test_negative_rate_rejected() {
    let err = calculate_loan(&input("1000", "-5", 12, InterestType::Fixed)).unwrap_err();
    match err {
        DebtEngineError::InvalidInput { field, .. } => assert_eq!(field, "annual_interest_rate"),
        other => panic!("Expected InvalidInput for rate, got {other:?}"),
    }
}

#[test]
fn test_zero_term_rejected() {
    let err = calculate_loan(&input("1000", "10", 0, InterestType::Fixed)).unwrap_err();
    match err {
        DebtEngineError::InvalidInput { field, .. } => assert_eq!(field, "number_of_months"),
        other => panic!("Expected InvalidInput for term, got {other:?}"),
    }
}

#[test]
fn test_row_dates_advance_by_calendar_month() {
    let result = calculate_loan(&input("1200", "0", 3, InterestType::Fixed)).unwrap();
    let dates: Vec<NaiveDate> = result.amortization_schedule.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            NaiveDate::from_ymd_opt(2026, 4, 15).unwrap(),
        ]
    );
}

#[test]
fn test_row_dates_clamp_to_month_end() {
    let mut loan_input = input("3000", "0", 3, InterestType::Fixed);
    loan_input.start_date = Some(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
    let result = calculate_loan(&loan_input).unwrap();

    let dates: Vec<NaiveDate> = result.amortization_schedule.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            NaiveDate::from_ymd_opt(2026, 4, 30).unwrap(),
        ]
    );
}

// ===========================================================================
// Direct calculators and serialization shape
// ===========================================================================

#[test]
fn test_direct_calculators_skip_validation_dispatch() {
    // The concrete calculators are callable without the entry-point
    // validation, mirroring the library surface
    let fixed = calculate_fixed_installment_loan(&input("1000", "12", 6, InterestType::Fixed));
    assert!(fixed.is_ok());
    let declining =
        calculate_declining_balance_loan(&input("1000", "12", 6, InterestType::Declining));
    assert!(declining.is_ok());
}

#[test]
fn test_monetary_fields_serialize_as_strings() {
    let result = calculate_loan(&input("100000", "24", 12, InterestType::Fixed)).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert!(value["monthly_payment"].is_string());
    assert!(value["total_interest"].is_string());
    let first_row = &value["amortization_schedule"][0];
    assert!(first_row["payment"].is_string());
    assert!(first_row["remaining_balance"].is_string());
    assert_eq!(first_row["month"], 1);
}
