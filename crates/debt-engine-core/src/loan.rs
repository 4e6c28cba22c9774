//! Loan amortization: fixed-installment (annuity) and declining-balance
//! schedules computed month by month from principal, rate, and term.
//!
//! Pure functions of their input. Schedules are materialized in full
//! because callers need the final row and aggregate totals.

use chrono::{Months, NaiveDate, Utc};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Decimal;
use crate::error::DebtEngineError;
use crate::DebtEngineResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Remaining balances below one cent are clamped to exactly zero, so a
/// schedule terminates at 0.00 instead of leaving rounding dust.
const BALANCE_EPSILON: Decimal = Decimal::ONE_CENT;

/// Smallest principal the validated entry point accepts.
const MIN_PRINCIPAL: Decimal = Decimal::ONE_CENT;

const MONTHS_PER_YEAR: Decimal = Decimal(dec!(12));

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// How interest is allocated across the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestType {
    /// Constant total payment; the interest/principal split shifts over time.
    Fixed,
    /// Constant principal portion; interest recomputed on the shrinking balance.
    Declining,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanCalculationInput {
    /// Loan principal as a decimal string.
    pub principal: String,
    /// Annual rate in percent, as a decimal string ("24" means 24%).
    pub annual_interest_rate: String,
    /// Term in whole months.
    pub number_of_months: u32,
    pub interest_type: InterestType,
    /// Reference date for row dates; defaults to today.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// One month of an amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based month index, contiguous.
    pub month: u32,
    pub payment: Decimal,
    pub principal: Decimal,
    pub interest: Decimal,
    /// Balance after this payment; exactly zero at the terminus.
    pub remaining_balance: Decimal,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanCalculationResult {
    /// The constant payment for fixed schedules. For declining-balance
    /// schedules this is the *first-period* payment only, since the
    /// payment shrinks every month; see `min_payment` / `max_payment`.
    pub monthly_payment: Decimal,
    /// Smallest per-month payment in the schedule (the last period for
    /// declining balance; equals `monthly_payment` for fixed).
    pub min_payment: Decimal,
    /// Largest per-month payment (the first period for declining balance).
    pub max_payment: Decimal,
    pub total_payment: Decimal,
    pub total_interest: Decimal,
    pub total_principal: Decimal,
    pub amortization_schedule: Vec<AmortizationRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Validate the input and dispatch on the interest type.
///
/// Fails with `InvalidInput` before any computation when the principal
/// is below one cent, the rate is negative, or the term is zero.
pub fn calculate_loan(input: &LoanCalculationInput) -> DebtEngineResult<LoanCalculationResult> {
    let principal = Decimal::parse(&input.principal);
    let annual_rate = Decimal::parse(&input.annual_interest_rate);

    if principal.is_less_than(MIN_PRINCIPAL) {
        return Err(DebtEngineError::InvalidInput {
            field: "principal".into(),
            reason: "must be greater than zero".into(),
        });
    }
    if annual_rate.is_negative() {
        return Err(DebtEngineError::InvalidInput {
            field: "annual_interest_rate".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.number_of_months == 0 {
        return Err(DebtEngineError::InvalidInput {
            field: "number_of_months".into(),
            reason: "must be greater than zero".into(),
        });
    }

    match input.interest_type {
        InterestType::Fixed => calculate_fixed_installment_loan(input),
        InterestType::Declining => calculate_declining_balance_loan(input),
    }
}

/// Annuity schedule: constant total payment over the term.
pub fn calculate_fixed_installment_loan(
    input: &LoanCalculationInput,
) -> DebtEngineResult<LoanCalculationResult> {
    let principal = Decimal::parse(&input.principal);
    let annual_rate = Decimal::parse(&input.annual_interest_rate);
    let monthly_rate = annual_rate.divide(Decimal::HUNDRED)?.divide(MONTHS_PER_YEAR)?;
    let n = input.number_of_months;
    let start = start_date(input);

    // Zero-rate loans degenerate to straight division; the annuity
    // formula would divide by zero.
    if monthly_rate.is_zero() {
        let monthly_payment = principal.divide(Decimal::from(n))?;
        let mut schedule = Vec::with_capacity(n as usize);
        let mut remaining_balance = principal;

        for month in 1..=n {
            remaining_balance = remaining_balance.subtract(monthly_payment);
            if remaining_balance.is_less_than(BALANCE_EPSILON) {
                remaining_balance = Decimal::ZERO;
            }
            schedule.push(AmortizationRow {
                month,
                payment: monthly_payment,
                principal: monthly_payment,
                interest: Decimal::ZERO,
                remaining_balance,
                date: payment_date(start, month)?,
            });
        }

        return Ok(LoanCalculationResult {
            monthly_payment,
            min_payment: monthly_payment,
            max_payment: monthly_payment,
            total_payment: principal,
            total_interest: Decimal::ZERO,
            total_principal: principal,
            amortization_schedule: schedule,
        });
    }

    // payment = P * r * (1+r)^n / ((1+r)^n - 1)
    let factor = Decimal::ONE.add(monthly_rate).power(n as i64);
    let numerator = principal.multiply(monthly_rate).multiply(factor);
    let denominator = factor.subtract(Decimal::ONE);
    let monthly_payment = numerator.divide(denominator)?;

    let mut schedule = Vec::with_capacity(n as usize);
    let mut remaining_balance = principal;
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;

    for month in 1..=n {
        let interest = remaining_balance.multiply(monthly_rate);
        let principal_portion = monthly_payment.subtract(interest);

        remaining_balance = remaining_balance.subtract(principal_portion);
        total_interest = total_interest.add(interest);
        total_principal = total_principal.add(principal_portion);

        if remaining_balance.is_less_than(BALANCE_EPSILON) {
            remaining_balance = Decimal::ZERO;
        }

        schedule.push(AmortizationRow {
            month,
            payment: monthly_payment,
            principal: principal_portion,
            interest,
            remaining_balance,
            date: payment_date(start, month)?,
        });
    }

    // payment * n, not a re-sum of the rows, so the headline figure
    // cannot drift from the quoted installment.
    let total_payment = monthly_payment.multiply(Decimal::from(n));

    Ok(LoanCalculationResult {
        monthly_payment,
        min_payment: monthly_payment,
        max_payment: monthly_payment,
        total_payment,
        total_interest,
        total_principal,
        amortization_schedule: schedule,
    })
}

/// Equal-principal schedule: constant principal portion, interest
/// recomputed each month on the declining balance, so the total
/// payment decreases month over month.
pub fn calculate_declining_balance_loan(
    input: &LoanCalculationInput,
) -> DebtEngineResult<LoanCalculationResult> {
    let principal = Decimal::parse(&input.principal);
    let annual_rate = Decimal::parse(&input.annual_interest_rate);
    let monthly_rate = annual_rate.divide(Decimal::HUNDRED)?.divide(MONTHS_PER_YEAR)?;
    let n = input.number_of_months;
    let start = start_date(input);

    let principal_portion = principal.divide(Decimal::from(n))?;

    let mut schedule = Vec::with_capacity(n as usize);
    let mut remaining_balance = principal;
    let mut total_interest = Decimal::ZERO;
    let mut total_payment = Decimal::ZERO;

    for month in 1..=n {
        let interest = remaining_balance.multiply(monthly_rate);
        let payment = principal_portion.add(interest);

        remaining_balance = remaining_balance.subtract(principal_portion);
        total_interest = total_interest.add(interest);
        total_payment = total_payment.add(payment);

        if remaining_balance.is_less_than(BALANCE_EPSILON) {
            remaining_balance = Decimal::ZERO;
        }

        schedule.push(AmortizationRow {
            month,
            payment,
            principal: principal_portion,
            interest,
            remaining_balance,
            date: payment_date(start, month)?,
        });
    }

    let first_payment = schedule.first().map(|row| row.payment).unwrap_or(Decimal::ZERO);
    let last_payment = schedule.last().map(|row| row.payment).unwrap_or(Decimal::ZERO);

    Ok(LoanCalculationResult {
        monthly_payment: first_payment,
        min_payment: last_payment,
        max_payment: first_payment,
        total_payment,
        total_interest,
        total_principal: principal,
        amortization_schedule: schedule,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn start_date(input: &LoanCalculationInput) -> NaiveDate {
    input.start_date.unwrap_or_else(|| Utc::now().date_naive())
}

/// Calendar-month offset from the start date. Day-of-month is kept
/// where valid and clamped to the month end otherwise (Jan 31 + 1
/// month is Feb 28).
pub(crate) fn payment_date(start: NaiveDate, month: u32) -> DebtEngineResult<NaiveDate> {
    start
        .checked_add_months(Months::new(month))
        .ok_or_else(|| DebtEngineError::DateError(format!("{start} + {month} months is out of range")))
}
