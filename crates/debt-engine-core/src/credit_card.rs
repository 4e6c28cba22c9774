//! Revolving-balance math: minimum payments, the compounding cost of
//! paying nothing, and fixed-payment payoff simulation.
//!
//! Unlike the installment engine the number of periods is not known up
//! front; the simulator iterates until the balance clears, capped at
//! 30 years, and rejects any payment that can never retire the debt.

use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Decimal;
use crate::error::DebtEngineError;
use crate::loan::payment_date;
use crate::DebtEngineResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Hard iteration cap (30 years). Bounds the simulation on bad input.
const MAX_SIMULATION_MONTHS: u32 = 360;

/// Principal share of the minimum payment: 2% of the balance.
const PRINCIPAL_PORTION_RATE: Decimal = Decimal(dec!(0.02));

/// Floor on the minimum payment, unless the balance itself is smaller.
const ABSOLUTE_MINIMUM: Decimal = Decimal::HUNDRED;

/// Balances below one cent count as paid off.
const BALANCE_EPSILON: Decimal = Decimal::ONE_CENT;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One month of a payment simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCardPaymentRow {
    /// 1-based month index.
    pub month: u32,
    pub starting_balance: Decimal,
    /// Interest accrued this month, before the payment.
    pub interest: Decimal,
    /// Actual payment; the final month is clipped to exactly what is owed.
    pub payment: Decimal,
    pub principal: Decimal,
    pub ending_balance: Decimal,
    /// Cumulative interest paid through this month.
    pub total_interest_paid: Decimal,
    pub date: NaiveDate,
}

/// Payoff summary derived from a simulation's schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffSummary {
    pub months: u32,
    pub total_interest: Decimal,
    pub total_payment: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Minimum payment policy: monthly interest plus 2% of the balance,
/// floored at 100 — unless the balance is below 100, in which case the
/// minimum is the balance itself.
pub fn calculate_minimum_payment(
    balance: &str,
    monthly_rate_percent: &str,
) -> DebtEngineResult<Decimal> {
    let balance = Decimal::parse(balance);
    let rate = Decimal::parse(monthly_rate_percent).divide(Decimal::HUNDRED)?;

    let interest = balance.multiply(rate);
    let minimum = interest.add(balance.multiply(PRINCIPAL_PORTION_RATE));

    if balance.is_less_than(ABSOLUTE_MINIMUM) {
        return Ok(balance);
    }
    if minimum.is_less_than(ABSOLUTE_MINIMUM) {
        return Ok(ABSOLUTE_MINIMUM);
    }
    Ok(minimum)
}

/// Total interest accrued over a fixed horizon with no payments at
/// all, compounding monthly. The "cost of doing nothing" figure.
pub fn calculate_interest_cost(
    balance: &str,
    monthly_rate_percent: &str,
    months: u32,
) -> DebtEngineResult<Decimal> {
    let rate = Decimal::parse(monthly_rate_percent).divide(Decimal::HUNDRED)?;

    let mut current_balance = Decimal::parse(balance);
    let mut total_interest = Decimal::ZERO;

    for _ in 0..months {
        let monthly_interest = current_balance.multiply(rate);
        total_interest = total_interest.add(monthly_interest);
        current_balance = current_balance.add(monthly_interest);
    }

    Ok(total_interest)
}

/// Simulate paying a constant amount against a revolving balance until
/// it clears or the 360-month cap is reached.
///
/// Fails with `NonAmortizingPayment` the moment a month's payment does
/// not exceed the interest accrued in that month: such a payment can
/// never shrink the balance, and the error embeds both figures so the
/// caller can tell the user what to pay instead.
pub fn simulate_payments(
    balance: &str,
    monthly_rate_percent: &str,
    monthly_payment: &str,
    start_date: Option<NaiveDate>,
) -> DebtEngineResult<Vec<CreditCardPaymentRow>> {
    let rate = Decimal::parse(monthly_rate_percent).divide(Decimal::HUNDRED)?;
    let payment = Decimal::parse(monthly_payment);

    if payment.is_less_than(Decimal::ONE_CENT) {
        return Err(DebtEngineError::InvalidInput {
            field: "monthly_payment".into(),
            reason: "must be greater than zero".into(),
        });
    }

    let start = start_date.unwrap_or_else(|| Utc::now().date_naive());
    let mut schedule = Vec::new();
    let mut current_balance = Decimal::parse(balance);
    let mut total_interest = Decimal::ZERO;
    let mut month = 1;

    while current_balance.is_greater_than(BALANCE_EPSILON) && month <= MAX_SIMULATION_MONTHS {
        let starting_balance = current_balance;
        let interest = current_balance.multiply(rate);
        let balance_with_interest = current_balance.add(interest);

        // The last payment is clipped to exactly what is owed.
        let actual_payment = if balance_with_interest.is_less_than(payment) {
            balance_with_interest
        } else {
            payment
        };

        if actual_payment.is_less_than(interest) || actual_payment.is_equal(interest) {
            return Err(DebtEngineError::NonAmortizingPayment {
                payment: actual_payment,
                interest,
            });
        }

        let principal = actual_payment.subtract(interest);
        let ending_balance = balance_with_interest.subtract(actual_payment);
        total_interest = total_interest.add(interest);

        schedule.push(CreditCardPaymentRow {
            month,
            starting_balance,
            interest,
            payment: actual_payment,
            principal,
            ending_balance,
            total_interest_paid: total_interest,
            date: payment_date(start, month)?,
        });

        current_balance = ending_balance;
        month += 1;
    }

    Ok(schedule)
}

/// Months-to-payoff summary, derived from the simulated schedule (the
/// last row's cumulative interest, and the summed payments) so the
/// summary can never disagree with the detail.
pub fn calculate_payoff_time(
    balance: &str,
    monthly_rate_percent: &str,
    monthly_payment: &str,
) -> DebtEngineResult<PayoffSummary> {
    let schedule = simulate_payments(balance, monthly_rate_percent, monthly_payment, None)?;

    let Some(last) = schedule.last() else {
        return Ok(PayoffSummary {
            months: 0,
            total_interest: Decimal::ZERO,
            total_payment: Decimal::ZERO,
        });
    };

    let total_payment = schedule
        .iter()
        .fold(Decimal::ZERO, |sum, row| sum.add(row.payment));

    Ok(PayoffSummary {
        months: schedule.len() as u32,
        total_interest: last.total_interest_paid,
        total_payment,
    })
}
