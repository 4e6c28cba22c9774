//! Interest saved by a lump-sum early payment: the original schedule
//! compared against a reduced-principal schedule over the same term.

use serde::{Deserialize, Serialize};

use crate::decimal::Decimal;
use crate::loan::{calculate_loan, InterestType, LoanCalculationInput};
use crate::DebtEngineResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarlyPaymentSavings {
    /// Installment on the reduced balance; zero when the lump sum
    /// retires the loan entirely.
    pub new_monthly_payment: Decimal,
    pub interest_savings: Decimal,
    /// Only meaningful in the full-payoff branch, where it equals the
    /// remaining term. A partial prepayment keeps the term unchanged
    /// and reports 0 here.
    pub months_saved: u32,
}

/// Quantify the interest saved by paying `early_payment_amount` off an
/// outstanding balance today instead of following the schedule.
pub fn calculate_early_payment_savings(
    current_balance: &str,
    annual_interest_rate: &str,
    remaining_months: u32,
    early_payment_amount: &str,
    interest_type: InterestType,
) -> DebtEngineResult<EarlyPaymentSavings> {
    let original = calculate_loan(&LoanCalculationInput {
        principal: current_balance.to_string(),
        annual_interest_rate: annual_interest_rate.to_string(),
        number_of_months: remaining_months,
        interest_type,
        start_date: None,
    })?;

    let new_balance =
        Decimal::parse(current_balance).subtract(Decimal::parse(early_payment_amount));

    // Lump sum covers the whole balance: the loan is retired, and the
    // saving is every bit of interest the original would have charged.
    if new_balance.is_negative() || new_balance.is_zero() {
        return Ok(EarlyPaymentSavings {
            new_monthly_payment: Decimal::ZERO,
            interest_savings: original.total_interest,
            months_saved: remaining_months,
        });
    }

    let reduced = calculate_loan(&LoanCalculationInput {
        principal: new_balance.to_fixed(2),
        annual_interest_rate: annual_interest_rate.to_string(),
        number_of_months: remaining_months,
        interest_type,
        start_date: None,
    })?;

    let interest_savings = original.total_interest.subtract(reduced.total_interest);

    Ok(EarlyPaymentSavings {
        new_monthly_payment: reduced.monthly_payment,
        interest_savings,
        months_saved: 0,
    })
}
