use thiserror::Error;

use crate::decimal::Decimal;

#[derive(Debug, Error)]
pub enum DebtEngineError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Non-finite result in {context}")]
    NonFiniteResult { context: String },

    #[error("Non-amortizing payment: the monthly payment ({payment}) must exceed the monthly interest ({interest}), otherwise the balance never decreases")]
    NonAmortizingPayment { payment: Decimal, interest: Decimal },

    #[error("Date error: {0}")]
    DateError(String),
}
