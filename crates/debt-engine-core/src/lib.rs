//! Deterministic debt-math engine.
//!
//! Amortization schedules for fixed-installment and declining-balance
//! loans, credit-card minimum-payment and payoff-time simulation, and
//! early-payment savings, all computed over an exact [`Decimal`]
//! primitive. Every function is a pure, synchronous computation: no
//! I/O, no shared state, safe to call from any thread.

pub mod credit_card;
pub mod decimal;
pub mod error;
pub mod loan;
pub mod savings;

pub use decimal::{format_currency, format_percentage, Decimal};
pub use error::DebtEngineError;

/// Standard result type for all engine operations
pub type DebtEngineResult<T> = Result<T, DebtEngineError>;
