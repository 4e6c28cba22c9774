use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use serde_json::Value;

use debt_engine_core::loan::{self, InterestType, LoanCalculationInput};
use debt_engine_core::savings;

/// Interest-allocation policy for the schedule
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum InterestTypeArg {
    /// Constant total payment (annuity)
    Fixed,
    /// Constant principal portion, decreasing total payment
    Declining,
}

impl From<InterestTypeArg> for InterestType {
    fn from(value: InterestTypeArg) -> Self {
        match value {
            InterestTypeArg::Fixed => InterestType::Fixed,
            InterestTypeArg::Declining => InterestType::Declining,
        }
    }
}

/// Arguments for loan amortization
#[derive(Args)]
pub struct LoanArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: String,

    /// Annual interest rate in percent (e.g. 24 for 24%)
    #[arg(long, alias = "rate")]
    pub annual_rate: String,

    /// Term in months
    #[arg(long)]
    pub months: u32,

    /// Interest allocation policy
    #[arg(long, value_enum, default_value = "fixed")]
    pub interest_type: InterestTypeArg,

    /// Reference date for the schedule (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run_loan(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = LoanCalculationInput {
        principal: args.principal,
        annual_interest_rate: args.annual_rate,
        number_of_months: args.months,
        interest_type: args.interest_type.into(),
        start_date: args.start_date,
    };

    let result = loan::calculate_loan(&input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for early-payment savings
#[derive(Args)]
pub struct SavingsArgs {
    /// Current outstanding balance
    #[arg(long)]
    pub balance: String,

    /// Annual interest rate in percent
    #[arg(long, alias = "rate")]
    pub annual_rate: String,

    /// Remaining term in months
    #[arg(long)]
    pub months: u32,

    /// Lump-sum early payment amount
    #[arg(long)]
    pub amount: String,

    /// Interest allocation policy of the existing loan
    #[arg(long, value_enum, default_value = "fixed")]
    pub interest_type: InterestTypeArg,
}

pub fn run_savings(args: SavingsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let result = savings::calculate_early_payment_savings(
        &args.balance,
        &args.annual_rate,
        args.months,
        &args.amount,
        args.interest_type.into(),
    )?;
    Ok(serde_json::to_value(result)?)
}
