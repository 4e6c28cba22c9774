use chrono::NaiveDate;
use clap::Args;
use serde_json::{json, Value};

use debt_engine_core::credit_card;

/// Arguments for the minimum-payment calculation
#[derive(Args)]
pub struct MinimumPaymentArgs {
    /// Outstanding card balance
    #[arg(long)]
    pub balance: String,

    /// Monthly interest rate in percent (e.g. 3.5)
    #[arg(long, alias = "rate")]
    pub monthly_rate: String,
}

pub fn run_minimum_payment(args: MinimumPaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let minimum = credit_card::calculate_minimum_payment(&args.balance, &args.monthly_rate)?;
    Ok(json!({ "minimum_payment": minimum.to_fixed(2) }))
}

/// Arguments for the no-payment interest projection
#[derive(Args)]
pub struct InterestCostArgs {
    /// Outstanding card balance
    #[arg(long)]
    pub balance: String,

    /// Monthly interest rate in percent
    #[arg(long, alias = "rate")]
    pub monthly_rate: String,

    /// Projection horizon in months
    #[arg(long)]
    pub months: u32,
}

pub fn run_interest_cost(args: InterestCostArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cost =
        credit_card::calculate_interest_cost(&args.balance, &args.monthly_rate, args.months)?;
    Ok(json!({ "total_interest": cost.to_fixed(2) }))
}

/// Arguments for the fixed-payment simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Outstanding card balance
    #[arg(long)]
    pub balance: String,

    /// Monthly interest rate in percent
    #[arg(long, alias = "rate")]
    pub monthly_rate: String,

    /// Constant monthly payment
    #[arg(long)]
    pub payment: String,

    /// Reference date for the schedule (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule = credit_card::simulate_payments(
        &args.balance,
        &args.monthly_rate,
        &args.payment,
        args.start_date,
    )?;
    Ok(serde_json::to_value(schedule)?)
}

/// Arguments for the payoff-time summary
#[derive(Args)]
pub struct PayoffArgs {
    /// Outstanding card balance
    #[arg(long)]
    pub balance: String,

    /// Monthly interest rate in percent
    #[arg(long, alias = "rate")]
    pub monthly_rate: String,

    /// Constant monthly payment
    #[arg(long)]
    pub payment: String,
}

pub fn run_payoff(args: PayoffArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let summary =
        credit_card::calculate_payoff_time(&args.balance, &args.monthly_rate, &args.payment)?;
    Ok(serde_json::to_value(summary)?)
}
