mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::credit_card::{InterestCostArgs, MinimumPaymentArgs, PayoffArgs, SimulateArgs};
use commands::loan::{LoanArgs, SavingsArgs};

/// Deterministic debt-math calculations
#[derive(Parser)]
#[command(
    name = "debtcalc",
    version,
    about = "Loan amortization and credit-card payoff calculations",
    long_about = "A CLI for deterministic debt calculations with decimal precision. \
                  Supports fixed-installment and declining-balance amortization \
                  schedules, credit-card minimum payments and payoff simulation, \
                  and early-payment savings."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Amortization schedule for a fixed-installment or declining-balance loan
    Loan(LoanArgs),
    /// Interest saved by a lump-sum early payment
    Savings(SavingsArgs),
    /// Credit-card minimum payment (interest + 2% of the balance, floored)
    MinimumPayment(MinimumPaymentArgs),
    /// Compound interest cost of leaving a balance unpaid
    InterestCost(InterestCostArgs),
    /// Month-by-month credit-card payment simulation
    Simulate(SimulateArgs),
    /// Months, interest, and total paid until a balance clears
    Payoff(PayoffArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Loan(args) => commands::loan::run_loan(args),
        Commands::Savings(args) => commands::loan::run_savings(args),
        Commands::MinimumPayment(args) => commands::credit_card::run_minimum_payment(args),
        Commands::InterestCost(args) => commands::credit_card::run_interest_cost(args),
        Commands::Simulate(args) => commands::credit_card::run_simulate(args),
        Commands::Payoff(args) => commands::credit_card::run_payoff(args),
        Commands::Version => {
            println!("debtcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
