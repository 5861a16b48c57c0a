use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use mortgage_core::pmi::{estimate_pmi, loan_to_value};

#[derive(Args)]
pub struct PmiArgs {
    /// Amount borrowed
    #[arg(long)]
    pub loan_amount: Decimal,

    /// Property value
    #[arg(long, alias = "price")]
    pub home_price: Decimal,
}

pub fn run_pmi(args: PmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let monthly_pmi = estimate_pmi(args.loan_amount, args.home_price);
    Ok(json!({
        "loan_amount": args.loan_amount,
        "home_price": args.home_price,
        "loan_to_value": loan_to_value(args.loan_amount, args.home_price),
        "monthly_pmi": monthly_pmi,
    }))
}
