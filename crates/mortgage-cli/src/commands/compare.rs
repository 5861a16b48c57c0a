use clap::Args;
use serde_json::Value;

use mortgage_core::compare::{analyze_comparison, CompareInput};

use crate::input;

#[derive(Args)]
pub struct CompareArgs {
    /// JSON file with `scenario_a` and `scenario_b` loan inputs
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let compare_input: CompareInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--input <file.json> or stdin required for scenario comparison".into());
    };
    let result = analyze_comparison(&compare_input)?;
    Ok(serde_json::to_value(result)?)
}
