use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use mortgage_core::loan::{LoanInput, OneTimePayment};
use mortgage_core::pmi::PmiMode;
use mortgage_core::presets::{apply_preset, Preset};
use mortgage_core::reporting::{balance_chart, schedule_view, ScheduleView};
use mortgage_core::schedule::analyze_mortgage;

use crate::input;

/// Loan terms shared by every schedule-producing command.
///
/// Any flag left out falls back to the default scenario: a 400,000 home,
/// 80,000 down, 6.5% over 30 years, 4,800/yr tax, 1,200/yr insurance.
#[derive(Args)]
pub struct LoanArgs {
    /// Path to a JSON `LoanInput` (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Home price
    #[arg(long, alias = "price")]
    pub home_price: Option<Decimal>,

    /// Down payment
    #[arg(long, alias = "down")]
    pub down_payment: Option<Decimal>,

    /// Annual interest rate in percent (6.5 = 6.5%)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, alias = "term")]
    pub term_years: Option<u32>,

    /// Annual property tax
    #[arg(long, alias = "tax")]
    pub property_tax: Option<Decimal>,

    /// Annual home insurance
    #[arg(long, alias = "insurance")]
    pub home_insurance: Option<Decimal>,

    /// Monthly HOA dues
    #[arg(long)]
    pub hoa: Option<Decimal>,

    /// Monthly PMI (disables --auto-pmi)
    #[arg(long)]
    pub pmi: Option<Decimal>,

    /// Estimate PMI from loan-to-value instead of using --pmi
    #[arg(long, conflicts_with = "pmi")]
    pub auto_pmi: bool,

    /// First payment month, YYYY-MM-DD (day ignored; defaults to today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Extra principal every month
    #[arg(long)]
    pub extra_monthly: Option<Decimal>,

    /// Extra principal once a year
    #[arg(long)]
    pub extra_yearly: Option<Decimal>,

    /// One-time extra principal as DATE:AMOUNT, repeatable
    #[arg(long = "one-time", value_parser = parse_one_time)]
    pub one_time: Vec<OneTimePayment>,

    /// Apply a scenario preset before calculating
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PresetArg {
    FirstTimeBuyer,
    FifteenYear,
    RateStress,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::FirstTimeBuyer => Preset::FirstTimeBuyer,
            PresetArg::FifteenYear => Preset::FifteenYearPayoff,
            PresetArg::RateStress => Preset::RateStressTest,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ViewArg {
    Monthly,
    Yearly,
}

#[derive(Args)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Omit the month-by-month schedule from the output
    #[arg(long)]
    pub summary_only: bool,
}

#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Row granularity
    #[arg(long, value_enum, default_value = "yearly")]
    pub view: ViewArg,
}

#[derive(Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

fn parse_one_time(s: &str) -> Result<OneTimePayment, String> {
    let (date, amount) = s
        .split_once(':')
        .ok_or_else(|| format!("expected DATE:AMOUNT, got '{s}'"))?;
    let date: NaiveDate = date
        .trim()
        .parse()
        .map_err(|e| format!("invalid date '{date}': {e}"))?;
    let amount: Decimal = amount
        .trim()
        .parse()
        .map_err(|e| format!("invalid amount '{amount}': {e}"))?;
    Ok(OneTimePayment { date, amount })
}

fn loan_from_flags(args: &LoanArgs) -> LoanInput {
    let start = args.start_date.unwrap_or_else(|| Local::now().date_naive());
    let mut loan = LoanInput::default_for(start);

    if let Some(v) = args.home_price {
        loan.home_price = v;
    }
    if let Some(v) = args.down_payment {
        loan.down_payment = v;
    }
    if let Some(v) = args.interest_rate {
        loan.interest_rate = v;
    }
    if let Some(v) = args.term_years {
        loan.term_years = v;
    }
    if let Some(v) = args.property_tax {
        loan.property_tax = v;
    }
    if let Some(v) = args.home_insurance {
        loan.home_insurance = v;
    }
    if let Some(v) = args.hoa {
        loan.hoa = v;
    }
    if let Some(v) = args.pmi {
        loan.pmi = v;
    }
    if let Some(v) = args.extra_monthly {
        loan.extras.monthly = v;
    }
    if let Some(v) = args.extra_yearly {
        loan.extras.yearly = v;
    }
    loan.extras.one_time = args.one_time.clone();
    loan
}

/// Build the `LoanInput` from --input, piped stdin, or flags, then apply
/// the preset and PMI mode.
pub fn resolve_loan(args: &LoanArgs) -> Result<LoanInput, Box<dyn std::error::Error>> {
    let mut loan: LoanInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        loan_from_flags(args)
    };

    if let Some(preset) = args.preset {
        loan = apply_preset(&loan, preset.into());
    }
    if args.auto_pmi {
        loan = loan.with_pmi_mode(PmiMode::Auto);
    }
    Ok(loan)
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = resolve_loan(&args.loan)?;
    let mut result = analyze_mortgage(&loan)?;
    if args.summary_only {
        result.result.amortization_schedule.clear();
    }
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = resolve_loan(&args.loan)?;
    let result = analyze_mortgage(&loan)?;
    for w in &result.warnings {
        tracing::warn!("{w}");
    }
    let view = match args.view {
        ViewArg::Monthly => ScheduleView::Monthly,
        ViewArg::Yearly => ScheduleView::Yearly,
    };
    Ok(serde_json::to_value(schedule_view(&result.result, view))?)
}

pub fn run_chart(args: ChartArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = resolve_loan(&args.loan)?;
    let result = analyze_mortgage(&loan)?;
    Ok(serde_json::to_value(balance_chart(
        &result.result.amortization_schedule,
    ))?)
}

pub fn run_presets() -> Result<Value, Box<dyn std::error::Error>> {
    let presets: Vec<Value> = Preset::ALL
        .iter()
        .map(|p| json!({ "preset": p, "label": p.label() }))
        .collect();
    Ok(Value::Array(presets))
}
