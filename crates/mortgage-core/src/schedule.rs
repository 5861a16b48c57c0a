//! Amortization schedule builder.
//!
//! Produces the month-by-month schedule for a fixed-rate loan with optional
//! extra principal, plus a no-extras baseline run over the same terms so the
//! caller can report interest and time saved. Both runs share one step
//! function; the baseline simply never receives any extra principal.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::MortgageError;
use crate::loan::{ExtraPayments, LoanInput};
use crate::pmi::{estimate_pmi, loan_to_value, PMI_LTV_THRESHOLD};
use crate::time_value::{level_payment, monthly_rate};
use crate::types::{add_months, first_of_month, with_metadata, year_month, ComputationOutput, Money, Rate, YearMonth};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Balance at or below which the loan is considered fully paid.
const BALANCE_EPSILON: Decimal = dec!(0.01);

/// The scheduled run stops after this many multiples of the contractual term.
const SAFETY_BOUND_MULTIPLE: u32 = 2;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One scheduled month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// First day of the payment month.
    pub date: NaiveDate,
    /// Fixed principal-and-interest payment.
    pub payment: Money,
    /// Scheduled principal portion of `payment`.
    pub principal: Money,
    pub interest: Money,
    /// Monthly + yearly + one-time extra principal, clipped to the balance.
    pub extra_payment: Money,
    /// `payment + extra_payment`; escrow items are not included.
    pub total_payment: Money,
    /// Remaining principal after this month, floored at zero.
    pub balance: Money,
    pub total_interest_paid: Money,
    pub total_principal_paid: Money,
}

/// Summary figures and the full schedule for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageOutput {
    pub loan_amount: Money,
    pub monthly_principal_and_interest: Money,
    pub monthly_property_tax: Money,
    pub monthly_home_insurance: Money,
    pub monthly_hoa: Money,
    pub monthly_pmi: Money,
    /// P&I plus all escrow items, before any extra principal.
    pub total_monthly_payment: Money,
    pub total_interest_paid: Money,
    /// Down payment + principal + interest + escrow over the scheduled months.
    pub total_cost: Money,
    /// Month of the last scheduled payment. With an empty schedule this is
    /// the start month, normalised to its first day like every row date.
    pub payoff_date: NaiveDate,
    pub amortization_schedule: Vec<AmortizationRow>,
    /// Baseline interest minus actual interest, floored at zero.
    pub interest_saved: Money,
    /// Baseline months minus actual months, floored at zero.
    pub time_saved_months: u32,
    /// Contractual number of monthly payments (`term_years * 12`).
    pub total_payments: u32,
    /// Months actually scheduled.
    pub months_to_payoff: u32,
    /// True when the schedule stopped at the iteration ceiling with a balance left.
    pub reached_safety_bound: bool,
}

// ---------------------------------------------------------------------------
// Step function
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
struct MonthStep {
    interest: Money,
    principal: Money,
    extra: Money,
}

/// Split one month's payment. Extra principal is clipped so the balance lands
/// exactly on zero; any overshoot is dropped rather than carried forward.
///
/// `None` when a figure leaves the decimal range, which only a balance that
/// keeps growing can reach.
fn step_month(balance: Money, rate: Rate, payment: Money, scheduled_extra: Money) -> Option<MonthStep> {
    let interest = balance.checked_mul(rate)?;
    let mut principal = payment.checked_sub(interest)?;
    let mut extra = scheduled_extra;

    if balance < principal.checked_add(extra)? {
        extra = balance.checked_sub(principal)?;
        if extra < Decimal::ZERO {
            principal = balance;
            extra = Decimal::ZERO;
        }
    }

    Some(MonthStep {
        interest,
        principal,
        extra,
    })
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Extra principal resolved for fast per-month lookup.
struct ExtraPlan {
    monthly: Money,
    yearly: Money,
    one_time: HashMap<YearMonth, Money>,
}

impl ExtraPlan {
    fn new(extras: &ExtraPayments) -> Self {
        ExtraPlan {
            monthly: extras.monthly,
            yearly: extras.yearly,
            one_time: extras.one_time_by_month(),
        }
    }

    /// Extra principal scheduled for the 0-based `month_index` falling in `date`.
    fn for_month(&self, month_index: u32, date: NaiveDate) -> Money {
        let mut extra = self.monthly;
        if month_index > 0 && month_index % 12 == 0 {
            extra = extra.saturating_add(self.yearly);
        }
        if let Some(amount) = self.one_time.get(&year_month(date)) {
            extra = extra.saturating_add(*amount);
        }
        extra
    }
}

struct Terms {
    loan_amount: Money,
    rate: Rate,
    payment: Money,
    start: NaiveDate,
}

#[derive(Debug, Default)]
struct Simulation {
    rows: Vec<AmortizationRow>,
    total_interest: Money,
    total_principal: Money,
    months: u32,
    balance: Money,
    /// The run stopped early because the balance left the decimal range.
    overflowed: bool,
}

/// Running totals after one more month, or `None` on overflow.
struct Advance {
    balance: Money,
    total_interest: Money,
    total_principal: Money,
    total_payment: Money,
}

fn advance(sim: &Simulation, step: &MonthStep, payment: Money) -> Option<Advance> {
    let principal_this_month = step.principal.checked_add(step.extra)?;
    Some(Advance {
        balance: sim.balance.checked_sub(principal_this_month)?,
        total_interest: sim.total_interest.checked_add(step.interest)?,
        total_principal: sim.total_principal.checked_add(principal_this_month)?,
        total_payment: payment.checked_add(step.extra)?,
    })
}

/// Run the loan forward until it is paid off or `max_months` is reached.
/// Without a plan no extra principal is applied.
fn simulate(terms: &Terms, plan: Option<&ExtraPlan>, max_months: u32) -> Simulation {
    let mut sim = Simulation {
        rows: Vec::with_capacity(max_months.min(1_200) as usize),
        balance: terms.loan_amount,
        ..Default::default()
    };

    while sim.balance > BALANCE_EPSILON && sim.months < max_months {
        let date = match add_months(terms.start, sim.months) {
            Some(d) => d,
            None => break,
        };
        let scheduled_extra = plan.map_or(Decimal::ZERO, |p| p.for_month(sim.months, date));
        let next = step_month(sim.balance, terms.rate, terms.payment, scheduled_extra)
            .and_then(|step| advance(&sim, &step, terms.payment).map(|next| (step, next)));
        let Some((step, next)) = next else {
            warn!(months = sim.months, "balance left decimal range; schedule stopped");
            sim.overflowed = true;
            break;
        };

        sim.balance = next.balance;
        sim.total_interest = next.total_interest;
        sim.total_principal = next.total_principal;

        sim.rows.push(AmortizationRow {
            date,
            payment: terms.payment,
            principal: step.principal,
            interest: step.interest,
            extra_payment: step.extra,
            total_payment: next.total_payment,
            balance: sim.balance.max(Decimal::ZERO),
            total_interest_paid: sim.total_interest,
            total_principal_paid: sim.total_principal,
        });
        sim.months += 1;
    }

    sim
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the amortization schedule and summary for `input`.
///
/// Deterministic and infallible: malformed amounts are clamped, a zero rate
/// amortises linearly, and a loan that never pays down stops at twice the
/// contractual term with its residual balance visible on the last row. A
/// balance that grows past the decimal range stops the schedule at that
/// month instead and is reported the same way.
pub fn calculate_mortgage(input: &LoanInput) -> MortgageOutput {
    let loan_amount = input.loan_amount();
    let rate = monthly_rate(input.interest_rate);
    let total_payments = input.total_payments();
    let start = first_of_month(input.start_date);

    let monthly_principal_and_interest = level_payment(loan_amount, rate, total_payments);

    let monthly_property_tax = input.monthly_property_tax();
    let monthly_home_insurance = input.monthly_home_insurance();
    let monthly_escrow = input.monthly_escrow();

    let terms = Terms {
        loan_amount,
        rate,
        payment: monthly_principal_and_interest,
        start,
    };

    let baseline = simulate(&terms, None, total_payments);
    let plan = ExtraPlan::new(&input.extras);
    let max_months = total_payments.saturating_mul(SAFETY_BOUND_MULTIPLE);
    let actual = simulate(&terms, Some(&plan), max_months);

    let reached_safety_bound = actual.overflowed
        || (max_months > 0 && actual.months >= max_months && actual.balance > BALANCE_EPSILON);

    let payoff_date = actual.rows.last().map_or(start, |row| row.date);
    let total_cost = input
        .down_payment
        .saturating_add(actual.total_principal)
        .saturating_add(actual.total_interest)
        .saturating_add(monthly_escrow.saturating_mul(Decimal::from(actual.months)));

    MortgageOutput {
        loan_amount,
        monthly_principal_and_interest,
        monthly_property_tax,
        monthly_home_insurance,
        monthly_hoa: input.hoa,
        monthly_pmi: input.pmi,
        total_monthly_payment: monthly_principal_and_interest + monthly_escrow,
        total_interest_paid: actual.total_interest,
        total_cost,
        payoff_date,
        interest_saved: baseline
            .total_interest
            .saturating_sub(actual.total_interest)
            .max(Decimal::ZERO),
        time_saved_months: baseline.months.saturating_sub(actual.months),
        total_payments,
        months_to_payoff: actual.months,
        reached_safety_bound,
        amortization_schedule: actual.rows,
    }
}

/// Validate `input`, build the schedule and wrap it with methodology and warnings.
pub fn analyze_mortgage(input: &LoanInput) -> MortgageResult<ComputationOutput<MortgageOutput>> {
    let start = Instant::now();
    input.validate()?;
    validate_date_range(input)?;

    let output = calculate_mortgage(input);
    let warnings = collect_warnings(input, &output);

    if output.reached_safety_bound {
        warn!(
            months = output.months_to_payoff,
            "schedule stopped at iteration ceiling with residual balance"
        );
    }
    debug!(
        loan_amount = %output.loan_amount,
        months = output.months_to_payoff,
        interest = %output.total_interest_paid,
        "mortgage schedule built"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization with extra principal against a no-extras baseline",
        input,
        warnings,
        elapsed,
        output,
    ))
}

pub(crate) fn validate_date_range(input: &LoanInput) -> MortgageResult<()> {
    let horizon = input.total_payments().saturating_mul(SAFETY_BOUND_MULTIPLE);
    if add_months(first_of_month(input.start_date), horizon).is_none() {
        return Err(MortgageError::DateError(format!(
            "Schedule starting {} cannot extend {} months",
            input.start_date, horizon
        )));
    }
    Ok(())
}

fn collect_warnings(input: &LoanInput, output: &MortgageOutput) -> Vec<String> {
    let mut warnings = Vec::new();

    if output.reached_safety_bound {
        let residual = output
            .amortization_schedule
            .last()
            .map_or(Decimal::ZERO, |row| row.balance);
        warnings.push(format!(
            "Loan did not pay off within {} months; residual balance {} remains",
            output.months_to_payoff,
            residual.round_dp(2)
        ));
    }

    if let Some(ltv) = loan_to_value(output.loan_amount, input.home_price) {
        if ltv > PMI_LTV_THRESHOLD && input.pmi.is_zero() {
            warnings.push(format!(
                "Loan-to-value of {}% exceeds 80% but no PMI was supplied (estimate: {}/month)",
                (ltv * dec!(100)).round_dp(2),
                estimate_pmi(output.loan_amount, input.home_price).round_dp(2)
            ));
        } else if ltv <= PMI_LTV_THRESHOLD && input.pmi > Decimal::ZERO {
            warnings.push(format!(
                "PMI supplied although loan-to-value is {}%",
                (ltv * dec!(100)).round_dp(2)
            ));
        }
    }

    if output.loan_amount.is_zero() && !input.extras.is_empty() {
        warnings.push("Extra payments ignored: nothing is borrowed".into());
    } else if let (Some(first), Some(last)) = (
        output.amortization_schedule.first(),
        output.amortization_schedule.last(),
    ) {
        let window = year_month(first.date)..=year_month(last.date);
        for payment in &input.extras.one_time {
            if !payment.amount.is_zero() && !window.contains(&year_month(payment.date)) {
                warnings.push(format!(
                    "One-time payment dated {} falls outside the schedule and was not applied",
                    payment.date
                ));
            }
        }
    }

    warnings
}
