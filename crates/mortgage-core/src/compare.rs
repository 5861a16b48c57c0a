//! Side-by-side comparison of two mortgage scenarios.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::loan::LoanInput;
use crate::schedule::{calculate_mortgage, validate_date_range, MortgageOutput};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::MortgageResult;

/// Differences smaller than one currency unit are reported as neutral.
const NEUTRAL_BAND: Money = Decimal::ONE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareInput {
    pub scenario_a: LoanInput,
    pub scenario_b: LoanInput,
}

/// One metric in both scenarios. Lower is better for every compared metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub label: String,
    pub value_a: Money,
    pub value_b: Money,
    /// `value_b - value_a`
    pub difference: Money,
    pub is_neutral: bool,
    /// B is cheaper by at least the neutral band.
    pub favours_b: bool,
}

impl MetricDelta {
    fn new(label: &str, value_a: Money, value_b: Money) -> Self {
        let difference = value_b - value_a;
        let is_neutral = difference.abs() < NEUTRAL_BAND;
        MetricDelta {
            label: label.to_string(),
            value_a,
            value_b,
            difference,
            is_neutral,
            favours_b: !is_neutral && difference < Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub monthly_payment: MetricDelta,
    pub total_interest: MetricDelta,
    pub total_cost: MetricDelta,
}

pub fn compare_scenarios(a: &MortgageOutput, b: &MortgageOutput) -> ScenarioComparison {
    ScenarioComparison {
        monthly_payment: MetricDelta::new(
            "Monthly Payment",
            a.total_monthly_payment,
            b.total_monthly_payment,
        ),
        total_interest: MetricDelta::new(
            "Total Interest",
            a.total_interest_paid,
            b.total_interest_paid,
        ),
        total_cost: MetricDelta::new("Total Cost", a.total_cost, b.total_cost),
    }
}

/// Result of [`analyze_comparison`]: both summaries plus the deltas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareOutput {
    pub scenario_a: MortgageOutput,
    pub scenario_b: MortgageOutput,
    pub comparison: ScenarioComparison,
}

pub fn analyze_comparison(input: &CompareInput) -> MortgageResult<ComputationOutput<CompareOutput>> {
    let start = Instant::now();
    for scenario in [&input.scenario_a, &input.scenario_b] {
        scenario.validate()?;
        validate_date_range(scenario)?;
    }

    let scenario_a = calculate_mortgage(&input.scenario_a);
    let scenario_b = calculate_mortgage(&input.scenario_b);
    let comparison = compare_scenarios(&scenario_a, &scenario_b);

    let mut warnings = Vec::new();
    if scenario_a.reached_safety_bound || scenario_b.reached_safety_bound {
        warnings.push("At least one scenario did not pay off within twice its term".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Scenario comparison of level-payment amortization schedules",
        input,
        warnings,
        elapsed,
        CompareOutput {
            scenario_a,
            scenario_b,
            comparison,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MortgageError;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn input() -> LoanInput {
        LoanInput::default_for(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
    }

    #[test]
    fn test_delta_neutral_band() {
        let d = MetricDelta::new("x", dec!(100), dec!(100.5));
        assert!(d.is_neutral);
        assert!(!d.favours_b);

        let d = MetricDelta::new("x", dec!(100), dec!(90));
        assert_eq!(d.difference, dec!(-10));
        assert!(d.favours_b);

        let d = MetricDelta::new("x", dec!(100), dec!(110));
        assert!(!d.is_neutral);
        assert!(!d.favours_b);
    }

    #[test]
    fn test_shorter_term_costs_more_monthly_less_interest() {
        let a = input();
        let mut b = input();
        b.term_years = 15;
        let cmp = compare_scenarios(&calculate_mortgage(&a), &calculate_mortgage(&b));
        assert!(cmp.monthly_payment.difference > Decimal::ZERO);
        assert!(!cmp.monthly_payment.favours_b);
        assert!(cmp.total_interest.favours_b);
    }

    #[test]
    fn test_scenario_beyond_calendar_range_rejected() {
        let mut far = input();
        far.start_date = NaiveDate::from_ymd_opt(262_140, 1, 1).unwrap();
        let result = analyze_comparison(&CompareInput {
            scenario_a: input(),
            scenario_b: far,
        });
        assert!(matches!(result, Err(MortgageError::DateError(_))));
    }

    #[test]
    fn test_identical_scenarios_are_neutral() {
        let out = analyze_comparison(&CompareInput {
            scenario_a: input(),
            scenario_b: input(),
        })
        .unwrap();
        let cmp = &out.result.comparison;
        assert!(cmp.monthly_payment.is_neutral);
        assert!(cmp.total_interest.is_neutral);
        assert!(cmp.total_cost.is_neutral);
    }
}
