//! One-click scenario adjustments offered next to the input form.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::loan::LoanInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// 3% down on a 30-year term.
    FirstTimeBuyer,
    /// Same loan on a 15-year term.
    FifteenYearPayoff,
    /// Rate two percentage points higher.
    RateStressTest,
}

impl Preset {
    pub const ALL: [Preset; 3] = [
        Preset::FirstTimeBuyer,
        Preset::FifteenYearPayoff,
        Preset::RateStressTest,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Preset::FirstTimeBuyer => "First-time buyer",
            Preset::FifteenYearPayoff => "15-year payoff",
            Preset::RateStressTest => "Higher-rate stress test",
        }
    }
}

/// Copy of `input` with the preset's overrides applied.
pub fn apply_preset(input: &LoanInput, preset: Preset) -> LoanInput {
    let mut out = input.clone();
    match preset {
        Preset::FirstTimeBuyer => {
            out.down_payment = input.home_price * dec!(0.03);
            out.term_years = 30;
        }
        Preset::FifteenYearPayoff => out.term_years = 15,
        Preset::RateStressTest => out.interest_rate = input.interest_rate + dec!(2),
    }
    out
}
