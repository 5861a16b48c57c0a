//! Private mortgage insurance estimate.
//!
//! The premium is a flat 0.5% of the loan per year whenever loan-to-value is
//! above 80%. It does not scale with LTV and does not drop off as the loan
//! amortises below the threshold. Treat it as an illustrative figure for
//! pre-filling a form, never as an underwriting quote.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::loan::LoanInput;
use crate::types::{Money, Rate};

/// LTV above which PMI is charged.
pub const PMI_LTV_THRESHOLD: Rate = dec!(0.8);

/// Annual premium as a fraction of the loan amount.
pub const PMI_ANNUAL_RATE: Rate = dec!(0.005);

/// `loan_amount / home_price`, or `None` when the home price is zero.
pub fn loan_to_value(loan_amount: Money, home_price: Money) -> Option<Rate> {
    if home_price.is_zero() {
        return None;
    }
    Some(loan_amount / home_price)
}

/// Monthly PMI premium for a loan against a property of `home_price`.
pub fn estimate_pmi(loan_amount: Money, home_price: Money) -> Money {
    match loan_to_value(loan_amount, home_price) {
        Some(ltv) if ltv > PMI_LTV_THRESHOLD => loan_amount * PMI_ANNUAL_RATE / dec!(12),
        _ => Decimal::ZERO,
    }
}

/// Where the PMI figure on a [`LoanInput`] comes from.
///
/// A form starts in `Auto` and re-estimates whenever price or down payment
/// changes. Typing a figure switches it to `Manual` until auto is re-enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "amount")]
pub enum PmiMode {
    #[default]
    Auto,
    Manual(Money),
}

impl PmiMode {
    pub fn resolve(&self, loan_amount: Money, home_price: Money) -> Money {
        match self {
            PmiMode::Auto => estimate_pmi(loan_amount, home_price),
            PmiMode::Manual(amount) => *amount,
        }
    }
}

impl LoanInput {
    /// Copy of this input with `pmi` filled in according to `mode`.
    pub fn with_pmi_mode(&self, mode: PmiMode) -> LoanInput {
        LoanInput {
            pmi: mode.resolve(self.loan_amount(), self.home_price),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_no_pmi_at_eighty_percent() {
        assert_eq!(estimate_pmi(dec!(240_000), dec!(300_000)), Decimal::ZERO);
    }

    #[test]
    fn test_flat_rate_above_eighty_percent() {
        assert_eq!(estimate_pmi(dec!(270_000), dec!(300_000)), dec!(112.5));
        // Same flat rate regardless of how far above the threshold.
        assert_eq!(estimate_pmi(dec!(297_000), dec!(300_000)), dec!(123.75));
    }

    #[test]
    fn test_zero_home_price_guarded() {
        assert_eq!(estimate_pmi(dec!(100_000), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(loan_to_value(dec!(100_000), Decimal::ZERO), None);
    }

    #[test]
    fn test_mode_resolution() {
        let mut input = LoanInput::default_for(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        input.down_payment = dec!(20_000);

        let auto = input.with_pmi_mode(PmiMode::Auto);
        assert_eq!(auto.pmi, dec!(380_000) * dec!(0.005) / dec!(12));

        let manual = input.with_pmi_mode(PmiMode::Manual(dec!(99)));
        assert_eq!(manual.pmi, dec!(99));
    }

    #[test]
    fn test_mode_json_shape() {
        let manual: PmiMode = serde_json::from_str(r#"{"mode":"manual","amount":"42"}"#).unwrap();
        assert_eq!(manual, PmiMode::Manual(dec!(42)));
        let auto: PmiMode = serde_json::from_str(r#"{"mode":"auto"}"#).unwrap();
        assert_eq!(auto, PmiMode::Auto);
    }
}
