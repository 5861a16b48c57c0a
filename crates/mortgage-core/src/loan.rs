//! Loan terms and payment modifiers consumed by the schedule builder.
//!
//! `LoanInput` is an immutable value object: every calculation call takes it
//! by reference and derives everything else (loan amount, monthly escrow,
//! payment count) from it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::MortgageError;
use crate::types::{year_month, Money, YearMonth};
use crate::MortgageResult;

/// A lump-sum principal payment made in a specific calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneTimePayment {
    /// Only the year and month are used for matching.
    pub date: NaiveDate,
    pub amount: Money,
}

/// Extra principal applied on top of the scheduled payment.
///
/// Defaults: no monthly extra, no yearly extra, no one-time payments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtraPayments {
    /// Applied every month.
    #[serde(default)]
    pub monthly: Money,
    /// Applied on every 12th payment after the first (0-based month index 12, 24, ...).
    #[serde(default)]
    pub yearly: Money,
    /// Matched by calendar (year, month); entries in the same month are summed.
    #[serde(default)]
    pub one_time: Vec<OneTimePayment>,
}

impl ExtraPayments {
    pub fn is_empty(&self) -> bool {
        self.monthly.is_zero()
            && self.yearly.is_zero()
            && self.one_time.iter().all(|p| p.amount.is_zero())
    }

    /// One-time payments summed per calendar month.
    pub fn one_time_by_month(&self) -> HashMap<YearMonth, Money> {
        let mut index: HashMap<YearMonth, Money> = HashMap::with_capacity(self.one_time.len());
        for payment in &self.one_time {
            *index.entry(year_month(payment.date)).or_insert(Decimal::ZERO) += payment.amount;
        }
        index
    }
}

/// Loan and payment parameters for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Purchase price of the property.
    pub home_price: Money,
    /// Cash paid up front.
    pub down_payment: Money,
    /// Annual nominal rate as a percentage (e.g., 6.5 for 6.5%).
    pub interest_rate: Decimal,
    /// Contractual term in years.
    pub term_years: u32,
    /// Annual property tax.
    pub property_tax: Money,
    /// Annual homeowner's insurance.
    pub home_insurance: Money,
    /// Monthly HOA dues.
    pub hoa: Money,
    /// Monthly private mortgage insurance.
    pub pmi: Money,
    /// Month of the first payment. The day is ignored.
    pub start_date: NaiveDate,
    #[serde(default)]
    pub extras: ExtraPayments,
}

impl LoanInput {
    /// The calculator's starting scenario: a 400k home with 20% down at 6.5% over 30 years.
    pub fn default_for(start_date: NaiveDate) -> Self {
        LoanInput {
            home_price: dec!(400_000),
            down_payment: dec!(80_000),
            interest_rate: dec!(6.5),
            term_years: 30,
            property_tax: dec!(4_800),
            home_insurance: dec!(1_200),
            hoa: Decimal::ZERO,
            pmi: Decimal::ZERO,
            start_date,
            extras: ExtraPayments::default(),
        }
    }

    /// Amount borrowed, clamped at zero when the down payment covers the price.
    pub fn loan_amount(&self) -> Money {
        (self.home_price - self.down_payment).max(Decimal::ZERO)
    }

    pub fn total_payments(&self) -> u32 {
        self.term_years.saturating_mul(12)
    }

    pub fn monthly_property_tax(&self) -> Money {
        self.property_tax / dec!(12)
    }

    pub fn monthly_home_insurance(&self) -> Money {
        self.home_insurance / dec!(12)
    }

    /// Tax + insurance + HOA + PMI for one month.
    pub fn monthly_escrow(&self) -> Money {
        self.monthly_property_tax() + self.monthly_home_insurance() + self.hoa + self.pmi
    }

    /// Range checks for raw user input. The engine itself never calls this;
    /// it clamps instead of failing.
    pub fn validate(&self) -> MortgageResult<()> {
        let non_negative = [
            ("home_price", self.home_price),
            ("down_payment", self.down_payment),
            ("property_tax", self.property_tax),
            ("home_insurance", self.home_insurance),
            ("hoa", self.hoa),
            ("pmi", self.pmi),
            ("extras.monthly", self.extras.monthly),
            ("extras.yearly", self.extras.yearly),
        ];
        for (field, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(MortgageError::InvalidInput {
                    field: field.into(),
                    reason: "Amount cannot be negative".into(),
                });
            }
        }
        if self.interest_rate < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "interest_rate".into(),
                reason: "Interest rate cannot be negative".into(),
            });
        }
        if self.term_years == 0 {
            return Err(MortgageError::InvalidInput {
                field: "term_years".into(),
                reason: "Term must be at least one year".into(),
            });
        }
        if let Some(p) = self.extras.one_time.iter().find(|p| p.amount < Decimal::ZERO) {
            return Err(MortgageError::InvalidInput {
                field: "extras.one_time".into(),
                reason: format!("One-time payment on {} cannot be negative", p.date),
            });
        }
        Ok(())
    }
}
