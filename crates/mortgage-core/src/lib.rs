pub mod error;
pub mod loan;
pub mod pmi;
pub mod schedule;
pub mod time_value;
pub mod types;

#[cfg(feature = "reporting")]
pub mod reporting;

#[cfg(feature = "comparison")]
pub mod compare;

#[cfg(feature = "presets")]
pub mod presets;

pub use error::MortgageError;
pub use loan::{ExtraPayments, LoanInput, OneTimePayment};
pub use pmi::{estimate_pmi, PmiMode};
pub use schedule::{analyze_mortgage, calculate_mortgage, AmortizationRow, MortgageOutput};
pub use types::*;

/// Standard result type for all mortgage operations
pub type MortgageResult<T> = Result<T, MortgageError>;
