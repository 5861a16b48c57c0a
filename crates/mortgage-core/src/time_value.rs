use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

/// Convert an annual nominal percentage (6.5 = 6.5%) to a monthly decimal rate.
pub fn monthly_rate(annual_pct: Decimal) -> Rate {
    annual_pct / dec!(100) / dec!(12)
}

/// Level monthly payment that amortises `principal` over `nper` months.
///
/// `P = L * r * (1+r)^n / ((1+r)^n - 1)`, degrading to `L / n` at `r = 0`.
/// Returns zero when there is nothing to amortise or no periods to do it in.
/// If `(1+r)^n` exceeds the decimal range the payment tends to `L * r`.
pub fn level_payment(principal: Money, rate: Rate, nper: u32) -> Money {
    if principal <= Decimal::ZERO || nper == 0 {
        return Decimal::ZERO;
    }

    let n = Decimal::from(nper);
    if rate.is_zero() {
        return principal / n;
    }

    let factor = match (Decimal::ONE + rate).checked_powu(u64::from(nper)) {
        Some(f) => f,
        None => return principal * rate,
    };
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return principal / n;
    }

    match (principal * rate).checked_mul(factor) {
        Some(numerator) => numerator / denominator,
        None => principal * rate * (factor / denominator),
    }
}
