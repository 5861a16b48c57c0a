use chrono::{Datelike, NaiveDate};
use mortgage_core::loan::{ExtraPayments, LoanInput, OneTimePayment};
use mortgage_core::pmi::estimate_pmi;
use mortgage_core::schedule::{analyze_mortgage, calculate_mortgage, MortgageOutput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn base_input() -> LoanInput {
    // 300k home, 20% down, 6.5% over 30 years, $300/mo tax, $100/mo insurance
    LoanInput {
        home_price: dec!(300_000),
        down_payment: dec!(60_000),
        interest_rate: dec!(6.5),
        term_years: 30,
        property_tax: dec!(3_600),
        home_insurance: dec!(1_200),
        hoa: Decimal::ZERO,
        pmi: Decimal::ZERO,
        start_date: ymd(2026, 1, 1),
        extras: ExtraPayments::default(),
    }
}

fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected ~{expected}, got {actual}"
    );
}

fn assert_balance_invariants(out: &MortgageOutput) {
    let schedule = &out.amortization_schedule;
    for pair in schedule.windows(2) {
        assert!(
            pair[1].balance <= pair[0].balance,
            "balance rose from {} to {} on {}",
            pair[0].balance,
            pair[1].balance,
            pair[1].date
        );
    }
    if let Some(last) = schedule.last() {
        assert!(last.balance <= dec!(0.01), "final balance {}", last.balance);
    }
}

// ===========================================================================
// Concrete scenarios
// ===========================================================================

#[test]
fn test_base_case() {
    let out = calculate_mortgage(&base_input());

    assert_eq!(out.loan_amount, dec!(240_000));
    assert_close(out.monthly_principal_and_interest, dec!(1516.96), dec!(0.01));
    assert_eq!(out.monthly_property_tax, dec!(300));
    assert_eq!(out.monthly_home_insurance, dec!(100));
    assert_close(out.total_monthly_payment, dec!(1916.96), dec!(0.01));
    assert_eq!(out.amortization_schedule.len(), 360);
    assert_eq!(out.months_to_payoff, 360);
    assert_eq!(out.total_payments, 360);
    assert_balance_invariants(&out);
}

#[test]
fn test_payoff_date_is_december_2055() {
    let out = calculate_mortgage(&base_input());
    let last = out.amortization_schedule.last().unwrap();
    assert_eq!(last.date.year(), 2055);
    assert_eq!(last.date.month(), 12);
    assert_eq!(out.payoff_date, last.date);
}

#[test]
fn test_full_down_payment() {
    let mut input = base_input();
    input.down_payment = dec!(300_000);
    let out = calculate_mortgage(&input);

    assert_eq!(out.loan_amount, Decimal::ZERO);
    assert_eq!(out.monthly_principal_and_interest, Decimal::ZERO);
    assert_eq!(out.total_monthly_payment, dec!(400));
    assert!(out.amortization_schedule.is_empty());
    assert_eq!(out.total_interest_paid, Decimal::ZERO);
    assert_eq!(out.payoff_date, ymd(2026, 1, 1));
    assert_eq!(out.total_cost, dec!(300_000));
}

#[test]
fn test_down_payment_above_price_clamps_to_zero() {
    let mut input = base_input();
    input.down_payment = dec!(350_000);
    let out = calculate_mortgage(&input);
    assert_eq!(out.loan_amount, Decimal::ZERO);
    assert!(out.amortization_schedule.is_empty());
}

#[test]
fn test_high_hoa() {
    let mut input = base_input();
    input.hoa = dec!(1_000);
    let out = calculate_mortgage(&input);
    assert_close(out.total_monthly_payment, dec!(2916.96), dec!(0.01));
}

#[test]
fn test_zero_interest_rate() {
    let mut input = base_input();
    input.interest_rate = Decimal::ZERO;
    let out = calculate_mortgage(&input);

    assert_eq!(out.monthly_principal_and_interest, dec!(240_000) / dec!(360));
    assert_eq!(out.total_interest_paid, Decimal::ZERO);
    assert!(out.amortization_schedule.iter().all(|r| r.interest.is_zero()));
    assert_eq!(out.amortization_schedule.len(), 360);
    assert_balance_invariants(&out);
}

#[test]
fn test_fifteen_year_term() {
    let thirty = calculate_mortgage(&base_input());
    let mut input = base_input();
    input.term_years = 15;
    let fifteen = calculate_mortgage(&input);

    assert_eq!(fifteen.amortization_schedule.len(), 180);
    assert!(fifteen.monthly_principal_and_interest > thirty.monthly_principal_and_interest);
    assert!(fifteen.total_interest_paid < thirty.total_interest_paid);
}

#[test]
fn test_overpaying_on_last_month() {
    let mut input = base_input();
    input.extras.monthly = dec!(10_000);
    let out = calculate_mortgage(&input);

    let last = out.amortization_schedule.last().unwrap();
    assert_close(last.balance, Decimal::ZERO, dec!(0.01));
    assert!(last.total_payment <= dec!(10_000) + out.monthly_principal_and_interest);
    assert_balance_invariants(&out);
}

// ===========================================================================
// Extra payments and savings
// ===========================================================================

#[test]
fn test_extra_monthly_payment_shortens_loan() {
    let mut input = base_input();
    input.extras.monthly = dec!(500);
    let out = calculate_mortgage(&input);

    assert!(out.amortization_schedule.len() < 360);
    assert!(out.interest_saved > Decimal::ZERO);
    assert!(out.time_saved_months > 0);
    assert_eq!(
        out.time_saved_months,
        360 - out.amortization_schedule.len() as u32
    );
    assert_balance_invariants(&out);
}

#[test]
fn test_extra_yearly_payment_shortens_loan() {
    let mut input = base_input();
    input.extras.yearly = dec!(5_000);
    let out = calculate_mortgage(&input);

    assert!(out.amortization_schedule.len() < 360);
    assert!(out.interest_saved > Decimal::ZERO);
    // First yearly extra lands on the 13th payment.
    assert_eq!(out.amortization_schedule[11].extra_payment, Decimal::ZERO);
    assert_eq!(out.amortization_schedule[12].extra_payment, dec!(5_000));
}

#[test]
fn test_one_time_payment_shortens_loan() {
    let mut input = base_input();
    input.extras.one_time = vec![OneTimePayment {
        date: ymd(2026, 6, 1),
        amount: dec!(10_000),
    }];
    let out = calculate_mortgage(&input);

    assert!(out.amortization_schedule.len() < 360);
    assert!(out.interest_saved > Decimal::ZERO);
}

#[test]
fn test_one_time_payments_in_same_month_are_summed() {
    let mut input = base_input();
    input.extras.monthly = dec!(100);
    input.extras.one_time = vec![
        OneTimePayment { date: ymd(2026, 3, 2), amount: dec!(700) },
        OneTimePayment { date: ymd(2026, 3, 30), amount: dec!(300) },
    ];
    let out = calculate_mortgage(&input);
    assert_eq!(out.amortization_schedule[2].extra_payment, dec!(1_100));
    assert_eq!(out.amortization_schedule[3].extra_payment, dec!(100));
}

#[test]
fn test_savings_zero_without_extras() {
    let out = calculate_mortgage(&base_input());
    assert_eq!(out.interest_saved, Decimal::ZERO);
    assert_eq!(out.time_saved_months, 0);
}

#[test]
fn test_running_totals_match_row_sums() {
    let mut input = base_input();
    input.extras.monthly = dec!(250);
    let out = calculate_mortgage(&input);

    let interest: Decimal = out.amortization_schedule.iter().map(|r| r.interest).sum();
    let principal: Decimal = out
        .amortization_schedule
        .iter()
        .map(|r| r.principal + r.extra_payment)
        .sum();
    let last = out.amortization_schedule.last().unwrap();

    assert_eq!(last.total_interest_paid, interest);
    assert_eq!(last.total_principal_paid, principal);
    assert_eq!(out.total_interest_paid, interest);
    assert_close(principal, dec!(240_000), dec!(0.01));
}

#[test]
fn test_schedule_dates_advance_one_month() {
    let mut input = base_input();
    input.start_date = ymd(2026, 11, 17);
    let out = calculate_mortgage(&input);
    assert_eq!(out.amortization_schedule[0].date, ymd(2026, 11, 1));
    assert_eq!(out.amortization_schedule[1].date, ymd(2026, 12, 1));
    assert_eq!(out.amortization_schedule[2].date, ymd(2027, 1, 1));
}

#[test]
fn test_calculation_is_deterministic() {
    let mut input = base_input();
    input.extras.yearly = dec!(2_000);
    assert_eq!(calculate_mortgage(&input), calculate_mortgage(&input));
}

// ===========================================================================
// PMI
// ===========================================================================

#[test]
fn test_estimate_pmi() {
    assert_eq!(estimate_pmi(dec!(240_000), dec!(300_000)), Decimal::ZERO);
    assert_close(estimate_pmi(dec!(270_000), dec!(300_000)), dec!(112.5), dec!(0.1));
}

#[test]
fn test_pmi_flows_into_monthly_total() {
    let mut input = base_input();
    input.down_payment = dec!(30_000);
    input.pmi = estimate_pmi(input.loan_amount(), input.home_price);
    let out = calculate_mortgage(&input);
    assert_eq!(out.monthly_pmi, dec!(112.5));
    assert_close(
        out.total_monthly_payment,
        out.monthly_principal_and_interest + dec!(512.5),
        dec!(0.000001),
    );
}

// ===========================================================================
// Validating envelope
// ===========================================================================

#[test]
fn test_analyze_wraps_result() {
    let out = analyze_mortgage(&base_input()).unwrap();
    assert_eq!(out.result.amortization_schedule.len(), 360);
    assert!(out.methodology.contains("amortization"));
    assert!(out.warnings.is_empty());
}

#[test]
fn test_analyze_rejects_negative_rate() {
    let mut input = base_input();
    input.interest_rate = dec!(-0.5);
    assert!(analyze_mortgage(&input).is_err());
}
