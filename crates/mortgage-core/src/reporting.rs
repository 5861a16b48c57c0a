//! Presentation-facing views of a schedule: calendar-year rollups for the
//! schedule table and year-end points for the balance chart.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schedule::{AmortizationRow, MortgageOutput};
use crate::types::Money;

/// One calendar year of a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyRow {
    pub year: i32,
    /// Date of the last scheduled month in the year.
    pub date: NaiveDate,
    pub months: u32,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    pub extra_payment: Money,
    pub total_payment: Money,
    /// Balance after the year's last payment.
    pub balance: Money,
    pub total_interest_paid: Money,
    pub total_principal_paid: Money,
}

impl YearlyRow {
    fn opening(row: &AmortizationRow) -> Self {
        YearlyRow {
            year: row.date.year(),
            date: row.date,
            months: 0,
            payment: Decimal::ZERO,
            principal: Decimal::ZERO,
            interest: Decimal::ZERO,
            extra_payment: Decimal::ZERO,
            total_payment: Decimal::ZERO,
            balance: row.balance,
            total_interest_paid: row.total_interest_paid,
            total_principal_paid: row.total_principal_paid,
        }
    }

    fn absorb(&mut self, row: &AmortizationRow) {
        self.months += 1;
        self.payment += row.payment;
        self.principal += row.principal;
        self.interest += row.interest;
        self.extra_payment += row.extra_payment;
        self.total_payment += row.total_payment;
        self.date = row.date;
        self.balance = row.balance;
        self.total_interest_paid = row.total_interest_paid;
        self.total_principal_paid = row.total_principal_paid;
    }
}

/// Roll a monthly schedule up by calendar year. Flow fields are summed;
/// balance and running totals are taken from the year's last month.
pub fn yearly_schedule(schedule: &[AmortizationRow]) -> Vec<YearlyRow> {
    let mut years: Vec<YearlyRow> = Vec::new();
    for row in schedule {
        match years.last_mut() {
            Some(current) if current.year == row.date.year() => current.absorb(row),
            _ => {
                let mut opened = YearlyRow::opening(row);
                opened.absorb(row);
                years.push(opened);
            }
        }
    }
    years
}

/// Year-end state for the balance chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub year: i32,
    pub balance: Money,
    pub total_interest: Money,
    pub total_principal: Money,
}

pub fn balance_chart(schedule: &[AmortizationRow]) -> Vec<ChartPoint> {
    yearly_schedule(schedule)
        .into_iter()
        .map(|y| ChartPoint {
            year: y.year,
            balance: y.balance,
            total_interest: y.total_interest_paid,
            total_principal: y.total_principal_paid,
        })
        .collect()
}

/// Granularity of the schedule table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleView {
    Monthly,
    #[default]
    Yearly,
}

/// Schedule rows in the requested view, ready to serialise.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScheduleRows {
    Monthly(Vec<AmortizationRow>),
    Yearly(Vec<YearlyRow>),
}

impl ScheduleRows {
    pub fn len(&self) -> usize {
        match self {
            ScheduleRows::Monthly(rows) => rows.len(),
            ScheduleRows::Yearly(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn schedule_view(output: &MortgageOutput, view: ScheduleView) -> ScheduleRows {
    match view {
        ScheduleView::Monthly => ScheduleRows::Monthly(output.amortization_schedule.clone()),
        ScheduleView::Yearly => ScheduleRows::Yearly(yearly_schedule(&output.amortization_schedule)),
    }
}
