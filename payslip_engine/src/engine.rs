//! Payroll computation engine.
//!
//! The `engine` module turns an [`EmployeeProfile`] into the derived
//! fields of a semi-monthly payslip and computes the period
//! [`Totals`].  It is built from two pure functions:
//!
//! * [`recompute_derived`] must be re-run whenever the pay period, the
//!   monthly base pay or the absences change.  It always recomputes
//!   from scratch.
//! * [`compute_totals`] is evaluated on every read and recomputes the
//!   monthly tax from the base pay each time.
//!
//! Neither function can fail: bad dates count as zero working days,
//! out-of-range amounts are clamped or floored, and sums or products
//! beyond the `Decimal` range saturate instead of overflowing.

use crate::calendar::HolidayCalendar;
use crate::contributions::Contributions;
use crate::models::{
    Attendance, Deductions, DerivedFields, EmployeeProfile, Earnings, Payslip, PayrollState,
    Reimbursement, Totals,
};
use crate::money::{round2, saturating_sum};
use crate::overtime::{OvertimeEntry, OvertimeSheet};
use crate::rates::{daily_rate, hourly_rate};
use crate::tax::WithholdingTable;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The configurable tables a computation runs against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRules {
    pub holidays: HolidayCalendar,
    pub withholding: WithholdingTable,
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            holidays: HolidayCalendar::philippines_2025(),
            withholding: WithholdingTable::default(),
        }
    }
}

/// Recomputes attendance, prorated basic pay, the absence deduction
/// and the per-period contribution shares.
pub fn recompute_derived(profile: &EmployeeProfile, rules: &PayrollRules) -> DerivedFields {
    let duty_days = rules
        .holidays
        .count_working_days(&profile.pay_period_start, &profile.pay_period_end);
    let daily = daily_rate(profile.basic_monthly_pay);
    let basic_pay = round2(daily.saturating_mul(Decimal::from(duty_days)));
    let awol = round2(daily.saturating_mul(Decimal::from(profile.absences)));
    let actual_pay_days = duty_days.saturating_sub(profile.absences);
    let contributions = Contributions::monthly(profile.basic_monthly_pay).split();

    debug!(
        employee_id = %profile.employee_id,
        duty_days,
        actual_pay_days,
        %basic_pay,
        %awol,
        "recomputed derived payroll fields"
    );

    DerivedFields {
        attendance: Attendance {
            total_duty_days: duty_days,
            actual_pay_days,
        },
        basic_pay,
        contributions,
        awol,
    }
}

/// Half of the monthly withholding tax, rounded to centavos.
///
/// Taxable income is the monthly base pay less the full monthly
/// contributions.
pub fn split_withholding_tax(basic_monthly_pay: Decimal, rules: &PayrollRules) -> Decimal {
    let monthly = Contributions::monthly(basic_monthly_pay);
    let taxable = basic_monthly_pay.saturating_sub(monthly.total());
    round2(rules.withholding.monthly_withholding(taxable) / dec!(2))
}

/// Computes the period totals.  Net pay never goes below zero.
pub fn compute_totals(
    profile: &EmployeeProfile,
    earnings: &Earnings,
    deductions: &Deductions,
    reimbursement: &Reimbursement,
    rules: &PayrollRules,
) -> Totals {
    let total_earnings = earnings.gross();
    let tax = split_withholding_tax(profile.basic_monthly_pay, rules);
    let total_deductions = saturating_sum([
        tax,
        deductions.sss,
        deductions.phil_health,
        deductions.pag_ibig,
        deductions.cash_advances,
        deductions.awol,
    ]);
    let net_pay = total_earnings
        .saturating_add(reimbursement.amount)
        .saturating_sub(total_deductions)
        .max(Decimal::ZERO);

    Totals {
        total_earnings,
        total_deductions,
        tax,
        net_pay,
    }
}

impl PayrollState {
    /// Re-runs the derived-field pipeline and stores the result.
    pub fn recompute(&mut self, rules: &PayrollRules) {
        let derived = recompute_derived(&self.employee, rules);
        self.apply_derived(&derived);
    }

    pub fn totals(&self, rules: &PayrollRules) -> Totals {
        compute_totals(
            &self.employee,
            &self.earnings,
            &self.deductions,
            &self.reimbursement,
            rules,
        )
    }

    /// Hourly rate used for overtime premiums.
    pub fn hourly_rate(&self) -> Decimal {
        hourly_rate(daily_rate(self.employee.basic_monthly_pay))
    }

    /// Writes the total of `sheet` into the overtime earnings.
    pub fn apply_overtime(&mut self, sheet: &OvertimeSheet) -> Decimal {
        let rate = self.hourly_rate();
        sheet.apply(rate, &mut self.earnings)
    }

    /// Builds the view model from the current state.
    pub fn payslip(&self, rules: &PayrollRules) -> Payslip {
        let totals = self.totals(rules);
        let mut deductions = self.deductions;
        deductions.withholding_tax = totals.tax;
        Payslip {
            employee: self.employee.clone(),
            attendance: self.attendance,
            earnings: self.earnings,
            deductions,
            reimbursement: self.reimbursement.clone(),
            totals,
        }
    }
}

/// A one-shot payslip computation request.
///
/// Caller-owned amounts are taken as given.  When `overtime` entries
/// are present their total replaces `earnings.overtime`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayslipRequest {
    pub employee: EmployeeProfile,
    pub earnings: Earnings,
    pub deductions: Deductions,
    pub reimbursement: Reimbursement,
    pub overtime: Vec<OvertimeEntry>,
}

impl PayslipRequest {
    /// Recomputes the derived fields, applies overtime and returns the
    /// resulting payroll state.
    pub fn into_state(self, rules: &PayrollRules) -> PayrollState {
        let mut state = PayrollState {
            employee: self.employee,
            attendance: Attendance::default(),
            earnings: self.earnings,
            deductions: self.deductions,
            reimbursement: self.reimbursement,
        };
        state.recompute(rules);
        if !self.overtime.is_empty() {
            state.apply_overtime(&OvertimeSheet::from_entries(self.overtime));
        }
        state
    }
}

/// Runs a full payslip computation for `request`.
pub fn run_payslip(request: PayslipRequest, rules: &PayrollRules) -> Payslip {
    request.into_state(rules).payslip(rules)
}
