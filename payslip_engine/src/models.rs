//! Data models for the Payslip Engine.
//!
//! The `models` module defines the serialisable records that flow
//! through a payroll computation: the employee profile supplied by the
//! caller, the earnings / deductions / reimbursement records, the
//! derived attendance, and the [`Payslip`] view model handed to
//! renderers and sync collaborators.  Field names serialise in
//! camelCase to match the payload shape those collaborators expect.

use crate::contributions::Contributions;
use crate::money::saturating_sum;
use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the net pay reaches the employee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisbursementMethod {
    #[default]
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[serde(rename = "Card Payment")]
    Card,
    Cash,
}

impl DisbursementMethod {
    /// Display label, identical to the wire name.
    pub fn label(self) -> &'static str {
        match self {
            Self::BankTransfer => "Bank Transfer",
            Self::Card => "Card Payment",
            Self::Cash => "Cash",
        }
    }
}

/// The employee and pay period a payslip is computed for.
///
/// Identity and banking fields are opaque to the engine.  Dates are
/// ISO 8601 strings (`YYYY-MM-DD`); an unparseable period simply yields
/// zero working days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeProfile {
    pub name: String,
    pub employee_id: String,
    pub designation: String,
    pub department: String,
    pub date_of_joining: String,
    pub pay_date: String,
    pub disbursement_method: DisbursementMethod,
    pub bank_name: String,
    /// Stored unmasked; masking happens in [`crate::format`].
    pub account_number: String,
    pub pay_period_start: String,
    pub pay_period_end: String,
    pub basic_monthly_pay: Decimal,
    /// Days absent without pay.
    pub absences: u32,
    pub signatory_name: String,
    pub signatory_position: String,
}

impl EmployeeProfile {
    /// A blank profile paid on `today` for the first half of its month.
    pub fn first_half_of(today: NaiveDate) -> Self {
        let start = today.with_day(1).unwrap_or(today);
        let end = today.with_day(15).unwrap_or(today);
        Self {
            name: String::new(),
            employee_id: String::new(),
            designation: String::new(),
            department: String::new(),
            date_of_joining: String::new(),
            pay_date: today.to_string(),
            disbursement_method: DisbursementMethod::default(),
            bank_name: String::new(),
            account_number: String::new(),
            pay_period_start: start.to_string(),
            pay_period_end: end.to_string(),
            basic_monthly_pay: Decimal::ZERO,
            absences: 0,
            signatory_name: String::new(),
            signatory_position: String::new(),
        }
    }
}

impl Default for EmployeeProfile {
    fn default() -> Self {
        Self::first_half_of(Local::now().date_naive())
    }
}

/// Attendance derived from the pay period and absences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub total_duty_days: u32,
    /// Never exceeds `total_duty_days`.
    pub actual_pay_days: u32,
}

/// Earnings for one pay period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Earnings {
    /// Prorated basic pay, written by the engine.
    pub basic_pay: Decimal,
    pub overtime: Decimal,
    pub holidays: Decimal,
    pub thirteenth_month: Decimal,
}

impl Earnings {
    /// Sum of all earnings for the period.
    pub fn gross(&self) -> Decimal {
        saturating_sum([
            self.basic_pay,
            self.overtime,
            self.holidays,
            self.thirteenth_month,
        ])
    }
}

/// Deductions for one pay period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Deductions {
    /// Half-month withholding share.  Filled in when the [`Payslip`] is
    /// built; totals are always computed fresh and never read it.
    pub withholding_tax: Decimal,
    pub sss: Decimal,
    pub phil_health: Decimal,
    pub pag_ibig: Decimal,
    pub cash_advances: Decimal,
    /// Unpaid absence deduction.
    pub awol: Decimal,
}

/// A non-taxable amount added on top of net pay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reimbursement {
    pub description: String,
    pub amount: Decimal,
}

/// Everything the recompute pipeline writes back into the payroll
/// state.  Fields not listed here are owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedFields {
    pub attendance: Attendance,
    pub basic_pay: Decimal,
    /// Per-period contribution shares.
    pub contributions: Contributions,
    pub awol: Decimal,
}

/// Period totals.  Always derived, never stored independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_earnings: Decimal,
    pub total_deductions: Decimal,
    /// Half-month withholding tax.
    pub tax: Decimal,
    pub net_pay: Decimal,
}

/// The complete mutable payroll record owned by a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayrollState {
    pub employee: EmployeeProfile,
    pub attendance: Attendance,
    pub earnings: Earnings,
    pub deductions: Deductions,
    pub reimbursement: Reimbursement,
}

impl PayrollState {
    pub fn new(employee: EmployeeProfile) -> Self {
        Self {
            employee,
            ..Self::default()
        }
    }

    /// Writes freshly derived fields back, leaving caller-owned
    /// amounts untouched.
    pub fn apply_derived(&mut self, derived: &DerivedFields) {
        self.attendance = derived.attendance;
        self.earnings.basic_pay = derived.basic_pay;
        self.deductions.sss = derived.contributions.sss;
        self.deductions.phil_health = derived.contributions.phil_health;
        self.deductions.pag_ibig = derived.contributions.pag_ibig;
        self.deductions.awol = derived.awol;
    }
}

/// The view model consumed by document renderers and sync
/// collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payslip {
    pub employee: EmployeeProfile,
    pub attendance: Attendance,
    pub earnings: Earnings,
    pub deductions: Deductions,
    pub reimbursement: Reimbursement,
    pub totals: Totals,
}
