//! Display formatting for payslip documents.
//!
//! None of this feeds back into the computation; it only shapes how
//! already-rounded values are shown.

use crate::calendar::parse_date;
use crate::models::{DisbursementMethod, Payslip};
use crate::money::round2;
use rust_decimal::Decimal;

pub const CURRENCY_SYMBOL: &str = "₱";

/// Formats an amount as pesos, e.g. `₱1,234,567.80`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round2(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let plain = format!("{:.2}", rounded.abs());
    let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}{CURRENCY_SYMBOL}{grouped}.{cents}")
}

/// Formats an ISO date in long form, e.g. `March 10, 2022`.
pub fn format_date(value: &str) -> Option<String> {
    parse_date(value).map(|date| date.format("%B %-d, %Y").to_string())
}

/// Hides all but the last four characters of an account number.
pub fn mask_account_number(account: &str, method: DisbursementMethod) -> String {
    if account.is_empty() || method == DisbursementMethod::Cash {
        return "N/A".to_string();
    }
    let clean: String = account.chars().filter(|c| !c.is_whitespace()).collect();
    let len = clean.chars().count();
    if len > 4 {
        let last_four: String = clean.chars().skip(len - 4).collect();
        format!("**** **** {last_four}")
    } else {
        clean
    }
}

impl Payslip {
    /// e.g. `Bank Transfer via BPI Ayala (**** **** 9012)`.
    pub fn disbursement_line(&self) -> String {
        let employee = &self.employee;
        let bank = if employee.bank_name.is_empty() {
            "Cashier"
        } else {
            employee.bank_name.as_str()
        };
        format!(
            "{} via {} ({})",
            employee.disbursement_method.label(),
            bank,
            mask_account_number(&employee.account_number, employee.disbursement_method)
        )
    }

    /// The pay period in long form.  Unparseable dates are shown as given.
    pub fn period_line(&self) -> String {
        let long = |value: &str| format_date(value).unwrap_or_else(|| value.to_string());
        format!(
            "{} — {}",
            long(&self.employee.pay_period_start),
            long(&self.employee.pay_period_end)
        )
    }
}
