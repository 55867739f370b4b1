//! Payslip Engine library crate.
//!
//! This crate computes semi-monthly net pay under Philippine statutory
//! payroll rules: working-day attendance, prorated basic pay, overtime
//! premiums, SSS / PhilHealth / Pag-IBIG contributions and progressive
//! withholding tax.  External applications may call
//! `engine::run_payslip` directly or embed the API via
//! `api::build_router`.

pub mod money;
pub mod models;
pub mod calendar;
pub mod rates;
pub mod contributions;
pub mod tax;
pub mod overtime;
pub mod engine;
pub mod format;
pub mod sync;
pub mod config;
pub mod api;
