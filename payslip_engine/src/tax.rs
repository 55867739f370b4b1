//! Withholding tax brackets.
//!
//! The `tax` module holds the progressive bracket table used to
//! compute monthly income-tax withholding.  Tables are plain data: the
//! engine ships with the current Philippine table, and a different one
//! can be supplied as a versioned JSON rule file (see
//! [`crate::config::load_rules`]).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One row of a withholding table.
///
/// The tax for an income that falls in this row is
/// `base_tax + (income - excess_over) * rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBracket {
    /// Inclusive upper bound of the row.  `None` marks the open-ended
    /// top bracket.
    #[serde(default)]
    pub up_to: Option<Decimal>,
    pub base_tax: Decimal,
    pub excess_over: Decimal,
    pub rate: Decimal,
}

impl TaxBracket {
    fn contains(&self, income: Decimal) -> bool {
        self.up_to.map_or(true, |ceiling| income <= ceiling)
    }

    fn apply(&self, income: Decimal) -> Decimal {
        let excess = income.saturating_sub(self.excess_over);
        self.base_tax.saturating_add(excess.saturating_mul(self.rate))
    }
}

/// A monthly withholding table for a region at a specific version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingTable {
    /// A region code such as `"PH"`.
    pub region: String,
    /// Version string, e.g. `"2023"`.
    pub version: String,
    /// Rows ordered by ascending `up_to`.
    pub brackets: Vec<TaxBracket>,
}

impl WithholdingTable {
    /// Monthly table in force from 2023 onward.
    pub fn philippines_2023() -> Self {
        let row = |up_to: Option<Decimal>, base_tax: Decimal, excess_over: Decimal, rate: Decimal| {
            TaxBracket {
                up_to,
                base_tax,
                excess_over,
                rate,
            }
        };
        Self {
            region: "PH".to_string(),
            version: "2023".to_string(),
            brackets: vec![
                row(Some(dec!(20833.33)), dec!(0), dec!(0), dec!(0)),
                row(Some(dec!(33333.33)), dec!(0), dec!(20833.33), dec!(0.15)),
                row(Some(dec!(66666.67)), dec!(1875), dec!(33333.33), dec!(0.20)),
                row(Some(dec!(166666.67)), dec!(8541.67), dec!(66666.67), dec!(0.25)),
                row(Some(dec!(666666.67)), dec!(33541.67), dec!(166666.67), dec!(0.30)),
                row(None, dec!(183541.67), dec!(666666.67), dec!(0.35)),
            ],
        }
    }

    /// Monthly withholding for `taxable_income`, unrounded.  Saturates
    /// at `Decimal::MAX` for incomes near the top of the range.
    ///
    /// Incomes that match no row (only possible with an empty or
    /// truncated table) are not taxed.
    pub fn monthly_withholding(&self, taxable_income: Decimal) -> Decimal {
        self.brackets
            .iter()
            .find(|bracket| bracket.contains(taxable_income))
            .map(|bracket| bracket.apply(taxable_income))
            .unwrap_or(Decimal::ZERO)
    }
}

impl Default for WithholdingTable {
    fn default() -> Self {
        Self::philippines_2023()
    }
}
