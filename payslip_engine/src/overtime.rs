//! Overtime premium computation.
//!
//! Overtime is logged as a list of `{hours, type}` entries on an
//! [`OvertimeSheet`].  The sheet reduces them into a single premium
//! which is then written into [`Earnings::overtime`].

use crate::models::Earnings;
use crate::money::{round2, saturating_sum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Overtime classes recognised by the labor code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeCategory {
    #[default]
    Regular,
    RestSpecial,
    RestSpecialExcess,
    RegularHoliday,
    RegularHolidayExcess,
}

impl OvertimeCategory {
    pub const ALL: [Self; 5] = [
        Self::Regular,
        Self::RestSpecial,
        Self::RestSpecialExcess,
        Self::RegularHoliday,
        Self::RegularHolidayExcess,
    ];

    /// Premium multiplier applied to the hourly rate.
    pub fn multiplier(self) -> Decimal {
        match self {
            Self::Regular => dec!(1.25),
            Self::RestSpecial => dec!(1.30),
            Self::RestSpecialExcess => dec!(1.69),
            Self::RegularHoliday => dec!(2.00),
            Self::RegularHolidayExcess => dec!(2.60),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Regular => "Regular Day (125%)",
            Self::RestSpecial => "Rest Day / Special Holiday (130%)",
            Self::RestSpecialExcess => "Rest Day Excess (169%)",
            Self::RegularHoliday => "Regular Holiday (200%)",
            Self::RegularHolidayExcess => "Regular Holiday Excess (260%)",
        }
    }
}

/// One logged block of overtime.  Hours are not validated here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeEntry {
    pub hours: Decimal,
    #[serde(rename = "type")]
    pub category: OvertimeCategory,
}

impl OvertimeEntry {
    pub fn new(hours: Decimal, category: OvertimeCategory) -> Self {
        Self { hours, category }
    }

    /// `hours × hourly_rate × multiplier`, saturating at the `Decimal`
    /// bounds.
    pub fn premium(&self, hourly_rate: Decimal) -> Decimal {
        self.hours
            .saturating_mul(hourly_rate)
            .saturating_mul(self.category.multiplier())
    }
}

/// Unrounded sum of the premiums of `entries`.
pub fn overtime_total(entries: &[OvertimeEntry], hourly_rate: Decimal) -> Decimal {
    saturating_sum(entries.iter().map(|entry| entry.premium(hourly_rate)))
}

/// An editing session over a list of overtime entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSheet {
    entries: Vec<OvertimeEntry>,
}

impl OvertimeSheet {
    pub fn from_entries(entries: Vec<OvertimeEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[OvertimeEntry] {
        &self.entries
    }

    pub fn push(&mut self, entry: OvertimeEntry) {
        self.entries.push(entry);
    }

    /// Appends a zero-hour regular entry.
    pub fn push_blank(&mut self) {
        self.entries.push(OvertimeEntry::default());
    }

    pub fn remove(&mut self, index: usize) -> Option<OvertimeEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns `false` if there is no entry at `index`.
    pub fn set_hours(&mut self, index: usize, hours: Decimal) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.hours = hours;
                true
            }
            None => false,
        }
    }

    /// Returns `false` if there is no entry at `index`.
    pub fn set_category(&mut self, index: usize, category: OvertimeCategory) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.category = category;
                true
            }
            None => false,
        }
    }

    pub fn total(&self, hourly_rate: Decimal) -> Decimal {
        overtime_total(&self.entries, hourly_rate)
    }

    /// Replaces `earnings.overtime` with the rounded total and returns it.
    pub fn apply(&self, hourly_rate: Decimal, earnings: &mut Earnings) -> Decimal {
        let total = round2(self.total(hourly_rate));
        debug!(entries = self.entries.len(), %total, "applied overtime");
        earnings.overtime = total;
        total
    }
}

impl Default for OvertimeSheet {
    /// A fresh sheet holds a single blank entry.
    fn default() -> Self {
        Self {
            entries: vec![OvertimeEntry::default()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOURLY: Decimal = dec!(150);

    #[test]
    fn test_regular_overtime() {
        let entries = [OvertimeEntry::new(dec!(8), OvertimeCategory::Regular)];
        assert_eq!(overtime_total(&entries, HOURLY), dec!(8) * HOURLY * dec!(1.25));
        assert_eq!(overtime_total(&entries, HOURLY), dec!(1500));
    }

    #[test]
    fn test_empty_list_totals_zero() {
        assert_eq!(overtime_total(&[], HOURLY), Decimal::ZERO);
        let mut sheet = OvertimeSheet::default();
        assert_eq!(sheet.total(HOURLY), Decimal::ZERO);
        sheet.clear();
        assert_eq!(sheet.total(HOURLY), Decimal::ZERO);
    }

    #[test]
    fn test_every_category_multiplier() {
        let expected = [dec!(187.5), dec!(195), dec!(253.5), dec!(300), dec!(390)];
        for (category, premium) in OvertimeCategory::ALL.into_iter().zip(expected) {
            assert_eq!(OvertimeEntry::new(Decimal::ONE, category).premium(HOURLY), premium);
        }
    }

    #[test]
    fn test_negative_hours_are_not_rejected() {
        let entries = [OvertimeEntry::new(dec!(-2), OvertimeCategory::Regular)];
        assert_eq!(overtime_total(&entries, HOURLY), dec!(-375));
    }

    #[test]
    fn test_extreme_hours_saturate() {
        let sheet = OvertimeSheet::from_entries(vec![
            OvertimeEntry::new(Decimal::MAX, OvertimeCategory::Regular),
            OvertimeEntry::new(Decimal::MAX, OvertimeCategory::RegularHolidayExcess),
        ]);
        assert_eq!(sheet.total(HOURLY), Decimal::MAX);
        let mut earnings = Earnings::default();
        assert_eq!(sheet.apply(HOURLY, &mut earnings), Decimal::MAX);
        assert_eq!(earnings.gross(), Decimal::MAX);

        let entries = [OvertimeEntry::new(Decimal::MIN, OvertimeCategory::Regular)];
        assert_eq!(overtime_total(&entries, HOURLY), Decimal::MIN);
    }

    #[test]
    fn test_apply_replaces_and_is_idempotent() {
        let mut sheet = OvertimeSheet::default();
        sheet.set_hours(0, dec!(8));
        sheet.push(OvertimeEntry::new(dec!(2), OvertimeCategory::RestSpecialExcess));

        let mut earnings = Earnings {
            overtime: dec!(999),
            ..Earnings::default()
        };
        assert_eq!(sheet.apply(HOURLY, &mut earnings), dec!(2007));
        assert_eq!(sheet.apply(HOURLY, &mut earnings), dec!(2007));
        assert_eq!(earnings.overtime, dec!(2007));

        assert!(sheet.remove(1).is_some());
        sheet.apply(HOURLY, &mut earnings);
        assert_eq!(earnings.overtime, dec!(1500));

        sheet.clear();
        sheet.apply(HOURLY, &mut earnings);
        assert_eq!(earnings.overtime, Decimal::ZERO);
    }

    #[test]
    fn test_apply_rounds_to_centavos() {
        // 2875.3993... / 8 per hour
        let hourly = dec!(900000) / dec!(313) / dec!(8);
        let sheet = OvertimeSheet::from_entries(vec![OvertimeEntry::new(
            Decimal::ONE,
            OvertimeCategory::Regular,
        )]);
        let mut earnings = Earnings::default();
        assert_eq!(sheet.apply(hourly, &mut earnings), dec!(449.28));
    }

    #[test]
    fn test_edits_out_of_range_are_ignored() {
        let mut sheet = OvertimeSheet::default();
        assert!(!sheet.set_hours(3, dec!(1)));
        assert!(!sheet.set_category(3, OvertimeCategory::RegularHoliday));
        assert!(sheet.remove(3).is_none());
        assert!(sheet.set_category(0, OvertimeCategory::RegularHoliday));
        assert_eq!(sheet.entries()[0].category, OvertimeCategory::RegularHoliday);
    }

    #[test]
    fn test_blank_entries_add_nothing() {
        let mut sheet = OvertimeSheet::default();
        sheet.push_blank();
        assert_eq!(sheet.entries().len(), 2);
        assert_eq!(sheet.entries()[1], OvertimeEntry::default());
        assert_eq!(sheet.total(HOURLY), Decimal::ZERO);
    }

    #[test]
    fn test_labels_name_the_premium() {
        for category in OvertimeCategory::ALL {
            let percent = (category.multiplier() * dec!(100)).normalize().to_string();
            assert!(category.label().contains(&format!("({percent}%)")));
        }
    }

    #[test]
    fn test_entry_wire_format() {
        let entry: OvertimeEntry =
            serde_json::from_str(r#"{"hours": 3, "type": "regular_holiday_excess"}"#).unwrap();
        assert_eq!(entry.category, OvertimeCategory::RegularHolidayExcess);
        assert_eq!(entry.hours, dec!(3));
    }
}
