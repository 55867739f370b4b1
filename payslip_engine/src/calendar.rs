//! Working-day accounting.
//!
//! A day is compensable unless it falls on the weekly rest day
//! (Sunday) or is listed in the [`HolidayCalendar`] for its year.  The
//! calendar is a plain year → dates table so that new years can be
//! loaded from rule files without touching the code.

use chrono::{DateTime, Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The fixed weekly rest day.
pub const REST_DAY: Weekday = Weekday::Sun;

const PH_HOLIDAYS_2025: [(u32, u32); 19] = [
    (1, 1),
    (1, 29),
    (2, 25),
    (4, 9),
    (4, 17),
    (4, 18),
    (4, 19),
    (5, 1),
    (6, 12),
    (8, 21),
    (8, 25),
    (11, 1),
    (11, 2),
    (11, 30),
    (12, 8),
    (12, 24),
    (12, 25),
    (12, 30),
    (12, 31),
];

/// Non-working holidays, grouped by year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayCalendar {
    years: BTreeMap<i32, BTreeSet<NaiveDate>>,
}

impl HolidayCalendar {
    /// An empty calendar: only the rest day is excluded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Regular and special non-working days proclaimed for 2025.
    pub fn philippines_2025() -> Self {
        let mut calendar = Self::new();
        calendar.extend(
            PH_HOLIDAYS_2025
                .iter()
                .filter_map(|&(month, day)| NaiveDate::from_ymd_opt(2025, month, day)),
        );
        calendar
    }

    /// Adds `date` under its own year.
    pub fn insert(&mut self, date: NaiveDate) {
        self.years.entry(date.year()).or_default().insert(date);
    }

    /// Adds every date in `dates`.
    pub fn extend(&mut self, dates: impl IntoIterator<Item = NaiveDate>) {
        for date in dates {
            self.insert(date);
        }
    }

    /// Holidays listed for `year`, in date order.
    pub fn holidays_in(&self, year: i32) -> impl Iterator<Item = NaiveDate> + '_ {
        self.years.get(&year).into_iter().flatten().copied()
    }

    /// Years with at least one listed holiday, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    /// Whether `date` is listed for its year.  The rest day is not a
    /// holiday unless listed.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.years
            .get(&date.year())
            .is_some_and(|dates| dates.contains(&date))
    }

    /// Neither the rest day nor a listed holiday.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        date.weekday() != REST_DAY && !self.is_holiday(date)
    }

    /// Counts working days in the inclusive range `start..=end`.  A
    /// reversed range is empty.
    ///
    /// Rest days are counted arithmetically and only the listed
    /// holidays are visited, so the cost does not grow with the length
    /// of the range.
    pub fn working_days_between(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        if end < start {
            return 0;
        }
        let span = (end - start).num_days() + 1;
        let first_rest_day = i64::from(
            (7 + REST_DAY.num_days_from_monday() - start.weekday().num_days_from_monday()) % 7,
        );
        let rest_days = if first_rest_day < span {
            (span - first_rest_day - 1) / 7 + 1
        } else {
            0
        };
        let holidays = self
            .years
            .range(start.year()..=end.year())
            .flat_map(|(_, dates)| dates.range(start..=end))
            .filter(|date| date.weekday() != REST_DAY)
            .count();
        let holidays = i64::try_from(holidays).unwrap_or(i64::MAX);
        u32::try_from(span - rest_days - holidays).unwrap_or(u32::MAX)
    }

    /// Counts working days between two ISO 8601 dates.  Returns 0 when
    /// either date cannot be parsed.
    pub fn count_working_days(&self, start: &str, end: &str) -> u32 {
        match (parse_date(start), parse_date(end)) {
            (Some(start), Some(end)) => self.working_days_between(start, end),
            _ => 0,
        }
    }
}

/// Parses a calendar date given either as `YYYY-MM-DD` or as a full
/// RFC 3339 timestamp (whose UTC date is used).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|timestamp| timestamp.naive_utc().date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(start: &str, end: &str) -> u32 {
        HolidayCalendar::philippines_2025().count_working_days(start, end)
    }

    #[test]
    fn test_single_day_ranges() {
        // Sunday
        assert_eq!(count("2025-06-01", "2025-06-01"), 0);
        // Independence Day, a Thursday
        assert_eq!(count("2025-06-12", "2025-06-12"), 0);
        assert_eq!(count("2025-06-02", "2025-06-02"), 1);
        // Saturdays are working days
        assert_eq!(count("2025-06-07", "2025-06-07"), 1);
    }

    #[test]
    fn test_half_month_ranges() {
        assert_eq!(count("2025-06-01", "2025-06-15"), 11);
        assert_eq!(count("2025-12-16", "2025-12-31"), 10);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        assert_eq!(count("2025-06-15", "2025-06-01"), 0);
    }

    #[test]
    fn test_unparseable_dates_count_zero() {
        assert_eq!(count("", "2025-06-15"), 0);
        assert_eq!(count("2025-06-01", "June 15"), 0);
        assert_eq!(count("2025-02-30", "2025-03-05"), 0);
    }

    #[test]
    fn test_timestamps_are_accepted() {
        assert_eq!(count("2025-06-02T00:00:00Z", "2025-06-03T00:00:00Z"), 2);
    }

    #[test]
    fn test_years_without_entries_only_skip_sundays() {
        let calendar = HolidayCalendar::philippines_2025();
        // 2026-01-01 is a Thursday
        assert!(calendar.is_working_day(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
        assert_eq!(calendar.count_working_days("2026-01-01", "2026-01-07"), 6);
    }

    #[test]
    fn test_injected_holidays() {
        let mut calendar = HolidayCalendar::new();
        let new_year = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        calendar.insert(new_year);
        assert!(calendar.is_holiday(new_year));
        assert_eq!(calendar.count_working_days("2026-01-01", "2026-01-07"), 5);
        assert_eq!(calendar.holidays_in(2026).collect::<Vec<_>>(), vec![new_year]);
        assert_eq!(calendar.holidays_in(2025).count(), 0);
    }

    fn count_day_by_day(calendar: &HolidayCalendar, start: NaiveDate, end: NaiveDate) -> u32 {
        start
            .iter_days()
            .take_while(|day| *day <= end)
            .filter(|day| calendar.is_working_day(*day))
            .count() as u32
    }

    #[test]
    fn test_matches_day_by_day_count() {
        let calendar = HolidayCalendar::philippines_2025();
        let first = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();
        for offset in 0..21 {
            let start = first + chrono::Days::new(offset);
            for length in [0, 1, 5, 6, 7, 8, 13, 14, 15, 30, 200, 400] {
                let end = start + chrono::Days::new(length);
                assert_eq!(
                    calendar.working_days_between(start, end),
                    count_day_by_day(&calendar, start, end),
                    "{start}..={end}"
                );
            }
        }
    }

    #[test]
    fn test_full_year_counts() {
        // 2025-11-02 and 2025-11-30 are Sundays and count once
        assert_eq!(count("2025-01-01", "2025-12-31"), 296);
        assert_eq!(count("2024-12-20", "2026-01-10"), 315);
    }

    #[test]
    fn test_widest_range() {
        let calendar = HolidayCalendar::philippines_2025();
        // about 191.5 million days, six in seven of them working days
        let days = calendar.working_days_between(NaiveDate::MIN, NaiveDate::MAX);
        assert!(days > 160_000_000 && days < 170_000_000, "{days}");
        assert_eq!(calendar.working_days_between(NaiveDate::MAX, NaiveDate::MIN), 0);
        assert_eq!(
            calendar.working_days_between(NaiveDate::MAX, NaiveDate::MAX),
            u32::from(calendar.is_working_day(NaiveDate::MAX))
        );
    }

    #[test]
    fn test_built_in_list() {
        let calendar = HolidayCalendar::philippines_2025();
        assert_eq!(calendar.holidays_in(2025).count(), 19);
        assert_eq!(calendar.years().collect::<Vec<_>>(), vec![2025]);
    }
}
