use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::error::AppError;

/// Today's calendar date on the server's local clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The Monday on or before `reference`. Sunday belongs to the week that
/// started six days earlier, not the week it begins in the US convention.
pub fn week_start(reference: NaiveDate) -> NaiveDate {
    reference - Duration::days(reference.weekday().num_days_from_monday() as i64)
}

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::Validation(
                "startDate must be on or before endDate".into(),
            ));
        }
        Ok(Self { start, end })
    }

    /// The canonical reporting window: most recent Monday through today.
    pub fn current_week() -> Self {
        let end = today();
        Self {
            start: week_start(end),
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The seven dates ending at `end`, oldest first. Report tables always
/// span exactly one week regardless of how much data exists.
pub fn last_seven_days(end: NaiveDate) -> Vec<NaiveDate> {
    (0..7).map(|i| end - Duration::days(6 - i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_mid_week() {
        // 2026-08-06 is a Thursday; the Monday before is 2026-08-03.
        assert_eq!(week_start(date(2026, 8, 6)), date(2026, 8, 3));
    }

    #[test]
    fn test_week_start_on_monday_is_identity() {
        assert_eq!(week_start(date(2026, 8, 3)), date(2026, 8, 3));
    }

    #[test]
    fn test_week_start_sunday_goes_back_six_days() {
        // 2026-08-09 is a Sunday; it closes the week of Monday 2026-08-03.
        assert_eq!(week_start(date(2026, 8, 9)), date(2026, 8, 3));
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        assert!(DateRange::new(date(2026, 8, 7), date(2026, 8, 1)).is_err());
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = DateRange::new(date(2026, 8, 3), date(2026, 8, 7)).unwrap();
        assert!(range.contains(date(2026, 8, 3)));
        assert!(range.contains(date(2026, 8, 7)));
        assert!(!range.contains(date(2026, 8, 8)));
        assert!(!range.contains(date(2026, 8, 2)));
    }

    #[test]
    fn test_last_seven_days_ends_at_given_date() {
        let days = last_seven_days(date(2026, 8, 7));
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2026, 8, 1));
        assert_eq!(days[6], date(2026, 8, 7));
    }
}
