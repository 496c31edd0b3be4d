use chrono::{Datelike, Duration, NaiveDate};

/// Next renewal date for a monthly subscription.
///
/// Falls back to today's day-of-month when no renewal day is stored. If the
/// renewal day this month has already passed (or is today), the due date moves
/// to next month. Days that overflow a short month are clamped to its last day,
/// so renewal day 31 in February resolves to the 28th (29th in a leap year).
pub fn next_monthly_due(today: NaiveDate, renewal_day: Option<u32>) -> Option<NaiveDate> {
    let day = renewal_day.unwrap_or_else(|| today.day());
    let (year, month) = if day <= today.day() {
        match today.month() {
            12 => (today.year() + 1, 1),
            m => (today.year(), m + 1),
        }
    } else {
        (today.year(), today.month())
    };
    let last = last_day_of_month(year, month)?;
    NaiveDate::from_ymd_opt(year, month, day.min(last.day()))
}

/// Next renewal date for a weekly subscription.
///
/// Weekdays are numbered 0 = Sunday .. 6 = Saturday. The result is always
/// strictly after today: when the renewal weekday is today or earlier in the
/// week, it wraps to the next week, so the gap is always 1..=7 days.
pub fn next_weekly_due(today: NaiveDate, renewal_weekday: Option<u32>) -> Option<NaiveDate> {
    let target = renewal_weekday.unwrap_or_else(|| today.weekday().num_days_from_sunday());
    let mut ahead = target as i64 - today.weekday().num_days_from_sunday() as i64;
    if ahead <= 0 {
        ahead += 7;
    }
    today.checked_add_signed(Duration::days(ahead))
}

/// Whole days between two midnight-truncated dates.
pub fn days_until(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// Last calendar day of a month: the day before the first of the next month.
fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = match month {
        12 => (year + 1, 1),
        m => (year, m + 1),
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_due_later_this_month() {
        let due = next_monthly_due(date(2025, 3, 10), Some(25)).unwrap();
        assert_eq!(due, date(2025, 3, 25));
    }

    #[test]
    fn test_monthly_due_already_passed_rolls_to_next_month() {
        let due = next_monthly_due(date(2025, 3, 25), Some(10)).unwrap();
        assert_eq!(due, date(2025, 4, 10));
    }

    #[test]
    fn test_monthly_due_today_rolls_to_next_month() {
        let due = next_monthly_due(date(2025, 3, 10), Some(10)).unwrap();
        assert_eq!(due, date(2025, 4, 10));
    }

    #[test]
    fn test_monthly_clamps_short_month() {
        // Renewal day 31, today Feb 15: clamp to the last day of February.
        let due = next_monthly_due(date(2025, 2, 15), Some(31)).unwrap();
        assert_eq!(due, date(2025, 2, 28));

        let due = next_monthly_due(date(2024, 2, 15), Some(31)).unwrap();
        assert_eq!(due, date(2024, 2, 29)); // leap year

        // Rolling into a short month clamps too.
        let due = next_monthly_due(date(2025, 3, 31), Some(31)).unwrap();
        assert_eq!(due, date(2025, 4, 30));
    }

    #[test]
    fn test_monthly_year_rollover() {
        let due = next_monthly_due(date(2025, 12, 20), Some(5)).unwrap();
        assert_eq!(due, date(2026, 1, 5));
    }

    #[test]
    fn test_monthly_missing_day_falls_back_to_today() {
        // Fallback uses today's day-of-month, which has "already passed".
        let due = next_monthly_due(date(2025, 6, 14), None).unwrap();
        assert_eq!(due, date(2025, 7, 14));
    }

    #[test]
    fn test_weekly_due_is_always_one_to_seven_days_out() {
        let today = date(2025, 6, 11); // a Wednesday
        for weekday in 0..7 {
            let due = next_weekly_due(today, Some(weekday)).unwrap();
            let gap = days_until(due, today);
            assert!((1..=7).contains(&gap), "weekday {weekday} gave gap {gap}");
            assert_eq!(due.weekday().num_days_from_sunday(), weekday);
        }
    }

    #[test]
    fn test_weekly_due_on_today_wraps_a_full_week() {
        let today = date(2025, 6, 11); // Wednesday = 3
        let due = next_weekly_due(today, Some(3)).unwrap();
        assert_eq!(due, date(2025, 6, 18));
    }

    #[test]
    fn test_weekly_missing_day_falls_back_to_next_week() {
        let today = date(2025, 6, 11);
        let due = next_weekly_due(today, None).unwrap();
        assert_eq!(due, date(2025, 6, 18));
    }

    #[test]
    fn test_days_until_whole_day_difference() {
        assert_eq!(days_until(date(2025, 6, 18), date(2025, 6, 11)), 7);
        assert_eq!(days_until(date(2025, 6, 12), date(2025, 6, 11)), 1);
        assert_eq!(days_until(date(2025, 6, 11), date(2025, 6, 11)), 0);
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2025, 2).unwrap(), date(2025, 2, 28));
        assert_eq!(last_day_of_month(2024, 2).unwrap(), date(2024, 2, 29));
        assert_eq!(last_day_of_month(2000, 2).unwrap(), date(2000, 2, 29));
        assert_eq!(last_day_of_month(1900, 2).unwrap(), date(1900, 2, 28));
        assert_eq!(last_day_of_month(2025, 4).unwrap(), date(2025, 4, 30));
        assert_eq!(last_day_of_month(2025, 12).unwrap(), date(2025, 12, 31));
    }
}
