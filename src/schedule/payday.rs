use chrono::{Datelike, NaiveDate};

/// Whether a pay profile's payday lands on the reference day or the day after.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaydayMatch {
    pub today: bool,
    pub tomorrow: bool,
}

impl PaydayMatch {
    pub fn any(&self) -> bool {
        self.today || self.tomorrow
    }
}

/// Weekly pay: direct weekday equality (0 = Sunday .. 6 = Saturday).
pub fn weekly_match(today: NaiveDate, tomorrow: NaiveDate, pay_day_of_week: u32) -> PaydayMatch {
    PaydayMatch {
        today: today.weekday().num_days_from_sunday() == pay_day_of_week,
        tomorrow: tomorrow.weekday().num_days_from_sunday() == pay_day_of_week,
    }
}

/// Fortnightly pay: weekday equality, but only inside a pay week.
///
/// A pay week is one where the whole-week count since `cycle_start`
/// (floor-divided) is even; the parity is taken from `today`, so a payday
/// falling tomorrow across a week boundary is not announced.
pub fn fortnightly_match(
    today: NaiveDate,
    tomorrow: NaiveDate,
    pay_day_of_week: u32,
    cycle_start: NaiveDate,
) -> PaydayMatch {
    let elapsed_weeks = (today - cycle_start).num_days().div_euclid(7);
    if elapsed_weeks % 2 != 0 {
        return PaydayMatch::default();
    }
    weekly_match(today, tomorrow, pay_day_of_week)
}

/// Monthly pay: direct day-of-month equality.
///
/// Unlike subscription renewals there is no short-month clamp: a pay day of 31
/// simply never matches in a 30-day month. Kept as-is pending a product
/// decision on whether the two should agree.
pub fn monthly_match(today: NaiveDate, tomorrow: NaiveDate, pay_day_of_month: u32) -> PaydayMatch {
    PaydayMatch {
        today: today.day() == pay_day_of_month,
        tomorrow: tomorrow.day() == pay_day_of_month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pair(y: i32, m: u32, d: u32) -> (NaiveDate, NaiveDate) {
        let today = date(y, m, d);
        (today, today.succ_opt().unwrap())
    }

    #[test]
    fn test_weekly_payday_today() {
        let (today, tomorrow) = pair(2025, 6, 13); // Friday = 5
        let m = weekly_match(today, tomorrow, 5);
        assert!(m.today);
        assert!(!m.tomorrow);
    }

    #[test]
    fn test_weekly_payday_tomorrow() {
        let (today, tomorrow) = pair(2025, 6, 12); // Thursday; Friday = 5 tomorrow
        let m = weekly_match(today, tomorrow, 5);
        assert!(!m.today);
        assert!(m.tomorrow);
    }

    #[test]
    fn test_fortnightly_even_week_mondays() {
        // Anchor 2024-01-01 is a Monday; week 0 is a pay week.
        let start = date(2024, 1, 1);
        let monday = 1;

        for payday in [date(2024, 1, 1), date(2024, 1, 15), date(2024, 1, 29)] {
            let m = fortnightly_match(payday, payday.succ_opt().unwrap(), monday, start);
            assert!(m.today, "{payday} should be a payday");
        }
        for off_week in [date(2024, 1, 8), date(2024, 1, 22)] {
            let m = fortnightly_match(off_week, off_week.succ_opt().unwrap(), monday, start);
            assert!(!m.any(), "{off_week} is an off week");
        }
    }

    #[test]
    fn test_fortnightly_parity_taken_from_today() {
        // Sunday 2024-01-14 sits in off week 1; the Monday payday one day later
        // belongs to week 2 but is not announced, since parity comes from today.
        let start = date(2024, 1, 1);
        let (today, tomorrow) = pair(2024, 1, 14);
        let m = fortnightly_match(today, tomorrow, 1, start);
        assert!(!m.any());
    }

    #[test]
    fn test_fortnightly_before_anchor() {
        // Two whole weeks before the anchor is still an even week.
        let start = date(2024, 1, 15);
        let m = fortnightly_match(date(2024, 1, 1), date(2024, 1, 2), 1, start);
        assert!(m.today);

        // One week before is odd.
        let m = fortnightly_match(date(2024, 1, 8), date(2024, 1, 9), 1, start);
        assert!(!m.any());
    }

    #[test]
    fn test_monthly_payday_matches_exact_day() {
        let (today, tomorrow) = pair(2025, 5, 31);
        let m = monthly_match(today, tomorrow, 31);
        assert!(m.today);
        assert!(!m.tomorrow);
    }

    #[test]
    fn test_monthly_payday_tomorrow_across_month_boundary() {
        let (today, tomorrow) = pair(2025, 4, 30); // tomorrow is May 1
        let m = monthly_match(today, tomorrow, 1);
        assert!(!m.today);
        assert!(m.tomorrow);
    }

    #[test]
    fn test_monthly_payday_day_31_skips_short_months() {
        // No clamping for paydays: day 31 never fires in April.
        for d in 1..=30 {
            let (today, tomorrow) = pair(2025, 4, d);
            let m = monthly_match(today, tomorrow, 31);
            assert!(!m.today, "April {d} must not match pay day 31");
            if d < 30 {
                assert!(!m.tomorrow);
            }
        }
    }
}
