//! Recurring-date arithmetic for the notification jobs.
//!
//! Everything here is pure: the reference "today" is always a parameter, never
//! read from the system clock, so the services can be driven deterministically.

pub mod due_date;
pub mod payday;

pub use due_date::{days_until, next_monthly_due, next_weekly_due};
pub use payday::{PaydayMatch, fortnightly_match, monthly_match, weekly_match};
