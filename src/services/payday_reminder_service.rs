use crate::entities::{NotificationKind, PayFrequency, notification_entity as notif, pay_profile_entity as profiles};
use crate::error::AppResult;
use crate::schedule::{PaydayMatch, fortnightly_match, monthly_match, weekly_match};
use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

#[derive(Clone)]
pub struct PaydayReminderService {
    pool: DatabaseConnection,
}

impl PaydayReminderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn run(&self) -> AppResult<i64> {
        self.run_for_date(Utc::now().date_naive()).await
    }

    /// Emit payday notifications for every pay profile, relative to an
    /// injected reference date. Returns the number of notifications created.
    pub async fn run_for_date(&self, today: NaiveDate) -> AppResult<i64> {
        let tomorrow = today
            .succ_opt()
            .ok_or_else(|| crate::error::AppError::InternalError("date overflow".to_string()))?;

        let all_profiles = profiles::Entity::find().all(&self.pool).await?;

        let mut created = 0i64;
        for profile in all_profiles {
            match self.emit_for_profile(&profile, today, tomorrow).await {
                Ok(n) => created += n,
                Err(e) => log::error!(
                    "Failed to insert payday notifications for user {}: {e:?}",
                    profile.user_id
                ),
            }
        }
        Ok(created)
    }

    async fn emit_for_profile(
        &self,
        profile: &profiles::Model,
        today: NaiveDate,
        tomorrow: NaiveDate,
    ) -> AppResult<i64> {
        let matched = match_profile(profile, today, tomorrow);
        if !matched.any() {
            return Ok(0);
        }

        let name = profile.first_name.as_deref().unwrap_or("there");
        let mut batch: Vec<(NotificationKind, String, String)> = Vec::new();
        if matched.tomorrow {
            batch.push((
                NotificationKind::PaydayReminder,
                "Payday tomorrow 🎉".to_string(),
                format!("Hi {name}, your payday is tomorrow!"),
            ));
        }
        if matched.today {
            batch.push((
                NotificationKind::Payday,
                "It's payday! 💰".to_string(),
                format!("Hi {name}, today is your payday!"),
            ));
        }

        // One payday notification per kind per calendar day.
        let start_of_day = today.and_time(NaiveTime::MIN).and_utc();
        let existing = notif::Entity::find()
            .filter(notif::Column::UserId.eq(profile.user_id))
            .filter(notif::Column::Kind.is_in([
                NotificationKind::PaydayReminder,
                NotificationKind::Payday,
            ]))
            .filter(notif::Column::CreatedAt.gte(start_of_day))
            .all(&self.pool)
            .await?;

        let fresh: Vec<_> = batch
            .into_iter()
            .filter(|(kind, _, _)| !existing.iter().any(|n| n.kind == *kind))
            .collect();
        if fresh.is_empty() {
            return Ok(0);
        }

        let count = fresh.len() as i64;
        let rows: Vec<notif::ActiveModel> = fresh
            .into_iter()
            .map(|(kind, title, message)| notif::ActiveModel {
                user_id: Set(profile.user_id),
                kind: Set(kind),
                title: Set(title),
                message: Set(message),
                read: Set(false),
                metadata: Set(None),
                ..Default::default()
            })
            .collect();
        notif::Entity::insert_many(rows).exec(&self.pool).await?;
        Ok(count)
    }
}

fn match_profile(profile: &profiles::Model, today: NaiveDate, tomorrow: NaiveDate) -> PaydayMatch {
    match profile.pay_frequency.as_ref() {
        Some(PayFrequency::Weekly) => profile
            .pay_day_of_week
            .map(|d| weekly_match(today, tomorrow, d as u32))
            .unwrap_or_default(),
        Some(PayFrequency::Fortnightly) => {
            match (profile.pay_day_of_week, profile.pay_cycle_start) {
                (Some(d), Some(start)) => fortnightly_match(today, tomorrow, d as u32, start),
                _ => {
                    // No anchor, no parity: skip rather than guess.
                    log::debug!(
                        "Skipping fortnightly profile for user {} without pay cycle start",
                        profile.user_id
                    );
                    PaydayMatch::default()
                }
            }
        }
        Some(PayFrequency::Monthly) => profile
            .pay_day_of_month
            .map(|d| monthly_match(today, tomorrow, d as u32))
            .unwrap_or_default(),
        None => PaydayMatch::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn profile(pay_frequency: Option<PayFrequency>) -> profiles::Model {
        profiles::Model {
            id: 1,
            user_id: Uuid::nil(),
            first_name: Some("Sam".to_string()),
            pay_frequency,
            pay_day_of_week: None,
            pay_day_of_month: None,
            pay_cycle_start: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_weekly_profile_matches_on_payday() {
        let mut p = profile(Some(PayFrequency::Weekly));
        p.pay_day_of_week = Some(5); // Friday
        let m = match_profile(&p, date(2025, 6, 13), date(2025, 6, 14));
        assert!(m.today);
        assert!(!m.tomorrow);
    }

    #[test]
    fn test_fortnightly_profile_without_anchor_is_skipped() {
        let mut p = profile(Some(PayFrequency::Fortnightly));
        p.pay_day_of_week = Some(1);
        // pay_cycle_start stays None: degrade gracefully, no match and no error.
        let m = match_profile(&p, date(2024, 1, 1), date(2024, 1, 2));
        assert!(!m.any());
    }

    #[test]
    fn test_fortnightly_profile_with_anchor() {
        let mut p = profile(Some(PayFrequency::Fortnightly));
        p.pay_day_of_week = Some(1);
        p.pay_cycle_start = Some(date(2024, 1, 1));
        assert!(match_profile(&p, date(2024, 1, 15), date(2024, 1, 16)).today);
        assert!(!match_profile(&p, date(2024, 1, 8), date(2024, 1, 9)).any());
    }

    #[test]
    fn test_monthly_profile_day_31_in_short_month() {
        let mut p = profile(Some(PayFrequency::Monthly));
        p.pay_day_of_month = Some(31);
        // June has 30 days; no trigger at all this month.
        for d in 1..=29 {
            let today = date(2025, 6, d);
            let m = match_profile(&p, today, today.succ_opt().unwrap());
            assert!(!m.any(), "June {d} must not match pay day 31");
        }
    }

    #[test]
    fn test_missing_frequency_matches_nothing() {
        let p = profile(None);
        let m = match_profile(&p, date(2025, 6, 13), date(2025, 6, 14));
        assert!(!m.any());
    }
}
