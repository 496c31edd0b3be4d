use crate::entities::{NotificationKind, SubscriptionFrequency, notification_entity as notif, subscription_entity as subs};
use crate::error::AppResult;
use crate::models::ReminderMetadata;
use crate::schedule::{days_until, next_monthly_due, next_weekly_due};
use chrono::{NaiveDate, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::collections::HashMap;
use uuid::Uuid;

/// Reminder windows, in days before the due date.
const REMINDER_WINDOWS: [i64; 2] = [7, 1];

struct ReminderCandidate {
    title: String,
    message: String,
    meta: ReminderMetadata,
}

#[derive(Clone)]
pub struct SubscriptionReminderService {
    pool: DatabaseConnection,
}

impl SubscriptionReminderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn run(&self) -> AppResult<i64> {
        self.run_for_date(Utc::now().date_naive()).await
    }

    /// Emit due-date reminders for all active subscriptions, relative to an
    /// injected reference date. Returns the number of notifications created.
    ///
    /// A fetch failure aborts the whole run; an insert failure only drops that
    /// user's batch.
    pub async fn run_for_date(&self, today: NaiveDate) -> AppResult<i64> {
        let subscriptions = subs::Entity::find()
            .filter(subs::Column::Active.eq(true))
            .all(&self.pool)
            .await?;

        let mut by_user: HashMap<Uuid, Vec<subs::Model>> = HashMap::new();
        for sub in subscriptions {
            by_user.entry(sub.user_id).or_default().push(sub);
        }

        let mut created = 0i64;
        for (user_id, subscriptions) in by_user {
            match self.emit_for_user(user_id, &subscriptions, today).await {
                Ok(n) => created += n,
                Err(e) => {
                    log::error!("Failed to insert subscription reminders for user {user_id}: {e:?}")
                }
            }
        }
        Ok(created)
    }

    async fn emit_for_user(
        &self,
        user_id: Uuid,
        subscriptions: &[subs::Model],
        today: NaiveDate,
    ) -> AppResult<i64> {
        let candidates: Vec<ReminderCandidate> = subscriptions
            .iter()
            .filter_map(|sub| build_candidate(sub, today))
            .collect();
        if candidates.is_empty() {
            return Ok(0);
        }

        // Pre-insert existence check on the natural key. Not atomic with the
        // insert below; invocations are expected to be serialized by the
        // scheduler.
        let existing = notif::Entity::find()
            .filter(notif::Column::UserId.eq(user_id))
            .filter(notif::Column::Kind.eq(NotificationKind::SubscriptionReminder))
            .all(&self.pool)
            .await?;
        let existing_keys: Vec<ReminderMetadata> = existing
            .iter()
            .filter_map(|n| n.metadata.clone())
            .filter_map(|m| serde_json::from_value(m).ok())
            .collect();

        let fresh: Vec<ReminderCandidate> = candidates
            .into_iter()
            .filter(|c| !already_notified(&existing_keys, &c.meta))
            .collect();
        if fresh.is_empty() {
            return Ok(0);
        }

        let count = fresh.len() as i64;
        let rows = fresh
            .into_iter()
            .map(|c| {
                Ok(notif::ActiveModel {
                    user_id: Set(user_id),
                    kind: Set(NotificationKind::SubscriptionReminder),
                    title: Set(c.title),
                    message: Set(c.message),
                    read: Set(false),
                    metadata: Set(Some(serde_json::to_value(&c.meta)?)),
                    ..Default::default()
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        // One insert per user keeps write amplification bounded.
        notif::Entity::insert_many(rows).exec(&self.pool).await?;
        Ok(count)
    }
}

fn next_due(sub: &subs::Model, today: NaiveDate) -> Option<NaiveDate> {
    let renewal_day = sub.renewal_day.map(|d| d as u32);
    match sub.frequency.as_ref()? {
        SubscriptionFrequency::Monthly => next_monthly_due(today, renewal_day),
        SubscriptionFrequency::Weekly => next_weekly_due(today, renewal_day),
    }
}

fn build_candidate(sub: &subs::Model, today: NaiveDate) -> Option<ReminderCandidate> {
    // Rows with no frequency fall through silently; they are not errors.
    let due = next_due(sub, today)?;
    let days = days_until(due, today);
    if !REMINDER_WINDOWS.contains(&days) {
        return None;
    }

    let amount = sub.amount_cents as f64 / 100.0;
    let (emoji, message) = if days == 1 {
        (
            "⏰",
            format!("{} renews tomorrow ({:.2} {})", sub.name, amount, sub.currency),
        )
    } else {
        (
            "📅",
            format!(
                "{} renews in {} days ({:.2} {})",
                sub.name, days, amount, sub.currency
            ),
        )
    };

    Some(ReminderCandidate {
        title: "Subscription renewal reminder".to_string(),
        message,
        meta: ReminderMetadata {
            subscription_id: sub.id,
            due_date: due,
            days_until: days,
            amount_cents: sub.amount_cents,
            emoji: emoji.to_string(),
        },
    })
}

fn already_notified(existing: &[ReminderMetadata], candidate: &ReminderMetadata) -> bool {
    existing.iter().any(|m| m.same_key(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn subscription(frequency: Option<SubscriptionFrequency>, renewal_day: Option<i16>) -> subs::Model {
        subs::Model {
            id: 1,
            user_id: Uuid::nil(),
            name: "Streamflix".to_string(),
            amount_cents: 1599,
            currency: "USD".to_string(),
            frequency,
            renewal_day,
            active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_candidate_built_inside_seven_day_window() {
        // Renewal on the 18th, today the 11th: exactly 7 days out.
        let sub = subscription(Some(SubscriptionFrequency::Monthly), Some(18));
        let c = build_candidate(&sub, date(2025, 6, 11)).unwrap();
        assert_eq!(c.meta.days_until, 7);
        assert_eq!(c.meta.due_date, date(2025, 6, 18));
        assert_eq!(c.meta.emoji, "📅");
        assert!(c.message.contains("renews in 7 days"));
    }

    #[test]
    fn test_candidate_built_one_day_before() {
        let sub = subscription(Some(SubscriptionFrequency::Monthly), Some(12));
        let c = build_candidate(&sub, date(2025, 6, 11)).unwrap();
        assert_eq!(c.meta.days_until, 1);
        assert_eq!(c.meta.emoji, "⏰");
        assert!(c.message.contains("renews tomorrow"));
    }

    #[test]
    fn test_no_candidate_outside_windows() {
        for renewal_day in [13, 14, 16, 20, 25] {
            let sub = subscription(Some(SubscriptionFrequency::Monthly), Some(renewal_day));
            assert!(build_candidate(&sub, date(2025, 6, 11)).is_none());
        }
    }

    #[test]
    fn test_missing_frequency_falls_through() {
        let sub = subscription(None, Some(18));
        assert!(build_candidate(&sub, date(2025, 6, 11)).is_none());
    }

    #[test]
    fn test_weekly_candidate_seven_days_out() {
        // Today Wednesday, renewal Wednesday: next occurrence is in 7 days.
        let sub = subscription(Some(SubscriptionFrequency::Weekly), Some(3));
        let c = build_candidate(&sub, date(2025, 6, 11)).unwrap();
        assert_eq!(c.meta.days_until, 7);
        assert_eq!(c.meta.due_date, date(2025, 6, 18));
    }

    #[test]
    fn test_duplicate_candidate_is_filtered() {
        let sub = subscription(Some(SubscriptionFrequency::Monthly), Some(18));
        let c = build_candidate(&sub, date(2025, 6, 11)).unwrap();

        // Second run on the same day sees the first run's metadata.
        assert!(already_notified(std::slice::from_ref(&c.meta), &c.meta));

        // A later run in the 1-day window carries a different natural key.
        let later = build_candidate(&sub, date(2025, 6, 17)).unwrap();
        assert_eq!(later.meta.days_until, 1);
        assert!(!already_notified(&[c.meta], &later.meta));
    }
}
