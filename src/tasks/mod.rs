//! Background scheduled tasks for the application.
//!
//! This module centralizes the recurring notification jobs (subscription
//! renewal reminders, payday reminders, and the retention sweep). Call
//! `spawn_all` once during startup to launch them; the same jobs are also
//! exposed as HTTP triggers for external schedulers.

use crate::services::{
    NotificationCleanupService, PaydayReminderService, SubscriptionReminderService,
};

const DAILY: std::time::Duration = std::time::Duration::from_secs(24 * 3600);

/// Spawn all background tasks.
///
/// Notes
/// - Each job is idempotent (de-duplicated per natural key or calendar day),
///   so overlapping an external HTTP trigger is harmless on a serialized
///   schedule.
/// - This function detaches tasks via `tokio::spawn`; it does not block.
pub fn spawn_all(
    subscription_reminder_service: SubscriptionReminderService,
    payday_reminder_service: PaydayReminderService,
    cleanup_service: NotificationCleanupService,
) {
    // Subscription renewal reminders (daily)
    {
        let svc = subscription_reminder_service.clone();
        tokio::spawn(async move {
            loop {
                match svc.run().await {
                    Ok(n) if n > 0 => log::info!("Subscription reminders created: {n}"),
                    Ok(_) => {}
                    Err(e) => log::error!("Failed to run subscription reminder job: {e:?}"),
                }
                tokio::time::sleep(DAILY).await;
            }
        });
    }

    // Payday reminders (daily)
    {
        let svc = payday_reminder_service.clone();
        tokio::spawn(async move {
            loop {
                match svc.run().await {
                    Ok(n) if n > 0 => log::info!("Payday notifications created: {n}"),
                    Ok(_) => {}
                    Err(e) => log::error!("Failed to run payday reminder job: {e:?}"),
                }
                tokio::time::sleep(DAILY).await;
            }
        });
    }

    // Notification retention sweep (daily)
    {
        let svc = cleanup_service.clone();
        tokio::spawn(async move {
            loop {
                match svc.run().await {
                    Ok(n) if n > 0 => log::info!("Old notifications deleted: {n}"),
                    Ok(_) => {}
                    Err(e) => log::error!("Failed to run notification cleanup job: {e:?}"),
                }
                tokio::time::sleep(DAILY).await;
            }
        });
    }
}
