use crate::entities::notification_entity as notif;
use crate::error::AppResult;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

#[derive(Clone)]
pub struct NotificationCleanupService {
    pool: DatabaseConnection,
    retention_days: i64,
}

impl NotificationCleanupService {
    pub fn new(pool: DatabaseConnection, retention_days: i64) -> Self {
        Self {
            pool,
            retention_days,
        }
    }

    pub async fn run(&self) -> AppResult<u64> {
        self.run_at(Utc::now()).await
    }

    /// Hard-delete notifications older than the retention window in one bulk
    /// call. Returns the number of rows removed.
    pub async fn run_at(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let res = notif::Entity::delete_many()
            .filter(notif::Column::CreatedAt.lt(cutoff(now, self.retention_days)))
            .exec(&self.pool)
            .await?;
        Ok(res.rows_affected)
    }
}

fn cutoff(now: DateTime<Utc>, retention_days: i64) -> DateTime<Utc> {
    now - Duration::days(retention_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_is_thirty_days_before_now() {
        let now = DateTime::parse_from_rfc3339("2025-06-30T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let cutoff = cutoff(now, 30);

        // Created 31 days ago: strictly before the cutoff, so deleted.
        let old = now - Duration::days(31);
        assert!(old < cutoff);

        // Created 29 days ago: inside the window, retained.
        let recent = now - Duration::days(29);
        assert!(recent >= cutoff);
    }
}
