use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Metadata stored on a subscription reminder notification.
///
/// `(subscription_id, due_date, days_until)` is the natural key the emitter
/// de-duplicates on; amount and emoji are display extras for the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderMetadata {
    pub subscription_id: i64,
    pub due_date: NaiveDate,
    pub days_until: i64,
    pub amount_cents: i64,
    pub emoji: String,
}

impl ReminderMetadata {
    /// Natural-key equality, ignoring the display extras.
    pub fn same_key(&self, other: &ReminderMetadata) -> bool {
        self.subscription_id == other.subscription_id
            && self.due_date == other.due_date
            && self.days_until == other.days_until
    }
}
