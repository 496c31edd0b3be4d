use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "subscription_frequency"
)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionFrequency {
    #[sea_orm(string_value = "monthly")]
    Monthly,
    #[sea_orm(string_value = "weekly")]
    Weekly,
}

impl std::fmt::Display for SubscriptionFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionFrequency::Monthly => write!(f, "monthly"),
            SubscriptionFrequency::Weekly => write!(f, "weekly"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
    pub amount_cents: i64,
    /// ISO 4217 code, inherited from the owning user's profile at creation.
    pub currency: String,
    /// Rows synced from older clients may lack a frequency; the reminder job
    /// skips those instead of erroring.
    pub frequency: Option<SubscriptionFrequency>,
    /// Day-of-month (1-31) for monthly, day-of-week (0 = Sunday .. 6) for weekly.
    pub renewal_day: Option<i16>,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
