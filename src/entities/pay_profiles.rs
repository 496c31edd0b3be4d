use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "pay_frequency")]
#[serde(rename_all = "snake_case")]
pub enum PayFrequency {
    #[sea_orm(string_value = "weekly")]
    Weekly,
    #[sea_orm(string_value = "fortnightly")]
    Fortnightly,
    #[sea_orm(string_value = "monthly")]
    Monthly,
}

impl std::fmt::Display for PayFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayFrequency::Weekly => write!(f, "weekly"),
            PayFrequency::Fortnightly => write!(f, "fortnightly"),
            PayFrequency::Monthly => write!(f, "monthly"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "pay_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub pay_frequency: Option<PayFrequency>,
    /// 0 = Sunday .. 6 = Saturday.
    pub pay_day_of_week: Option<i16>,
    pub pay_day_of_month: Option<i16>,
    /// Anchor for fortnightly parity; even whole weeks since this date is a pay week.
    pub pay_cycle_start: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
