use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    Id,
    UserId,
    Name,
    AmountCents,
    Currency,
    Frequency,
    RenewalDay,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PayProfiles {
    Table,
    Id,
    UserId,
    FirstName,
    PayFrequency,
    PayDayOfWeek,
    PayDayOfMonth,
    PayCycleStart,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    UserId,
    Kind,
    Title,
    Message,
    Read,
    Metadata,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // enums
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("subscription_frequency"))
                    .values(vec![Alias::new("monthly"), Alias::new("weekly")])
                    .to_owned(),
            )
            .await?;
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("pay_frequency"))
                    .values(vec![
                        Alias::new("weekly"),
                        Alias::new("fortnightly"),
                        Alias::new("monthly"),
                    ])
                    .to_owned(),
            )
            .await?;
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("notification_kind"))
                    .values(vec![
                        Alias::new("subscription_reminder"),
                        Alias::new("payday_reminder"),
                        Alias::new("payday"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subscriptions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subscriptions::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Subscriptions::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::AmountCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::Currency)
                            .string_len(3)
                            .not_null()
                            .default("USD"),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::Frequency)
                            .custom(Alias::new("subscription_frequency"))
                            .null(),
                    )
                    .col(ColumnDef::new(Subscriptions::RenewalDay).small_integer().null())
                    .col(
                        ColumnDef::new(Subscriptions::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PayProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PayProfiles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PayProfiles::UserId).uuid().not_null())
                    .col(ColumnDef::new(PayProfiles::FirstName).string_len(255).null())
                    .col(
                        ColumnDef::new(PayProfiles::PayFrequency)
                            .custom(Alias::new("pay_frequency"))
                            .null(),
                    )
                    .col(ColumnDef::new(PayProfiles::PayDayOfWeek).small_integer().null())
                    .col(ColumnDef::new(PayProfiles::PayDayOfMonth).small_integer().null())
                    .col(ColumnDef::new(PayProfiles::PayCycleStart).date().null())
                    .col(
                        ColumnDef::new(PayProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PayProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notifications::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Notifications::Kind)
                            .custom(Alias::new("notification_kind"))
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(
                        ColumnDef::new(Notifications::Read)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Notifications::Metadata).json_binary().null())
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_subscriptions_user_active")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::UserId)
                    .col(Subscriptions::Active)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_pay_profiles_user")
                    .table(PayProfiles::Table)
                    .col(PayProfiles::UserId)
                    .to_owned(),
            )
            .await?;
        // Serves the per-user duplicate checks.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notifications_user_kind")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .col(Notifications::Kind)
                    .to_owned(),
            )
            .await?;
        // Serves the retention sweep. No unique index on the reminder natural
        // key: duplicate prevention is the emitter's check-then-insert.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notifications_created_at")
                    .table(Notifications::Table)
                    .col(Notifications::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Notifications::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(PayProfiles::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Subscriptions::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_type(
                Type::drop()
                    .name(Alias::new("notification_kind"))
                    .to_owned(),
            )
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("pay_frequency")).to_owned())
            .await?;
        manager
            .drop_type(
                Type::drop()
                    .name(Alias::new("subscription_frequency"))
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
