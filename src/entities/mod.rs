pub mod notifications;
pub mod pay_profiles;
pub mod subscriptions;

pub use notifications as notification_entity;
pub use pay_profiles as pay_profile_entity;
pub use subscriptions as subscription_entity;

pub use notifications::NotificationKind;
pub use pay_profiles::PayFrequency;
pub use subscriptions::SubscriptionFrequency;
