pub mod notification_cleanup_service;
pub mod payday_reminder_service;
pub mod subscription_reminder_service;

pub use notification_cleanup_service::*;
pub use payday_reminder_service::*;
pub use subscription_reminder_service::*;
