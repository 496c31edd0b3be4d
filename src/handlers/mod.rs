pub mod health;
pub mod jobs;

pub use health::health_config;
pub use jobs::jobs_config;
