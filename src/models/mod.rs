pub mod job;
pub mod notification;

pub use job::*;
pub use notification::*;
