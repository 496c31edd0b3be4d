pub mod auth;
pub mod cors;

pub use auth::JobAuthMiddleware;
pub use cors::create_cors;
