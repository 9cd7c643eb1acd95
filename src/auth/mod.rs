//! Identity & access layer: password hashing, JWT issuing/verification,
//! and the middleware that resolves a caller identity for protected routes.

pub mod handlers;
pub mod middleware;
pub mod service;

pub use middleware::CallerIdentity;
pub use service::AuthService;
