//! User accounts: models, repository and admin provisioning

pub mod bootstrap;
pub mod models;
pub mod repository;

pub use bootstrap::ensure_admin;
pub use models::{Role, User, UserId};
pub use repository::UserRepository;
