//! Custodia - cash custody and transfer reconciliation REST API
//!
//! Senders declare monetary transfers, the custodian reconciles declared
//! amounts against physically counted cash bills, and counts are persisted
//! with transactional integrity.
//!
//! # Modules
//!
//! - [`config`] - YAML config and required environment secrets
//! - [`db`] - PostgreSQL pool and schema bootstrap
//! - [`error`] - API error taxonomy and HTTP mapping
//! - [`account`] - user models, repository and admin provisioning
//! - [`auth`] - password hashing, JWT issuing/verification, middleware
//! - [`transfer`] - the declare / cash-register / verify workflow engine
//! - [`gateway`] - routing, health check and server startup
//! - [`logging`] - tracing setup

pub mod account;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod transfer;

// Convenient re-exports at crate root
pub use account::{Role, User, UserId};
pub use auth::{AuthService, CallerIdentity};
pub use config::{AppConfig, Secrets};
pub use db::Database;
pub use error::ApiError;
pub use gateway::state::AppState;
pub use transfer::{TransferId, TransferService, TransferStatus};
