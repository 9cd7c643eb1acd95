//! Transfer workflow engine
//!
//! Orchestrates the declare / cash-register / verify state machine:
//!
//! ```text
//! DECLARED ──registerCash──▶ CASH_REGISTERED ──verify──▶ COMPLETED
//!     │
//!     └────────────────────▶ CANCELED (reserved)
//! ```
//!
//! Status only moves forward. Bill insertion plus the status flip happen in
//! one database transaction, and the flip itself is a conditional update so
//! concurrent registrations against the same transfer cannot both win.

pub mod db;
pub mod error;
pub mod handlers;
pub mod service;
pub mod state;
pub mod types;

pub use db::TransferDb;
pub use error::WorkflowError;
pub use service::TransferService;
pub use state::TransferStatus;
pub use types::{BillId, RegisteredBill, TransferId, TransferRecord};
