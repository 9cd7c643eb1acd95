use rust_decimal::Decimal;
use thiserror::Error;

use super::state::TransferStatus;
use crate::error::ApiError;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("There are no bills to register")]
    EmptyBills,

    #[error("Transfer {0} not found")]
    TransferNotFound(String),

    #[error("Transfer is in state {current}, expected {expected}")]
    InvalidState {
        current: TransferStatus,
        expected: TransferStatus,
    },

    #[error("Access denied: caller is not the custodian assigned to this transfer")]
    NotAssignedCustodian,

    #[error("Access denied: caller is not the sender of this transfer")]
    NotSender,

    #[error("Access denied: sender role is required to declare transfers")]
    SenderRoleRequired,

    #[error("Counted total {counted} does not match declared amount {declared}")]
    AmountMismatch { declared: Decimal, counted: Decimal },

    #[error("Configuration error: no custodian is provisioned")]
    NoCustodian,

    #[error("Serial code '{0}' is already registered")]
    DuplicateSerial(String),

    #[error("Transfer left state {expected} during the update")]
    StatusChanged { expected: TransferStatus },

    #[error("Invalid transaction_date: expected an ISO-8601 timestamp")]
    InvalidDate,

    #[error("Stored data is inconsistent: {0}")]
    Corrupt(String),
}

impl From<WorkflowError> for ApiError {
    fn from(e: WorkflowError) -> Self {
        let message = e.to_string();
        match e {
            WorkflowError::EmptyBills
            | WorkflowError::AmountMismatch { .. }
            | WorkflowError::InvalidDate => ApiError::BadRequest(message),

            WorkflowError::TransferNotFound(_) => ApiError::NotFound(message),

            WorkflowError::InvalidState { .. }
            | WorkflowError::DuplicateSerial(_)
            | WorkflowError::StatusChanged { .. } => ApiError::Conflict(message),

            WorkflowError::NotAssignedCustodian
            | WorkflowError::NotSender
            | WorkflowError::SenderRoleRequired => ApiError::Forbidden(message),

            WorkflowError::NoCustodian => ApiError::Config(message),

            WorkflowError::Database(err) => ApiError::Internal(err.into()),
            WorkflowError::Corrupt(detail) => ApiError::Internal(anyhow::anyhow!(detail)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(e: WorkflowError) -> StatusCode {
        ApiError::from(e).status_code()
    }

    #[test]
    fn test_http_mapping() {
        assert_eq!(status_of(WorkflowError::EmptyBills), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(WorkflowError::AmountMismatch {
                declared: Decimal::from(500),
                counted: Decimal::from(400),
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(WorkflowError::TransferNotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(WorkflowError::InvalidState {
                current: TransferStatus::CashRegistered,
                expected: TransferStatus::Declared,
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(WorkflowError::DuplicateSerial("A1".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(WorkflowError::NotAssignedCustodian),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(WorkflowError::NoCustodian),
            StatusCode::PRECONDITION_FAILED
        );
    }

    #[test]
    fn test_messages_carry_values() {
        let e = WorkflowError::AmountMismatch {
            declared: Decimal::from(500),
            counted: Decimal::from(400),
        };
        let msg = e.to_string();
        assert!(msg.contains("500") && msg.contains("400"), "{}", msg);

        let e = WorkflowError::InvalidState {
            current: TransferStatus::CashRegistered,
            expected: TransferStatus::Declared,
        };
        assert!(e.to_string().contains("CASH_REGISTERED"));
    }
}
