//! Transfer core types and request/response DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

use crate::account::UserId;
use super::state::TransferStatus;

/// Transfer identifier - ULID rendered as TEXT in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransferId(ulid::Ulid);

impl TransferId {
    /// Generate a new unique TransferId
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl Default for TransferId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransferId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(ulid::Ulid::from_string(s)?))
    }
}

/// Registered bill identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BillId(ulid::Ulid);

impl BillId {
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl Default for BillId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transfer row
#[derive(Debug, Clone)]
pub struct TransferRecord {
    pub id: TransferId,
    pub sender_id: UserId,
    pub custodian_id: UserId,
    pub declared_amount: Decimal,
    pub transaction_date: DateTime<Utc>,
    pub cash_photo_url: Option<String>,
    pub status: TransferStatus,
    pub created_at: DateTime<Utc>,
}

/// One physical bill counted against a transfer. Never updated after insert.
#[derive(Debug, Clone)]
pub struct RegisteredBill {
    pub id: BillId,
    pub transfer_id: TransferId,
    pub denomination: Decimal,
    pub serial_code: String,
}

// ============================================================================
// Request / response DTOs
// ============================================================================

fn validate_positive(value: &Decimal) -> Result<(), validator::ValidationError> {
    if *value > Decimal::ZERO {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("positive");
        err.message = Some("must be a positive amount".into());
        Err(err)
    }
}

/// Declare a transfer (sender)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeclareRequest {
    /// Sender-asserted total to be reconciled later
    #[validate(custom(function = "validate_positive"))]
    #[schema(value_type = f64, example = 500.0)]
    pub declared_amount: Decimal,
    /// ISO-8601 timestamp of the underlying transaction
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "2024-01-01T00:00:00Z")]
    pub transaction_date: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeclareResponse {
    pub success: bool,
    pub message: String,
    pub transfer_id: String,
    pub custodian_id: String,
}

/// One bill in a cash-register request
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CashBillDto {
    #[validate(custom(function = "validate_positive"))]
    #[schema(value_type = f64, example = 100.0)]
    pub denomination: Decimal,
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "A1B2C3")]
    pub serial_code: String,
}

/// Register counted cash against a declared transfer (custodian)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CashRegisterRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub transfer_id: String,
    #[validate(length(min = 1, message = "at least one bill is required"))]
    #[validate(nested)]
    pub cash_bills: Vec<CashBillDto>,
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "https://storage.example.com/cash/abc.jpg")]
    pub cash_photo_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CashRegisterResponse {
    pub success: bool,
    pub message: String,
    pub transfer_id: String,
    pub registered_count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub success: bool,
    pub message: String,
    pub transfer_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::flatten_validation;
    use std::str::FromStr as _;

    #[test]
    fn test_transfer_id_round_trip() {
        let id = TransferId::new();
        let parsed: TransferId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("definitely-not-a-ulid".parse::<TransferId>().is_err());
    }

    #[test]
    fn test_declare_request_deserializes() {
        let json = r#"{"declared_amount": 500, "transaction_date": "2024-01-01T00:00:00Z"}"#;
        let req: DeclareRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.declared_amount, Decimal::from(500));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_declare_rejects_non_positive_amount() {
        for amount in ["0", "-10"] {
            let json = format!(
                r#"{{"declared_amount": {}, "transaction_date": "2024-01-01T00:00:00Z"}}"#,
                amount
            );
            let req: DeclareRequest = serde_json::from_str(&json).unwrap();
            let errors = req.validate().unwrap_err();
            let msg = flatten_validation(&errors);
            assert!(msg.contains("declared_amount"), "{}", msg);
        }
    }

    #[test]
    fn test_cash_register_rejects_empty_bills() {
        let req = CashRegisterRequest {
            transfer_id: TransferId::new().to_string(),
            cash_bills: vec![],
            cash_photo_url: "https://example.com/p.jpg".to_string(),
        };
        let errors = req.validate().unwrap_err();
        let msg = flatten_validation(&errors);
        assert!(msg.contains("cash_bills"), "{}", msg);
    }

    #[test]
    fn test_cash_register_aggregates_bill_errors() {
        let req = CashRegisterRequest {
            transfer_id: TransferId::new().to_string(),
            cash_bills: vec![
                CashBillDto {
                    denomination: Decimal::from_str("-5").unwrap(),
                    serial_code: "A1".to_string(),
                },
                CashBillDto {
                    denomination: Decimal::from(100),
                    serial_code: "".to_string(),
                },
            ],
            cash_photo_url: "https://example.com/p.jpg".to_string(),
        };
        let errors = req.validate().unwrap_err();
        let msg = flatten_validation(&errors);
        // Both offending bills reported, with their list index
        assert!(msg.contains("cash_bills[0].denomination"), "{}", msg);
        assert!(msg.contains("cash_bills[1].serial_code"), "{}", msg);
    }

    #[test]
    fn test_cash_register_deserializes() {
        let json = r#"{
            "transfer_id": "01ARZ3NDEKTSV4RRFFQ69G5FAV",
            "cash_bills": [
                {"denomination": 200, "serial_code": "A1"},
                {"denomination": 300, "serial_code": "B2"}
            ],
            "cash_photo_url": "https://example.com/p.jpg"
        }"#;
        let req: CashRegisterRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.cash_bills.len(), 2);
    }
}
