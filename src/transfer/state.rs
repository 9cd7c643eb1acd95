//! Transfer state machine definitions
//!
//! Stored as TEXT in PostgreSQL, constrained by a CHECK on the column.

use std::fmt;
use std::str::FromStr;

/// Transfer lifecycle states.
///
/// Terminal states: COMPLETED, CANCELED. No backward transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferStatus {
    /// Declared by a sender, no bills attached yet
    Declared,
    /// Custodian counted and registered the physical bills
    CashRegistered,
    /// Terminal: sender confirmed the registered cash
    Completed,
    /// Terminal: reserved divert path, not reachable through the API yet
    Canceled,
}

impl TransferStatus {
    /// Whether the state machine permits moving from `self` to `next`.
    /// This is the single source of the transition rules; the workflow
    /// guards in `TransferService` go through it.
    pub fn can_transition_to(&self, next: TransferStatus) -> bool {
        matches!(
            (self, next),
            (TransferStatus::Declared, TransferStatus::CashRegistered)
                | (TransferStatus::CashRegistered, TransferStatus::Completed)
                | (TransferStatus::Declared, TransferStatus::Canceled)
                | (TransferStatus::CashRegistered, TransferStatus::Canceled)
        )
    }

    /// Database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Declared => "DECLARED",
            TransferStatus::CashRegistered => "CASH_REGISTERED",
            TransferStatus::Completed => "COMPLETED",
            TransferStatus::Canceled => "CANCELED",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "DECLARED" => Some(TransferStatus::Declared),
            "CASH_REGISTERED" => Some(TransferStatus::CashRegistered),
            "COMPLETED" => Some(TransferStatus::Completed),
            "CANCELED" => Some(TransferStatus::Canceled),
            _ => None,
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransferStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransferStatus::from_db(s).ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_only() {
        use TransferStatus::*;

        assert!(Declared.can_transition_to(CashRegistered));
        assert!(CashRegistered.can_transition_to(Completed));
        assert!(Declared.can_transition_to(Canceled));
        assert!(CashRegistered.can_transition_to(Canceled));

        // No backward transitions
        assert!(!CashRegistered.can_transition_to(Declared));
        assert!(!Completed.can_transition_to(CashRegistered));
        assert!(!Completed.can_transition_to(Declared));

        // No self transitions, so a second registration or confirmation
        // of the same transfer is always rejected
        for state in [Declared, CashRegistered, Completed, Canceled] {
            assert!(!state.can_transition_to(state));
        }

        // Nothing leaves a terminal state
        for next in [Declared, CashRegistered, Completed, Canceled] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Canceled.can_transition_to(next));
        }

        // No skipping DECLARED -> COMPLETED
        assert!(!Declared.can_transition_to(Completed));
    }

    #[test]
    fn test_db_round_trip() {
        use TransferStatus::*;
        for status in [Declared, CashRegistered, Completed, Canceled] {
            assert_eq!(TransferStatus::from_db(status.as_str()), Some(status));
        }
        assert_eq!(TransferStatus::from_db("PENDING"), None);
    }
}
