//! Data models for user account management

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// User identifier - ULID rendered as TEXT in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(ulid::Ulid);

impl UserId {
    /// Generate a new unique UserId
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(ulid::Ulid::from_string(s)?))
    }
}

/// Account role. Stored as TEXT, constrained by a CHECK in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Sender,
    Custodian,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Sender => "sender",
            Role::Custodian => "custodian",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "sender" => Some(Role::Sender),
            "custodian" => Some(Role::Custodian),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_db(s).ok_or(())
    }
}

/// User account row
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Sender, Role::Custodian] {
            assert_eq!(Role::from_db(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_db("validator"), None);
        assert_eq!(Role::from_db(""), None);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("custodian".parse::<Role>(), Ok(Role::Custodian));
        assert!("ADMIN".parse::<Role>().is_err()); // case-sensitive, matches DB CHECK
    }

    #[test]
    fn test_user_id_round_trip() {
        let id = UserId::new();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_user_id_rejects_garbage() {
        assert!("not-a-ulid".parse::<UserId>().is_err());
    }
}
