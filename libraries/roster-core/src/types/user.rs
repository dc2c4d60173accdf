/// User domain types
use crate::error::{Result, RosterError};
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted user account
///
/// The bookkeeping fields serialize with capitalized keys (`ID`,
/// `CreatedAt`, `UpdatedAt`, `DeletedAt`) while the profile fields stay
/// lowercase, matching the wire format existing clients already consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    #[serde(rename = "ID")]
    pub id: UserId,

    /// Row creation timestamp
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    #[serde(rename = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,

    /// Soft-delete marker, never set by this service
    #[serde(rename = "DeletedAt")]
    pub deleted_at: Option<DateTime<Utc>>,

    /// Display name
    pub name: String,

    /// Contact email, neither format-checked nor unique
    pub email: String,
}

/// Validated input for creating a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name (may be empty)
    pub name: String,

    /// Contact email (may be empty)
    pub email: String,
}

impl NewUser {
    /// Create a new user payload
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Create payload as decoded from a request body, before validation
///
/// Unknown keys are ignored. A key that is absent or `null` counts as
/// missing; an empty string is a present value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserDraft {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
}

impl UserDraft {
    /// Check that every required field is present
    ///
    /// Returns `RosterError::Validation` naming all missing fields at once.
    pub fn validate(self) -> Result<NewUser> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.email.is_none() {
            missing.push("email");
        }

        match (self.name, self.email) {
            (Some(name), Some(email)) => Ok(NewUser { name, email }),
            _ => Err(RosterError::validation(missing)),
        }
    }
}
