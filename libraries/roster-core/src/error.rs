/// Core error types for Roster
use crate::types::UserId;
use thiserror::Error;

/// Result type alias using `RosterError`
pub type Result<T> = std::result::Result<T, RosterError>;

/// Core error type for Roster
#[derive(Error, Debug)]
pub enum RosterError {
    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Required fields were absent from a create payload
    #[error("Validation failed: missing {}", .fields.join(", "))]
    Validation {
        /// Names of the missing fields, in declaration order
        fields: Vec<&'static str>,
    },

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl RosterError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a validation error for the given missing fields
    pub fn validation(fields: Vec<&'static str>) -> Self {
        Self::Validation { fields }
    }

    /// Returns true if the error means the requested record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_fields() {
        let err = RosterError::validation(vec!["name", "email"]);
        assert_eq!(err.to_string(), "Validation failed: missing name, email");
    }

    #[test]
    fn test_not_found_classification() {
        assert!(RosterError::UserNotFound(UserId::new(7)).is_not_found());
        assert!(!RosterError::storage("disk full").is_not_found());
    }
}
