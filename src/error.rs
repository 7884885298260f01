// ⚠️ Errors - Two kinds of violation
//
// Type violation:  the argument is the wrong kind of thing
//                  (a Bird offered to a Mammal enclosure, a bool where an age goes)
// Value violation: right kind, semantically invalid
//                  (blank text, out of range, duplicate, capacity, broken invariant)
//
// Every mutator checks type before value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for zoo operations
pub type ZooResult<T> = Result<T, ZooError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Type,
    Value,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Type => "TypeError",
            ErrorKind::Value => "ValueError",
        }
    }
}

/// Errors raised synchronously by every validated operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZooError {
    #[error("type violation: {0}")]
    TypeViolation(String),

    #[error("value violation: {0}")]
    ValueViolation(String),
}

impl ZooError {
    pub fn type_violation(message: impl Into<String>) -> Self {
        ZooError::TypeViolation(message.into())
    }

    pub fn value_violation(message: impl Into<String>) -> Self {
        ZooError::ValueViolation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ZooError::TypeViolation(_) => ErrorKind::Type,
            ZooError::ValueViolation(_) => ErrorKind::Value,
        }
    }

    pub fn is_type(&self) -> bool {
        self.kind() == ErrorKind::Type
    }

    pub fn is_value(&self) -> bool {
        self.kind() == ErrorKind::Value
    }

    /// The bare message, without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            ZooError::TypeViolation(message) | ZooError::ValueViolation(message) => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = ZooError::type_violation("Name must be a string.");
        assert!(err.is_type());
        assert!(!err.is_value());
        assert_eq!(err.kind().as_str(), "TypeError");

        let err = ZooError::value_violation("Name cannot be empty.");
        assert!(err.is_value());
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn test_error_display_and_message() {
        let err = ZooError::value_violation("Age cannot be negative.");
        assert_eq!(err.to_string(), "value violation: Age cannot be negative.");
        assert_eq!(err.message(), "Age cannot be negative.");
    }
}
