//! Error types for Rowstamp operations.

use std::fmt;

use crate::field::AuditField;

/// The primary error type for all Rowstamp operations.
#[derive(Debug)]
pub enum Error {
    /// Ambient identity lookup failed (no authenticated user in context)
    Identity(IdentityError),
    /// A record's declared fields could not be read or written as requested
    FieldAccess(FieldAccessError),
    /// A sync strategy's own execution failed
    Strategy(StrategyError),
    /// Custom error with message
    Custom(String),
}

/// Failure to resolve the current user from the ambient request context.
///
/// This is fatal to the write call it occurs in: persisting a record with
/// unknown ownership is worse than aborting the write.
#[derive(Debug)]
pub struct IdentityError {
    pub message: String,
}

/// Failure to enumerate or assign a record field.
#[derive(Debug)]
pub struct FieldAccessError {
    pub kind: FieldAccessErrorKind,
    /// Column name of the offending field, when known.
    pub field: Option<&'static str>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccessErrorKind {
    /// The record does not declare the requested field
    Undeclared,
    /// The value's shape does not fit the field's type
    TypeMismatch,
}

/// Failure raised by a dialect strategy while applying a schema change.
#[derive(Debug)]
pub struct StrategyError {
    pub dialect: String,
    pub message: String,
}

impl Error {
    /// Identity lookup failure with a message.
    pub fn identity(message: impl Into<String>) -> Self {
        Error::Identity(IdentityError {
            message: message.into(),
        })
    }

    /// The record does not declare `field`.
    pub fn undeclared_field(field: &'static str) -> Self {
        Error::FieldAccess(FieldAccessError {
            kind: FieldAccessErrorKind::Undeclared,
            field: Some(field),
            message: format!("record does not declare field '{field}'"),
        })
    }

    /// A value could not be assigned to a field of the given Rust type.
    pub fn type_mismatch(expected: &'static str, actual: impl Into<String>) -> Self {
        let actual = actual.into();
        Error::FieldAccess(FieldAccessError {
            kind: FieldAccessErrorKind::TypeMismatch,
            field: None,
            message: format!("expected {expected}, found {actual}"),
        })
    }

    /// Strategy execution failure for a dialect.
    pub fn strategy(dialect: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Strategy(StrategyError {
            dialect: dialect.into(),
            message: message.into(),
        })
    }

    /// Attach a field's column name to a `FieldAccess` error that lacks one.
    ///
    /// Other variants pass through unchanged.
    #[must_use]
    pub fn with_field(self, field: &'static str) -> Self {
        match self {
            Error::FieldAccess(mut e) => {
                if e.field.is_none() {
                    e.field = Some(field);
                }
                Error::FieldAccess(e)
            }
            other => other,
        }
    }

    /// Which audit field this error concerns, if any.
    #[must_use]
    pub fn audit_field(&self) -> Option<AuditField> {
        match self {
            Error::FieldAccess(e) => e.field.and_then(AuditField::from_column_name),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Identity(e) => write!(f, "Identity error: {}", e.message),
            Error::FieldAccess(e) => {
                if let Some(field) = e.field {
                    write!(f, "Field access error on '{}': {}", field, e.message)
                } else {
                    write!(f, "Field access error: {}", e.message)
                }
            }
            Error::Strategy(e) => {
                write!(f, "Sync strategy error ({}): {}", e.dialect, e.message)
            }
            Error::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<IdentityError> for Error {
    fn from(err: IdentityError) -> Self {
        Error::Identity(err)
    }
}

impl From<FieldAccessError> for Error {
    fn from(err: FieldAccessError) -> Self {
        Error::FieldAccess(err)
    }
}

impl From<StrategyError> for Error {
    fn from(err: StrategyError) -> Self {
        Error::Strategy(err)
    }
}

/// Result type alias for Rowstamp operations.
pub type Result<T> = std::result::Result<T, Error>;
