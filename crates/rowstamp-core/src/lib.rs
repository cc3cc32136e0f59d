//! Core types and traits for Rowstamp.
//!
//! This crate provides the foundational abstractions shared by the write
//! interceptor and the schema-sync registry:
//!
//! - `AuditField` - the fixed vocabulary of bookkeeping columns
//! - `Value` - dynamically-typed field values
//! - `AuditRecord` trait for entities that carry audit metadata
//! - `AuditValue` conversions between concrete field types and `Value`
//! - `IdentitySource` - the seam to the authentication collaborator
//! - `Error` / `Result` - the shared error taxonomy

pub mod error;
pub mod field;
pub mod identity;
pub mod record;
pub mod time;
pub mod value;

pub use error::{Error, FieldAccessError, FieldAccessErrorKind, IdentityError, Result, StrategyError};
pub use field::{AuditField, NOT_DELETED};
pub use identity::{IdentitySource, StaticIdentity};
pub use record::{AuditRecord, AuditValue};
pub use time::now_timestamp;
pub use value::Value;
