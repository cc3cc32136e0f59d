//! The audit-record capability trait and value conversions.
//!
//! Entities opt into auto-fill by implementing `AuditRecord`, normally via
//! `#[derive(AuditRecord)]` from `rowstamp-macros`. The derive recognizes
//! struct fields whose names map onto the audit vocabulary and generates the
//! dispatch below; everything else about the entity stays untouched.

use crate::error::{Error, Result};
use crate::field::AuditField;
use crate::value::Value;

/// Capability trait for entities that carry audit metadata.
///
/// The interceptor drives all three methods: it walks `audit_fields()` to
/// learn which parts of the vocabulary the record declares, reads current
/// values with `audit_value`, and assigns defaults with `set_audit_value`.
///
/// Implementations must be internally consistent: `audit_value` returns
/// `Some` for every field listed by `audit_fields()`, and `set_audit_value`
/// errors (`Error::undeclared_field`) for every field that is not.
pub trait AuditRecord {
    /// The subset of the audit vocabulary this record declares, in
    /// vocabulary order. Fields inherited through struct composition are
    /// included by whatever impl the composed type provides.
    fn audit_fields(&self) -> &'static [AuditField];

    /// Current value of a declared field; `None` if the record does not
    /// declare `field`.
    fn audit_value(&self, field: AuditField) -> Option<Value>;

    /// Assign a declared field. Errors are introspection failures: the field
    /// is undeclared, or the value's shape does not fit the field's type.
    fn set_audit_value(&mut self, field: AuditField, value: Value) -> Result<()>;
}

/// Conversion between a concrete Rust field type and the dynamic `Value`.
///
/// `from_audit_value` is deliberately lenient across integer shapes so that
/// an `i64` timestamp column accepts `Value::Timestamp` and a numeric flag
/// column accepts `Value::Int`.
pub trait AuditValue: Sized {
    /// Convert the field's current contents to a dynamic value.
    fn to_audit_value(&self) -> Value;

    /// Rebuild the field's contents from a dynamic value.
    fn from_audit_value(value: Value) -> Result<Self>;
}

impl AuditValue for String {
    fn to_audit_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_audit_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(Error::type_mismatch("TEXT", other.type_name())),
        }
    }
}

impl AuditValue for bool {
    fn to_audit_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_audit_value(value: Value) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| Error::type_mismatch("BOOLEAN", value.type_name()))
    }
}

impl AuditValue for i32 {
    fn to_audit_value(&self) -> Value {
        Value::Int(*self)
    }

    fn from_audit_value(value: Value) -> Result<Self> {
        let wide = value
            .as_i64()
            .ok_or_else(|| Error::type_mismatch("INTEGER", value.type_name()))?;
        i32::try_from(wide).map_err(|_| Error::type_mismatch("INTEGER", format!("BIGINT {wide}")))
    }
}

impl AuditValue for i64 {
    fn to_audit_value(&self) -> Value {
        Value::BigInt(*self)
    }

    fn from_audit_value(value: Value) -> Result<Self> {
        value
            .as_i64()
            .ok_or_else(|| Error::type_mismatch("BIGINT", value.type_name()))
    }
}

impl<T: AuditValue> AuditValue for Option<T> {
    fn to_audit_value(&self) -> Value {
        match self {
            Some(v) => v.to_audit_value(),
            None => Value::Null,
        }
    }

    fn from_audit_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_audit_value(other).map(Some),
        }
    }
}
