//! Rowstamp - write-path audit metadata injection and schema-sync dispatch.
//!
//! Rowstamp is the bookkeeping layer of an administrative platform's
//! persistence stack. It provides:
//!
//! - Transparent injection of standardized audit fields (creator,
//!   timestamps, soft-delete flag, optimistic-lock version, tenant id) into
//!   every insert/update call, without touching entity code or call sites
//! - A dialect strategy registry routing schema-synchronization requests to
//!   pluggable handlers
//!
//! # Quick Start
//!
//! ```ignore
//! use rowstamp::prelude::*;
//!
//! #[derive(AuditRecord, Debug, Default)]
//! struct SysUser {
//!     id: Option<i64>,
//!     username: String,
//!     create_by: Option<String>,
//!     create_time: Option<i64>,
//!     update_by: Option<String>,
//!     update_time: Option<i64>,
//!     version: i32,
//!     deleted: i32,
//!     tenant_id: Option<String>,
//! }
//!
//! fn save(executor: &mut impl FnMut(&mut WriteCall) -> Result<u64>) -> Result<u64> {
//!     let interceptor = AutoFillInterceptor::new(StaticIdentity::new("admin"));
//!     let mut call = WriteCall::new(vec![
//!         Argument::Statement(StatementDescriptor::new("sys_user.insert", StatementKind::Insert)),
//!         Argument::Record(Box::new(SysUser::default())),
//!     ]);
//!     interceptor.intercept(&mut call, executor)
//! }
//! ```

// Re-export all public types from sub-crates
pub use rowstamp_core::{
    AuditField, AuditRecord, AuditValue, Error, FieldAccessError, FieldAccessErrorKind,
    IdentityError, IdentitySource, NOT_DELETED, Result, StaticIdentity, StrategyError, Value,
    now_timestamp,
};
pub use rowstamp_intercept::{
    Argument, AutoFillInterceptor, PARAM_ENTITY_KEY, PARAM_FIRST_POSITIONAL_KEY, ParamMap,
    StatementDescriptor, StatementKind, WriteCall,
};
pub use rowstamp_macros::AuditRecord;
pub use rowstamp_sync::{ColumnModel, StrategyRegistry, SyncStrategy, TableAndColumnModel};

/// Convenience imports for the common case.
pub mod prelude {
    pub use rowstamp_core::{
        AuditField, AuditRecord, AuditValue, Error, IdentitySource, NOT_DELETED, Result,
        StaticIdentity, Value,
    };
    pub use rowstamp_intercept::{
        Argument, AutoFillInterceptor, ParamMap, StatementDescriptor, StatementKind, WriteCall,
    };
    pub use rowstamp_macros::AuditRecord;
    pub use rowstamp_sync::{StrategyRegistry, SyncStrategy, TableAndColumnModel};
}
