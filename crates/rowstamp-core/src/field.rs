//! The fixed vocabulary of audit metadata fields.

use std::fmt;

/// Sentinel value marking a record as not logically deleted.
pub const NOT_DELETED: i32 = 0;

/// A well-known bookkeeping field recognized by the write interceptor.
///
/// Each variant maps to one exact column name in the platform's table
/// conventions. Entities participate in auto-fill by declaring any subset of
/// these fields; everything outside this vocabulary is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditField {
    /// Creator id, defaulted from the current user on insert.
    CreateBy,
    /// Creation timestamp, always stamped on insert.
    CreateTime,
    /// Last-modifier id, defaulted from the current user on insert and update.
    UpdateBy,
    /// Last-modified timestamp, always stamped on insert and update.
    UpdateTime,
    /// Optimistic-lock version counter, reset to 0 on insert.
    Version,
    /// Logical-delete flag, reset to the not-deleted sentinel on insert.
    Deleted,
    /// Tenant id partitioning data ownership, defaulted on insert.
    TenantId,
}

impl AuditField {
    /// Every field in the vocabulary, in declaration order.
    pub const ALL: [AuditField; 7] = [
        AuditField::CreateBy,
        AuditField::CreateTime,
        AuditField::UpdateBy,
        AuditField::UpdateTime,
        AuditField::Version,
        AuditField::Deleted,
        AuditField::TenantId,
    ];

    /// The exact column name this field maps to.
    #[must_use]
    pub const fn column_name(&self) -> &'static str {
        match self {
            AuditField::CreateBy => "createBy",
            AuditField::CreateTime => "createTime",
            AuditField::UpdateBy => "updateBy",
            AuditField::UpdateTime => "updateTime",
            AuditField::Version => "version",
            AuditField::Deleted => "deleted",
            AuditField::TenantId => "tenantId",
        }
    }

    /// Look a field up by its column name.
    ///
    /// Returns `None` for names outside the vocabulary.
    #[must_use]
    pub fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column_name() == name)
    }
}

impl fmt::Display for AuditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}
