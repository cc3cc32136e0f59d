//! The auto-fill interceptor.

use rowstamp_core::{AuditField, AuditRecord, IdentitySource, NOT_DELETED, Result, Value};

use crate::call::{Argument, StatementKind, WriteCall};

/// Injects standardized bookkeeping fields into every insert/update call.
///
/// The interceptor is stateless across calls: each invocation works only on
/// its own argument list, so concurrent invocations on distinct entities
/// never contend. Identity lookups go through the [`IdentitySource`] seam
/// and happen lazily, only when a creator/modifier id actually needs a
/// default.
///
/// # Per-field policy (insert)
///
/// | field        | policy                                          |
/// |--------------|-------------------------------------------------|
/// | `createBy`   | default from current user when null             |
/// | `createTime` | always stamped                                  |
/// | `updateBy`   | default from current user when null             |
/// | `updateTime` | always stamped                                  |
/// | `version`    | always reset to 0                               |
/// | `deleted`    | always reset to the not-deleted sentinel        |
/// | `tenantId`   | default when null; blank string normalized to NULL |
///
/// On update only `updateBy` (when null) and `updateTime` (always) change.
pub struct AutoFillInterceptor<S> {
    identity: S,
    clock: fn() -> i64,
}

impl<S: IdentitySource> AutoFillInterceptor<S> {
    /// Interceptor over the given identity seam, stamping wall-clock time.
    pub fn new(identity: S) -> Self {
        Self {
            identity,
            clock: rowstamp_core::now_timestamp,
        }
    }

    /// Interceptor with an explicit clock.
    pub fn with_clock(identity: S, clock: fn() -> i64) -> Self {
        Self { identity, clock }
    }

    /// Run the fill pass over `call`, then hand control to `next` with the
    /// argument list unchanged in shape and count, returning its result
    /// unmodified.
    ///
    /// Fatal fill errors (identity lookup, field access) abort before the
    /// call proceeds.
    pub fn intercept<T, F>(&self, call: &mut WriteCall, next: F) -> Result<T>
    where
        F: FnOnce(&mut WriteCall) -> Result<T>,
    {
        self.fill(call)?;
        next(call)
    }

    /// Classify `call` from its statement descriptor and apply the matching
    /// fill routine to every candidate argument.
    ///
    /// Classification happens exactly once, from the first descriptor found;
    /// arguments ahead of the descriptor are never candidates. A kind other
    /// than insert/update stops processing for the whole call.
    pub fn fill(&self, call: &mut WriteCall) -> Result<()> {
        let mut kind: Option<StatementKind> = None;
        for arg in call.args_mut() {
            match arg {
                Argument::Statement(stmt) => {
                    if kind.is_none() {
                        let k = stmt.kind();
                        tracing::debug!(statement = stmt.id(), kind = ?k, "write call classified");
                        if !k.triggers_fill() {
                            return Ok(());
                        }
                        kind = Some(k);
                    }
                }
                candidate => match kind {
                    Some(StatementKind::Insert) => self.insert_fill(candidate)?,
                    Some(StatementKind::Update) => self.update_fill(candidate)?,
                    _ => {}
                },
            }
        }
        Ok(())
    }

    /// Insert pass for one candidate argument.
    ///
    /// A parameter container declares no audit fields of its own, so insert
    /// statements only fill direct record arguments.
    fn insert_fill(&self, arg: &mut Argument) -> Result<()> {
        let Argument::Record(record) = arg else {
            return Ok(());
        };
        let record = record.as_mut();

        let now = (self.clock)();
        for field in record.audit_fields().iter().copied() {
            match field {
                AuditField::CreateBy => self.default_actor(record, AuditField::CreateBy)?,
                AuditField::CreateTime => {
                    record.set_audit_value(AuditField::CreateTime, Value::Timestamp(now))?;
                }
                AuditField::UpdateBy => self.default_actor(record, AuditField::UpdateBy)?,
                AuditField::UpdateTime => {
                    record.set_audit_value(AuditField::UpdateTime, Value::Timestamp(now))?;
                }
                AuditField::Version => {
                    record.set_audit_value(AuditField::Version, Value::Int(0))?;
                }
                AuditField::Deleted => {
                    record.set_audit_value(AuditField::Deleted, Value::Int(NOT_DELETED))?;
                }
                AuditField::TenantId => self.fill_tenant(record)?,
            }
        }
        Ok(())
    }

    /// Update pass for one candidate argument.
    ///
    /// Parameter containers are unwrapped first; a container that resolves
    /// to nothing is skipped entirely. Only the last-modifier pair changes.
    fn update_fill(&self, arg: &mut Argument) -> Result<()> {
        let record: &mut dyn AuditRecord = match arg {
            Argument::Record(record) => record.as_mut(),
            Argument::Params(params) => match params.resolve_target() {
                Some(record) => record,
                None => return Ok(()),
            },
            Argument::Statement(_) => return Ok(()),
        };

        let now = (self.clock)();
        for field in record.audit_fields().iter().copied() {
            match field {
                AuditField::UpdateBy => self.default_actor(record, AuditField::UpdateBy)?,
                AuditField::UpdateTime => {
                    record.set_audit_value(AuditField::UpdateTime, Value::Timestamp(now))?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Default an actor id field from the current user, but only when the
    /// field is currently null. The identity lookup is skipped otherwise,
    /// so a missing session is not an error for pre-attributed records.
    fn default_actor(&self, record: &mut dyn AuditRecord, field: AuditField) -> Result<()> {
        let needs_default = record.audit_value(field).is_none_or(|v| v.is_null());
        if needs_default {
            let user = self.identity.current_user_id()?;
            record.set_audit_value(field, user)?;
        }
        Ok(())
    }

    /// Tenant policy: null inherits the ambient tenant (which may itself be
    /// null), a blank string is an explicit tenant-less marker and becomes
    /// NULL, anything else is left untouched.
    fn fill_tenant(&self, record: &mut dyn AuditRecord) -> Result<()> {
        match record.audit_value(AuditField::TenantId) {
            Some(current) if current.is_blank_text() => {
                record.set_audit_value(AuditField::TenantId, Value::Null)
            }
            Some(current) if !current.is_null() => Ok(()),
            _ => {
                let tenant = self.identity.current_tenant_id().unwrap_or(Value::Null);
                record.set_audit_value(AuditField::TenantId, tenant)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::{ParamMap, StatementDescriptor, PARAM_ENTITY_KEY, PARAM_FIRST_POSITIONAL_KEY};
    use rowstamp_core::{AuditValue, Error, StaticIdentity};

    const FIXED_NOW: i64 = 1_700_000_000_000_000;

    fn fixed_clock() -> i64 {
        FIXED_NOW
    }

    /// Hand-written mirror of what `#[derive(AuditRecord)]` generates.
    #[derive(Debug, Default, Clone, PartialEq)]
    struct SysRole {
        create_by: Option<String>,
        create_time: Option<i64>,
        update_by: Option<String>,
        update_time: Option<i64>,
        version: i32,
        deleted: i32,
        tenant_id: Option<String>,
        remark: Option<String>,
    }

    impl AuditRecord for SysRole {
        fn audit_fields(&self) -> &'static [AuditField] {
            &[
                AuditField::CreateBy,
                AuditField::CreateTime,
                AuditField::UpdateBy,
                AuditField::UpdateTime,
                AuditField::Version,
                AuditField::Deleted,
                AuditField::TenantId,
            ]
        }

        fn audit_value(&self, field: AuditField) -> Option<Value> {
            match field {
                AuditField::CreateBy => Some(self.create_by.to_audit_value()),
                AuditField::CreateTime => Some(self.create_time.to_audit_value()),
                AuditField::UpdateBy => Some(self.update_by.to_audit_value()),
                AuditField::UpdateTime => Some(self.update_time.to_audit_value()),
                AuditField::Version => Some(self.version.to_audit_value()),
                AuditField::Deleted => Some(self.deleted.to_audit_value()),
                AuditField::TenantId => Some(self.tenant_id.to_audit_value()),
            }
        }

        fn set_audit_value(&mut self, field: AuditField, value: Value) -> Result<()> {
            match field {
                AuditField::CreateBy => self.create_by = AuditValue::from_audit_value(value)?,
                AuditField::CreateTime => self.create_time = AuditValue::from_audit_value(value)?,
                AuditField::UpdateBy => self.update_by = AuditValue::from_audit_value(value)?,
                AuditField::UpdateTime => self.update_time = AuditValue::from_audit_value(value)?,
                AuditField::Version => self.version = AuditValue::from_audit_value(value)?,
                AuditField::Deleted => self.deleted = AuditValue::from_audit_value(value)?,
                AuditField::TenantId => self.tenant_id = AuditValue::from_audit_value(value)?,
            }
            Ok(())
        }
    }

    struct NoSession;

    impl IdentitySource for NoSession {
        fn current_user_id(&self) -> Result<Value> {
            Err(Error::identity("no session bound to this request"))
        }

        fn current_tenant_id(&self) -> Option<Value> {
            None
        }
    }

    fn admin() -> StaticIdentity {
        StaticIdentity::new("admin").with_tenant("t-1")
    }

    fn call_with(kind: StatementKind, role: SysRole) -> WriteCall {
        WriteCall::new(vec![
            Argument::Statement(StatementDescriptor::new("sys_role.write", kind)),
            Argument::Record(Box::new(role)),
        ])
    }

    fn record_at(call: &WriteCall, index: usize) -> &dyn AuditRecord {
        match &call.args()[index] {
            Argument::Record(record) => record.as_ref(),
            other => panic!("expected record argument, got {other:?}"),
        }
    }

    #[test]
    fn insert_defaults_creator_when_null() {
        let interceptor = AutoFillInterceptor::with_clock(admin(), fixed_clock);
        let mut call = call_with(StatementKind::Insert, SysRole::default());

        interceptor.fill(&mut call).unwrap();

        let record = record_at(&call, 1);
        assert_eq!(
            record.audit_value(AuditField::CreateBy),
            Some(Value::Text("admin".to_string()))
        );
        assert_eq!(
            record.audit_value(AuditField::UpdateBy),
            Some(Value::Text("admin".to_string()))
        );
    }

    #[test]
    fn insert_preserves_existing_creator() {
        let interceptor = AutoFillInterceptor::with_clock(admin(), fixed_clock);
        let role = SysRole {
            create_by: Some("importer".to_string()),
            ..SysRole::default()
        };
        let mut call = call_with(StatementKind::Insert, role);

        interceptor.fill(&mut call).unwrap();

        assert_eq!(
            record_at(&call, 1).audit_value(AuditField::CreateBy),
            Some(Value::Text("importer".to_string()))
        );
    }

    #[test]
    fn insert_always_stamps_timestamps_version_and_flag() {
        let interceptor = AutoFillInterceptor::with_clock(admin(), fixed_clock);
        let role = SysRole {
            create_time: Some(1),
            update_time: Some(2),
            version: 9,
            deleted: 1,
            ..SysRole::default()
        };
        let mut call = call_with(StatementKind::Insert, role);

        interceptor.fill(&mut call).unwrap();

        let record = record_at(&call, 1);
        assert_eq!(
            record.audit_value(AuditField::CreateTime),
            Some(Value::BigInt(FIXED_NOW))
        );
        assert_eq!(
            record.audit_value(AuditField::UpdateTime),
            Some(Value::BigInt(FIXED_NOW))
        );
        assert_eq!(record.audit_value(AuditField::Version), Some(Value::Int(0)));
        assert_eq!(
            record.audit_value(AuditField::Deleted),
            Some(Value::Int(NOT_DELETED))
        );
    }

    #[test]
    fn insert_tenant_null_inherits_ambient() {
        let interceptor = AutoFillInterceptor::with_clock(admin(), fixed_clock);
        let mut call = call_with(StatementKind::Insert, SysRole::default());

        interceptor.fill(&mut call).unwrap();

        assert_eq!(
            record_at(&call, 1).audit_value(AuditField::TenantId),
            Some(Value::Text("t-1".to_string()))
        );
    }

    #[test]
    fn insert_tenant_blank_normalizes_to_null() {
        let interceptor = AutoFillInterceptor::with_clock(admin(), fixed_clock);
        let role = SysRole {
            tenant_id: Some("  ".to_string()),
            ..SysRole::default()
        };
        let mut call = call_with(StatementKind::Insert, role);

        interceptor.fill(&mut call).unwrap();

        assert_eq!(
            record_at(&call, 1).audit_value(AuditField::TenantId),
            Some(Value::Null)
        );
    }

    #[test]
    fn insert_tenant_non_blank_untouched() {
        let interceptor = AutoFillInterceptor::with_clock(admin(), fixed_clock);
        let role = SysRole {
            tenant_id: Some("t-other".to_string()),
            ..SysRole::default()
        };
        let mut call = call_with(StatementKind::Insert, role);

        interceptor.fill(&mut call).unwrap();

        assert_eq!(
            record_at(&call, 1).audit_value(AuditField::TenantId),
            Some(Value::Text("t-other".to_string()))
        );
    }

    #[test]
    fn update_touches_only_modifier_pair() {
        let interceptor = AutoFillInterceptor::with_clock(admin(), fixed_clock);
        let role = SysRole {
            create_by: Some("importer".to_string()),
            create_time: Some(1),
            version: 4,
            deleted: 1,
            tenant_id: Some("   ".to_string()),
            ..SysRole::default()
        };
        let mut call = call_with(StatementKind::Update, role);

        interceptor.fill(&mut call).unwrap();

        let record = record_at(&call, 1);
        assert_eq!(
            record.audit_value(AuditField::UpdateBy),
            Some(Value::Text("admin".to_string()))
        );
        assert_eq!(
            record.audit_value(AuditField::UpdateTime),
            Some(Value::BigInt(FIXED_NOW))
        );
        // Everything else, including the blank tenant, stays as it was.
        assert_eq!(
            record.audit_value(AuditField::CreateBy),
            Some(Value::Text("importer".to_string()))
        );
        assert_eq!(record.audit_value(AuditField::CreateTime), Some(Value::BigInt(1)));
        assert_eq!(record.audit_value(AuditField::Version), Some(Value::Int(4)));
        assert_eq!(record.audit_value(AuditField::Deleted), Some(Value::Int(1)));
        assert_eq!(
            record.audit_value(AuditField::TenantId),
            Some(Value::Text("   ".to_string()))
        );
    }

    #[test]
    fn update_unwraps_entity_key() {
        let interceptor = AutoFillInterceptor::with_clock(admin(), fixed_clock);
        let mut params = ParamMap::new();
        params.insert(PARAM_ENTITY_KEY, Box::new(SysRole::default()));
        let mut call = WriteCall::new(vec![
            Argument::Statement(StatementDescriptor::new("sys_role.update", StatementKind::Update)),
            Argument::Params(params),
        ]);

        interceptor.fill(&mut call).unwrap();

        let Argument::Params(params) = &call.args()[1] else {
            panic!("expected params argument");
        };
        let record = params.get(PARAM_ENTITY_KEY).expect("entity entry");
        assert_eq!(
            record.audit_value(AuditField::UpdateBy),
            Some(Value::Text("admin".to_string()))
        );
        assert_eq!(
            record.audit_value(AuditField::UpdateTime),
            Some(Value::BigInt(FIXED_NOW))
        );
    }

    #[test]
    fn update_skips_container_without_target() {
        let interceptor = AutoFillInterceptor::with_clock(admin(), fixed_clock);
        let mut params = ParamMap::new();
        params.insert_null(PARAM_ENTITY_KEY);
        params.insert(PARAM_FIRST_POSITIONAL_KEY, Box::new(SysRole::default()));
        let mut call = WriteCall::new(vec![
            Argument::Statement(StatementDescriptor::new("sys_role.update", StatementKind::Update)),
            Argument::Params(params),
        ]);

        interceptor.fill(&mut call).unwrap();

        let Argument::Params(params) = &call.args()[1] else {
            panic!("expected params argument");
        };
        // The positional record was shadowed by the null entity entry.
        let record = params.get(PARAM_FIRST_POSITIONAL_KEY).expect("positional entry");
        assert_eq!(record.audit_value(AuditField::UpdateBy), Some(Value::Null));
        assert_eq!(record.audit_value(AuditField::UpdateTime), Some(Value::Null));
    }

    #[test]
    fn delete_leaves_everything_untouched() {
        let interceptor = AutoFillInterceptor::with_clock(admin(), fixed_clock);
        let role = SysRole {
            version: 3,
            ..SysRole::default()
        };
        let mut call = call_with(StatementKind::Delete, role);

        interceptor.fill(&mut call).unwrap();

        let record = record_at(&call, 1);
        assert_eq!(record.audit_value(AuditField::CreateBy), Some(Value::Null));
        assert_eq!(record.audit_value(AuditField::CreateTime), Some(Value::Null));
        assert_eq!(record.audit_value(AuditField::Version), Some(Value::Int(3)));
        assert_eq!(record.audit_value(AuditField::TenantId), Some(Value::Null));
    }

    #[test]
    fn arguments_ahead_of_descriptor_are_not_candidates() {
        let interceptor = AutoFillInterceptor::with_clock(admin(), fixed_clock);
        let mut call = WriteCall::new(vec![
            Argument::Record(Box::new(SysRole::default())),
            Argument::Statement(StatementDescriptor::new("sys_role.insert", StatementKind::Insert)),
            Argument::Record(Box::new(SysRole::default())),
        ]);

        interceptor.fill(&mut call).unwrap();

        assert_eq!(
            record_at(&call, 0).audit_value(AuditField::CreateBy),
            Some(Value::Null)
        );
        assert_eq!(
            record_at(&call, 2).audit_value(AuditField::CreateBy),
            Some(Value::Text("admin".to_string()))
        );
    }

    #[test]
    fn missing_session_is_fatal_when_creator_needs_default() {
        let interceptor = AutoFillInterceptor::with_clock(NoSession, fixed_clock);
        let mut call = call_with(StatementKind::Insert, SysRole::default());

        let err = interceptor.fill(&mut call).unwrap_err();
        assert!(matches!(err, Error::Identity(_)));
    }

    #[test]
    fn identity_lookup_is_lazy() {
        // Pre-attributed record: the failing identity source is never asked.
        let interceptor = AutoFillInterceptor::with_clock(NoSession, fixed_clock);
        let role = SysRole {
            create_by: Some("importer".to_string()),
            update_by: Some("importer".to_string()),
            tenant_id: Some("t-9".to_string()),
            ..SysRole::default()
        };
        let mut call = call_with(StatementKind::Insert, role);

        interceptor.fill(&mut call).unwrap();

        assert_eq!(
            record_at(&call, 1).audit_value(AuditField::CreateBy),
            Some(Value::Text("importer".to_string()))
        );
    }

    #[test]
    fn intercept_passes_result_through_unmodified() {
        let interceptor = AutoFillInterceptor::with_clock(admin(), fixed_clock);
        let mut call = call_with(StatementKind::Insert, SysRole::default());

        let rows = interceptor
            .intercept(&mut call, |call| {
                assert_eq!(call.len(), 2);
                Ok(17_u64)
            })
            .unwrap();

        assert_eq!(rows, 17);
        assert_eq!(call.len(), 2);
    }

    #[test]
    fn intercept_aborts_before_next_on_fill_failure() {
        let interceptor = AutoFillInterceptor::with_clock(NoSession, fixed_clock);
        let mut call = call_with(StatementKind::Insert, SysRole::default());

        let mut proceeded = false;
        let result: Result<u64> = interceptor.intercept(&mut call, |_| {
            proceeded = true;
            Ok(0)
        });

        assert!(result.is_err());
        assert!(!proceeded);
    }
}
