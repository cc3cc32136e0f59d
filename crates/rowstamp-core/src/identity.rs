//! Seam to the authentication collaborator.
//!
//! The surrounding platform owns session state; this crate only consumes it.
//! The interceptor performs lookups lazily, so a missing session is only an
//! error when a creator/modifier id actually needs defaulting.

use crate::error::Result;
use crate::value::Value;

/// Ambient per-request identity, supplied by the authentication filter.
pub trait IdentitySource: Send + Sync {
    /// Identifier of the currently authenticated user.
    ///
    /// Fails when no session is bound to the current request; that failure
    /// is fatal to any write call that needed the id.
    fn current_user_id(&self) -> Result<Value>;

    /// Tenant identifier of the current request, or `None` for tenant-less
    /// contexts (platform administrators, background jobs).
    fn current_tenant_id(&self) -> Option<Value>;
}

/// A fixed identity, for single-tenant deployments and tests.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    user_id: Value,
    tenant_id: Option<Value>,
}

impl StaticIdentity {
    /// Identity with a user id and no tenant.
    pub fn new(user_id: impl Into<Value>) -> Self {
        Self {
            user_id: user_id.into(),
            tenant_id: None,
        }
    }

    /// Attach a tenant id.
    pub fn with_tenant(mut self, tenant_id: impl Into<Value>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }
}

impl IdentitySource for StaticIdentity {
    fn current_user_id(&self) -> Result<Value> {
        Ok(self.user_id.clone())
    }

    fn current_tenant_id(&self) -> Option<Value> {
        self.tenant_id.clone()
    }
}
