//! The in-flight write call and its argument shapes.

use std::collections::HashMap;
use std::fmt;

use rowstamp_core::AuditRecord;

/// Key under which a named-parameter container holds the wrapped entity.
pub const PARAM_ENTITY_KEY: &str = "et";

/// Key under which a named-parameter container holds the first positional
/// parameter.
pub const PARAM_FIRST_POSITIONAL_KEY: &str = "param1";

/// Operation kind carried by a statement descriptor.
///
/// Only `Insert` and `Update` trigger field injection; every other kind
/// suppresses it for the whole call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Insert,
    Update,
    Delete,
    Select,
    Flush,
    Unknown,
}

impl StatementKind {
    /// Whether this kind is subject to audit field injection.
    #[must_use]
    pub const fn triggers_fill(&self) -> bool {
        matches!(self, StatementKind::Insert | StatementKind::Update)
    }
}

/// Metadata identifying one mapped statement and its operation kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementDescriptor {
    id: String,
    kind: StatementKind,
}

impl StatementDescriptor {
    /// Descriptor for the statement `id` with the given kind.
    pub fn new(id: impl Into<String>, kind: StatementKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// The mapped statement id (e.g. `sys_user.insert`).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The operation kind.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }
}

/// A named-parameter container wrapping the real entity.
///
/// The data-access runtime hands update statements a parameter map instead
/// of the entity itself; the entity hides under [`PARAM_ENTITY_KEY`] or
/// [`PARAM_FIRST_POSITIONAL_KEY`]. An entry can be present but null.
#[derive(Default)]
pub struct ParamMap {
    entries: HashMap<String, Option<Box<dyn AuditRecord>>>,
}

impl ParamMap {
    /// Empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record under `key`.
    pub fn insert(&mut self, key: impl Into<String>, record: Box<dyn AuditRecord>) {
        self.entries.insert(key.into(), Some(record));
    }

    /// Store an explicit null under `key`.
    pub fn insert_null(&mut self, key: impl Into<String>) {
        self.entries.insert(key.into(), None);
    }

    /// Whether `key` has an entry (null or not).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the container is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow the record stored under `key`, if present and non-null.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&dyn AuditRecord> {
        match self.entries.get(key) {
            Some(Some(record)) => Some(record.as_ref()),
            _ => None,
        }
    }

    /// Resolve the wrapped entity for fill purposes.
    ///
    /// Prefers the entry under [`PARAM_ENTITY_KEY`] when that key exists,
    /// even if its value is null; otherwise falls back to
    /// [`PARAM_FIRST_POSITIONAL_KEY`]. Returns `None` when the chosen entry
    /// is absent or null.
    pub fn resolve_target(&mut self) -> Option<&mut dyn AuditRecord> {
        let slot = if self.entries.contains_key(PARAM_ENTITY_KEY) {
            self.entries.get_mut(PARAM_ENTITY_KEY)
        } else {
            self.entries.get_mut(PARAM_FIRST_POSITIONAL_KEY)
        };
        match slot {
            Some(Some(record)) => Some(record.as_mut()),
            _ => None,
        }
    }
}

impl fmt::Debug for ParamMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("ParamMap").field("keys", &keys).finish()
    }
}

/// One element of a write call's ordered argument list.
pub enum Argument {
    /// The statement descriptor carrying the operation kind.
    Statement(StatementDescriptor),
    /// An entity-shaped parameter object.
    Record(Box<dyn AuditRecord>),
    /// A named-parameter container that may wrap the real entity.
    Params(ParamMap),
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Statement(stmt) => f.debug_tuple("Statement").field(stmt).finish(),
            Argument::Record(_) => f.write_str("Record(..)"),
            Argument::Params(params) => f.debug_tuple("Params").field(params).finish(),
        }
    }
}

/// A single invocation of the data-access runtime's write path.
///
/// Owned by the caller. The interceptor mutates recognized fields of record
/// arguments in place; it never adds, removes, or replaces arguments.
#[derive(Debug, Default)]
pub struct WriteCall {
    args: Vec<Argument>,
}

impl WriteCall {
    /// A call over the given ordered argument list.
    #[must_use]
    pub fn new(args: Vec<Argument>) -> Self {
        Self { args }
    }

    /// The argument list.
    #[must_use]
    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    /// Mutable access to the arguments. Returned as a slice so the list's
    /// shape and count cannot change under the interceptor.
    pub fn args_mut(&mut self) -> &mut [Argument] {
        &mut self.args
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Whether the call carries no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// The first statement descriptor in the argument list, if any.
    #[must_use]
    pub fn statement(&self) -> Option<&StatementDescriptor> {
        self.args.iter().find_map(|arg| match arg {
            Argument::Statement(stmt) => Some(stmt),
            _ => None,
        })
    }
}
