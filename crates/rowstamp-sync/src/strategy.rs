//! The sync-strategy capability.

use rowstamp_core::Result;

use crate::model::TableAndColumnModel;

/// A dialect-specific handler for applying schema-synchronization changes.
///
/// A strategy handles exactly one dialect and reports that key about itself;
/// the registry never guesses. Instances are built once at startup by the
/// surrounding component registry, registered, and held for the process
/// lifetime; implementations must therefore be `Send + Sync` and must not
/// rely on registration-time mutation.
pub trait SyncStrategy: Send + Sync {
    /// The dialect key this strategy handles (e.g. `mysql`).
    fn dialect(&self) -> &'static str;

    /// Apply one table/column change.
    ///
    /// Failures here are the strategy's own and propagate unchanged to the
    /// dispatch caller; the registry neither catches nor retries.
    fn execute(&self, model: &TableAndColumnModel) -> Result<()>;
}
