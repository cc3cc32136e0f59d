//! Key-based strategy dispatch.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use rowstamp_core::Result;

use crate::model::TableAndColumnModel;
use crate::strategy::SyncStrategy;

/// Maps dialect keys to their registered strategies.
///
/// Populated once during startup through explicit registration (each
/// strategy is handed in ready-built, so non-instantiable handlers cannot
/// enter the map by construction), then read-only for the process lifetime.
/// The map is lock-guarded because a slow startup sequence can overlap
/// registration with the first lookups; after startup all access is
/// concurrent reads.
#[derive(Default)]
pub struct StrategyRegistry {
    handlers: RwLock<HashMap<String, Arc<dyn SyncStrategy>>>,
}

impl StrategyRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `strategy` under the dialect key it reports.
    ///
    /// A duplicate key keeps the later registration and drops the earlier
    /// one; this is logged loudly since it usually means two handlers claim
    /// the same dialect.
    pub fn register(&self, strategy: Arc<dyn SyncStrategy>) {
        let key = strategy.dialect();
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = handlers.insert(key.to_string(), strategy) {
            tracing::warn!(
                dialect = key,
                replaced = previous.dialect(),
                "duplicate sync strategy registration, last one wins"
            );
        }
    }

    /// Register every strategy in `strategies`, in order.
    pub fn register_all<I>(&self, strategies: I)
    where
        I: IntoIterator<Item = Arc<dyn SyncStrategy>>,
    {
        for strategy in strategies {
            self.register(strategy);
        }
    }

    /// Whether a handler is registered for `dialect`.
    #[must_use]
    pub fn contains(&self, dialect: &str) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(dialect)
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatch one change model to its dialect's handler.
    ///
    /// `None` and unregistered dialects are expected, non-exceptional
    /// outcomes and no-op silently. A found handler's failure propagates
    /// unchanged.
    pub fn execute(&self, model: Option<&TableAndColumnModel>) -> Result<()> {
        let Some(model) = model else {
            return Ok(());
        };

        // Clone the Arc out so the strategy runs without holding the lock.
        let handler = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(model.dialect())
            .cloned();

        match handler {
            Some(strategy) => strategy.execute(model),
            None => {
                tracing::trace!(dialect = model.dialect(), "no sync strategy registered");
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<String> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort_unstable();
        f.debug_struct("StrategyRegistry").field("dialects", &keys).finish()
    }
}
