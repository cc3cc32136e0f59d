//! Dialect strategy registry for schema synchronization.
//!
//! `rowstamp-sync` sits between the schema-synchronization driver and the
//! dialect-specific handlers. Handlers implement [`SyncStrategy`] and are
//! registered once at startup under the dialect key they report about
//! themselves; thereafter every table/column change request is routed to the
//! matching handler, or silently dropped when no handler claims its dialect.
//!
//! Strategy internals (the SQL they emit, the connections they hold) are the
//! handlers' own business and live outside this crate.

pub mod model;
pub mod registry;
pub mod strategy;

pub use model::{ColumnModel, TableAndColumnModel};
pub use registry::StrategyRegistry;
pub use strategy::SyncStrategy;
