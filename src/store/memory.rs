//! # In-Memory Store
//!
//! The embedded document engine and the process-wide `Store` handle.
//! Connected once at bootstrap; safe for concurrent use by many in-flight
//! requests. The engine also carries two verification hooks used by tests:
//! an operation counter and an injectable failure switch.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::collection::Collection;
use super::errors::{StoreError, StoreResult};

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Logical database name (default: "filmstore")
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_database() -> String {
    "filmstore".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
        }
    }
}

/// Shared engine state: collection name -> documents in insertion order
#[derive(Debug, Default)]
pub(crate) struct Engine {
    pub(crate) collections: RwLock<HashMap<String, Vec<Value>>>,
    /// Operations performed across all collections
    ops: AtomicU64,
    /// When set, every operation fails
    failing: AtomicBool,
}

impl Engine {
    /// Count the operation and honor the injected-failure switch
    pub(crate) fn begin_op(&self) -> StoreResult<()> {
        self.ops.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Operation("injected failure".to_string()));
        }
        Ok(())
    }
}

/// Process-wide store handle
///
/// Cheap to clone; all clones share the same engine.
#[derive(Debug, Clone)]
pub struct Store {
    engine: Arc<Engine>,
    database: String,
}

impl Store {
    /// Establish the store connection
    ///
    /// Called once during bootstrap. The HTTP listener must not start unless
    /// this succeeds.
    pub async fn connect(config: StoreConfig) -> StoreResult<Store> {
        if config.database.trim().is_empty() {
            return Err(StoreError::Connect("empty database name".to_string()));
        }
        Ok(Store {
            engine: Arc::new(Engine::default()),
            database: config.database,
        })
    }

    /// The logical database name
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Handle to a named collection
    pub fn collection(&self, name: &str) -> Collection {
        Collection::new(Arc::clone(&self.engine), name)
    }

    /// Number of operations performed through this store
    pub fn op_count(&self) -> u64 {
        self.engine.ops.load(Ordering::SeqCst)
    }

    /// Force every subsequent operation to fail
    pub fn fail_operations(&self, failing: bool) {
        self.engine.failing.store(failing, Ordering::SeqCst);
    }
}
