//! Shared application state passed to request handlers.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{Error, store::TransactionStore};

/// The state shared by every request handler.
///
/// Cloning is cheap, all clones share one underlying store. The store sits
/// behind a reader-writer lock: listing and aggregation handlers take the
/// read lock concurrently while the delete handler takes the write lock.
#[derive(Debug, Clone)]
pub struct AppState {
    store: Arc<RwLock<TransactionStore>>,
}

impl AppState {
    /// Wrap an already-loaded store for sharing across handlers.
    pub fn new(store: TransactionStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Acquire shared read access to the store.
    pub fn read_store(&self) -> Result<RwLockReadGuard<'_, TransactionStore>, Error> {
        self.store.read().map_err(|_| Error::StoreLock)
    }

    /// Acquire exclusive write access to the store.
    pub fn write_store(&self) -> Result<RwLockWriteGuard<'_, TransactionStore>, Error> {
        self.store.write().map_err(|_| Error::StoreLock)
    }
}
