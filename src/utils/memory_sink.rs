//! In-memory persistence sink for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::PersistenceSink;
use crate::types::*;

/// In-memory persistence sink for testing and development
///
/// Keeps the latest snapshot per account plus the full notification log,
/// so tests can assert both the final state and the order in which the
/// core reported mutations.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    latest: Arc<RwLock<HashMap<AccountKey, AccountSnapshot>>>,
    log: Arc<RwLock<Vec<AccountSnapshot>>>,
}

impl MemorySink {
    /// Create a new memory sink instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest snapshot recorded for an account, if any
    pub fn latest(&self, key: &AccountKey) -> Option<AccountSnapshot> {
        self.latest.read().unwrap().get(key).cloned()
    }

    /// Every snapshot recorded so far, in notification order
    pub fn log(&self) -> Vec<AccountSnapshot> {
        self.log.read().unwrap().clone()
    }

    /// Clear all recorded snapshots (useful for testing)
    pub fn clear(&self) {
        self.latest.write().unwrap().clear();
        self.log.write().unwrap().clear();
    }
}

#[async_trait]
impl PersistenceSink for MemorySink {
    async fn record_snapshot(&self, snapshot: &AccountSnapshot) -> BankResult<()> {
        self.latest
            .write()
            .unwrap()
            .insert(snapshot.key.clone(), snapshot.clone());
        self.log.write().unwrap().push(snapshot.clone());
        Ok(())
    }
}
