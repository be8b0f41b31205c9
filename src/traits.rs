//! Traits for persistence abstraction and extensibility

use async_trait::async_trait;

use crate::types::*;

/// Persistence collaborator invoked after each successful mutation
///
/// The core notifies the sink with a snapshot of every account a mutation
/// touched (both sides of a transfer), carrying enough to reconstruct the
/// account's new state. The storage format and durability guarantees are
/// the implementor's concern; the core only requires that a failure is
/// reported as a `BankError::Persistence` value.
#[async_trait]
pub trait PersistenceSink: Send + Sync {
    /// Record the post-mutation state of one account
    async fn record_snapshot(&self, snapshot: &AccountSnapshot) -> BankResult<()>;
}

/// Sink that discards every snapshot
///
/// Useful when no durable storage is attached, and as the default for
/// examples and tests that only exercise in-memory behavior.
#[derive(Debug, Clone, Default)]
pub struct NullSink;

#[async_trait]
impl PersistenceSink for NullSink {
    async fn record_snapshot(&self, _snapshot: &AccountSnapshot) -> BankResult<()> {
        Ok(())
    }
}
