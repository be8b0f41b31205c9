//! # Bank Core
//!
//! A multi-user, multi-account banking ledger library with PIN-gated
//! operations, atomic inter-account transfers, and monthly interest accrual.
//!
//! ## Features
//!
//! - **Multi-user accounts**: users own named accounts, with global user-name
//!   uniqueness and per-user account-name uniqueness
//! - **Append-only history**: every balance change records an immutable,
//!   chronologically ordered ledger entry
//! - **PIN authorization**: withdrawals, transfers, and history inspection
//!   require the account PIN; the boundary holds even on partial failure
//! - **Atomic transfers**: both sides of a transfer are observed together or
//!   not at all, with deadlock-free canonical lock ordering
//! - **Deterministic interest**: accrual is idempotent per caller-supplied
//!   period, so batched application is reproducible in tests
//! - **Persistence abstraction**: a trait-based sink is notified after each
//!   successful mutation with enough state to rebuild the account
//!
//! ## Quick Start
//!
//! ```rust
//! use bank_core::{BankCore, NullSink, Period};
//! use bigdecimal::BigDecimal;
//!
//! # async fn demo() -> bank_core::BankResult<()> {
//! let bank = BankCore::new(NullSink);
//! bank.create_user("alice").await?;
//! bank.create_account("alice", "savings", BigDecimal::from(100), BigDecimal::from(10), "1234")
//!     .await?;
//! bank.deposit("alice", "savings", BigDecimal::from(50)).await?;
//! bank.apply_interest("alice", "savings", Period::new(2025, 6)).await?;
//! # Ok(())
//! # }
//! ```

pub mod bank;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use bank::*;
pub use traits::*;
pub use types::*;
