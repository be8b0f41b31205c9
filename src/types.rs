//! Core types and data structures for the banking system

use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Kinds of balance-changing events recorded in an account's history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Money paid into the account
    Deposit,
    /// Money taken out of the account
    Withdrawal,
    /// Monthly interest credited to the account
    Interest,
    /// Money received from another account
    TransferIn,
    /// Money sent to another account
    TransferOut,
}

/// One immutable record of a balance-changing event
///
/// Entries are append-only: once written to an account's history they are
/// never modified or removed, and their order is chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier for the entry
    pub id: Uuid,
    /// What kind of event this entry records
    pub kind: EntryKind,
    /// Amount moved by the event (always positive)
    pub amount: BigDecimal,
    /// Account balance immediately after the event
    pub balance_after: BigDecimal,
    /// When the event happened
    pub timestamp: NaiveDateTime,
}

impl LedgerEntry {
    /// Create a new entry stamped with the current time
    pub fn new(kind: EntryKind, amount: BigDecimal, balance_after: BigDecimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            balance_after,
            timestamp: chrono::Utc::now().naive_utc(),
        }
    }
}

/// A caller-supplied interest period (year + month)
///
/// Interest accrual is idempotent per period: applying interest twice with
/// the same `Period` credits the account only once. The period is always
/// injected by the caller rather than read from the wall clock, so batched
/// accrual across many accounts is deterministic and reproducible in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// Create a period from a year and a month (1-12)
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month), "month must be in 1-12");
        Self { year, month }
    }

    /// The period a given date falls into
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// An opaque PIN secret gating mutate-level access to an account
///
/// The value never appears in `Debug` output or logs; the only observable
/// property of a verification is equal/not-equal.
#[derive(Clone)]
pub struct PinSecret(String);

impl PinSecret {
    /// Wrap a raw PIN string
    pub fn new(pin: impl Into<String>) -> Self {
        Self(pin.into())
    }

    /// Compare a candidate PIN against the secret
    ///
    /// The comparison folds over every byte instead of returning at the
    /// first mismatch, so nothing beyond equal/not-equal is exposed.
    pub fn verify(&self, candidate: &str) -> bool {
        let secret = self.0.as_bytes();
        let candidate = candidate.as_bytes();
        if secret.len() != candidate.len() {
            return false;
        }
        secret
            .iter()
            .zip(candidate)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl fmt::Debug for PinSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PinSecret(****)")
    }
}

/// Canonical identity of an account: (user name, account name)
///
/// The `Ord` derive gives every account a fixed position in a global total
/// order; transfers acquire their two account locks in this order regardless
/// of transfer direction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountKey {
    pub user: String,
    pub account: String,
}

impl AccountKey {
    pub fn new(user: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            account: account.into(),
        }
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user, self.account)
    }
}

/// Reporting row for one account: name, balance, rate, last accrual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Account name
    pub account: String,
    /// Current balance
    pub balance: BigDecimal,
    /// Interest rate in percent
    pub interest_rate_percent: BigDecimal,
    /// Last period interest was applied, if ever
    pub last_interest_period: Option<Period>,
}

/// State handed to the persistence collaborator after a successful mutation
///
/// Carries enough to reconstruct the account's new state: the balance, the
/// interest period, and the history entries the mutation appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Which account was mutated
    pub key: AccountKey,
    /// Balance after the mutation
    pub balance: BigDecimal,
    /// Interest period after the mutation
    pub last_interest_period: Option<Period>,
    /// History entries appended by the mutation
    pub history_tail: Vec<LedgerEntry>,
}

/// Errors that can occur in the banking system
///
/// All errors are recoverable, typed results; a failing operation leaves
/// every account unchanged.
#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Invalid PIN")]
    InvalidPin,
    #[error("User not found: {0}")]
    UserNotFound(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("User already exists: {0}")]
    DuplicateUser(String),
    #[error("Account already exists: {0}")]
    DuplicateAccount(String),
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: BigDecimal,
        available: BigDecimal,
    },
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type for banking operations
pub type BankResult<T> = Result<T, BankError>;
