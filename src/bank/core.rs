//! Main bank orchestrator coordinating users, accounts, and transfers

use bigdecimal::BigDecimal;
use tokio::sync::RwLock;

use crate::bank::account::AccountLedger;
use crate::bank::directory::UserDirectory;
use crate::traits::PersistenceSink;
use crate::types::*;
use crate::utils::validation;

/// Sole entry point exposed to callers
///
/// Owns the user directory and orchestrates every operation, including the
/// only multi-account operation, `transfer`. Callers may invoke operations
/// concurrently; every mutation holds the exclusive lock of the account(s)
/// it touches, and transfers acquire their two locks in canonical
/// [`AccountKey`] order so no circular wait can form.
///
/// After each successful mutation the persistence sink receives a snapshot
/// of every touched account.
pub struct BankCore<S: PersistenceSink> {
    directory: RwLock<UserDirectory>,
    sink: S,
}

impl<S: PersistenceSink> BankCore<S> {
    /// Create a new bank with the given persistence sink
    pub fn new(sink: S) -> Self {
        Self {
            directory: RwLock::new(UserDirectory::new()),
            sink,
        }
    }

    // User and account lifecycle

    /// Create a new user with no accounts
    pub async fn create_user(&self, name: &str) -> BankResult<()> {
        self.directory.write().await.create_user(name)?;
        tracing::info!(user = name, "user created");
        Ok(())
    }

    /// Create a new account for an existing user
    pub async fn create_account(
        &self,
        user: &str,
        account: &str,
        initial_balance: BigDecimal,
        interest_rate_percent: BigDecimal,
        pin: &str,
    ) -> BankResult<()> {
        let key = self.directory.write().await.create_account(
            user,
            account,
            initial_balance.clone(),
            interest_rate_percent,
            pin,
        )?;
        tracing::info!(account = %key, "account created");
        self.sink
            .record_snapshot(&AccountSnapshot {
                key,
                balance: initial_balance,
                last_interest_period: None,
                history_tail: Vec::new(),
            })
            .await
    }

    // Single-account operations

    /// Deposit money into an account, returning the new balance
    pub async fn deposit(
        &self,
        user: &str,
        account: &str,
        amount: BigDecimal,
    ) -> BankResult<BigDecimal> {
        validation::validate_positive_amount(&amount)?;
        let handle = self.directory.read().await.resolve_for_read(user, account)?;

        let (snapshot, balance) = {
            let mut ledger = handle.lock().await;
            let entry = ledger.deposit(amount)?;
            tracing::debug!(account = %AccountKey::new(user, account), amount = %entry.amount, "deposit");
            (snapshot_of(user, &ledger, vec![entry]), ledger.balance().clone())
        };

        self.sink.record_snapshot(&snapshot).await?;
        Ok(balance)
    }

    /// Withdraw money from an account (PIN required), returning the new balance
    pub async fn withdraw(
        &self,
        user: &str,
        account: &str,
        pin: &str,
        amount: BigDecimal,
    ) -> BankResult<BigDecimal> {
        validation::validate_positive_amount(&amount)?;
        let handle = self
            .directory
            .read()
            .await
            .resolve_for_mutate(user, account, pin)
            .await?;

        let (snapshot, balance) = {
            let mut ledger = handle.lock().await;
            let entry = ledger.withdraw(amount)?;
            tracing::debug!(account = %AccountKey::new(user, account), amount = %entry.amount, "withdrawal");
            (snapshot_of(user, &ledger, vec![entry]), ledger.balance().clone())
        };

        self.sink.record_snapshot(&snapshot).await?;
        Ok(balance)
    }

    /// Apply monthly interest for a caller-supplied period
    ///
    /// Idempotent per period; returns the interest credited, zero when the
    /// period was already applied.
    pub async fn apply_interest(
        &self,
        user: &str,
        account: &str,
        period: Period,
    ) -> BankResult<BigDecimal> {
        let handle = self.directory.read().await.resolve_for_read(user, account)?;

        let applied = {
            let mut ledger = handle.lock().await;
            match ledger.apply_interest(period)? {
                Some(entry) => {
                    tracing::debug!(
                        account = %AccountKey::new(user, account),
                        %period,
                        interest = %entry.amount,
                        "interest applied"
                    );
                    let interest = entry.amount.clone();
                    Some((snapshot_of(user, &ledger, vec![entry]), interest))
                }
                None => None,
            }
        };

        match applied {
            Some((snapshot, interest)) => {
                self.sink.record_snapshot(&snapshot).await?;
                Ok(interest)
            }
            None => Ok(BigDecimal::from(0)),
        }
    }

    // Transfer orchestration

    /// Move money between two accounts atomically
    ///
    /// Only the source (debited) account is authenticated; the destination
    /// is resolved without a PIN. Both account locks are acquired in the
    /// canonical [`AccountKey`] order, never in argument order, so two
    /// opposite-direction transfers between the same pair cannot deadlock.
    /// The funds check is repeated under the lock; the two mutations happen
    /// in a single critical section and are observed together or not at all.
    pub async fn transfer(
        &self,
        src_user: &str,
        src_account: &str,
        src_pin: &str,
        dst_user: &str,
        dst_account: &str,
        amount: BigDecimal,
    ) -> BankResult<()> {
        validation::validate_positive_amount(&amount)?;

        let src_key = AccountKey::new(src_user, src_account);
        let dst_key = AccountKey::new(dst_user, dst_account);
        if src_key == dst_key {
            return Err(BankError::Validation(
                "Cannot transfer to the same account".to_string(),
            ));
        }

        let (src, dst) = {
            let directory = self.directory.read().await;
            let src = directory
                .resolve_for_mutate(src_user, src_account, src_pin)
                .await?;
            let dst = directory.resolve_for_read(dst_user, dst_account)?;
            (src, dst)
        };

        let (src_snapshot, dst_snapshot) = {
            // Lock acquisition follows the global key order, not call order.
            let (mut src_ledger, mut dst_ledger) = if src_key < dst_key {
                let s = src.lock().await;
                let d = dst.lock().await;
                (s, d)
            } else {
                let d = dst.lock().await;
                let s = src.lock().await;
                (s, d)
            };

            let out_entry = src_ledger.debit(EntryKind::TransferOut, amount.clone())?;
            let in_entry = dst_ledger.credit(EntryKind::TransferIn, amount.clone())?;
            tracing::debug!(from = %src_key, to = %dst_key, amount = %amount, "transfer");

            (
                snapshot_of(src_user, &src_ledger, vec![out_entry]),
                snapshot_of(dst_user, &dst_ledger, vec![in_entry]),
            )
        };

        self.sink.record_snapshot(&src_snapshot).await?;
        self.sink.record_snapshot(&dst_snapshot).await?;
        Ok(())
    }

    // Read operations

    /// Current balance of an account (no PIN required)
    pub async fn get_balance(&self, user: &str, account: &str) -> BankResult<BigDecimal> {
        let handle = self.directory.read().await.resolve_for_read(user, account)?;
        let ledger = handle.lock().await;
        Ok(ledger.balance().clone())
    }

    /// Full transaction history of an account (PIN required)
    pub async fn get_history(
        &self,
        user: &str,
        account: &str,
        pin: &str,
    ) -> BankResult<Vec<LedgerEntry>> {
        let handle = self
            .directory
            .read()
            .await
            .resolve_for_mutate(user, account, pin)
            .await?;
        let ledger = handle.lock().await;
        Ok(ledger.history().to_vec())
    }

    /// Summaries of all accounts of a user, ordered by account name
    pub async fn list_accounts_summary(&self, user: &str) -> BankResult<Vec<AccountSummary>> {
        let handles = self.directory.read().await.accounts_of(user)?;
        let mut summaries = Vec::with_capacity(handles.len());
        for handle in handles {
            summaries.push(handle.lock().await.summary());
        }
        Ok(summaries)
    }
}

fn snapshot_of(user: &str, ledger: &AccountLedger, tail: Vec<LedgerEntry>) -> AccountSnapshot {
    AccountSnapshot {
        key: AccountKey::new(user, ledger.name()),
        balance: ledger.balance().clone(),
        last_interest_period: ledger.last_interest_period(),
        history_tail: tail,
    }
}
