//! User directory: maps user identity to the accounts they own

use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::bank::account::AccountLedger;
use crate::types::*;
use crate::utils::validation;

/// An account shared between callers; all access goes through its lock
pub type SharedAccount = Arc<Mutex<AccountLedger>>;

/// One user and the accounts they own, keyed by account name
#[derive(Debug, Default)]
pub struct User {
    accounts: HashMap<String, SharedAccount>,
}

/// Registry of all users, enforcing global user-name uniqueness
///
/// The directory resolves `(user, account)` pairs to account handles. It
/// never mutates account state itself; mutations go through the handle's
/// lock, held by the caller.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<String, User>,
}

impl UserDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new user with no accounts
    pub fn create_user(&mut self, name: &str) -> BankResult<()> {
        validation::validate_user_name(name)?;
        if self.users.contains_key(name) {
            return Err(BankError::DuplicateUser(name.to_string()));
        }
        self.users.insert(name.to_string(), User::default());
        Ok(())
    }

    /// Create a new account for an existing user
    pub fn create_account(
        &mut self,
        user: &str,
        account: &str,
        initial_balance: BigDecimal,
        interest_rate_percent: BigDecimal,
        pin: &str,
    ) -> BankResult<AccountKey> {
        validation::validate_account_name(account)?;
        validation::validate_pin(pin)?;
        if initial_balance < BigDecimal::from(0) {
            return Err(BankError::Validation(
                "Initial balance cannot be negative".to_string(),
            ));
        }
        // A negative rate would turn interest accrual into an unchecked
        // debit and could take the balance below zero.
        if interest_rate_percent < BigDecimal::from(0) {
            return Err(BankError::Validation(
                "Interest rate cannot be negative".to_string(),
            ));
        }

        let owner = self
            .users
            .get_mut(user)
            .ok_or_else(|| BankError::UserNotFound(user.to_string()))?;
        if owner.accounts.contains_key(account) {
            return Err(BankError::DuplicateAccount(format!("{}/{}", user, account)));
        }

        let ledger = AccountLedger::new(
            account.to_string(),
            initial_balance,
            interest_rate_percent,
            PinSecret::new(pin),
        );
        owner
            .accounts
            .insert(account.to_string(), Arc::new(Mutex::new(ledger)));
        Ok(AccountKey::new(user, account))
    }

    /// Resolve an account for read-level access (no PIN required)
    pub fn resolve_for_read(&self, user: &str, account: &str) -> BankResult<SharedAccount> {
        let owner = self
            .users
            .get(user)
            .ok_or_else(|| BankError::UserNotFound(user.to_string()))?;
        owner
            .accounts
            .get(account)
            .cloned()
            .ok_or_else(|| BankError::AccountNotFound(format!("{}/{}", user, account)))
    }

    /// Resolve an account for mutate-level access, verifying the PIN
    ///
    /// PINs are fixed at account creation, so verifying here and mutating
    /// later under a fresh lock acquisition cannot race with a PIN change.
    pub async fn resolve_for_mutate(
        &self,
        user: &str,
        account: &str,
        pin: &str,
    ) -> BankResult<SharedAccount> {
        let handle = self.resolve_for_read(user, account)?;
        let verified = handle.lock().await.verify_pin(pin);
        if !verified {
            tracing::warn!(user, account, "PIN verification failed");
            return Err(BankError::InvalidPin);
        }
        Ok(handle)
    }

    /// All account handles of a user, ordered by account name
    pub fn accounts_of(&self, user: &str) -> BankResult<Vec<SharedAccount>> {
        let owner = self
            .users
            .get(user)
            .ok_or_else(|| BankError::UserNotFound(user.to_string()))?;
        let mut named: Vec<(&String, &SharedAccount)> = owner.accounts.iter().collect();
        named.sort_by(|a, b| a.0.cmp(b.0));
        Ok(named.into_iter().map(|(_, handle)| handle.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory_with_account() -> UserDirectory {
        let mut dir = UserDirectory::new();
        dir.create_user("alice").unwrap();
        dir.create_account(
            "alice",
            "savings",
            BigDecimal::from(100),
            BigDecimal::from(10),
            "1234",
        )
        .unwrap();
        dir
    }

    #[test]
    fn duplicate_user_is_rejected() {
        let mut dir = UserDirectory::new();
        dir.create_user("alice").unwrap();
        assert!(matches!(
            dir.create_user("alice"),
            Err(BankError::DuplicateUser(_))
        ));
    }

    #[test]
    fn duplicate_account_is_rejected_per_user() {
        let mut dir = directory_with_account();
        assert!(matches!(
            dir.create_account(
                "alice",
                "savings",
                BigDecimal::from(0),
                BigDecimal::from(0),
                "0000"
            ),
            Err(BankError::DuplicateAccount(_))
        ));

        // Same account name under a different user is fine
        dir.create_user("bob").unwrap();
        dir.create_account(
            "bob",
            "savings",
            BigDecimal::from(0),
            BigDecimal::from(0),
            "0000",
        )
        .unwrap();
    }

    #[test]
    fn account_for_missing_user_is_rejected() {
        let mut dir = UserDirectory::new();
        assert!(matches!(
            dir.create_account(
                "ghost",
                "savings",
                BigDecimal::from(0),
                BigDecimal::from(0),
                "0000"
            ),
            Err(BankError::UserNotFound(_))
        ));
    }

    #[test]
    fn negative_initial_balance_is_rejected() {
        let mut dir = UserDirectory::new();
        dir.create_user("alice").unwrap();
        assert!(matches!(
            dir.create_account(
                "alice",
                "savings",
                BigDecimal::from(-1),
                BigDecimal::from(0),
                "1234"
            ),
            Err(BankError::Validation(_))
        ));
    }

    #[test]
    fn negative_interest_rate_is_rejected() {
        let mut dir = UserDirectory::new();
        dir.create_user("alice").unwrap();
        assert!(matches!(
            dir.create_account(
                "alice",
                "savings",
                BigDecimal::from(100),
                BigDecimal::from(-200),
                "1234"
            ),
            Err(BankError::Validation(_))
        ));
        // A zero rate is a valid degenerate case
        dir.create_account(
            "alice",
            "savings",
            BigDecimal::from(100),
            BigDecimal::from(0),
            "1234",
        )
        .unwrap();
    }

    #[tokio::test]
    async fn resolve_for_mutate_requires_the_right_pin() {
        let dir = directory_with_account();
        assert!(dir.resolve_for_mutate("alice", "savings", "1234").await.is_ok());
        assert!(matches!(
            dir.resolve_for_mutate("alice", "savings", "9999").await,
            Err(BankError::InvalidPin)
        ));
        assert!(matches!(
            dir.resolve_for_mutate("alice", "missing", "1234").await,
            Err(BankError::AccountNotFound(_))
        ));
        assert!(matches!(
            dir.resolve_for_mutate("bob", "savings", "1234").await,
            Err(BankError::UserNotFound(_))
        ));
    }

    #[test]
    fn accounts_are_listed_in_name_order() {
        let mut dir = directory_with_account();
        dir.create_account(
            "alice",
            "checking",
            BigDecimal::from(0),
            BigDecimal::from(0),
            "0000",
        )
        .unwrap();
        let accounts = dir.accounts_of("alice").unwrap();
        assert_eq!(accounts.len(), 2);
    }
}
