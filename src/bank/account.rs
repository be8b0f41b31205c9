//! Single-account ledger: balance, interest state, and append-only history

use bigdecimal::BigDecimal;

use crate::types::*;
use crate::utils::validation::validate_positive_amount;

/// One account's balance, interest state, and transaction history
///
/// All single-account mutations happen here. Every mutation either fully
/// succeeds (balance updated, history appended) or fully fails with the
/// account untouched; the balance never goes negative.
#[derive(Debug)]
pub struct AccountLedger {
    name: String,
    balance: BigDecimal,
    interest_rate_percent: BigDecimal,
    pin: PinSecret,
    history: Vec<LedgerEntry>,
    last_interest_period: Option<Period>,
}

impl AccountLedger {
    /// Create a new account with an initial balance, rate, and PIN
    pub fn new(
        name: String,
        initial_balance: BigDecimal,
        interest_rate_percent: BigDecimal,
        pin: PinSecret,
    ) -> Self {
        Self {
            name,
            balance: initial_balance,
            interest_rate_percent,
            pin,
            history: Vec::new(),
            last_interest_period: None,
        }
    }

    /// Account name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current balance
    pub fn balance(&self) -> &BigDecimal {
        &self.balance
    }

    /// Interest rate in percent
    pub fn interest_rate_percent(&self) -> &BigDecimal {
        &self.interest_rate_percent
    }

    /// Last period interest was applied, if ever
    pub fn last_interest_period(&self) -> Option<Period> {
        self.last_interest_period
    }

    /// Full transaction history, oldest first
    pub fn history(&self) -> &[LedgerEntry] {
        &self.history
    }

    /// Check a candidate PIN against the account's secret
    ///
    /// Pure read; never mutates state.
    pub fn verify_pin(&self, candidate: &str) -> bool {
        self.pin.verify(candidate)
    }

    /// Pay money into the account
    pub fn deposit(&mut self, amount: BigDecimal) -> BankResult<LedgerEntry> {
        self.credit(EntryKind::Deposit, amount)
    }

    /// Take money out of the account
    ///
    /// Fails with `InsufficientFunds` if the balance does not cover the
    /// amount, leaving the account unchanged.
    pub fn withdraw(&mut self, amount: BigDecimal) -> BankResult<LedgerEntry> {
        self.debit(EntryKind::Withdrawal, amount)
    }

    /// Apply monthly interest for the given period
    ///
    /// Idempotent per period: if interest was already applied for `period`
    /// this is a no-op returning `None`. Otherwise the credited interest is
    /// `balance * rate / 100`, the period marker advances, and the appended
    /// entry is returned.
    pub fn apply_interest(&mut self, period: Period) -> BankResult<Option<LedgerEntry>> {
        if self.last_interest_period == Some(period) {
            return Ok(None);
        }

        let interest = (&self.balance * &self.interest_rate_percent) / BigDecimal::from(100);
        self.balance += &interest;
        self.last_interest_period = Some(period);
        Ok(Some(self.append(EntryKind::Interest, interest)))
    }

    /// Increase the balance and append a history entry
    pub(crate) fn credit(&mut self, kind: EntryKind, amount: BigDecimal) -> BankResult<LedgerEntry> {
        validate_positive_amount(&amount)?;
        self.balance += &amount;
        Ok(self.append(kind, amount))
    }

    /// Decrease the balance and append a history entry
    ///
    /// The funds check happens under the same borrow as the mutation, so a
    /// failed debit observably changes nothing.
    pub(crate) fn debit(&mut self, kind: EntryKind, amount: BigDecimal) -> BankResult<LedgerEntry> {
        validate_positive_amount(&amount)?;
        if self.balance < amount {
            return Err(BankError::InsufficientFunds {
                requested: amount,
                available: self.balance.clone(),
            });
        }
        self.balance -= &amount;
        Ok(self.append(kind, amount))
    }

    fn append(&mut self, kind: EntryKind, amount: BigDecimal) -> LedgerEntry {
        let entry = LedgerEntry::new(kind, amount, self.balance.clone());
        self.history.push(entry.clone());
        entry
    }

    /// Reporting row for this account
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            account: self.name.clone(),
            balance: self.balance.clone(),
            interest_rate_percent: self.interest_rate_percent.clone(),
            last_interest_period: self.last_interest_period,
        }
    }
}
