//! Validation utilities

use crate::types::*;
use bigdecimal::BigDecimal;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal) -> BankResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(BankError::Validation(
            "Amount must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that a user name is valid
pub fn validate_user_name(name: &str) -> BankResult<()> {
    validate_name(name, "User name")
}

/// Validate that an account name is valid
pub fn validate_account_name(name: &str) -> BankResult<()> {
    validate_name(name, "Account name")
}

fn validate_name(name: &str, what: &str) -> BankResult<()> {
    if name.trim().is_empty() {
        return Err(BankError::Validation(format!("{} cannot be empty", what)));
    }

    if name.len() > 100 {
        return Err(BankError::Validation(format!(
            "{} cannot exceed 100 characters",
            what
        )));
    }

    // The name is half of an account key; a separator inside it would make
    // keys ambiguous.
    if name.contains('/') {
        return Err(BankError::Validation(format!(
            "{} cannot contain '/'",
            what
        )));
    }

    Ok(())
}

/// Validate that a PIN is acceptable
pub fn validate_pin(pin: &str) -> BankResult<()> {
    if pin.is_empty() {
        return Err(BankError::Validation("PIN cannot be empty".to_string()));
    }

    if pin.len() > 32 {
        return Err(BankError::Validation(
            "PIN cannot exceed 32 characters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_must_be_strictly_positive() {
        assert!(validate_positive_amount(&BigDecimal::from(1)).is_ok());
        assert!(validate_positive_amount(&BigDecimal::from(0)).is_err());
        assert!(validate_positive_amount(&BigDecimal::from(-3)).is_err());
    }

    #[test]
    fn names_reject_empty_and_separator() {
        assert!(validate_user_name("alice").is_ok());
        assert!(validate_user_name("").is_err());
        assert!(validate_user_name("   ").is_err());
        assert!(validate_account_name("sav/ings").is_err());
        assert!(validate_account_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn pins_reject_empty() {
        assert!(validate_pin("1234").is_ok());
        assert!(validate_pin("").is_err());
        assert!(validate_pin(&"9".repeat(33)).is_err());
    }
}
