//! The `Bank` ledger: a registry of accounts and the aggregate operations
//! that span them (transfers, the monthly interest batch, reporting).
use std::collections::HashMap;

use thiserror::Error;

use crate::bank::{
    account::{Account, AccountError},
    report::ReportRow,
    types::{AccountNumber, Money},
};

/// The registry of accounts, keyed by account number.
pub struct Bank {
    accounts: HashMap<AccountNumber, Account>,
}

impl Bank {
    /// Creates a bank with no registered accounts.
    pub fn new() -> Self {
        Bank {
            accounts: HashMap::new(),
        }
    }

    /// Registers an account and returns its number.
    /// Fails without replacing the existing entry if the number is taken.
    pub fn open_account(&mut self, account: Account) -> Result<AccountNumber, BankError> {
        let number = account.number().to_string();
        if self.accounts.contains_key(&number) {
            return Err(BankError::DuplicateAccount(number));
        }
        self.accounts.insert(number.clone(), account);
        Ok(number)
    }

    /// Looks up an account by number. Absence is a valid outcome, not an error.
    pub fn find_account(&self, number: &str) -> Option<&Account> {
        self.accounts.get(number)
    }

    /// Looks up an account for mutation, e.g. to deposit or withdraw on it.
    pub fn find_account_mut(&mut self, number: &str) -> Option<&mut Account> {
        self.accounts.get_mut(number)
    }

    /// Moves the amount from one account to another.
    /// Both legs are validated before either balance changes, so a refused
    /// transfer leaves both accounts and their logs untouched. A transfer out
    /// of a checking account may still incur its overdraft fee.
    pub fn transfer(&mut self, from: &str, to: &str, amount: Money) -> Result<(), BankError> {
        if amount <= 0 {
            return Err(BankError::NonPositiveTransferAmount);
        }
        if from == to {
            return Err(BankError::SameAccountTransfer);
        }
        let source = self
            .accounts
            .get(from)
            .ok_or_else(|| BankError::AccountNotFound(from.to_string()))?;
        let destination = self
            .accounts
            .get(to)
            .ok_or_else(|| BankError::AccountNotFound(to.to_string()))?;
        source.check_withdrawal(amount)?;
        destination.check_deposit(amount)?;

        let reason_out = format!("Transfer out to {to}");
        let reason_in = format!("Transfer in from {from}");
        if let Some(source) = self.accounts.get_mut(from) {
            source.withdraw_with_reason(amount, &reason_out)?;
        }
        if let Some(destination) = self.accounts.get_mut(to) {
            destination.deposit_with_reason(amount, &reason_in)?;
        }
        Ok(())
    }

    /// Runs the monthly cycle: credits interest on every interest-bearing
    /// account and resets every savings withdrawal counter. Interest is
    /// computed on the balance before the counter reset.
    pub fn month_end(&mut self) {
        for account in self.accounts.values_mut() {
            account.apply_interest();
            account.reset_monthly_counters();
        }
    }

    /// Produces one row per registered account, sorted by account number.
    pub fn generate_report(&self) -> Vec<ReportRow> {
        let mut rows: Vec<ReportRow> = self.accounts.values().map(ReportRow::from).collect();
        rows.sort_by(|a, b| a.account_number.cmp(&b.account_number));
        rows
    }
}

/// Errors that can occur during ledger-level operations.
#[derive(Error, Debug)]
pub enum BankError {
    #[error("account number {0} is already registered")]
    DuplicateAccount(AccountNumber),
    #[error("account {0} does not exist")]
    AccountNotFound(AccountNumber),
    #[error("transfer amount must be positive")]
    NonPositiveTransferAmount,
    #[error("source and destination accounts are the same")]
    SameAccountTransfer,
    #[error(transparent)]
    Account(#[from] AccountError),
}

#[cfg(test)]
mod tests {
    use crate::bank::{Account, AccountError, AccountKind, Bank, BankError};

    fn bank_with(accounts: Vec<Account>) -> Bank {
        let mut bank = Bank::new();
        for account in accounts {
            bank.open_account(account).unwrap();
        }
        bank
    }

    #[test]
    fn test_duplicate_account_number_keeps_original() {
        let mut bank = Bank::new();
        bank.open_account(Account::open(AccountKind::Checking, "C-1", "Alice", 100_00).unwrap())
            .unwrap();

        let result = bank
            .open_account(Account::open(AccountKind::Checking, "C-1", "Bob", 999_00).unwrap());
        assert!(matches!(result, Err(BankError::DuplicateAccount(_))));

        let original = bank.find_account("C-1").unwrap();
        assert_eq!(original.holder(), "Alice");
        assert_eq!(original.balance(), 100_00);
    }

    #[test]
    fn test_find_missing_account() {
        let bank = Bank::new();
        assert!(bank.find_account("C-404").is_none());
    }

    #[test]
    fn test_transfer_moves_funds_and_records_both_legs() {
        let mut bank = bank_with(vec![
            Account::open(AccountKind::Checking, "C-1", "Alice", 1_000_00).unwrap(),
            Account::open(AccountKind::Student, "T-1", "Bob", 100_00).unwrap(),
        ]);

        bank.transfer("C-1", "T-1", 500_00).unwrap();

        let source = bank.find_account("C-1").unwrap();
        assert_eq!(source.balance(), 500_00);
        assert_eq!(source.transactions().len(), 1);
        assert_eq!(source.transactions()[0].reason(), "Transfer out to T-1");

        let destination = bank.find_account("T-1").unwrap();
        assert_eq!(destination.balance(), 600_00);
        assert_eq!(destination.transactions().len(), 1);
        assert_eq!(
            destination.transactions()[0].reason(),
            "Transfer in from C-1"
        );
    }

    #[test]
    fn test_transfer_with_insufficient_funds_mutates_nothing() {
        let mut bank = bank_with(vec![
            Account::open(AccountKind::Premium, "P-1", "Alice", 10_000_00).unwrap(),
            Account::open(AccountKind::Checking, "C-1", "Bob", 0).unwrap(),
        ]);

        let result = bank.transfer("P-1", "C-1", 10_000_01);
        assert!(matches!(
            result,
            Err(BankError::Account(AccountError::InsufficientFunds))
        ));

        assert_eq!(bank.find_account("P-1").unwrap().balance(), 10_000_00);
        assert_eq!(bank.find_account("C-1").unwrap().balance(), 0);
        assert!(bank.find_account("P-1").unwrap().transactions().is_empty());
        assert!(bank.find_account("C-1").unwrap().transactions().is_empty());
    }

    #[test]
    fn test_transfer_blocked_by_destination_cap_leaves_source_untouched() {
        let mut bank = bank_with(vec![
            Account::open(AccountKind::Checking, "C-1", "Alice", 10_000_00).unwrap(),
            Account::open(AccountKind::Student, "T-1", "Bob", 4_000_00).unwrap(),
        ]);

        let result = bank.transfer("C-1", "T-1", 1_500_00);
        assert!(matches!(
            result,
            Err(BankError::Account(AccountError::BalanceCapExceeded { .. }))
        ));

        assert_eq!(bank.find_account("C-1").unwrap().balance(), 10_000_00);
        assert!(bank.find_account("C-1").unwrap().transactions().is_empty());
        assert_eq!(bank.find_account("T-1").unwrap().balance(), 4_000_00);
    }

    #[test]
    fn test_transfer_validation() {
        let mut bank = bank_with(vec![
            Account::open(AccountKind::Checking, "C-1", "Alice", 100_00).unwrap(),
        ]);

        assert!(matches!(
            bank.transfer("C-1", "C-404", 50_00),
            Err(BankError::AccountNotFound(_))
        ));
        assert!(matches!(
            bank.transfer("C-404", "C-1", 50_00),
            Err(BankError::AccountNotFound(_))
        ));
        assert!(matches!(
            bank.transfer("C-1", "C-1", 50_00),
            Err(BankError::SameAccountTransfer)
        ));
        assert!(matches!(
            bank.transfer("C-1", "C-404", 0),
            Err(BankError::NonPositiveTransferAmount)
        ));
        assert_eq!(bank.find_account("C-1").unwrap().balance(), 100_00);
    }

    #[test]
    fn test_transfer_out_of_checking_may_overdraw() {
        let mut bank = bank_with(vec![
            Account::open(AccountKind::Checking, "C-1", "Alice", 200_00).unwrap(),
            Account::open(AccountKind::Checking, "C-2", "Bob", 0).unwrap(),
        ]);

        bank.transfer("C-1", "C-2", 300_00).unwrap();

        let source = bank.find_account("C-1").unwrap();
        assert_eq!(source.balance(), -135_00);
        assert_eq!(source.transactions().len(), 2);
        assert_eq!(source.transactions()[1].reason(), "Overdraft fee");
        assert_eq!(bank.find_account("C-2").unwrap().balance(), 300_00);
    }

    #[test]
    fn test_month_end_applies_interest_and_resets_counters() {
        let mut bank = bank_with(vec![
            Account::open(AccountKind::Savings, "S-1", "Alice", 1_200_00).unwrap(),
            Account::open(AccountKind::Premium, "P-1", "Bob", 10_000_00).unwrap(),
            Account::open(AccountKind::Checking, "C-1", "Carol", 1_000_00).unwrap(),
        ]);

        for _ in 0..3 {
            bank.find_account_mut("S-1").unwrap().withdraw(1_00).unwrap();
        }

        bank.month_end();

        // Savings: 1197.00 * 2% / 12 = 1.99 (truncated), counter reset.
        let savings = bank.find_account_mut("S-1").unwrap();
        assert_eq!(savings.balance(), 1_197_00 + 1_99);
        savings.withdraw(1_00).unwrap();

        assert_eq!(bank.find_account("P-1").unwrap().balance(), 10_041_66);
        assert_eq!(bank.find_account("C-1").unwrap().balance(), 1_000_00);
    }

    #[test]
    fn test_report_is_sorted_by_account_number() {
        let mut bank = bank_with(vec![
            Account::open(AccountKind::Checking, "C-3", "Carol", 300_00).unwrap(),
            Account::open(AccountKind::Checking, "C-1", "Alice", 100_00).unwrap(),
            Account::open(AccountKind::Checking, "C-2", "Bob", 200_00).unwrap(),
        ]);
        bank.find_account_mut("C-1").unwrap().deposit(50_00).unwrap();

        let rows = bank.generate_report();
        let numbers: Vec<&str> = rows.iter().map(|r| r.account_number.as_str()).collect();
        assert_eq!(numbers, vec!["C-1", "C-2", "C-3"]);
        assert_eq!(rows[0].balance, 150_00);
        assert_eq!(rows[1].holder, "Bob");
    }
}
