//! Account variants and their deposit, withdrawal, and interest policies.
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::bank::{
    transaction::TransactionRecord,
    types::{
        AccountNumber, Money, OVERDRAFT_FEE, PREMIUM_ANNUAL_RATE_PCT, PREMIUM_OPENING_MINIMUM,
        SAVINGS_ANNUAL_RATE_PCT, SAVINGS_MONTHLY_WITHDRAWAL_LIMIT, SAVINGS_OPENING_MINIMUM,
        STUDENT_BALANCE_CAP, format_money,
    },
};

/// The four account kinds offered by the bank.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Savings,
    Checking,
    Premium,
    Student,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Savings => "Savings",
            AccountKind::Checking => "Checking",
            AccountKind::Premium => "Premium",
            AccountKind::Student => "Student",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-variant policy state. Only savings accounts carry extra state:
/// the number of withdrawals made in the current monthly cycle.
#[derive(Debug, Clone)]
enum Policy {
    Savings { monthly_withdrawals: u8 },
    Checking,
    Premium,
    Student,
}

/// Represents a bank account held by a customer.
#[derive(Debug, Clone)]
pub struct Account {
    /// The unique identifier for the account, immutable after opening.
    number: AccountNumber,

    /// The name of the account holder.
    holder: String,

    /// The current balance. Mutated only through `change_balance`.
    balance: Money,

    /// Append-only log of every balance change.
    transactions: Vec<TransactionRecord>,

    /// The policy governing deposits, withdrawals, and interest.
    policy: Policy,
}

impl Account {
    /// Opens an account of the given kind.
    /// Returns an error if the holder name is blank, the initial balance is
    /// negative, or the initial balance violates the kind's opening bounds
    /// (savings and premium minimums, student cap).
    pub fn open(
        kind: AccountKind,
        number: impl Into<AccountNumber>,
        holder: &str,
        initial_balance: Money,
    ) -> Result<Self, AccountError> {
        let holder = holder.trim();
        if holder.is_empty() {
            return Err(AccountError::EmptyHolderName);
        }
        if initial_balance < 0 {
            return Err(AccountError::NegativeInitialBalance);
        }
        match kind {
            AccountKind::Savings if initial_balance < SAVINGS_OPENING_MINIMUM => {
                return Err(AccountError::BelowOpeningMinimum {
                    minimum: SAVINGS_OPENING_MINIMUM,
                });
            }
            AccountKind::Premium if initial_balance < PREMIUM_OPENING_MINIMUM => {
                return Err(AccountError::BelowOpeningMinimum {
                    minimum: PREMIUM_OPENING_MINIMUM,
                });
            }
            AccountKind::Student if initial_balance > STUDENT_BALANCE_CAP => {
                return Err(AccountError::BalanceCapExceeded {
                    cap: STUDENT_BALANCE_CAP,
                });
            }
            _ => {}
        }

        let policy = match kind {
            AccountKind::Savings => Policy::Savings {
                monthly_withdrawals: 0,
            },
            AccountKind::Checking => Policy::Checking,
            AccountKind::Premium => Policy::Premium,
            AccountKind::Student => Policy::Student,
        };
        Ok(Account {
            number: number.into(),
            holder: holder.to_string(),
            balance: initial_balance,
            transactions: Vec::new(),
            policy,
        })
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn kind(&self) -> AccountKind {
        match self.policy {
            Policy::Savings { .. } => AccountKind::Savings,
            Policy::Checking => AccountKind::Checking,
            Policy::Premium => AccountKind::Premium,
            Policy::Student => AccountKind::Student,
        }
    }

    /// Gets the append-only transaction log.
    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    /// Replaces the holder name. Returns an error if the trimmed name is empty.
    pub fn set_holder_name(&mut self, name: &str) -> Result<(), AccountError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AccountError::EmptyHolderName);
        }
        self.holder = name.to_string();
        Ok(())
    }

    /// Validates a deposit against this account's policy without mutating.
    pub fn check_deposit(&self, amount: Money) -> Result<(), AccountError> {
        if amount <= 0 {
            return Err(AccountError::NonPositiveAmount);
        }
        if let Policy::Student = self.policy {
            if self.balance + amount > STUDENT_BALANCE_CAP {
                return Err(AccountError::BalanceCapExceeded {
                    cap: STUDENT_BALANCE_CAP,
                });
            }
        }
        Ok(())
    }

    /// Validates a withdrawal against this account's policy without mutating.
    /// Checking accounts may overdraw, so only the amount itself is checked.
    pub fn check_withdrawal(&self, amount: Money) -> Result<(), AccountError> {
        if amount <= 0 {
            return Err(AccountError::NonPositiveAmount);
        }
        match self.policy {
            Policy::Savings {
                monthly_withdrawals,
            } => {
                if monthly_withdrawals >= SAVINGS_MONTHLY_WITHDRAWAL_LIMIT {
                    return Err(AccountError::WithdrawalLimitReached);
                }
                if amount > self.balance {
                    return Err(AccountError::InsufficientFunds);
                }
            }
            Policy::Checking => {}
            Policy::Premium | Policy::Student => {
                if amount > self.balance {
                    return Err(AccountError::InsufficientFunds);
                }
            }
        }
        Ok(())
    }

    /// Deposits the specified amount into the account.
    pub fn deposit(&mut self, amount: Money) -> Result<(), AccountError> {
        self.deposit_with_reason(amount, "Deposit")
    }

    /// Withdraws the specified amount from the account.
    pub fn withdraw(&mut self, amount: Money) -> Result<(), AccountError> {
        self.withdraw_with_reason(amount, "Withdrawal")
    }

    /// Deposit with a caller-supplied reason label, used by the ledger so
    /// transfer legs are recorded as such.
    pub(super) fn deposit_with_reason(
        &mut self,
        amount: Money,
        reason: &str,
    ) -> Result<(), AccountError> {
        self.check_deposit(amount)?;
        self.change_balance(amount, reason);
        Ok(())
    }

    /// Withdrawal with a caller-supplied reason label. On success the savings
    /// monthly counter increments, and a checking account whose balance went
    /// negative is debited the overdraft fee as a second record.
    pub(super) fn withdraw_with_reason(
        &mut self,
        amount: Money,
        reason: &str,
    ) -> Result<(), AccountError> {
        self.check_withdrawal(amount)?;
        self.change_balance(-amount, reason);
        if let Policy::Savings {
            monthly_withdrawals,
        } = &mut self.policy
        {
            *monthly_withdrawals += 1;
        }
        if matches!(self.policy, Policy::Checking) && self.balance < 0 {
            self.change_balance(-OVERDRAFT_FEE, "Overdraft fee");
        }
        Ok(())
    }

    /// Computes this month's interest on the current balance.
    /// Returns `None` for kinds that do not bear interest.
    pub fn monthly_interest(&self) -> Option<Money> {
        let annual_rate_pct = match self.policy {
            Policy::Savings { .. } => SAVINGS_ANNUAL_RATE_PCT,
            Policy::Premium => PREMIUM_ANNUAL_RATE_PCT,
            Policy::Checking | Policy::Student => return None,
        };
        Some(self.balance * annual_rate_pct / (100 * 12))
    }

    /// Credits this month's interest when it is strictly positive.
    /// Accounts without the interest capability are left untouched.
    pub fn apply_interest(&mut self) {
        let Some(interest) = self.monthly_interest() else {
            return;
        };
        if interest <= 0 {
            return;
        }
        let reason = format!("{} monthly interest", self.kind());
        self.change_balance(interest, &reason);
    }

    /// Zeroes the savings monthly withdrawal counter. No-op on other kinds.
    pub fn reset_monthly_counters(&mut self) {
        if let Policy::Savings {
            monthly_withdrawals,
        } = &mut self.policy
        {
            *monthly_withdrawals = 0;
        }
    }

    /// Adds the signed amount to the balance and appends the matching record.
    /// The only path that mutates the balance or the transaction log.
    fn change_balance(&mut self, amount: Money, reason: &str) {
        self.balance += amount;
        self.transactions
            .push(TransactionRecord::new(amount, reason, self.balance));
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account: {} | Holder: {} | Balance: {}",
            self.number,
            self.holder,
            format_money(self.balance),
        )
    }
}

/// Errors that can occur when opening or operating on an account.
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error("holder name must not be empty")]
    EmptyHolderName,
    #[error("initial balance must not be negative")]
    NegativeInitialBalance,
    #[error("opening balance is below the required minimum of {}", format_money(*.minimum))]
    BelowOpeningMinimum { minimum: Money },
    #[error("balance would exceed the cap of {}", format_money(*.cap))]
    BalanceCapExceeded { cap: Money },
    #[error("insufficient funds for withdrawal")]
    InsufficientFunds,
    #[error("monthly withdrawal limit reached")]
    WithdrawalLimitReached,
}
