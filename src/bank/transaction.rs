//! Transaction records appended to an account's ledger log.
use std::fmt;

use chrono::{DateTime, Utc};

use crate::bank::types::{Money, format_money};

/// Direction of a balance change, derived from the sign of the applied amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Credit,
    Debit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Credit => "Credit",
            Direction::Debit => "Debit",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single entry in an account's append-only transaction log.
/// Immutable once appended; never truncated or reordered.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    /// When the balance change was applied.
    timestamp: DateTime<Utc>,

    /// Whether the change credited or debited the account.
    direction: Direction,

    /// The absolute amount of the change.
    amount: Money,

    /// Why the change happened, e.g. "Deposit" or "Overdraft fee".
    reason: String,

    /// Balance snapshot immediately after the change.
    balance_after: Money,
}

impl TransactionRecord {
    /// Creates a record from a signed balance change and the resulting balance.
    pub(super) fn new(change: Money, reason: &str, balance_after: Money) -> Self {
        let direction = if change < 0 {
            Direction::Debit
        } else {
            Direction::Credit
        };
        TransactionRecord {
            timestamp: Utc::now(),
            direction,
            amount: change.abs(),
            reason: reason.to_string(),
            balance_after,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Gets the absolute amount of the change.
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Gets the balance snapshot taken immediately after the change.
    pub fn balance_after(&self) -> Money {
        self.balance_after
    }

    /// Gets the signed balance change this record represents.
    pub fn delta(&self) -> Money {
        match self.direction {
            Direction::Credit => self.amount,
            Direction::Debit => -self.amount,
        }
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | Balance: {}",
            self.timestamp.to_rfc3339(),
            self.direction,
            format_money(self.amount),
            self.reason,
            format_money(self.balance_after),
        )
    }
}
