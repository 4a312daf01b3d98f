//! Report rows summarizing registered accounts.
use std::fmt;

use crate::bank::{
    account::Account,
    types::{AccountNumber, Money, format_money},
};

/// One line of the bank report: an account's identity and current balance.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub account_number: AccountNumber,
    pub holder: String,
    pub balance: Money,
}

impl From<&Account> for ReportRow {
    fn from(account: &Account) -> Self {
        ReportRow {
            account_number: account.number().to_string(),
            holder: account.holder().to_string(),
            balance: account.balance(),
        }
    }
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account: {} | Holder: {} | Balance: {}",
            self.account_number,
            self.holder,
            format_money(self.balance),
        )
    }
}
