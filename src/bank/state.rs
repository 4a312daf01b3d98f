//! The `State` module owns the bank and applies the incoming operation stream.
use thiserror::Error;
use tokio::sync::mpsc;

use crate::bank::{
    Account, AccountError, Bank, BankError,
    operation::{Operation, OperationKind},
};

/// Errors raised while applying one operation from the stream.
#[derive(Error, Debug)]
enum OperationError {
    #[error("operation is missing required fields")]
    Malformed,
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Account(#[from] AccountError),
}

/// Owns the bank and a channel of operations to apply to it.
pub struct State {
    bank: Bank,
    /// A channel receiver for the incoming operation stream.
    receiver: mpsc::Receiver<Operation>,
}

impl State {
    /// Creates a new instance of `State` with an empty bank.
    pub fn new(receiver: mpsc::Receiver<Operation>) -> Self {
        State {
            bank: Bank::new(),
            receiver,
        }
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    /// Applies a single operation to the bank.
    fn apply(&mut self, operation: Operation) -> Result<(), OperationError> {
        match operation.op() {
            OperationKind::Open => {
                let (Some(kind), Some(number), Some(holder)) =
                    (operation.kind(), operation.account(), operation.holder())
                else {
                    return Err(OperationError::Malformed);
                };
                let initial_balance = operation.amount().unwrap_or(0);
                let account = Account::open(kind, number, holder, initial_balance)?;
                self.bank.open_account(account)?;
            }
            OperationKind::Deposit => {
                let (Some(number), Some(amount)) = (operation.account(), operation.amount())
                else {
                    return Err(OperationError::Malformed);
                };
                let account = self
                    .bank
                    .find_account_mut(number)
                    .ok_or_else(|| BankError::AccountNotFound(number.to_string()))?;
                account.deposit(amount)?;
            }
            OperationKind::Withdraw => {
                let (Some(number), Some(amount)) = (operation.account(), operation.amount())
                else {
                    return Err(OperationError::Malformed);
                };
                let account = self
                    .bank
                    .find_account_mut(number)
                    .ok_or_else(|| BankError::AccountNotFound(number.to_string()))?;
                account.withdraw(amount)?;
            }
            OperationKind::Transfer => {
                let (Some(from), Some(to), Some(amount)) =
                    (operation.account(), operation.to(), operation.amount())
                else {
                    return Err(OperationError::Malformed);
                };
                self.bank.transfer(from, to, amount)?;
            }
            OperationKind::MonthEnd => {
                self.bank.month_end();
            }
        }
        Ok(())
    }

    /// Runs the state management loop, applying operations from the receiver.
    /// Rejected operations are logged and the stream continues.
    pub async fn run(&mut self) {
        while let Some(operation) = self.receiver.recv().await {
            if let Err(e) = self.apply(operation) {
                tracing::warn!("operation rejected: {e}");
            }
        }
    }
}
