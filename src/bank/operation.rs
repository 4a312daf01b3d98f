//! Operations consumed by the driver: one CSV row per banking operation.
use serde::{Deserialize, de};

use crate::bank::{
    account::AccountKind,
    types::{DECIMAL_PRECISION, Money},
};

/// Enum representing the kind of operation.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Open,
    Deposit,
    Withdraw,
    Transfer,
    #[serde(rename = "month_end")]
    MonthEnd,
}

/// Custom deserializer for monetary values to handle fixed-point representation.
fn deserialize_money<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: de::Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| (v * DECIMAL_PRECISION).round() as Money))
}

/// Represents a single banking operation.
/// Columns that do not apply to an operation kind are left empty.
#[derive(Deserialize, Debug, Clone)]
pub struct Operation {
    /// The kind of operation (e.g. Open, Deposit, Transfer).
    op: OperationKind,

    /// The account kind to open; only used by Open.
    #[serde(default)]
    kind: Option<AccountKind>,

    /// The account the operation targets (the source, for transfers).
    #[serde(default)]
    account: Option<String>,

    /// The destination account; only used by Transfer.
    #[serde(default)]
    to: Option<String>,

    /// The holder name; only used by Open.
    #[serde(default)]
    holder: Option<String>,

    /// The amount involved, if applicable (the initial balance, for Open).
    #[serde(default, deserialize_with = "deserialize_money")]
    amount: Option<Money>,
}

impl Operation {
    /// Gets the kind of the operation.
    pub fn op(&self) -> OperationKind {
        self.op
    }

    /// Gets the account kind to open, if present.
    pub fn kind(&self) -> Option<AccountKind> {
        self.kind
    }

    /// Gets the targeted account number, if present.
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// Gets the destination account number, if present.
    pub fn to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    /// Gets the holder name, if present.
    pub fn holder(&self) -> Option<&str> {
        self.holder.as_deref()
    }

    /// Gets the amount, if applicable.
    pub fn amount(&self) -> Option<Money> {
        self.amount
    }

    #[cfg(test)]
    pub fn new(
        op: OperationKind,
        kind: Option<AccountKind>,
        account: Option<&str>,
        to: Option<&str>,
        holder: Option<&str>,
        amount: Option<Money>,
    ) -> Self {
        Operation {
            op,
            kind,
            account: account.map(str::to_string),
            to: to.map(str::to_string),
            holder: holder.map(str::to_string),
            amount,
        }
    }
}
