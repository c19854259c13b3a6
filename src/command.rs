use rust_decimal::{Decimal, prelude::Zero};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    /// Label used in failure records, e.g. "Failed deposit".
    pub(crate) fn noun(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
        }
    }
}

/// A transaction that passed amount validation and is ready to be handled
/// by an [`crate::account::Account`].
#[derive(Debug, Clone, Copy)]
pub struct AccountCommand {
    pub kind: TransactionKind,
    pub amount: Decimal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountCommandError {
    #[error("{kind:?} amount must be positive")]
    NonPositiveAmount { kind: TransactionKind },
}

impl AccountCommand {
    pub fn parse_command(
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<Self, AccountCommandError> {
        if amount > Decimal::zero() {
            Ok(Self { kind, amount })
        } else {
            Err(AccountCommandError::NonPositiveAmount { kind })
        }
    }
}
