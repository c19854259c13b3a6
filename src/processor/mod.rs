use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::AccountError,
    command::{AccountCommandError, TransactionKind},
};

pub mod shared_account;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionProcessError {
    #[error(transparent)]
    CommandErr(#[from] AccountCommandError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

pub trait TransactionProcessor {
    /// Runs one deposit or withdrawal and records the outcome in history,
    /// whether it was accepted or not. Returns the balance after the
    /// transaction, or the reason it was rejected.
    fn process_transaction(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<Decimal, TransactionProcessError>;
}
