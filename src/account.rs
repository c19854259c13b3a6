use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::{
    command::{AccountCommand, TransactionKind},
    history::History,
    id::{AccountId, IdIssuer, PROCESS_IDS},
    processor::{TransactionProcessError, TransactionProcessor},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccountEventKind {
    Deposited,
    Withdrawn,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct AccountEvent {
    amount: Decimal,
    kind: AccountEventKind,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Insufficient funds: balance {balance} is less than {requested}")]
    InsufficientFunds { balance: Decimal, requested: Decimal },
    #[error("Balance overflow: {requested} cannot be added to {balance}")]
    BalanceOverflow { balance: Decimal, requested: Decimal },
}

/// History line for an accepted transaction, written after the event was applied.
struct Accepted<'a> {
    event: &'a AccountEvent,
    balance: Decimal,
}

impl fmt::Display for Accepted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.event.kind {
            AccountEventKind::Deposited => "Deposited",
            AccountEventKind::Withdrawn => "Withdrew",
        };
        write!(f, "{verb} {}, balance {}", self.event.amount, self.balance)
    }
}

struct Rejected<'a> {
    kind: TransactionKind,
    amount: Decimal,
    reason: &'a TransactionProcessError,
}

impl fmt::Display for Rejected<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed {} of {}: {}",
            self.kind.noun(),
            self.amount,
            self.reason
        )
    }
}

/// A single customer account: a running balance plus the audit trail of
/// every deposit and withdrawal ever attempted against it.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    owner_name: String,
    balance: Decimal,
    history: History,
}

/// Point-in-time copy of an account, for handing to outer layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSnapshot {
    pub id: AccountId,
    pub owner_name: String,
    pub balance: Decimal,
    pub history: Vec<String>,
}

impl Account {
    /// Opens an account with an id from the process-wide sequential issuer.
    pub fn new(owner_name: impl Into<String>, initial_balance: Decimal) -> Self {
        Self::with_issuer(owner_name, initial_balance, &PROCESS_IDS)
    }

    pub fn with_issuer(
        owner_name: impl Into<String>,
        initial_balance: Decimal,
        ids: &impl IdIssuer,
    ) -> Self {
        Self::with_id(ids.next_id(), owner_name, initial_balance)
    }

    /// The initial balance is stored as given; negative values are not rejected.
    pub fn with_id(
        id: AccountId,
        owner_name: impl Into<String>,
        initial_balance: Decimal,
    ) -> Self {
        let owner_name = owner_name.into();
        let mut history = History::default();
        history.record(format_args!(
            "Account created: #{id} for {owner_name} with initial balance {initial_balance}"
        ));
        tracing::debug!(account_id = %id, %initial_balance, "account created");
        Self {
            id,
            owner_name,
            balance: initial_balance,
            history,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            id: self.id,
            owner_name: self.owner_name.clone(),
            balance: self.balance,
            history: self.history.to_vec(),
        }
    }

    /// Returns whether the deposit was accepted. Either way it is recorded.
    pub fn deposit(&mut self, amount: Decimal) -> bool {
        self.process_transaction(TransactionKind::Deposit, amount).is_ok()
    }

    /// Returns whether the withdrawal was accepted. Either way it is recorded.
    pub fn withdraw(&mut self, amount: Decimal) -> bool {
        self.process_transaction(TransactionKind::Withdrawal, amount).is_ok()
    }

    fn apply(&mut self, event: &AccountEvent) {
        match event.kind {
            AccountEventKind::Deposited => {
                self.balance += event.amount;
            }
            AccountEventKind::Withdrawn => {
                self.balance -= event.amount;
            }
        }
    }

    pub(crate) fn handle_transaction(
        &self,
        command: AccountCommand,
    ) -> Result<AccountEvent, AccountError> {
        match command.kind {
            TransactionKind::Deposit => {
                if self.balance.checked_add(command.amount).is_some() {
                    Ok(AccountEvent {
                        amount: command.amount,
                        kind: AccountEventKind::Deposited,
                    })
                } else {
                    Err(AccountError::BalanceOverflow {
                        balance: self.balance,
                        requested: command.amount,
                    })
                }
            }
            TransactionKind::Withdrawal => {
                if self.balance >= command.amount {
                    Ok(AccountEvent {
                        amount: command.amount,
                        kind: AccountEventKind::Withdrawn,
                    })
                } else {
                    Err(AccountError::InsufficientFunds {
                        balance: self.balance,
                        requested: command.amount,
                    })
                }
            }
        }
    }
}

impl TransactionProcessor for Account {
    fn process_transaction(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<Decimal, TransactionProcessError> {
        let outcome = AccountCommand::parse_command(kind, amount)
            .map_err(TransactionProcessError::from)
            .and_then(|cmd| self.handle_transaction(cmd).map_err(Into::into));

        match outcome {
            Ok(event) => {
                self.apply(&event);
                self.history.record(Accepted {
                    event: &event,
                    balance: self.balance,
                });
                tracing::debug!(
                    account_id = %self.id,
                    ?kind,
                    %amount,
                    balance = %self.balance,
                    "transaction accepted"
                );
                Ok(self.balance)
            }
            Err(err) => {
                self.history.record(Rejected {
                    kind,
                    amount,
                    reason: &err,
                });
                tracing::warn!(
                    account_id = %self.id,
                    ?kind,
                    %amount,
                    balance = %self.balance,
                    error = %err,
                    "transaction rejected"
                );
                Err(err)
            }
        }
    }
}
