use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;

use crate::{
    account::{Account, AccountSnapshot},
    command::TransactionKind,
    id::AccountId,
};

use super::{TransactionProcessError, TransactionProcessor};

/// Cloneable handle for using one [`Account`] from several threads.
///
/// Every operation holds the lock across the balance update and the matching
/// history append, so readers never see one without the other.
#[derive(Debug, Clone)]
pub struct SharedAccount {
    inner: Arc<Mutex<Account>>,
}

impl SharedAccount {
    pub fn new(account: Account) -> Self {
        Self {
            inner: Arc::new(Mutex::new(account)),
        }
    }

    // A panic cannot land between a balance change and its history record,
    // so the state behind a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, Account> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> AccountId {
        self.lock().id()
    }

    pub fn balance(&self) -> Decimal {
        self.lock().balance()
    }

    pub fn history(&self) -> Vec<String> {
        self.lock().history().to_vec()
    }

    pub fn snapshot(&self) -> AccountSnapshot {
        self.lock().snapshot()
    }

    pub fn deposit(&self, amount: Decimal) -> bool {
        self.lock().deposit(amount)
    }

    pub fn withdraw(&self, amount: Decimal) -> bool {
        self.lock().withdraw(amount)
    }
}

impl TransactionProcessor for SharedAccount {
    fn process_transaction(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<Decimal, TransactionProcessError> {
        self.lock().process_transaction(kind, amount)
    }
}

impl From<Account> for SharedAccount {
    fn from(account: Account) -> Self {
        Self::new(account)
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU64;

    use rust_decimal::prelude::{FromPrimitive, Zero};

    use crate::{account::AccountError, id::SequentialIdIssuer};

    use super::*;

    #[test]
    fn clones_share_state() {
        let issuer = SequentialIdIssuer::starting_at(NonZeroU64::new(3).unwrap());
        let shared = SharedAccount::new(Account::with_issuer(
            "Bilal Burton",
            Decimal::from_u32(10).unwrap(),
            &issuer,
        ));
        let mut other = shared.clone();

        assert!(shared.deposit(Decimal::from_u32(5).unwrap()));
        let err = other
            .process_transaction(TransactionKind::Withdrawal, Decimal::from_u32(20).unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            TransactionProcessError::AccountErr(AccountError::InsufficientFunds { .. })
        ));
        assert!(other.withdraw(Decimal::from_u32(15).unwrap()));

        assert_eq!(shared.id().get(), 3);
        assert_eq!(shared.balance(), Decimal::zero());
        let history = shared.history();
        assert_eq!(history.len(), 4);
        assert!(history[1].contains("Deposited"));
        assert!(history[2].contains("Failed withdrawal"));
        assert!(history[3].contains("Withdrew"));
        assert_eq!(other.snapshot(), shared.snapshot());
    }
}
