use std::{
    fmt,
    num::NonZeroU64,
    sync::atomic::{AtomicU64, Ordering},
};

use serde::Serialize;

/// Positive account identifier. Zero is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountId(NonZeroU64);

impl AccountId {
    pub const fn new(id: NonZeroU64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<NonZeroU64> for AccountId {
    fn from(value: NonZeroU64) -> Self {
        Self(value)
    }
}

/// Hands out account ids. Implementations are responsible for uniqueness.
pub trait IdIssuer {
    fn next_id(&self) -> AccountId;
}

/// Monotonic counter, safe to share between threads.
///
/// Hands out every id up to and including `u64::MAX`; a stored `0` marks the
/// issuer as exhausted.
#[derive(Debug)]
pub struct SequentialIdIssuer {
    next: AtomicU64,
}

impl SequentialIdIssuer {
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub const fn starting_at(first: NonZeroU64) -> Self {
        Self {
            next: AtomicU64::new(first.get()),
        }
    }
}

impl Default for SequentialIdIssuer {
    fn default() -> Self {
        Self::new()
    }
}

impl IdIssuer for SequentialIdIssuer {
    /// # Panics
    ///
    /// If the whole `u64` id space has been handed out
    fn next_id(&self) -> AccountId {
        let id = self
            .next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                (n != 0).then(|| n.wrapping_add(1))
            })
            .ok()
            .and_then(NonZeroU64::new)
            .expect("account id space exhausted");
        AccountId(id)
    }
}

/// Backs [`crate::account::Account::new`]; everything else takes an issuer explicitly.
pub(crate) static PROCESS_IDS: SequentialIdIssuer = SequentialIdIssuer::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_start_at_one() {
        let issuer = SequentialIdIssuer::default();
        assert_eq!(issuer.next_id().get(), 1);
        assert_eq!(issuer.next_id().get(), 2);
        assert_eq!(issuer.next_id().get(), 3);
    }

    #[test]
    fn custom_start() {
        let issuer = SequentialIdIssuer::starting_at(NonZeroU64::new(1000).unwrap());
        let first = issuer.next_id();
        let second = issuer.next_id();
        assert_eq!(first.get(), 1000);
        assert!(second > first);
    }

    #[test]
    fn last_id_is_issued_before_exhaustion() {
        let issuer = SequentialIdIssuer::starting_at(NonZeroU64::new(u64::MAX - 1).unwrap());
        assert_eq!(issuer.next_id().get(), u64::MAX - 1);
        assert_eq!(issuer.next_id().get(), u64::MAX);

        // exhausted: never wraps around to reuse ids
        let result = std::panic::catch_unwind(|| issuer.next_id());
        assert!(result.is_err());
        let result = std::panic::catch_unwind(|| issuer.next_id());
        assert!(result.is_err());
    }

    #[test]
    fn shared_issuer_never_repeats() {
        let issuer = SequentialIdIssuer::new();
        let mut ids: Vec<u64> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| (0..250).map(|_| issuer.next_id().get()).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 1000);
        assert_eq!(ids[0], 1);
    }
}
