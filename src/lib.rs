/// The account entity: balance, audit history and the rules for changing them.
/// Rejected transactions are recorded, never raised.
pub mod account;

/// Validated deposit/withdrawal commands handled by [`account`].
pub mod command;

/// Append-only transaction log owned by an account.
pub mod history;

/// Account identifiers and the issuers that hand them out.
pub mod id;

/// Transaction processor interface, implemented by the account itself and by
/// a mutex-guarded handle for sharing one account between threads.
pub mod processor;

pub use account::{Account, AccountSnapshot};
pub use command::TransactionKind;
pub use history::History;
pub use id::{AccountId, IdIssuer, SequentialIdIssuer};
pub use processor::{TransactionProcessError, TransactionProcessor, shared_account::SharedAccount};
