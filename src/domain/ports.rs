use super::destination::FederationRecord;
use super::keys::{AccountId, SecretSeed};
use super::transaction::{AccountRecord, BuiltTransaction, TransactionDraft};
use crate::error::{BuildError, LedgerError, ResolveError};
use async_trait::async_trait;
use serde_json::Value;

/// Maps a destination string (federation address or raw account id) to an
/// account id and an optional routing memo.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    async fn resolve(&self, destination: &str) -> Result<FederationRecord, ResolveError>;
}

/// Access to ledger state and transaction submission.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn load_account(&self, account: &AccountId) -> Result<AccountRecord, LedgerError>;
    /// Returns the ledger's raw response for an accepted envelope.
    async fn submit_transaction(&self, envelope: &str) -> Result<Value, LedgerError>;
}

/// Validates, signs and encodes transactions.
pub trait TransactionBuilder: Send + Sync {
    fn build(&self, draft: TransactionDraft) -> Result<BuiltTransaction, BuildError>;
    fn sign_and_encode(
        &self,
        tx: BuiltTransaction,
        seed: &SecretSeed,
    ) -> Result<String, BuildError>;
}

pub type AddressResolverBox = Box<dyn AddressResolver>;
pub type LedgerClientBox = Box<dyn LedgerClient>;
pub type TransactionBuilderBox = Box<dyn TransactionBuilder>;
