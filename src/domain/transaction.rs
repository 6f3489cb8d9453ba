use crate::domain::keys::AccountId;
use crate::domain::memo::Memo;
use crate::domain::operation::OperationPlan;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Identifier of the ledger network a transaction is valid on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkId(#[serde(serialize_with = "hex::serde::serialize")] [u8; 32]);

impl NetworkId {
    pub const TESTNET_PASSPHRASE: &'static str = "Test SDF Network ; September 2015";

    /// The network id is the SHA-256 digest of the network passphrase.
    pub fn from_passphrase(passphrase: &str) -> Self {
        Self(Sha256::digest(passphrase.as_bytes()).into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Account state returned by the ledger. The sequence number arrives as a
/// decimal string and is parsed by the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountRecord {
    pub sequence: String,
}

/// Transaction composed by the assembler, before the builder validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionDraft {
    pub source_account: AccountId,
    pub sequence: u64,
    pub network_id: NetworkId,
    pub operation: Option<OperationPlan>,
    pub memo: Memo,
}

/// Builder output: the validated transaction plus the bytes a signature
/// commits to.
#[derive(Debug, Clone)]
pub struct BuiltTransaction {
    pub draft: TransactionDraft,
    pub payload: Vec<u8>,
    pub hash: [u8; 32],
}
