use crate::domain::destination::FederationRecord;
use crate::domain::keys::AccountId;
use crate::domain::operation::OperationPlan;
use crate::domain::ports::{AddressResolver, LedgerClient};
use crate::domain::transaction::{AccountRecord, NetworkId};
use crate::error::{LedgerError, ResolveError};
use crate::infrastructure::envelope::{TransactionEnvelope, decode_envelope};
use crate::infrastructure::federation::split_address;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct LedgerState {
    accounts: HashMap<AccountId, String>,
    submitted: Vec<TransactionEnvelope>,
}

/// A thread-safe in-memory ledger.
///
/// Tracks the sequence number of every known account and applies submitted
/// envelopes the way the ledger would: the signature must verify, the sequence
/// must be exactly one past the source's current one, and only `CreateAccount`
/// may target a missing account. Ideal for tests and offline runs.
#[derive(Clone)]
pub struct InMemoryLedger {
    network_id: NetworkId,
    state: Arc<RwLock<LedgerState>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger for `network_id`.
    pub fn new(network_id: NetworkId) -> Self {
        Self {
            network_id,
            state: Arc::new(RwLock::new(LedgerState::default())),
        }
    }

    /// Creates a ledger pre-populated with `account -> sequence` entries.
    pub fn with_accounts(network_id: NetworkId, accounts: HashMap<AccountId, String>) -> Self {
        Self {
            network_id,
            state: Arc::new(RwLock::new(LedgerState {
                accounts,
                submitted: Vec::new(),
            })),
        }
    }

    pub async fn insert_account(&self, account: AccountId, sequence: impl Into<String>) {
        let mut state = self.state.write().await;
        state.accounts.insert(account, sequence.into());
    }

    /// Envelopes accepted so far, oldest first.
    pub async fn submitted(&self) -> Vec<TransactionEnvelope> {
        self.state.read().await.submitted.clone()
    }
}

fn rejected(code: &str) -> LedgerError {
    LedgerError::Rejected {
        status: 400,
        body: json!({ "extras": { "result_codes": { "transaction": code } } }).to_string(),
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn load_account(&self, account: &AccountId) -> Result<AccountRecord, LedgerError> {
        let state = self.state.read().await;
        state
            .accounts
            .get(account)
            .map(|sequence| AccountRecord {
                sequence: sequence.clone(),
            })
            .ok_or_else(|| LedgerError::NotFound(account.to_string()))
    }

    async fn submit_transaction(&self, envelope: &str) -> Result<Value, LedgerError> {
        let decoded = decode_envelope(envelope).map_err(|_| rejected("tx_malformed"))?;
        if !decoded.verify(&self.network_id) {
            return Err(rejected("tx_bad_auth"));
        }
        let hash = decoded
            .hash(&self.network_id)
            .map_err(|_| rejected("tx_malformed"))?;

        let mut state = self.state.write().await;
        let source = decoded.tx.source_account;
        let current = state
            .accounts
            .get(&source)
            .ok_or_else(|| rejected("tx_no_source_account"))?
            .parse::<u64>()
            .map_err(|_| rejected("tx_internal_error"))?;
        if Some(decoded.tx.sequence) != current.checked_add(1) {
            return Err(rejected("tx_bad_seq"));
        }

        for operation in &decoded.tx.operations {
            let exists = state.accounts.contains_key(operation.destination());
            match operation {
                OperationPlan::CreateAccount { .. } if exists => {
                    return Err(rejected("op_already_exists"));
                }
                OperationPlan::Payment { .. } | OperationPlan::PathPayment { .. } if !exists => {
                    return Err(rejected("op_no_destination"));
                }
                _ => {}
            }
        }

        state
            .accounts
            .insert(source, decoded.tx.sequence.to_string());
        for operation in &decoded.tx.operations {
            if let OperationPlan::CreateAccount { destination, .. } = operation {
                state.accounts.insert(*destination, "0".to_string());
            }
        }
        state.submitted.push(decoded);

        Ok(json!({
            "hash": hex::encode(hash),
            "ledger": state.submitted.len(),
            "envelope_xdr": envelope,
        }))
    }
}

/// An in-memory federation directory.
///
/// Addresses without `*` are returned unchanged as account ids; `name*domain`
/// addresses are looked up in the directory.
#[derive(Default, Clone)]
pub struct StaticResolver {
    records: HashMap<String, FederationRecord>,
}

impl StaticResolver {
    /// Creates a new, empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: impl Into<String>, record: FederationRecord) {
        self.records.insert(address.into(), record);
    }
}

#[async_trait]
impl AddressResolver for StaticResolver {
    async fn resolve(&self, destination: &str) -> Result<FederationRecord, ResolveError> {
        if split_address(destination)?.is_none() {
            return Ok(FederationRecord::account(destination));
        }
        self.records
            .get(destination)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(destination.to_string()))
    }
}
