#![allow(dead_code)]

use ledger_gateway::application::gateway::PaymentGateway;
use ledger_gateway::domain::keys::{AccountId, SecretSeed};
use ledger_gateway::domain::transaction::NetworkId;
use ledger_gateway::infrastructure::envelope::EnvelopeBuilder;
use ledger_gateway::infrastructure::in_memory::{InMemoryLedger, StaticResolver};
use std::collections::HashMap;

pub fn network() -> NetworkId {
    NetworkId::from_passphrase(NetworkId::TESTNET_PASSPHRASE)
}

pub fn random_seed() -> SecretSeed {
    SecretSeed::from_bytes(rand::random::<[u8; 32]>())
}

pub fn random_account() -> AccountId {
    AccountId::from_bytes(rand::random::<[u8; 32]>())
}

pub fn gateway(resolver: StaticResolver, ledger: InMemoryLedger) -> PaymentGateway {
    PaymentGateway::new(
        Box::new(resolver),
        Box::new(ledger),
        Box::new(EnvelopeBuilder),
        network(),
    )
}

/// Encodes `pairs` as an `application/x-www-form-urlencoded` body.
pub fn form_body(pairs: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Renders an accounts fixture for the CLI.
pub fn accounts_fixture(accounts: &[(AccountId, &str)]) -> String {
    let map: HashMap<String, &str> = accounts
        .iter()
        .map(|(account, sequence)| (account.to_string(), *sequence))
        .collect();
    serde_json::to_string(&map).unwrap()
}
