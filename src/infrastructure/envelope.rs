//! Transaction builder producing signed JSON envelopes.
//!
//! The envelope is `base64(json({ tx, signatures }))`. Each signature is an
//! ed25519 signature over `sha256(network_id ‖ json(tx))`, decorated with the
//! last four bytes of the signer's public key as a hint.

use crate::domain::asset::AssetDescriptor;
use crate::domain::keys::{AccountId, SecretSeed};
use crate::domain::memo::Memo;
use crate::domain::operation::OperationPlan;
use crate::domain::ports::TransactionBuilder;
use crate::domain::transaction::{BuiltTransaction, NetworkId, TransactionDraft};
use crate::error::BuildError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ed25519_dalek::{Signature, Signer, Verifier, VerifyingKey};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::str::FromStr;

pub const BASE_FEE: u32 = 100;
pub const MAX_PATH_LEN: usize = 5;
pub const MAX_TEXT_MEMO_BYTES: usize = 28;
const MAX_ASSET_CODE_LEN: usize = 12;
const AMOUNT_SCALE: u32 = 7;
const STROOPS_PER_UNIT: i64 = 10_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBody {
    pub source_account: AccountId,
    pub fee: u32,
    pub sequence: u64,
    pub operations: Vec<OperationPlan>,
    pub memo: Memo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoratedSignature {
    #[serde(with = "hex::serde")]
    pub hint: [u8; 4],
    #[serde(with = "hex::serde")]
    pub signature: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    pub tx: TransactionBody,
    pub signatures: Vec<DecoratedSignature>,
}

impl TransactionEnvelope {
    /// Hash the signatures commit to on `network_id`.
    pub fn hash(&self, network_id: &NetworkId) -> Result<[u8; 32], BuildError> {
        let payload =
            serde_json::to_vec(&self.tx).map_err(|e| BuildError::Other(e.to_string()))?;
        Ok(transaction_hash(network_id, &payload))
    }

    /// True when at least one signature is a valid signature of the source
    /// account over this transaction.
    pub fn verify(&self, network_id: &NetworkId) -> bool {
        let Ok(hash) = self.hash(network_id) else {
            return false;
        };
        let Ok(key) = VerifyingKey::from_bytes(self.tx.source_account.as_bytes()) else {
            return false;
        };
        self.signatures.iter().any(|decorated| {
            Signature::from_slice(&decorated.signature)
                .map(|signature| key.verify(&hash, &signature).is_ok())
                .unwrap_or(false)
        })
    }
}

pub fn decode_envelope(encoded: &str) -> Result<TransactionEnvelope, BuildError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| BuildError::Other(format!("invalid envelope encoding: {}", e)))?;
    serde_json::from_slice(&bytes).map_err(|e| BuildError::Other(format!("invalid envelope: {}", e)))
}

fn transaction_hash(network_id: &NetworkId, payload: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(network_id.as_bytes());
    hasher.update(payload);
    hasher.finalize().into()
}

/// Builder enforcing the ledger's structural limits before signing.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvelopeBuilder;

impl EnvelopeBuilder {
    fn body(draft: &TransactionDraft) -> Result<TransactionBody, BuildError> {
        let operation = draft
            .operation
            .clone()
            .ok_or_else(|| BuildError::Other("transaction has no operations".into()))?;
        Ok(TransactionBody {
            source_account: draft.source_account,
            fee: BASE_FEE,
            sequence: draft.sequence,
            operations: vec![operation],
            memo: draft.memo.clone(),
        })
    }
}

impl TransactionBuilder for EnvelopeBuilder {
    fn build(&self, draft: TransactionDraft) -> Result<BuiltTransaction, BuildError> {
        let body = Self::body(&draft)?;
        for operation in &body.operations {
            validate_operation(operation)?;
        }
        validate_memo(&body.memo)?;

        let payload = serde_json::to_vec(&body).map_err(|e| BuildError::Other(e.to_string()))?;
        let hash = transaction_hash(&draft.network_id, &payload);
        Ok(BuiltTransaction {
            draft,
            payload,
            hash,
        })
    }

    fn sign_and_encode(
        &self,
        tx: BuiltTransaction,
        seed: &SecretSeed,
    ) -> Result<String, BuildError> {
        let signing_key = seed.signing_key();
        let public = signing_key.verifying_key().to_bytes();
        let mut hint = [0u8; 4];
        hint.copy_from_slice(&public[28..]);

        let envelope = TransactionEnvelope {
            tx: Self::body(&tx.draft)?,
            signatures: vec![DecoratedSignature {
                hint,
                signature: signing_key.sign(&tx.hash).to_bytes().to_vec(),
            }],
        };
        let json = serde_json::to_vec(&envelope).map_err(|e| BuildError::Other(e.to_string()))?;
        Ok(STANDARD.encode(json))
    }
}

fn validate_operation(operation: &OperationPlan) -> Result<(), BuildError> {
    match operation {
        OperationPlan::CreateAccount {
            starting_balance, ..
        } => parse_amount(starting_balance).map(|_| ()),
        OperationPlan::Payment { asset, amount, .. } => {
            validate_asset(asset)?;
            parse_amount(amount).map(|_| ())
        }
        OperationPlan::PathPayment {
            send_asset,
            send_max,
            dest_asset,
            dest_amount,
            path,
            ..
        } => {
            if path.len() > MAX_PATH_LEN {
                return Err(BuildError::Other(format!(
                    "path has {} assets, at most {} allowed",
                    path.len(),
                    MAX_PATH_LEN
                )));
            }
            validate_asset(send_asset)?;
            validate_asset(dest_asset)?;
            for asset in path {
                validate_asset(asset)?;
            }
            parse_amount(send_max)?;
            parse_amount(dest_amount).map(|_| ())
        }
    }
}

fn validate_asset(asset: &AssetDescriptor) -> Result<(), BuildError> {
    let AssetDescriptor::Issued { code, issuer } = asset else {
        return Ok(());
    };
    if code.is_empty()
        || code.len() > MAX_ASSET_CODE_LEN
        || !code.bytes().all(|b| b.is_ascii_alphanumeric())
    {
        return Err(BuildError::InvalidAssetCode(code.clone()));
    }
    issuer
        .parse::<AccountId>()
        .map_err(|e| BuildError::Other(format!("invalid issuer {}: {}", issuer, e)))?;
    Ok(())
}

fn validate_memo(memo: &Memo) -> Result<(), BuildError> {
    match memo {
        Memo::Text(text) if text.len() > MAX_TEXT_MEMO_BYTES => Err(BuildError::Other(format!(
            "memo text is {} bytes, at most {} allowed",
            text.len(),
            MAX_TEXT_MEMO_BYTES
        ))),
        _ => Ok(()),
    }
}

/// Parses a decimal amount into stroops.
fn parse_amount(raw: &str) -> Result<i64, BuildError> {
    let invalid = || BuildError::InvalidAmount(raw.to_string());
    let value = Decimal::from_str(raw).map_err(|_| invalid())?;
    if value <= Decimal::ZERO || value.scale() > AMOUNT_SCALE {
        return Err(invalid());
    }
    value
        .checked_mul(Decimal::from(STROOPS_PER_UNIT))
        .and_then(|stroops| stroops.to_i64())
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> NetworkId {
        NetworkId::from_passphrase(NetworkId::TESTNET_PASSPHRASE)
    }

    fn issuer() -> String {
        AccountId::from_bytes([8u8; 32]).to_string()
    }

    fn draft(operation: OperationPlan) -> TransactionDraft {
        TransactionDraft {
            source_account: SecretSeed::from_bytes([5u8; 32]).account_id(),
            sequence: 10,
            network_id: network(),
            operation: Some(operation),
            memo: Memo::None,
        }
    }

    fn payment(asset: AssetDescriptor, amount: &str) -> OperationPlan {
        OperationPlan::Payment {
            destination: AccountId::from_bytes([6u8; 32]),
            asset,
            amount: amount.into(),
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("10"), Ok(100_000_000));
        assert_eq!(parse_amount("0.0000001"), Ok(1));
        assert_eq!(parse_amount("922337203685.4775807"), Ok(i64::MAX));
        for raw in ["", "abc", "0", "-1", "0.00000001", "922337203685.4775808"] {
            assert_eq!(
                parse_amount(raw),
                Err(BuildError::InvalidAmount(raw.into())),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_asset_code_limits() {
        assert!(validate_asset(&AssetDescriptor::issued("X", issuer())).is_ok());
        assert!(validate_asset(&AssetDescriptor::issued("ABCDEFGHIJKL", issuer())).is_ok());
        assert_eq!(
            validate_asset(&AssetDescriptor::issued("ABCDEFGHIJKLM", issuer())),
            Err(BuildError::InvalidAssetCode("ABCDEFGHIJKLM".into()))
        );
        assert_eq!(
            validate_asset(&AssetDescriptor::issued("US-D", issuer())),
            Err(BuildError::InvalidAssetCode("US-D".into()))
        );
    }

    #[test]
    fn test_invalid_issuer_is_internal() {
        let result = validate_asset(&AssetDescriptor::issued("USD", "GBAD"));
        assert!(matches!(result, Err(BuildError::Other(_))));
    }

    #[test]
    fn test_path_too_long() {
        let operation = OperationPlan::PathPayment {
            destination: AccountId::from_bytes([6u8; 32]),
            send_asset: AssetDescriptor::Native,
            send_max: "1".into(),
            dest_asset: AssetDescriptor::Native,
            dest_amount: "1".into(),
            path: vec![AssetDescriptor::Native; MAX_PATH_LEN + 1],
        };
        assert!(matches!(
            EnvelopeBuilder.build(draft(operation)),
            Err(BuildError::Other(_))
        ));
    }

    #[test]
    fn test_text_memo_too_long() {
        let mut draft = draft(payment(AssetDescriptor::Native, "1"));
        draft.memo = Memo::Text("x".repeat(MAX_TEXT_MEMO_BYTES + 1));
        assert!(matches!(
            EnvelopeBuilder.build(draft),
            Err(BuildError::Other(_))
        ));
    }

    #[test]
    fn test_missing_operation() {
        let mut draft = draft(payment(AssetDescriptor::Native, "1"));
        draft.operation = None;
        assert!(matches!(
            EnvelopeBuilder.build(draft),
            Err(BuildError::Other(_))
        ));
    }

    #[test]
    fn test_signed_envelope_verifies() {
        let seed = SecretSeed::from_bytes([5u8; 32]);
        let built = EnvelopeBuilder
            .build(draft(payment(AssetDescriptor::issued("USD", issuer()), "2.5")))
            .unwrap();
        let encoded = EnvelopeBuilder.sign_and_encode(built.clone(), &seed).unwrap();

        let envelope = decode_envelope(&encoded).unwrap();
        assert_eq!(envelope.tx.fee, BASE_FEE);
        assert_eq!(envelope.tx.sequence, 10);
        assert_eq!(envelope.hash(&network()).unwrap(), built.hash);
        assert!(envelope.verify(&network()));
        assert!(!envelope.verify(&NetworkId::from_passphrase("other network")));
    }

    #[test]
    fn test_wrong_signer_does_not_verify() {
        let built = EnvelopeBuilder
            .build(draft(payment(AssetDescriptor::Native, "1")))
            .unwrap();
        let encoded = EnvelopeBuilder
            .sign_and_encode(built, &SecretSeed::from_bytes([99u8; 32]))
            .unwrap();
        assert!(!decode_envelope(&encoded).unwrap().verify(&network()));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(decode_envelope("not base64!").is_err());
        assert!(decode_envelope(&STANDARD.encode(b"{}")).is_err());
    }
}
