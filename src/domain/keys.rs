//! Checksummed textual encoding of ledger keys ("strkey").
//!
//! A strkey is the RFC 4648 base32 encoding (no padding) of
//! `version byte ‖ 32-byte payload ‖ CRC16-XModem(version ‖ payload)`, with the
//! checksum stored little-endian. Account ids start with `G`, secret seeds with `S`.

use crc::{CRC_16_XMODEM, Crc};
use data_encoding::BASE32_NOPAD;
use ed25519_dalek::SigningKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const VERSION_ACCOUNT_ID: u8 = 6 << 3;
const VERSION_SEED: u8 = 18 << 3;
const CHECKSUM: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);
const ENCODED_LEN: usize = 56;
const DECODED_LEN: usize = 35;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    #[error("encoded key must be {ENCODED_LEN} characters")]
    Length,
    #[error("invalid base32 character")]
    Alphabet,
    #[error("unexpected version byte")]
    Version,
    #[error("checksum mismatch")]
    Checksum,
}

/// Public key identifying a ledger account.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId([u8; 32]);

impl AccountId {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for AccountId {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(VERSION_ACCOUNT_ID, s).map(Self)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(VERSION_ACCOUNT_ID, &self.0))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self)
    }
}

impl Serialize for AccountId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        encoded.parse().map_err(serde::de::Error::custom)
    }
}

/// Ed25519 secret seed. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretSeed([u8; 32]);

impl SecretSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Strkey form of the seed (`S…`).
    pub fn encode(&self) -> String {
        encode(VERSION_SEED, &self.0)
    }

    pub fn signing_key(&self) -> SigningKey {
        SigningKey::from_bytes(&self.0)
    }

    /// Account id derived from the seed's public key.
    pub fn account_id(&self) -> AccountId {
        AccountId(self.signing_key().verifying_key().to_bytes())
    }
}

impl FromStr for SecretSeed {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(VERSION_SEED, s).map(Self)
    }
}

impl fmt::Debug for SecretSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretSeed(..)")
    }
}

/// The `source` field of a request: either a secret seed (which can sign) or a
/// bare account id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKey {
    Seed(SecretSeed),
    Address(AccountId),
}

impl SourceKey {
    pub fn account_id(&self) -> AccountId {
        match self {
            SourceKey::Seed(seed) => seed.account_id(),
            SourceKey::Address(account) => *account,
        }
    }

    pub fn seed(&self) -> Option<&SecretSeed> {
        match self {
            SourceKey::Seed(seed) => Some(seed),
            SourceKey::Address(_) => None,
        }
    }
}

impl FromStr for SourceKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<AccountId>() {
            Ok(account) => Ok(SourceKey::Address(account)),
            Err(KeyError::Version) => s.parse::<SecretSeed>().map(SourceKey::Seed),
            Err(e) => Err(e),
        }
    }
}

fn encode(version: u8, payload: &[u8; 32]) -> String {
    let mut raw = Vec::with_capacity(DECODED_LEN);
    raw.push(version);
    raw.extend_from_slice(payload);
    let checksum = CHECKSUM.checksum(&raw);
    raw.extend_from_slice(&checksum.to_le_bytes());
    BASE32_NOPAD.encode(&raw)
}

fn decode(version: u8, s: &str) -> Result<[u8; 32], KeyError> {
    if s.len() != ENCODED_LEN {
        return Err(KeyError::Length);
    }
    let raw = BASE32_NOPAD
        .decode(s.as_bytes())
        .map_err(|_| KeyError::Alphabet)?;
    if raw.len() != DECODED_LEN {
        return Err(KeyError::Length);
    }
    if raw[0] != version {
        return Err(KeyError::Version);
    }
    let (body, checksum) = raw.split_at(DECODED_LEN - 2);
    if CHECKSUM.checksum(body) != u16::from_le_bytes([checksum[0], checksum[1]]) {
        return Err(KeyError::Checksum);
    }
    let mut payload = [0u8; 32];
    payload.copy_from_slice(&body[1..]);
    Ok(payload)
}
