pub mod scheme;

pub use scheme::CommitmentScheme;

use crate::{GameError, Result};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::Sha3_256;
use std::fmt;
use std::str::FromStr;

type HmacSha3_256 = Hmac<Sha3_256>;

/// 256 bits, the floor for any key this crate hands out
pub const MIN_KEY_LEN: usize = 32;
/// 512 bits; the hex form still fits one SHA3-256 block
pub const MAX_KEY_LEN: usize = 64;
pub const DIGEST_LEN: usize = 32;

/// Secret key for one round's commitment.
///
/// The HMAC is keyed with the lowercase hex text of the key, so the value
/// printed on reveal can be pasted into any HMAC-SHA3-256 tool as-is.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() < MIN_KEY_LEN {
            return Err(GameError::crypto(format!(
                "key must be at least {} bytes, got {}",
                MIN_KEY_LEN,
                bytes.len()
            )));
        }
        if bytes.len() > MAX_KEY_LEN {
            return Err(GameError::crypto(format!(
                "key must be at most {} bytes, got {}",
                MAX_KEY_LEN,
                bytes.len()
            )));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(<{} bytes redacted>)", self.0.len())
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for SecretKey {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim())
            .map_err(|e| GameError::crypto(format!("key is not valid hex: {}", e)))?;
        Self::from_bytes(bytes)
    }
}

/// HMAC-SHA3-256 output
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HmacDigest([u8; DIGEST_LEN]);

impl HmacDigest {
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }
}

impl fmt::Debug for HmacDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HmacDigest({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for HmacDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for HmacDigest {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim())
            .map_err(|e| GameError::crypto(format!("digest is not valid hex: {}", e)))?;
        let bytes: [u8; DIGEST_LEN] = bytes.try_into().map_err(|b: Vec<u8>| {
            GameError::crypto(format!(
                "digest must be {} bytes, got {}",
                DIGEST_LEN,
                b.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for HmacDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HmacDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// HMAC over SHA3-256 keyed with the hex form of a random key
pub struct HmacSha3;

impl CommitmentScheme for HmacSha3 {
    type Key = SecretKey;
    type Digest = HmacDigest;

    fn generate_key<R: RngCore + CryptoRng>(rng: &mut R, len: usize) -> Result<SecretKey> {
        if !(MIN_KEY_LEN..=MAX_KEY_LEN).contains(&len) {
            return Err(GameError::crypto(format!(
                "key length must be {}..={} bytes, got {}",
                MIN_KEY_LEN, MAX_KEY_LEN, len
            )));
        }

        let mut bytes = vec![0u8; len];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| GameError::crypto(format!("random source failed: {}", e)))?;
        SecretKey::from_bytes(bytes)
    }

    fn commit(key: &SecretKey, message: &[u8]) -> Result<HmacDigest> {
        let mut mac = keyed_mac(key)?;
        mac.update(message);
        Ok(HmacDigest(mac.finalize().into_bytes().into()))
    }

    fn verify(key: &SecretKey, message: &[u8], digest: &HmacDigest) -> bool {
        match keyed_mac(key) {
            Ok(mut mac) => {
                mac.update(message);
                mac.verify_slice(digest.as_bytes()).is_ok()
            }
            Err(_) => false,
        }
    }
}

fn keyed_mac(key: &SecretKey) -> Result<HmacSha3_256> {
    <HmacSha3_256 as Mac>::new_from_slice(key.to_hex().as_bytes())
        .map_err(|e| GameError::crypto(format!("HMAC key setup failed: {}", e)))
}

/// Fresh 256-bit key from the OS random source
pub fn generate_key() -> Result<SecretKey> {
    HmacSha3::generate_key(&mut OsRng, MIN_KEY_LEN)
}

/// Digest binding `chosen_move` to `key`
pub fn commit(key: &SecretKey, chosen_move: &str) -> Result<HmacDigest> {
    HmacSha3::commit(key, chosen_move.as_bytes())
}

/// Check a revealed key and move against a published digest
pub fn verify(key: &SecretKey, chosen_move: &str, digest: &HmacDigest) -> bool {
    HmacSha3::verify(key, chosen_move.as_bytes(), digest)
}

/// A round's commitment: the published digest plus the key held back until reveal
#[derive(Debug, Clone)]
pub struct Commitment {
    digest: HmacDigest,
    key: SecretKey,
    created_at: DateTime<Utc>,
}

impl Commitment {
    pub fn create<R: RngCore + CryptoRng>(
        rng: &mut R,
        key_len: usize,
        chosen_move: &str,
    ) -> Result<Self> {
        let key = HmacSha3::generate_key(rng, key_len)?;
        let digest = commit(&key, chosen_move)?;

        Ok(Self {
            digest,
            key,
            created_at: Utc::now(),
        })
    }

    pub fn digest(&self) -> &HmacDigest {
        &self.digest
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Give up the key. Consumes the commitment so the round cannot reuse it.
    pub fn reveal(self) -> SecretKey {
        self.key
    }
}
