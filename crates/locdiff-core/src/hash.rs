//! Block identities
//!
//! Hashes are compared for equality only. BLAKE3 is used because it is fast
//! and already part of the stack; nothing relies on it being cryptographic.

use serde::{Deserialize, Serialize};

/// 32-byte content hash of a block's canonical serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First 12 hex characters, enough to tell blocks apart in logs
    pub fn short(&self) -> String {
        hex::encode(&self.0[..6])
    }

    pub fn from_hex(hex: &str) -> Result<Self, String> {
        let bytes = hex::decode(hex).map_err(|_| "Invalid hex format".to_string())?;
        if bytes.len() != 32 {
            return Err("Invalid hash length: expected 32 bytes".to_string());
        }
        let mut array = [0u8; 32];
        array.copy_from_slice(&bytes);
        Ok(Self(array))
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for ContentHash {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Hash one canonical string
pub fn hash_str(canonical: &str) -> ContentHash {
    ContentHash(*blake3::hash(canonical.as_bytes()).as_bytes())
}

/// Hash the concatenation of several canonical strings without building it
pub fn hash_concat<'a, I>(parts: I) -> ContentHash
where
    I: IntoIterator<Item = &'a str>,
{
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    ContentHash(*hasher.finalize().as_bytes())
}
