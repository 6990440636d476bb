//! Piece content identifier using Blake3.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte content identifier for a piece of deal data.
///
/// The piece CID is the key a shard is registered under in the archive
/// index. Deals that predate content addressing carry no piece CID.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceCid([u8; 32]);

impl PieceCid {
    /// Size of the digest in bytes.
    pub const BYTES: usize = 32;

    /// Derive a piece CID from the piece payload.
    pub fn from_data(data: &[u8]) -> Self {
        let hash = blake3::hash(data);
        Self(*hash.as_bytes())
    }

    /// Wrap an existing digest without hashing.
    pub fn from_digest(digest: [u8; 32]) -> Self {
        Self(digest)
    }

    /// Parse a piece CID from its hex form.
    pub fn from_hex(hex: &str) -> Result<Self, CidParseError> {
        if hex.len() != 64 {
            return Err(CidParseError::InvalidLength {
                expected: 64,
                actual: hex.len(),
            });
        }

        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex, &mut bytes).map_err(|_| CidParseError::InvalidHex)?;

        Ok(Self(bytes))
    }

    /// Hex encoding of the digest.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Get bytes as slice reference.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for PieceCid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "PieceCid({}..{})", &hex[..8], &hex[56..])
    }
}

impl fmt::Display for PieceCid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for PieceCid {
    type Err = CidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Errors that can occur when parsing a piece CID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CidParseError {
    /// Invalid hex string length.
    #[error("Invalid piece CID length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Invalid hex characters.
    #[error("Invalid piece CID hex")]
    InvalidHex,
}
