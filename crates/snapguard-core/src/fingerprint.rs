//! Content-addressed naming for baselines.
//!
//! A fingerprint is the SHA-1 of an [`Identity`]'s canonical string. It is
//! the only key the store knows about, so two runs share a baseline exactly
//! when their origin, path, filtered parameters and suffix all match.
//!
//! ## Determinism Guarantees
//!
//! - Same identity → same fingerprint (no randomness, no reordering)
//! - Different suffix → different fingerprint
//! - Control key never participates

use crate::errors::{Result, SnapguardError};
use crate::identity::Identity;
use sha1::{Digest, Sha1};
use std::str::FromStr;

/// A SHA-1 fingerprint (20 bytes)
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Fingerprint([u8; 20]);

impl Fingerprint {
    /// Length of the hex form
    pub const HEX_LEN: usize = 40;

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Fingerprint of an identity.
    pub fn of(identity: &Identity) -> Self {
        hash_str(&identity.canonical_string())
    }

    /// Lowercase hex form; also the baseline's file name.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from 40 hex characters (either case).
    pub fn from_hex(value: &str) -> Result<Self> {
        if value.len() != Self::HEX_LEN {
            return Err(SnapguardError::InvalidFingerprint {
                value: value.to_string(),
                reason: format!(
                    "expected {} hex characters, got {}",
                    Self::HEX_LEN,
                    value.len()
                ),
            });
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(value, &mut bytes).map_err(|e| {
            SnapguardError::InvalidFingerprint {
                value: value.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self(bytes))
    }
}

impl std::fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Fingerprint {
    type Err = SnapguardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

/// Fingerprint of an identity. Same as [`Fingerprint::of`].
pub fn fingerprint(identity: &Identity) -> Fingerprint {
    Fingerprint::of(identity)
}

/// SHA-1 of the UTF-8 bytes of `input`.
pub fn hash_str(input: &str) -> Fingerprint {
    let mut hasher = Sha1::new();
    hasher.update(input.as_bytes());
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hasher.finalize());
    Fingerprint(bytes)
}
