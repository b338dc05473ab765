//! Label-keyed hierarchical key derivation
//!
//! A [`DerivableKey`] wraps a secret seed. Children are addressed by
//! arbitrary string labels instead of BIP-32 numeric indices, and every node
//! can be projected to a secp256k1 public key or a 32-byte symmetric key.
//!
//! # Wire contract
//!
//! All three operations are HMAC-SHA512 keyed by the node's seed, each with
//! its own domain-separation tag:
//!
//! ```text
//! child_seed    = HMAC-SHA512(seed, "BGVP_DERIVE_V1" || utf8(label))
//! scalar        = HMAC-SHA512(seed, "BGVP_PUBKEY_V1")[..32]
//! public_key    = compressed SEC1 encoding of scalar * G
//! symmetric_key = HMAC-SHA512(seed, "BGVP_SYMMETRIC_V1")[..32]
//! ```
//!
//! The tags diverge within their first six bytes, so a derive message can
//! never equal a projection message. Changing any tag, the digest, the curve
//! or the encodings breaks compatibility with every existing tree.

use std::fmt;

use hmac::{Hmac, Mac};
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use sha2::Sha512;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Minimum root seed length in bytes (a BIP-39 seed).
pub const MIN_SEED_LEN: usize = 64;

/// Length of every derived child seed (one HMAC-SHA512 output).
pub const CHILD_SEED_LEN: usize = 64;

/// Length of a compressed SEC1 public key.
pub const PUBLIC_KEY_LEN: usize = 33;

/// Length of an uncompressed SEC1 public key.
pub const UNCOMPRESSED_PUBLIC_KEY_LEN: usize = 65;

/// Length of the symmetric projection (AES-256 key size).
pub const SYMMETRIC_KEY_LEN: usize = 32;

/// Domain-separation tag for child derivation
pub const DERIVE_TAG: &[u8] = b"BGVP_DERIVE_V1";

/// Domain-separation tag for the public-key projection
pub const PUBKEY_TAG: &[u8] = b"BGVP_PUBKEY_V1";

/// Domain-separation tag for the symmetric-key projection
pub const SYMMETRIC_TAG: &[u8] = b"BGVP_SYMMETRIC_V1";

type HmacSha512 = Hmac<Sha512>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Invalid seed length: expected at least {min} bytes, got {actual}")]
    InvalidSeedLength { min: usize, actual: usize },
    #[error("Seed does not map to a valid secp256k1 private key")]
    InvalidScalar,
    #[error("Cryptographic primitive unavailable: {0}")]
    PrimitiveUnavailable(String),
}

/// A node in a label-keyed derivation tree.
///
/// Immutable once constructed. The seed is owned exclusively by this value
/// and zeroized when it is dropped; `Clone` makes an independent copy.
#[derive(Clone)]
pub struct DerivableKey {
    seed: Zeroizing<Vec<u8>>,
}

impl DerivableKey {
    /// Wrap root seed bytes.
    ///
    /// Seeds shorter than [`MIN_SEED_LEN`] are rejected. Longer seeds are
    /// accepted and used whole as the HMAC key.
    pub fn from_seed(seed: &[u8]) -> Result<Self, KeyError> {
        if seed.len() < MIN_SEED_LEN {
            return Err(KeyError::InvalidSeedLength {
                min: MIN_SEED_LEN,
                actual: seed.len(),
            });
        }
        Ok(Self {
            seed: Zeroizing::new(seed.to_vec()),
        })
    }

    /// Raw seed bytes of this node.
    ///
    /// Needed for backups and cross-implementation checks. Anything the
    /// caller does with these bytes (printing, persisting) is outside the
    /// zeroize-on-drop guarantee.
    pub fn seed(&self) -> &[u8] {
        &self.seed
    }

    /// Derive the child addressed by `label`.
    ///
    /// The label is hashed as its UTF-8 bytes with no Unicode normalization:
    /// `"\u{e9}"` (NFC) and `"e\u{301}"` (NFD) render the same but derive
    /// different children. Normalize before calling if that matters.
    ///
    /// The empty label is valid and yields a child distinct from `self`.
    pub fn derive(&self, label: &str) -> Result<Self, KeyError> {
        self.derive_bytes(label.as_bytes())
    }

    /// Derive the child addressed by an arbitrary byte label.
    pub fn derive_bytes(&self, label: &[u8]) -> Result<Self, KeyError> {
        let child = hmac_sha512(&self.seed, &[DERIVE_TAG, label])?;
        Ok(Self {
            seed: Zeroizing::new(child.to_vec()),
        })
    }

    /// Apply `derive` for each label in order.
    ///
    /// An empty path returns a copy of `self`.
    pub fn derive_path<I>(&self, labels: I) -> Result<Self, KeyError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut current = self.clone();
        for label in labels {
            current = current.derive(label.as_ref())?;
        }
        Ok(current)
    }

    /// The secp256k1 private key this node projects to.
    pub fn secret_key(&self) -> Result<SecretKey, KeyError> {
        let digest = hmac_sha512(&self.seed, &[PUBKEY_TAG])?;
        parse_scalar(&digest[..32])
    }

    /// The secp256k1 public key this node projects to.
    pub fn public_key(&self) -> Result<PublicKey, KeyError> {
        let secp = Secp256k1::signing_only();
        let secret_key = self.secret_key()?;
        Ok(PublicKey::from_secret_key(&secp, &secret_key))
    }

    /// Compressed SEC1 encoding of [`Self::public_key`] (33 bytes).
    pub fn to_public_key(&self) -> Result<[u8; PUBLIC_KEY_LEN], KeyError> {
        Ok(self.public_key()?.serialize())
    }

    /// Uncompressed SEC1 encoding of [`Self::public_key`] (65 bytes).
    pub fn to_public_key_uncompressed(
        &self,
    ) -> Result<[u8; UNCOMPRESSED_PUBLIC_KEY_LEN], KeyError> {
        Ok(self.public_key()?.serialize_uncompressed())
    }

    /// 32-byte symmetric key for authenticated encryption.
    pub fn to_symmetric_key(&self) -> Result<SymmetricKey, KeyError> {
        let digest = hmac_sha512(&self.seed, &[SYMMETRIC_TAG])?;
        let mut key = [0u8; SYMMETRIC_KEY_LEN];
        key.copy_from_slice(&digest[..SYMMETRIC_KEY_LEN]);
        Ok(SymmetricKey(key))
    }
}

impl From<[u8; MIN_SEED_LEN]> for DerivableKey {
    fn from(mut seed: [u8; MIN_SEED_LEN]) -> Self {
        let key = Self {
            seed: Zeroizing::new(seed.to_vec()),
        };
        seed.zeroize();
        key
    }
}

impl fmt::Debug for DerivableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivableKey")
            .field("seed", &"[REDACTED]")
            .field("seed_len", &self.seed.len())
            .finish()
    }
}

/// Symmetric projection of a [`DerivableKey`]. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; SYMMETRIC_KEY_LEN]);

impl SymmetricKey {
    pub fn as_bytes(&self) -> &[u8; SYMMETRIC_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> Result<Zeroizing<[u8; 64]>, KeyError> {
    let mut mac = <HmacSha512 as Mac>::new_from_slice(key)
        .map_err(|e| KeyError::PrimitiveUnavailable(e.to_string()))?;
    for part in parts {
        mac.update(part);
    }
    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

/// Zero and values >= the curve order are rejected, never reduced.
fn parse_scalar(bytes: &[u8]) -> Result<SecretKey, KeyError> {
    SecretKey::from_slice(bytes).map_err(|_| KeyError::InvalidScalar)
}
