//! BIP-39 seed adapter
//!
//! Turns mnemonics (or raw entropy) into root [`DerivableKey`]s. Word lists,
//! checksums and PBKDF2 stretching all come from the `bip39` crate.

use bip39::{Language, Mnemonic};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::derivable::DerivableKey;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),
    #[error("Invalid entropy: {0}")]
    InvalidEntropy(String),
}

/// Supported mnemonic lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    /// 12 words, 128 bits of entropy
    Twelve,
    /// 24 words, 256 bits of entropy
    TwentyFour,
}

impl WordCount {
    pub fn words(self) -> usize {
        match self {
            Self::Twelve => 12,
            Self::TwentyFour => 24,
        }
    }
}

/// Generate a new English BIP-39 mnemonic
pub fn generate_mnemonic(count: WordCount) -> Result<Mnemonic, SeedError> {
    Mnemonic::generate_in(Language::English, count.words())
        .map_err(|e| SeedError::InvalidMnemonic(e.to_string()))
}

/// Parse a mnemonic from words
pub fn parse_mnemonic(words: &str) -> Result<Mnemonic, SeedError> {
    Mnemonic::parse_in(Language::English, words)
        .map_err(|e| SeedError::InvalidMnemonic(e.to_string()))
}

/// Build the mnemonic that encodes `entropy` (16, 20, 24, 28 or 32 bytes)
pub fn mnemonic_from_entropy(entropy: &[u8]) -> Result<Mnemonic, SeedError> {
    Mnemonic::from_entropy_in(Language::English, entropy)
        .map_err(|e| SeedError::InvalidEntropy(e.to_string()))
}

/// Derive seed bytes from mnemonic (with optional passphrase)
pub fn derive_seed(mnemonic: &Mnemonic, passphrase: &str) -> Zeroizing<[u8; 64]> {
    Zeroizing::new(mnemonic.to_seed(passphrase))
}

/// Root of the derivation tree for `mnemonic` + `passphrase`.
///
/// The same pair always regenerates the same tree.
pub fn root_key(mnemonic: &Mnemonic, passphrase: &str) -> DerivableKey {
    let seed = derive_seed(mnemonic, passphrase);
    DerivableKey::from(*seed)
}

/// Root key straight from mnemonic entropy.
pub fn root_key_from_entropy(entropy: &[u8], passphrase: &str) -> Result<DerivableKey, SeedError> {
    let mnemonic = mnemonic_from_entropy(entropy)?;
    Ok(root_key(&mnemonic, passphrase))
}
