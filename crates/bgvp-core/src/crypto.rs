//! Ballot encryption
//!
//! Vote options are sealed with AES-256-GCM under the symmetric projection of
//! a leaf key (typically `root / address / motion`).
//!
//! # Security Notes
//!
//! - Each encryption uses a fresh random nonce
//! - The plaintext is length-prefixed and zero-padded to a 16-byte bucket,
//!   so ciphertext length does not reveal the exact vote length
//! - Any tampering with nonce or ciphertext fails authentication

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::derivable::SymmetricKey;

/// Nonce length for AES-256-GCM
const NONCE_LEN: usize = 12;

/// GCM authentication tag length
const TAG_LEN: usize = 16;

/// Plaintext is padded to a multiple of this
pub const PAD_BLOCK: usize = 16;

/// Length prefix in front of the vote bytes
const LEN_PREFIX: usize = 2;

/// Largest vote that fits the u16 length prefix
pub const MAX_VOTE_LEN: usize = u16::MAX as usize;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),
    #[error("Invalid ciphertext format")]
    InvalidFormat,
    #[error("Vote too long: {0} bytes (max {max})", max = MAX_VOTE_LEN)]
    VoteTooLong(usize),
}

/// Encrypted ballot format:
/// [nonce (12 bytes)][ciphertext (padded plaintext + 16 byte tag)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedBallot {
    nonce: [u8; NONCE_LEN],
    ciphertext: Vec<u8>,
}

impl EncryptedBallot {
    /// Serialize to bytes: nonce || ciphertext
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(NONCE_LEN + self.ciphertext.len());
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    /// Deserialize from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        // Minimum size: nonce + one padding block + tag
        if bytes.len() < NONCE_LEN + PAD_BLOCK + TAG_LEN {
            return Err(CryptoError::InvalidFormat);
        }
        if (bytes.len() - NONCE_LEN - TAG_LEN) % PAD_BLOCK != 0 {
            return Err(CryptoError::InvalidFormat);
        }

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&bytes[..NONCE_LEN]);

        Ok(Self {
            nonce,
            ciphertext: bytes[NONCE_LEN..].to_vec(),
        })
    }

    /// Total serialized length
    pub fn len(&self) -> usize {
        NONCE_LEN + self.ciphertext.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ciphertext.is_empty()
    }
}

/// Encrypt a vote option under a leaf's symmetric key
pub fn encrypt_ballot(key: &SymmetricKey, vote: &str) -> Result<EncryptedBallot, CryptoError> {
    let plaintext = frame(vote.as_bytes())?;

    let nonce_arr = Aes256Gcm::generate_nonce(&mut OsRng);
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&nonce_arr);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_slice())
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    Ok(EncryptedBallot { nonce, ciphertext })
}

/// Decrypt a ballot
///
/// # Errors
/// Returns error if the key is wrong, the ballot was tampered with, or the
/// decrypted framing is malformed
pub fn decrypt_ballot(key: &SymmetricKey, ballot: &EncryptedBallot) -> Result<String, CryptoError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let plaintext = Zeroizing::new(
        cipher
            .decrypt(Nonce::from_slice(&ballot.nonce), ballot.ciphertext.as_slice())
            .map_err(|_| {
                CryptoError::DecryptionFailed("Wrong key or corrupted ballot".to_string())
            })?,
    );

    let vote = unframe(&plaintext)?;
    String::from_utf8(vote.to_vec())
        .map_err(|_| CryptoError::DecryptionFailed("Vote is not valid UTF-8".to_string()))
}

/// len (u16 BE) || vote || zeros, rounded up to PAD_BLOCK
fn frame(vote: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if vote.len() > MAX_VOTE_LEN {
        return Err(CryptoError::VoteTooLong(vote.len()));
    }
    let used = LEN_PREFIX + vote.len();
    let padded = used.div_ceil(PAD_BLOCK) * PAD_BLOCK;

    let mut buf = Zeroizing::new(Vec::with_capacity(padded));
    buf.extend_from_slice(&(vote.len() as u16).to_be_bytes());
    buf.extend_from_slice(vote);
    buf.resize(padded, 0);
    Ok(buf)
}

fn unframe(plaintext: &[u8]) -> Result<&[u8], CryptoError> {
    if plaintext.len() < LEN_PREFIX {
        return Err(CryptoError::InvalidFormat);
    }
    let len = u16::from_be_bytes([plaintext[0], plaintext[1]]) as usize;
    let body = &plaintext[LEN_PREFIX..];
    if len > body.len() || body[len..].iter().any(|&b| b != 0) {
        return Err(CryptoError::InvalidFormat);
    }
    Ok(&body[..len])
}
