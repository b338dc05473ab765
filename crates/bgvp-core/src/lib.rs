//! BGVP Core
//!
//! Label-keyed hierarchical key derivation for the Bismuth Governance Voting
//! Protocol.
//!
//! # Key Derivation
//!
//! From a single 64-byte seed (usually BIP-39):
//! - Children are addressed by string labels: `root / "address" / "motion"`
//! - Every node projects to a secp256k1 public key and an AES-256 key
//!
//! # Ballots
//!
//! Votes are sealed with AES-256-GCM under a leaf's symmetric key.

pub mod crypto;
pub mod derivable;
pub mod seed;

pub use crypto::{decrypt_ballot, encrypt_ballot, CryptoError, EncryptedBallot};
pub use derivable::*;
pub use seed::{root_key, root_key_from_entropy, SeedError, WordCount};
