//! Golden vectors for the BGVP derivation tree.
//!
//! These values pin the wire contract (HMAC-SHA512, the three domain tags,
//! compressed secp256k1 keys). Any conforming implementation must reproduce
//! them byte for byte; a change here is a breaking change.
//!
//! Run with: cargo test --test derivation_vectors

use bgvp_core::seed::parse_mnemonic;
use bgvp_core::{root_key, root_key_from_entropy, DerivableKey};

const MOTION_1: &str = "motion_1_txid_this_would_be_a_b64_encoded_string";

const TEST_MNEMONIC: &str =
    "letter advice cage absurd amount doctor acoustic avoid letter advice cage above";

fn zero_root() -> DerivableKey {
    DerivableKey::from_seed(&[0u8; 64]).unwrap()
}

struct Vector {
    path: &'static [&'static str],
    seed: &'static str,
    public_key: &'static str,
    symmetric_key: &'static str,
}

const ZERO_SEED_VECTORS: &[Vector] = &[
    Vector {
        path: &[],
        seed: "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
        public_key: "03e89ee84f11d20379fdda09c447f0d1d3b6ef88541846a47dee1d54975829a8eb",
        symmetric_key: "f344fe34e4e2b68087430b94d73c83a76cb3762f3b825bdf3ff4267e428d3a41",
    },
    Vector {
        path: &["Bis_test_address1"],
        seed: "6914be0294830ba2bd857edd74a7b520e20489831d17c0c0cf0ac1187488253337eb5d20fcc2fc7284fe56e1d1291634446bb1f7e25c517b004d972b6d47f0b1",
        public_key: "038d583c5b49e524c8d68c5c8d34bbb1d619b93f570be9a0937525c3ae71d8f095",
        symmetric_key: "f670a8ce94d4694d47e8ebb1779d6960c5615b32c85e306c60e75d0024bed52c",
    },
    Vector {
        path: &["Bis_test_address1", MOTION_1],
        seed: "573108ce7c42f22b2bfaecf76743bc102cd80e5e78c1235966c11aec2e7bec2bc6e1f284a8e3cf1c5d7b02fa6d9672424659f9c7efbd36a07df6e4885722d515",
        public_key: "03e2d1d9e50d1e44e862b9dd45ce69d9ac13aa37533567e58723c274e242198b23",
        symmetric_key: "859d7338ff29e21bcd30a33520cf22f372d4c1b3b8637d39faed4b46d040a971",
    },
];

#[test]
fn test_zero_seed_vectors() {
    let root = zero_root();
    for vector in ZERO_SEED_VECTORS {
        let key = root.derive_path(vector.path).unwrap();
        assert_eq!(hex::encode(key.seed()), vector.seed, "seed for {:?}", vector.path);
        assert_eq!(
            hex::encode(key.to_public_key().unwrap()),
            vector.public_key,
            "public key for {:?}",
            vector.path
        );
        assert_eq!(
            hex::encode(key.to_symmetric_key().unwrap().as_bytes()),
            vector.symmetric_key,
            "symmetric key for {:?}",
            vector.path
        );
    }
}

/// Re-running the scenario many times must reproduce identical bytes.
#[test]
fn test_scenario_is_reproducible() {
    let expected = &ZERO_SEED_VECTORS[1];
    for _ in 0..50 {
        let child = zero_root().derive("Bis_test_address1").unwrap();
        assert_eq!(hex::encode(child.seed()), expected.seed);
        assert_eq!(hex::encode(child.to_public_key().unwrap()), expected.public_key);
    }
}

#[test]
fn test_mnemonic_tree_vectors() {
    let root = root_key(&parse_mnemonic(TEST_MNEMONIC).unwrap(), "");
    assert_eq!(
        hex::encode(root.seed()),
        "77d6be9708c8218738934f84bbbb78a2e048ca007746cb764f0673e4b1812d176bbb173e1a291f31cf633f1d0bad7d3cf071c30e98cd0688b5bcce65ecaceb36"
    );

    let address = root.derive("Bis_test_address1").unwrap();
    assert_eq!(
        hex::encode(address.seed()),
        "22081889c7439b6c48e4199f9c454d102cbb986c81ca51b62c3e8fa67b7a642a9b6cb080cbbdd834d79d5afe7fd0b9eba2bea9348cd02563b68e28a885ea100b"
    );
    assert_eq!(
        hex::encode(address.to_public_key().unwrap()),
        "03d277c7fa97f7293ef3ca6827ca23923dd91908d578f5b8a4376aba57acdc57ac"
    );
    assert_eq!(
        hex::encode(address.to_symmetric_key().unwrap().as_bytes()),
        "665c929c082eab33cd052a9cf4860768879a23afc6dfad30e83b7da06c5fa748"
    );
}

#[test]
fn test_entropy_and_mnemonic_roots_agree() {
    let from_entropy = root_key_from_entropy(&[0x80u8; 16], "").unwrap();
    let from_words = root_key(&parse_mnemonic(TEST_MNEMONIC).unwrap(), "");
    assert_eq!(
        from_entropy.derive(MOTION_1).unwrap().to_public_key().unwrap(),
        from_words.derive(MOTION_1).unwrap().to_public_key().unwrap()
    );
}

/// Sibling addresses and motions all land on distinct public keys.
#[test]
fn test_voting_tree_shape() {
    let root = zero_root();
    let mut pubkeys = Vec::new();
    for address in ["Bis_test_address1", "Bis_test_address2"] {
        let address_key = root.derive(address).unwrap();
        pubkeys.push(address_key.to_public_key().unwrap());
        for motion in ["motion_1", "motion_2"] {
            pubkeys.push(address_key.derive(motion).unwrap().to_public_key().unwrap());
        }
    }
    let mut deduped = pubkeys.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), pubkeys.len());
}
