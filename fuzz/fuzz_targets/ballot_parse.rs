#![no_main]

use bgvp_core::{decrypt_ballot, DerivableKey, EncryptedBallot};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // EncryptedBallot::from_bytes must never panic; it should always return Ok or Err.
    let Ok(ballot) = EncryptedBallot::from_bytes(data) else {
        return;
    };

    // Round-trip serialization is exact
    assert_eq!(ballot.to_bytes(), data);

    // Decrypting attacker-controlled bytes must fail cleanly
    let key = DerivableKey::from([0u8; 64])
        .to_symmetric_key()
        .expect("HMAC accepts any key length");
    let _ = decrypt_ballot(&key, &ballot);
});
