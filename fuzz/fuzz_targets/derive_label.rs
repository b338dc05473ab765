#![no_main]

use bgvp_core::{DerivableKey, CHILD_SEED_LEN, MIN_SEED_LEN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First MIN_SEED_LEN bytes are the seed, the rest is the label.
    // Short input must be rejected, never panic.
    let (seed, label) = data.split_at(data.len().min(MIN_SEED_LEN));
    let Ok(root) = DerivableKey::from_seed(seed) else {
        assert!(data.len() < MIN_SEED_LEN);
        return;
    };

    let child = root.derive_bytes(label).expect("HMAC accepts any key length");
    assert_eq!(child.seed().len(), CHILD_SEED_LEN);

    // Same input, same child
    let again = root.derive_bytes(label).expect("HMAC accepts any key length");
    assert_eq!(child.seed(), again.seed());

    // InvalidScalar is a reportable outcome, not a crash
    let _ = child.to_public_key();
    let _ = child.to_symmetric_key();
});
