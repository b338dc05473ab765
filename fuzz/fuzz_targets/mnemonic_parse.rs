#![no_main]

use bgvp_core::seed::{parse_mnemonic, root_key};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Try parsing arbitrary bytes as a UTF-8 string, then as a BIP-39 mnemonic.
    // parse_mnemonic must never panic; it should always return Ok or Err.
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(mnemonic) = parse_mnemonic(s) {
            let _ = root_key(&mnemonic, "").to_public_key();
        }
    }
});
