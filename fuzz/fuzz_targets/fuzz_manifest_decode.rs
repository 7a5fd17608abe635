#![no_main]

use libfuzzer_sys::fuzz_target;
use swmanifest::{decode, encode, Manifest, ValidationPolicy};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Decoding must never panic; anything accepted must re-encode and decode again
        if let Ok(decoded) = decode(text) {
            if let Ok((manifest, _)) =
                Manifest::from_document(&decoded.document, &ValidationPolicy::permissive())
            {
                let again = encode(&manifest, decoded.format).expect("encode valid manifest");
                let back = decode(&again).expect("decode re-encoded manifest");
                assert_eq!(back.document, manifest.to_document());
            }
        }
    }
});
