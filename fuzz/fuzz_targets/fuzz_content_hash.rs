#![no_main]

use libfuzzer_sys::fuzz_target;
use swmanifest::{AssetUrl, ContentHash};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(hash) = ContentHash::parse(s) {
            assert_eq!(hash.as_str(), s);
        }
        let _ = AssetUrl::parse(s);
    }
});
