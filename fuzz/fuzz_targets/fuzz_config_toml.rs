#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // TOML config parsing should never panic
        if let Ok(config) = toml::from_str::<swmanifest::Config>(content) {
            let _ = config.validation_policy();
        }
    }
});
