//! Property tests for decoder and hash parser robustness.

use proptest::prelude::*;

use swmanifest::{decode, AssetUrl, ContentHash, HashAlgorithm};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: decode never panics on arbitrary text.
    #[test]
    fn property_decode_never_panics(text in ".{0,256}") {
        let _ = decode(&text);
    }

    /// PROPERTY: decode never panics on near-miss script text.
    #[test]
    fn property_decode_script_prefix_never_panics(body in "[{}\\[\\]\":,a-z0-9 \n]{0,128}") {
        let _ = decode(&format!("self.assetsManifest = {};", body));
    }

    /// PROPERTY: the hash and url parsers never panic.
    #[test]
    fn property_value_parsers_never_panic(s in ".{0,96}") {
        let _ = ContentHash::parse(&s);
        let _ = AssetUrl::parse(&s);
    }

    /// PROPERTY: a computed hash always parses back to itself.
    #[test]
    fn property_computed_hash_parses(content in proptest::collection::vec(any::<u8>(), 0..256)) {
        for algorithm in [HashAlgorithm::Sha256, HashAlgorithm::Sha384, HashAlgorithm::Sha512] {
            let hash = ContentHash::compute(&algorithm, &content).unwrap();
            let parsed = ContentHash::parse(hash.as_str()).unwrap();
            prop_assert!(parsed.matches(&hash));
            prop_assert_eq!(parsed.algorithm(), &algorithm);
        }
    }
}
