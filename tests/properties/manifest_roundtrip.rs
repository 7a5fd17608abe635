//! Property tests for encoding and decoding.

use proptest::prelude::*;

use swmanifest::{decode, encode, Manifest, ManifestFormat, ValidationPolicy};

use crate::strategies::{algorithm, build, site, version};

fn format() -> impl Strategy<Value = ManifestFormat> {
    prop_oneof![Just(ManifestFormat::Json), Just(ManifestFormat::Script)]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Encoding then decoding yields the same manifest in either format.
    #[test]
    fn property_encode_decode_round_trip(
        site in site(),
        algorithm in algorithm(),
        version in version(),
        format in format(),
    ) {
        let manifest = build(&site, &algorithm, &version);
        let text = encode(&manifest, format).unwrap();

        let decoded = decode(&text).unwrap();
        prop_assert_eq!(decoded.format, format);
        prop_assert!(decoded.unknown_fields.is_empty());

        let (back, report) = Manifest::from_document(&decoded.document, &ValidationPolicy::default()).unwrap();
        prop_assert!(!report.has_errors());
        prop_assert_eq!(back, manifest);
    }

    /// PROPERTY: Converting between formats and back is byte-stable.
    #[test]
    fn property_convert_is_stable(
        site in site(),
        algorithm in algorithm(),
        version in version(),
    ) {
        let manifest = build(&site, &algorithm, &version);
        let script = encode(&manifest, ManifestFormat::Script).unwrap();

        let (via_json, _) = Manifest::from_document(
            &decode(&encode(&manifest, ManifestFormat::Json).unwrap()).unwrap().document,
            &ValidationPolicy::permissive(),
        ).unwrap();
        prop_assert_eq!(encode(&via_json, ManifestFormat::Script).unwrap(), script);
    }

    /// PROPERTY: Restamping is idempotent and only depends on the entries.
    #[test]
    fn property_restamp_ignores_old_version(
        site in site(),
        algorithm in algorithm(),
        a in version(),
        b in version(),
    ) {
        let first = build(&site, &algorithm, &a).restamped();
        let second = build(&site, &algorithm, &b).restamped();
        prop_assert_eq!(first.version(), second.version());
        prop_assert_eq!(first.restamped(), first);
    }
}
