//! Shared generators.

use std::collections::BTreeMap;

use proptest::prelude::*;

use swmanifest::{AssetUrl, ContentHash, HashAlgorithm, Manifest};

/// A relative url with 1..=3 segments, slashes included
pub fn asset_url() -> impl Strategy<Value = String> {
    proptest::collection::vec("[A-Za-z0-9_][A-Za-z0-9_.\\-]{0,12}", 1..=3)
        .prop_map(|segments| segments.join("/"))
        .prop_filter("no parent segments", |u| AssetUrl::parse(u).is_ok())
}

pub fn algorithm() -> impl Strategy<Value = HashAlgorithm> {
    prop_oneof![
        Just(HashAlgorithm::Sha256),
        Just(HashAlgorithm::Sha384),
        Just(HashAlgorithm::Sha512),
    ]
}

/// url -> content, unique urls
pub fn site() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    proptest::collection::btree_map(asset_url(), proptest::collection::vec(any::<u8>(), 0..32), 0..12)
}

pub fn version() -> impl Strategy<Value = String> {
    "[A-Za-z0-9+/=]{1,16}"
}

pub fn build(site: &BTreeMap<String, Vec<u8>>, algorithm: &HashAlgorithm, version: &str) -> Manifest {
    site.iter()
        .fold(Manifest::builder(), |b, (url, content)| {
            b.asset(
                ContentHash::compute(algorithm, content).unwrap(),
                AssetUrl::parse(url).unwrap(),
            )
        })
        .version(version)
        .build()
        .unwrap()
}
