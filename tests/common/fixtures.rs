//! Reusable sites and manifests.

use swmanifest::{encode, AssetUrl, ContentHash, HashAlgorithm, Manifest, ManifestFormat};

use super::TestEnv;

/// A small published app: (url, content)
pub const SITE: &[(&str, &str)] = &[
    ("index.html", "<!DOCTYPE html><html></html>"),
    ("css/app.css", "body { margin: 0; }"),
    ("_framework/blazor.webassembly.js", "/* loader */"),
    ("_framework/dotnet.wasm", "\0asm-binary"),
];

pub fn sha256(content: &str) -> ContentHash {
    ContentHash::compute(&HashAlgorithm::Sha256, content.as_bytes()).unwrap()
}

pub fn manifest(version: &str, assets: &[(&str, &str)]) -> Manifest {
    assets
        .iter()
        .fold(Manifest::builder(), |b, (url, content)| {
            b.asset(sha256(content), AssetUrl::parse(url).unwrap())
        })
        .version(version)
        .build()
        .unwrap()
}

pub fn script(version: &str, assets: &[(&str, &str)]) -> String {
    encode(&manifest(version, assets), ManifestFormat::Script).unwrap()
}

pub fn json(version: &str, assets: &[(&str, &str)]) -> String {
    encode(&manifest(version, assets), ManifestFormat::Json).unwrap()
}

/// Write `SITE` under `wwwroot/` plus its script manifest; returns the manifest path
pub fn publish_site(env: &TestEnv) -> String {
    for (url, content) in SITE {
        env.write(&format!("wwwroot/{url}"), content);
    }
    env.write("wwwroot/service-worker-assets.js", script("v1", SITE));
    "wwwroot/service-worker-assets.js".to_string()
}
