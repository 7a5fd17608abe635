mod common;

use common::*;

#[test]
fn check_accepts_published_manifest() {
    let env = TestEnv::new();
    let manifest = publish_site(&env);

    let result = env.run(&["check", &manifest]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("is valid"), "{}", result.stdout);
    assert!(result.stdout.contains("4 assets, version v1, script format"));
}

#[test]
fn check_fails_with_exit_code_one_on_violations() {
    let env = TestEnv::new();
    env.write(
        "bad.json",
        r#"{"assets":[{"hash":"sha256-AAAA","url":"a.js"},{"hash":"sha1-x","url":"a.js"}],"version":""}"#,
    );

    let result = env.run(&["check", "bad.json"]);

    assert_eq!(result.exit_code, 1, "{}", result.combined_output());
    assert!(result.stdout.contains("[hash-length]"), "{}", result.stdout);
    assert!(result.stdout.contains("[duplicate-url]"));
    assert!(result.stdout.contains("[missing-version]"));
}

#[test]
fn check_strict_fails_on_duplicate_hash_warning() {
    let env = TestEnv::new();
    env.write(
        "sw.js",
        script("v1", &[("a.js", "same"), ("copy/a.js", "same")]),
    );

    assert!(env.run(&["check", "sw.js"]).success);

    let strict = env.run(&["check", "sw.js", "--strict"]);
    assert_eq!(strict.exit_code, 1);
    assert!(strict.stdout.contains("[duplicate-hash]"));
}

#[test]
fn check_rejects_dot_segment_alias() {
    let env = TestEnv::new();
    let hash = sha256("a");
    env.write(
        "m.json",
        format!(
            r#"{{"assets":[{{"hash":"{h}","url":"a.js"}},{{"hash":"{h}","url":"./a.js"}}],"version":"v1"}}"#,
            h = hash
        ),
    );

    let result = env.run(&["check", "m.json"]);

    assert_eq!(result.exit_code, 1, "{}", result.combined_output());
    assert!(result.stdout.contains("[invalid-url]"), "{}", result.stdout);
}

#[test]
fn check_reports_parse_error_position() {
    let env = TestEnv::new();
    env.write("broken.js", "self.assetsManifest = {\n  \"assets\": [\n    {\"hash\": }\n  ]\n};\n");

    let result = env.run(&["check", "broken.js"]);

    assert_eq!(result.exit_code, 2);
    assert!(result.stderr.contains("line 3"), "{}", result.stderr);
}

#[test]
fn check_missing_file_is_an_error() {
    let env = TestEnv::new();
    let result = env.run(&["check", "nope.js"]);
    assert_eq!(result.exit_code, 2);
    assert!(result.stderr.contains("nope.js"), "{}", result.stderr);
}

#[test]
fn check_json_emits_ndjson_event_stream() {
    let env = TestEnv::new();
    env.write(
        "m.json",
        r#"{"assets":[{"hash":"sha256-AAAA","url":"/abs.js"}],"version":"v1","extra":1}"#,
    );

    let result = env.run(&["check", "m.json", "--json"]);
    assert_eq!(result.exit_code, 1);

    let events = result.events();
    assert_eq!(events[0]["event"], "start");
    assert_eq!(events[0]["command"], "check");

    let last = events.last().unwrap();
    assert_eq!(last["event"], "complete");
    assert_eq!(last["success"], false);
    assert_eq!(last["format"], "json");

    let codes: Vec<_> = result
        .events_of("violation")
        .iter()
        .map(|v| v["code"].as_str().unwrap().to_string())
        .collect();
    assert!(codes.contains(&"invalid-url".to_string()), "{codes:?}");

    let warnings = result.events_of("warning");
    assert!(warnings.iter().any(|w| w["message"].as_str().unwrap().contains("extra")));
}

#[test]
fn check_honours_allowed_algorithms_from_config() {
    let env = TestEnv::new();
    env.write("sw.js", script("v1", &[("a.js", "a")]));
    env.write("swmanifest.toml", "[check]\nallowed_algorithms = [\"sha512\"]\n");

    let result = env.run(&["check", "sw.js"]);
    assert_eq!(result.exit_code, 1);
    assert!(result.stdout.contains("[disallowed-algorithm]"), "{}", result.stdout);

    let from_env = env.run_with_env(
        &["check", "sw.js"],
        &[("SWMANIFEST_ALLOWED_ALGORITHMS", "sha256,sha512")],
    );
    assert!(from_env.success, "{}", from_env.combined_output());
}

#[test]
fn check_warns_about_unknown_config_keys() {
    let env = TestEnv::new();
    env.write("sw.js", script("v1", &[("a.js", "a")]));
    env.write("swmanifest.toml", "[check]\nallowed_algorithm = [\"sha256\"]\n");

    let result = env.run(&["check", "sw.js"]);
    assert!(result.success);
    assert!(
        result.stderr.contains("did you mean 'allowed_algorithms'"),
        "{}",
        result.stderr
    );
}
