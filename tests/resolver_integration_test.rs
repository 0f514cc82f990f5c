//! End-to-end resolution: raw YAML in, typed struct out.

mod common;

use ccms_config::{resolve, resolve_document, Document, LookupError, ResolveError};
use common::{lookup_table, RecordingLookup};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
struct AppConfig {
    app_version: String,
    server: ServerConfig,
    user: UserConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
struct ServerConfig {
    grpc: Endpoint,
    http: Endpoint,
    timeout: i64,
    debug: bool,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Endpoint {
    address: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct UserConfig {
    ratings_url: String,
    favourites_url: String,
    weight: f64,
}

const APP_YAML: &str = r"
appVersion: 2.1.0
server:
  grpc:
    address: ccms|GRPC_ADDRESS
  http:
    address: ':8080'
  timeout: ccms|int|TIMEOUT_SECONDS
  debug: CCMS|bool|DEBUG
user:
  ratingsUrl: ccms|RATINGS_URL
  favouritesUrl: https://favourites.example
  weight: ccms|float64|WEIGHT
";

#[test]
fn test_resolve_full_application_config() {
    let lookup = lookup_table(&[
        ("GRPC_ADDRESS", ":9090"),
        ("TIMEOUT_SECONDS", "30"),
        ("DEBUG", "true"),
        ("RATINGS_URL", "http://ratings.internal"),
        ("WEIGHT", "0.75"),
    ]);

    let config: AppConfig = resolve(APP_YAML.as_bytes(), "ccms", &lookup).unwrap();

    assert_eq!(
        config,
        AppConfig {
            app_version: "2.1.0".to_string(),
            server: ServerConfig {
                grpc: Endpoint {
                    address: ":9090".to_string()
                },
                http: Endpoint {
                    address: ":8080".to_string()
                },
                timeout: 30,
                debug: true,
            },
            user: UserConfig {
                ratings_url: "http://ratings.internal".to_string(),
                favourites_url: "https://favourites.example".to_string(),
                weight: 0.75,
            },
        }
    );
}

#[test]
fn test_typed_tag_resolves_to_integer() {
    let lookup = lookup_table(&[("TIMEOUT_SECONDS", "30")]);
    let document =
        resolve_document(b"timeout: ccms|int|TIMEOUT_SECONDS\n", "ccms", &lookup).unwrap();
    assert_eq!(document.get("timeout"), Some(&Document::Int(30)));
}

#[test]
fn test_string_sequence_of_tags_resolves_each_element() {
    let lookup = lookup_table(&[("A", "1"), ("B", "2")]);
    let document = resolve_document(b"ids: [ccms|int|A, ccms|int|B]\n", "ccms", &lookup).unwrap();
    assert_eq!(
        document.get("ids"),
        Some(&Document::Sequence(vec![Document::Int(1), Document::Int(2)]))
    );
}

#[test]
fn test_echoed_key_keeps_the_full_tag() {
    let lookup = |key: &str| -> Result<String, LookupError> { Ok(key.to_string()) };
    let document = resolve_document(b"url: ccms|https://literal\n", "ccms", &lookup).unwrap();
    assert_eq!(
        document.get("url").and_then(Document::as_str),
        Some("ccms|https://literal")
    );
}

#[test]
fn test_echoing_lookup_still_coerces_typed_tags() {
    let lookup = |key: &str| -> Result<String, LookupError> { Ok(key.to_string()) };
    let document = resolve_document(
        b"port: ccms|int|8080\nflag: ccms|bool|true\nurl: ccms|https://literal\n",
        "ccms",
        &lookup,
    )
    .unwrap();

    assert_eq!(document.get("port"), Some(&Document::Int(8080)));
    assert_eq!(document.get("flag"), Some(&Document::Bool(true)));
    assert_eq!(
        document.get("url").and_then(Document::as_str),
        Some("ccms|https://literal")
    );
}

#[test]
fn test_document_without_tags_never_calls_lookup() {
    let lookup = RecordingLookup::new(&[]);
    let raw = b"name: svc\nport: 8080\nempty:\nhosts: [a, b]\nvault: vault|KEY\n";

    let document = resolve_document(raw, "ccms", &lookup).unwrap();

    assert!(lookup.calls().is_empty());
    assert_eq!(document.get("port"), Some(&Document::Int(8080)));
    assert_eq!(document.get("empty").and_then(Document::as_str), Some(""));
    assert_eq!(document.get("vault").and_then(Document::as_str), Some("vault|KEY"));
}

#[test]
fn test_lookup_is_called_once_per_tag_in_key_order() {
    let lookup = RecordingLookup::new(&[("A", "a"), ("B", "b"), ("C", "c")]);
    resolve_document(
        b"z: ccms|C\na: ccms|A\nm:\n  - k: ccms|B\n",
        "ccms",
        &lookup,
    )
    .unwrap();
    assert_eq!(lookup.calls(), vec!["A", "B", "C"]);
}

#[test]
fn test_mixed_sequence_fails_on_mismatched_element() {
    let lookup = RecordingLookup::new(&[("A", "1")]);
    let err = resolve_document(
        b"items:\n  - name: ccms|A\n  - plain string\n",
        "ccms",
        &lookup,
    )
    .unwrap_err();

    match err {
        ResolveError::MixedSequence {
            ref path,
            index,
            expected,
            found,
        } => {
            assert_eq!(path.to_string(), "items");
            assert_eq!(index, 1);
            assert_eq!(expected, "mapping");
            assert_eq!(found, "string");
        }
        other => panic!("Expected MixedSequence, got {other:?}"),
    }
    // The first element was walked before the mismatch was found
    assert_eq!(lookup.calls(), vec!["A"]);
}

#[test]
fn test_first_error_aborts_resolution() {
    let lookup = lookup_table(&[("GOOD", "1")]);
    let err = resolve_document(
        b"a: ccms|int|GOOD\nb: ccms|int|MISSING\n",
        "ccms",
        &lookup,
    )
    .unwrap_err();
    assert_eq!(err.code(), "CONFIG.KEY.LOOKUP");
    assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("b"));
    assert!(err.to_string().contains("MISSING"));
}

#[test]
fn test_error_codes() {
    let lookup = lookup_table(&[("N", "not-a-number"), ("B", "yes")]);
    let cases = [
        ("a: ccms|int|x|y\n", "CONFIG.TAG.MALFORMED"),
        ("a: ccms|uint8|N\n", "CONFIG.TYPE.UNSUPPORTED"),
        ("a: ccms|int64|N\n", "CONFIG.TYPE.CONVERSION"),
        ("a: ccms|bool|B\n", "CONFIG.TYPE.CONVERSION"),
        ("a: [x, {b: c}]\n", "CONFIG.SEQUENCE.MIXED"),
        ("a: [unclosed\n", "CONFIG.DOCUMENT.PARSE"),
        ("- not\n- a mapping\n", "CONFIG.DOCUMENT.PARSE"),
    ];

    for (raw, code) in cases {
        let err = resolve_document(raw.as_bytes(), "ccms", &lookup).unwrap_err();
        assert_eq!(err.code(), code, "input: {raw}");
    }
}

#[test]
fn test_bind_failure_is_reported_after_resolution() {
    let lookup = lookup_table(&[("TIMEOUT_SECONDS", "30")]);
    let err = resolve::<ServerConfig, _>(
        b"timeout: ccms|TIMEOUT_SECONDS\ndebug: false\ngrpc: {address: a}\nhttp: {address: b}\n",
        "ccms",
        &lookup,
    )
    .unwrap_err();
    assert_eq!(err.code(), "CONFIG.BIND");
    assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("timeout"));
}

#[test]
fn test_empty_input_resolves_to_empty_mapping() {
    let lookup = RecordingLookup::new(&[]);
    let document = resolve_document(b"", "ccms", &lookup).unwrap();
    assert_eq!(document, Document::Mapping(Default::default()));
}

#[test]
fn test_custom_namespace() {
    let lookup = lookup_table(&[("TOKEN", "s3cr3t")]);
    let document = resolve_document(
        b"token: vault|TOKEN\nother: ccms|TOKEN\n",
        "vault",
        &lookup,
    )
    .unwrap();
    assert_eq!(document.get("token").and_then(Document::as_str), Some("s3cr3t"));
    assert_eq!(document.get("other").and_then(Document::as_str), Some("ccms|TOKEN"));
}
