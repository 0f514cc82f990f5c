//! Binding resolved documents onto typed structs.

use std::collections::HashMap;

use ccms_config::{bind, Document};
use serde::Deserialize;

fn document(yaml: &str) -> Document {
    Document::from_yaml_str(yaml).expect("test YAML should parse")
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
enum Protocol {
    Grpc,
    Http,
}

#[derive(Debug, Deserialize)]
struct Listener {
    protocol: Protocol,
    address: String,
    #[serde(default)]
    tls: bool,
}

#[derive(Debug, Deserialize)]
struct Gateway {
    service_name: String,
    listeners: Vec<Listener>,
    headers: HashMap<String, String>,
    retry_budget: Option<u32>,
}

#[test]
fn test_bind_nested_structures() {
    let gateway: Gateway = bind(document(
        r"
serviceName: merchandise
listeners:
  - protocol: grpc
    address: ':9090'
  - protocol: http
    address: ':8080'
    tls: true
headers:
  x-request-source: gateway
",
    ))
    .unwrap();

    assert_eq!(gateway.service_name, "merchandise");
    assert_eq!(gateway.listeners.len(), 2);
    assert_eq!(gateway.listeners[0].protocol, Protocol::Grpc);
    assert!(!gateway.listeners[0].tls);
    assert_eq!(gateway.listeners[1].protocol, Protocol::Http);
    assert!(gateway.listeners[1].tls);
    assert_eq!(gateway.headers["x-request-source"], "gateway");
    assert_eq!(gateway.retry_budget, None);
}

#[test]
fn test_bind_error_path_points_into_sequence() {
    let err = bind::<Gateway>(document(
        r"
serviceName: merchandise
listeners:
  - protocol: grpc
    address: ':9090'
  - protocol: smtp
    address: ':25'
headers: {}
",
    ))
    .unwrap_err();

    assert_eq!(err.path().to_string(), "listeners[1].protocol");
    assert!(err.message().contains("smtp"));
}

#[test]
fn test_kebab_and_upper_case_keys_match_fields() {
    #[derive(Debug, Deserialize)]
    struct Limits {
        max_connections: i64,
        idle_timeout: f64,
    }

    let limits: Limits = bind(document("MAX-CONNECTIONS: 64\nIdleTimeout: 2.5\n")).unwrap();
    assert_eq!(limits.max_connections, 64);
    assert!((limits.idle_timeout - 2.5).abs() < f64::EPSILON);
}

#[test]
fn test_bind_into_document_like_json_value() {
    let value: serde_json::Value = bind(document("a: [1, x]\nb: {c: true}\n")).unwrap();
    assert_eq!(value, serde_json::json!({"a": [1, "x"], "b": {"c": true}}));
}
