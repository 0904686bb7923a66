//! Shared helpers for OSDI fetch tests.

#![allow(dead_code)]

use osdi_sync::{API_TOKEN_HEADER, OsdiClient, OsdiClientConfig};
use osdi_types::OsdiCredential;
use serde_json::{Map, Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "G2rdjAMk4MUKF2Ek";

/// Routes library logs to the test harness output when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn client() -> OsdiClient {
    OsdiClient::new(OsdiClientConfig::default()).unwrap()
}

pub fn client_with_timeout(secs: u64) -> OsdiClient {
    OsdiClient::new(OsdiClientConfig {
        request_timeout_secs: secs,
        ..Default::default()
    })
    .unwrap()
}

pub fn credential(server: &MockServer) -> OsdiCredential {
    OsdiCredential::new(server.uri(), TOKEN)
}

/// Builds an OSDI collection envelope, with a next link when `has_next`.
pub fn envelope(key: &str, records: Value, has_next: bool) -> Value {
    let mut embedded = Map::new();
    embedded.insert(key.to_string(), records);
    let mut body = json!({
        "total_pages": 99,
        "_embedded": embedded,
        "_links": { "self": { "href": "https://osdi.example.org/self" } }
    });
    if has_next {
        body["_links"]["next"] = json!({ "href": "https://osdi.example.org/next" });
    }
    body
}

pub fn list(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "summary": format!("{name} summary"),
        "identifiers": [format!("osdi_sample_system:{id}")],
        "total_items": 0
    })
}

pub fn person(given_name: &str) -> Value {
    json!({
        "given_name": given_name,
        "family_name": "Tester",
        "email_addresses": [{ "address": format!("{}@example.org", given_name.to_lowercase()) }],
        "postal_addresses": [{ "postal_code": "02139" }]
    })
}

/// Mounts one page of `route` that must be requested exactly `times` times.
pub async fn mount_page(
    server: &MockServer,
    route: &str,
    page: u32,
    key: &str,
    records: Value,
    has_next: bool,
    times: u64,
) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("page", page.to_string()))
        .and(header(API_TOKEN_HEADER, TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(key, records, has_next)))
        .expect(times)
        .mount(server)
        .await;
}
