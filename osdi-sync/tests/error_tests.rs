use osdi_sync::{FetchFailure, OsdiClient, OsdiClientConfig, OsdiError};
use std::time::Duration;

fn remote(cause: FetchFailure) -> OsdiError {
    OsdiError::RemoteFetch {
        url: "https://osdi.example.org/lists".into(),
        page: 3,
        list_id: None,
        cause,
    }
}

#[test]
fn error_display_configuration() {
    let err = OsdiError::Configuration("missing credential field: api_url".into());
    let msg = format!("{err}");
    assert!(msg.contains("invalid configuration"));
    assert!(msg.contains("api_url"));
}

#[test]
fn error_display_remote_fetch_names_url_and_page() {
    let err = remote(FetchFailure::Status {
        status: 500,
        body: "boom".into(),
    });
    let msg = format!("{err}");
    assert!(msg.contains("https://osdi.example.org/lists"));
    assert!(msg.contains("page 3"));
    assert!(msg.contains("HTTP 500: boom"));
}

#[test]
fn error_display_cancelled() {
    let err = OsdiError::Cancelled { pages_fetched: 4 };
    assert!(format!("{err}").contains("cancelled after 4 page"));
}

#[test]
fn error_display_timeout() {
    assert!(format!("{}", remote(FetchFailure::Timeout)).contains("timed out"));
}

#[test]
fn error_from_types_error_is_configuration() {
    let err: OsdiError = osdi_types::Error::MissingCredential("api_token").into();
    assert!(matches!(err, OsdiError::Configuration(_)));
}

#[test]
fn retryable_classification() {
    assert!(remote(FetchFailure::Timeout).is_retryable());
    assert!(remote(FetchFailure::Transport("reset".into())).is_retryable());
    assert!(
        remote(FetchFailure::Status {
            status: 429,
            body: String::new()
        })
        .is_retryable()
    );
    assert!(
        !remote(FetchFailure::Status {
            status: 403,
            body: String::new()
        })
        .is_retryable()
    );
    assert!(!remote(FetchFailure::Malformed("bad".into())).is_retryable());
    assert!(!remote(FetchFailure::InvalidRequest("builder error".into())).is_retryable());
    assert!(!OsdiError::Cancelled { pages_fetched: 0 }.is_retryable());
}

#[test]
fn status_only_for_http_failures() {
    assert_eq!(remote(FetchFailure::Timeout).status(), None);
    let not_found = remote(FetchFailure::Status {
        status: 404,
        body: String::new(),
    });
    assert_eq!(not_found.status(), Some(404));
    assert!(not_found.is_not_found());
}

#[test]
fn error_debug_names_variant_and_fields() {
    let debug = format!("{:?}", OsdiError::Cancelled { pages_fetched: 2 });
    assert_eq!(debug, "Cancelled { pages_fetched: 2 }");

    let debug = format!("{:?}", remote(FetchFailure::Timeout));
    assert!(debug.contains("RemoteFetch"));
    assert!(debug.contains("page: 3"));
    assert!(debug.contains("Timeout"));
}

#[test]
fn error_display_invalid_request() {
    let msg = format!("{}", remote(FetchFailure::InvalidRequest("builder error".into())));
    assert!(msg.contains("invalid request: builder error"));
}

// ── Config ──────────────────────────────────────────────────────

#[test]
fn client_config_defaults() {
    let cfg = OsdiClientConfig::default();
    assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
    assert_eq!(cfg.connect_timeout(), Duration::from_secs(10));
    assert!(cfg.user_agent.starts_with("osdi-exchange/"));
}

#[test]
fn client_config_partial_json_uses_defaults() {
    let cfg: OsdiClientConfig = serde_json::from_str(r#"{"request_timeout_secs": 5}"#).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.connect_timeout_secs, 10);
}

#[test]
fn client_keeps_its_config() {
    let cfg = OsdiClientConfig {
        request_timeout_secs: 7,
        ..Default::default()
    };
    let client = OsdiClient::new(cfg.clone()).unwrap();
    assert_eq!(client.config(), &cfg);
}
