//! End-to-end test against the live mock provider.
//!
//! # Design
//! Starts the provider on a random port, switches its state through the
//! `/_state` endpoint, then exercises every client operation and trigger
//! over real HTTP with the default `UreqTransport`.

use serde_json::json;
use user_api_core::trigger::{self, Trigger};
use user_api_core::{ApiClient, ApiError, TriggerConfig, User};

/// Start the mock provider on a random port and return its base URL.
fn start_provider() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_provider::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Apply a named provider state over HTTP.
fn set_state(base_url: &str, state: &str, user_id: Option<&str>) {
    let mut body = json!({ "state": state });
    if let Some(id) = user_id {
        body["variables"] = json!({ "userId": id });
    }
    let response = ureq::post(&format!("{base_url}/_state"))
        .content_type("application/json")
        .send(body.to_string().as_bytes())
        .expect("state setup failed");
    assert_eq!(response.status().as_u16(), 204, "state `{state}`");
}

#[test]
fn health_and_user_lifecycle() {
    let base_url = start_provider();
    let client = ApiClient::new(&base_url);

    // Step 1: server up.
    set_state(&base_url, "Server is up", None);
    assert_eq!(client.get_health().unwrap().status, "up");

    // Step 2: no users yet, both lookups report not found.
    let err = client.get_user("123").unwrap_err();
    assert!(matches!(err, ApiError::UserNotFound));
    let err = client.get_user_by_query("123").unwrap_err();
    assert!(matches!(err, ApiError::UserNotFound));

    // Step 3: user exists; the extra `name` field is ignored.
    set_state(&base_url, "A user exists", Some("123"));
    assert_eq!(client.get_user("123").unwrap(), User::new("123"));
    assert_eq!(client.get_user_by_query("123").unwrap(), User::new("123"));

    // Step 4: server down, health reports unavailable with the fixed message.
    set_state(&base_url, "Server is down", None);
    let err = client.get_health().unwrap_err();
    assert!(matches!(err, ApiError::ServiceUnavailable { status: 503 }));
    assert_eq!(err.to_string(), "the server is not ready");

    // Step 5: server broken, user lookups report unavailable.
    set_state(&base_url, "Server is broken", None);
    let err = client.get_user("123").unwrap_err();
    assert!(matches!(err, ApiError::ServiceUnavailable { status: 500 }));
    let err = client.get_user_by_query("123").unwrap_err();
    assert!(matches!(err, ApiError::ServiceUnavailable { status: 500 }));
    assert!(matches!(
        client.get_health().unwrap_err(),
        ApiError::ServiceUnavailable { .. }
    ));

    // Step 6: back up, users cleared.
    set_state(&base_url, "Server is up", None);
    set_state(&base_url, "No users exist", None);
    assert!(matches!(client.get_user("123").unwrap_err(), ApiError::UserNotFound));
}

#[test]
fn triggers_run_against_live_provider() {
    let base_url = start_provider();
    set_state(&base_url, "A user exists", Some("123"));

    let config = TriggerConfig::from_value(json!({
        "baseUrl": base_url,
        "variables": { "userId": "123" },
    }))
    .unwrap();

    assert_eq!(trigger::get_health(&config).unwrap(), "up");
    assert_eq!(trigger::get_user_by_path(&config).unwrap(), User::new("123"));
    assert_eq!(trigger::get_user_by_query(&config).unwrap(), User::new("123"));

    let fixed = trigger::get_fixed_user("123");
    assert_eq!(fixed.trigger(&config).unwrap().user_id, "123");

    let missing = trigger::get_fixed_user("999");
    assert!(matches!(missing.trigger(&config).unwrap_err(), ApiError::UserNotFound));
}

#[test]
fn unreachable_provider_is_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = ApiClient::new(&format!("http://{addr}"));
    assert!(matches!(client.get_health().unwrap_err(), ApiError::Transport(_)));
}
