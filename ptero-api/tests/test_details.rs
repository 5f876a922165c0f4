//! Integration tests for single server lookup.

mod common;

use std::time::Duration;

use common::*;
use ptero_api::ApiMode;
use ptero_core::logging::LogLevel;
use serde_json::json;

#[test]
fn admin_details_by_numeric_id() {
    let transport = admin_panel().reply(
        "/api/application/servers/5",
        200,
        json!({"object": "server", "attributes": admin_server(5, "lobby")}),
    );
    let (conn, _) = connect(ADMIN_KEY, &transport);

    let server = conn.server_details(5).unwrap();
    assert_eq!(server.id, Some(5));
    assert_eq!(server.mode(), ApiMode::Admin);
    assert_eq!(server.admin().unwrap().egg_id, Some(3));
    assert!(server.allocations().is_empty());

    let last = transport.requests().pop().unwrap();
    assert_eq!(last.timeout, Duration::from_secs(10));
}

#[test]
fn client_details_by_identifier() {
    let transport = client_panel().reply(
        "/api/client/servers/0000000c",
        200,
        json!({"object": "server", "attributes": client_server(12, "mine")}),
    );
    let (conn, _) = connect(CLIENT_KEY, &transport);

    let server = conn.server_details("0000000c").unwrap();
    assert_eq!(server.id, Some(12));
    assert_eq!(server.identifier.as_deref(), Some("0000000c"));
    assert_eq!(server.default_allocation().unwrap().address().as_deref(), Some("10.0.0.5:25565"));
    assert_eq!(server.variables().len(), 1);
}

#[test]
fn missing_client_server_is_none_with_status_logged() {
    let transport = client_panel();
    let (conn, log) = connect(CLIENT_KEY, &transport);

    assert!(conn.server_details("deadbeef").is_none());
    assert_eq!(transport.paths().last().unwrap(), "/api/client/servers/deadbeef");
    assert!(log.contains(LogLevel::Warning, "Failed to retrieve server details: 404"));
}

#[test]
fn transport_failure_is_none_with_error_logged() {
    let transport = admin_panel().fail("/api/application/servers/9", "operation timed out");
    let (conn, log) = connect(ADMIN_KEY, &transport);

    assert!(conn.server_details(9).is_none());
    assert!(log.contains(LogLevel::Error, "Request error while retrieving server"));
}

#[test]
fn nested_data_attributes_are_accepted() {
    let transport = admin_panel().reply(
        "/api/application/servers/4",
        200,
        json!({"data": {"object": "server", "attributes": admin_server(4, "nested")}}),
    );
    let (conn, _) = connect(ADMIN_KEY, &transport);

    let server = conn.server_details(4).unwrap();
    assert_eq!(server.name.as_deref(), Some("nested"));
}

#[test]
fn top_level_attributes_win_over_odd_data() {
    let transport = admin_panel().reply(
        "/api/application/servers/6",
        200,
        json!({"object": "server", "attributes": admin_server(6, "top"), "data": [1, 2]}),
    );
    let (conn, log) = connect(ADMIN_KEY, &transport);

    let server = conn.server_details(6).unwrap();
    assert_eq!(server.name.as_deref(), Some("top"));
    assert!(log.messages(LogLevel::Error).is_empty());
}

#[test]
fn identifier_with_space_is_percent_encoded() {
    let transport = client_panel().reply(
        "/api/client/servers/my%20server",
        200,
        json!({"object": "server", "attributes": client_server(3, "my server")}),
    );
    let (conn, _) = connect(CLIENT_KEY, &transport);

    assert!(conn.server_details("my server").is_some());
    assert_eq!(transport.paths().last().unwrap(), "/api/client/servers/my%20server");
}

#[test]
fn response_without_attributes_is_an_empty_record() {
    let transport = client_panel().reply("/api/client/servers/abc", 200, json!({"object": "server"}));
    let (conn, _) = connect(CLIENT_KEY, &transport);

    let server = conn.server_details("abc").unwrap();
    assert_eq!(server.id, None);
    assert_eq!(server.mode(), ApiMode::Client);
    assert!(server.allocations().is_empty());
}
