//! Integration tests for the HTTP graph source
//!
//! These tests use wiremock to verify the request shape, response
//! decoding, pagination behavior, and error mapping of the API client.

use chrono::DateTime;
use prospector::config::SourceConfig;
use prospector::source::{GraphSource, HttpGraphSource, SourceError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a source against the mock server, with the token in place
fn create_test_source(base_url: &str, token_env: &str, page_size: u32) -> HttpGraphSource {
    std::env::set_var(token_env, "test-token");
    let config = SourceConfig {
        base_url: base_url.to_string(),
        auth_token_env: token_env.to_string(),
        profile_base_url: "https://x.com".to_string(),
        page_size,
        inter_page_delay_ms: 0,
    };
    HttpGraphSource::new(&config).expect("Failed to build source")
}

fn user_json(handle: &str, id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "screen_name": handle,
        "name": handle,
        "description": "desc",
        "followers_count": 1,
        "following_count": 2,
        "verified": false,
    })
}

#[tokio::test]
async fn test_fetch_account_sends_bearer_token_and_decodes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/by/username/acct_a"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "42",
            "screen_name": "acct_a",
            "name": "Account A",
            "description": "Robotics startup",
            "followers_count": 11_000,
            "following_count": 37,
            "verified": true,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = create_test_source(&mock_server.uri(), "PROSPECTOR_SRC_TOKEN_DECODE", 200);
    let account = source.fetch_account("acct_a").await.expect("Fetch failed");

    assert_eq!(account.id, "42");
    assert_eq!(account.handle, "acct_a");
    assert_eq!(account.display_name, "Account A");
    assert_eq!(account.description, "Robotics startup");
    assert_eq!(account.followers_count, 11_000);
    assert_eq!(account.following_count, 37);
    assert!(account.verified);
}

#[tokio::test]
async fn test_missing_account_maps_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/by/username/acct_gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let source = create_test_source(&mock_server.uri(), "PROSPECTOR_SRC_TOKEN_404", 200);
    let err = source.fetch_account("acct_gone").await.unwrap_err();

    match err {
        SourceError::NotFound(context) => assert_eq!(context, "acct_gone"),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_rate_limit_carries_reset_time_from_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/by/username/acct_a"))
        .respond_with(
            ResponseTemplate::new(429).insert_header("x-rate-limit-reset", "1893456000"),
        )
        .mount(&mock_server)
        .await;

    let source = create_test_source(&mock_server.uri(), "PROSPECTOR_SRC_TOKEN_429", 200);
    let err = source.fetch_account("acct_a").await.unwrap_err();

    assert!(err.is_quota());
    match err {
        SourceError::QuotaExceeded { reset_at } => {
            assert_eq!(reset_at, DateTime::from_timestamp(1_893_456_000, 0));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_rate_limit_without_reset_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/by/username/acct_a"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let source = create_test_source(&mock_server.uri(), "PROSPECTOR_SRC_TOKEN_429_BARE", 200);
    let err = source.fetch_account("acct_a").await.unwrap_err();

    match err {
        SourceError::QuotaExceeded { reset_at } => assert!(reset_at.is_none()),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_server_errors_map_to_transient() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/by/username/acct_a"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let source = create_test_source(&mock_server.uri(), "PROSPECTOR_SRC_TOKEN_503", 200);
    let err = source.fetch_account("acct_a").await.unwrap_err();

    match err {
        SourceError::Transient { message } => {
            assert!(message.contains("503"));
            assert!(message.contains("acct_a"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_connections_paginate_until_the_cap() {
    let mock_server = MockServer::start().await;

    // First page: no cursor, page-size batch
    Mock::given(method("GET"))
        .and(path("/users/1/following"))
        .and(query_param("count", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [user_json("acct_b", "2"), user_json("acct_c", "3")],
            "next_cursor": "page2",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Second page: only one more is needed to reach the cap
    Mock::given(method("GET"))
        .and(path("/users/1/following"))
        .and(query_param("count", "1"))
        .and(query_param("cursor", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [user_json("acct_d", "4")],
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = create_test_source(&mock_server.uri(), "PROSPECTOR_SRC_TOKEN_PAGES", 2);
    let connections = source.fetch_connections("1", 3).await.expect("Fetch failed");

    let handles: Vec<&str> = connections.iter().map(|c| c.handle.as_str()).collect();
    assert_eq!(handles, vec!["acct_b", "acct_c", "acct_d"]);
}

#[tokio::test]
async fn test_connections_keep_partial_results_when_a_later_page_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1/following"))
        .and(query_param("count", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [
                user_json("acct_b", "2"),
                user_json("acct_c", "3"),
                user_json("acct_d", "4"),
            ],
            "next_cursor": "page2",
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/1/following"))
        .and(query_param("count", "2"))
        .and(query_param("cursor", "page2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let source = create_test_source(&mock_server.uri(), "PROSPECTOR_SRC_TOKEN_PARTIAL", 3);
    let connections = source.fetch_connections("1", 5).await.expect("Fetch failed");

    assert_eq!(connections.len(), 3);
}

#[tokio::test]
async fn test_connections_first_page_failure_propagates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1/following"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let source = create_test_source(&mock_server.uri(), "PROSPECTOR_SRC_TOKEN_FIRSTPAGE", 2);
    let err = source.fetch_connections("1", 4).await.unwrap_err();

    assert!(err.is_quota());
}

#[tokio::test]
async fn test_connections_stop_on_an_empty_page() {
    let mock_server = MockServer::start().await;

    // Most specific first: a third page must never be requested
    Mock::given(method("GET"))
        .and(path("/users/1/following"))
        .and(query_param("cursor", "page3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [user_json("acct_z", "9")],
        })))
        .expect(0)
        .mount(&mock_server)
        .await;

    // Second page comes back empty despite advertising another cursor
    Mock::given(method("GET"))
        .and(path("/users/1/following"))
        .and(query_param("cursor", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [],
            "next_cursor": "page3",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/1/following"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [user_json("acct_b", "2"), user_json("acct_c", "3")],
            "next_cursor": "page2",
        })))
        .mount(&mock_server)
        .await;

    let source = create_test_source(&mock_server.uri(), "PROSPECTOR_SRC_TOKEN_EMPTY", 2);
    let connections = source.fetch_connections("1", 6).await.expect("Fetch failed");

    assert_eq!(connections.len(), 2);
}
