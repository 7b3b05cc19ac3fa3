//! HTTP transport tests against a mock suggestion endpoint

use serde_json::json;
use std::time::Duration;
use suggest_harvest::config::{EndpointConfig, UserAgentConfig};
use suggest_harvest::crawler::{FetchOutcome, HttpSuggestionSource, SuggestionSource};
use suggest_harvest::prefix::Prefix;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoint(server: &MockServer) -> EndpointConfig {
    EndpointConfig {
        url: format!("{}/suggest", server.uri()),
        request_timeout: 300,
        ..EndpointConfig::default()
    }
}

async fn fetch(server: &MockServer, prefix: &str) -> FetchOutcome {
    let source = HttpSuggestionSource::new(&endpoint(server), &UserAgentConfig::default())
        .expect("Failed to build source");
    source.fetch(&Prefix::from(prefix)).await
}

#[tokio::test]
async fn test_posts_prefix_as_form_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/suggest"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("q=ab"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": ["abacus", "abbey"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = fetch(&mock_server, "ab").await;

    assert_eq!(
        outcome,
        FetchOutcome::Suggestions(vec!["abacus".to_string(), "abbey".to_string()])
    );
}

#[tokio::test]
async fn test_rate_limit_is_detected_before_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "query": ["should", "not", "count"]
        })))
        .mount(&mock_server)
        .await;

    assert_eq!(fetch(&mock_server, "a").await, FetchOutcome::RateLimited);
}

#[tokio::test]
async fn test_missing_field_means_no_suggestions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "products": [] })))
        .mount(&mock_server)
        .await;

    assert_eq!(fetch(&mock_server, "zz").await, FetchOutcome::NoSuggestions);
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    assert!(matches!(
        fetch(&mock_server, "a").await,
        FetchOutcome::Malformed(_)
    ));
}

#[tokio::test]
async fn test_server_error_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    assert_eq!(
        fetch(&mock_server, "a").await,
        FetchOutcome::Malformed("HTTP 503".to_string())
    );
}

#[tokio::test]
async fn test_slow_response_is_transport_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "query": ["late"] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    assert!(matches!(
        fetch(&mock_server, "a").await,
        FetchOutcome::TransportFailure(_)
    ));
}

#[tokio::test]
async fn test_connection_refused_is_transport_failure() {
    // Reserve a free port, then release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = EndpointConfig {
        url: format!("http://127.0.0.1:{}/suggest", port),
        request_timeout: 300,
        ..EndpointConfig::default()
    };

    let source = HttpSuggestionSource::new(&config, &UserAgentConfig::default()).unwrap();
    let outcome = source.fetch(&Prefix::from("a")).await;

    assert!(matches!(outcome, FetchOutcome::TransportFailure(_)));
}

#[tokio::test]
async fn test_custom_field_names() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string("term=ba"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": ["bag"]
        })))
        .mount(&mock_server)
        .await;

    let config = EndpointConfig {
        query_field: "term".to_string(),
        suggestions_field: "items".to_string(),
        ..endpoint(&mock_server)
    };
    let source = HttpSuggestionSource::new(&config, &UserAgentConfig::default()).unwrap();

    assert_eq!(
        source.fetch(&Prefix::from("ba")).await,
        FetchOutcome::Suggestions(vec!["bag".to_string()])
    );
}
