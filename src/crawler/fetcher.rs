//! HTTP fetcher implementation
//!
//! This module handles all requests to the suggestion endpoint, including:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - POSTing a prefix as a form field
//! - Classifying the response into a `FetchOutcome`

use crate::config::{EndpointConfig, UserAgentConfig};
use crate::prefix::Prefix;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// Result of one query for one prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The endpoint returned a non-empty list of suggestions
    Suggestions(Vec<String>),

    /// Well-formed response without suggestions (field absent, null or empty)
    NoSuggestions,

    /// HTTP 429; the prefix must be retried in a later round
    RateLimited,

    /// The response could not be interpreted
    Malformed(String),

    /// Timeout, connection failure or other transport error
    TransportFailure(String),
}

impl FetchOutcome {
    /// Whether the prefix has to be queried again
    pub fn needs_retry(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

/// Anything that can answer a prefix query
///
/// The crawl engine only talks to this trait, so the HTTP transport can be
/// swapped out.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn fetch(&self, prefix: &Prefix) -> FetchOutcome;
}

/// Builds an HTTP client for the suggestion endpoint
///
/// # Arguments
///
/// * `endpoint` - Endpoint configuration (provides the per-request timeout)
/// * `user_agent` - The user agent configuration
pub fn build_http_client(
    endpoint: &EndpointConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(endpoint.timeout())
        .connect_timeout(endpoint.timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Suggestion source backed by the HTTP search endpoint
pub struct HttpSuggestionSource {
    client: Client,
    url: String,
    query_field: String,
    suggestions_field: String,
}

impl HttpSuggestionSource {
    pub fn new(endpoint: &EndpointConfig, user_agent: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(endpoint, user_agent)?, endpoint))
    }

    pub fn with_client(client: Client, endpoint: &EndpointConfig) -> Self {
        Self {
            client,
            url: endpoint.url.clone(),
            query_field: endpoint.query_field.clone(),
            suggestions_field: endpoint.suggestions_field.clone(),
        }
    }
}

#[async_trait]
impl SuggestionSource for HttpSuggestionSource {
    async fn fetch(&self, prefix: &Prefix) -> FetchOutcome {
        fetch_suggestions(
            &self.client,
            &self.url,
            &self.query_field,
            &self.suggestions_field,
            prefix,
        )
        .await
    }
}

/// Queries the endpoint for a single prefix
///
/// # Response Handling
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | HTTP 429 | RateLimited (body is not read) |
/// | Other non-2xx | Malformed |
/// | Body is not JSON / not an object | Malformed |
/// | Field absent, null or empty list | NoSuggestions |
/// | Field is a non-empty list | Suggestions (string items only) |
/// | Timeout / connection error | TransportFailure |
pub async fn fetch_suggestions(
    client: &Client,
    url: &str,
    query_field: &str,
    suggestions_field: &str,
    prefix: &Prefix,
) -> FetchOutcome {
    let response = match client
        .post(url)
        .form(&[(query_field, prefix.as_str())])
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => return classify_transport_error(&e),
    };

    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return FetchOutcome::RateLimited;
    }

    if !status.is_success() {
        return FetchOutcome::Malformed(format!("HTTP {}", status.as_u16()));
    }

    match response.bytes().await {
        Ok(body) => parse_suggestions(&body, suggestions_field),
        Err(e) => classify_transport_error(&e),
    }
}

/// Extracts the suggestion list from a response body
pub fn parse_suggestions(body: &[u8], suggestions_field: &str) -> FetchOutcome {
    let value: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => return FetchOutcome::Malformed(format!("Invalid JSON: {}", e)),
    };

    let object = match value.as_object() {
        Some(o) => o,
        None => return FetchOutcome::Malformed("Response is not a JSON object".to_string()),
    };

    match object.get(suggestions_field) {
        None | Some(Value::Null) => FetchOutcome::NoSuggestions,
        Some(Value::Array(items)) => {
            let suggestions: Vec<String> = items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect();

            if suggestions.is_empty() {
                FetchOutcome::NoSuggestions
            } else {
                FetchOutcome::Suggestions(suggestions)
            }
        }
        Some(other) => FetchOutcome::Malformed(format!(
            "Field '{}' is not a list: {}",
            suggestions_field, other
        )),
    }
}

fn classify_transport_error(e: &reqwest::Error) -> FetchOutcome {
    if e.is_timeout() {
        FetchOutcome::TransportFailure("Request timeout".to_string())
    } else if e.is_connect() {
        FetchOutcome::TransportFailure("Connection refused".to_string())
    } else {
        FetchOutcome::TransportFailure(e.to_string())
    }
}
