use serde::Deserialize;
use std::time::Duration;

/// Default search endpoint queried when none is configured
pub const DEFAULT_ENDPOINT_URL: &str =
    "https://allo.ua/ua/catalogsearch/ajax/suggest/?currentTheme=main&currentLocale=uk_UA";

/// Default prefix alphabet (ASCII lowercase)
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Main configuration structure for Suggest-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Search endpoint configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// URL the prefix queries are POSTed to
    pub url: String,

    /// Form field that carries the prefix
    #[serde(rename = "query-field")]
    pub query_field: String,

    /// JSON response field holding the list of suggestions
    #[serde(rename = "suggestions-field")]
    pub suggestions_field: String,

    /// Per-request timeout (milliseconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,
}

impl EndpointConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT_URL.to_string(),
            query_field: "q".to_string(),
            suggestions_field: "query".to_string(),
            request_timeout: 3000,
        }
    }
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Characters that prefixes are built from
    pub alphabet: String,

    /// Number of prefixes queried concurrently in one round
    #[serde(rename = "batch-size")]
    pub batch_size: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_string(),
            batch_size: 100,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the harvester
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the harvester
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl UserAgentConfig {
    /// Formats the header value as `Name/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "suggest-harvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the SQLite database holding known suggestions
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path to the checkpoint file of unprocessed prefixes
    #[serde(rename = "checkpoint-path")]
    pub checkpoint_path: String,

    /// Table suggestions are stored in
    pub table: String,

    /// Text column of `table`
    pub column: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: "allo_hint.db".to_string(),
            checkpoint_path: "chars_file.txt".to_string(),
            table: "hints".to_string(),
            column: "hint".to_string(),
        }
    }
}
