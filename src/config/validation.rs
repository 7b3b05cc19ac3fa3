use crate::checkpoint::CHECKPOINT_DELIMITER;
use crate::config::types::{Config, CrawlerConfig, EndpointConfig, OutputConfig, UserAgentConfig};
use crate::storage::check_identifier;
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Largest batch (round) size accepted
pub const MAX_BATCH_SIZE: usize = 1000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_endpoint_config(&config.endpoint)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates endpoint configuration
fn validate_endpoint_config(config: &EndpointConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid endpoint url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "Endpoint url '{}' must use http or https",
            config.url
        )));
    }

    if config.query_field.is_empty() {
        return Err(ConfigError::Validation(
            "query_field cannot be empty".to_string(),
        ));
    }

    if config.suggestions_field.is_empty() {
        return Err(ConfigError::Validation(
            "suggestions_field cannot be empty".to_string(),
        ));
    }

    if config.request_timeout < 100 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be >= 100ms, got {}ms",
            config.request_timeout
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.batch_size < 1 || config.batch_size > MAX_BATCH_SIZE {
        return Err(ConfigError::Validation(format!(
            "batch_size must be between 1 and {}, got {}",
            MAX_BATCH_SIZE, config.batch_size
        )));
    }

    validate_alphabet(&config.alphabet)
}

/// Validates the prefix alphabet
///
/// Prefixes are written to the checkpoint joined by the delimiter, so the
/// delimiter itself can never be part of the alphabet.
fn validate_alphabet(alphabet: &str) -> Result<(), ConfigError> {
    if alphabet.is_empty() {
        return Err(ConfigError::Validation(
            "alphabet cannot be empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for c in alphabet.chars() {
        if c.is_whitespace() || c.is_control() || c == CHECKPOINT_DELIMITER {
            return Err(ConfigError::Validation(format!(
                "alphabet contains invalid character {:?}",
                c
            )));
        }
        if !seen.insert(c) {
            return Err(ConfigError::Validation(format!(
                "alphabet contains duplicate character {:?}",
                c
            )));
        }
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.checkpoint_path.is_empty() {
        return Err(ConfigError::Validation(
            "checkpoint_path cannot be empty".to_string(),
        ));
    }

    validate_identifier("table", &config.table)?;
    validate_identifier("column", &config.column)?;

    Ok(())
}

/// Validates a SQL identifier
///
/// Table and column names are interpolated into statements, so only plain
/// identifiers are accepted.
fn validate_identifier(what: &str, ident: &str) -> Result<(), ConfigError> {
    check_identifier(ident).map(|_| ()).map_err(|_| {
        ConfigError::Validation(format!(
            "{} must be a plain SQL identifier, got '{}'",
            what, ident
        ))
    })
}
