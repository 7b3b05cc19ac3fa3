//! Configuration module for Suggest-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section and key is optional; missing values fall back to the defaults
//! of the allo.ua suggestion endpoint.
//!
//! # Example
//!
//! ```no_run
//! use suggest_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Batch size: {}", config.crawler.batch_size);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, EndpointConfig, OutputConfig, UserAgentConfig, DEFAULT_ALPHABET,
    DEFAULT_ENDPOINT_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
