//! Integration tests for the harvester
//!
//! These tests use wiremock to stand in for the suggestion endpoint and
//! temporary files for the database and checkpoint.

mod fetch_tests;
mod support;
