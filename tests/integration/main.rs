//! Integration tests for HN-Scout
//!
//! These tests use wiremock to stand in for the search API and the
//! discussion pages, and drive the HTTP adapter and full runs end-to-end.

mod run_tests;
mod source_tests;
mod support;
