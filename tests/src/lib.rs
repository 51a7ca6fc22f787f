//! End-to-end tests for the Antigravity server live under `e2e/`.
//!
//! They start the real router through `antigravity-test-utils` and talk to
//! it over HTTP.

pub use antigravity_test_utils;
