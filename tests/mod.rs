//! Integration tests for subgrab
//!
//! Tests are organized by component:
//! - catalog_test: catalog client (search page parsing, ajax resolution)
//! - extract_test: archive extractor (zip/rar paths, GBK names, whitelist)
//! - cli_test: CLI argument parsing and output helpers
//! - e2e_test: end-to-end flow (guess -> search -> download -> disk)

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
