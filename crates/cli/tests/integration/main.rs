//! CLI integration tests.

mod run_tests;
