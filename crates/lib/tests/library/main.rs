//! Library integration tests.

mod facade_tests;
