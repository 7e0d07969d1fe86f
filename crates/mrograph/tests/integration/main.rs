//! Integration test suite: whole-hierarchy scenarios.

mod concurrency_test;
