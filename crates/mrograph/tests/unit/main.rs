//! Unit test suite: one module per component.

mod export_test;
