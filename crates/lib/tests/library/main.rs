//! Scenario tests for the package lifecycle manager.

mod lifecycle_tests;
