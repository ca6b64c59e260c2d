//! End-to-end tests driving the pysys binary against temporary package trees.

mod common;
mod config_tests;
mod gate_tests;
mod shell_tests;
