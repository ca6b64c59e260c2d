//! Platform-specific directory layout.

pub mod paths;
