//! pysys-lib: Core types and logic for PySys
//!
//! This crate provides the gated package-lifecycle manager and the pieces it
//! is built from:
//! - `Namespace`: the `standard` and opt-in `obn` package domains
//! - `FeatureGate`: the flag that unlocks the `obn` namespace
//! - `MetadataReader`: loads package descriptors from disk
//! - `Registry`: the installed-package set of each namespace
//! - `PackageManager`: orchestrates install, remove, update and list
//! - `StateFile`: persistence of the registry and gate between runs

pub mod config;
pub mod consts;
pub mod error;
pub mod fs;
pub mod gate;
pub mod hook;
pub mod manager;
pub mod metadata;
pub mod namespace;
pub mod platform;
pub mod registry;
pub mod state;
pub mod state_lock;
pub mod util;

pub use error::PackageError;
pub use gate::{Access, FeatureGate, GatePolicy};
pub use manager::{InstallOutcome, PackageManager, UpdateOutcome};
pub use metadata::PackageDescriptor;
pub use namespace::{Namespace, NamespaceRoots};
pub use registry::{InstalledPackage, Registry};
