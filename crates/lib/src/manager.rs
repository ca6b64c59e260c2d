//! The package lifecycle manager.
//!
//! [`PackageManager`] owns the feature gate, the registry and the metadata
//! reader, and is the only thing that mutates them. Every operation runs its
//! checks in a fixed order and writes the registry at most once, after all
//! validation has passed, so a failed call leaves no partial state.

use tracing::{debug, info, warn};

use crate::error::PackageError;
use crate::fs::{LocalFs, PackageFs};
use crate::gate::{Access, FeatureGate, GatePolicy};
use crate::hook::{HookContext, HookError, HookRunner, ProcessHookRunner};
use crate::metadata::{MetadataReader, PackageDescriptor};
use crate::namespace::{Namespace, NamespaceRoots};
use crate::registry::{InstalledPackage, Names, Registry};

/// Result of a successful install.
#[derive(Debug)]
pub struct InstallOutcome {
  pub namespace: Namespace,
  pub name: String,
  pub version: String,
  /// Set when the install hook failed. The package is installed regardless.
  pub warning: Option<PackageError>,
}

/// Result of a successful update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
  pub namespace: Namespace,
  pub name: String,
  pub old_version: String,
  pub new_version: String,
}

pub struct PackageManager<F = LocalFs, H = ProcessHookRunner> {
  gate: FeatureGate,
  policy: GatePolicy,
  registry: Registry,
  reader: MetadataReader<F>,
  hooks: H,
}

impl PackageManager {
  /// Manager over the local filesystem, running hooks as child processes.
  pub fn local(roots: NamespaceRoots) -> Self {
    Self::new(roots, LocalFs, ProcessHookRunner::default())
  }
}

impl<F: PackageFs, H: HookRunner> PackageManager<F, H> {
  pub fn new(roots: NamespaceRoots, fs: F, hooks: H) -> Self {
    Self {
      gate: FeatureGate::new(),
      policy: GatePolicy::default(),
      registry: Registry::new(roots.clone()),
      reader: MetadataReader::new(fs, roots),
      hooks,
    }
  }

  pub fn with_policy(mut self, policy: GatePolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn with_gate(mut self, enabled: bool) -> Self {
    self.gate.set(enabled);
    self
  }

  /// Replace the registry contents with previously captured records.
  pub fn with_records(mut self, records: impl IntoIterator<Item = InstalledPackage>) -> Self {
    self.registry = Registry::from_records(self.reader.roots().clone(), records);
    self
  }

  pub fn policy(&self) -> GatePolicy {
    self.policy
  }

  pub fn registry(&self) -> &Registry {
    &self.registry
  }

  pub fn set_gate(&mut self, enabled: bool) {
    info!(enabled, "setting obn gate");
    self.gate.set(enabled);
  }

  pub fn gate_status(&self) -> bool {
    self.gate.is_enabled()
  }

  /// Install `name` from the namespace's package directory.
  ///
  /// # Errors
  ///
  /// `GateDisabled`, `AlreadyInstalled`, `InvalidPackageName`,
  /// `MetadataMissing`, `MetadataMalformed` or `Io`. A failing install hook
  /// is not an error; it is returned in [`InstallOutcome::warning`].
  pub fn install(&mut self, namespace: Namespace, name: &str) -> Result<InstallOutcome, PackageError> {
    self.gate.check(namespace, Access::Mutate, self.policy)?;

    if self.registry.is_installed(namespace, name) {
      return Err(PackageError::AlreadyInstalled {
        namespace,
        name: name.to_string(),
      });
    }

    let descriptor = self.reader.read(namespace, name)?;

    let warning = self
      .run_install_hook(namespace, &descriptor)
      .err()
      .map(|source| {
        warn!(%namespace, package = %name, error = %source, "install hook failed");
        PackageError::InstallHookFailed {
          namespace,
          name: name.to_string(),
          source,
        }
      });

    self.registry.record_install(namespace, &descriptor);
    info!(%namespace, package = %descriptor.name, version = %descriptor.version, "installed package");

    Ok(InstallOutcome {
      namespace,
      name: descriptor.name,
      version: descriptor.version,
      warning,
    })
  }

  /// Remove `name` from the namespace. Removing an absent package fails.
  pub fn remove(&mut self, namespace: Namespace, name: &str) -> Result<(), PackageError> {
    self.gate.check(namespace, Access::Mutate, self.policy)?;

    let removed = self.registry.remove(namespace, name)?;
    info!(%namespace, package = %removed.name, version = %removed.version, "removed package");
    Ok(())
  }

  /// Re-read the descriptor of an installed package and record its version.
  ///
  /// The install hook is not run again.
  pub fn update(&mut self, namespace: Namespace, name: &str) -> Result<UpdateOutcome, PackageError> {
    self.gate.check(namespace, Access::Mutate, self.policy)?;

    let old_version = self
      .registry
      .get(namespace, name)
      .map(|r| r.version.clone())
      .ok_or_else(|| PackageError::PackageNotFound {
        namespace,
        name: name.to_string(),
      })?;

    let descriptor = self.reader.read(namespace, name)?;
    self.registry.record_install(namespace, &descriptor);

    if old_version == descriptor.version {
      debug!(%namespace, package = %name, version = %old_version, "package already up to date");
    } else {
      info!(%namespace, package = %name, from = %old_version, to = %descriptor.version, "updated package");
    }

    Ok(UpdateOutcome {
      namespace,
      name: descriptor.name,
      old_version,
      new_version: descriptor.version,
    })
  }

  /// Installed package names of `namespace`, in install order.
  pub fn list(&self, namespace: Namespace) -> Result<Names<'_>, PackageError> {
    self.gate.check(namespace, Access::Read, self.policy)?;
    Ok(self.registry.list(namespace))
  }

  fn run_install_hook(&self, namespace: Namespace, descriptor: &PackageDescriptor) -> Result<(), HookError> {
    let roots = self.reader.roots();
    let hook = roots.hook_path(namespace, &descriptor.name);
    let fs = self.reader.fs();

    if !fs.exists(&hook) {
      return Ok(());
    }
    if !fs.is_executable(&hook) {
      return Err(HookError::NotExecutable { path: hook });
    }

    let package_dir = roots.package_dir(namespace, &descriptor.name);
    let ctx = HookContext {
      namespace,
      package: descriptor,
      package_dir: &package_dir,
    };
    self.hooks.run(&hook, &ctx)
  }
}
