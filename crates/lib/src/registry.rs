//! Installed-package sets, one per namespace.
//!
//! Records keep insertion order. Updating a package rewrites its version in
//! place, so it keeps its position and its `installed_at` sequence number.

use std::iter::FusedIterator;
use std::path::Path;
use std::slice;

use serde::{Deserialize, Serialize};

use crate::error::PackageError;
use crate::metadata::PackageDescriptor;
use crate::namespace::{Namespace, NamespaceRoots};

/// A package present in a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledPackage {
  pub namespace: Namespace,
  pub name: String,
  pub version: String,
  /// Logical install order, unique within a registry.
  pub installed_at: u64,
}

#[derive(Debug, Clone)]
pub struct Registry {
  roots: NamespaceRoots,
  standard: Vec<InstalledPackage>,
  obn: Vec<InstalledPackage>,
  next_seq: u64,
}

impl Registry {
  pub fn new(roots: NamespaceRoots) -> Self {
    Self {
      roots,
      standard: Vec::new(),
      obn: Vec::new(),
      next_seq: 0,
    }
  }

  /// Rebuild a registry from previously captured records.
  ///
  /// Records are ordered by `installed_at` within each namespace. A later
  /// duplicate of the same `(namespace, name)` replaces the earlier one. If
  /// the sequence space is exhausted the records are renumbered `0..n`,
  /// keeping their relative order.
  pub fn from_records(roots: NamespaceRoots, records: impl IntoIterator<Item = InstalledPackage>) -> Self {
    let mut registry = Self::new(roots);
    let mut records: Vec<_> = records.into_iter().collect();
    records.sort_by_key(|r| r.installed_at);

    for record in records {
      let bucket = registry.bucket_mut(record.namespace);
      bucket.retain(|r| r.name != record.name);
      bucket.push(record);
    }

    let last = registry.records().map(|r| r.installed_at).max();
    registry.next_seq = match last.map(|seq| seq.checked_add(1)) {
      None => 0,
      Some(Some(next)) => next,
      Some(None) => registry.renumber(),
    };
    registry
  }

  pub fn root(&self, namespace: Namespace) -> &Path {
    self.roots.root(namespace)
  }

  pub fn roots(&self) -> &NamespaceRoots {
    &self.roots
  }

  pub fn is_installed(&self, namespace: Namespace, name: &str) -> bool {
    self.get(namespace, name).is_some()
  }

  pub fn get(&self, namespace: Namespace, name: &str) -> Option<&InstalledPackage> {
    self.bucket(namespace).iter().find(|r| r.name == name)
  }

  /// Insert a record for `descriptor.name`, or overwrite its version if one
  /// exists. Returns the previously recorded version.
  pub fn record_install(&mut self, namespace: Namespace, descriptor: &PackageDescriptor) -> Option<String> {
    if let Some(existing) = self
      .bucket_mut(namespace)
      .iter_mut()
      .find(|r| r.name == descriptor.name)
    {
      return Some(std::mem::replace(&mut existing.version, descriptor.version.clone()));
    }

    let installed_at = self.next_seq;
    self.bucket_mut(namespace).push(InstalledPackage {
      namespace,
      name: descriptor.name.clone(),
      version: descriptor.version.clone(),
      installed_at,
    });
    self.next_seq = match installed_at.checked_add(1) {
      Some(next) => next,
      None => self.renumber(),
    };
    None
  }

  /// Remove and return the record of `name`. Removing an absent package is
  /// an error.
  pub fn remove(&mut self, namespace: Namespace, name: &str) -> Result<InstalledPackage, PackageError> {
    let bucket = self.bucket_mut(namespace);
    let index = bucket
      .iter()
      .position(|r| r.name == name)
      .ok_or_else(|| PackageError::PackageNotFound {
        namespace,
        name: name.to_string(),
      })?;
    Ok(bucket.remove(index))
  }

  /// Installed package names of `namespace`, in insertion order.
  pub fn list(&self, namespace: Namespace) -> Names<'_> {
    Names {
      inner: self.bucket(namespace).iter(),
    }
  }

  /// All records, `standard` first.
  pub fn records(&self) -> impl Iterator<Item = &InstalledPackage> {
    self.standard.iter().chain(self.obn.iter())
  }

  pub fn len(&self) -> usize {
    self.standard.len() + self.obn.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Reassign `installed_at` densely in install order and return the next
  /// free sequence number.
  fn renumber(&mut self) -> u64 {
    let mut all: Vec<&mut InstalledPackage> = self.standard.iter_mut().chain(self.obn.iter_mut()).collect();
    all.sort_by_key(|r| r.installed_at);
    for (seq, record) in (0u64..).zip(all.iter_mut()) {
      record.installed_at = seq;
    }
    all.len() as u64
  }

  fn bucket(&self, namespace: Namespace) -> &[InstalledPackage] {
    match namespace {
      Namespace::Standard => &self.standard,
      Namespace::Obn => &self.obn,
    }
  }

  fn bucket_mut(&mut self, namespace: Namespace) -> &mut Vec<InstalledPackage> {
    match namespace {
      Namespace::Standard => &mut self.standard,
      Namespace::Obn => &mut self.obn,
    }
  }
}

/// Lazy sequence of package names. Clone it to iterate again from the start.
#[derive(Debug, Clone)]
pub struct Names<'a> {
  inner: slice::Iter<'a, InstalledPackage>,
}

impl<'a> Iterator for Names<'a> {
  type Item = &'a str;

  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next().map(|r| r.name.as_str())
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl ExactSizeIterator for Names<'_> {}

impl FusedIterator for Names<'_> {}
