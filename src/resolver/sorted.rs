//! Static resolver over a sorted package set.
//!
//! # Lookup
//! - Binary search for the first package path `>=` the request path
//! - Exact hit returns immediately
//! - The entry just before it is usually the owning parent
//! - Otherwise scan all smaller entries for the deepest parent
//!
//! The fallback scan is O(k) in the number of smaller entries. Package sets
//! are small and static, so this stays well below request overhead.

use std::collections::HashSet;

use crate::config::PackageConfig;
use crate::error::{Error, InvalidPackage, Result};
use crate::package::Package;
use crate::resolver::Resolver;

/// Resolver over a fixed, path-sorted set of packages.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    packages: Vec<Package>,
}

impl StaticResolver {
    /// Normalize, validate and sort a package set.
    ///
    /// Fails on the first package that does not normalize, or on the first
    /// path already used by an earlier package.
    pub fn new<I>(packages: I) -> Result<Self>
    where
        I: IntoIterator<Item = PackageConfig>,
    {
        let mut seen = HashSet::new();
        let mut normalized = Vec::new();

        for raw in packages {
            let pkg = Package::normalize(&raw)?;

            if !seen.insert(pkg.path.clone()) {
                return Err(InvalidPackage::DuplicatePath(pkg.path).into());
            }

            normalized.push(pkg);
        }

        normalized.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(Self {
            packages: normalized,
        })
    }

    /// Packages in path order.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    fn lookup(&self, path: &str) -> Option<&Package> {
        let i = self
            .packages
            .partition_point(|pkg| pkg.path.as_str() < path);

        if let Some(pkg) = self.packages.get(i).filter(|pkg| pkg.path == path) {
            return Some(pkg);
        }

        if let Some(parent) = i.checked_sub(1).map(|j| &self.packages[j]) {
            if remainder(path, &parent.path).is_some() {
                return Some(parent);
            }
        }

        // Nested packages, e.g. /foo and /foo/bar with /foo/baz requested.
        self.packages[..i]
            .iter()
            .filter_map(|pkg| remainder(path, &pkg.path).map(|rest| (rest.len(), pkg)))
            .min_by_key(|(len, _)| *len)
            .map(|(_, pkg)| pkg)
    }
}

impl Resolver for StaticResolver {
    fn resolve_package(&self, path: &str) -> Result<Package> {
        self.lookup(path).cloned().ok_or(Error::PackageNotFound)
    }
}

/// Part of `path` after `parent` and a `/` separator.
fn remainder<'a>(path: &'a str, parent: &str) -> Option<&'a str> {
    path.strip_prefix(parent)?.strip_prefix('/')
}
