//! Composite resolver chaining several package sources.

use crate::error::{Error, Result};
use crate::package::Package;
use crate::resolver::Resolver;

/// Tries each resolver in order; the first package found wins.
///
/// "Not found" moves on to the next resolver. Any other error aborts the
/// lookup and is returned unchanged.
#[derive(Default)]
pub struct MultiResolver {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl MultiResolver {
    pub fn new(resolvers: Vec<Box<dyn Resolver>>) -> Self {
        Self { resolvers }
    }

    /// Append a resolver consulted after all existing ones.
    pub fn with(mut self, resolver: impl Resolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl Resolver for MultiResolver {
    fn resolve_package(&self, path: &str) -> Result<Package> {
        for resolver in &self.resolvers {
            match resolver.resolve_package(path) {
                Err(Error::PackageNotFound) => continue,
                result => return result,
            }
        }

        Err(Error::PackageNotFound)
    }
}

impl std::fmt::Debug for MultiResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiResolver")
            .field("resolvers", &self.resolvers.len())
            .finish()
    }
}
