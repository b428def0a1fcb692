//! Package resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Resolver construction (at startup):
//!     PackageConfig[]
//!     → Package::normalize (each, fail fast)
//!     → reject duplicate paths
//!     → sort by path
//!     → freeze as immutable StaticResolver
//!
//! Incoming request path
//!     → StaticResolver (exact hit, parent fast path, prefix scan)
//!     → MultiResolver (first resolver with a package wins)
//!     → Package or PackageNotFound
//! ```
//!
//! # Design Decisions
//! - Resolvers are immutable after construction (thread-safe without locks)
//! - Lookups are synchronous and never suspend
//! - Most specific package wins; "not found" is an explicit error

pub mod multi;
pub mod sorted;

use std::sync::Arc;

use crate::error::Result;
use crate::package::Package;

pub use multi::MultiResolver;
pub use sorted::StaticResolver;

/// Resolves request paths to the package owning them.
pub trait Resolver: Send + Sync {
    /// Resolve the package for a given path.
    ///
    /// Returns [`Error::PackageNotFound`](crate::Error::PackageNotFound) if no
    /// package owns the path.
    fn resolve_package(&self, path: &str) -> Result<Package>;
}

impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    fn resolve_package(&self, path: &str) -> Result<Package> {
        (**self).resolve_package(path)
    }
}

impl<R: Resolver + ?Sized> Resolver for Box<R> {
    fn resolve_package(&self, path: &str) -> Result<Package> {
        (**self).resolve_package(path)
    }
}
