//! Vanity import path server for Go packages.
//!
//! Maps request paths to configured packages and answers with the
//! `go-import` / `go-source` meta tags pointing at the real repository.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod package;
pub mod resolver;

pub use config::VanityConfig;
pub use error::{Error, InvalidPackage, Result};
pub use http::{HttpServer, ServerOptions};
pub use lifecycle::Shutdown;
pub use package::{Package, Vcs};
pub use resolver::{MultiResolver, Resolver, StaticResolver};
