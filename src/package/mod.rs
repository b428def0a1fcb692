//! Package records.
//!
//! # Data Flow
//! ```text
//! PackageConfig (raw, from config file)
//!     → Package::normalize (path cleanup, url rewrite, host detection)
//!     → Package (immutable, owned by a resolver)
//!     → render.rs (go-import / go-source meta tags)
//! ```
//!
//! # Design Decisions
//! - A normalized package always has a VCS kind and an http(s) url
//! - Normalization is pure and idempotent
//! - Detection runs once here, never per request

pub mod detect;
pub mod render;
pub mod vcs;

use serde::Serialize;
use url::Url;

use crate::config::PackageConfig;
use crate::error::{InvalidPackage, Result};

use detect::split_authority_path;
pub use detect::{detect_display, detect_vcs};
pub use render::PackageTemplates;
pub use vcs::Vcs;

/// A normalized package served under a vanity import path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    /// Import path below the vanity host, e.g. `/foo`.
    pub path: String,
    pub vcs: Vcs,
    /// Value of the `go-source` meta tag after the import prefix. May be empty.
    pub display: String,
    /// `scheme://host/path` of the repository, host and path as configured.
    pub repository_url: String,
}

impl Package {
    /// Validate and canonicalize a raw package definition.
    ///
    /// Missing `vcs` and `display` are detected from the repository host.
    /// Returns [`InvalidPackage`] if the package is configured incorrectly.
    pub fn normalize(raw: &PackageConfig) -> Result<Package> {
        let path = normalize_path(&raw.path);
        let repository_url = normalize_repository_url(&raw.repository_url)?;

        let vcs = raw
            .vcs
            .or_else(|| detect_vcs(&repository_url))
            .ok_or(InvalidPackage::UndetectedVcs)?;

        let display = if raw.display.is_empty() {
            detect_display(&repository_url).unwrap_or_default()
        } else {
            raw.display.clone()
        };

        Ok(Package {
            path,
            vcs,
            display,
            repository_url,
        })
    }

    /// Part of `request_path` below this package, without the separating `/`.
    ///
    /// Empty when the request path is the package path itself.
    pub fn subpath<'a>(&self, request_path: &'a str) -> &'a str {
        request_path
            .strip_prefix(self.path.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or("")
    }
}

impl From<Package> for PackageConfig {
    fn from(pkg: Package) -> Self {
        PackageConfig {
            path: pkg.path,
            vcs: Some(pkg.vcs),
            display: pkg.display,
            repository_url: pkg.repository_url,
        }
    }
}

fn normalize_path(raw: &str) -> String {
    let path = raw.trim().trim_end_matches(|c: char| c == '/' || c.is_whitespace());

    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Validates with [`Url`], then rebuilds from the text so host case,
/// dot-segments and escaping stay as configured.
fn normalize_repository_url(raw: &str) -> std::result::Result<String, InvalidPackage> {
    let raw = raw.trim();
    let url = Url::parse(raw)?;

    if url.query_pairs().next().is_some() {
        return Err(InvalidPackage::QueryParameters(
            url.query().unwrap_or_default().to_string(),
        ));
    }

    if !matches!(url.scheme(), "http" | "https") {
        return Err(InvalidPackage::Scheme(url.scheme().to_string()));
    }

    let (authority, path) = split_authority_path(raw).unwrap_or_default();

    Ok(format!("{}://{}{}", url.scheme(), authority, path))
}
