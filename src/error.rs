//! Error definitions shared by packages, resolvers and the server.

use thiserror::Error;

/// Errors produced while building or querying resolvers.
#[derive(Debug, Error)]
pub enum Error {
    /// No configured package owns the requested path.
    #[error("vanityurl: package not found")]
    PackageNotFound,

    /// A package definition is malformed or conflicts with another one.
    #[error("vanityurl: invalid package: {0}")]
    InvalidPackage(#[from] InvalidPackage),

    /// A VCS token outside of `git`, `svn`, `hg` and `bzr`.
    #[error("vanityurl: invalid vcs: {0:?}")]
    InvalidVcs(String),

    /// Failure reported by a resolver backed by some other source.
    #[error("vanityurl: resolver failure: {0}")]
    Resolver(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Package page template failed to render.
    #[error("vanityurl: render failure: {0}")]
    Render(#[from] tera::Error),
}

impl Error {
    /// Returns true for [`Error::PackageNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::PackageNotFound)
    }
}

/// Reasons a package definition is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPackage {
    #[error("invalid repository url: {0}")]
    RepositoryUrl(#[from] url::ParseError),

    #[error("repository url contains query parameters: {0}")]
    QueryParameters(String),

    #[error("invalid repository url scheme: {0}")]
    Scheme(String),

    #[error("could not detect vcs")]
    UndetectedVcs,

    #[error("duplicate path: {0}")]
    DuplicatePath(String),
}

/// Result type for package and resolver operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::PackageNotFound.to_string(), "vanityurl: package not found");

        let err = Error::from(InvalidPackage::DuplicatePath("/foo".into()));
        assert_eq!(err.to_string(), "vanityurl: invalid package: duplicate path: /foo");

        let err = Error::InvalidVcs("cvs".into());
        assert!(err.to_string().contains("\"cvs\""));
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::PackageNotFound.is_not_found());
        assert!(!Error::from(InvalidPackage::UndetectedVcs).is_not_found());
    }
}
