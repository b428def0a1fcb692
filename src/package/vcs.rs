//! Version control system kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Version control system of a package repository.
///
/// Serialized with the tokens understood by the `go-import` meta tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Vcs {
    Git,
    Svn,
    Mercurial,
    Bazaar,
}

impl Vcs {
    pub const ALL: [Vcs; 4] = [Vcs::Git, Vcs::Svn, Vcs::Mercurial, Vcs::Bazaar];

    pub fn as_str(self) -> &'static str {
        match self {
            Vcs::Git => "git",
            Vcs::Svn => "svn",
            Vcs::Mercurial => "hg",
            Vcs::Bazaar => "bzr",
        }
    }
}

impl fmt::Display for Vcs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vcs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Vcs::ALL
            .into_iter()
            .find(|vcs| vcs.as_str() == s)
            .ok_or_else(|| Error::InvalidVcs(s.to_string()))
    }
}

impl TryFrom<String> for Vcs {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Vcs> for &'static str {
    fn from(vcs: Vcs) -> Self {
        vcs.as_str()
    }
}
