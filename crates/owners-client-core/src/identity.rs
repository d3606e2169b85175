//! Owner identities and the owners-by-path mapping.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// The token an OWNERS file uses to grant ownership to anyone.
pub const EVERYONE: &str = "*";

/// An opaque owner or reviewer identity, usually an email address.
///
/// The core only compares identities; it never looks inside them. The
/// wildcard [`EVERYONE`] is an identity like any other.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Creates an identity from any string-like value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The wildcard identity `*`.
    pub fn everyone() -> Self {
        Self(EVERYONE.to_string())
    }

    /// Returns true if this is the wildcard identity.
    pub fn is_everyone(&self) -> bool {
        self.0 == EVERYONE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for Identity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Owners of each path, in the order the backend ranks them.
pub type OwnersByPath = BTreeMap<String, Vec<Identity>>;

/// Removes repeated paths, keeping the first occurrence of each.
pub(crate) fn distinct_paths(paths: &[String]) -> Vec<&String> {
    let mut seen = std::collections::HashSet::new();
    paths.iter().filter(|p| seen.insert(p.as_str())).collect()
}
