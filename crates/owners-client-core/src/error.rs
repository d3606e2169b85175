//! Error types for owner resolution and reviewer suggestion.
//!
//! [`OwnersError`] is returned by every [`OwnersClient`](crate::OwnersClient)
//! operation. Backend-specific causes are carried as a [`ResolutionError`].

use crate::remote::ReviewServerError;
use thiserror::Error;

/// An error returned by an owners client operation.
#[derive(Debug, Error)]
pub enum OwnersError {
    /// The backend could not resolve the owners of a path.
    #[error("could not resolve owners for '{path}': {source}")]
    Resolution {
        /// The path being resolved.
        path: String,
        /// What went wrong in the backend.
        #[source]
        source: ResolutionError,
    },

    /// A path handed to the suggestion search has no owners at all.
    #[error("path '{path}' has no owners, no set of reviewers can cover it")]
    Uncoverable {
        /// The path without owners.
        path: String,
    },
}

impl OwnersError {
    /// Creates a resolution error for the given path.
    pub fn resolution(path: impl Into<String>, source: impl Into<ResolutionError>) -> Self {
        Self::Resolution {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Creates an uncoverable path error.
    pub fn uncoverable(path: impl Into<String>) -> Self {
        Self::Uncoverable { path: path.into() }
    }

    /// Returns the path the error refers to.
    pub fn path(&self) -> &str {
        match self {
            OwnersError::Resolution { path, .. } => path,
            OwnersError::Uncoverable { path } => path,
        }
    }
}

/// The backend-specific reason a path could not be resolved.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// Reading a file from the repository failed.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// The repository-relative file path.
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An OWNERS file contains a line that cannot be interpreted.
    #[error("{path}: {source}")]
    OwnersFile {
        /// The repository-relative OWNERS file path.
        path: String,
        #[source]
        source: OwnersFileError,
    },

    /// A `per-file` glob could not be compiled.
    #[error("{path}: invalid per-file glob '{glob}': {reason}")]
    InvalidGlob {
        /// The OWNERS file declaring the glob.
        path: String,
        /// The glob text.
        glob: String,
        /// Why compilation failed.
        reason: String,
    },

    /// `file:` includes form a cycle.
    #[error("include cycle through '{path}'")]
    IncludeCycle {
        /// The file that was included twice.
        path: String,
    },

    /// Asking version control for pre-change OWNERS content failed.
    #[error("git {command} failed: {message}")]
    Git {
        /// The git subcommand that failed.
        command: String,
        /// stderr output or the spawn error.
        message: String,
    },

    /// The review server returned an error.
    #[error(transparent)]
    ReviewServer(#[from] ReviewServerError),
}

impl ResolutionError {
    /// Creates an I/O error for a repository file.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a git command error.
    pub fn git(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Git {
            command: command.into(),
            message: message.into(),
        }
    }
}

/// A line of an OWNERS file that could not be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("line {line}: {message}: '{content}'")]
pub struct OwnersFileError {
    /// The line number (1-based).
    pub line: usize,
    /// The offending line, trimmed.
    pub content: String,
    /// Description of the problem.
    pub message: String,
}

impl OwnersFileError {
    pub fn new(line: usize, content: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            line,
            content: content.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_error_names_path_and_cause() {
        let err = OwnersError::resolution(
            "src/main.rs",
            ResolutionError::io(
                "src/OWNERS",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ),
        );
        let message = err.to_string();
        assert!(message.contains("src/main.rs"));
        assert_eq!(err.path(), "src/main.rs");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn uncoverable_error_display() {
        let err = OwnersError::uncoverable("orphan.txt");
        assert!(err.to_string().contains("orphan.txt"));
        assert!(matches!(err, OwnersError::Uncoverable { .. }));
    }

    #[test]
    fn owners_file_error_display() {
        let err = OwnersFileError::new(3, "per-file", "missing '='");
        assert_eq!(err.to_string(), "line 3: missing '=': 'per-file'");
    }

    #[test]
    fn review_server_error_converts() {
        let err: ResolutionError = ReviewServerError::InvalidResponse("empty body".into()).into();
        assert!(matches!(err, ResolutionError::ReviewServer(_)));
    }
}
