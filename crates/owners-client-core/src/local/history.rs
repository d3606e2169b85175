//! Pre-change OWNERS content.
//!
//! A change must be approved under the OWNERS rules in force before it, so
//! OWNERS files the change modifies are read at the base revision.

use crate::error::ResolutionError;
use log::debug;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Output};

const OWNERS_FILE_NAME: &str = "OWNERS";

/// Knows which OWNERS files a change touches and what they used to say.
pub trait OwnersHistory: Send + Sync {
    /// Repository-relative paths of OWNERS files changed by the change.
    fn changed_owners_files(&self) -> Result<Vec<String>, ResolutionError>;

    /// Content of `path` at the base revision, or `None` if it did not
    /// exist there.
    fn original_contents(&self, path: &str) -> Result<Option<String>, ResolutionError>;

    /// Pre-change content of every changed OWNERS file.
    fn original_owners_files(&self) -> Result<HashMap<String, Option<String>>, ResolutionError> {
        let changed = self.changed_owners_files()?;
        debug!("{} OWNERS files changed since base", changed.len());
        changed
            .into_iter()
            .map(|path| {
                let contents = self.original_contents(&path)?;
                Ok((path, contents))
            })
            .collect()
    }
}

/// History of a change that touches no OWNERS file.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl OwnersHistory for NoHistory {
    fn changed_owners_files(&self) -> Result<Vec<String>, ResolutionError> {
        Ok(Vec::new())
    }

    fn original_contents(&self, _path: &str) -> Result<Option<String>, ResolutionError> {
        Ok(None)
    }
}

/// Reads OWNERS history from a git checkout.
///
/// The change is the difference between `base` and the working tree.
#[derive(Debug, Clone)]
pub struct GitHistory {
    root: PathBuf,
    base: String,
}

impl GitHistory {
    pub fn new(root: impl Into<PathBuf>, base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base: base.into(),
        }
    }

    fn git(&self, args: &[&str]) -> Result<Output, ResolutionError> {
        Command::new("git")
            .current_dir(&self.root)
            .args(args)
            .output()
            .map_err(|e| ResolutionError::git(args[0], e.to_string()))
    }

    fn git_stdout(&self, args: &[&str]) -> Result<String, ResolutionError> {
        let output = self.git(args)?;
        if !output.status.success() {
            return Err(ResolutionError::git(
                args[0],
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl OwnersHistory for GitHistory {
    fn changed_owners_files(&self) -> Result<Vec<String>, ResolutionError> {
        let stdout = self.git_stdout(&[
            "diff",
            "--name-status",
            "--no-renames",
            "--ignore-submodules=all",
            &self.base,
            "--",
        ])?;
        Ok(parse_name_status(&stdout))
    }

    fn original_contents(&self, path: &str) -> Result<Option<String>, ResolutionError> {
        let object = format!("{}:{}", self.base, path);
        if !self.git(&["cat-file", "-e", &object])?.status.success() {
            return Ok(None);
        }
        self.git_stdout(&["show", &object]).map(Some)
    }
}

/// Extracts OWNERS paths from `git diff --name-status` output.
fn parse_name_status(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split_once('\t'))
        .map(|(_, path)| path.trim())
        .filter(|path| path.rsplit('/').next() == Some(OWNERS_FILE_NAME))
        .map(str::to_string)
        .collect()
}
