//! Owner lookup over the OWNERS files of a repository snapshot.
//!
//! Resolution walks from a path towards the repository root. At each step
//! the current object (file or directory) gets the owners of matching
//! `per-file` rules in its parent's OWNERS file, then the owners of its own
//! OWNERS file when it is a directory. The walk stops at the root or at the
//! first object under `set noparent`.

use super::owners_file::{Directive, Grant, OwnersFile, parse_owners_file};
use super::repo::RepoReader;
use crate::error::ResolutionError;
use crate::identity::Identity;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log::trace;
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::Arc;

const OWNERS_FILE_NAME: &str = "OWNERS";

/// A `per-file` rule, compiled.
#[derive(Debug)]
struct PerFileRule {
    globs: GlobSet,
    owners: Vec<Identity>,
    no_parent: bool,
}

/// Compiles the globs of a `per-file` line. They match file names within
/// the OWNERS directory only.
fn compile_globs(path: &str, globs: &[String]) -> Result<GlobSet, ResolutionError> {
    let mut builder = GlobSetBuilder::new();
    for glob in globs {
        if glob.contains('/') {
            return Err(ResolutionError::InvalidGlob {
                path: path.to_string(),
                glob: glob.clone(),
                reason: "per-file globs cannot refer to subdirectories".to_string(),
            });
        }
        let compiled = GlobBuilder::new(glob)
            .literal_separator(true)
            .build()
            .map_err(|e| invalid_glob(path, glob, e))?;
        builder.add(compiled);
    }
    builder
        .build()
        .map_err(|e| invalid_glob(path, &globs.join(","), e))
}

fn invalid_glob(path: &str, glob: &str, error: globset::Error) -> ResolutionError {
    ResolutionError::InvalidGlob {
        path: path.to_string(),
        glob: glob.to_string(),
        reason: error.kind().to_string(),
    }
}

/// The compiled OWNERS file of one directory.
#[derive(Debug, Default)]
struct DirectoryOwners {
    /// Directory-wide owners, includes expanded in place.
    owners: Vec<Identity>,
    no_parent: bool,
    per_file: Vec<PerFileRule>,
}

impl DirectoryOwners {
    fn matching_rules<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a PerFileRule> {
        self.per_file.iter().filter(move |rule| rule.globs.is_match(name))
    }
}

/// Resolves owners, caching every OWNERS file it reads.
///
/// OWNERS files listed in `originals` are read from there instead of the
/// snapshot; a `None` entry means the file did not exist before the change.
pub(crate) struct OwnersDatabase<'a> {
    reader: &'a dyn RepoReader,
    originals: &'a HashMap<String, Option<String>>,
    directories: HashMap<String, Option<Arc<DirectoryOwners>>>,
}

impl<'a> OwnersDatabase<'a> {
    pub(crate) fn new(
        reader: &'a dyn RepoReader,
        originals: &'a HashMap<String, Option<String>>,
    ) -> Self {
        Self {
            reader,
            originals,
            directories: HashMap::new(),
        }
    }

    /// Returns the owners of `path`, nearest owners first, without duplicates.
    pub(crate) fn owners(&mut self, path: &str) -> Result<Vec<Identity>, ResolutionError> {
        let mut object = normalize(path);
        let mut owners = Vec::new();
        let mut seen = HashSet::new();
        let mut add = |found: &[Identity]| {
            for owner in found {
                if seen.insert(owner.clone()) {
                    owners.push(owner.clone());
                }
            }
        };

        loop {
            let mut stop = false;

            if let Some((parent, name)) = split_parent(&object) {
                if let Some(directory) = self.directory(parent)? {
                    for rule in directory.matching_rules(name) {
                        trace!("per-file rule in '{}' matches '{}'", parent, object);
                        add(&rule.owners);
                        stop |= rule.no_parent;
                    }
                }
            }

            if let Some(directory) = self.directory(&object)? {
                add(&directory.owners);
                stop |= directory.no_parent;
            }

            match split_parent(&object) {
                Some((parent, _)) if !stop => object = parent.to_string(),
                _ => break,
            }
        }

        Ok(owners)
    }

    fn directory(&mut self, dir: &str) -> Result<Option<Arc<DirectoryOwners>>, ResolutionError> {
        if let Some(cached) = self.directories.get(dir) {
            return Ok(cached.clone());
        }

        let path = owners_file_path(dir);
        let compiled = match self.read(&path)? {
            Some(content) => {
                trace!("Loaded {}", path);
                Some(Arc::new(self.compile(&path, &content)?))
            }
            None => None,
        };
        self.directories.insert(dir.to_string(), compiled.clone());
        Ok(compiled)
    }

    fn read(&self, path: &str) -> Result<Option<String>, ResolutionError> {
        if let Some(original) = self.originals.get(path) {
            trace!("Using pre-change content of {}", path);
            return Ok(original.clone());
        }
        if !self.reader.exists(path) {
            return Ok(None);
        }
        self.reader
            .read_to_string(path)
            .map_err(|e| ResolutionError::io(path, e))
    }

    fn compile(&self, path: &str, content: &str) -> Result<DirectoryOwners, ResolutionError> {
        let file = parse(path, content)?;
        let mut compiled = DirectoryOwners::default();
        let mut includes = vec![path.to_string()];

        for directive in file.directives {
            match directive {
                Directive::Owner(identity) => compiled.owners.push(identity),
                Directive::NoParent => compiled.no_parent = true,
                Directive::PerFile { globs, grants } => {
                    let mut rule = PerFileRule {
                        globs: compile_globs(path, &globs)?,
                        owners: Vec::new(),
                        no_parent: false,
                    };
                    for grant in grants {
                        match grant {
                            Grant::Owner(identity) => rule.owners.push(identity),
                            Grant::NoParent => rule.no_parent = true,
                            Grant::Include(target) => {
                                self.include(path, &target, &mut includes, &mut rule.owners)?;
                            }
                        }
                    }
                    compiled.per_file.push(rule);
                }
                Directive::Include(target) => {
                    self.include(path, &target, &mut includes, &mut compiled.owners)?;
                }
            }
        }

        Ok(compiled)
    }

    /// Appends the directory-wide owners of an included file.
    ///
    /// `per-file` and `set noparent` lines of included files do not apply.
    fn include(
        &self,
        from: &str,
        target: &str,
        includes: &mut Vec<String>,
        owners: &mut Vec<Identity>,
    ) -> Result<(), ResolutionError> {
        let path = include_path(from, target);
        if includes.contains(&path) {
            return Err(ResolutionError::IncludeCycle { path });
        }

        let content = self.read(&path)?.ok_or_else(|| {
            ResolutionError::io(
                path.as_str(),
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("included from '{from}' but does not exist"),
                ),
            )
        })?;
        let file = parse(&path, &content)?;

        includes.push(path.clone());
        for directive in file.directives {
            match directive {
                Directive::Owner(identity) => owners.push(identity),
                Directive::Include(next) => self.include(&path, &next, includes, owners)?,
                Directive::NoParent | Directive::PerFile { .. } => {}
            }
        }
        includes.pop();

        Ok(())
    }
}

fn parse(path: &str, content: &str) -> Result<OwnersFile, ResolutionError> {
    parse_owners_file(content).map_err(|source| ResolutionError::OwnersFile {
        path: path.to_string(),
        source,
    })
}

/// Normalizes a repository-relative path: no leading or trailing `/`, and
/// no `.` or `..` components. `..` never climbs above the root.
fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(part),
        }
    }
    parts.join("/")
}

/// Splits a normalized path into parent directory and name. The root has
/// no parent.
fn split_parent(path: &str) -> Option<(&str, &str)> {
    if path.is_empty() {
        return None;
    }
    Some(path.rsplit_once('/').unwrap_or(("", path)))
}

fn owners_file_path(dir: &str) -> String {
    if dir.is_empty() {
        OWNERS_FILE_NAME.to_string()
    } else {
        format!("{dir}/{OWNERS_FILE_NAME}")
    }
}

/// Resolves a `file:` include target. `//path` is relative to the root,
/// anything else to the including file's directory.
fn include_path(from: &str, target: &str) -> String {
    match target.strip_prefix('/') {
        Some(rooted) => normalize(rooted),
        None => {
            let dir = split_parent(from).map(|(dir, _)| dir).unwrap_or("");
            normalize(&format!("{dir}/{target}"))
        }
    }
}
