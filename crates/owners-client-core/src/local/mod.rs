//! Owners backend that reads OWNERS files from a repository checkout.
//!
//! OWNERS files modified by the change under review are read at their
//! pre-change revision, see [`OwnersHistory`].

mod database;
mod history;
mod owners_file;
mod repo;

pub use history::{GitHistory, NoHistory, OwnersHistory};
pub use owners_file::{Directive, Grant, OwnersFile, parse_owners_file};
pub use repo::{FsRepository, RepoReader};

use crate::client::{BatchConfig, OwnersClient};
use crate::error::{OwnersError, ResolutionError};
use crate::identity::{Identity, OwnersByPath, distinct_paths};
use crate::suggest::SuggestConfig;
use async_trait::async_trait;
use database::OwnersDatabase;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Where the local backend finds OWNERS files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Root of the repository checkout.
    pub root: PathBuf,
    /// Revision the change is based on. OWNERS files changed since then are
    /// read at this revision. Without one, the working tree is used as is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_revision: Option<String>,
}

impl LocalConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            base_revision: None,
        }
    }

    pub fn with_base_revision(mut self, base_revision: impl Into<String>) -> Self {
        self.base_revision = Some(base_revision.into());
        self
    }
}

/// An [`OwnersClient`] over the OWNERS files of a repository snapshot.
///
/// Paths without any OWNERS coverage have no owners.
pub struct LocalOwnersClient {
    reader: Box<dyn RepoReader>,
    originals: HashMap<String, Option<String>>,
    batch: BatchConfig,
    suggest: SuggestConfig,
}

impl LocalOwnersClient {
    /// Creates a client reading from `reader`, with the pre-change content
    /// of OWNERS files taken from `history`.
    pub fn new(
        reader: impl RepoReader + 'static,
        history: &dyn OwnersHistory,
    ) -> Result<Self, ResolutionError> {
        let originals = history.original_owners_files()?;
        Ok(Self {
            reader: Box::new(reader),
            originals,
            batch: BatchConfig::default(),
            suggest: SuggestConfig::default(),
        })
    }

    /// Creates a client for a checkout on disk.
    pub fn from_config(config: &LocalConfig) -> Result<Self, ResolutionError> {
        let reader = FsRepository::new(&config.root);
        match &config.base_revision {
            Some(base) => Self::new(reader, &GitHistory::new(&config.root, base)),
            None => Self::new(reader, &NoHistory),
        }
    }

    /// Sets the batch lookup settings.
    pub fn with_batch_config(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;
        self
    }

    /// Sets the suggestion settings.
    pub fn with_suggest_config(mut self, suggest: SuggestConfig) -> Self {
        self.suggest = suggest;
        self
    }

    fn database(&self) -> OwnersDatabase<'_> {
        OwnersDatabase::new(self.reader.as_ref(), &self.originals)
    }
}

impl std::fmt::Debug for LocalOwnersClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalOwnersClient")
            .field("reader", &"<dyn RepoReader>")
            .field("originals", &self.originals.keys().collect::<Vec<_>>())
            .field("batch", &self.batch)
            .field("suggest", &self.suggest)
            .finish()
    }
}

#[async_trait]
impl OwnersClient for LocalOwnersClient {
    async fn list_owners(&self, path: &str) -> Result<Vec<Identity>, OwnersError> {
        let owners = self
            .database()
            .owners(path)
            .map_err(|e| OwnersError::resolution(path, e))?;
        debug!("{} has {} owners", path, owners.len());
        Ok(owners)
    }

    /// Resolves all paths against one shared cache of parsed OWNERS files.
    async fn batch_list_owners(&self, paths: &[String]) -> Result<OwnersByPath, OwnersError> {
        let paths = distinct_paths(paths);
        debug!("Listing owners for {} paths", paths.len());

        let mut database = self.database();
        let mut result = OwnersByPath::new();
        for path in paths {
            let owners = database
                .owners(path)
                .map_err(|e| OwnersError::resolution(path.as_str(), e))?;
            result.insert(path.clone(), owners);
        }
        Ok(result)
    }

    fn batch_config(&self) -> BatchConfig {
        self.batch
    }

    fn suggest_config(&self) -> SuggestConfig {
        self.suggest
    }
}
