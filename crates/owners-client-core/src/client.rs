//! The owners client trait.
//!
//! [`OwnersClient`] is the interface every consumer uses to interact with
//! OWNERS data. Backends only implement [`OwnersClient::list_owners`]; batch
//! lookup, approval status and reviewer suggestion are built on top of it.
//!
//! # Example
//!
//! ```rust,ignore
//! use owners_client_core::{OwnersClient, ApprovalStatus};
//!
//! let paths = vec!["src/lib.rs".to_string(), "docs/README.md".to_string()];
//! let status = client.get_files_approval_status(&paths, &approvers, &reviewers).await?;
//! if status.values().all(|s| *s == ApprovalStatus::Approved) {
//!     println!("change is fully approved");
//! } else {
//!     println!("suggested reviewers: {:?}", client.suggest_owners(&paths).await?);
//! }
//! ```

use crate::approval::{ApprovalStatus, files_approval_status};
use crate::error::OwnersError;
use crate::identity::{Identity, OwnersByPath, distinct_paths};
use crate::suggest::{SuggestConfig, suggest_owners};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use futures::{StreamExt, TryStreamExt, stream};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Configuration for batch owner lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum number of per-path lookups in flight at once.
    /// Default: 8
    pub max_concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { max_concurrency: 8 }
    }
}

impl BatchConfig {
    /// Creates a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the concurrency bound. Zero is treated as one.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }
}

/// Interact with OWNERS data for a repository.
///
/// Implementations are chosen when the client is constructed, see
/// [`ClientConfig::build`](crate::ClientConfig::build):
/// - [`LocalOwnersClient`](crate::local::LocalOwnersClient) reads OWNERS files
///   from a repository checkout
/// - [`RemoteOwnersClient`](crate::remote::RemoteOwnersClient) asks a review
///   server
#[async_trait]
pub trait OwnersClient: Send + Sync {
    /// Lists all owners of a path, better owners first.
    ///
    /// Whether an unowned path yields an empty list or an error is up to
    /// the backend.
    async fn list_owners(&self, path: &str) -> Result<Vec<Identity>, OwnersError>;

    /// Returns the batch lookup settings.
    fn batch_config(&self) -> BatchConfig {
        BatchConfig::default()
    }

    /// Returns the suggestion settings.
    fn suggest_config(&self) -> SuggestConfig {
        SuggestConfig::default()
    }

    /// Lists the owners of several paths.
    ///
    /// Equivalent to calling [`list_owners`](Self::list_owners) for every
    /// path, with up to [`BatchConfig::max_concurrency`] lookups running at
    /// once. The first failing lookup fails the whole batch.
    async fn batch_list_owners(&self, paths: &[String]) -> Result<OwnersByPath, OwnersError> {
        let paths = distinct_paths(paths);
        let limit = self.batch_config().max_concurrency.max(1);
        debug!("Listing owners for {} paths ({} at a time)", paths.len(), limit);

        // Boxed to keep the batch future `Send`.
        let lookups: Vec<BoxFuture<'_, Result<(String, Vec<Identity>), OwnersError>>> = paths
            .into_iter()
            .map(|path| {
                async move {
                    let owners = self.list_owners(path).await?;
                    Ok((path.clone(), owners))
                }
                .boxed()
            })
            .collect();
        let resolved: Vec<(String, Vec<Identity>)> =
            stream::iter(lookups).buffered(limit).try_collect().await?;

        Ok(resolved.into_iter().collect())
    }

    /// Checks the approval status of the given paths.
    ///
    /// Useful before a change exists on the review server, given the
    /// identities that approved it and those currently reviewing it.
    async fn get_files_approval_status(
        &self,
        paths: &[String],
        approvers: &HashSet<Identity>,
        reviewers: &HashSet<Identity>,
    ) -> Result<BTreeMap<String, ApprovalStatus>, OwnersError> {
        let owners_by_path = self.batch_list_owners(paths).await?;
        Ok(files_approval_status(&owners_by_path, approvers, reviewers))
    }

    /// Suggests a small set of owners able to approve every path.
    async fn suggest_owners(&self, paths: &[String]) -> Result<Vec<Identity>, OwnersError> {
        let owners_by_path = self.batch_list_owners(paths).await?;
        suggest_owners(paths, &owners_by_path, &self.suggest_config())
    }
}
