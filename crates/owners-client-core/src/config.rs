//! Client configuration.
//!
//! A [`ClientConfig`] picks the backend once, when the client is built.
//!
//! ```json
//! {
//!   "backend": { "kind": "local", "root": "/src/project", "base_revision": "origin/main" },
//!   "batch": { "max_concurrency": 16 },
//!   "suggest": { "min_owners": 2 }
//! }
//! ```

use crate::client::{BatchConfig, OwnersClient};
use crate::error::ResolutionError;
use crate::local::{LocalConfig, LocalOwnersClient};
use crate::remote::{RemoteConfig, RemoteOwnersClient, ReviewServer};
use crate::suggest::SuggestConfig;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Which backend resolves owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// OWNERS files in a repository checkout.
    Local(LocalConfig),
    /// A review server.
    Remote(RemoteConfig),
}

/// Complete configuration of an owners client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub backend: BackendConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub suggest: SuggestConfig,
}

/// Errors building a client from its configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text is not valid.
    #[error("invalid client configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A remote backend was configured but no review server was supplied.
    #[error("remote backend for {host} needs a review server")]
    MissingReviewServer {
        /// The configured host.
        host: String,
    },

    /// The local backend could not read the change history.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

impl ClientConfig {
    /// Creates a config for `backend` with default batch and suggestion
    /// settings.
    pub fn new(backend: BackendConfig) -> Self {
        Self {
            backend,
            batch: BatchConfig::default(),
            suggest: SuggestConfig::default(),
        }
    }

    /// Parses a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the batch lookup settings.
    pub fn with_batch(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;
        self
    }

    /// Sets the suggestion settings.
    pub fn with_suggest(mut self, suggest: SuggestConfig) -> Self {
        self.suggest = suggest;
        self
    }

    /// Builds the configured client.
    ///
    /// `server` is required for the remote backend and ignored otherwise.
    pub fn build(
        &self,
        server: Option<Arc<dyn ReviewServer>>,
    ) -> Result<Box<dyn OwnersClient>, ConfigError> {
        match &self.backend {
            BackendConfig::Local(local) => {
                debug!("Building local owners client for {}", local.root.display());
                let client = LocalOwnersClient::from_config(local)?
                    .with_batch_config(self.batch)
                    .with_suggest_config(self.suggest);
                Ok(Box::new(client))
            }
            BackendConfig::Remote(remote) => {
                let server = server.ok_or_else(|| ConfigError::MissingReviewServer {
                    host: remote.host.clone(),
                })?;
                debug!("Building remote owners client for {}", remote.host);
                let client = RemoteOwnersClient::new(remote.clone(), server)
                    .with_batch_config(self.batch)
                    .with_suggest_config(self.suggest);
                Ok(Box::new(client))
            }
        }
    }
}
