//! Owners backend that asks a review server.
//!
//! The server ranks the owners of each file itself; this backend only
//! translates its account records into identities.

mod review_server;

pub use review_server::{
    AccountInfo, CodeOwner, ReviewServer, ReviewServerError, parse_owners_response,
};

use crate::client::{BatchConfig, OwnersClient};
use crate::error::OwnersError;
use crate::identity::Identity;
use crate::suggest::SuggestConfig;
use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where the remote backend looks up owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// The review server host.
    pub host: String,
    /// The project (repository) name.
    pub project: String,
    /// The branch the change targets.
    pub branch: String,
}

impl RemoteConfig {
    pub fn new(
        host: impl Into<String>,
        project: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            project: project.into(),
            branch: branch.into(),
        }
    }
}

/// An [`OwnersClient`] backed by a [`ReviewServer`].
pub struct RemoteOwnersClient {
    config: RemoteConfig,
    server: Arc<dyn ReviewServer>,
    batch: BatchConfig,
    suggest: SuggestConfig,
}

impl RemoteOwnersClient {
    /// Creates a client querying `server` for the configured project.
    pub fn new(config: RemoteConfig, server: Arc<dyn ReviewServer>) -> Self {
        Self {
            config,
            server,
            batch: BatchConfig::default(),
            suggest: SuggestConfig::default(),
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

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }
}

impl std::fmt::Debug for RemoteOwnersClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteOwnersClient")
            .field("config", &self.config)
            .field("server", &"<dyn ReviewServer>")
            .field("batch", &self.batch)
            .field("suggest", &self.suggest)
            .finish()
    }
}

#[async_trait]
impl OwnersClient for RemoteOwnersClient {
    async fn list_owners(&self, path: &str) -> Result<Vec<Identity>, OwnersError> {
        debug!(
            "Querying {} for owners of {} ({}@{})",
            self.config.host, path, self.config.project, self.config.branch
        );
        let entries = self
            .server
            .owners_for_file(&self.config.project, &self.config.branch, path)
            .await
            .map_err(|e| OwnersError::resolution(path, e))?;

        let owners = entries
            .iter()
            .filter_map(|entry| match entry.email() {
                Some(email) => Some(Identity::from(email)),
                None => {
                    warn!("Skipping owner of {} without an email: {:?}", path, entry.account);
                    None
                }
            })
            .collect();
        Ok(owners)
    }

    fn batch_config(&self) -> BatchConfig {
        self.batch
    }

    fn suggest_config(&self) -> SuggestConfig {
        self.suggest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolutionError;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A mock review server for testing.
    struct MockReviewServer {
        owners: HashMap<String, Vec<CodeOwner>>,
        unavailable: bool,
        requests: Mutex<Vec<(String, String, String)>>,
        call_count: AtomicUsize,
    }

    impl MockReviewServer {
        fn new() -> Self {
            Self {
                owners: HashMap::new(),
                unavailable: false,
                requests: Mutex::new(Vec::new()),
                call_count: AtomicUsize::new(0),
            }
        }

        fn with_owners(mut self, path: &str, owners: Vec<CodeOwner>) -> Self {
            self.owners.insert(path.to_string(), owners);
            self
        }

        fn unavailable(mut self) -> Self {
            self.unavailable = true;
            self
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReviewServer for MockReviewServer {
        async fn owners_for_file(
            &self,
            project: &str,
            branch: &str,
            path: &str,
        ) -> Result<Vec<CodeOwner>, ReviewServerError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push((
                project.to_string(),
                branch.to_string(),
                path.to_string(),
            ));
            if self.unavailable {
                return Err(ReviewServerError::Transport("connection refused".into()));
            }
            Ok(self.owners.get(path).cloned().unwrap_or_default())
        }
    }

    fn sample_owners() -> Vec<CodeOwner> {
        vec![
            CodeOwner::with_email("approver@example.com"),
            CodeOwner::with_email("reviewer@example.com"),
            CodeOwner::with_email("missing@example.com"),
        ]
    }

    fn client(server: Arc<MockReviewServer>) -> RemoteOwnersClient {
        RemoteOwnersClient::new(RemoteConfig::new("host", "project", "branch"), server)
    }

    #[tokio::test]
    async fn list_owners() {
        let server = Arc::new(MockReviewServer::new().with_owners("bar/everyone/foo.txt", sample_owners()));
        let owners = client(server.clone())
            .list_owners("bar/everyone/foo.txt")
            .await
            .unwrap();

        assert_eq!(
            owners,
            vec![
                Identity::from("approver@example.com"),
                Identity::from("reviewer@example.com"),
                Identity::from("missing@example.com"),
            ]
        );
        assert_eq!(
            server.requests.lock().unwrap()[0],
            (
                "project".to_string(),
                "branch".to_string(),
                "bar/everyone/foo.txt".to_string()
            )
        );
    }

    #[tokio::test]
    async fn skips_accounts_without_email() {
        let entries = vec![
            CodeOwner::default(),
            CodeOwner {
                account: Some(AccountInfo {
                    account_id: Some(42),
                    ..Default::default()
                }),
            },
            CodeOwner::with_email("kept@example.com"),
        ];
        let server = Arc::new(MockReviewServer::new().with_owners("a.txt", entries));
        let owners = client(server).list_owners("a.txt").await.unwrap();
        assert_eq!(owners, vec![Identity::from("kept@example.com")]);
    }

    #[tokio::test]
    async fn unowned_path_is_empty() {
        let server = Arc::new(MockReviewServer::new());
        let owners = client(server).list_owners("nobody.txt").await.unwrap();
        assert!(owners.is_empty());
    }

    #[tokio::test]
    async fn server_failure_is_resolution_error() {
        let server = Arc::new(MockReviewServer::new().unavailable());
        let err = client(server).list_owners("a.txt").await.unwrap_err();
        match err {
            OwnersError::Resolution { path, source } => {
                assert_eq!(path, "a.txt");
                assert!(matches!(
                    source,
                    ResolutionError::ReviewServer(ReviewServerError::Transport(_))
                ));
            }
            other => panic!("Expected Resolution error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn batch_queries_each_path_once() {
        let server = Arc::new(
            MockReviewServer::new()
                .with_owners("a", vec![CodeOwner::with_email("alice@example.com")])
                .with_owners("b", vec![CodeOwner::with_email("bob@example.com")]),
        );
        let paths = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        let result = client(server.clone()).batch_list_owners(&paths).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result["b"], vec![Identity::from("bob@example.com")]);
        assert_eq!(server.calls(), 2);
    }

    #[tokio::test]
    async fn suggests_from_server_ranking() {
        let server = Arc::new(
            MockReviewServer::new()
                .with_owners("a", vec![CodeOwner::with_email("alice@example.com")]),
        );
        let suggested = client(server)
            .with_suggest_config(SuggestConfig::new().with_min_owners(1))
            .suggest_owners(&["a".to_string()])
            .await
            .unwrap();
        assert_eq!(suggested, vec![Identity::from("alice@example.com")]);
    }
}
