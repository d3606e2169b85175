//! OWNERS Client Core
//!
//! A library for finding out who may approve a code change.
//!
//! # Features
//!
//! - **Owner resolution**: List the owners of a path from OWNERS files in a
//!   checkout, or from a review server
//! - **Batch lookups**: Resolve many paths at once with bounded concurrency
//! - **Approval status**: Classify each path as approved, pending or lacking
//!   reviewers
//! - **Reviewer suggestion**: Find a small, deterministic set of owners
//!   covering every changed path
//!
//! # Quick Start
//!
//! ```no_run
//! use owners_client_core::{BackendConfig, ClientConfig, Identity, OwnersClient};
//! use owners_client_core::local::LocalConfig;
//! use std::collections::HashSet;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new(BackendConfig::Local(
//!     LocalConfig::new("/path/to/repo").with_base_revision("origin/main"),
//! ));
//! let client = config.build(None)?;
//!
//! let paths = vec!["src/main.cc".to_string(), "docs/README.md".to_string()];
//! let approvers = HashSet::from([Identity::from("lead@example.com")]);
//! let status = client
//!     .get_files_approval_status(&paths, &approvers, &HashSet::new())
//!     .await?;
//!
//! for (path, status) in &status {
//!     println!("{path}: {status}");
//! }
//! println!("Suggested reviewers: {:?}", client.suggest_owners(&paths).await?);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`client`]: The [`OwnersClient`] trait and batch settings
//! - [`local`]: Backend reading OWNERS files
//! - [`remote`]: Backend asking a review server
//! - [`approval`]: Approval classification
//! - [`suggest`]: Reviewer suggestion

pub mod approval;
pub mod client;
pub mod config;
pub mod error;
#[cfg(feature = "generate")]
pub mod generate;
pub mod identity;
pub mod local;
pub mod remote;
pub mod suggest;

// Re-export commonly used types at the crate root
pub use approval::{ApprovalStatus, approval_status, files_approval_status};
pub use client::{BatchConfig, OwnersClient};
pub use config::{BackendConfig, ClientConfig, ConfigError};
pub use error::{OwnersError, OwnersFileError, ResolutionError};
pub use identity::{EVERYONE, Identity, OwnersByPath};
pub use suggest::{SuggestConfig, suggest_owners};
