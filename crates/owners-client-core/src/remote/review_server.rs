//! Review server trait abstraction for owner lookups.
//!
//! This module provides a trait-based abstraction for the one review server
//! call the remote backend needs, allowing different transports (an HTTP
//! client, a recorded fixture, a binding to another language) to be plugged
//! in.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The prefix review servers put in front of JSON bodies to defeat XSSI.
const XSSI_PREFIX: &str = ")]}'";

/// Account details of a suggested code owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Numeric account id.
    #[serde(rename = "_account_id", default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Preferred email, the identity used for approvals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// One entry of a review server owners response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeOwner {
    /// The owner's account, absent when the server cannot disclose it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountInfo>,
}

impl CodeOwner {
    /// Creates an entry for an account with the given email.
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            account: Some(AccountInfo {
                email: Some(email.into()),
                ..Default::default()
            }),
        }
    }

    /// Returns the account email, if the server provided one.
    pub fn email(&self) -> Option<&str> {
        self.account.as_ref()?.email.as_deref()
    }
}

/// Errors returned by a [`ReviewServer`].
#[derive(Debug, Error)]
pub enum ReviewServerError {
    /// The request never got an answer.
    #[error("review server unreachable: {0}")]
    Transport(String),

    /// The server answered with an error status.
    #[error("review server returned {status}: {message}")]
    Api {
        /// HTTP-style status code.
        status: u16,
        /// Error body or reason phrase.
        message: String,
    },

    /// The response body could not be understood.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Trait for review server client implementations.
///
/// # Example
///
/// ```rust,ignore
/// use owners_client_core::remote::{CodeOwner, ReviewServer, ReviewServerError, parse_owners_response};
///
/// struct HttpReviewServer { /* ... */ }
///
/// #[async_trait::async_trait]
/// impl ReviewServer for HttpReviewServer {
///     async fn owners_for_file(
///         &self,
///         project: &str,
///         branch: &str,
///         path: &str,
///     ) -> Result<Vec<CodeOwner>, ReviewServerError> {
///         let body = self.get(&format!("projects/{project}/branches/{branch}/code_owners/{path}")).await?;
///         parse_owners_response(&body)
///     }
/// }
/// ```
#[async_trait]
pub trait ReviewServer: Send + Sync {
    /// Returns the code owners of a file, best reviewer first.
    ///
    /// # Arguments
    ///
    /// * `project` - The project (repository) name
    /// * `branch` - The branch the change targets
    /// * `path` - The repository-relative file path
    async fn owners_for_file(
        &self,
        project: &str,
        branch: &str,
        path: &str,
    ) -> Result<Vec<CodeOwner>, ReviewServerError>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OwnersResponse {
    List(Vec<CodeOwner>),
    Wrapped { code_owners: Vec<CodeOwner> },
}

/// Parses a raw owners response body.
///
/// Accepts an optional `)]}'` prefix, and either a bare list of owners or an
/// object with a `code_owners` list.
pub fn parse_owners_response(body: &str) -> Result<Vec<CodeOwner>, ReviewServerError> {
    let json = body.trim_start();
    let json = json.strip_prefix(XSSI_PREFIX).unwrap_or(json);
    let response: OwnersResponse = serde_json::from_str(json)
        .map_err(|e| ReviewServerError::InvalidResponse(e.to_string()))?;
    Ok(match response {
        OwnersResponse::List(owners) => owners,
        OwnersResponse::Wrapped { code_owners } => code_owners,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_list() {
        let body = r#"[
            {"account": {"email": "approver@example.com"}},
            {"account": {"_account_id": 1000, "name": "Reviewer", "email": "reviewer@example.com"}}
        ]"#;
        let owners = parse_owners_response(body).unwrap();
        assert_eq!(owners.len(), 2);
        assert_eq!(owners[0].email(), Some("approver@example.com"));
        assert_eq!(owners[1].account.as_ref().unwrap().account_id, Some(1000));
    }

    #[test]
    fn strips_xssi_prefix() {
        let body = ")]}'\n[{\"account\": {\"email\": \"a@example.com\"}}]";
        let owners = parse_owners_response(body).unwrap();
        assert_eq!(owners, vec![CodeOwner::with_email("a@example.com")]);
    }

    #[test]
    fn parses_wrapped_list() {
        let body = r#"{"code_owners": [{"account": {"email": "a@example.com"}}], "owned_by_all_users": false}"#;
        let owners = parse_owners_response(body).unwrap();
        assert_eq!(owners[0].email(), Some("a@example.com"));
    }

    #[test]
    fn missing_email_is_none() {
        let owners = parse_owners_response(r#"[{"account": {"_account_id": 7}}, {}]"#).unwrap();
        assert_eq!(owners[0].email(), None);
        assert_eq!(owners[1].email(), None);
    }

    #[test]
    fn rejects_malformed_body() {
        let err = parse_owners_response("<html>502</html>").unwrap_err();
        assert!(matches!(err, ReviewServerError::InvalidResponse(_)));
    }

    #[test]
    fn review_server_error_display() {
        let err = ReviewServerError::Api {
            status: 404,
            message: "project not found".to_string(),
        };
        assert_eq!(err.to_string(), "review server returned 404: project not found");
        assert!(
            ReviewServerError::Transport("timed out".to_string())
                .to_string()
                .contains("timed out")
        );
    }
}
