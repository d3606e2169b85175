//! Per-path approval classification.

use crate::identity::{Identity, OwnersByPath};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// The review state of a single path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    /// At least one owner of the path has approved.
    Approved,
    /// No owner approved yet, but at least one owner is reviewing.
    Pending,
    /// No owner is approving or reviewing the path.
    InsufficientReviewers,
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalStatus::Approved => write!(f, "APPROVED"),
            ApprovalStatus::Pending => write!(f, "PENDING"),
            ApprovalStatus::InsufficientReviewers => write!(f, "INSUFFICIENT_REVIEWERS"),
        }
    }
}

/// Classifies one path from its owners.
///
/// Approval takes precedence over pending review.
pub fn approval_status(
    owners: &[Identity],
    approvers: &HashSet<Identity>,
    reviewers: &HashSet<Identity>,
) -> ApprovalStatus {
    if owners.iter().any(|o| approvers.contains(o)) {
        ApprovalStatus::Approved
    } else if owners.iter().any(|o| reviewers.contains(o)) {
        ApprovalStatus::Pending
    } else {
        ApprovalStatus::InsufficientReviewers
    }
}

/// Classifies every path of an owners mapping.
///
/// The result has exactly one entry per path in `owners_by_path`.
pub fn files_approval_status(
    owners_by_path: &OwnersByPath,
    approvers: &HashSet<Identity>,
    reviewers: &HashSet<Identity>,
) -> BTreeMap<String, ApprovalStatus> {
    owners_by_path
        .iter()
        .map(|(path, owners)| (path.clone(), approval_status(owners, approvers, reviewers)))
        .collect()
}
