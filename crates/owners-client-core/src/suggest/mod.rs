//! Reviewer suggestion: the smallest set of owners covering every path.
//!
//! Candidates are ranked by their best position across all owner lists
//! (backends list better owners first). Combinations of increasing size are
//! tried in [`OwnerCombinations`] order and the first one that covers every
//! path wins, which makes the result a pure function of the input.

mod combinations;

pub use combinations::{OwnerCombinations, owner_combinations};

use crate::error::OwnersError;
use crate::identity::{Identity, OwnersByPath, distinct_paths};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Configuration for the suggestion search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    /// Smallest number of owners to suggest when at least that many
    /// candidates exist. Default: 2, so changes that need several
    /// reviewers are not all routed to a single top-level owner.
    pub min_owners: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self { min_owners: 2 }
    }
}

impl SuggestConfig {
    /// Creates a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum suggestion size. Zero is treated as one.
    pub fn with_min_owners(mut self, min_owners: usize) -> Self {
        self.min_owners = min_owners.max(1);
        self
    }
}

/// Paths covered by one candidate, as a bitset over path positions.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Coverage(Vec<u64>);

impl Coverage {
    fn empty(num_paths: usize) -> Self {
        Self(vec![0; num_paths.div_ceil(64)])
    }

    fn full(num_paths: usize) -> Self {
        let mut coverage = Self::empty(num_paths);
        for i in 0..num_paths {
            coverage.insert(i);
        }
        coverage
    }

    fn insert(&mut self, path: usize) {
        self.0[path / 64] |= 1u64 << (path % 64);
    }

    fn union_with(&mut self, other: &Coverage) {
        for (word, bits) in self.0.iter_mut().zip(&other.0) {
            *word |= bits;
        }
    }
}

/// Ranked candidates for a batch of paths.
#[derive(Debug)]
struct Candidates<'a> {
    owners: Vec<&'a Identity>,
    coverage: Vec<Coverage>,
}

impl<'a> Candidates<'a> {
    /// Collects every owner of `paths`, ordered by best position.
    ///
    /// Ties keep first-appearance order, walking paths in input order.
    fn collect(paths: &[&String], owners_by_path: &'a OwnersByPath) -> Result<Self, OwnersError> {
        let mut owners: Vec<&'a Identity> = Vec::new();
        let mut score: HashMap<&'a Identity, usize> = HashMap::new();
        let mut coverage: HashMap<&'a Identity, Coverage> = HashMap::new();

        for (path_index, path) in paths.iter().enumerate() {
            let path_owners = owners_by_path
                .get(path.as_str())
                .filter(|o| !o.is_empty())
                .ok_or_else(|| OwnersError::uncoverable(path.as_str()))?;

            for (position, owner) in path_owners.iter().enumerate() {
                match score.entry(owner) {
                    Entry::Vacant(entry) => {
                        entry.insert(position);
                        owners.push(owner);
                    }
                    Entry::Occupied(mut entry) => {
                        let best = entry.get_mut();
                        *best = (*best).min(position);
                    }
                }
                coverage
                    .entry(owner)
                    .or_insert_with(|| Coverage::empty(paths.len()))
                    .insert(path_index);
            }
        }

        owners.sort_by_key(|owner| score[owner]);
        let coverage = owners
            .iter()
            .map(|owner| coverage.remove(owner).unwrap_or_else(|| Coverage::empty(paths.len())))
            .collect();

        Ok(Self { owners, coverage })
    }

    fn covers_all(&self, positions: &[usize], target: &Coverage) -> bool {
        let mut covered = Coverage(vec![0; target.0.len()]);
        for &position in positions {
            covered.union_with(&self.coverage[position]);
        }
        covered == *target
    }
}

/// Suggests owners such that every path has at least one of them.
///
/// `paths` fixes the tie-break order; repeated paths count once. Every path
/// must have at least one owner in `owners_by_path`, otherwise the search
/// fails with [`OwnersError::Uncoverable`].
///
/// Returns the whole candidate list when it holds fewer than
/// `config.min_owners` candidates. Otherwise returns the first combination,
/// by increasing size and then [`OwnerCombinations`] order, that covers all
/// paths.
pub fn suggest_owners(
    paths: &[String],
    owners_by_path: &OwnersByPath,
    config: &SuggestConfig,
) -> Result<Vec<Identity>, OwnersError> {
    let paths = distinct_paths(paths);
    if paths.is_empty() {
        return Ok(Vec::new());
    }

    let candidates = Candidates::collect(&paths, owners_by_path)?;
    debug!(
        "Suggesting owners for {} paths from {} candidates",
        paths.len(),
        candidates.owners.len()
    );

    let min_owners = config.min_owners.max(1);
    if candidates.owners.len() < min_owners {
        debug!("Fewer than {} candidates, suggesting all of them", min_owners);
        return Ok(candidates.owners.into_iter().cloned().collect());
    }

    let target = Coverage::full(paths.len());
    for size in min_owners..=candidates.owners.len() {
        trace!("Trying combinations of {} owners", size);
        let found = OwnerCombinations::new(candidates.owners.len(), size)
            .find(|positions| candidates.covers_all(positions, &target));
        if let Some(positions) = found {
            let selected: Vec<Identity> = positions
                .into_iter()
                .map(|i| candidates.owners[i].clone())
                .collect();
            debug!("Suggested {} owners: {:?}", selected.len(), selected);
            return Ok(selected);
        }
    }

    // Every path has an owner, so the full candidate set always covers.
    Err(OwnersError::uncoverable(paths[0].as_str()))
}
