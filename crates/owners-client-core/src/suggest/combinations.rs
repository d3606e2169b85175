//! Ordered enumeration of owner combinations.
//!
//! The score of a candidate is its position in the candidate list, lower
//! being better. The score of a combination is the worst (highest) score of
//! its members. Combinations are produced by increasing combination score:
//!
//! ```rust
//! use owners_client_core::suggest::OwnerCombinations;
//!
//! let tuples: Vec<Vec<usize>> = OwnerCombinations::new(4, 2).collect();
//! assert_eq!(
//!     tuples,
//!     vec![
//!         vec![1, 0], // score 1
//!         vec![2, 0], // score 2
//!         vec![2, 1],
//!         vec![3, 0], // score 3
//!         vec![3, 1],
//!         vec![3, 2],
//!     ]
//! );
//! ```
//!
//! Each tuple lists positions in decreasing order, and tuples are ordered
//! lexicographically. This order is the suggestion tie-break.

/// Iterator over `k`-combinations of the positions `0..len`.
#[derive(Debug, Clone)]
pub struct OwnerCombinations {
    len: usize,
    next: Option<Vec<usize>>,
}

impl OwnerCombinations {
    /// Enumerates combinations of `k` positions out of `len`.
    ///
    /// Yields nothing when `k` is zero or larger than `len`.
    pub fn new(len: usize, k: usize) -> Self {
        let next = (k > 0 && k <= len).then(|| (0..k).rev().collect());
        Self { len, next }
    }

    fn successor(&self, current: &[usize]) -> Option<Vec<usize>> {
        let k = current.len();
        let mut next = current.to_vec();
        for j in (0..k).rev() {
            let bound = if j == 0 { self.len } else { next[j - 1] };
            if next[j] + 1 < bound {
                next[j] += 1;
                for (m, slot) in next.iter_mut().enumerate().skip(j + 1) {
                    *slot = k - 1 - m;
                }
                return Some(next);
            }
        }
        None
    }
}

impl Iterator for OwnerCombinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self.successor(&current);
        Some(current)
    }
}

/// Maps [`OwnerCombinations`] onto a slice of candidates.
pub fn owner_combinations<T>(candidates: &[T], k: usize) -> impl Iterator<Item = Vec<&T>> {
    OwnerCombinations::new(candidates.len(), k)
        .map(move |positions| positions.into_iter().map(|i| &candidates[i]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "alice@example.com";
    const BOB: &str = "bob@example.com";
    const CHRIS: &str = "chris@example.com";
    const DAVE: &str = "dave@example.com";
    const EMILY: &str = "emily@example.com";

    #[test]
    fn pairs_in_score_order() {
        let owners = [ALICE, BOB, CHRIS, DAVE, EMILY];
        let pairs: Vec<Vec<&&str>> = owner_combinations(&owners, 2).collect();
        let expected = vec![
            (BOB, ALICE),
            (CHRIS, ALICE),
            (CHRIS, BOB),
            (DAVE, ALICE),
            (DAVE, BOB),
            (DAVE, CHRIS),
            (EMILY, ALICE),
            (EMILY, BOB),
            (EMILY, CHRIS),
            (EMILY, DAVE),
        ];
        assert_eq!(pairs.len(), expected.len());
        for (pair, (first, second)) in pairs.iter().zip(expected) {
            assert_eq!(*pair[0], first);
            assert_eq!(*pair[1], second);
        }
    }

    #[test]
    fn triples_in_score_order() {
        let triples: Vec<Vec<usize>> = OwnerCombinations::new(5, 3).collect();
        assert_eq!(
            triples,
            vec![
                vec![2, 1, 0],
                vec![3, 1, 0],
                vec![3, 2, 0],
                vec![3, 2, 1],
                vec![4, 1, 0],
                vec![4, 2, 0],
                vec![4, 2, 1],
                vec![4, 3, 0],
                vec![4, 3, 1],
                vec![4, 3, 2],
            ]
        );
    }

    #[test]
    fn yields_binomial_count() {
        assert_eq!(OwnerCombinations::new(6, 3).count(), 20);
        assert_eq!(OwnerCombinations::new(7, 1).count(), 7);
        assert_eq!(OwnerCombinations::new(4, 4).count(), 1);
    }

    #[test]
    fn empty_when_k_out_of_range() {
        assert_eq!(OwnerCombinations::new(3, 0).count(), 0);
        assert_eq!(OwnerCombinations::new(3, 4).count(), 0);
        assert_eq!(OwnerCombinations::new(0, 1).count(), 0);
    }

    #[test]
    fn singletons_in_list_order() {
        let singles: Vec<Vec<usize>> = OwnerCombinations::new(3, 1).collect();
        assert_eq!(singles, vec![vec![0], vec![1], vec![2]]);
    }
}
