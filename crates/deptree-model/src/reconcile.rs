//! Keyed list reconciliation.
//!
//! Turns an old ordered id list into a new one with as few removals and
//! insertions as possible. Ids on the longest common subsequence of the
//! two lists are kept (and therefore keep their nodes); everything else
//! in the old list is removed and everything else in the new list is
//! inserted.

use deptree_core::ObjectId;
use tracing::debug;

/// Largest LCS table built, in cells. Past it the middle section (after
/// trimming the shared prefix and suffix) is replaced wholesale.
const MAX_TABLE_CELLS: usize = 4_000_000;

/// The edit that turns an old child list into a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPlan {
    /// Positions in the old list that are kept, paired with their
    /// position in the new list. Ascending in both.
    pub retained: Vec<(usize, usize)>,
    /// Positions in the old list to remove, ascending.
    pub removed: Vec<usize>,
    /// Positions in the new list to insert, ascending.
    pub inserted: Vec<usize>,
}

impl EditPlan {
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty() && self.inserted.is_empty()
    }
}

/// Computes the minimal edit from `old` to `new`.
pub fn plan_edit(old: &[ObjectId], new: &[ObjectId]) -> EditPlan {
    let retained = longest_common_subsequence(old, new);

    let mut kept_old = vec![false; old.len()];
    let mut kept_new = vec![false; new.len()];
    for &(i, j) in &retained {
        kept_old[i] = true;
        kept_new[j] = true;
    }

    EditPlan {
        removed: (0..old.len()).filter(|&i| !kept_old[i]).collect(),
        inserted: (0..new.len()).filter(|&j| !kept_new[j]).collect(),
        retained,
    }
}

/// Matched index pairs of one longest common subsequence.
fn longest_common_subsequence(old: &[ObjectId], new: &[ObjectId]) -> Vec<(usize, usize)> {
    // Shared prefix and suffix are always part of the LCS
    let prefix = old
        .iter()
        .zip(new.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];

    let mut pairs: Vec<(usize, usize)> = (0..prefix).map(|i| (i, i)).collect();

    let cells = (old_mid.len() + 1).saturating_mul(new_mid.len() + 1);
    if cells > MAX_TABLE_CELLS {
        debug!(
            "Child lists too far apart ({}x{}), replacing the middle",
            old_mid.len(),
            new_mid.len()
        );
    } else if !old_mid.is_empty() && !new_mid.is_empty() {
        let n = old_mid.len();
        let m = new_mid.len();

        // table[i][j] = LCS length of old_mid[i..] and new_mid[j..]
        let mut table = vec![vec![0u32; m + 1]; n + 1];
        for i in (0..n).rev() {
            for j in (0..m).rev() {
                table[i][j] = if old_mid[i] == new_mid[j] {
                    table[i + 1][j + 1] + 1
                } else {
                    table[i + 1][j].max(table[i][j + 1])
                };
            }
        }

        let (mut i, mut j) = (0, 0);
        while i < n && j < m {
            if old_mid[i] == new_mid[j] {
                pairs.push((prefix + i, prefix + j));
                i += 1;
                j += 1;
            } else if table[i + 1][j] >= table[i][j + 1] {
                i += 1;
            } else {
                j += 1;
            }
        }
    }

    let old_tail = old.len() - suffix;
    let new_tail = new.len() - suffix;
    pairs.extend((0..suffix).map(|k| (old_tail + k, new_tail + k)));

    pairs
}

/// Splits ascending positions into `(start, len)` runs of consecutive values.
pub(crate) fn runs(positions: &[usize]) -> Vec<(usize, usize)> {
    let mut runs: Vec<(usize, usize)> = Vec::new();

    for &pos in positions {
        match runs.last_mut() {
            Some((start, len)) if *start + *len == pos => *len += 1,
            _ => runs.push((pos, 1)),
        }
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u32]) -> Vec<ObjectId> {
        raw.iter().copied().map(ObjectId::new).collect()
    }

    #[test]
    fn test_remove_one_append_one() {
        let plan = plan_edit(&ids(&[1, 2, 3, 4]), &ids(&[1, 3, 4, 5]));

        assert_eq!(plan.retained, vec![(0, 0), (2, 1), (3, 2)]);
        assert_eq!(plan.removed, vec![1]);
        assert_eq!(plan.inserted, vec![3]);
    }

    #[test]
    fn test_identical_lists() {
        let plan = plan_edit(&ids(&[4, 5, 6]), &ids(&[4, 5, 6]));
        assert!(plan.is_noop());
        assert_eq!(plan.retained.len(), 3);
    }

    #[test]
    fn test_empty_sides() {
        let plan = plan_edit(&ids(&[1, 2]), &[]);
        assert_eq!(plan.removed, vec![0, 1]);
        assert!(plan.inserted.is_empty());

        let plan = plan_edit(&[], &ids(&[1, 2]));
        assert!(plan.removed.is_empty());
        assert_eq!(plan.inserted, vec![0, 1]);
    }

    #[test]
    fn test_swap_keeps_one() {
        // A swap cannot keep both ids in order
        let plan = plan_edit(&ids(&[1, 2]), &ids(&[2, 1]));
        assert_eq!(plan.retained.len(), 1);
        assert_eq!(plan.removed.len(), 1);
        assert_eq!(plan.inserted.len(), 1);
    }

    #[test]
    fn test_interleaved_changes() {
        let old = ids(&[1, 2, 3, 4, 5, 6]);
        let new = ids(&[9, 1, 3, 8, 5, 6, 7]);
        let plan = plan_edit(&old, &new);

        let kept: Vec<ObjectId> = plan.retained.iter().map(|&(i, _)| old[i]).collect();
        assert_eq!(kept, ids(&[1, 3, 5, 6]));
        assert_eq!(plan.removed, vec![1, 3]);
        assert_eq!(plan.inserted, vec![0, 3, 6]);
    }

    #[test]
    fn test_oversized_middle_is_replaced() {
        let old: Vec<ObjectId> = (1..=2100).map(ObjectId::new).collect();
        let mut new: Vec<ObjectId> = (1..=2100).rev().map(ObjectId::new).collect();
        new.insert(0, ObjectId::new(5000));
        new.push(ObjectId::new(2100));

        let plan = plan_edit(&old, &new);

        // Only the shared suffix survives
        assert_eq!(plan.retained, vec![(2099, 2101)]);
        assert_eq!(plan.removed.len(), 2099);
        assert_eq!(plan.inserted.len(), 2101);
    }

    #[test]
    fn test_runs() {
        assert_eq!(runs(&[]), vec![]);
        assert_eq!(runs(&[0, 1, 2, 5, 7, 8]), vec![(0, 3), (5, 1), (7, 2)]);
    }
}
