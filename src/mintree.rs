/**
 * File: /src/mintree.rs
 * Created Date: Wednesday, March 5th 2025
 * Author: Zihan
 * -----
 * Last Modified: Thursday, 13th March 2025 11:48:21 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */
use crate::error::DetectorError;

/// A tree data structure which stores a list of keys and can quickly retrieve
/// the minimum element, or modify any of the keys, each in logarithmic time.
///
/// It works as a complete binary tree with the given elements in the leaves,
/// where each internal node stores the min of its two children. Leaves beyond
/// the key count are padded with +inf, so the tree size is the next power of
/// two above the input length. Driving a leaf to +inf with [`MinTree::retire`]
/// permanently removes it from [`MinTree::min`] without resizing.
#[derive(Debug, Clone)]
pub struct MinTree {
    height: usize,
    num_leaves: usize,
    num_branches: usize,
    nodes: Vec<f64>,
}

impl MinTree {
    /// Build a tree over `keys`. Fails on empty input.
    pub fn new(keys: &[f64]) -> Result<MinTree, DetectorError> {
        if keys.is_empty() {
            return Err(DetectorError::EmptyInput);
        }
        let num_leaves = keys.len().next_power_of_two();
        let height = num_leaves.trailing_zeros() as usize;
        let num_branches = num_leaves - 1;
        let mut nodes = vec![f64::INFINITY; num_branches + num_leaves];
        nodes[num_branches..num_branches + keys.len()].copy_from_slice(keys);
        for i in (0..num_branches).rev() {
            nodes[i] = nodes[2 * i + 1].min(nodes[2 * i + 2]);
        }
        Ok(MinTree {
            height,
            num_leaves,
            num_branches,
            nodes,
        })
    }

    /// Index and value of the minimum leaf, descending from the root and
    /// taking the left child on ties. Non-mutating.
    pub fn min(&self) -> (usize, f64) {
        let mut cur = 0;
        for _ in 0..self.height {
            cur = if self.nodes[2 * cur + 1] <= self.nodes[2 * cur + 2] {
                2 * cur + 1
            } else {
                2 * cur + 2
            };
        }
        (cur - self.num_branches, self.nodes[cur])
    }

    /// Add `delta` to the leaf at `index` and repair the ancestors on the
    /// path to the root, stopping early once one is unchanged.
    pub fn adjust(&mut self, index: usize, delta: f64) {
        debug_assert!(
            index < self.num_leaves,
            "leaf index {} out of range for {} leaves",
            index,
            self.num_leaves
        );
        debug_assert!(
            self.nodes[self.num_branches + index].is_finite(),
            "adjusting retired leaf {}",
            index
        );
        let cur = self.num_branches + index;
        self.nodes[cur] += delta;
        self.repair_upward(cur);
    }

    /// Drive the leaf at `index` to +inf so `min` never returns it again.
    pub fn retire(&mut self, index: usize) {
        debug_assert!(
            index < self.num_leaves,
            "leaf index {} out of range for {} leaves",
            index,
            self.num_leaves
        );
        let cur = self.num_branches + index;
        self.nodes[cur] = f64::INFINITY;
        self.repair_upward(cur);
    }

    /// Current key of a leaf; +inf once retired.
    pub fn value(&self, index: usize) -> f64 {
        self.nodes[self.num_branches + index]
    }

    fn repair_upward(&mut self, mut cur: usize) {
        for _ in 0..self.height {
            cur = (cur - 1) / 2;
            let next = self.nodes[2 * cur + 1].min(self.nodes[2 * cur + 2]);
            if self.nodes[cur] == next {
                break;
            }
            self.nodes[cur] = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every internal node must equal the min of its children.
    fn assert_invariant(tree: &MinTree) {
        for i in 0..tree.num_branches {
            assert_eq!(
                tree.nodes[i],
                tree.nodes[2 * i + 1].min(tree.nodes[2 * i + 2]),
                "internal node {} out of sync",
                i
            );
        }
    }

    /// Leftmost minimum over non-retired leaves, by linear scan.
    fn scan_min(tree: &MinTree, len: usize) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for i in 0..len {
            let v = tree.value(i);
            if !v.is_finite() {
                continue;
            }
            if best.map_or(true, |(_, b)| v < b) {
                best = Some((i, v));
            }
        }
        best
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(MinTree::new(&[]).unwrap_err(), DetectorError::EmptyInput);
    }

    #[test]
    fn test_build_and_min() {
        let tree = MinTree::new(&[1.0, 4.0, 2.0, 5.0, 3.0]).unwrap();
        assert_invariant(&tree);
        assert_eq!(tree.min(), (0, 1.0));
        // padded leaves stay at +inf
        assert_eq!(tree.num_leaves, 8);
        assert!(tree.value(5).is_infinite());
    }

    #[test]
    fn test_single_key() {
        let tree = MinTree::new(&[7.5]).unwrap();
        assert_eq!(tree.min(), (0, 7.5));
    }

    #[test]
    fn test_min_tie_breaks_left() {
        let tree = MinTree::new(&[2.0, 1.0, 1.0, 3.0]).unwrap();
        assert_eq!(tree.min(), (1, 1.0));
    }

    #[test]
    fn test_adjust_and_retire_sequence() {
        let mut tree = MinTree::new(&[1.0, 4.0, 2.0, 5.0, 3.0]).unwrap();

        tree.adjust(0, 10.0);
        assert_invariant(&tree);
        assert_eq!(tree.min(), (2, 2.0));

        tree.retire(2);
        assert_invariant(&tree);
        assert_eq!(tree.min(), (4, 3.0));

        tree.adjust(4, 3.0);
        assert_invariant(&tree);
        assert_eq!(tree.min(), (1, 4.0));

        tree.retire(1);
        tree.adjust(3, -4.0);
        assert_invariant(&tree);
        assert_eq!(tree.min(), (3, 1.0));
    }

    #[test]
    fn test_min_matches_linear_scan() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        let len = 13;
        let keys: Vec<f64> = (0..len).map(|_| rng.random::<f64>() * 20.0).collect();
        let mut tree = MinTree::new(&keys).unwrap();
        let mut retired = vec![false; len];

        for _ in 0..200 {
            let idx = rng.random_range(0..len);
            if retired[idx] {
                continue;
            }
            if rng.random::<f64>() < 0.2 {
                tree.retire(idx);
                retired[idx] = true;
            } else {
                tree.adjust(idx, rng.random::<f64>() * 10.0 - 5.0);
            }
            assert_invariant(&tree);
            if let Some((idx, value)) = scan_min(&tree, len) {
                assert_eq!(tree.min(), (idx, value));
            }
        }
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "adjusting retired leaf")]
    fn test_adjust_retired_leaf_panics() {
        let mut tree = MinTree::new(&[1.0, 2.0]).unwrap();
        tree.retire(0);
        tree.adjust(0, 1.0);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "out of range")]
    fn test_adjust_out_of_range_panics() {
        let mut tree = MinTree::new(&[1.0, 2.0]).unwrap();
        tree.adjust(9, 1.0);
    }
}
