//! Greedy peeling over a weighted incidence matrix.
//!
//! The engine repeatedly removes whichever row or column currently
//! contributes least to the total weighted edge mass (plus optional
//! per-node suspiciousness priors), tracking the running average score of
//! the surviving sets. Two [`MinTree`]s give the cheapest element in
//! O(log(m+n)); each removal walks the element's live neighbours once, so a
//! full peel costs O((m+n)log(m+n) + E). An append-only removal log is
//! replayed at the end to reconstruct the historically best sets without
//! per-step snapshots.

/**
 * File: /src/greedy.rs
 * Created Date: Friday, March 7th 2025
 * Author: Zihan
 * -----
 * Last Modified: Tuesday, 1st April 2025 10:05:48 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */
use log::debug;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::DetectorError;
use crate::matrix::SparseMatrix;
use crate::mintree::MinTree;

/// A detected dense block: surviving row and column indices, in ascending
/// order, and the average score they achieved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseBlock {
    pub row_indices: Vec<usize>,
    pub col_indices: Vec<usize>,
    pub ave_score: f64,
}

impl DenseBlock {
    pub fn size(&self) -> (usize, usize) {
        (self.row_indices.len(), self.col_indices.len())
    }
}

/// Optional non-negative priors folded additively into the objective: a
/// row's (column's) marginal contribution becomes its weighted degree plus
/// its prior, so externally suspicious nodes survive peeling longer.
#[derive(Debug, Clone)]
pub struct NodeSuspiciousness {
    rows: Array1<f64>,
    cols: Array1<f64>,
}

impl NodeSuspiciousness {
    /// Validates that every prior is finite and non-negative.
    pub fn new(rows: Array1<f64>, cols: Array1<f64>) -> Result<NodeSuspiciousness, DetectorError> {
        for v in rows.iter().chain(cols.iter()) {
            if !v.is_finite() || *v < 0.0 {
                return Err(DetectorError::InvalidInput(format!(
                    "suspiciousness prior {} is negative or non-finite",
                    v
                )));
            }
        }
        Ok(NodeSuspiciousness { rows, cols })
    }

    pub fn zeros(rows: usize, cols: usize) -> NodeSuspiciousness {
        NodeSuspiciousness {
            rows: Array1::zeros(rows),
            cols: Array1::zeros(cols),
        }
    }

    pub fn rows(&self) -> &Array1<f64> {
        &self.rows
    }

    pub fn cols(&self) -> &Array1<f64> {
        &self.cols
    }
}

enum Removed {
    Row(usize),
    Col(usize),
}

/// Peel `weighted` down to its densest block.
///
/// `col_weights[j]` must be the weight the policy assigned to column `j`;
/// it is the exact amount a neighbouring row's tree entry drops when the
/// column is removed, and vice versa. Passing `None` for `susp` is the
/// plain density objective.
pub fn fast_greedy_decreasing(
    weighted: &SparseMatrix,
    col_weights: &Array1<f64>,
    susp: Option<&NodeSuspiciousness>,
) -> Result<DenseBlock, DetectorError> {
    let (m, n) = (weighted.nrows(), weighted.ncols());
    if m == 0 || n == 0 {
        return Err(DetectorError::EmptyInput);
    }
    if col_weights.len() != n {
        return Err(DetectorError::InvalidInput(format!(
            "{} column weights for {} columns",
            col_weights.len(),
            n
        )));
    }
    let zero_susp;
    let susp = match susp {
        Some(s) => {
            if s.rows().len() != m || s.cols().len() != n {
                return Err(DetectorError::InvalidInput(format!(
                    "suspiciousness shape ({}, {}) does not match matrix ({}, {})",
                    s.rows().len(),
                    s.cols().len(),
                    m,
                    n
                )));
            }
            s
        }
        None => {
            zero_susp = NodeSuspiciousness::zeros(m, n);
            &zero_susp
        }
    };

    let mut cur_score = weighted.total() + susp.rows().sum() + susp.cols().sum();
    let mut best_ave_score = cur_score / (m + n) as f64;
    debug!("finished initialization, starting score {:.4}", cur_score);

    let row_deltas = weighted.row_sums() + susp.rows();
    let col_deltas = weighted.col_sums() + susp.cols();
    debug!("finished setting deltas");

    let mut row_tree = MinTree::new(&row_deltas.to_vec())?;
    let mut col_tree = MinTree::new(&col_deltas.to_vec())?;
    debug!("finished building min trees");

    let mut row_alive = vec![true; m];
    let mut col_alive = vec![true; n];
    let mut rows_left = m;
    let mut cols_left = n;
    let mut removals: Vec<Removed> = Vec::with_capacity(m + n);
    let mut best_num_removed = 0;

    while rows_left > 0 && cols_left > 0 {
        if (rows_left + cols_left) % 100_000 == 0 {
            debug!("current set size = {}", rows_left + cols_left);
        }
        let (next_row, row_delt) = row_tree.min();
        let (next_col, col_delt) = col_tree.min();

        if row_delt <= col_delt {
            cur_score -= row_delt;
            for &(j, _) in weighted.row(next_row) {
                if col_alive[j] {
                    col_tree.adjust(j, -col_weights[j]);
                }
            }
            row_alive[next_row] = false;
            rows_left -= 1;
            row_tree.retire(next_row);
            removals.push(Removed::Row(next_row));
        } else {
            cur_score -= col_delt;
            for &(i, _) in weighted.col(next_col) {
                if row_alive[i] {
                    row_tree.adjust(i, -col_weights[next_col]);
                }
            }
            col_alive[next_col] = false;
            cols_left -= 1;
            col_tree.retire(next_col);
            removals.push(Removed::Col(next_col));
        }

        let remaining = rows_left + cols_left;
        debug_assert!(remaining > 0, "both node sets exhausted in one step");
        let cur_ave_score = cur_score / remaining as f64;
        if cur_ave_score > best_ave_score {
            best_ave_score = cur_ave_score;
            best_num_removed = removals.len();
        }
    }

    // replay the log up to the best point to reconstruct the block
    let mut row_kept = vec![true; m];
    let mut col_kept = vec![true; n];
    for removed in removals.iter().take(best_num_removed) {
        match *removed {
            Removed::Row(i) => row_kept[i] = false,
            Removed::Col(j) => col_kept[j] = false,
        }
    }
    Ok(DenseBlock {
        row_indices: keep_indices(&row_kept),
        col_indices: keep_indices(&col_kept),
        ave_score: best_ave_score,
    })
}

fn keep_indices(kept: &[bool]) -> Vec<usize> {
    kept.iter()
        .enumerate()
        .filter(|&(_, &keep)| keep)
        .map(|(i, _)| i)
        .collect()
}
