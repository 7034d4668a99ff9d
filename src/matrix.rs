/**
 * File: /src/matrix.rs
 * Created Date: Wednesday, March 5th 2025
 * Author: Zihan
 * -----
 * Last Modified: Sunday, 23rd March 2025 1:37:02 am
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */
use std::collections::{BTreeMap, BTreeSet};

use ndarray::{Array1, Array2};

use crate::error::DetectorError;

/// Sparse bipartite incidence matrix with dense integer indices.
///
/// Keeps both a row-major and a column-major adjacency view so that peeling
/// can walk the neighbours of either a row or a column in O(degree). Entries
/// are 1 for plain presence or a positive weight. The only mutation after
/// construction is [`SparseMatrix::zero_block`], used by multi-block
/// extraction to strip the internal edges of an already-attributed block.
/// 行主序与列主序邻接各占 O(E)。
#[derive(Debug, Clone)]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    nnz: usize,
    row_adj: Vec<Vec<(usize, f64)>>,
    col_adj: Vec<Vec<(usize, f64)>>,
}

impl SparseMatrix {
    fn empty(rows: usize, cols: usize) -> SparseMatrix {
        SparseMatrix {
            rows,
            cols,
            nnz: 0,
            row_adj: vec![Vec::new(); rows],
            col_adj: vec![Vec::new(); cols],
        }
    }

    fn push_entry(&mut self, row: usize, col: usize, value: f64) {
        self.row_adj[row].push((col, value));
        self.col_adj[col].push((row, value));
        self.nnz += 1;
    }

    /// Build from an edge list, inferring the shape as max index + 1.
    /// Duplicate edges collapse to a single unit entry.
    pub fn from_edges(edges: &[(usize, usize)]) -> Result<SparseMatrix, DetectorError> {
        if edges.is_empty() {
            return Err(DetectorError::EmptyInput);
        }
        let rows = edges.iter().map(|&(r, _)| r).max().unwrap_or(0) + 1;
        let cols = edges.iter().map(|&(_, c)| c).max().unwrap_or(0) + 1;
        SparseMatrix::with_shape(edges, rows, cols)
    }

    /// Build from an edge list with an explicit shape. Out-of-range edges
    /// are rejected; duplicates collapse to a single unit entry.
    pub fn with_shape(
        edges: &[(usize, usize)],
        rows: usize,
        cols: usize,
    ) -> Result<SparseMatrix, DetectorError> {
        let mut unique = BTreeSet::new();
        for &(r, c) in edges {
            if r >= rows || c >= cols {
                return Err(DetectorError::InvalidInput(format!(
                    "edge ({}, {}) outside {}x{} matrix",
                    r, c, rows, cols
                )));
            }
            unique.insert((r, c));
        }
        let mut matrix = SparseMatrix::empty(rows, cols);
        for (r, c) in unique {
            matrix.push_entry(r, c, 1.0);
        }
        Ok(matrix)
    }

    /// Build from explicit (row, col, weight) triplets. Weights must be
    /// finite and positive; a duplicate position keeps the last weight.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        entries: &[(usize, usize, f64)],
    ) -> Result<SparseMatrix, DetectorError> {
        let mut unique = BTreeMap::new();
        for &(r, c, v) in entries {
            if r >= rows || c >= cols {
                return Err(DetectorError::InvalidInput(format!(
                    "entry ({}, {}) outside {}x{} matrix",
                    r, c, rows, cols
                )));
            }
            if !v.is_finite() || v <= 0.0 {
                return Err(DetectorError::InvalidInput(format!(
                    "entry ({}, {}) has non-finite or non-positive weight {}",
                    r, c, v
                )));
            }
            unique.insert((r, c), v);
        }
        let mut matrix = SparseMatrix::empty(rows, cols);
        for ((r, c), v) in unique {
            matrix.push_entry(r, c, v);
        }
        Ok(matrix)
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.nnz
    }

    pub fn is_empty(&self) -> bool {
        self.nnz == 0
    }

    /// `(col, value)` neighbours of a row.
    pub fn row(&self, row: usize) -> &[(usize, f64)] {
        &self.row_adj[row]
    }

    /// `(row, value)` neighbours of a column.
    pub fn col(&self, col: usize) -> &[(usize, f64)] {
        &self.col_adj[col]
    }

    pub fn row_sums(&self) -> Array1<f64> {
        Array1::from(
            self.row_adj
                .iter()
                .map(|adj| adj.iter().map(|&(_, v)| v).sum::<f64>())
                .collect::<Vec<f64>>(),
        )
    }

    pub fn col_sums(&self) -> Array1<f64> {
        Array1::from(
            self.col_adj
                .iter()
                .map(|adj| adj.iter().map(|&(_, v)| v).sum::<f64>())
                .collect::<Vec<f64>>(),
        )
    }

    /// Sum of all stored entries.
    pub fn total(&self) -> f64 {
        self.row_adj
            .iter()
            .map(|adj| adj.iter().map(|&(_, v)| v).sum::<f64>())
            .sum()
    }

    /// New matrix with every entry in column `j` multiplied by `weights[j]`.
    pub fn scale_columns(&self, weights: &Array1<f64>) -> SparseMatrix {
        debug_assert_eq!(weights.len(), self.cols);
        SparseMatrix {
            rows: self.rows,
            cols: self.cols,
            nnz: self.nnz,
            row_adj: self
                .row_adj
                .iter()
                .map(|adj| adj.iter().map(|&(j, v)| (j, v * weights[j])).collect())
                .collect(),
            col_adj: self
                .col_adj
                .iter()
                .enumerate()
                .map(|(j, adj)| adj.iter().map(|&(i, v)| (i, v * weights[j])).collect())
                .collect(),
        }
    }

    /// Remove every entry whose row AND column both belong to the block.
    /// Entries with only one endpoint in the block survive.
    pub fn zero_block(&mut self, block_rows: &[usize], block_cols: &[usize]) {
        let mut in_rows = vec![false; self.rows];
        let mut in_cols = vec![false; self.cols];
        for &r in block_rows {
            debug_assert!(r < self.rows);
            in_rows[r] = true;
        }
        for &c in block_cols {
            debug_assert!(c < self.cols);
            in_cols[c] = true;
        }

        let mut removed = 0;
        for (r, adj) in self.row_adj.iter_mut().enumerate() {
            if !in_rows[r] {
                continue;
            }
            let before = adj.len();
            adj.retain(|&(c, _)| !in_cols[c]);
            removed += before - adj.len();
        }
        for (c, adj) in self.col_adj.iter_mut().enumerate() {
            if !in_cols[c] {
                continue;
            }
            adj.retain(|&(r, _)| !in_rows[r]);
        }
        self.nnz -= removed;
    }

    /// Dense copy, for small-matrix verification.
    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.rows, self.cols));
        for (r, adj) in self.row_adj.iter().enumerate() {
            for &(c, v) in adj {
                dense[[r, c]] = v;
            }
        }
        dense
    }
}
