//! Synthetic matrices with a planted fraud block and optional camouflage.

/**
 * File: /src/synth.rs
 * Created Date: Monday, March 10th 2025
 * Author: Zihan
 * -----
 * Last Modified: Monday, 10th March 2025 11:02:19 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */
use std::collections::BTreeSet;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::DetectorError;
use crate::matrix::SparseMatrix;

/// How the planted fraud rows spray edges outside their own block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Camouflage {
    /// Clique only, no extra edges.
    None,
    /// Each fraud row hits each non-block column with probability
    /// `p * n0 / (n - n0)`, so camouflage volume roughly matches fraud
    /// volume.
    Random,
    /// Twice the `Random` probability.
    DoubleRandom,
    /// Camouflage targets non-block columns proportionally to their
    /// existing degree, `floor(n0 * p)` picks per fraud row.
    Biased,
}

/// Background bipartite noise: each cell holds an edge with probability
/// `density`.
pub fn random_bipartite<R: Rng>(
    rows: usize,
    cols: usize,
    density: f64,
    rng: &mut R,
) -> Result<SparseMatrix, DetectorError> {
    if !(0.0..=1.0).contains(&density) {
        return Err(DetectorError::InvalidInput(format!(
            "density {} outside [0, 1]",
            density
        )));
    }
    let mut edges = Vec::new();
    for i in 0..rows {
        for j in 0..cols {
            if rng.random::<f64>() < density {
                edges.push((i, j));
            }
        }
    }
    SparseMatrix::with_shape(&edges, rows, cols)
}

/// Plant a `block_rows` x `block_cols` clique of density `p` in the
/// top-left corner of `matrix` and add camouflage edges per `camo`.
///
/// Column degrees driving the `Biased` style are taken from the input
/// matrix, before any injection.
pub fn inject_clique_camo<R: Rng>(
    matrix: &SparseMatrix,
    block_rows: usize,
    block_cols: usize,
    p: f64,
    camo: Camouflage,
    rng: &mut R,
) -> Result<SparseMatrix, DetectorError> {
    let (m, n) = (matrix.nrows(), matrix.ncols());
    if block_rows > m || block_cols > n {
        return Err(DetectorError::InvalidInput(format!(
            "block {}x{} does not fit in {}x{} matrix",
            block_rows, block_cols, m, n
        )));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(DetectorError::InvalidInput(format!(
            "density {} outside [0, 1]",
            p
        )));
    }

    let mut edges: BTreeSet<(usize, usize)> = (0..m)
        .flat_map(|i| matrix.row(i).iter().map(move |&(j, _)| (i, j)))
        .collect();

    // degree-weighted population of non-block columns, for biased picks
    let col_sums = matrix.col_sums();
    let population: Vec<usize> = (block_cols..n)
        .flat_map(|j| std::iter::repeat(j).take(col_sums[j] as usize))
        .collect();

    for i in 0..block_rows {
        for j in 0..block_cols {
            if rng.random::<f64>() < p {
                edges.insert((i, j));
            }
        }
        match camo {
            Camouflage::None => {}
            Camouflage::Random | Camouflage::DoubleRandom => {
                let mut thres = p * block_cols as f64 / (n - block_cols) as f64;
                if camo == Camouflage::DoubleRandom {
                    thres *= 2.0;
                }
                for j in block_cols..n {
                    if rng.random::<f64>() < thres {
                        edges.insert((i, j));
                    }
                }
            }
            Camouflage::Biased => {
                let picks = (block_cols as f64 * p) as usize;
                for &j in population.choose_multiple(rng, picks) {
                    edges.insert((i, j));
                }
            }
        }
    }

    let edges: Vec<(usize, usize)> = edges.into_iter().collect();
    SparseMatrix::with_shape(&edges, m, n)
}
