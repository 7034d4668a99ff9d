//! # fast_fraudar
//!
//! Camouflage-resistant dense block detection in bipartite review graphs.
//!
//! ## Algorithm Overview
//!
//! Detection runs in three phases:
//! 1. **Column Weighting**: down-weight high-degree columns so camouflage
//!    edges into popular products become cheap to discard
//! 2. **Greedy Peeling**: repeatedly remove the row or column contributing
//!    least to the objective, tracking the best running average via two
//!    min-trees, O((m+n)log(m+n) + E)
//! 3. **Multi-Block Extraction**: zero out each found block's internal
//!    edges and rerun on the remainder
//!
//! ## References
//! Hooi, B., et al. (2016). "FRAUDAR: Bounding Graph Fraud in the Face of
//! Camouflage." ACM SIGKDD Conference on Knowledge Discovery and Data
//! Mining (KDD).

/**
 * File: /src/lib.rs
 * Created Date: Tuesday, March 4th 2025
 * Author: Zihan
 * -----
 * Last Modified: Sunday, 6th April 2025 5:44:10 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */

pub mod config;
pub mod detector;
pub mod error;
pub mod graph;
pub mod greedy;
pub mod matrix;
pub mod metrics;
pub mod mintree;
pub mod synth;
pub mod weighting;

pub use detector::{Detector, DetectorBuilder, DetectorConfig, DetectionResult};
pub use error::DetectorError;
pub use graph::ReviewGraph;
pub use greedy::{fast_greedy_decreasing, DenseBlock, NodeSuspiciousness};
pub use matrix::SparseMatrix;
pub use mintree::MinTree;
pub use weighting::Weighting;
