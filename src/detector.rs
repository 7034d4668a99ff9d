//! Detection front-end: weighting + peeling + multi-block extraction.
//!
//! One [`Detector::detect`] call runs the greedy engine up to `num_blocks`
//! times. After each run the internal edges of the found block are zeroed
//! out of a working copy of the matrix (cross-block edges survive), so the
//! next run is locally greedy on the remainder. Runs are strictly
//! sequential; only the optional stats pass over the finished blocks is
//! parallel.

/**
 * File: /src/detector.rs
 * Created Date: Saturday, March 8th 2025
 * Author: Zihan
 * -----
 * Last Modified: Saturday, 5th April 2025 4:26:33 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */
use std::time::{Duration, Instant};

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::error::DetectorError;
use crate::greedy::{fast_greedy_decreasing, DenseBlock, NodeSuspiciousness};
use crate::matrix::SparseMatrix;
use crate::weighting::Weighting;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Column weighting applied before each peeling run.
    pub weighting: Weighting,
    /// Maximum number of blocks to extract.
    pub num_blocks: usize,
    /// Whether to collect timing and score statistics.
    pub collect_stats: bool,
    /// Score finished blocks in parallel when collecting stats.
    pub parallel_stats: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            weighting: Weighting::InverseLog,
            num_blocks: 1,
            collect_stats: true,
            parallel_stats: true,
        }
    }
}

pub struct Detector {
    config: DetectorConfig,
    suspiciousness: Option<NodeSuspiciousness>,
}

impl Detector {
    pub fn new(config: DetectorConfig) -> Detector {
        Detector {
            config,
            suspiciousness: None,
        }
    }

    pub fn builder() -> DetectorBuilder {
        DetectorBuilder::new()
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Extract up to `num_blocks` dense blocks from `matrix`.
    ///
    /// Stops early once the working matrix has no edges left. The input
    /// matrix is never modified; each run peels a private working copy.
    pub fn detect(&self, matrix: &SparseMatrix) -> Result<DetectionResult, DetectorError> {
        if matrix.nrows() == 0 || matrix.ncols() == 0 {
            return Err(DetectorError::EmptyInput);
        }
        let start = Instant::now();
        info!(
            "starting detection with {} weighting, up to {} blocks",
            self.config.weighting,
            self.config.num_blocks
        );

        let mut current = matrix.clone();
        let mut blocks = Vec::new();
        for run in 0..self.config.num_blocks {
            if current.is_empty() {
                info!("matrix exhausted after {} blocks", run);
                break;
            }
            let run_start = Instant::now();
            let (weighted, col_weights) = self.config.weighting.apply(&current);
            let block =
                fast_greedy_decreasing(&weighted, &col_weights, self.suspiciousness.as_ref())?;
            info!(
                "block {}: {}x{}, average score {:.4}, peeled in {:?}",
                run,
                block.row_indices.len(),
                block.col_indices.len(),
                block.ave_score,
                run_start.elapsed()
            );
            current.zero_block(&block.row_indices, &block.col_indices);
            blocks.push(block);
        }

        let stats = if self.config.collect_stats {
            Some(self.collect_stats(matrix, &blocks, start.elapsed()))
        } else {
            None
        };
        Ok(DetectionResult { blocks, stats })
    }

    fn collect_stats(
        &self,
        matrix: &SparseMatrix,
        blocks: &[DenseBlock],
        total_duration: Duration,
    ) -> DetectionStats {
        let block_densities: Vec<f64> = if self.config.parallel_stats {
            blocks.par_iter().map(|b| block_density(matrix, b)).collect()
        } else {
            blocks.iter().map(|b| block_density(matrix, b)).collect()
        };

        let scores: Vec<f64> = blocks.iter().map(|b| b.ave_score).collect();
        let score_distribution = if scores.is_empty() {
            ScoreDistribution {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                std_dev: 0.0,
            }
        } else {
            let min = scores.iter().fold(f64::INFINITY, |a, &b| a.min(b));
            let max = scores.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
            let mean = scores.iter().mean();
            let std_dev = if scores.len() > 1 {
                scores.iter().std_dev()
            } else {
                0.0
            };
            ScoreDistribution {
                min,
                max,
                mean,
                std_dev,
            }
        };

        DetectionStats {
            total_duration,
            blocks_found: blocks.len(),
            score_distribution,
            block_densities,
        }
    }
}

/// Unweighted density of a block against `matrix`: edges with both
/// endpoints inside, divided by the node count.
pub fn block_density(matrix: &SparseMatrix, block: &DenseBlock) -> f64 {
    let nodes = block.row_indices.len() + block.col_indices.len();
    if nodes == 0 {
        return 0.0;
    }
    let mut in_cols = vec![false; matrix.ncols()];
    for &c in &block.col_indices {
        in_cols[c] = true;
    }
    let mut edges = 0usize;
    for &r in &block.row_indices {
        edges += matrix.row(r).iter().filter(|&&(c, _)| in_cols[c]).count();
    }
    edges as f64 / nodes as f64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionStats {
    pub total_duration: Duration,
    pub blocks_found: usize,
    pub score_distribution: ScoreDistribution,
    /// Unweighted density of each block against the original matrix.
    pub block_densities: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreDistribution {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone)]
pub struct DetectionResult {
    pub blocks: Vec<DenseBlock>,
    pub stats: Option<DetectionStats>,
}

impl DetectionResult {
    pub fn summary(&self) -> String {
        let mut summary = format!("Found {} blocks", self.blocks.len());
        for (i, block) in self.blocks.iter().take(5).enumerate() {
            summary.push_str(&format!(
                "\n  #{}: {}x{} block, score: {:.4}",
                i + 1,
                block.row_indices.len(),
                block.col_indices.len(),
                block.ave_score
            ));
        }
        if self.blocks.len() > 5 {
            summary.push_str(&format!("\n  ... and {} more", self.blocks.len() - 5));
        }
        summary
    }
}

/// Builder mirroring the config fields, one setter each.
pub struct DetectorBuilder {
    config: DetectorConfig,
    suspiciousness: Option<NodeSuspiciousness>,
}

impl DetectorBuilder {
    pub fn new() -> DetectorBuilder {
        DetectorBuilder {
            config: DetectorConfig::default(),
            suspiciousness: None,
        }
    }

    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.config.weighting = weighting;
        self
    }

    pub fn num_blocks(mut self, num_blocks: usize) -> Self {
        self.config.num_blocks = num_blocks;
        self
    }

    pub fn with_suspiciousness(mut self, suspiciousness: NodeSuspiciousness) -> Self {
        self.suspiciousness = Some(suspiciousness);
        self
    }

    pub fn collect_stats(mut self, collect: bool) -> Self {
        self.config.collect_stats = collect;
        self
    }

    pub fn parallel_stats(mut self, parallel: bool) -> Self {
        self.config.parallel_stats = parallel;
        self
    }

    pub fn build(self) -> Detector {
        Detector {
            config: self.config,
            suspiciousness: self.suspiciousness,
        }
    }
}

impl Default for DetectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
