//! Bipartite review graph wired to the block detector.
//!
//! Reviewers and products are addressed by their insertion index, which is
//! also their row/column index in the incidence matrix, so detected blocks
//! map straight back to nodes. How flags are consumed is up to the caller;
//! the graph only records an anomalous score per reviewer.

/**
 * File: /src/graph.rs
 * Created Date: Sunday, March 9th 2025
 * Author: Zihan
 * -----
 * Last Modified: Sunday, 6th April 2025 3:12:50 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */
use std::collections::BTreeMap;

use log::info;

use crate::detector::{Detector, DetectorConfig};
use crate::error::DetectorError;
use crate::greedy::DenseBlock;
use crate::matrix::SparseMatrix;
use crate::weighting::Weighting;

#[derive(Debug, Clone)]
pub struct Reviewer {
    pub name: String,
    /// 0 by default, set to 1 when the detector places the reviewer in a
    /// dense block.
    pub anomalous_score: f64,
}

#[derive(Debug, Clone)]
pub struct Product {
    pub name: String,
}

/// Simple bipartite graph of reviewers, products and ratings.
pub struct ReviewGraph {
    reviewers: Vec<Reviewer>,
    products: Vec<Product>,
    // (reviewer, product) -> rating; last write wins
    reviews: BTreeMap<(usize, usize), f64>,
    config: DetectorConfig,
}

impl ReviewGraph {
    /// Graph whose [`ReviewGraph::update`] extracts up to `blocks` blocks
    /// with the given weighting.
    pub fn new(blocks: usize, weighting: Weighting) -> ReviewGraph {
        ReviewGraph {
            reviewers: Vec::new(),
            products: Vec::new(),
            reviews: BTreeMap::new(),
            config: DetectorConfig {
                weighting,
                num_blocks: blocks,
                ..DetectorConfig::default()
            },
        }
    }

    /// Register a reviewer and return its stable index.
    pub fn new_reviewer(&mut self, name: &str) -> usize {
        self.reviewers.push(Reviewer {
            name: name.to_string(),
            anomalous_score: 0.0,
        });
        self.reviewers.len() - 1
    }

    /// Register a product and return its stable index.
    pub fn new_product(&mut self, name: &str) -> usize {
        self.products.push(Product {
            name: name.to_string(),
        });
        self.products.len() - 1
    }

    pub fn reviewers(&self) -> &[Reviewer] {
        &self.reviewers
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Record a rating; returns the stored value. Reviewing the same
    /// product again replaces the previous rating.
    pub fn add_review(
        &mut self,
        reviewer: usize,
        product: usize,
        rating: f64,
    ) -> Result<f64, DetectorError> {
        if reviewer >= self.reviewers.len() {
            return Err(DetectorError::InvalidInput(format!(
                "unknown reviewer index {}",
                reviewer
            )));
        }
        if product >= self.products.len() {
            return Err(DetectorError::InvalidInput(format!(
                "unknown product index {}",
                product
            )));
        }
        if !rating.is_finite() {
            return Err(DetectorError::InvalidInput(format!(
                "rating {} is not finite",
                rating
            )));
        }
        self.reviews.insert((reviewer, product), rating);
        Ok(rating)
    }

    /// Incidence matrix over the current reviews: one unit entry per
    /// (reviewer, product) pair, shape (reviewers, products).
    pub fn to_matrix(&self) -> Result<SparseMatrix, DetectorError> {
        let edges: Vec<(usize, usize)> = self.reviews.keys().copied().collect();
        SparseMatrix::with_shape(&edges, self.reviewers.len(), self.products.len())
    }

    /// Run the detector over the current reviews and flag every reviewer
    /// that lands in a detected block with `anomalous_score = 1`.
    ///
    /// Returns the detected blocks so the caller can inspect products and
    /// scores too. Fails with `EmptyInput` when there is nothing to detect.
    pub fn update(&mut self) -> Result<Vec<DenseBlock>, DetectorError> {
        if self.reviews.is_empty() {
            return Err(DetectorError::EmptyInput);
        }
        let matrix = self.to_matrix()?;
        let detector = Detector::new(self.config.clone());
        let result = detector.detect(&matrix)?;

        let mut flagged = 0;
        for block in &result.blocks {
            for &reviewer in &block.row_indices {
                if self.reviewers[reviewer].anomalous_score != 1.0 {
                    self.reviewers[reviewer].anomalous_score = 1.0;
                    flagged += 1;
                }
            }
        }
        info!(
            "flagged {} of {} reviewers across {} blocks",
            flagged,
            self.reviewers.len(),
            result.blocks.len()
        );
        Ok(result.blocks)
    }

    /// Summary rating of a product: the average of its ratings weighted by
    /// `1 - anomalous_score` of each reviewer. Falls back to the plain mean
    /// when every reviewer of the product is flagged; `None` when the
    /// product has no reviews.
    pub fn summary(&self, product: usize) -> Option<f64> {
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        let mut plain_sum = 0.0;
        let mut count = 0usize;
        for (&(reviewer, p), &rating) in &self.reviews {
            if p != product {
                continue;
            }
            let weight = 1.0 - self.reviewers[reviewer].anomalous_score;
            weighted_sum += rating * weight;
            weight_total += weight;
            plain_sum += rating;
            count += 1;
        }
        if count == 0 {
            None
        } else if weight_total == 0.0 {
            Some(plain_sum / count as f64)
        } else {
            Some(weighted_sum / weight_total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_graph() -> ReviewGraph {
        let mut graph = ReviewGraph::new(1, Weighting::Unweighted);
        for i in 0..3 {
            graph.new_reviewer(&format!("reviewer-{}", i));
            graph.new_product(&format!("product-{}", i));
        }
        graph
    }

    #[test]
    fn test_indices_are_stable() {
        let mut graph = ReviewGraph::new(1, Weighting::InverseLog);
        assert_eq!(graph.new_reviewer("a"), 0);
        assert_eq!(graph.new_reviewer("b"), 1);
        assert_eq!(graph.new_product("x"), 0);
        assert_eq!(graph.reviewers()[1].name, "b");
        assert_eq!(graph.products()[0].name, "x");
    }

    #[test]
    fn test_add_review_round_trip() {
        let mut graph = small_graph();
        assert_eq!(graph.add_review(0, 1, 4.5).unwrap(), 4.5);
        // last write wins
        graph.add_review(0, 1, 2.0).unwrap();
        assert_eq!(graph.summary(1), Some(2.0));
    }

    #[test]
    fn test_add_review_validation() {
        let mut graph = small_graph();
        assert!(graph.add_review(9, 0, 1.0).is_err());
        assert!(graph.add_review(0, 9, 1.0).is_err());
        assert!(graph.add_review(0, 0, f64::NAN).is_err());
    }

    #[test]
    fn test_update_without_reviews_is_empty_input() {
        let mut graph = small_graph();
        assert_eq!(graph.update().unwrap_err(), DetectorError::EmptyInput);
    }

    #[test]
    fn test_summary_weights_out_anomalous_reviewers() {
        let mut graph = small_graph();
        graph.add_review(0, 2, 1.0).unwrap();
        graph.add_review(1, 2, 5.0).unwrap();
        assert_eq!(graph.summary(2), Some(3.0));

        graph.reviewers[0].anomalous_score = 1.0;
        assert_eq!(graph.summary(2), Some(5.0));

        // all reviewers flagged: plain mean
        graph.reviewers[1].anomalous_score = 1.0;
        assert_eq!(graph.summary(2), Some(3.0));

        assert_eq!(graph.summary(0), None);
    }

    #[test]
    fn test_update_flags_dense_reviewers() {
        let mut graph = ReviewGraph::new(1, Weighting::Unweighted);
        for i in 0..6 {
            graph.new_reviewer(&format!("reviewer-{}", i));
            graph.new_product(&format!("product-{}", i));
        }
        // reviewers 0..3 form a dense clique on products 0..3
        for i in 0..3 {
            for j in 0..3 {
                graph.add_review(i, j, 5.0).unwrap();
            }
        }
        // scattered legitimate reviews
        graph.add_review(3, 3, 4.0).unwrap();
        graph.add_review(3, 4, 3.0).unwrap();
        graph.add_review(4, 4, 2.0).unwrap();
        graph.add_review(5, 5, 2.0).unwrap();

        let blocks = graph.update().unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].row_indices, vec![0, 1, 2]);

        for i in 0..3 {
            assert_eq!(graph.reviewers()[i].anomalous_score, 1.0);
        }
        for i in 3..6 {
            assert_eq!(graph.reviewers()[i].anomalous_score, 0.0);
        }
    }
}
