/**
 * File: /src/weighting.rs
 * Created Date: Thursday, March 6th 2025
 * Author: Zihan
 * -----
 * Last Modified: Thursday, 6th March 2025 8:54:17 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */
use std::fmt;
use std::str::FromStr;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::DetectorError;
use crate::matrix::SparseMatrix;

/// Offset added to column sums before the square root or logarithm, so
/// low-degree columns never drive the weight to a division by zero or a
/// non-positive logarithm. Tuning constant, kept exactly for result
/// compatibility.
pub const DEGENERACY_OFFSET: f64 = 5.0;

/// Column weighting applied to the incidence matrix before peeling.
///
/// Down-weighting high-degree columns is what makes the detector resist
/// camouflage: edges into popular columns become cheap, so a fraud block
/// padded with them still peels down to its true core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weighting {
    /// c[j] = 1; the raw average-degree objective.
    Unweighted,
    /// c[j] = 1 / sqrt(colSum(j) + 5)
    InverseSqrt,
    /// c[j] = 1 / log(colSum(j) + 5)
    InverseLog,
}

impl Weighting {
    /// Per-column weights for `matrix`, always finite and positive.
    pub fn column_weights(&self, matrix: &SparseMatrix) -> Array1<f64> {
        match self {
            Weighting::Unweighted => Array1::ones(matrix.ncols()),
            Weighting::InverseSqrt => matrix.col_sums().mapv(|s| {
                debug_assert!(s >= 0.0, "negative column sum {}", s);
                1.0 / (s + DEGENERACY_OFFSET).sqrt()
            }),
            Weighting::InverseLog => matrix.col_sums().mapv(|s| {
                debug_assert!(s >= 0.0, "negative column sum {}", s);
                1.0 / (s + DEGENERACY_OFFSET).ln()
            }),
        }
    }

    /// Weighted matrix W with W[i,j] = M[i,j] * c[j], plus the weights c.
    pub fn apply(&self, matrix: &SparseMatrix) -> (SparseMatrix, Array1<f64>) {
        let weights = self.column_weights(matrix);
        let weighted = match self {
            Weighting::Unweighted => matrix.clone(),
            _ => matrix.scale_columns(&weights),
        };
        (weighted, weights)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Weighting::Unweighted => "unweighted",
            Weighting::InverseSqrt => "inverse-sqrt",
            Weighting::InverseLog => "inverse-log",
        }
    }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Weighting {
    type Err = DetectorError;

    fn from_str(s: &str) -> Result<Weighting, DetectorError> {
        match s.to_ascii_lowercase().as_str() {
            "unweighted" | "ave" => Ok(Weighting::Unweighted),
            "inverse-sqrt" | "sqrt" => Ok(Weighting::InverseSqrt),
            "inverse-log" | "log" => Ok(Weighting::InverseLog),
            other => Err(DetectorError::InvalidInput(format!(
                "unknown weighting '{}', expected unweighted, inverse-sqrt or inverse-log",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unweighted_is_all_ones() {
        let matrix = SparseMatrix::from_edges(&[(0, 0), (1, 1), (1, 2)]).unwrap();
        let (weighted, weights) = Weighting::Unweighted.apply(&matrix);
        assert_eq!(weights.to_vec(), vec![1.0, 1.0, 1.0]);
        assert_eq!(weighted.total(), matrix.total());
    }

    #[test]
    fn test_inverse_sqrt_weights() {
        // col 0 has sum 2, col 1 has sum 1
        let matrix = SparseMatrix::from_edges(&[(0, 0), (1, 0), (0, 1)]).unwrap();
        let weights = Weighting::InverseSqrt.column_weights(&matrix);
        assert!((weights[0] - 1.0 / 7.0_f64.sqrt()).abs() < 1e-12);
        assert!((weights[1] - 1.0 / 6.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_log_scales_entries() {
        let matrix = SparseMatrix::from_edges(&[(0, 0), (1, 0), (0, 1)]).unwrap();
        let (weighted, weights) = Weighting::InverseLog.apply(&matrix);
        assert!((weights[0] - 1.0 / 7.0_f64.ln()).abs() < 1e-12);
        for &(j, v) in weighted.row(0) {
            assert!((v - weights[j]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_degree_column_stays_finite() {
        // col 1 never referenced
        let matrix = SparseMatrix::with_shape(&[(0, 0)], 1, 2).unwrap();

        let sqrt_weights = Weighting::InverseSqrt.column_weights(&matrix);
        assert!((sqrt_weights[1] - 1.0 / 5.0_f64.sqrt()).abs() < 1e-12);

        let log_weights = Weighting::InverseLog.column_weights(&matrix);
        assert!((log_weights[1] - 1.0 / 5.0_f64.ln()).abs() < 1e-12);

        for w in sqrt_weights.iter().chain(log_weights.iter()) {
            assert!(w.is_finite() && *w > 0.0);
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("unweighted".parse::<Weighting>().unwrap(), Weighting::Unweighted);
        assert_eq!("sqrt".parse::<Weighting>().unwrap(), Weighting::InverseSqrt);
        assert_eq!("inverse-log".parse::<Weighting>().unwrap(), Weighting::InverseLog);
        assert_eq!("LOG".parse::<Weighting>().unwrap(), Weighting::InverseLog);
        assert!("pagerank".parse::<Weighting>().is_err());
    }
}
