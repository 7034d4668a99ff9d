/**
 * File: /src/error.rs
 * Created Date: Tuesday, March 4th 2025
 * Author: Zihan
 * -----
 * Last Modified: Tuesday, 4th March 2025 10:12:36 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */
use std::fmt;

/// Errors surfaced by matrix construction and the detection front-end.
///
/// `InvalidInput` covers anything malformed handed in from outside
/// (out-of-range indices, non-finite weights, unknown policy names) and is
/// always raised at construction, before any algorithm runs. `EmptyInput`
/// marks a degenerate matrix with zero rows or columns; the caller decides
/// whether that means "no block found" or is worth propagating.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectorError {
    InvalidInput(String),
    EmptyInput,
}

impl fmt::Display for DetectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectorError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            DetectorError::EmptyInput => write!(f, "matrix has no rows or no columns"),
        }
    }
}

impl std::error::Error for DetectorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DetectorError::InvalidInput("edge (3, 9) outside 3x4 matrix".to_string());
        assert_eq!(
            err.to_string(),
            "invalid input: edge (3, 9) outside 3x4 matrix"
        );

        let err = DetectorError::EmptyInput;
        assert_eq!(err.to_string(), "matrix has no rows or no columns");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<DetectorError>();
        assert_sync::<DetectorError>();
    }
}
