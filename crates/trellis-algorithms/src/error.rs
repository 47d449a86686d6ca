//! Error types shared by all algorithms
//!
//! Algorithms that accept user callbacks are generic over the caller's error
//! type `E: From<AlgorithmError>`: callback errors are returned as-is, and
//! engine-side failures are converted into `E` through this enum.

use crate::common::{GraphKind, NodeIndex};
use thiserror::Error;

/// Errors raised by the algorithm engine itself
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgorithmError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeIndex),

    #[error("No path found to a node satisfying the goal")]
    NoPathFound,

    #[error("Graph variant mismatch: expected {expected}, found {found}")]
    VariantMismatch {
        expected: GraphKind,
        found: GraphKind,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type AlgorithmResult<T> = Result<T, AlgorithmError>;

/// Validate an edge weight for algorithms that require non-negative costs
pub(crate) fn checked_weight(weight: f64) -> AlgorithmResult<f64> {
    if weight.is_nan() || weight < 0.0 {
        return Err(AlgorithmError::InvalidArgument(format!(
            "edge weight must be a non-negative number, got {}",
            weight
        )));
    }
    Ok(weight)
}
