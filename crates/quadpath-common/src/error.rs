//! Error types for quadpath.
//!
//! Every variant is recoverable: callers are expected to pick another target
//! or retry on the next planning episode rather than abort.

use thiserror::Error;

/// Errors raised while building region trees or searching them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadPathError {
    /// The tree bounds have zero or negative area
    #[error("invalid tree bounds: {width} x {height} has no area")]
    InvalidBounds {
        /// Width of the rejected bounds
        width: f32,
        /// Height of the rejected bounds
        height: f32,
    },

    /// The minimum cell size is not strictly positive
    #[error("invalid minimum cell size: {0} (must be > 0)")]
    InvalidMinSize(f32),

    /// A query point is not contained in the root bounds
    #[error("point ({x}, {y}) lies outside the tree bounds")]
    PointOutOfBounds {
        /// X coordinate of the point
        x: f32,
        /// Y coordinate of the point
        y: f32,
    },

    /// No tree has been built yet
    #[error("region tree is empty")]
    EmptyTree,

    /// The search exhausted its frontier without reaching the target
    #[error("no path between start and target")]
    NoPath,
}

impl QuadPathError {
    /// Returns true for failures that a planner should retry with another
    /// target or at a later episode.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NoPath | Self::PointOutOfBounds { .. } | Self::EmptyTree
        )
    }
}

/// Result type alias for quadpath operations.
pub type QuadPathResult<T> = Result<T, QuadPathError>;
