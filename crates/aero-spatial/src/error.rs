//! Error types for spatial operations.

/// Errors that can occur while constructing or addressing spatial structures.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SpatialError {
    /// The cell size must be positive and finite.
    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),

    /// The octree root cube must have a positive, finite edge length.
    #[error("octree size must be positive and finite, got {0}")]
    InvalidOctreeSize(f64),
}
