//! Mesh construction error types.

/// Errors raised when mesh parameters or buffers are invalid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// Fewer than one latitude band was requested.
    #[error("sphere needs at least 1 latitude segment, got {0}")]
    InvalidLatSegments(u32),

    /// Fewer than three longitude slices were requested.
    #[error("sphere needs at least 3 longitude segments, got {0}")]
    InvalidLonSegments(u32),

    /// Radius was zero, negative, or not finite.
    #[error("radius must be finite and positive, got {0}")]
    InvalidRadius(f32),

    /// The requested tessellation does not fit in a `u32` index buffer.
    #[error("{lat_segments}x{lon_segments} sphere exceeds the u32 index range")]
    IndexOverflow {
        /// Requested latitude segments.
        lat_segments: u32,
        /// Requested longitude segments.
        lon_segments: u32,
    },

    /// An index points past the end of the vertex buffer.
    #[error("index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds {
        /// The offending index value.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A triangle index buffer whose length is not a multiple of three.
    #[error("triangle index count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),
}
