//! Extraction error types.

/// Errors produced while extracting geometry from a parsed model.
///
/// Both variants are fatal for the load: a malformed buffer must surface to
/// the caller rather than be skipped, since a silent skip would corrupt the
/// extent and partition invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// Interleaved vertex buffer length is not a multiple of the stride.
    #[error("interleaved vertex buffer length {len} is not a multiple of {stride}")]
    MalformedVertexBuffer { len: usize, stride: usize },

    /// An index references a vertex beyond the end of the vertex buffer.
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// Result alias for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
