//! Vertex deinterleaving.

use crate::error::{ExtractError, ExtractResult};
use crate::VERTEX_STRIDE;

/// Split an interleaved vertex buffer into position and normal sequences.
///
/// Input format: `6*N` floats arranged as `[x, y, z, nx, ny, nz]` per vertex.
/// Vertex `i` takes its position from `buffer[6i..6i+3]` and its normal from
/// `buffer[6i+3..6i+6]`.
///
/// Positions are widened to `f64` (scene-space coordinates need the
/// precision); normals stay `f32`.
///
/// # Errors
///
/// Returns [`ExtractError::MalformedVertexBuffer`] if the buffer length is
/// not a multiple of 6.
pub fn deinterleave_vertices(buffer: &[f32]) -> ExtractResult<(Vec<f64>, Vec<f32>)> {
    if buffer.len() % VERTEX_STRIDE != 0 {
        return Err(ExtractError::MalformedVertexBuffer {
            len: buffer.len(),
            stride: VERTEX_STRIDE,
        });
    }

    let vertex_count = buffer.len() / VERTEX_STRIDE;
    let mut positions = Vec::with_capacity(vertex_count * 3);
    let mut normals = Vec::with_capacity(vertex_count * 3);

    for vertex in buffer.chunks_exact(VERTEX_STRIDE) {
        positions.extend(vertex[..3].iter().map(|&c| f64::from(c)));
        normals.extend_from_slice(&vertex[3..]);
    }

    Ok((positions, normals))
}
