//! Geometry instance assembly.

use glam::{DMat4, DVec3};

use crate::error::{ExtractError, ExtractResult};
use crate::vertices::deinterleave_vertices;
use crate::{BoundingSphere, GeometryInstance, PlacedGeometry};

/// Assemble a render-ready instance from one placed geometry.
///
/// Position and normal buffers are the deinterleaved vertex data, left in
/// local space; the composed model matrix carries the transform. The bounding
/// sphere is computed over the local-space positions, so consumers must apply
/// the model matrix before culling against it. Opacity is cached from the
/// color's alpha component for later mesh-level classification.
///
/// # Errors
///
/// Returns [`ExtractError::MalformedVertexBuffer`] for a bad interleaved
/// buffer and [`ExtractError::IndexOutOfRange`] if any index references a
/// vertex past the end of the buffer.
pub fn build_instance(
    mesh_id: u32,
    geometry: &PlacedGeometry,
    model_matrix: DMat4,
) -> ExtractResult<GeometryInstance> {
    let (positions, normals) = deinterleave_vertices(&geometry.vertices)?;
    let vertex_count = positions.len() / 3;

    for &index in &geometry.indices {
        if index as usize >= vertex_count {
            return Err(ExtractError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
    }

    Ok(GeometryInstance {
        mesh_id,
        model_matrix,
        bounds: bounding_sphere(&positions),
        normals,
        indices: geometry.indices.clone(),
        color: geometry.color,
        opacity: geometry.color[3],
        positions,
    })
}

/// Minimal enclosing sphere of a flat position buffer.
///
/// Seeds the center at the midpoint of the axis-aligned bounds, then takes
/// the largest distance to any vertex as the radius. An empty buffer yields a
/// zero sphere at the origin.
fn bounding_sphere(positions: &[f64]) -> BoundingSphere {
    if positions.is_empty() {
        return BoundingSphere {
            center: DVec3::ZERO,
            radius: 0.0,
        };
    }

    let mut min = DVec3::INFINITY;
    let mut max = DVec3::NEG_INFINITY;
    for p in positions.chunks_exact(3) {
        let p = DVec3::new(p[0], p[1], p[2]);
        min = min.min(p);
        max = max.max(p);
    }
    let center = (min + max) / 2.0;

    let radius = positions
        .chunks_exact(3)
        .map(|p| center.distance(DVec3::new(p[0], p[1], p[2])))
        .fold(0.0, f64::max);

    BoundingSphere { center, radius }
}
