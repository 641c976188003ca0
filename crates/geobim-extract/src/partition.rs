//! Mesh-level opacity partitioning.

use crate::GeometryInstance;

/// Route per-mesh instance lists into opaque and translucent sets.
///
/// The decision is made per mesh, not per instance: a mesh is opaque iff
/// every one of its instances has opacity exactly 1.0. One partially
/// transparent geometry routes the whole mesh's instances to the translucent
/// set, so a mesh never straddles both batches. No instance is dropped.
#[must_use]
pub fn partition_by_opacity(
    meshes: Vec<Vec<GeometryInstance>>,
) -> (Vec<GeometryInstance>, Vec<GeometryInstance>) {
    let mut opaque = Vec::new();
    let mut translucent = Vec::new();

    for instances in meshes {
        if instances.iter().all(|i| i.opacity == 1.0) {
            opaque.extend(instances);
        } else {
            translucent.extend(instances);
        }
    }

    (opaque, translucent)
}
