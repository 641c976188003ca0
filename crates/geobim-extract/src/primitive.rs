//! Primitive batch assembly.

use glam::DMat4;

use crate::{GeometryInstance, OpacityClass};

/// A renderable collection of instances sharing one opacity class.
///
/// Built synchronously, once per load. Instance buffers are not reallocated
/// or mutated after assembly. Picking resolves through each instance's
/// `mesh_id`; the mesh-id-to-property mapping stays with the caller and is
/// never recomputed here.
#[derive(Debug, Clone)]
pub struct PrimitiveBatch {
    pub class: OpacityClass,
    pub instances: Vec<GeometryInstance>,
    /// Collection-level world placement, identity until georeferenced.
    pub world_transform: DMat4,
}

impl PrimitiveBatch {
    /// Whether the batch's appearance enables alpha blending.
    #[must_use]
    pub fn blending(&self) -> bool {
        self.class == OpacityClass::Translucent
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// Build one renderable batch from an instance list.
pub fn assemble_batch(class: OpacityClass, instances: Vec<GeometryInstance>) -> PrimitiveBatch {
    PrimitiveBatch {
        class,
        instances,
        world_transform: DMat4::IDENTITY,
    }
}
