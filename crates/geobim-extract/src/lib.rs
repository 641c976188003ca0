//! Extract render-ready geometry from parsed building-model mesh streams.
//!
//! This crate provides pure synchronous extraction functions for turning the
//! raw meshes of a building-information model into two georeferenced geometry
//! batches (opaque and translucent). All functions are designed to be called
//! from any threading context - the library user controls parallelism.
//!
//! # Design principles
//!
//! - **Synchronous**: No async, no threading primitives
//! - **User-controlled parallelism**: Client decides how to parallelize
//! - **Forward-only data flow**: Each mesh is consumed exactly once
//!
//! # Key functions
//!
//! - [`deinterleave_vertices`]: Split interleaved position/normal buffers
//! - [`ExtentAccumulator`]: Fold vertex positions into a global bounding box
//! - [`compose_model_matrix`]: Combine axis realignment with local placement
//! - [`build_instance`]: Assemble a renderable unit from a placed geometry
//! - [`partition_by_opacity`]: Route meshes into opaque/translucent lists
//! - [`assemble_batch`]: Build one renderable batch per opacity class
//! - [`georeference_batches`]: Anchor assembled batches to a geographic point

mod error;

pub mod extent;
pub mod georef;
pub mod instance;
pub mod partition;
pub mod primitive;
pub mod transform;
pub mod vertices;

use std::collections::HashMap;

use glam::{DMat4, DVec3};

pub use error::{ExtractError, ExtractResult};
pub use extent::{Extent, ExtentAccumulator};
pub use georef::{GeographicAnchor, east_north_up_to_fixed_frame, georeference_batches};
pub use instance::build_instance;
pub use partition::partition_by_opacity;
pub use primitive::{PrimitiveBatch, assemble_batch};
pub use transform::{axis_realignment, compose_model_matrix};
pub use vertices::deinterleave_vertices;

/// Floats per interleaved vertex: 3 position components then 3 normal components.
pub const VERTEX_STRIDE: usize = 6;

/// A dynamic property value attached to a mesh.
///
/// The parser hands over loosely-typed property records; they are converted
/// into this tagged form once at the boundary and only inspected when the
/// interaction layer queries a key.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Number(f64),
    String(String),
    Bool(bool),
    Map(PropertyMap),
}

/// Property records for one mesh, keyed by property name.
pub type PropertyMap = HashMap<String, PropertyValue>;

/// One geometry occurrence within a mesh, as supplied by the parser.
///
/// A mesh may reference the same shape several times with different
/// placements; each occurrence arrives as its own `PlacedGeometry`.
#[derive(Debug, Clone)]
pub struct PlacedGeometry {
    /// RGBA color, components in `[0, 1]`.
    pub color: [f32; 4],
    /// Interleaved vertex buffer, [`VERTEX_STRIDE`] floats per vertex.
    pub vertices: Vec<f32>,
    /// Triangle indices into the vertex buffer.
    pub indices: Vec<u32>,
    /// Local placement matrix for this occurrence.
    pub transform: DMat4,
}

/// One parsed model element: an identifier, its placed geometries, and its
/// property records.
///
/// Produced by the parser during a single streaming pass and consumed exactly
/// once to build [`GeometryInstance`]s.
#[derive(Debug, Clone)]
pub struct RawMesh {
    /// Identifier unique within one model load.
    pub id: u32,
    pub geometries: Vec<PlacedGeometry>,
    pub properties: PropertyMap,
}

/// Minimal enclosing sphere of a position buffer, in local space.
///
/// Consumers must apply the instance's model matrix before using this bound
/// for culling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: DVec3,
    pub radius: f64,
}

/// A render-ready geometry unit derived from one [`PlacedGeometry`].
///
/// Position and normal buffers are stored untransformed in local space; the
/// model matrix carries the full transform into scene space.
#[derive(Debug, Clone)]
pub struct GeometryInstance {
    /// Identifier of the owning mesh, used as the pick id.
    pub mesh_id: u32,
    /// Axis realignment composed with the local placement.
    pub model_matrix: DMat4,
    /// Flat position buffer, 3 doubles per vertex.
    pub positions: Vec<f64>,
    /// Flat normal buffer, 3 floats per vertex.
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
    /// Local-space bounding volume over `positions`.
    pub bounds: BoundingSphere,
    /// RGBA color attribute, opacity included as the fourth component.
    pub color: [f32; 4],
    /// Alpha component cached for opacity classification.
    pub opacity: f32,
}

impl GeometryInstance {
    /// Number of vertices in the position buffer.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Opacity class of a batch, decided per mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpacityClass {
    Opaque,
    Translucent,
}
