//! Pipeline orchestration.
//!
//! Folds the pulled mesh sequence once: deinterleave each placed geometry,
//! feed its positions to the global extent fold, compose its model matrix,
//! build its instance; then partition per mesh, assemble the two batches, and
//! georeference them. Everything after the byte fetch is synchronous and
//! CPU-bound.

use std::collections::HashMap;

use geobim_extract::{
    Extent, ExtentAccumulator, GeographicAnchor, OpacityClass, PrimitiveBatch, PropertyMap,
    RawMesh, assemble_batch, build_instance, compose_model_matrix, georeference_batches,
    partition_by_opacity,
};

use crate::client::{ByteCache, Client};
use crate::error::Result;
use crate::parser::{ModelCapabilities, ModelParser, ParserSettings};

/// Everything the scene collaborator needs from one model load.
#[derive(Debug, Clone)]
pub struct SceneModel {
    pub opaque: PrimitiveBatch,
    pub translucent: PrimitiveBatch,
    /// Global spatial bounds, for informational use such as camera framing.
    /// Undefined (`min > max`) when the model had no vertices.
    pub extent: Extent,
    /// Per-mesh property records, keyed by mesh identifier, for interactive
    /// lookup after picking.
    pub properties: HashMap<u32, PropertyMap>,
    pub capabilities: ModelCapabilities,
}

/// Run stages 1-7 over an already-parsed mesh sequence.
///
/// The sequence is consumed exactly once. Any malformed geometry aborts the
/// whole load; no partial batches are emitted.
pub fn extract_scene<I>(
    meshes: I,
    anchor: &GeographicAnchor,
    capabilities: ModelCapabilities,
) -> Result<SceneModel>
where
    I: IntoIterator<Item = RawMesh>,
{
    let mut extent_acc = ExtentAccumulator::new();
    let mut per_mesh_instances = Vec::new();
    let mut properties = HashMap::new();
    let mut mesh_count = 0_usize;
    let mut instance_count = 0_usize;

    for mesh in meshes {
        let mut instances = Vec::with_capacity(mesh.geometries.len());
        for geometry in &mesh.geometries {
            let model_matrix = compose_model_matrix(&geometry.transform);
            let instance = build_instance(mesh.id, geometry, model_matrix)?;
            extent_acc.observe_all(&instance.positions);
            instances.push(instance);
        }
        instance_count += instances.len();
        mesh_count += 1;
        per_mesh_instances.push(instances);
        properties.insert(mesh.id, mesh.properties);
    }

    let (opaque_instances, translucent_instances) = partition_by_opacity(per_mesh_instances);
    let mut batches = [
        assemble_batch(OpacityClass::Opaque, opaque_instances),
        assemble_batch(OpacityClass::Translucent, translucent_instances),
    ];
    georeference_batches(&mut batches, anchor);
    let [opaque, translucent] = batches;

    tracing::info!(
        meshes = mesh_count,
        instances = instance_count,
        opaque = opaque.instances.len(),
        translucent = translucent.instances.len(),
        "extracted scene geometry"
    );

    Ok(SceneModel {
        opaque,
        translucent,
        extent: extent_acc.extent(),
        properties,
        capabilities,
    })
}

/// Fetch a model file and run the full pipeline over it.
///
/// The fetch is awaited once; extraction then runs to completion on the
/// calling thread. The parser model is closed on success and failure alike.
pub async fn load_model<C, P>(
    client: &Client<C>,
    parser: &mut P,
    url: &str,
    settings: &ParserSettings,
    anchor: &GeographicAnchor,
) -> Result<SceneModel>
where
    C: ByteCache,
    P: ModelParser,
{
    let bytes = client.fetch_model_bytes(url).await?;

    let mut model = parser.open(&bytes, settings)?;
    let result = stream_and_extract(parser, &mut model, url, anchor);
    parser.close(model);
    result
}

fn stream_and_extract<P: ModelParser>(
    parser: &mut P,
    model: &mut P::Model,
    url: &str,
    anchor: &GeographicAnchor,
) -> Result<SceneModel> {
    let capabilities = ModelCapabilities::describe(parser.schema(model), url);
    tracing::info!(
        version = %capabilities.version,
        format = %capabilities.format,
        "opened model"
    );

    parser.load_geometry(model)?;
    let meshes = parser.meshes(model)?;
    extract_scene(meshes, anchor, capabilities)
}
