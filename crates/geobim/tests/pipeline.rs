//! End-to-end pipeline scenarios over a mock parser.

use std::collections::HashMap;

use geobim::{
    Error, GeographicAnchor, ModelCapabilities, ModelParser, ParserSettings, PlacedGeometry,
    PropertyValue, RawMesh, SCHEMA_PLACEHOLDER, extract_scene,
};
use glam::DMat4;

const ANCHOR: GeographicAnchor = GeographicAnchor {
    longitude_deg: 71.436_785_7,
    latitude_deg: 51.119_475_1,
    height_m: 400.0,
};

fn capabilities() -> ModelCapabilities {
    ModelCapabilities::describe(Some("IFC4".into()), "asset/3d/building.ifc")
}

/// Interleave positions with a constant up normal.
fn interleave(positions: &[[f32; 3]]) -> Vec<f32> {
    positions
        .iter()
        .flat_map(|p| [p[0], p[1], p[2], 0.0, 0.0, 1.0])
        .collect()
}

fn unit_cube(color: [f32; 4]) -> PlacedGeometry {
    let corners: Vec<[f32; 3]> = (0i16..8)
        .map(|i| {
            [
                f32::from(i & 1),
                f32::from((i >> 1) & 1),
                f32::from((i >> 2) & 1),
            ]
        })
        .collect();
    PlacedGeometry {
        color,
        vertices: interleave(&corners),
        // One face is enough; the extent only needs the corner positions.
        indices: vec![0, 1, 2, 1, 3, 2],
        transform: DMat4::IDENTITY,
    }
}

fn single_triangle(color: [f32; 4]) -> PlacedGeometry {
    PlacedGeometry {
        color,
        vertices: interleave(&[[2.0, 0.0, 0.0], [3.0, 0.0, 0.0], [2.0, 1.0, 0.0]]),
        indices: vec![0, 1, 2],
        transform: DMat4::IDENTITY,
    }
}

fn properties(pairs: &[(&str, PropertyValue)]) -> HashMap<String, PropertyValue> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), v.clone()))
        .collect()
}

#[test]
fn mixed_mesh_routes_entirely_to_translucent() {
    // One mesh holding an opaque cube and a half-transparent triangle: the
    // mesh-level rule routes both instances into the translucent batch.
    let mesh = RawMesh {
        id: 42,
        geometries: vec![
            unit_cube([0.8, 0.8, 0.8, 1.0]),
            single_triangle([0.2, 0.4, 0.9, 0.5]),
        ],
        properties: properties(&[
            ("Name", PropertyValue::String("Wall".into())),
            ("LoadBearing", PropertyValue::Bool(true)),
        ]),
    };

    let scene = extract_scene([mesh], &ANCHOR, capabilities()).unwrap();

    assert!(scene.opaque.is_empty());
    assert_eq!(scene.translucent.instances.len(), 2);
    assert!(scene.translucent.blending());
    assert!(!scene.opaque.blending());

    // The extent covers the union of both geometries' positions.
    assert!(scene.extent.is_defined());
    assert_eq!(scene.extent.min.to_array(), [0.0, 0.0, 0.0]);
    assert_eq!(scene.extent.max.to_array(), [3.0, 1.0, 1.0]);

    // One property map serves every instance of the mesh.
    let props = &scene.properties[&42];
    assert_eq!(props["Name"], PropertyValue::String("Wall".into()));
    assert_eq!(props["LoadBearing"], PropertyValue::Bool(true));
    assert!(scene.translucent.instances.iter().all(|i| i.mesh_id == 42));
}

#[test]
fn opaque_and_translucent_meshes_split_one_instance_each() {
    let opaque_mesh = RawMesh {
        id: 1,
        geometries: vec![unit_cube([0.8, 0.8, 0.8, 1.0])],
        properties: properties(&[("Name", PropertyValue::String("Slab".into()))]),
    };
    let translucent_mesh = RawMesh {
        id: 2,
        geometries: vec![single_triangle([0.2, 0.4, 0.9, 0.5])],
        properties: properties(&[("Name", PropertyValue::String("Window".into()))]),
    };

    let scene =
        extract_scene([opaque_mesh, translucent_mesh], &ANCHOR, capabilities()).unwrap();

    assert_eq!(scene.opaque.instances.len(), 1);
    assert_eq!(scene.translucent.instances.len(), 1);
    assert_eq!(scene.opaque.instances[0].mesh_id, 1);
    assert_eq!(scene.translucent.instances[0].mesh_id, 2);

    // Both batches share the one geographic frame.
    assert_eq!(scene.opaque.world_transform, scene.translucent.world_transform);
    assert_ne!(scene.opaque.world_transform, DMat4::IDENTITY);
}

#[test]
fn empty_model_yields_undefined_extent_and_empty_batches() {
    let scene = extract_scene(std::iter::empty(), &ANCHOR, capabilities()).unwrap();

    assert!(!scene.extent.is_defined());
    assert!(scene.opaque.is_empty());
    assert!(scene.translucent.is_empty());
    assert!(scene.properties.is_empty());
}

#[test]
fn out_of_range_index_aborts_the_load() {
    let mut bad = single_triangle([1.0, 1.0, 1.0, 1.0]);
    bad.indices = vec![0, 1, 10];
    let meshes = [
        RawMesh {
            id: 1,
            geometries: vec![unit_cube([1.0, 1.0, 1.0, 1.0])],
            properties: HashMap::new(),
        },
        RawMesh {
            id: 2,
            geometries: vec![bad],
            properties: HashMap::new(),
        },
    ];

    let err = extract_scene(meshes, &ANCHOR, capabilities()).unwrap_err();
    assert!(matches!(
        err,
        Error::Extract(geobim_extract::ExtractError::IndexOutOfRange {
            index: 10,
            vertex_count: 3
        })
    ));
}

/// Minimal in-memory parser standing in for the external collaborator.
struct MockParser {
    meshes: Vec<RawMesh>,
    schema: Option<String>,
    open_models: usize,
}

struct MockModel {
    meshes: Vec<RawMesh>,
    geometry_loaded: bool,
}

impl ModelParser for MockParser {
    type Model = MockModel;

    fn open(&mut self, bytes: &[u8], _settings: &ParserSettings) -> geobim::Result<Self::Model> {
        if bytes.is_empty() {
            return Err(Error::Parser("empty model file".into()));
        }
        self.open_models += 1;
        Ok(MockModel {
            meshes: std::mem::take(&mut self.meshes),
            geometry_loaded: false,
        })
    }

    fn load_geometry(&mut self, model: &mut Self::Model) -> geobim::Result<()> {
        model.geometry_loaded = true;
        Ok(())
    }

    fn meshes(&mut self, model: &mut Self::Model) -> geobim::Result<Vec<RawMesh>> {
        assert!(model.geometry_loaded, "meshes pulled before load_geometry");
        Ok(std::mem::take(&mut model.meshes))
    }

    fn schema(&self, _model: &Self::Model) -> Option<String> {
        self.schema.clone()
    }

    fn close(&mut self, _model: Self::Model) {
        self.open_models -= 1;
    }
}

#[test]
fn undefined_schema_is_reported_as_placeholder() {
    let caps = ModelCapabilities::describe(None, "asset/3d/building.ifc");
    assert_eq!(caps.version, SCHEMA_PLACEHOLDER);
    assert_eq!(caps.format, "ifc");
}

#[test]
fn parser_model_is_closed_after_a_failed_load() {
    // Drive the parser half of load_model through open/stream/close directly.
    let mut parser = MockParser {
        meshes: vec![RawMesh {
            id: 1,
            geometries: vec![{
                let mut g = single_triangle([1.0, 1.0, 1.0, 1.0]);
                g.indices = vec![7];
                g
            }],
            properties: HashMap::new(),
        }],
        schema: None,
        open_models: 0,
    };

    let settings = ParserSettings::default();
    let mut model = parser.open(&[1, 2, 3], &settings).unwrap();
    assert_eq!(parser.open_models, 1);

    parser.load_geometry(&mut model).unwrap();
    let meshes = parser.meshes(&mut model).unwrap();
    let caps = ModelCapabilities::describe(parser.schema(&model), "building.ifc");
    let result = extract_scene(meshes, &ANCHOR, caps);
    parser.close(model);

    assert!(result.is_err());
    assert_eq!(parser.open_models, 0);
}

#[tokio::test]
async fn unreachable_server_fails_the_fetch_without_retry() {
    let client = geobim::Client::with_cache(geobim::NoCache);
    // Nothing listens on the discard port.
    let err = client
        .fetch_model_bytes("http://127.0.0.1:9/building.ifc")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}
