//! High-level loader for building-information models.
//!
//! Fetches a model file, drives an external parser over it, and runs the
//! extraction pipeline from [`geobim_extract`] to produce two georeferenced
//! geometry batches (opaque and translucent) plus the model's spatial extent
//! and per-mesh property maps.
//!
//! The only suspension point is the initial byte fetch; once bytes are
//! available the whole pipeline runs synchronously on the calling thread. The
//! pipeline executes once per model load, not per frame - callers wanting
//! responsiveness should run [`load_model`] off the main thread as one opaque
//! unit of work.

mod client;
mod error;
mod parser;
mod pipeline;

pub use client::{ByteCache, Client, MemoryCache, NoCache};
pub use error::{Error, Result};
pub use parser::{ModelCapabilities, ModelParser, ParserSettings, SCHEMA_PLACEHOLDER};
pub use pipeline::{SceneModel, extract_scene, load_model};

pub use geobim_extract::{
    Extent, GeographicAnchor, GeometryInstance, OpacityClass, PlacedGeometry, PrimitiveBatch,
    PropertyMap, PropertyValue, RawMesh,
};
