//! The external parser boundary.
//!
//! The binary model format is parsed by an external collaborator whose
//! internals are opaque to this crate. The trait below is the whole surface
//! the pipeline depends on: open a model from bytes, load its geometry, pull
//! its meshes once, query its schema, and close it.

use geobim_extract::RawMesh;

use crate::error::Result;

/// Placeholder reported when the parser cannot name the model schema.
pub const SCHEMA_PLACEHOLDER: &str = "Model schema not defined";

/// Placeholder reported when the source URL carries no file extension.
const FORMAT_PLACEHOLDER: &str = "Format not defined";

/// Options forwarded to the parser when opening a model.
#[derive(Debug, Clone, Copy)]
pub struct ParserSettings {
    /// Translate the model so its coordination origin sits at the scene origin.
    pub coordinate_to_origin: bool,
    /// Use the parser's fast boolean-operation path.
    pub use_fast_booleans: bool,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            coordinate_to_origin: true,
            use_fast_booleans: true,
        }
    }
}

/// Interface to the external model parser.
///
/// `meshes` yields a finite, single-pass sequence of meshes; it is not
/// restartable. Any failure at this boundary propagates immediately and
/// terminates the load without retry or partial output.
pub trait ModelParser {
    /// Opaque handle to one opened model.
    type Model;

    fn open(&mut self, bytes: &[u8], settings: &ParserSettings) -> Result<Self::Model>;

    /// Prepare all geometry for streaming.
    fn load_geometry(&mut self, model: &mut Self::Model) -> Result<()>;

    /// Pull every mesh of the model, exactly once.
    fn meshes(&mut self, model: &mut Self::Model) -> Result<Vec<RawMesh>>;

    /// Schema/version of the model, if the parser can name it.
    fn schema(&self, model: &Self::Model) -> Option<String>;

    /// Release parser-side resources for the model.
    fn close(&mut self, model: Self::Model);
}

/// Capabilities of a loaded model, for informational display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCapabilities {
    /// Schema name, or [`SCHEMA_PLACEHOLDER`] when the parser reports none.
    pub version: String,
    /// File format taken from the source URL's extension.
    pub format: String,
}

impl ModelCapabilities {
    /// Derive capabilities from the parser's schema answer and the source URL.
    ///
    /// An undefined schema is non-fatal; it is substituted with the
    /// placeholder and processing continues.
    #[must_use]
    pub fn describe(schema: Option<String>, url: &str) -> Self {
        let version = schema.unwrap_or_else(|| {
            tracing::warn!(url, "parser reported no model schema");
            SCHEMA_PLACEHOLDER.to_owned()
        });
        Self {
            version,
            format: format_from_url(url),
        }
    }
}

/// Final extension of the URL path, e.g. `"ifc"` for `asset/3d/building.ifc`.
fn format_from_url(url: &str) -> String {
    url.rsplit('.')
        .next()
        .filter(|ext| !ext.is_empty() && *ext != url)
        .map_or_else(|| FORMAT_PLACEHOLDER.to_owned(), str::to_owned)
}
