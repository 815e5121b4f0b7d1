//! glyphfit normalizes vector-shape stencil documents (mxGraph-style XML
//! attribute trees) so that every glyph fits a fixed canvas with consistent
//! padding, stroke width and optional centering.
//!
//! The interesting part is the geometry pipeline in [`normalize`]: scan the
//! bounding box of a shape's drawable primitives, derive a uniform
//! aspect-preserving scale, apply it, re-scan, then translate the glyph onto
//! the canvas. Parsing and serializing the XML tree is a thin adapter in
//! [`xml`]; settings live in an immutable [`NormalizeConfig`].
//!
//! ```no_run
//! use glyphfit::{NormalizeConfig, normalize_stencil};
//!
//! let source = std::fs::read_to_string("glyphs.xml").unwrap();
//! let output = normalize_stencil(&source, &NormalizeConfig::default()).unwrap();
//! std::fs::write("glyphs-normalized.xml", output).unwrap();
//! ```

pub mod config;
pub mod errors;
pub mod log;
pub mod normalize;
pub mod xml;

pub use config::NormalizeConfig;
pub use errors::NormalizeError;
pub use normalize::{Axis, BoundingBox};

/// Normalize a whole stencil document, source string to output string.
///
/// Convenience wrapper over [`xml::parse`], [`normalize::normalize_document`]
/// and [`xml::serialize`]. The first malformed shape aborts the run.
pub fn normalize_stencil(
    source: &str,
    config: &NormalizeConfig,
) -> Result<String, NormalizeError> {
    let mut root = xml::parse(source)?;
    normalize::normalize_document(&mut root, config)?;
    xml::serialize(&root)
}
