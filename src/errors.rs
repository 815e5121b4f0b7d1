//! Error types with diagnostic codes using miette
//!
//! Stencil documents carry no source spans worth pointing at, so these
//! errors identify the offending shape and attribute by name instead.

use miette::Diagnostic;
use thiserror::Error;

use crate::normalize::Axis;

/// Errors that occur while normalizing a stencil document
#[derive(Error, Diagnostic, Debug)]
pub enum NormalizeError {
    /// The scanner produced an inverted bounding box (`min > max` on one
    /// axis), which no well-formed shape geometry can yield.
    #[error("malformed shape `{shape}`: bounding box inverted on the {axis} axis ({min} > {max})")]
    #[diagnostic(
        code(glyphfit::scan::malformed_shape),
        help("check the shape for negative extents, e.g. a box primitive with negative width")
    )]
    MalformedShape {
        shape: String,
        axis: Axis,
        min: f64,
        max: f64,
    },

    /// An ellipse/roundrect primitive is missing one of its `x`,`y`,`w`,`h`
    /// attributes (lookup is by case-insensitive substring).
    #[error("shape `{shape}`: <{tag}> primitive has no attribute matching `{attr}`")]
    #[diagnostic(code(glyphfit::scan::missing_attribute))]
    MissingAttribute {
        shape: String,
        tag: String,
        attr: &'static str,
    },

    /// A coordinate attribute holds text that does not parse as a number.
    #[error("shape `{shape}`: attribute `{attr}` holds non-numeric value `{value}`")]
    #[diagnostic(code(glyphfit::scan::invalid_number))]
    InvalidNumber {
        shape: String,
        attr: String,
        value: String,
    },

    /// The document contains no root element at all.
    #[error("document has no root element")]
    #[diagnostic(code(glyphfit::xml::empty_document))]
    EmptyDocument,

    /// The document is not well-formed XML or cannot be serialized.
    #[error("xml error: {0}")]
    #[diagnostic(code(glyphfit::xml::malformed_document))]
    Xml(#[from] quick_xml::Error),

    /// An XML attribute could not be decoded.
    #[error("xml attribute error: {0}")]
    #[diagnostic(code(glyphfit::xml::bad_attribute))]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),
}
