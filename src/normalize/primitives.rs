//! Primitive-kind classification and attribute-name heuristics.
//!
//! Stencil primitives do not declare which attributes are coordinates, so
//! the scanner and transformer classify attribute keys by substring: any key
//! containing `x` (case-insensitive) is x-like, else any key containing `y`
//! is y-like. Radius and rotation fields (`rx`, `ry`, `x-axis-rotation`)
//! classify as coordinates for scaling but are never translated.

use crate::errors::NormalizeError;
use crate::xml::Element;

/// A coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Keys that classify as coordinates but must not be shifted
const SHIFT_EXCLUDED: [&str; 3] = ["rx", "ry", "x-axis-rotation"];

/// Classify an attribute key as x-like or y-like.
///
/// A key containing both letters (none exist in the stencil grammar, but
/// the rule is deliberate) classifies as x-like: x wins.
pub fn axis_of(key: &str) -> Option<Axis> {
    let lower = key.to_ascii_lowercase();
    if lower.contains('x') {
        Some(Axis::X)
    } else if lower.contains('y') {
        Some(Axis::Y)
    } else {
        None
    }
}

/// Whether a coordinate key participates in translation along `axis`
pub fn shiftable(key: &str, axis: Axis) -> bool {
    let lower = key.to_ascii_lowercase();
    axis_of(key) == Some(axis) && !SHIFT_EXCLUDED.contains(&lower.as_str())
}

/// The primitive kinds the pipeline distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// `<path>` with coordinate-bearing point children
    Path,
    /// `<ellipse>` / `<roundrect>`: one x/y/w/h quadruple
    Box,
    /// `<text>`: positioned but never measured
    Text,
    /// `<strokewidth>`: width overridden by the settings pass
    StrokeWidth,
    /// `<stroke>`: tag-only, rewritten to fillstroke under --fill-all
    Stroke,
    /// `<fillstroke>`: tag-only
    FillStroke,
    /// `<strokecolor>`: removable by the settings pass
    StrokeColor,
    /// Anything else: carried through untouched
    Other,
}

impl PrimitiveKind {
    pub fn classify(tag: &str) -> Self {
        match tag {
            "path" => Self::Path,
            "ellipse" | "roundrect" => Self::Box,
            "text" => Self::Text,
            "strokewidth" => Self::StrokeWidth,
            "stroke" => Self::Stroke,
            "fillstroke" => Self::FillStroke,
            "strokecolor" => Self::StrokeColor,
            _ => Self::Other,
        }
    }
}

/// Find the key of the first attribute whose name contains `needle`
/// case-insensitively, in attribute order.
pub fn find_attr_key(el: &Element, needle: &str) -> Option<String> {
    el.attrs
        .keys()
        .find(|key| key.to_ascii_lowercase().contains(needle))
        .cloned()
}

/// Parse a coordinate attribute value
pub fn parse_num(shape: &str, key: &str, value: &str) -> Result<f64, NormalizeError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| NormalizeError::InvalidNumber {
            shape: shape.to_string(),
            attr: key.to_string(),
            value: value.to_string(),
        })
}

/// Write a coordinate back as a decimal string
pub fn fmt_num(value: f64) -> String {
    format!("{value}")
}

/// The x/y/w/h quadruple of an ellipse or roundrect, with the concrete
/// attribute keys it was found under so values can be written back.
#[derive(Debug, Clone)]
pub struct BoxQuad {
    pub x_key: String,
    pub y_key: String,
    pub w_key: String,
    pub h_key: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BoxQuad {
    /// Locate the quadruple on an ellipse/roundrect primitive. A missing
    /// member means the primitive does not conform to the stencil grammar.
    pub fn read(el: &Element, shape: &str) -> Result<Self, NormalizeError> {
        let lookup = |needle: &'static str| -> Result<(String, f64), NormalizeError> {
            let key = find_attr_key(el, needle).ok_or_else(|| NormalizeError::MissingAttribute {
                shape: shape.to_string(),
                tag: el.tag.clone(),
                attr: needle,
            })?;
            let value = parse_num(shape, &key, el.attr(&key).unwrap_or_default())?;
            Ok((key, value))
        };
        let (x_key, x) = lookup("x")?;
        let (y_key, y) = lookup("y")?;
        let (w_key, w) = lookup("w")?;
        let (h_key, h) = lookup("h")?;
        Ok(Self {
            x_key,
            y_key,
            w_key,
            h_key,
            x,
            y,
            w,
            h,
        })
    }
}
