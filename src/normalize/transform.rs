//! In-place scale and shift passes over a shape's primitives.
//!
//! Both passes compose arithmetically when applied repeatedly; neither is a
//! no-op on a second call. Scale touches every coordinate-classified
//! attribute of path points plus the `w`/`h` of box primitives (a box's
//! `x`/`y` are left alone: the post-scale re-measure and shift correct its
//! placement). Shift moves one axis per call and honors the rx/ry/rotation
//! exclusion set.

use crate::errors::NormalizeError;
use crate::xml::Element;

use super::primitives::{Axis, BoxQuad, PrimitiveKind, axis_of, fmt_num, parse_num, shiftable};

/// Multiply every coordinate attribute by `factor`.
pub fn scale(shape: &mut Element, shape_name: &str, factor: f64) -> Result<(), NormalizeError> {
    let Some(foreground) = shape.child_mut("foreground") else {
        return Ok(());
    };
    for prim in &mut foreground.children {
        match PrimitiveKind::classify(&prim.tag) {
            PrimitiveKind::Path => {
                for point in &mut prim.children {
                    for (key, value) in point.attrs.iter_mut() {
                        if axis_of(key).is_some() {
                            let num = parse_num(shape_name, key, value)?;
                            *value = fmt_num(num * factor);
                        }
                    }
                }
            }
            PrimitiveKind::Box => {
                let quad = BoxQuad::read(prim, shape_name)?;
                prim.set_attr(quad.w_key.clone(), fmt_num(quad.w * factor));
                prim.set_attr(quad.h_key.clone(), fmt_num(quad.h * factor));
            }
            // Text position and stroke settings are unaffected by scale
            _ => {}
        }
    }
    Ok(())
}

/// Add `distance` to every attribute on the given axis.
pub fn shift(
    shape: &mut Element,
    shape_name: &str,
    distance: f64,
    axis: Axis,
) -> Result<(), NormalizeError> {
    let Some(foreground) = shape.child_mut("foreground") else {
        return Ok(());
    };
    for prim in &mut foreground.children {
        match PrimitiveKind::classify(&prim.tag) {
            PrimitiveKind::Path => {
                for point in &mut prim.children {
                    for (key, value) in point.attrs.iter_mut() {
                        if shiftable(key, axis) {
                            let num = parse_num(shape_name, key, value)?;
                            *value = fmt_num(num + distance);
                        }
                    }
                }
            }
            PrimitiveKind::Box => {
                let quad = BoxQuad::read(prim, shape_name)?;
                let (key, num) = match axis {
                    Axis::X => (quad.x_key.clone(), quad.x),
                    Axis::Y => (quad.y_key.clone(), quad.y),
                };
                prim.set_attr(key, fmt_num(num + distance));
            }
            PrimitiveKind::Text => {
                // Text position is best effort: an unpositioned label is
                // tolerated, not an error
                let needle = match axis {
                    Axis::X => "x",
                    Axis::Y => "y",
                };
                if let Some(key) = super::primitives::find_attr_key(prim, needle) {
                    let num = parse_num(shape_name, &key, prim.attr(&key).unwrap_or_default())?;
                    prim.set_attr(key, fmt_num(num + distance));
                }
            }
            _ => {}
        }
    }
    Ok(())
}
