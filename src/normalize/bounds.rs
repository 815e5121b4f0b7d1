//! Bounding-box computation over a shape's drawable primitives.
//!
//! Path points contribute their literal coordinates; ellipse/roundrect
//! primitives contribute `x`/`y` on the min side and `x+w`/`y+h` on the max
//! side. Text never participates: only path and box geometry define the box.
//!
//! Two long-standing quirks are preserved on purpose:
//! - `max_x`/`max_y` start at 0 and only increase, so geometry living
//!   entirely in negative coordinate space yields a misleading max;
//! - an ellipse/roundrect `y` never seeds `min_y` directly, it is only
//!   compared against on subsequent primitives. Downstream scale
//!   computation tolerates both.

use glam::DVec2;

use crate::errors::NormalizeError;
use crate::xml::Element;

use super::primitives::{Axis, BoxQuad, PrimitiveKind, axis_of, parse_num};

/// Minimal axis-aligned box around a shape's geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Accumulator with the seeding policy described in the module docs
struct Accumulator {
    min: DVec2,
    max: DVec2,
    first_x: bool,
    first_y: bool,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            min: DVec2::ZERO,
            max: DVec2::ZERO,
            first_x: false,
            first_y: false,
        }
    }

    fn point_x(&mut self, val: f64) {
        if !self.first_x {
            self.min.x = val;
            self.first_x = true;
        } else if val < self.min.x {
            self.min.x = val;
        }
        if val > self.max.x {
            self.max.x = val;
        }
    }

    fn point_y(&mut self, val: f64) {
        if !self.first_y {
            self.min.y = val;
            self.first_y = true;
        } else if val < self.min.y {
            self.min.y = val;
        }
        if val > self.max.y {
            self.max.y = val;
        }
    }

    fn quad(&mut self, q: &BoxQuad) {
        if !self.first_x {
            self.min.x = q.x;
            self.first_x = true;
        } else if q.x < self.min.x {
            self.min.x = q.x;
        }
        // min_y is never seeded from a box primitive, only compared
        if !self.first_y {
            self.first_y = true;
        } else if q.y < self.min.y {
            self.min.y = q.y;
        }
        if q.x + q.w > self.max.x {
            self.max.x = q.x + q.w;
        }
        if q.y + q.h > self.max.y {
            self.max.y = q.y + q.h;
        }
    }
}

/// Scan a shape's foreground and produce its bounding box.
///
/// `shape_name` is only used in error reports. An inverted box on either
/// axis means the shape does not conform to the stencil grammar.
pub fn scan(shape: &Element, shape_name: &str) -> Result<BoundingBox, NormalizeError> {
    let mut acc = Accumulator::new();

    if let Some(foreground) = shape.child("foreground") {
        for prim in &foreground.children {
            match PrimitiveKind::classify(&prim.tag) {
                PrimitiveKind::Path => {
                    for point in &prim.children {
                        for (key, value) in &point.attrs {
                            match axis_of(key) {
                                Some(Axis::X) => acc.point_x(parse_num(shape_name, key, value)?),
                                Some(Axis::Y) => acc.point_y(parse_num(shape_name, key, value)?),
                                None => {}
                            }
                        }
                    }
                }
                PrimitiveKind::Box => {
                    let quad = BoxQuad::read(prim, shape_name)?;
                    acc.quad(&quad);
                }
                // Text is positioned later but never measured
                _ => {}
            }
        }
    }

    for (axis, min, max) in [
        (Axis::X, acc.min.x, acc.max.x),
        (Axis::Y, acc.min.y, acc.max.y),
    ] {
        if min > max {
            return Err(NormalizeError::MalformedShape {
                shape: shape_name.to_string(),
                axis,
                min,
                max,
            });
        }
    }

    Ok(BoundingBox {
        min: acc.min,
        max: acc.max,
    })
}
