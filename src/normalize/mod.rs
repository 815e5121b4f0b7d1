//! Shape geometry normalization.
//!
//! This module is organized into submodules:
//! - `primitives`: primitive-kind classification and attribute heuristics
//! - `bounds`: bounding-box scanning
//! - `transform`: in-place scale and shift passes
//!
//! The pipeline itself lives here: per shape it runs the settings pass,
//! measures, scales to fit the canvas, re-measures, centers horizontally,
//! centers or bottom-anchors vertically, applies the manual nudge and
//! finally stamps the canvas dimensions onto the shape.

pub mod bounds;
pub mod primitives;
pub mod transform;

pub use bounds::BoundingBox;
pub use primitives::Axis;

use crate::config::NormalizeConfig;
use crate::errors::NormalizeError;
use crate::log::{debug, info, warn};
use crate::xml::Element;

use primitives::{PrimitiveKind, fmt_num};

/// Stand-in scale for a zero-extent axis: large enough that the other axis
/// always wins the `min`, finite so the arithmetic stays debuggable.
const SCALE_SENTINEL: f64 = 1e9;

/// Normalize every `<shape>` in the document, in document order.
///
/// The root's `name` attribute is removed (best effort, its absence is
/// tolerated). Returns the names of the shapes that were normalized; the
/// first failing shape aborts the run.
pub fn normalize_document(
    root: &mut Element,
    config: &NormalizeConfig,
) -> Result<Vec<String>, NormalizeError> {
    root.attrs.shift_remove("name");

    let mut names = Vec::new();
    visit_shapes(root, &mut |shape| {
        let name = shape
            .attr("name")
            .unwrap_or("<unnamed>")
            .to_string();
        info!(shape = %name, "normalizing");
        normalize_shape(shape, &name, config)?;
        names.push(name);
        Ok(())
    })?;
    Ok(names)
}

fn visit_shapes(
    el: &mut Element,
    f: &mut impl FnMut(&mut Element) -> Result<(), NormalizeError>,
) -> Result<(), NormalizeError> {
    for child in &mut el.children {
        if child.tag == "shape" {
            f(child)?;
        } else {
            visit_shapes(child, f)?;
        }
    }
    Ok(())
}

/// Run the full normalization pipeline on one shape.
pub fn normalize_shape(
    shape: &mut Element,
    name: &str,
    config: &NormalizeConfig,
) -> Result<(), NormalizeError> {
    settings_pass(shape, config);
    let centered = match shape.attr("centered") {
        Some(value) => value == "1" || value.eq_ignore_ascii_case("true"),
        None => {
            warn!(shape = %name, "no centered attribute, assuming false");
            false
        }
    };

    // First measure decides the uniform scale
    let box1 = bounds::scan(shape, name)?;
    debug!(?box1, "pre-scale bounds");

    let x_scale = axis_scale(box1.width(), config.canvas_width - 2.0 * config.x_padding);
    let y_scale = axis_scale(box1.height(), config.canvas_height - config.y_padding);
    // The binding axis wins; uniform scale preserves aspect ratio
    let mut scale = x_scale.min(y_scale);
    if scale >= SCALE_SENTINEL {
        // Both axes degenerate (a point glyph): nothing to fit, only anchor
        scale = 1.0;
    }
    debug!(x_scale, y_scale, scale, "scale factors");
    transform::scale(shape, name, scale)?;

    // Centering must be computed on post-scale geometry
    let box2 = bounds::scan(shape, name)?;
    debug!(?box2, "post-scale bounds");

    // Land min_x exactly on the target left margin; the delta is signed, so
    // a glyph already past the margin moves back toward it
    let desired_left = (config.canvas_width - box2.width()) / 2.0;
    let dx = desired_left - box2.min.x;
    transform::shift(shape, name, dx, Axis::X)?;

    // Vertically: center when flagged, otherwise anchor to the canvas bottom
    let desired_top = if centered {
        (config.canvas_height - box2.height()) / 2.0
    } else {
        config.canvas_height - box2.height()
    };
    let dy = desired_top - box2.min.y;
    transform::shift(shape, name, dy, Axis::Y)?;
    debug!(dx, dy, "placement shifts");

    // Manual nudge; positive adjust_y means "up" while document y grows
    // downward, hence the negation
    if config.adjust_x != 0.0 {
        transform::shift(shape, name, config.adjust_x, Axis::X)?;
    }
    if config.adjust_y != 0.0 {
        transform::shift(shape, name, -config.adjust_y, Axis::Y)?;
    }

    shape.set_attr("w", fmt_num(config.canvas_width));
    shape.set_attr("h", fmt_num(config.canvas_height));
    Ok(())
}

/// Required scale for one axis; a zero-extent axis imposes no constraint
fn axis_scale(distance: f64, usable: f64) -> f64 {
    if distance == 0.0 {
        SCALE_SENTINEL
    } else {
        usable / distance
    }
}

/// Document-level settings applied before any geometry work. Running this
/// pass twice is harmless: every step writes a fixed value or removes what
/// a first run already removed.
fn settings_pass(shape: &mut Element, config: &NormalizeConfig) {
    if let Some(foreground) = shape.child_mut("foreground") {
        for prim in &mut foreground.children {
            match PrimitiveKind::classify(&prim.tag) {
                PrimitiveKind::Stroke if config.fill_all => {
                    prim.tag = "fillstroke".to_string();
                }
                PrimitiveKind::StrokeWidth => {
                    prim.set_attr("width", fmt_num(config.stroke_width));
                }
                _ => {}
            }
        }
        if config.strip_stroke_color {
            foreground
                .children
                .retain(|prim| PrimitiveKind::classify(&prim.tag) != PrimitiveKind::StrokeColor);
        }
    }

    if config.centered {
        shape.set_attr("centered", "1");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    fn doc(body: &str) -> Element {
        xml::parse(&format!(r#"<shapes name="set">{body}</shapes>"#)).unwrap()
    }

    fn path_shape(extra: &str) -> String {
        format!(
            r#"<shape name="g"{extra}><foreground><strokewidth width="1"/><path><move x="0" y="0"/><line x="10" y="0"/><line x="10" y="10"/><line x="0" y="10"/><close/></path><stroke/></foreground></shape>"#
        )
    }

    fn point_coords(shape: &Element) -> Vec<(f64, f64)> {
        let path = shape.child("foreground").unwrap().child("path").unwrap();
        path.children
            .iter()
            .filter(|p| p.attr("x").is_some())
            .map(|p| {
                (
                    p.attr("x").unwrap().parse().unwrap(),
                    p.attr("y").unwrap().parse().unwrap(),
                )
            })
            .collect()
    }

    fn config_48() -> NormalizeConfig {
        NormalizeConfig {
            canvas_width: 48.0,
            canvas_height: 48.0,
            x_padding: 5.0,
            y_padding: 3.0,
            ..NormalizeConfig::default()
        }
    }

    #[test]
    fn square_glyph_scales_by_binding_axis_and_bottom_anchors() {
        // x needs (48-10)/10 = 3.8, y needs (48-3)/10 = 4.5; x binds
        let mut root = doc(&path_shape(""));
        normalize_document(&mut root, &config_48()).unwrap();
        let shape = root.child("shape").unwrap();
        let pts = point_coords(shape);

        let min_x = pts.iter().map(|p| p.0).fold(f64::MAX, f64::min);
        let max_x = pts.iter().map(|p| p.0).fold(f64::MIN, f64::max);
        let min_y = pts.iter().map(|p| p.1).fold(f64::MAX, f64::min);
        let max_y = pts.iter().map(|p| p.1).fold(f64::MIN, f64::max);

        // 10 * 3.8 = 38 wide, centered: margins (48-38)/2 = 5 on both sides
        assert!((min_x - 5.0).abs() < 1e-9);
        assert!((max_x - 43.0).abs() < 1e-9);
        // bottom-anchored: touches the canvas bottom, slack above
        assert!((max_y - 48.0).abs() < 1e-9);
        assert!((min_y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn centered_flag_splits_vertical_slack() {
        let mut root = doc(&path_shape(r#" centered="1""#));
        normalize_document(&mut root, &config_48()).unwrap();
        let shape = root.child("shape").unwrap();
        let pts = point_coords(shape);
        let min_y = pts.iter().map(|p| p.1).fold(f64::MAX, f64::min);
        let max_y = pts.iter().map(|p| p.1).fold(f64::MIN, f64::max);
        // equal slack above and below
        assert!((min_y - (48.0 - max_y)).abs() < 1e-9);
    }

    #[test]
    fn config_forces_centered_attribute() {
        let mut root = doc(&path_shape(""));
        let config = NormalizeConfig {
            centered: true,
            ..config_48()
        };
        normalize_document(&mut root, &config).unwrap();
        let shape = root.child("shape").unwrap();
        assert_eq!(shape.attr("centered"), Some("1"));
    }

    #[test]
    fn manual_y_nudge_is_sign_inverted() {
        let mut plain = doc(&path_shape(""));
        normalize_document(&mut plain, &config_48()).unwrap();
        let base = point_coords(plain.child("shape").unwrap());

        let mut nudged = doc(&path_shape(""));
        let config = NormalizeConfig {
            adjust_y: 4.0,
            ..config_48()
        };
        normalize_document(&mut nudged, &config).unwrap();
        let moved = point_coords(nudged.child("shape").unwrap());

        for (b, m) in base.iter().zip(&moved) {
            assert!((m.1 - (b.1 - 4.0)).abs() < 1e-9);
            assert_eq!(b.0, m.0);
        }
    }

    #[test]
    fn aspect_ratio_is_preserved() {
        let body = r#"<shape name="g"><foreground><path><move x="0" y="0"/><line x="20" y="0"/><line x="20" y="5"/></path></foreground></shape>"#;
        let mut root = doc(body);
        normalize_document(&mut root, &config_48()).unwrap();
        let pts = point_coords(root.child("shape").unwrap());
        let min_x = pts.iter().map(|p| p.0).fold(f64::MAX, f64::min);
        let max_x = pts.iter().map(|p| p.0).fold(f64::MIN, f64::max);
        let min_y = pts.iter().map(|p| p.1).fold(f64::MAX, f64::min);
        let max_y = pts.iter().map(|p| p.1).fold(f64::MIN, f64::max);
        // started at 20:5
        assert!(((max_x - min_x) / (max_y - min_y) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn point_glyph_uses_sentinel_and_survives() {
        let body = r#"<shape name="dot"><foreground><ellipse x="5" y="5" w="0" h="0"/></foreground></shape>"#;
        let mut root = doc(body);
        normalize_document(&mut root, &config_48()).unwrap();
        let ellipse = root
            .child("shape")
            .unwrap()
            .child("foreground")
            .unwrap()
            .child("ellipse")
            .unwrap();
        let w: f64 = ellipse.attr("w").unwrap().parse().unwrap();
        assert_eq!(w, 0.0);
        let x: f64 = ellipse.attr("x").unwrap().parse().unwrap();
        assert!(x.is_finite());
    }

    #[test]
    fn settings_pass_is_idempotent() {
        let body = r##"<shape name="g"><foreground><strokewidth width="7"/><stroke/><strokecolor color="#fff"/><stroke/></foreground></shape>"##;
        let mut root = doc(body);
        let config = NormalizeConfig {
            fill_all: true,
            strip_stroke_color: true,
            stroke_width: 2.0,
            ..NormalizeConfig::default()
        };
        let shape = root.child_mut("shape").unwrap();
        settings_pass(shape, &config);
        let once = shape.clone();
        settings_pass(shape, &config);
        assert_eq!(&once, shape);

        let fg = shape.child("foreground").unwrap();
        let tags: Vec<&str> = fg.children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, ["strokewidth", "fillstroke", "fillstroke"]);
        assert_eq!(fg.children[0].attr("width"), Some("2"));
    }

    #[test]
    fn root_name_removal_is_best_effort() {
        let mut named = doc(&path_shape(""));
        normalize_document(&mut named, &config_48()).unwrap();
        assert_eq!(named.attr("name"), None);

        let mut unnamed = xml::parse(&format!("<shapes>{}</shapes>", path_shape(""))).unwrap();
        assert!(normalize_document(&mut unnamed, &config_48()).is_ok());
    }

    #[test]
    fn shape_dimensions_are_stamped() {
        let mut root = doc(&path_shape(""));
        let names = normalize_document(&mut root, &config_48()).unwrap();
        assert_eq!(names, ["g"]);
        let shape = root.child("shape").unwrap();
        assert_eq!(shape.attr("w"), Some("48"));
        assert_eq!(shape.attr("h"), Some("48"));
    }
}
