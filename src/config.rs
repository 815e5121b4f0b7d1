//! Normalization settings.
//!
//! One immutable value passed into the pipeline; there is no process-wide
//! configuration state.

/// Default canvas size and margins (stencil units)
pub mod defaults {
    /// Canvas width and height every glyph is normalized onto
    pub const CANVAS_WIDTH: f64 = 52.0;
    pub const CANVAS_HEIGHT: f64 = 52.0;
    /// Minimum horizontal margin, applied on both sides
    pub const X_PADDING: f64 = 5.0;
    /// Minimum vertical margin, applied once (bottom anchoring reserves none)
    pub const Y_PADDING: f64 = 2.0;
    /// Stroke width written onto every strokewidth primitive
    pub const STROKE_WIDTH: f64 = 2.0;
}

/// Settings for one normalization run
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeConfig {
    /// Target canvas width; every shape's `w` attribute ends up at this value
    pub canvas_width: f64,
    /// Target canvas height; every shape's `h` attribute ends up at this value
    pub canvas_height: f64,
    /// Minimum margin on each horizontal side
    pub x_padding: f64,
    /// Minimum margin above the glyph (applied once, see scale computation)
    pub y_padding: f64,
    /// Stroke width forced onto every strokewidth primitive
    pub stroke_width: f64,
    /// Rewrite every `stroke` primitive to `fillstroke` before normalizing
    pub fill_all: bool,
    /// Force the per-shape `centered` attribute true (vertical centering)
    pub centered: bool,
    /// Remove `strokecolor` primitives from every shape
    pub strip_stroke_color: bool,
    /// Post-centering horizontal nudge
    pub adjust_x: f64,
    /// Post-centering vertical nudge; positive moves the glyph up, so the
    /// applied shift is the negation (document y grows downward)
    pub adjust_y: f64,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            canvas_width: defaults::CANVAS_WIDTH,
            canvas_height: defaults::CANVAS_HEIGHT,
            x_padding: defaults::X_PADDING,
            y_padding: defaults::Y_PADDING,
            stroke_width: defaults::STROKE_WIDTH,
            fill_all: false,
            centered: false,
            strip_stroke_color: false,
            adjust_x: 0.0,
            adjust_y: 0.0,
        }
    }
}
