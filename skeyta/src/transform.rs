//! Sizing and placement of SVG artwork in the em square.
//!
//! The declared viewBox is the only proxy available for the artwork's
//! true bounding box, so every heuristic keys off it. Artwork without a
//! viewBox is assumed to be authored on a nominal 1000x1000 canvas.

use kurbo::Affine;

use crate::svg::ViewBox;

/// Fraction of the em square the artwork is scaled to fill, leaving a
/// visual margin.
const MARGIN_FACTOR: f64 = 0.7;

/// Vertical reference line the artwork is centered on, as a fraction of
/// the em square. Approximates the optical axis of surrounding math
/// symbols; not the font's x-height.
const MATH_AXIS: f64 = 0.3;

/// Fixed vertical placement, as a fraction of the em, for artwork
/// without a viewBox.
const FALLBACK_Y: f64 = 0.45;

/// Assumed canvas size for artwork without a viewBox.
const FALLBACK_CANVAS: f64 = 1000.0;

/// Assumed artwork width, used for centering, without a viewBox.
const FALLBACK_WIDTH: f64 = 700.0;

/// Compute the transform taking SVG user space to font design space.
///
/// The artwork is scaled uniformly (aspect ratio preserved) to 70% of
/// the em square, flipped to the font's Y-up orientation, centered
/// horizontally within the advance width and vertically on the math
/// axis. An `advance_width` of zero centers within a full em; this is
/// independent of the default advance stored in 'hmtx' for such
/// requests.
///
/// Without a viewBox the horizontal shift is a fixed centering of an
/// assumed 700-unit artwork, left in SVG units and ignoring `x_offset`.
/// That asymmetry with the viewBox branch is long-standing, documented
/// behavior.
pub fn design_transform(
    view_box: Option<ViewBox>,
    units_per_em: u16,
    advance_width: u16,
    x_offset: f64,
) -> Affine {
    let upem = units_per_em as f64;
    match view_box {
        Some(vb) => {
            let scale = (upem / vb.width).min(upem / vb.height) * MARGIN_FACTOR;
            let advance = if advance_width == 0 {
                upem
            } else {
                advance_width as f64
            };
            let tx = ((advance - vb.width) / 2.0 - vb.min_x + x_offset) * scale;
            let math_axis = upem * MATH_AXIS;
            let center_y = vb.min_y + vb.height / 2.0;
            // Y flips in design space, so the scale applied below is -scale
            let ty = math_axis - center_y * (-scale);
            Affine::new([scale, 0.0, 0.0, -scale, tx, ty])
        }
        None => {
            let scale = MARGIN_FACTOR * upem / FALLBACK_CANVAS;
            let tx = (advance_width as f64 - FALLBACK_WIDTH) / 2.0;
            let ty = upem * FALLBACK_Y;
            Affine::new([scale, 0.0, 0.0, -scale, tx, ty])
        }
    }
}
