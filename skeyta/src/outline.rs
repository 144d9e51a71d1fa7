//! SVG path data to quadratic glyph outline.

use kurbo::{Affine, BezPath, CubicBez, PathEl, Point};
use write_fonts::tables::glyf::{Bbox, Glyph, SimpleGlyph};

use crate::RequestError;

/// Cubic-to-quadratic conversion tolerance, as a fraction of the em.
const CONVERSION_ERROR: f64 = 0.001;

/// Parse the path data in `svg_text` under `transform` and build a
/// glyph outline.
///
/// Returns the glyph, its bounding box and the number of outline
/// points. A document without path data produces an empty glyph (with
/// no bounding box), which callers still insert into the font.
pub(crate) fn import(
    svg_text: &str,
    transform: Affine,
    units_per_em: u16,
) -> Result<(Glyph, Option<Bbox>, usize), RequestError> {
    let mut path = BezPath::new();
    for data in crate::svg::path_data(svg_text)? {
        let parsed =
            BezPath::from_svg(&data).map_err(|e| RequestError::PathData(e.to_string()))?;
        for el in parsed.elements() {
            path.push(*el);
        }
    }
    if path.elements().is_empty() {
        return Ok((Glyph::Empty, None, 0));
    }
    path.apply_affine(transform);

    let accuracy = units_per_em as f64 * CONVERSION_ERROR;
    let quads = cubics_to_quads(&path, accuracy)?;
    let glyph =
        SimpleGlyph::from_bezpath(&quads).map_err(|e| RequestError::Outline(format!("{e:?}")))?;
    let num_points = glyph.contours.iter().map(|c| c.len()).sum();
    let bbox = glyph.bbox;
    Ok((Glyph::Simple(glyph), Some(bbox), num_points))
}

/// Replace every cubic segment with a quadratic spline approximation.
///
/// 'glyf' outlines hold only lines and quadratics; this is the same
/// conversion the fontc compiler stack applies when building glyphs
/// from design sources.
fn cubics_to_quads(path: &BezPath, accuracy: f64) -> Result<BezPath, RequestError> {
    let mut out = BezPath::new();
    let mut start = Point::ZERO;
    let mut current = Point::ZERO;
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                out.move_to(p);
                start = p;
                current = p;
            }
            PathEl::LineTo(p) => {
                out.line_to(p);
                current = p;
            }
            PathEl::QuadTo(p1, p2) => {
                out.quad_to(p1, p2);
                current = p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let cubic = CubicBez::new(current, p1, p2, p3);
                let spline = cubic.approx_spline(accuracy).ok_or_else(|| {
                    RequestError::Outline(
                        "cubic segment has no quadratic approximation".to_owned(),
                    )
                })?;
                for quad in spline.to_quads() {
                    out.quad_to(quad.p1, quad.p2);
                }
                current = p3;
            }
            PathEl::ClosePath => {
                out.close_path();
                current = start;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str =
        r#"<svg viewBox="0 0 10 10"><path d="M1 1 L9 1 L9 9 L1 9 Z"/></svg>"#;

    #[test]
    fn square_becomes_one_contour() {
        let (glyph, bbox, num_points) = import(SQUARE, Affine::IDENTITY, 1000).unwrap();
        let Glyph::Simple(glyph) = glyph else {
            panic!("expected a simple glyph");
        };
        assert_eq!(glyph.contours.len(), 1);
        assert_eq!(num_points, 4);
        assert_eq!(
            bbox,
            Some(Bbox {
                x_min: 1,
                y_min: 1,
                x_max: 9,
                y_max: 9
            })
        );
    }

    #[test]
    fn transform_is_applied_before_rounding() {
        let transform = Affine::new([10.0, 0.0, 0.0, -10.0, 0.0, 100.0]);
        let (_, bbox, _) = import(SQUARE, transform, 1000).unwrap();
        assert_eq!(
            bbox,
            Some(Bbox {
                x_min: 10,
                y_min: 10,
                x_max: 90,
                y_max: 90
            })
        );
    }

    #[test]
    fn cubics_are_converted_to_quads() {
        let path = BezPath::from_svg("M0 0 C 30 100, 70 100, 100 0 Z").unwrap();
        let quads = cubics_to_quads(&path, 1.0).unwrap();
        assert!(quads
            .elements()
            .iter()
            .all(|el| !matches!(el, PathEl::CurveTo(..))));
        assert!(quads
            .elements()
            .iter()
            .any(|el| matches!(el, PathEl::QuadTo(..))));
    }

    #[test]
    fn cubic_artwork_produces_a_glyph() {
        let svg = r#"<svg viewBox="0 0 100 100">
            <path d="M0 50 C 0 0, 100 0, 100 50 C 100 100, 0 100, 0 50 Z"/>
        </svg>"#;
        let (glyph, bbox, num_points) = import(svg, Affine::IDENTITY, 1000).unwrap();
        assert!(matches!(glyph, Glyph::Simple(_)));
        assert!(num_points > 4);
        // control points of the quad approximation may poke slightly
        // past the cubic's extremes
        let bbox = bbox.unwrap();
        assert!(bbox.x_min.abs() <= 2, "{bbox:?}");
        assert!((bbox.x_max - 100).abs() <= 2, "{bbox:?}");
    }

    #[test]
    fn no_path_data_yields_empty_glyph() {
        let (glyph, bbox, num_points) =
            import("<svg viewBox=\"0 0 10 10\"/>", Affine::IDENTITY, 1000).unwrap();
        assert!(matches!(glyph, Glyph::Empty));
        assert_eq!(bbox, None);
        assert_eq!(num_points, 0);
    }

    #[test]
    fn malformed_path_data_is_an_error() {
        let svg = r#"<svg><path d="M 1 bogus"/></svg>"#;
        assert!(import(svg, Affine::IDENTITY, 1000).is_err());
    }

    #[test]
    fn multiple_path_elements_merge_into_one_glyph() {
        let svg = r#"<svg viewBox="0 0 10 10">
            <path d="M0 0 L4 0 L4 4 L0 4 Z"/>
            <path d="M6 6 L9 6 L9 9 L6 9 Z"/>
        </svg>"#;
        let (glyph, _, _) = import(svg, Affine::IDENTITY, 1000).unwrap();
        let Glyph::Simple(glyph) = glyph else {
            panic!("expected a simple glyph");
        };
        assert_eq!(glyph.contours.len(), 2);
    }
}
