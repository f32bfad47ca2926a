//! UFO outline conversion utilities
//!
//! Converts norad contours and components into kurbo paths, so bounds and
//! beam intersections can be computed on the same geometry for contours and
//! for components. Also holds the in-place horizontal shift used when a
//! UFO glyph's left margin is changed.

use kurbo::{Affine, BezPath, Point};
use norad::{Contour, ContourPoint, Glyph, Layer, PointType};

/// Components nested deeper than this are ignored (guards against cycles)
pub const MAX_COMPONENT_DEPTH: usize = 32;

/// Convert a norad affine transform to kurbo
pub fn to_kurbo_affine(transform: &norad::AffineTransform) -> Affine {
    Affine::new([
        transform.x_scale,
        transform.xy_scale,
        transform.yx_scale,
        transform.y_scale,
        transform.x_offset,
        transform.y_offset,
    ])
}

/// Convert a UFO contour to a path.
///
/// Closed contours are rotated to start on their first on-curve point so
/// that trailing off-curve points become the closing segment. Contours with
/// no on-curve point produce `None`.
pub fn contour_to_bezpath(contour: &Contour) -> Option<BezPath> {
    let points = &contour.points;
    let start = points
        .iter()
        .position(|p| !matches!(p.typ, PointType::OffCurve))?;
    let first = &points[start];
    let is_open = matches!(first.typ, PointType::Move);

    let mut path = BezPath::new();
    let mut pending_offcurves: Vec<Point> = Vec::new();
    path.move_to(to_point(first));

    let rest = points[start + 1..].iter().chain(points[..start].iter());
    for point in rest {
        match &point.typ {
            PointType::OffCurve => pending_offcurves.push(to_point(point)),
            typ => push_segment(&mut path, &mut pending_offcurves, typ, to_point(point)),
        }
    }

    if !is_open {
        // The first point's type defines how to reach it from the last point
        push_segment(&mut path, &mut pending_offcurves, &first.typ, to_point(first));
        path.close_path();
    }
    Some(path)
}

fn to_point(point: &ContourPoint) -> Point {
    Point::new(point.x, point.y)
}

fn push_segment(path: &mut BezPath, pending: &mut Vec<Point>, typ: &PointType, pt: Point) {
    match typ {
        PointType::Curve if pending.len() >= 2 => {
            let cp1 = pending[pending.len() - 2];
            let cp2 = pending[pending.len() - 1];
            path.curve_to(cp1, cp2, pt);
        }
        PointType::Curve if pending.len() == 1 => path.quad_to(pending[0], pt),
        PointType::QCurve if !pending.is_empty() => {
            // Implied on-curve points sit halfway between consecutive off-curves
            for (i, &cp) in pending.iter().enumerate() {
                let end = match pending.get(i + 1) {
                    Some(&next) => cp.midpoint(next),
                    None => pt,
                };
                path.quad_to(cp, end);
            }
        }
        _ => path.line_to(pt),
    }
    pending.clear();
}

/// All contours of a glyph as paths, with components decomposed.
///
/// Component bases are looked up in `layer` first, then in `fallback`
/// (usually the default layer).
pub fn glyph_outline(glyph: &Glyph, layer: &Layer, fallback: Option<&Layer>) -> Vec<BezPath> {
    let mut paths = Vec::new();
    collect_outline(glyph, layer, fallback, Affine::IDENTITY, 0, &mut paths);
    paths
}

fn collect_outline(
    glyph: &Glyph,
    layer: &Layer,
    fallback: Option<&Layer>,
    transform: Affine,
    depth: usize,
    paths: &mut Vec<BezPath>,
) {
    for contour in &glyph.contours {
        if let Some(mut path) = contour_to_bezpath(contour) {
            path.apply_affine(transform);
            paths.push(path);
        }
    }

    if depth >= MAX_COMPONENT_DEPTH {
        tracing::warn!(
            "Component nesting in '{}' exceeds {} levels; ignoring deeper components",
            glyph.name(),
            MAX_COMPONENT_DEPTH
        );
        return;
    }

    for component in &glyph.components {
        let base_name = component.base.as_str();
        let base = layer
            .get_glyph(base_name)
            .or_else(|| fallback.and_then(|f| f.get_glyph(base_name)));
        match base {
            Some(base) => {
                let nested = transform * to_kurbo_affine(&component.transform);
                collect_outline(base, layer, fallback, nested, depth + 1, paths);
            }
            None => tracing::debug!(
                "Component base '{}' of '{}' not found",
                base_name,
                glyph.name()
            ),
        }
    }
}

/// Move a glyph's contours, components and anchors horizontally by `dx`
pub fn translate_glyph(glyph: &mut Glyph, dx: f64) {
    for contour in glyph.contours.iter_mut() {
        for point in contour.points.iter_mut() {
            point.x += dx;
        }
    }
    for component in glyph.components.iter_mut() {
        component.transform.x_offset += dx;
    }
    for anchor in glyph.anchors.iter_mut() {
        anchor.x += dx;
    }
}
