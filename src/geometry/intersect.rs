//! Line and outline intersection
//!
//! Used by the beam measurement: a horizontal probe line is crossed with
//! every contour of a glyph and the X positions of the hits are collected.

use kurbo::{
    BezPath, CubicBez, Line, ParamCurve, ParamCurveExtrema, PathEl, PathSeg, Point, QuadBez,
};

/// Hits closer than this on the same contour are the same crossing
/// (a line through a segment joint is found by both segments).
const JOIN_TOLERANCE: f64 = 1e-6;

/// Build a horizontal probe line at `y` spanning `x0..x1`
pub fn horizontal_line(y: f64, x0: f64, x1: f64) -> Line {
    Line::new(Point::new(x0, y), Point::new(x1, y))
}

/// Find all points where `line` crosses `path`.
///
/// Every subpath is treated as its own contour, including the implicit
/// closing segment back to the subpath start. Hits are returned sorted by
/// X within each contour, contours in path order.
pub fn path_line_crossings(path: &BezPath, line: &Line) -> Vec<Point> {
    let mut crossings = Vec::new();
    let mut contour_hits = Vec::new();
    let mut subpath_start = Point::ZERO;
    let mut current = Point::ZERO;

    for element in path.elements() {
        let segment = match *element {
            PathEl::MoveTo(pt) => {
                flush_contour(&mut contour_hits, &mut crossings);
                subpath_start = pt;
                current = pt;
                continue;
            }
            PathEl::LineTo(end) => PathSeg::Line(Line::new(current, end)),
            PathEl::QuadTo(c, end) => PathSeg::Quad(QuadBez::new(current, c, end)),
            PathEl::CurveTo(c1, c2, end) => PathSeg::Cubic(CubicBez::new(current, c1, c2, end)),
            PathEl::ClosePath => {
                if current == subpath_start {
                    continue;
                }
                PathSeg::Line(Line::new(current, subpath_start))
            }
        };

        push_segment_hits(segment, line, &mut contour_hits);
        current = segment.eval(1.0);
    }
    flush_contour(&mut contour_hits, &mut crossings);

    crossings
}

/// X coordinates of every crossing between `line` and `paths`, sorted ascending
pub fn x_crossings(paths: &[BezPath], line: &Line) -> Vec<f64> {
    let mut xs: Vec<f64> = paths
        .iter()
        .flat_map(|path| path_line_crossings(path, line))
        .map(|point| point.x)
        .collect();
    xs.sort_by(f64::total_cmp);
    xs
}

fn flush_contour(contour_hits: &mut Vec<Point>, crossings: &mut Vec<Point>) {
    contour_hits.sort_by(|a, b| a.x.total_cmp(&b.x));
    contour_hits.dedup_by(|a, b| a.distance(*b) < JOIN_TOLERANCE);
    crossings.append(contour_hits);
}

/// Intersect one segment with the probe, piece by piece between its
/// extrema. A cubic spanning a y-extremum can otherwise lose one of its two
/// roots near the turning point.
fn push_segment_hits(segment: PathSeg, line: &Line, hits: &mut Vec<Point>) {
    for range in segment.extrema_ranges() {
        let piece = segment.subsegment(range);
        for intersection in piece.intersect_line(*line) {
            hits.push(piece.eval(intersection.segment_t));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Shape};

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
        Rect::new(x0, y0, x1, y1).to_path(0.1)
    }

    #[test]
    fn test_line_crosses_square_twice() {
        let path = square(50.0, 0.0, 450.0, 500.0);
        let line = horizontal_line(300.0, -1000.0, 1500.0);
        let xs = x_crossings(&[path], &line);
        assert_eq!(xs.len(), 2);
        assert!((xs[0] - 50.0).abs() < 1e-9);
        assert!((xs[1] - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_line_above_outline_misses() {
        let path = square(50.0, 0.0, 450.0, 500.0);
        let line = horizontal_line(800.0, -1000.0, 1500.0);
        assert!(x_crossings(&[path], &line).is_empty());
    }

    #[test]
    fn test_short_probe_only_counts_hits_on_segment() {
        let path = square(50.0, 0.0, 450.0, 500.0);
        // Probe ends before the right edge
        let line = horizontal_line(250.0, 0.0, 200.0);
        let xs = x_crossings(&[path], &line);
        assert_eq!(xs, vec![50.0]);
    }

    #[test]
    fn test_joint_hit_is_counted_once() {
        // Diamond with its left and right vertices exactly on the probe
        let mut path = BezPath::new();
        path.move_to((0.0, 100.0));
        path.line_to((100.0, 0.0));
        path.line_to((200.0, 100.0));
        path.line_to((100.0, 200.0));
        path.close_path();

        let line = horizontal_line(100.0, -1000.0, 1200.0);
        let xs = x_crossings(&[path], &line);
        assert_eq!(xs.len(), 2);
        assert!((xs[0] - 0.0).abs() < 1e-9);
        assert!((xs[1] - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_curved_contour() {
        let circle = kurbo::Circle::new((250.0, 250.0), 200.0).to_path(0.01);
        let line = horizontal_line(250.0, -1000.0, 1500.0);
        let xs = x_crossings(&[circle], &line);
        assert_eq!(xs.len(), 2);
        assert!((xs[0] - 50.0).abs() < 0.5);
        assert!((xs[1] - 450.0).abs() < 0.5);
    }

    #[test]
    fn test_curve_near_its_bottom_keeps_both_crossings() {
        let circle = kurbo::Circle::new((250.0, 250.0), 200.0).to_path(0.01);
        for beam in [75.572, 76.5, 78.0, 79.354, 50.05, 421.0, 449.98] {
            let line = horizontal_line(beam, -1000.0, 1500.0);
            let xs = x_crossings(std::slice::from_ref(&circle), &line);
            assert_eq!(xs.len(), 2, "crossings at y={beam}: {xs:?}");
            // Symmetric around the centre
            assert!((xs[0] + xs[1] - 500.0).abs() < 0.5, "crossings at y={beam}: {xs:?}");
        }
    }

    #[test]
    fn test_multiple_contours_are_merged_and_sorted() {
        let outer = square(300.0, 0.0, 400.0, 500.0);
        let inner = square(50.0, 0.0, 150.0, 500.0);
        let line = horizontal_line(100.0, -1000.0, 1500.0);
        let xs = x_crossings(&[outer, inner], &line);
        assert_eq!(xs.len(), 4);
        assert!(xs.windows(2).all(|w| w[0] <= w[1]));
        assert!((xs[0] - 50.0).abs() < 1e-9);
        assert!((xs[3] - 400.0).abs() < 1e-9);
    }
}
