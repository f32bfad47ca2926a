//! Outline bounds and horizontal shifts

use kurbo::{Affine, BezPath, Rect, Shape};

/// Union of the bounding boxes of all non-empty paths, or `None` for an
/// empty outline
pub fn outline_bounds(paths: &[BezPath]) -> Option<Rect> {
    paths
        .iter()
        .filter(|path| path.segments().next().is_some())
        .map(|path| path.bounding_box())
        .reduce(|acc, rect| acc.union(rect))
}

/// Move every path horizontally by `dx`
pub fn translate_outline(paths: &mut [BezPath], dx: f64) {
    let shift = Affine::translate((dx, 0.0));
    for path in paths.iter_mut() {
        path.apply_affine(shift);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_outline_has_no_bounds() {
        assert_eq!(outline_bounds(&[]), None);
        assert_eq!(outline_bounds(&[BezPath::new()]), None);
    }

    #[test]
    fn test_bounds_union() {
        let a = Rect::new(10.0, 0.0, 50.0, 100.0).to_path(0.1);
        let b = Rect::new(80.0, -20.0, 120.0, 40.0).to_path(0.1);
        let bounds = outline_bounds(&[a, b]).unwrap();
        assert_eq!(bounds, Rect::new(10.0, -20.0, 120.0, 100.0));
    }

    #[test]
    fn test_translate_outline() {
        let mut paths = vec![Rect::new(10.0, 0.0, 50.0, 100.0).to_path(0.1)];
        translate_outline(&mut paths, 25.0);
        assert_eq!(
            outline_bounds(&paths),
            Some(Rect::new(35.0, 0.0, 75.0, 100.0))
        );
    }
}
