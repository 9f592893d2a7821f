use gpui::{Pixels, Point as GpuiPoint, Size as GpuiSize};

use crate::geom::{Point, Rect, Size};

pub(crate) fn to_point(point: GpuiPoint<Pixels>) -> Point {
    Point::new(f32::from(point.x) as f64, f32::from(point.y) as f64)
}

pub(crate) fn to_size(size: GpuiSize<Pixels>) -> Size {
    Size::new(f32::from(size.width) as f64, f32::from(size.height) as f64)
}

pub(crate) fn distance_sq(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

pub(crate) fn rect_contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.origin.x
        && point.x <= rect.origin.x + rect.size.width
        && point.y >= rect.origin.y
        && point.y <= rect.origin.y + rect.size.height
}

#[cfg(test)]
mod tests {
    use gpui::{point, px, size};

    use super::*;

    #[test]
    fn converts_pixels() {
        assert_eq!(to_point(point(px(12.0), px(-3.5))), Point::new(12.0, -3.5));
        assert_eq!(to_size(size(px(300.0), px(600.0))), Size::new(300.0, 600.0));
    }

    #[test]
    fn contains_edges() {
        let rect = Rect::new(Point::new(6.0, 6.0), Size::new(288.0, 600.0));
        assert!(rect_contains(rect, Point::new(6.0, 606.0)));
        assert!(!rect_contains(rect, Point::new(5.9, 10.0)));
        assert!(!rect_contains(rect, Point::new(100.0, 606.5)));
    }

    #[test]
    fn squared_distance() {
        assert_eq!(distance_sq(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 25.0);
    }
}
