//! Eight-way swipe directions and the normalized grid they live on.
//!
//! Every direction owns a fixed point on the `{-1, 0, 1} x {-1, 0, 1}` grid
//! (the center is not a direction). The grid's bounding rectangle runs from
//! `(-1, -1)` to `(1, 1)` and its four edges are the lines the drag classifier
//! measures completion against.

use crate::geom::{Line, Point};

/// A compass direction a card can be swiped towards.
///
/// The vertical axis grows downwards, so [`Direction::Top`] sits at `y = -1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// North.
    Top,
    /// North-east.
    TopRight,
    /// East.
    Right,
    /// South-east.
    BottomRight,
    /// South.
    Bottom,
    /// South-west.
    BottomLeft,
    /// West.
    Left,
    /// North-west.
    TopLeft,
}

impl Direction {
    /// All directions in classification order. Ties resolve to the earliest.
    pub const ALL: [Direction; 8] = [
        Direction::Top,
        Direction::TopRight,
        Direction::Right,
        Direction::BottomRight,
        Direction::Bottom,
        Direction::BottomLeft,
        Direction::Left,
        Direction::TopLeft,
    ];

    /// Horizontal grid component: `-1`, `0` or `1`.
    pub fn horizontal(self) -> f64 {
        match self {
            Direction::Left | Direction::TopLeft | Direction::BottomLeft => -1.0,
            Direction::Top | Direction::Bottom => 0.0,
            Direction::Right | Direction::TopRight | Direction::BottomRight => 1.0,
        }
    }

    /// Vertical grid component: `-1`, `0` or `1`.
    pub fn vertical(self) -> f64 {
        match self {
            Direction::Top | Direction::TopLeft | Direction::TopRight => -1.0,
            Direction::Left | Direction::Right => 0.0,
            Direction::Bottom | Direction::BottomLeft | Direction::BottomRight => 1.0,
        }
    }

    /// The direction's point on the normalized grid.
    pub fn point(self) -> Point {
        Point::new(self.horizontal(), self.vertical())
    }

    /// Screen-size multipliers for the off-screen exit offset.
    ///
    /// The exit offset is `multiplier * screen_size` component-wise. Diagonals
    /// travel less vertically than the pure vertical exits so they leave
    /// through the nearest side edge.
    pub fn exit_multiplier(self) -> Point {
        match self {
            Direction::Top => Point::new(0.0, -1.5),
            Direction::TopRight => Point::new(1.5, -1.25),
            Direction::Right => Point::new(1.5, 0.0),
            Direction::BottomRight => Point::new(1.5, 1.25),
            Direction::Bottom => Point::new(0.0, 1.5),
            Direction::BottomLeft => Point::new(-1.5, 1.25),
            Direction::Left => Point::new(-1.5, 0.0),
            Direction::TopLeft => Point::new(-1.5, -1.25),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_are_pairwise_distinct() {
        for (i, a) in Direction::ALL.iter().enumerate() {
            for b in &Direction::ALL[i + 1..] {
                assert_ne!(a.point(), b.point(), "{a:?} and {b:?} collide");
            }
        }
    }

    #[test]
    fn exit_multipliers_are_distinct_and_outward() {
        for (i, a) in Direction::ALL.iter().enumerate() {
            let m = a.exit_multiplier();
            assert!(m.scalar_product(a.point()) > 0.0, "{a:?} exits inwards");
            for b in &Direction::ALL[i + 1..] {
                assert_ne!(m, b.exit_multiplier());
            }
        }
    }

    #[test]
    fn bounding_box_is_unit_square() {
        let rect = grid_rect();
        assert_eq!(rect.min, Point::new(-1.0, -1.0));
        assert_eq!(rect.max, Point::new(1.0, 1.0));
        assert_eq!(rect.width(), 2.0);
        assert_eq!(rect.height(), 2.0);

        let min_x = Direction::ALL.iter().map(|d| d.point().x).fold(f64::INFINITY, f64::min);
        let max_y = Direction::ALL.iter().map(|d| d.point().y).fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(min_x, rect.min.x);
        assert_eq!(max_y, rect.max.y);
    }

    #[test]
    fn perimeter_edges_connect_corners() {
        let [top, left, bottom, right] = grid_rect().perimeter();
        assert_eq!(top, Line::new(Point::new(-1.0, -1.0), Point::new(1.0, -1.0)));
        assert_eq!(left, Line::new(Point::new(-1.0, -1.0), Point::new(-1.0, 1.0)));
        assert_eq!(bottom, Line::new(Point::new(-1.0, 1.0), Point::new(1.0, 1.0)));
        assert_eq!(right, Line::new(Point::new(1.0, -1.0), Point::new(1.0, 1.0)));
    }
}
