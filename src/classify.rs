//! Drag classification: direction and completion percentage.
//!
//! A raw pixel translation is first normalized into the `[-1, 1]` grid. The
//! nearest direction point wins. The drag is then projected onto that
//! direction's axis and compared against the distance from the grid center to
//! the perimeter along the same line, so a mostly horizontal drag is measured
//! against the side edge and a diagonal one against the corner.

use crate::direction::{Direction, grid_rect};
use crate::error::SwipeError;
use crate::geom::{Line, Point, Size};

/// The result of classifying one drag sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedDrag {
    /// Nearest swipe direction, `None` for degenerate input.
    pub direction: Option<Direction>,
    /// Completion towards the grid edge, in `[0, 1]`.
    pub percent: f64,
}

impl ClassifiedDrag {
    /// A drag that has made no progress.
    pub const NONE: ClassifiedDrag = ClassifiedDrag {
        direction: None,
        percent: 0.0,
    };
}

/// Classify a translation inside a view of `size`.
///
/// Pure function of its inputs. Degenerate drags classify as
/// [`ClassifiedDrag::NONE`].
pub fn classify(translation: Point, size: Size) -> ClassifiedDrag {
    match drag_direction(translation, size) {
        Ok(direction) => {
            let percent = drag_percentage(translation, size, direction);
            log::trace!("classified drag {translation:?} as {direction:?} at {percent:.3}");
            ClassifiedDrag {
                direction: Some(direction),
                percent,
            }
        }
        Err(err) => {
            log::trace!("unclassifiable drag {translation:?} in {size:?}: {err}");
            ClassifiedDrag::NONE
        }
    }
}

/// Nearest direction to the normalized drag point.
///
/// Ties resolve to the first direction in [`Direction::ALL`] order.
pub fn drag_direction(translation: Point, size: Size) -> Result<Direction, SwipeError> {
    let normalized = translation.normalize(size);

    let mut closest = None;
    let mut best = f64::INFINITY;
    for direction in Direction::ALL {
        let distance = direction.point().distance_to(normalized);
        if distance < best {
            best = distance;
            closest = Some(direction);
        }
    }

    closest.ok_or(SwipeError::NoDirection)
}

/// Completion of the drag along `direction`'s axis, clamped to `[0, 1]`.
///
/// Returns `0` when the projected drag sits on the center, since no line
/// through the center can be built from it.
pub fn drag_percentage(translation: Point, size: Size, direction: Direction) -> f64 {
    let normalized = translation.normalize(size);
    let swipe_point = normalized.scalar_projection(direction.point());
    let center_distance = swipe_point.distance_to(Point::ZERO);
    let target = Line::new(swipe_point, Point::ZERO);

    let percent = grid_rect()
        .perimeter()
        .into_iter()
        .filter_map(|edge| target.intersection(edge))
        .map(|hit| center_distance / hit.distance_to(Point::ZERO))
        .filter(|ratio| ratio.is_finite())
        .fold(None, |min: Option<f64>, ratio| {
            Some(min.map_or(ratio, |min| min.min(ratio)))
        })
        .unwrap_or(0.0);

    percent.clamp(0.0, 1.0)
}
