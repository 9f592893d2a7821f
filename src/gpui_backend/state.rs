use std::time::Instant;

use gpui::{Bounds, Pixels};

use crate::geom::Point;

use super::animator::FrameAnimator;
use super::geometry::{distance_sq, to_point};

/// A press on the front card, promoted to a swipe once it travels far enough.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DragState {
    pub(crate) start: Point,
    pub(crate) last: Point,
    /// Press point in stack-local coordinates.
    pub(crate) local: Point,
    pub(crate) active: bool,
}

impl DragState {
    pub(crate) fn new(start: Point, local: Point) -> Self {
        Self {
            start,
            last: start,
            local,
            active: false,
        }
    }

    /// Track the pointer at `pos`. Returns `true` on the move that first
    /// exceeds `threshold_px`.
    pub(crate) fn moved_to(&mut self, pos: Point, threshold_px: f64) -> bool {
        self.last = pos;
        if self.active || distance_sq(self.start, pos) <= threshold_px * threshold_px {
            return false;
        }
        self.active = true;
        true
    }

    pub(crate) fn translation(&self) -> Point {
        self.last - self.start
    }
}

#[derive(Debug)]
pub(crate) struct StackUiState {
    pub(crate) bounds: Option<Bounds<Pixels>>,
    pub(crate) drag: Option<DragState>,
    pub(crate) animator: FrameAnimator,
    pub(crate) placeholder_since: Option<Instant>,
}

impl StackUiState {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            bounds: None,
            drag: None,
            animator: FrameAnimator::new(now),
            placeholder_since: None,
        }
    }

    /// Map a window position into stack-local coordinates.
    pub(crate) fn local(&self, window_pos: Point) -> Option<Point> {
        let bounds = self.bounds?;
        let origin = to_point(bounds.origin);
        Some(window_pos - origin)
    }
}
