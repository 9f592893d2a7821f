//! gpui_swipecards is a swipeable card stack widget.
//! The gesture core is headless; the optional GPUI backend renders it.

#![forbid(unsafe_code)]

pub mod animation;
pub mod card;
pub mod classify;
pub mod config;
pub mod direction;
pub mod error;
pub mod geom;
pub mod stack;
pub mod transform;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

#[cfg(test)]
mod testing;

pub use animation::{AnimationCurve, AnimationTicket, Animator, TransformAnimation};
pub use card::{CardDelegate, CardId, CardState, SwipeCard, exit_offset};
pub use classify::{ClassifiedDrag, classify, drag_direction, drag_percentage};
pub use config::{SpringParams, StackConfig, SwipeConfig, ThresholdPolicy};
pub use direction::{Direction, GridRect, grid_rect};
pub use error::SwipeError;
pub use geom::{Line, Point, Rect, Size};
pub use stack::{
    CardProvider, CardStack, DeckCursor, Placeholder, StackEntry, StackObserver, stacked_frame,
};
pub use transform::CardTransform;

#[cfg(feature = "gpui")]
pub use gpui_backend::{CardStackEvent, CardStackViewConfig, GpuiCardStackView, StackHandle};
