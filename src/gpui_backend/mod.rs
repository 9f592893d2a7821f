//! GPUI integration for gpui_swipecards.
//!
//! This module provides a GPUI view that hosts a [`CardStack`](crate::stack::CardStack)
//! of [`AnyView`](gpui::AnyView) cards, turns mouse drags into swipes, and
//! drives the stack's animations from the frame clock.
//!
//! Cards are translated but not rotated, as GPUI elements carry no rotation.

mod animator;
mod config;
mod event;
mod geometry;
mod state;
mod view;

pub use config::CardStackViewConfig;
pub use event::CardStackEvent;
pub use view::{GpuiCardStackView, StackHandle};
