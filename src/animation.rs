//! The animation contract the gesture core relies on.
//!
//! The core never plays animations itself. It asks an [`Animator`] to apply or
//! tween transforms and frames, and waits for the animator to report each
//! finished [`TransformAnimation`] back through its [`AnimationTicket`].

use std::time::Duration;

use crate::card::CardId;
use crate::config::SpringParams;
use crate::geom::{Point, Rect};
use crate::transform::CardTransform;

/// Identifies one requested transform animation.
///
/// Tickets increase per card. A completion carrying an outdated ticket belongs
/// to an animation that was cancelled and must be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AnimationTicket(pub u64);

impl AnimationTicket {
    /// The ticket following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Timing curve of a transform animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationCurve {
    /// Constant speed.
    Linear,
    /// Damped spring settling on the target.
    Spring(SpringParams),
}

/// A request to tween a card transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformAnimation {
    /// Ticket to report back on completion.
    pub ticket: AnimationTicket,
    /// Starting transform.
    pub from: CardTransform,
    /// Final transform, held once the animation ends.
    pub to: CardTransform,
    /// Total duration.
    pub duration: Duration,
    /// Timing curve.
    pub curve: AnimationCurve,
}

/// Renderer-side animation primitive.
///
/// Implementations apply changes on the UI thread. A new [`Animator::animate`]
/// for a card replaces whatever that card was animating, without reporting the
/// replaced animation as finished.
pub trait Animator {
    /// Move the card's rotation pivot, in unit coordinates of its frame.
    fn set_pivot(&mut self, card: CardId, pivot: Point);

    /// Apply a transform immediately.
    fn apply(&mut self, card: CardId, transform: CardTransform);

    /// Start tweening a transform.
    fn animate(&mut self, card: CardId, animation: TransformAnimation);

    /// Stop the card's transform animation, keeping its current transform.
    ///
    /// Returns the transform the card was left at, when the animator tracks it.
    fn cancel(&mut self, card: CardId) -> Option<CardTransform>;

    /// Move the card's frame, animated over `duration` (zero applies at once).
    fn set_frame(&mut self, card: CardId, frame: Rect, duration: Duration);

    /// Forget everything about a card that left the stack.
    fn release(&mut self, card: CardId);
}
