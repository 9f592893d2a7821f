//! Recording fakes for the collaborator traits.

use std::time::Duration;

use crate::animation::{Animator, TransformAnimation};
use crate::card::{CardDelegate, CardId};
use crate::direction::Direction;
use crate::geom::{Point, Rect};
use crate::stack::StackObserver;
use crate::transform::CardTransform;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AnimatorCall {
    Pivot(CardId, Point),
    Apply(CardId, CardTransform),
    Animate(CardId, TransformAnimation),
    Cancel(CardId),
    Frame(CardId, Rect, Duration),
    Release(CardId),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingAnimator {
    pub(crate) calls: Vec<AnimatorCall>,
    /// Reported by `cancel` as the transform the card was left at.
    pub(crate) frozen: Option<CardTransform>,
}

impl RecordingAnimator {
    pub(crate) fn last_animation(&self, card: CardId) -> Option<TransformAnimation> {
        self.calls.iter().rev().find_map(|call| match call {
            AnimatorCall::Animate(id, animation) if *id == card => Some(*animation),
            _ => None,
        })
    }

    pub(crate) fn last_frame(&self, card: CardId) -> Option<(Rect, Duration)> {
        self.calls.iter().rev().find_map(|call| match call {
            AnimatorCall::Frame(id, frame, duration) if *id == card => Some((*frame, *duration)),
            _ => None,
        })
    }

    pub(crate) fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Animator for RecordingAnimator {
    fn set_pivot(&mut self, card: CardId, pivot: Point) {
        self.calls.push(AnimatorCall::Pivot(card, pivot));
    }

    fn apply(&mut self, card: CardId, transform: CardTransform) {
        self.calls.push(AnimatorCall::Apply(card, transform));
    }

    fn animate(&mut self, card: CardId, animation: TransformAnimation) {
        self.calls.push(AnimatorCall::Animate(card, animation));
    }

    fn cancel(&mut self, card: CardId) -> Option<CardTransform> {
        self.calls.push(AnimatorCall::Cancel(card));
        self.frozen
    }

    fn set_frame(&mut self, card: CardId, frame: Rect, duration: Duration) {
        self.calls.push(AnimatorCall::Frame(card, frame, duration));
    }

    fn release(&mut self, card: CardId) {
        self.calls.push(AnimatorCall::Release(card));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DelegateCall {
    Percent(CardId, f64, Option<Direction>),
    WillSettle(CardId, bool, Duration),
    Settled(CardId, bool),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingDelegate {
    pub(crate) calls: Vec<DelegateCall>,
}

impl RecordingDelegate {
    pub(crate) fn settled_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DelegateCall::Settled(..)))
            .count()
    }
}

impl CardDelegate for RecordingDelegate {
    fn on_percent_changed(&mut self, card: CardId, percent: f64, direction: Option<Direction>) {
        self.calls.push(DelegateCall::Percent(card, percent, direction));
    }

    fn on_will_settle(&mut self, card: CardId, dismissing: bool, duration: Duration) {
        self.calls.push(DelegateCall::WillSettle(card, dismissing, duration));
    }

    fn on_settled(&mut self, card: CardId, dismissed: bool) {
        self.calls.push(DelegateCall::Settled(card, dismissed));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ObserverCall {
    Percent(f64, Option<Direction>),
    WillSettle(usize, bool, Duration),
    Settled(usize, bool),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingObserver {
    pub(crate) calls: Vec<ObserverCall>,
}

impl StackObserver for RecordingObserver {
    fn on_percent_changed(&mut self, percent: f64, direction: Option<Direction>) {
        self.calls.push(ObserverCall::Percent(percent, direction));
    }

    fn on_will_settle(&mut self, deck_index: usize, dismissing: bool, duration: Duration) {
        self.calls
            .push(ObserverCall::WillSettle(deck_index, dismissing, duration));
    }

    fn on_settled(&mut self, deck_index: usize, dismissed: bool) {
        self.calls.push(ObserverCall::Settled(deck_index, dismissed));
    }
}
