//! Lifecycle of a single swipeable card.
//!
//! ```text
//! Idle --down--> Dragging --up (percent <= threshold)--> Resetting --done--> Idle
//!                         --up (percent >  threshold)--> Dismissing --done--> Removed
//! ```
//!
//! A pointer down while Resetting or Dismissing cancels the animation and
//! returns to Dragging. Transitions out of the settling states happen only
//! when the animator reports the matching [`AnimationTicket`].

use std::time::Duration;

use crate::animation::{AnimationCurve, AnimationTicket, Animator, TransformAnimation};
use crate::classify::{self, ClassifiedDrag};
use crate::config::SwipeConfig;
use crate::direction::Direction;
use crate::geom::{Point, Size};
use crate::transform::{CardTransform, rotation_angle};

/// Stable identity of a mounted card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(pub u64);

/// Where a card is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    /// At rest.
    Idle,
    /// Following the pointer.
    Dragging,
    /// Springing back to rest.
    Resetting,
    /// Flying off-screen.
    Dismissing,
    /// Gone; ignores further input.
    Removed,
}

/// Receives every observable transition of a card.
///
/// All methods are required so that every transition is acknowledged.
pub trait CardDelegate {
    /// The drag progressed. Also fires with `0` once a reset settles.
    fn on_percent_changed(&mut self, card: CardId, percent: f64, direction: Option<Direction>);

    /// The card is about to animate back (`dismissing == false`) or away.
    fn on_will_settle(&mut self, card: CardId, dismissing: bool, duration: Duration);

    /// The settle animation finished.
    fn on_settled(&mut self, card: CardId, dismissed: bool);
}

/// Off-screen offset a card travels to when dismissed towards `direction`.
pub fn exit_offset(direction: Direction, screen: Size) -> Point {
    direction
        .exit_multiplier()
        .multiply_components(screen.to_point())
}

/// Gesture state machine for one card.
#[derive(Debug, Clone)]
pub struct SwipeCard {
    id: CardId,
    config: SwipeConfig,
    state: CardState,
    transform: CardTransform,
    rotation_sign: f64,
    drag: ClassifiedDrag,
    ticket: AnimationTicket,
    exit: Option<Direction>,
}

impl SwipeCard {
    /// Create an idle card.
    pub fn new(id: CardId, config: SwipeConfig) -> Self {
        Self {
            id,
            config,
            state: CardState::Idle,
            transform: CardTransform::IDENTITY,
            rotation_sign: 1.0,
            drag: ClassifiedDrag::NONE,
            ticket: AnimationTicket::default(),
            exit: None,
        }
    }

    /// Card identity.
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CardState {
        self.state
    }

    /// Last transform applied or targeted.
    pub fn transform(&self) -> CardTransform {
        self.transform
    }

    /// Classification of the latest drag sample.
    pub fn drag(&self) -> ClassifiedDrag {
        self.drag
    }

    /// Direction of the exit once the card is dismissing or removed.
    pub fn exit_direction(&self) -> Option<Direction> {
        self.exit
    }

    /// Ticket of the animation the card is waiting on, if settling.
    pub fn pending_ticket(&self) -> Option<AnimationTicket> {
        match self.state {
            CardState::Resetting | CardState::Dismissing => Some(self.ticket),
            _ => None,
        }
    }

    /// Start following the pointer from `local`, a point inside a card of `size`.
    ///
    /// Returns `false` for removed cards.
    pub fn pointer_down(&mut self, local: Point, size: Size, animator: &mut dyn Animator) -> bool {
        match self.state {
            CardState::Removed => {
                log::warn!("pointer down on removed card {:?}", self.id);
                return false;
            }
            CardState::Resetting | CardState::Dismissing => {
                log::debug!("card {:?} interrupted while {:?}", self.id, self.state);
                self.transform = animator
                    .cancel(self.id)
                    .unwrap_or(CardTransform::IDENTITY);
                self.ticket = self.ticket.next();
                self.exit = None;
            }
            CardState::Idle | CardState::Dragging => {}
        }

        let pivot = if size.is_valid() {
            Point::new(local.x / size.width, local.y / size.height)
        } else {
            Point::new(0.5, 0.5)
        };
        self.rotation_sign = if pivot.y > 0.5 { -1.0 } else { 1.0 };
        animator.set_pivot(self.id, pivot);
        self.state = CardState::Dragging;
        log::debug!("card {:?} dragging from pivot {pivot:?}", self.id);
        true
    }

    /// Follow a cumulative drag of `translation`.
    pub fn pointer_move(
        &mut self,
        translation: Point,
        size: Size,
        animator: &mut dyn Animator,
        delegate: &mut dyn CardDelegate,
    ) {
        if self.state != CardState::Dragging {
            return;
        }
        self.drag = classify::classify(translation, size);
        self.transform =
            CardTransform::follow(translation, size.width, self.rotation_sign, &self.config);
        animator.apply(self.id, self.transform);
        delegate.on_percent_changed(self.id, self.drag.percent, self.drag.direction);
    }

    /// Release the card after a cumulative drag of `translation`.
    ///
    /// `screen` is the size of the surface the card exits through.
    pub fn pointer_up(
        &mut self,
        translation: Point,
        size: Size,
        screen: Size,
        animator: &mut dyn Animator,
        delegate: &mut dyn CardDelegate,
    ) {
        if self.state != CardState::Dragging {
            return;
        }
        self.transform =
            CardTransform::follow(translation, size.width, self.rotation_sign, &self.config);

        let direction = match classify::drag_direction(translation, size) {
            Ok(direction) => direction,
            Err(err) => {
                log::debug!("card {:?} released without direction: {err}", self.id);
                self.drag = ClassifiedDrag::NONE;
                self.begin_reset(animator, delegate);
                return;
            }
        };

        let percent = classify::drag_percentage(translation, size, direction);
        self.drag = ClassifiedDrag {
            direction: Some(direction),
            percent,
        };
        if self.config.should_dismiss(percent) {
            self.begin_dismiss(direction, size, screen, animator, delegate);
        } else {
            self.begin_reset(animator, delegate);
        }
    }

    /// Abort the drag, snapping the card back.
    pub fn pointer_cancel(&mut self, animator: &mut dyn Animator, delegate: &mut dyn CardDelegate) {
        if self.state == CardState::Dragging {
            self.begin_reset(animator, delegate);
        }
    }

    /// Dismiss towards `direction` without a gesture.
    ///
    /// Only idle or dragging cards can be dismissed. Returns whether the
    /// dismissal started.
    pub fn dismiss(
        &mut self,
        direction: Direction,
        size: Size,
        screen: Size,
        animator: &mut dyn Animator,
        delegate: &mut dyn CardDelegate,
    ) -> bool {
        match self.state {
            CardState::Idle | CardState::Dragging => {
                self.begin_dismiss(direction, size, screen, animator, delegate);
                true
            }
            state => {
                log::warn!("ignoring dismiss of card {:?} while {state:?}", self.id);
                false
            }
        }
    }

    /// Report that the animation identified by `ticket` finished.
    ///
    /// Returns `false` when the ticket is stale or nothing was animating.
    pub fn animation_finished(
        &mut self,
        ticket: AnimationTicket,
        animator: &mut dyn Animator,
        delegate: &mut dyn CardDelegate,
    ) -> bool {
        if ticket != self.ticket {
            log::debug!(
                "card {:?} ignoring stale ticket {ticket:?} (current {:?})",
                self.id,
                self.ticket
            );
            return false;
        }

        match self.state {
            CardState::Resetting => {
                self.state = CardState::Idle;
                self.transform = CardTransform::IDENTITY;
                self.drag = ClassifiedDrag::NONE;
                animator.apply(self.id, CardTransform::IDENTITY);
                log::debug!("card {:?} back at rest", self.id);
                delegate.on_percent_changed(self.id, 0.0, None);
                delegate.on_settled(self.id, false);
                true
            }
            CardState::Dismissing => {
                self.state = CardState::Removed;
                log::debug!("card {:?} dismissed towards {:?}", self.id, self.exit);
                delegate.on_settled(self.id, true);
                true
            }
            state => {
                log::warn!("card {:?} got a completion while {state:?}", self.id);
                false
            }
        }
    }

    fn begin_reset(&mut self, animator: &mut dyn Animator, delegate: &mut dyn CardDelegate) {
        self.state = CardState::Resetting;
        self.ticket = self.ticket.next();
        let duration = self.config.reset_duration;
        log::debug!("card {:?} resetting at {:.3}", self.id, self.drag.percent);

        delegate.on_will_settle(self.id, false, duration);
        animator.animate(
            self.id,
            TransformAnimation {
                ticket: self.ticket,
                from: self.transform,
                to: CardTransform::IDENTITY,
                duration,
                curve: AnimationCurve::Spring(self.config.spring),
            },
        );
    }

    fn begin_dismiss(
        &mut self,
        direction: Direction,
        size: Size,
        screen: Size,
        animator: &mut dyn Animator,
        delegate: &mut dyn CardDelegate,
    ) {
        let destination = exit_offset(direction, screen);
        let to = CardTransform {
            translation: destination,
            rotation: rotation_angle(destination.x, size.width, self.rotation_sign, &self.config),
        };

        self.state = CardState::Dismissing;
        self.exit = Some(direction);
        self.ticket = self.ticket.next();
        let duration = self.config.dismiss_duration;
        log::debug!("card {:?} dismissing towards {direction:?}", self.id);

        delegate.on_will_settle(self.id, true, duration);
        animator.animate(
            self.id,
            TransformAnimation {
                ticket: self.ticket,
                from: self.transform,
                to,
                duration,
                curve: AnimationCurve::Linear,
            },
        );
        self.transform = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThresholdPolicy;
    use crate::testing::{AnimatorCall, DelegateCall, RecordingAnimator, RecordingDelegate};

    const VIEW: Size = Size::new(300.0, 600.0);
    const SCREEN: Size = Size::new(400.0, 800.0);
    const ID: CardId = CardId(7);

    fn card() -> SwipeCard {
        SwipeCard::new(ID, SwipeConfig::default())
    }

    fn drag_to(
        card: &mut SwipeCard,
        translation: Point,
        animator: &mut RecordingAnimator,
        delegate: &mut RecordingDelegate,
    ) {
        assert!(card.pointer_down(Point::new(150.0, 100.0), VIEW, animator));
        card.pointer_move(translation, VIEW, animator, delegate);
        card.pointer_up(translation, VIEW, SCREEN, animator, delegate);
    }

    #[test]
    fn pointer_down_reanchors_pivot() {
        let mut card = card();
        let mut animator = RecordingAnimator::default();
        assert!(card.pointer_down(Point::new(75.0, 450.0), VIEW, &mut animator));
        assert_eq!(card.state(), CardState::Dragging);
        assert_eq!(
            animator.calls,
            vec![AnimatorCall::Pivot(ID, Point::new(0.25, 0.75))]
        );
    }

    #[test]
    fn moves_follow_pointer_and_report_percent() {
        let mut card = card();
        let mut animator = RecordingAnimator::default();
        let mut delegate = RecordingDelegate::default();
        card.pointer_down(Point::new(150.0, 100.0), VIEW, &mut animator);
        card.pointer_move(Point::new(75.0, 0.0), VIEW, &mut animator, &mut delegate);

        let expected = CardTransform::follow(Point::new(75.0, 0.0), 300.0, 1.0, &card.config);
        assert_eq!(animator.calls.last(), Some(&AnimatorCall::Apply(ID, expected)));
        assert_eq!(
            delegate.calls,
            vec![DelegateCall::Percent(ID, 0.5, Some(Direction::Right))]
        );
    }

    #[test]
    fn grabbing_lower_half_flips_tilt() {
        let mut card = card();
        let mut animator = RecordingAnimator::default();
        let mut delegate = RecordingDelegate::default();
        card.pointer_down(Point::new(150.0, 500.0), VIEW, &mut animator);
        card.pointer_move(Point::new(60.0, 0.0), VIEW, &mut animator, &mut delegate);
        assert!(card.transform().rotation < 0.0);
    }

    #[test]
    fn short_release_springs_back() {
        let mut card = card();
        let mut animator = RecordingAnimator::default();
        let mut delegate = RecordingDelegate::default();
        drag_to(&mut card, Point::new(45.0, 0.0), &mut animator, &mut delegate);

        assert_eq!(card.state(), CardState::Resetting);
        let animation = animator.last_animation(ID).expect("reset animation");
        assert_eq!(animation.to, CardTransform::IDENTITY);
        assert_eq!(animation.duration, Duration::from_millis(600));
        assert_eq!(
            animation.curve,
            AnimationCurve::Spring(SwipeConfig::default().spring)
        );
        assert_eq!(
            delegate.calls.last(),
            Some(&DelegateCall::WillSettle(ID, false, Duration::from_millis(600)))
        );

        assert!(card.animation_finished(animation.ticket, &mut animator, &mut delegate));
        assert_eq!(card.state(), CardState::Idle);
        assert!(card.transform().is_identity());
        assert_eq!(
            animator.calls.last(),
            Some(&AnimatorCall::Apply(ID, CardTransform::IDENTITY))
        );
        let tail = &delegate.calls[delegate.calls.len() - 2..];
        assert_eq!(
            tail,
            &[
                DelegateCall::Percent(ID, 0.0, None),
                DelegateCall::Settled(ID, false)
            ]
        );
    }

    #[test]
    fn release_exactly_at_threshold_resets_under_strict_policy() {
        let mut card = card();
        let mut animator = RecordingAnimator::default();
        let mut delegate = RecordingDelegate::default();
        drag_to(&mut card, Point::new(90.0, 0.0), &mut animator, &mut delegate);
        assert_eq!(card.drag().percent, 0.6);
        assert_eq!(card.state(), CardState::Resetting);
    }

    #[test]
    fn release_exactly_at_threshold_dismisses_under_inclusive_policy() {
        let config = SwipeConfig {
            threshold_policy: ThresholdPolicy::Inclusive,
            ..SwipeConfig::default()
        };
        let mut card = SwipeCard::new(ID, config);
        let mut animator = RecordingAnimator::default();
        let mut delegate = RecordingDelegate::default();
        drag_to(&mut card, Point::new(90.0, 0.0), &mut animator, &mut delegate);
        assert_eq!(card.state(), CardState::Dismissing);
        assert_eq!(card.exit_direction(), Some(Direction::Right));
    }

    #[test]
    fn long_release_flies_off_screen() {
        let mut card = card();
        let mut animator = RecordingAnimator::default();
        let mut delegate = RecordingDelegate::default();
        drag_to(&mut card, Point::new(0.0, -240.0), &mut animator, &mut delegate);

        assert_eq!(card.state(), CardState::Dismissing);
        let animation = animator.last_animation(ID).expect("dismiss animation");
        assert_eq!(animation.to.translation, Point::new(0.0, -1200.0));
        assert_eq!(animation.to.rotation, 0.0);
        assert_eq!(animation.curve, AnimationCurve::Linear);
        assert_eq!(animation.duration, Duration::from_millis(300));
        assert_eq!(
            delegate.calls.last(),
            Some(&DelegateCall::WillSettle(ID, true, Duration::from_millis(300)))
        );

        assert!(card.animation_finished(animation.ticket, &mut animator, &mut delegate));
        assert_eq!(card.state(), CardState::Removed);
        assert_eq!(delegate.calls.last(), Some(&DelegateCall::Settled(ID, true)));
        assert!(!card.pointer_down(Point::ZERO, VIEW, &mut animator));
    }

    #[test]
    fn programmatic_dismiss_skips_threshold() {
        let mut card = card();
        let mut animator = RecordingAnimator::default();
        let mut delegate = RecordingDelegate::default();
        assert!(card.dismiss(
            Direction::BottomLeft,
            VIEW,
            SCREEN,
            &mut animator,
            &mut delegate
        ));

        assert_eq!(card.state(), CardState::Dismissing);
        let animation = animator.last_animation(ID).expect("dismiss animation");
        assert_eq!(animation.from, CardTransform::IDENTITY);
        assert_eq!(animation.to.translation, Point::new(-600.0, 1000.0));
        assert!(animation.to.rotation < 0.0);
        assert_eq!(
            delegate.calls,
            vec![DelegateCall::WillSettle(ID, true, Duration::from_millis(300))]
        );
    }

    #[test]
    fn dismiss_refused_while_settling() {
        let mut card = card();
        let mut animator = RecordingAnimator::default();
        let mut delegate = RecordingDelegate::default();
        drag_to(&mut card, Point::new(30.0, 0.0), &mut animator, &mut delegate);
        assert_eq!(card.state(), CardState::Resetting);
        assert!(!card.dismiss(Direction::Left, VIEW, SCREEN, &mut animator, &mut delegate));
        assert_eq!(card.state(), CardState::Resetting);
    }

    #[test]
    fn degenerate_release_resets() {
        let mut card = card();
        let mut animator = RecordingAnimator::default();
        let mut delegate = RecordingDelegate::default();
        let empty = Size::new(0.0, 0.0);
        card.pointer_down(Point::ZERO, empty, &mut animator);
        card.pointer_up(Point::new(500.0, 0.0), empty, SCREEN, &mut animator, &mut delegate);
        assert_eq!(card.state(), CardState::Resetting);
        assert_eq!(card.drag(), ClassifiedDrag::NONE);
    }

    #[test]
    fn cancel_resets_drag() {
        let mut card = card();
        let mut animator = RecordingAnimator::default();
        let mut delegate = RecordingDelegate::default();
        card.pointer_down(Point::ZERO, VIEW, &mut animator);
        card.pointer_move(Point::new(200.0, 0.0), VIEW, &mut animator, &mut delegate);
        card.pointer_cancel(&mut animator, &mut delegate);
        assert_eq!(card.state(), CardState::Resetting);
    }

    #[test]
    fn interruption_cancels_and_ignores_stale_completion() {
        let mut card = card();
        let mut animator = RecordingAnimator::default();
        let mut delegate = RecordingDelegate::default();
        drag_to(&mut card, Point::new(0.0, 290.0), &mut animator, &mut delegate);
        assert_eq!(card.state(), CardState::Dismissing);
        let stale = card.pending_ticket().expect("settling");

        assert!(card.pointer_down(Point::new(10.0, 10.0), VIEW, &mut animator));
        assert_eq!(card.state(), CardState::Dragging);
        assert_eq!(card.exit_direction(), None);
        assert!(animator.calls.contains(&AnimatorCall::Cancel(ID)));

        let settled_before = delegate.settled_count();
        assert!(!card.animation_finished(stale, &mut animator, &mut delegate));
        assert_eq!(card.state(), CardState::Dragging);
        assert_eq!(delegate.settled_count(), settled_before);
    }

    #[test]
    fn interrupting_reset_returns_to_dragging() {
        let mut card = card();
        let mut animator = RecordingAnimator::default();
        let mut delegate = RecordingDelegate::default();
        drag_to(&mut card, Point::new(45.0, 0.0), &mut animator, &mut delegate);
        assert_eq!(card.state(), CardState::Resetting);
        let stale = card.pending_ticket().expect("settling");

        let halfway = CardTransform {
            translation: Point::new(20.0, 0.0),
            rotation: 0.02,
        };
        animator.frozen = Some(halfway);
        assert!(card.pointer_down(Point::new(150.0, 100.0), VIEW, &mut animator));
        assert_eq!(card.state(), CardState::Dragging);
        assert_eq!(card.transform(), halfway);
        assert!(animator.calls.contains(&AnimatorCall::Cancel(ID)));

        let calls_before = delegate.calls.len();
        assert!(!card.animation_finished(stale, &mut animator, &mut delegate));
        assert_eq!(card.state(), CardState::Dragging);
        assert_eq!(delegate.calls.len(), calls_before);
    }

    #[test]
    fn interrupted_dismissal_resets_from_where_the_card_stopped() {
        let mut card = card();
        let mut animator = RecordingAnimator::default();
        let mut delegate = RecordingDelegate::default();
        drag_to(&mut card, Point::new(0.0, -240.0), &mut animator, &mut delegate);
        assert_eq!(card.state(), CardState::Dismissing);
        assert_eq!(card.transform().translation, Point::new(0.0, -1200.0));

        let caught = CardTransform {
            translation: Point::new(0.0, -500.0),
            rotation: 0.0,
        };
        animator.frozen = Some(caught);
        card.pointer_down(Point::new(150.0, 100.0), VIEW, &mut animator);
        card.pointer_cancel(&mut animator, &mut delegate);

        let reset = animator.last_animation(ID).expect("reset animation");
        assert_eq!(reset.from, caught);
        assert_eq!(reset.to, CardTransform::IDENTITY);
    }

    #[test]
    fn interruption_without_tracked_transform_starts_from_rest() {
        let mut card = card();
        let mut animator = RecordingAnimator::default();
        let mut delegate = RecordingDelegate::default();
        drag_to(&mut card, Point::new(0.0, -240.0), &mut animator, &mut delegate);

        card.pointer_down(Point::new(150.0, 100.0), VIEW, &mut animator);
        assert!(card.transform().is_identity());
        card.pointer_cancel(&mut animator, &mut delegate);
        let reset = animator.last_animation(ID).expect("reset animation");
        assert!(reset.from.is_identity());
    }
}
