use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::animation::{AnimationCurve, AnimationTicket, Animator, TransformAnimation};
use crate::card::CardId;
use crate::config::SpringParams;
use crate::geom::{Point, Rect};
use crate::transform::CardTransform;

#[derive(Debug, Clone, Copy)]
struct ActiveTransform {
    animation: TransformAnimation,
    started: Instant,
}

impl ActiveTransform {
    fn sample(&self, now: Instant) -> CardTransform {
        let elapsed = now.saturating_duration_since(self.started);
        let progress = curve_progress(self.animation.curve, elapsed, self.animation.duration);
        self.animation.from.lerp(self.animation.to, progress)
    }

    fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.animation.duration
    }
}

#[derive(Debug, Clone, Copy)]
struct FrameTween {
    from: Rect,
    to: Rect,
    started: Instant,
    duration: Duration,
}

impl FrameTween {
    fn fixed(frame: Rect, now: Instant) -> Self {
        Self {
            from: frame,
            to: frame,
            started: now,
            duration: Duration::ZERO,
        }
    }

    fn sample(&self, now: Instant) -> Rect {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from.lerp(self.to, t)
    }

    fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

/// Frame-driven animator backing the GPUI view.
///
/// Requests are timed against the animator clock, which the view advances
/// once per frame through [`FrameAnimator::tick`].
#[derive(Debug)]
pub(crate) struct FrameAnimator {
    clock: Instant,
    pivots: HashMap<CardId, Point>,
    transforms: HashMap<CardId, CardTransform>,
    active: HashMap<CardId, ActiveTransform>,
    frames: HashMap<CardId, FrameTween>,
}

impl FrameAnimator {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            clock: now,
            pivots: HashMap::new(),
            transforms: HashMap::new(),
            active: HashMap::new(),
            frames: HashMap::new(),
        }
    }

    /// Advance to `now`, returning the animations that finished, by card.
    pub(crate) fn tick(&mut self, now: Instant) -> Vec<(CardId, AnimationTicket)> {
        if now > self.clock {
            self.clock = now;
        }

        let mut finished = Vec::new();
        for (card, active) in &self.active {
            if active.is_done(self.clock) {
                self.transforms.insert(*card, active.animation.to);
                finished.push((*card, active.animation.ticket));
            } else {
                self.transforms.insert(*card, active.sample(self.clock));
            }
        }
        for (card, _) in &finished {
            self.active.remove(card);
        }
        finished.sort();
        finished
    }

    /// Whether any transform or frame is still moving.
    pub(crate) fn is_animating(&self) -> bool {
        !self.active.is_empty() || self.frames.values().any(|tween| !tween.is_done(self.clock))
    }

    /// Transform of `card` as of the last tick.
    pub(crate) fn transform(&self, card: CardId) -> CardTransform {
        self.transforms
            .get(&card)
            .copied()
            .unwrap_or(CardTransform::IDENTITY)
    }

    /// Frame of `card` as of the last tick.
    pub(crate) fn frame(&self, card: CardId) -> Option<Rect> {
        self.frames.get(&card).map(|tween| tween.sample(self.clock))
    }

    #[cfg(test)]
    pub(crate) fn pivot(&self, card: CardId) -> Option<Point> {
        self.pivots.get(&card).copied()
    }
}

impl Animator for FrameAnimator {
    fn set_pivot(&mut self, card: CardId, pivot: Point) {
        self.pivots.insert(card, pivot);
    }

    fn apply(&mut self, card: CardId, transform: CardTransform) {
        self.transforms.insert(card, transform);
    }

    fn animate(&mut self, card: CardId, animation: TransformAnimation) {
        self.transforms.insert(card, animation.from);
        self.active.insert(
            card,
            ActiveTransform {
                animation,
                started: self.clock,
            },
        );
    }

    fn cancel(&mut self, card: CardId) -> Option<CardTransform> {
        if let Some(active) = self.active.remove(&card) {
            self.transforms.insert(card, active.sample(self.clock));
        }
        Some(self.transform(card))
    }

    fn set_frame(&mut self, card: CardId, frame: Rect, duration: Duration) {
        let tween = match self.frame(card) {
            Some(current) if !duration.is_zero() => FrameTween {
                from: current,
                to: frame,
                started: self.clock,
                duration,
            },
            _ => FrameTween::fixed(frame, self.clock),
        };
        self.frames.insert(card, tween);
    }

    fn release(&mut self, card: CardId) {
        self.pivots.remove(&card);
        self.transforms.remove(&card);
        self.active.remove(&card);
        self.frames.remove(&card);
    }
}

fn curve_progress(curve: AnimationCurve, elapsed: Duration, duration: Duration) -> f64 {
    if elapsed >= duration {
        return 1.0;
    }
    match curve {
        AnimationCurve::Linear => elapsed.as_secs_f64() / duration.as_secs_f64(),
        AnimationCurve::Spring(params) => spring_progress(elapsed.as_secs_f64(), params),
    }
}

/// Position of a unit-mass spring released at 0 towards 1 after `t` seconds.
pub(crate) fn spring_progress(t: f64, params: SpringParams) -> f64 {
    if params.stiffness <= 0.0 || t <= 0.0 {
        return if t <= 0.0 { 0.0 } else { 1.0 };
    }
    let omega = params.stiffness.sqrt();
    let zeta = params.damping / (2.0 * omega);
    if zeta < 1.0 {
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let decay = (-zeta * omega * t).exp();
        1.0 - decay * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
    } else {
        // Critically damped; overdamped springs settle no faster.
        1.0 - (-omega * t).exp() * (1.0 + omega * t)
    }
}
