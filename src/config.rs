//! Tunables for card gestures and stack layout.

use std::f64::consts::PI;
use std::time::Duration;

/// How the completion percent is compared against the dismiss threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThresholdPolicy {
    /// Dismiss only when `percent > threshold`.
    #[default]
    Exclusive,
    /// Dismiss when `percent >= threshold`.
    Inclusive,
}

impl ThresholdPolicy {
    /// Whether `percent` commits to a dismissal under this policy.
    pub fn crosses(self, percent: f64, threshold: f64) -> bool {
        match self {
            ThresholdPolicy::Exclusive => percent > threshold,
            ThresholdPolicy::Inclusive => percent >= threshold,
        }
    }
}

/// Spring parameters handed to the animator for the settle curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringParams {
    /// Damping coefficient.
    pub damping: f64,
    /// Spring stiffness.
    pub stiffness: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            damping: 10.0,
            stiffness: 100.0,
        }
    }
}

/// Per-card gesture configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeConfig {
    /// Completion percent a release must reach to dismiss the card.
    pub threshold: f64,
    /// Comparison used against [`SwipeConfig::threshold`].
    pub threshold_policy: ThresholdPolicy,
    /// Rotation reached when the drag spans the full card width, in radians.
    pub max_rotation_angle: f64,
    /// Cap on the horizontal rotation strength.
    pub max_rotation: f64,
    /// Duration of the snap-back animation.
    pub reset_duration: Duration,
    /// Duration of the off-screen exit animation.
    pub dismiss_duration: Duration,
    /// Settle curve parameters.
    pub spring: SpringParams,
}

impl SwipeConfig {
    /// Whether a release at `percent` commits to a dismissal.
    pub fn should_dismiss(&self, percent: f64) -> bool {
        self.threshold_policy.crosses(percent, self.threshold)
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold: 0.6,
            threshold_policy: ThresholdPolicy::Exclusive,
            max_rotation_angle: PI / 10.0,
            max_rotation: 1.0,
            reset_duration: Duration::from_millis(600),
            dismiss_duration: Duration::from_millis(300),
            spring: SpringParams::default(),
        }
    }
}

/// Stack layout configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackConfig {
    /// Number of cards mounted at once.
    pub max_visible_cards: usize,
    /// Inset step between stacked cards, in pixels.
    pub inset: f64,
    /// Duration of the re-layout after a card leaves.
    pub relayout_duration: Duration,
    /// Fade-in duration of the empty placeholder.
    pub placeholder_fade: Duration,
    /// Gesture configuration applied to every card.
    pub swipe: SwipeConfig,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            max_visible_cards: 3,
            inset: 6.0,
            relayout_duration: Duration::from_millis(200),
            placeholder_fade: Duration::from_millis(200),
            swipe: SwipeConfig::default(),
        }
    }
}
