//! Affine transform applied to a card while it follows the pointer.

use crate::config::SwipeConfig;
use crate::geom::Point;

/// Rotation followed by a translation, relative to the card's rest position.
///
/// The rotation pivots around the card's current pivot (see
/// [`Animator::set_pivot`](crate::animation::Animator::set_pivot)).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardTransform {
    /// Offset from the rest position, in pixels.
    pub translation: Point,
    /// Rotation in radians, clockwise for positive values.
    pub rotation: f64,
}

impl CardTransform {
    /// The rest transform.
    pub const IDENTITY: CardTransform = CardTransform {
        translation: Point::ZERO,
        rotation: 0.0,
    };

    /// Transform that follows a drag of `translation` on a card `width` wide.
    ///
    /// `rotation_sign` flips the tilt when the card was grabbed below its
    /// vertical center.
    pub fn follow(translation: Point, width: f64, rotation_sign: f64, config: &SwipeConfig) -> Self {
        Self {
            translation,
            rotation: rotation_angle(translation.x, width, rotation_sign, config),
        }
    }

    /// Whether this is the rest transform.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Interpolate towards `other`. `t` may overshoot `[0, 1]` for springs.
    pub fn lerp(self, other: CardTransform, t: f64) -> Self {
        Self {
            translation: self.translation.lerp(other.translation, t),
            rotation: self.rotation + (other.rotation - self.rotation) * t,
        }
    }
}

/// Tilt for a horizontal offset `dx` on a card `width` wide.
pub fn rotation_angle(dx: f64, width: f64, rotation_sign: f64, config: &SwipeConfig) -> f64 {
    if width <= 0.0 {
        return 0.0;
    }
    let strength = (dx / width).clamp(-config.max_rotation, config.max_rotation);
    rotation_sign * config.max_rotation_angle * strength
}
