//! Vector helpers for lunges and destinations.
//! The world is Y-up: `x` and `z` are horizontal, `y` is height.
use glam::Vec3;

use crate::GROUND_LEVEL;

/// Symmetric ease curve driving a lunge: `4 * (-p² + p)`.
///
/// The curve is `0` at both ends and peaks at `1` when `percent == 0.5`.
///
/// # Examples
/// ```
/// use stalker::vector_math::lunge_factor;
/// assert_eq!(lunge_factor(0.0), 0.0);
/// assert_eq!(lunge_factor(0.5), 1.0);
/// assert_eq!(lunge_factor(1.0), 0.0);
/// ```
#[must_use]
pub fn lunge_factor(percent: f32) -> f32 {
    4.0 * (-percent * percent + percent)
}

/// Position along a lunge from `origin` to `target` at `percent`.
///
/// The ease factor is clamped into `[0, 1]`, so overshooting `percent` past
/// either end yields `origin` rather than a point behind it.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use stalker::vector_math::lunge_position;
/// let target = Vec3::new(2.0, 0.0, 0.0);
/// assert_eq!(lunge_position(Vec3::ZERO, target, 0.5), target);
/// assert_eq!(lunge_position(Vec3::ZERO, target, 1.2), Vec3::ZERO);
/// ```
#[must_use]
pub fn lunge_position(origin: Vec3, target: Vec3, percent: f32) -> Vec3 {
    origin.lerp(target, lunge_factor(percent).clamp(0.0, 1.0))
}

/// Projects `point` onto the ground plane, keeping its horizontal coordinates.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use stalker::ground_projection;
/// assert_eq!(ground_projection(Vec3::new(3.0, 1.8, -4.0)), Vec3::new(3.0, 0.0, -4.0));
/// ```
#[must_use]
pub const fn ground_projection(point: Vec3) -> Vec3 {
    Vec3::new(point.x, GROUND_LEVEL, point.z)
}

/// Returns `true` when `from` and `to` are strictly closer than `range`.
///
/// Compares squared lengths, so no square root is taken. Non-finite inputs
/// are never in range.
#[must_use]
pub fn within_range(from: Vec3, to: Vec3, range: f32) -> bool {
    let offset = to - from;
    offset.is_finite() && offset.length_squared() < range * range
}
