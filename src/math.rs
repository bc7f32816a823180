//! Vector and rotation helpers on top of `glam`.
//!
//! The steering core works in a right-handed, Y-up world where an
//! un-rotated agent looks down [`FORWARD`] (`+X`).

use glam::{Quat, Vec3};

/// Squared length below which a vector is treated as zero.
pub const EPSILON: f32 = 1.0e-8;

/// Direction an agent faces under the identity orientation.
pub const FORWARD: Vec3 = Vec3::X;

/// World up axis. Yaw is measured around it.
pub const UP: Vec3 = Vec3::Y;

/// Normalize `v`, returning the zero vector for zero-length input.
///
/// Coincident agents and agents at rest hit this path every tick, so the
/// zero case must never divide.
#[inline]
pub fn safe_normal(v: Vec3) -> Vec3 {
    if v.length_squared() <= EPSILON {
        return Vec3::ZERO;
    }
    v.normalize_or_zero()
}

/// Rotation that turns [`FORWARD`] into `direction`.
///
/// Built from yaw around [`UP`] followed by pitch, with no roll. The zero
/// vector maps to [`Quat::IDENTITY`].
pub fn orientation_from_direction(direction: Vec3) -> Quat {
    let dir = safe_normal(direction);
    if dir == Vec3::ZERO {
        return Quat::IDENTITY;
    }

    let yaw = (-dir.z).atan2(dir.x);
    let pitch = dir.y.clamp(-1.0, 1.0).asin();

    Quat::from_rotation_y(yaw) * Quat::from_rotation_z(pitch)
}

/// Clamp an interpolation factor to `[0, 1]`. NaN becomes 0.
#[inline]
pub fn clamp_unit(t: f32) -> f32 {
    if t.is_nan() {
        return 0.0;
    }
    t.clamp(0.0, 1.0)
}
