use glam::{Quat, Vec3};

/// A keyframe value that can be blended between two neighbouring samples.
pub trait Interpolatable: Copy + Clone + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;

    /// Whether the value can be sampled without producing NaN.
    fn is_valid_sample(&self) -> bool;
}

impl Interpolatable for Vec3 {
    #[inline]
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }

    #[inline]
    fn is_valid_sample(&self) -> bool {
        self.is_finite()
    }
}

impl Interpolatable for Quat {
    /// Shortest-arc spherical interpolation.
    ///
    /// `glam::Quat::slerp` already flips `end` when the dot product is negative;
    /// the result is re-normalized to keep accumulated drift out of the
    /// rotation matrices built from it.
    #[inline]
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t).normalize()
    }

    /// A zero-length quaternion normalizes to NaN.
    #[inline]
    fn is_valid_sample(&self) -> bool {
        self.is_finite() && self.length_squared() > 0.0
    }
}
