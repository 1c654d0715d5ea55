use glam::{Mat4, Quat, Vec3};

use crate::animation::tracks::{RotationTrack, ScaleTrack, TranslationTrack};

/// An animated bone: three independently sampled channels plus its registry slot.
///
/// Owned by exactly one [`AnimationClip`](crate::animation::AnimationClip).
#[derive(Debug, Clone)]
pub struct Bone {
    name: String,
    index: usize,
    translation: TranslationTrack,
    rotation: RotationTrack,
    scale: ScaleTrack,
    // Cache of the last evaluation
    local_transform: Mat4,
}

impl Bone {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        index: usize,
        translation: TranslationTrack,
        rotation: RotationTrack,
        scale: ScaleTrack,
    ) -> Self {
        Self {
            name: name.into(),
            index,
            translation,
            rotation,
            scale,
            local_transform: Mat4::IDENTITY,
        }
    }

    /// A bone that holds its rest pose for all time.
    #[must_use]
    pub fn rest(name: impl Into<String>, index: usize) -> Self {
        Self::new(
            name,
            index,
            TranslationTrack::constant(Vec3::ZERO),
            RotationTrack::constant(Quat::IDENTITY),
            ScaleTrack::constant(Vec3::ONE),
        )
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dense slot shared with the [`BoneRegistry`](crate::animation::BoneRegistry).
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    #[must_use]
    pub fn translation_track(&self) -> &TranslationTrack {
        &self.translation
    }

    #[inline]
    #[must_use]
    pub fn rotation_track(&self) -> &RotationTrack {
        &self.rotation
    }

    #[inline]
    #[must_use]
    pub fn scale_track(&self) -> &ScaleTrack {
        &self.scale
    }

    /// Latest tick at which any channel has a sample.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.translation
            .end_time()
            .max(self.rotation.end_time())
            .max(self.scale.end_time())
    }

    /// Samples all three channels at `time` and returns `T * R * S`.
    ///
    /// Scale applies first in local space, then rotation about the bone
    /// origin, then translation. The result is cached in [`Self::local_transform`].
    pub fn evaluate_local_transform(&mut self, time: f32) -> Mat4 {
        let translation = self.translation.sample(time);
        let rotation = self.rotation.sample(time);
        let scale = self.scale.sample(time);

        self.local_transform = Mat4::from_translation(translation)
            * Mat4::from_quat(rotation)
            * Mat4::from_scale(scale);
        self.local_transform
    }

    /// Result of the last [`Self::evaluate_local_transform`] call (identity before any).
    #[inline]
    #[must_use]
    pub fn local_transform(&self) -> Mat4 {
        self.local_transform
    }
}
