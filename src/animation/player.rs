use std::sync::Arc;

use glam::Mat4;
use rustc_hash::FxHashMap;

use crate::animation::bone::Bone;
use crate::animation::clip::AnimationClip;
use crate::animation::hierarchy::HierarchyNode;
use crate::animation::registry::BoneRegistry;
use crate::errors::{Result, SkeletalError};
use crate::settings::AnimationSettings;

/// Relative distance below the clip duration that still wraps to tick 0.
const WRAP_TOLERANCE: f32 = 4.0 * f32::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No clip attached; the skinning buffer keeps whatever it last held.
    Stopped,
    Playing,
}

/// Drives one skinned instance: owns at most one clip and the skinning buffer.
///
/// The buffer has a fixed length (the bone capacity) and is overwritten in
/// place by every [`advance`](Self::advance); it is never reallocated.
/// Slot `i` holds `global_pose(bone i) * inverse_bind(bone i)`, where `i` is
/// the bone's [`BoneRegistry`] index.
#[derive(Debug)]
pub struct AnimationPlayer {
    registry: Arc<BoneRegistry>,
    clip: Option<AnimationClip>,
    current_time: f32,
    paused: bool,
    skinning_matrices: Vec<Mat4>,
}

impl AnimationPlayer {
    /// Creates a player with `capacity` skinning slots, all identity.
    ///
    /// The registry must be fully populated (import finished) and fit in the buffer.
    pub fn new(registry: Arc<BoneRegistry>, capacity: usize) -> Result<Self> {
        if registry.len() > capacity {
            return Err(SkeletalError::CapacityMismatch {
                bones: registry.len(),
                capacity,
            });
        }

        Ok(Self {
            registry,
            clip: None,
            current_time: 0.0,
            paused: false,
            skinning_matrices: vec![Mat4::IDENTITY; capacity],
        })
    }

    pub fn from_settings(registry: Arc<BoneRegistry>, settings: &AnimationSettings) -> Result<Self> {
        Self::new(registry, settings.max_bones)
    }

    // ========================================================================
    // Clip management
    // ========================================================================

    /// Replaces the current clip and rewinds to tick 0. The previous clip is dropped.
    pub fn attach_clip(&mut self, clip: AnimationClip) {
        log::debug!(
            "Attaching clip '{}' ({} bones, {} ticks @ {} ticks/s)",
            clip.name,
            clip.bones().len(),
            clip.duration_in_ticks(),
            clip.ticks_per_second()
        );
        self.clip = Some(clip);
        self.current_time = 0.0;
    }

    /// Removes and returns the current clip, leaving the player stopped.
    pub fn detach_clip(&mut self) -> Option<AnimationClip> {
        self.current_time = 0.0;
        self.clip.take()
    }

    #[inline]
    #[must_use]
    pub fn has_active_clip(&self) -> bool {
        self.clip.is_some()
    }

    #[inline]
    #[must_use]
    pub fn clip(&self) -> Option<&AnimationClip> {
        self.clip.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        if self.clip.is_some() {
            PlaybackState::Playing
        } else {
            PlaybackState::Stopped
        }
    }

    /// While paused, `advance` keeps re-evaluating the pose at the frozen time.
    #[inline]
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    #[inline]
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Current playback time in clip ticks, always within `[0, duration)`.
    #[inline]
    #[must_use]
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Moves playback forward by `delta_seconds` and recomputes every skinning matrix.
    ///
    /// No-op without a clip. Time wraps into `[0, duration)`; a clip with a
    /// non-positive duration is held as a static pose at tick 0.
    pub fn advance(&mut self, delta_seconds: f32) {
        let Some(clip) = self.clip.as_ref() else {
            return;
        };

        let duration = clip.duration_in_ticks();
        let mut time = self.current_time;
        if !self.paused {
            time += clip.ticks_per_second() * delta_seconds;
        }

        self.current_time = if duration > 0.0 && time.is_finite() {
            let wrapped = time.rem_euclid(duration);
            let tolerance = duration * WRAP_TOLERANCE;
            let crossed_boundary = !(0.0..duration).contains(&time);
            // Within rounding error of a loop boundary counts as exactly tick 0
            if duration - wrapped <= tolerance || (crossed_boundary && wrapped <= tolerance) {
                0.0
            } else {
                wrapped
            }
        } else {
            if !time.is_finite() {
                log::warn!("Playback time of clip '{}' is not finite, resetting to 0", clip.name);
            }
            0.0
        };

        self.evaluate();
    }

    /// Recomputes the skinning buffer at the current time without advancing.
    pub fn evaluate(&mut self) {
        let Some(clip) = self.clip.as_mut() else {
            return;
        };

        let time = self.current_time;
        let (root, bones, bone_lookup) = clip.traversal_parts();
        let mut pass = PosePass {
            time,
            bones,
            bone_lookup,
            registry: &self.registry,
            output: &mut self.skinning_matrices,
        };
        pass.visit(root, Mat4::IDENTITY);
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// The full fixed-capacity skinning buffer, indexed by registry index.
    ///
    /// Contents are overwritten by the next `advance`.
    #[inline]
    #[must_use]
    pub fn skinning_matrices(&self) -> &[Mat4] {
        &self.skinning_matrices
    }

    /// The skinning buffer as raw bytes, ready for a uniform/storage buffer upload.
    #[inline]
    #[must_use]
    pub fn skinning_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.skinning_matrices.as_slice())
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.skinning_matrices.len()
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Arc<BoneRegistry> {
        &self.registry
    }
}

/// State threaded through one pre-order walk of the hierarchy.
struct PosePass<'a> {
    time: f32,
    bones: &'a mut [Bone],
    bone_lookup: &'a FxHashMap<String, usize>,
    registry: &'a BoneRegistry,
    output: &'a mut [Mat4],
}

impl PosePass<'_> {
    fn visit(&mut self, node: &HierarchyNode, parent_global: Mat4) {
        // Animated bones replace the rest transform; grouping nodes keep it
        let local = match self.bone_lookup.get(&node.name) {
            Some(&slot) => self.bones[slot].evaluate_local_transform(self.time),
            None => node.rest_transform,
        };

        let global = parent_global * local;

        // Helper nodes outside the registry still propagate `global` to their children
        if let Some(index) = self.registry.index_of(&node.name)
            && let (Some(slot), Some(inverse_bind)) =
                (self.output.get_mut(index), self.registry.inverse_bind_matrix(index))
        {
            *slot = global * *inverse_bind;
        }

        for child in &node.children {
            self.visit(child, global);
        }
    }
}
