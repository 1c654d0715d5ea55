use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::animation::bone::Bone;
use crate::animation::hierarchy::HierarchyNode;

/// An imported animation: timing, the bones it drives and the hierarchy it animates.
///
/// Bones are owned by the clip; the hierarchy is shared with every other clip
/// of the same asset and never mutated.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    duration_in_ticks: f32,
    ticks_per_second: f32,
    bones: Vec<Bone>,
    bone_lookup: FxHashMap<String, usize>,
    hierarchy: Arc<HierarchyNode>,
}

impl AnimationClip {
    /// Creates a clip.
    ///
    /// When two bones share a name, the first one drives the node.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        duration_in_ticks: f32,
        ticks_per_second: f32,
        bones: Vec<Bone>,
        hierarchy: Arc<HierarchyNode>,
    ) -> Self {
        let name = name.into();

        let mut bone_lookup = FxHashMap::default();
        for (slot, bone) in bones.iter().enumerate() {
            if bone_lookup.contains_key(bone.name()) {
                log::warn!("Clip '{name}': duplicate channel for bone '{}', ignored", bone.name());
                continue;
            }
            bone_lookup.insert(bone.name().to_string(), slot);
        }

        if duration_in_ticks <= 0.0 {
            log::warn!("Clip '{name}' has non-positive duration {duration_in_ticks}, it will play as a static pose");
        }

        Self {
            name,
            duration_in_ticks,
            ticks_per_second,
            bones,
            bone_lookup,
            hierarchy,
        }
    }

    #[inline]
    #[must_use]
    pub fn duration_in_ticks(&self) -> f32 {
        self.duration_in_ticks
    }

    #[inline]
    #[must_use]
    pub fn ticks_per_second(&self) -> f32 {
        self.ticks_per_second
    }

    /// Clip length in seconds; zero when the rate is not positive.
    #[must_use]
    pub fn duration_in_seconds(&self) -> f32 {
        if self.ticks_per_second > 0.0 {
            self.duration_in_ticks / self.ticks_per_second
        } else {
            0.0
        }
    }

    #[inline]
    #[must_use]
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    #[inline]
    #[must_use]
    pub fn hierarchy(&self) -> &Arc<HierarchyNode> {
        &self.hierarchy
    }

    #[must_use]
    pub fn find_bone(&self, name: &str) -> Option<&Bone> {
        self.bone_lookup.get(name).map(|&slot| &self.bones[slot])
    }

    pub fn find_bone_mut(&mut self, name: &str) -> Option<&mut Bone> {
        let slot = *self.bone_lookup.get(name)?;
        self.bones.get_mut(slot)
    }

    /// Splits the clip into the shared hierarchy and the mutable bone set,
    /// so a traversal can read the tree while evaluating bones.
    pub(crate) fn traversal_parts(&mut self) -> (&HierarchyNode, &mut [Bone], &FxHashMap<String, usize>) {
        (&*self.hierarchy, self.bones.as_mut_slice(), &self.bone_lookup)
    }
}
