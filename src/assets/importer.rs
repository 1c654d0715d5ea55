use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3, Vec4};
use smallvec::SmallVec;

use crate::animation::{
    AnimationClip, Bone, BoneRegistry, Channel, HierarchyNode, Interpolatable, Keyframe,
    KeyframeTrack,
};
use crate::assets::raw::{RawAnimation, RawChannel, RawMesh, RawNode};
use crate::errors::{Result, SkeletalError};
use crate::settings::{AnimationSettings, MAX_BONE_INFLUENCE};

/// Per-vertex skinning attributes, laid out for a `Uint32x4` + `Float32x4` vertex stream.
///
/// Unused slots have bone id 0 and weight 0.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VertexInfluences {
    pub bone_ids: [u32; MAX_BONE_INFLUENCE],
    pub weights: [f32; MAX_BONE_INFLUENCE],
}

impl VertexInfluences {
    /// Number of slots carrying a non-zero weight.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.weights.iter().filter(|w| **w != 0.0).count()
    }
}

#[derive(Debug, Clone, Copy)]
struct Influence {
    bone: u32,
    weight: f32,
}

/// Converts the source hierarchy into the shared runtime tree.
#[must_use]
pub fn import_hierarchy(node: &RawNode) -> HierarchyNode {
    HierarchyNode {
        name: node.name.clone(),
        rest_transform: node.transform,
        children: node.children.iter().map(import_hierarchy).collect(),
    }
}

/// Registers the bones of `mesh` and builds its per-vertex bone assignments.
///
/// Mesh bones carry the authoritative inverse-bind matrices, which overwrite
/// any placeholder left by an earlier animation import. Vertices influenced by
/// more than `max_influences` bones keep their heaviest influences and have the
/// kept weights renormalized to sum to 1.
pub fn import_mesh_skin(
    mesh: &RawMesh,
    registry: &mut BoneRegistry,
    max_influences: usize,
) -> Result<Vec<VertexInfluences>> {
    let max_influences = max_influences.clamp(1, MAX_BONE_INFLUENCE);
    let mut per_vertex: Vec<SmallVec<[Influence; MAX_BONE_INFLUENCE]>> =
        vec![SmallVec::new(); mesh.vertex_count];

    for bone in &mesh.bones {
        if bone.name.is_empty() {
            log::warn!("Mesh '{}' has a bone with an empty name", mesh.name);
        }

        let index = registry.get_or_create_index(&bone.name)?;
        registry.set_inverse_bind_matrix(index, bone.offset_matrix)?;

        for w in &bone.weights {
            let influences = per_vertex.get_mut(w.vertex_id as usize).ok_or_else(|| {
                SkeletalError::VertexOutOfRange {
                    mesh: mesh.name.clone(),
                    vertex: w.vertex_id,
                    count: mesh.vertex_count,
                }
            })?;
            influences.push(Influence {
                bone: index as u32,
                weight: w.weight,
            });
        }
    }

    let mut dropped = 0usize;
    let result = per_vertex
        .into_iter()
        .map(|mut influences| {
            if influences.len() > max_influences {
                // Stable sort: equal weights keep discovery order
                influences.sort_by(|a, b| b.weight.total_cmp(&a.weight));
                dropped += influences.len() - max_influences;
                influences.truncate(max_influences);

                let total: f32 = influences.iter().map(|i| i.weight).sum();
                if total > 0.0 {
                    for influence in &mut influences {
                        influence.weight /= total;
                    }
                }
            }

            let mut packed = VertexInfluences::default();
            for (slot, influence) in influences.iter().enumerate() {
                packed.bone_ids[slot] = influence.bone;
                packed.weights[slot] = influence.weight;
            }
            packed
        })
        .collect();

    if dropped > 0 {
        log::warn!(
            "Mesh '{}': dropped {dropped} bone influences beyond {max_influences} per vertex",
            mesh.name
        );
    }

    Ok(result)
}

/// Builds a clip from raw channel data, registering bones the meshes did not mention.
pub fn import_clip(
    animation: &RawAnimation,
    hierarchy: Arc<HierarchyNode>,
    registry: &mut BoneRegistry,
    settings: &AnimationSettings,
) -> Result<AnimationClip> {
    let ticks_per_second =
        if animation.ticks_per_second.is_finite() && animation.ticks_per_second > 0.0 {
            animation.ticks_per_second
        } else {
            log::warn!(
                "Clip '{}' reports {} ticks/s, using {}",
                animation.name,
                animation.ticks_per_second,
                settings.default_ticks_per_second
            );
            settings.default_ticks_per_second
        };

    let mut bones = Vec::with_capacity(animation.channels.len());
    for channel in &animation.channels {
        bones.push(import_bone(channel, registry)?);
    }

    Ok(AnimationClip::new(
        animation.name.clone(),
        animation.duration_in_ticks,
        ticks_per_second,
        bones,
        hierarchy,
    ))
}

fn import_bone(channel: &RawChannel, registry: &mut BoneRegistry) -> Result<Bone> {
    let name = channel.node_name.as_str();
    let index = registry.get_or_create_index(name)?;

    let rotations: Vec<(f32, Quat)> = channel
        .rotations
        .iter()
        .map(|&(time, q)| (time, normalize_or_identity(q)))
        .collect();

    Ok(Bone::new(
        name,
        index,
        component_track(name, Channel::Translation, &channel.positions, Vec3::ZERO)?,
        component_track(name, Channel::Rotation, &rotations, Quat::IDENTITY)?,
        component_track(name, Channel::Scale, &channel.scales, Vec3::ONE)?,
    ))
}

/// A channel without keys for a component holds that component at rest.
fn component_track<T: Interpolatable>(
    bone: &str,
    channel: Channel,
    keys: &[(f32, T)],
    rest: T,
) -> Result<KeyframeTrack<T>> {
    if keys.is_empty() {
        return Ok(KeyframeTrack::constant(rest));
    }
    let samples = keys
        .iter()
        .map(|&(time, value)| Keyframe::new(time, value))
        .collect();
    KeyframeTrack::new(bone, channel, samples)
}

fn normalize_or_identity(q: Quat) -> Quat {
    Vec4::from(q)
        .try_normalize()
        .map_or(Quat::IDENTITY, Quat::from_vec4)
}
