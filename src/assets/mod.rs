//! Asset Import
//!
//! Turns decoded scene data ([`raw`]) into the runtime skeletal structures.
//!
//! Import is a single serialized phase against one [`BoneRegistry`]: the
//! hierarchy first, then every mesh skin, then every animation. Once it
//! finishes the registry is frozen behind an `Arc` and shared with players.

pub mod importer;
pub mod raw;

use std::sync::Arc;

use crate::animation::{AnimationClip, AnimationPlayer, BoneRegistry, HierarchyNode};
use crate::errors::Result;
use crate::settings::AnimationSettings;

pub use importer::{VertexInfluences, import_clip, import_hierarchy, import_mesh_skin};
pub use raw::{RawAnimation, RawChannel, RawMesh, RawMeshBone, RawNode, RawScene, RawVertexWeight};

/// Skinning attributes of one imported mesh.
#[derive(Debug, Clone)]
pub struct MeshSkin {
    pub mesh_name: String,
    /// One entry per vertex, in vertex order.
    pub influences: Vec<VertexInfluences>,
}

/// A fully imported rigged asset.
#[derive(Debug, Clone)]
pub struct SkinnedAsset {
    pub hierarchy: Arc<HierarchyNode>,
    pub registry: Arc<BoneRegistry>,
    pub skins: Vec<MeshSkin>,
    pub clips: Vec<AnimationClip>,
    settings: AnimationSettings,
}

impl SkinnedAsset {
    /// Runs the import phase.
    ///
    /// Fails when the settings are invalid, when the rig has more distinct bones
    /// than `settings.max_bones`, or when the raw data is malformed.
    pub fn import(scene: &RawScene, settings: &AnimationSettings) -> Result<Self> {
        settings.validate()?;

        let hierarchy = Arc::new(import_hierarchy(&scene.root));
        let mut registry = BoneRegistry::new(settings.max_bones);

        let mut skins = Vec::with_capacity(scene.meshes.len());
        for mesh in &scene.meshes {
            skins.push(MeshSkin {
                mesh_name: mesh.name.clone(),
                influences: import_mesh_skin(mesh, &mut registry, settings.max_influences)?,
            });
        }

        let mut clips = Vec::with_capacity(scene.animations.len());
        for animation in &scene.animations {
            clips.push(import_clip(
                animation,
                Arc::clone(&hierarchy),
                &mut registry,
                settings,
            )?);
        }

        log::debug!(
            "Imported rig: {} nodes, {} bones, {} skinned meshes, {} clips",
            hierarchy.node_count(),
            registry.len(),
            skins.len(),
            clips.len()
        );

        Ok(Self {
            hierarchy,
            registry: Arc::new(registry),
            skins,
            clips,
            settings: *settings,
        })
    }

    #[must_use]
    pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.iter().find(|clip| clip.name == name)
    }

    /// A player for one renderable instance of this asset.
    pub fn create_player(&self) -> Result<AnimationPlayer> {
        AnimationPlayer::from_settings(Arc::clone(&self.registry), &self.settings)
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }
}
