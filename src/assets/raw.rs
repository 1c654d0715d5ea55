//! Decoded scene data handed over by a file-format reader.
//!
//! These types carry no format-specific detail: a reader (glTF, FBX, ...) fills
//! them in and [`SkinnedAsset::import`](crate::assets::SkinnedAsset::import)
//! turns them into runtime structures.

use glam::{Mat4, Quat, Vec3};

/// A node of the source transform hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct RawNode {
    pub name: String,
    pub transform: Mat4,
    pub children: Vec<RawNode>,
}

impl RawNode {
    #[must_use]
    pub fn new(name: impl Into<String>, transform: Mat4) -> Self {
        Self {
            name: name.into(),
            transform,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_child(mut self, child: RawNode) -> Self {
        self.children.push(child);
        self
    }
}

/// Keyframes for one animated node, one `(time, value)` list per component.
/// Times are in clip ticks and in import order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawChannel {
    pub node_name: String,
    pub positions: Vec<(f32, Vec3)>,
    pub rotations: Vec<(f32, Quat)>,
    pub scales: Vec<(f32, Vec3)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawAnimation {
    pub name: String,
    pub duration_in_ticks: f32,
    /// Zero or negative when the source file does not specify a rate.
    pub ticks_per_second: f32,
    pub channels: Vec<RawChannel>,
}

/// One vertex influenced by a mesh bone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawVertexWeight {
    pub vertex_id: u32,
    pub weight: f32,
}

/// A bone as seen from a mesh: its bind-pose offset and the vertices it moves.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMeshBone {
    pub name: String,
    /// Inverse-bind (offset) matrix: mesh space to bone space.
    pub offset_matrix: Mat4,
    pub weights: Vec<RawVertexWeight>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawMesh {
    pub name: String,
    pub vertex_count: usize,
    pub bones: Vec<RawMeshBone>,
}

/// Everything an asset contributes to the skeletal core.
#[derive(Debug, Clone, PartialEq)]
pub struct RawScene {
    pub root: RawNode,
    pub meshes: Vec<RawMesh>,
    pub animations: Vec<RawAnimation>,
}
