#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Skeletal animation core: keyframe tracks, the bone registry shared by the
//! mesh and animation importers, and a player that turns a clip into a fixed
//! buffer of skinning matrices every tick.

pub mod animation;
pub mod assets;
pub mod errors;
pub mod settings;

pub use animation::{
    AnimationClip, AnimationPlayer, Bone, BoneRegistry, Channel, HierarchyNode, Keyframe,
    KeyframeTrack, PlaybackState,
};
pub use assets::{MeshSkin, SkinnedAsset, VertexInfluences};
pub use errors::{Result, SkeletalError};
pub use settings::AnimationSettings;
