mod values;
pub mod channel;
pub mod tracks;
pub mod bone;
pub mod registry;
pub mod hierarchy;
pub mod clip;
pub mod player;

pub use values::Interpolatable;
pub use channel::Channel;
pub use tracks::{Keyframe, KeyframeTrack, RotationTrack, ScaleTrack, TranslationTrack};
pub use bone::Bone;
pub use registry::BoneRegistry;
pub use hierarchy::HierarchyNode;
pub use clip::AnimationClip;
pub use player::{AnimationPlayer, PlaybackState};
