//! Animation Settings
//!
//! Tunables shared by the importer and the player.
//!
//! ```rust,ignore
//! use myth_skeletal::AnimationSettings;
//!
//! // Defaults: 200 bones, 4 influences per vertex, 25 ticks per second
//! let settings = AnimationSettings::default();
//!
//! // Or from a JSON document; missing fields keep their defaults
//! let settings = AnimationSettings::from_json(r#"{ "max_bones": 128 }"#)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SkeletalError};

/// Hard ceiling on per-vertex bone influences, matching the four-wide
/// joint/weight vertex attributes.
pub const MAX_BONE_INFLUENCE: usize = 4;

/// Default number of skinning matrices per player.
pub const DEFAULT_MAX_BONES: usize = 200;

/// Rate used when an imported clip does not report one.
pub const DEFAULT_TICKS_PER_SECOND: f32 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Registry capacity and length of every player's skinning buffer.
    pub max_bones: usize,
    /// Influences kept per vertex, at most [`MAX_BONE_INFLUENCE`].
    pub max_influences: usize,
    /// Replaces non-positive ticks-per-second values reported by imported clips.
    pub default_ticks_per_second: f32,
}

impl Default for AnimationSettings {
    #[inline]
    fn default() -> Self {
        Self {
            max_bones: DEFAULT_MAX_BONES,
            max_influences: MAX_BONE_INFLUENCE,
            default_ticks_per_second: DEFAULT_TICKS_PER_SECOND,
        }
    }
}

impl AnimationSettings {
    /// Parses settings from JSON and validates them.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_bones == 0 {
            return Err(SkeletalError::InvalidSettings(
                "max_bones must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_BONE_INFLUENCE).contains(&self.max_influences) {
            return Err(SkeletalError::InvalidSettings(format!(
                "max_influences must be within 1..={MAX_BONE_INFLUENCE}, got {}",
                self.max_influences
            )));
        }
        if !self.default_ticks_per_second.is_finite() || self.default_ticks_per_second <= 0.0 {
            return Err(SkeletalError::InvalidSettings(format!(
                "default_ticks_per_second must be positive, got {}",
                self.default_ticks_per_second
            )));
        }
        Ok(())
    }
}
