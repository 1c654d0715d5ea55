//! Error Types
//!
//! This module defines the error types used throughout the skeletal animation core.
//!
//! # Overview
//!
//! The main error type [`SkeletalError`] only covers structural failures that are
//! detected while an asset is being imported:
//! - Bone registry capacity violations
//! - Malformed keyframe data
//! - Skin weights that reference missing vertices
//! - Configuration errors
//!
//! Conditions that can be recovered during playback (no active clip, a query time
//! outside every keyframe segment, zero-length segments, hierarchy nodes that have
//! no animated bone) never surface as errors. They degrade to a sensible default
//! and are reported through the `log` facade instead.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, SkeletalError>`.
//!
//! ```rust,ignore
//! use myth_skeletal::errors::{SkeletalError, Result};
//!
//! fn load_rig() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::animation::Channel;

/// The main error type for the skeletal animation core.
#[derive(Error, Debug)]
pub enum SkeletalError {
    // ========================================================================
    // Bone Registry Errors
    // ========================================================================
    /// Registering `name` would grow the registry past its fixed capacity.
    ///
    /// Fatal for the asset load: truncating the bone set would corrupt skinning
    /// for every vertex weighted to the dropped bones.
    #[error("Bone registry overflow: cannot register '{name}', capacity is {capacity} bones")]
    RegistryOverflow {
        /// The bone name that did not fit
        name: String,
        /// The maximum number of bones the registry accepts
        capacity: usize,
    },

    /// A bone index that the registry never handed out.
    #[error("Bone index out of range: {index} (registry holds {len} bones)")]
    BoneIndexOutOfRange {
        /// The invalid index
        index: usize,
        /// Number of registered bones
        len: usize,
    },

    /// The registry holds more bones than a player's output buffer.
    #[error("Registry holds {bones} bones but the skinning buffer capacity is {capacity}")]
    CapacityMismatch {
        /// Number of registered bones
        bones: usize,
        /// Output matrix capacity
        capacity: usize,
    },

    // ========================================================================
    // Keyframe Errors
    // ========================================================================
    /// A keyframe track must contain at least one sample.
    #[error("Empty {channel} track for bone '{bone}'")]
    EmptyTrack {
        /// Bone the track belongs to
        bone: String,
        /// Transform component the track drives
        channel: Channel,
    },

    /// A keyframe timestamp or value is NaN or infinite, or a rotation is zero-length.
    #[error("Non-finite keyframe in {channel} track of bone '{bone}' (sample {index})")]
    NonFiniteKeyframe {
        /// Bone the track belongs to
        bone: String,
        /// Transform component the track drives
        channel: Channel,
        /// Position of the offending sample
        index: usize,
    },

    // ========================================================================
    // Mesh Skin Errors
    // ========================================================================
    /// A bone weight references a vertex outside the mesh.
    #[error("Mesh '{mesh}': bone weight references vertex {vertex}, mesh has {count} vertices")]
    VertexOutOfRange {
        /// Mesh name
        mesh: String,
        /// Referenced vertex id
        vertex: u32,
        /// Number of vertices in the mesh
        count: usize,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Settings failed validation.
    #[error("Invalid animation settings: {0}")]
    InvalidSettings(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias for `Result<T, SkeletalError>`.
pub type Result<T> = std::result::Result<T, SkeletalError>;
