use glam::Mat4;
use rustc_hash::FxHashMap;

use crate::errors::{Result, SkeletalError};

/// Maps bone names to dense indices and inverse-bind matrices.
///
/// Shared by the mesh importer and the animation importer of one asset so that
/// the bone ids baked into vertices and the slots of the skinning buffer agree.
/// Indices are assigned in discovery order (first-seen-wins) and the registry
/// never shrinks.
///
/// Mutation is only meant for the serialized import phase; afterwards the
/// registry is frozen behind an `Arc` and read by players.
#[derive(Debug, Clone)]
pub struct BoneRegistry {
    name_to_index: FxHashMap<String, usize>,
    // Discovery order: names[i] has index i
    names: Vec<String>,
    // Always the same length as `names`
    inverse_bind_matrices: Vec<Mat4>,
    capacity: usize,
}

impl BoneRegistry {
    /// Creates an empty registry accepting at most `capacity` bones.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            name_to_index: FxHashMap::default(),
            names: Vec::new(),
            inverse_bind_matrices: Vec::new(),
            capacity,
        }
    }

    /// Returns the index of `name`, registering it if it is new.
    ///
    /// A new bone gets the next free index and an identity placeholder for its
    /// inverse-bind matrix. Fails with [`SkeletalError::RegistryOverflow`] when
    /// the registry is full.
    pub fn get_or_create_index(&mut self, name: &str) -> Result<usize> {
        if let Some(&index) = self.name_to_index.get(name) {
            return Ok(index);
        }

        if self.names.len() >= self.capacity {
            return Err(SkeletalError::RegistryOverflow {
                name: name.to_string(),
                capacity: self.capacity,
            });
        }

        let index = self.names.len();
        self.name_to_index.insert(name.to_string(), index);
        self.names.push(name.to_string());
        self.inverse_bind_matrices.push(Mat4::IDENTITY);

        log::debug!("Registered bone '{name}' at index {index}");
        Ok(index)
    }

    /// Overwrites the inverse-bind placeholder of a registered bone.
    pub fn set_inverse_bind_matrix(&mut self, index: usize, matrix: Mat4) -> Result<()> {
        let len = self.inverse_bind_matrices.len();
        let slot = self
            .inverse_bind_matrices
            .get_mut(index)
            .ok_or(SkeletalError::BoneIndexOutOfRange { index, len })?;
        *slot = matrix;
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    #[inline]
    #[must_use]
    pub fn inverse_bind_matrix(&self, index: usize) -> Option<&Mat4> {
        self.inverse_bind_matrices.get(index)
    }

    #[inline]
    #[must_use]
    pub fn inverse_bind_matrices(&self) -> &[Mat4] {
        &self.inverse_bind_matrices
    }

    #[inline]
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Bone names in index order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
