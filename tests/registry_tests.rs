//! BoneRegistry Tests
//!
//! Tests for:
//! - First-seen-wins index assignment
//! - Inverse-bind placeholders and overwrites
//! - Capacity overflow

use glam::{Mat4, Vec3};

use myth_skeletal::animation::BoneRegistry;
use myth_skeletal::errors::SkeletalError;

#[test]
fn same_name_returns_same_index() {
    let mut registry = BoneRegistry::new(8);
    let first = registry.get_or_create_index("hip").unwrap();
    let second = registry.get_or_create_index("hip").unwrap();

    assert_eq!(first, second);
    assert_eq!(registry.len(), 1);
}

#[test]
fn each_new_name_grows_registry_by_one() {
    let mut registry = BoneRegistry::new(8);
    for (expected, name) in ["a", "b", "a", "c", "b", "d"].iter().enumerate() {
        let before = registry.len();
        let index = registry.get_or_create_index(name).unwrap();
        let grew = registry.len() - before;
        assert!(grew <= 1, "step {expected}: grew by {grew}");
        assert_eq!(registry.index_of(name), Some(index));
        assert_eq!(registry.inverse_bind_matrices().len(), registry.len());
    }
    assert_eq!(registry.len(), 4);
}

#[test]
fn mesh_then_animation_keeps_first_seen_order() {
    let mut registry = BoneRegistry::new(8);

    // Mesh importer pass
    for name in ["hip", "spine"] {
        registry.get_or_create_index(name).unwrap();
    }
    // Animation importer pass
    for name in ["spine", "neck"] {
        registry.get_or_create_index(name).unwrap();
    }

    assert_eq!(registry.index_of("hip"), Some(0));
    assert_eq!(registry.index_of("spine"), Some(1));
    assert_eq!(registry.index_of("neck"), Some(2));
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["hip", "spine", "neck"]);
}

#[test]
fn new_bones_get_identity_placeholder() {
    let mut registry = BoneRegistry::new(4);
    let index = registry.get_or_create_index("tail").unwrap();
    assert_eq!(registry.inverse_bind_matrix(index), Some(&Mat4::IDENTITY));
}

#[test]
fn set_inverse_bind_overwrites_placeholder() {
    let mut registry = BoneRegistry::new(4);
    let index = registry.get_or_create_index("head").unwrap();
    let offset = Mat4::from_translation(Vec3::new(0.0, -1.7, 0.0));

    registry.set_inverse_bind_matrix(index, offset).unwrap();
    assert_eq!(registry.inverse_bind_matrix(index), Some(&offset));
    assert_eq!(registry.len(), 1);
}

#[test]
fn set_inverse_bind_rejects_unknown_index() {
    let mut registry = BoneRegistry::new(4);
    registry.get_or_create_index("head").unwrap();

    let err = registry
        .set_inverse_bind_matrix(5, Mat4::IDENTITY)
        .unwrap_err();
    assert!(matches!(
        err,
        SkeletalError::BoneIndexOutOfRange { index: 5, len: 1 }
    ));
}

#[test]
fn overflow_is_reported_not_truncated() {
    let mut registry = BoneRegistry::new(2);
    registry.get_or_create_index("a").unwrap();
    registry.get_or_create_index("b").unwrap();

    // Known names still resolve at capacity
    assert_eq!(registry.get_or_create_index("a").unwrap(), 0);

    let err = registry.get_or_create_index("c").unwrap_err();
    assert!(matches!(
        err,
        SkeletalError::RegistryOverflow { ref name, capacity: 2 } if name == "c"
    ));
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.inverse_bind_matrices().len(), 2);
}

#[test]
fn name_lookup_by_index() {
    let mut registry = BoneRegistry::new(4);
    registry.get_or_create_index("root").unwrap();
    registry.get_or_create_index("leaf").unwrap();

    assert_eq!(registry.name(1), Some("leaf"));
    assert_eq!(registry.name(2), None);
    assert_eq!(registry.index_of("missing"), None);
    assert!(!registry.is_empty());
    assert_eq!(registry.capacity(), 4);
}
