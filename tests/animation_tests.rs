//! Keyframe & Bone Tests
//!
//! Tests for:
//! - KeyframeTrack sampling (single sample, linear, segment clamping)
//! - Zero-length segments
//! - Spherical rotation interpolation
//! - Bone local transform composition order (T * R * S)

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Quat, Vec3};

use myth_skeletal::animation::{
    Bone, Channel, Interpolatable, Keyframe, KeyframeTrack, RotationTrack, ScaleTrack,
    TranslationTrack,
};
use myth_skeletal::errors::SkeletalError;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_track(keys: &[(f32, Vec3)]) -> KeyframeTrack<Vec3> {
    let samples = keys.iter().map(|&(t, v)| Keyframe::new(t, v)).collect();
    KeyframeTrack::new("bone", Channel::Translation, samples).unwrap()
}

fn quat_track(keys: &[(f32, Quat)]) -> KeyframeTrack<Quat> {
    let samples = keys.iter().map(|&(t, v)| Keyframe::new(t, v)).collect();
    KeyframeTrack::new("bone", Channel::Rotation, samples).unwrap()
}

// ============================================================================
// KeyframeTrack: Single Sample
// ============================================================================

#[test]
fn single_sample_is_constant_for_all_time() {
    let value = Vec3::new(1.0, -2.0, 3.0);
    let track = vec3_track(&[(4.0, value)]);

    for t in [-100.0, 0.0, 3.99, 4.0, 4.01, 1e6] {
        assert_eq!(track.sample(t), value, "t={t}");
    }
}

#[test]
fn single_rotation_sample_is_constant() {
    let q = Quat::from_rotation_x(0.3);
    let track = quat_track(&[(0.0, q)]);
    assert!(track.sample(123.0).abs_diff_eq(q, EPSILON));
}

// ============================================================================
// KeyframeTrack: Linear Interpolation
// ============================================================================

#[test]
fn linear_vec3_midpoint() {
    let track = vec3_track(&[(0.0, Vec3::ZERO), (1.0, Vec3::new(10.0, 20.0, 30.0))]);
    let val = track.sample(0.5);
    assert!(approx(val.x, 5.0));
    assert!(approx(val.y, 10.0));
    assert!(approx(val.z, 15.0));
}

#[test]
fn linear_exact_keyframes() {
    let track = vec3_track(&[
        (0.0, Vec3::splat(0.0)),
        (1.0, Vec3::splat(10.0)),
        (2.0, Vec3::splat(20.0)),
    ]);
    assert!(approx(track.sample(0.0).x, 0.0));
    assert!(approx(track.sample(1.0).x, 10.0));
    assert!(approx(track.sample(1.5).x, 15.0));
}

#[test]
fn time_past_last_sample_clamps_to_last_segment() {
    let track = vec3_track(&[(0.0, Vec3::ZERO), (10.0, Vec3::X * 10.0)]);
    assert!(approx(track.sample(10.0).x, 10.0));
    assert!(approx(track.sample(25.0).x, 10.0));
}

#[test]
fn time_before_first_sample_clamps_to_first_segment() {
    let track = vec3_track(&[(1.0, Vec3::X * 10.0), (2.0, Vec3::X * 20.0)]);
    assert!(approx(track.sample(0.0).x, 10.0));
}

#[test]
fn unsorted_keys_sample_like_sorted_keys() {
    let sorted = vec3_track(&[(0.0, Vec3::ZERO), (1.0, Vec3::X), (2.0, Vec3::Y)]);
    let shuffled = vec3_track(&[(2.0, Vec3::Y), (0.0, Vec3::ZERO), (1.0, Vec3::X)]);
    for i in 0..=20 {
        let t = i as f32 * 0.1;
        assert!(sorted.sample(t).abs_diff_eq(shuffled.sample(t), EPSILON), "t={t}");
    }
}

// ============================================================================
// KeyframeTrack: Zero-Length Segments
// ============================================================================

#[test]
fn duplicate_timestamp_returns_later_sample() {
    // [1, 1) is empty, so t=1 falls outside every segment and clamps to the
    // zero-length last segment, whose later sample wins.
    let track = vec3_track(&[(0.0, Vec3::ZERO), (1.0, Vec3::X), (1.0, Vec3::Y)]);

    let at_boundary = track.sample(1.0);
    assert!(at_boundary.is_finite());
    assert!(at_boundary.abs_diff_eq(Vec3::Y, EPSILON), "got {at_boundary}");

    let past_end = track.sample(1.5);
    assert!(past_end.abs_diff_eq(Vec3::Y, EPSILON), "got {past_end}");
}

#[test]
fn duplicate_timestamp_in_middle_is_skipped() {
    let track = vec3_track(&[
        (0.0, Vec3::ZERO),
        (1.0, Vec3::X),
        (1.0, Vec3::Y),
        (2.0, Vec3::Z),
    ]);
    assert!(track.sample(1.0).abs_diff_eq(Vec3::Y, EPSILON));
    assert!(track.sample(1.5).abs_diff_eq(Vec3::Y.lerp(Vec3::Z, 0.5), EPSILON));
}

// ============================================================================
// Rotation: Spherical Interpolation
// ============================================================================

#[test]
fn rotation_midpoint_is_spherical() {
    // 0° and 180° about +Y, written so the two quaternions have a zero dot product
    let start = Quat::IDENTITY;
    let end = Quat::from_xyzw(0.0, 1.0, 0.0, 0.0);
    let track = quat_track(&[(0.0, start), (1.0, end)]);

    let mid = track.sample(0.5);
    let expected = Quat::from_rotation_y(FRAC_PI_2);
    assert!(mid.abs_diff_eq(expected, 1e-4), "got {mid:?}");

    // A component-wise blend would have length ~0.707
    assert!(approx(mid.length(), 1.0));
}

#[test]
fn rotation_angle_is_monotonic_within_segment() {
    let start = Quat::IDENTITY;
    let end = Quat::from_rotation_y(2.5);
    let total = start.angle_between(end);
    let track = quat_track(&[(0.0, start), (1.0, end)]);

    let mut previous = 0.0_f32;
    for i in 0..=20 {
        let t = i as f32 / 20.0;
        let angle = track.sample(t).angle_between(start);
        assert!(angle + 1e-4 >= previous, "t={t}: {angle} < {previous}");
        assert!(angle <= total + 1e-4, "t={t}: overshoot {angle} > {total}");
        previous = angle;
    }
}

#[test]
fn rotation_takes_shortest_arc() {
    let start = Quat::from_rotation_z(0.2);
    // Same orientation as `from_rotation_z(0.6)` but in the opposite hemisphere
    let end = -Quat::from_rotation_z(0.6);
    let mid = Quat::interpolate_linear(start, end, 0.5);
    assert!(mid.abs_diff_eq(Quat::from_rotation_z(0.4), 1e-4), "got {mid:?}");
}

#[test]
fn rotation_result_is_normalized() {
    let track = quat_track(&[
        (0.0, Quat::from_rotation_x(0.1)),
        (1.0, Quat::from_rotation_y(PI * 0.75)),
    ]);
    for i in 0..=10 {
        let q = track.sample(i as f32 / 10.0);
        assert!(approx(q.length(), 1.0), "t={}: |q|={}", i as f32 / 10.0, q.length());
    }
}

#[test]
fn nan_rotation_is_rejected() {
    let samples = vec![
        Keyframe::new(0.0, Quat::IDENTITY),
        Keyframe::new(1.0, Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0)),
    ];
    let err = KeyframeTrack::new("wrist", Channel::Rotation, samples).unwrap_err();
    assert!(matches!(
        err,
        SkeletalError::NonFiniteKeyframe { ref bone, channel: Channel::Rotation, index: 1 }
            if bone == "wrist"
    ));
}

#[test]
fn zero_length_rotation_is_rejected() {
    let samples = vec![
        Keyframe::new(0.0, Quat::from_xyzw(0.0, 0.0, 0.0, 0.0)),
        Keyframe::new(1.0, Quat::IDENTITY),
    ];
    let err = KeyframeTrack::new("wrist", Channel::Rotation, samples).unwrap_err();
    assert!(matches!(err, SkeletalError::NonFiniteKeyframe { index: 0, .. }));
}

#[test]
fn validated_rotation_track_samples_finite_values() {
    let track = quat_track(&[
        (0.0, Quat::from_rotation_x(0.5)),
        (1.0, Quat::from_rotation_y(1.0)),
    ]);
    for i in 0..=10 {
        assert!(track.sample(i as f32 / 10.0).is_finite());
    }
}

// ============================================================================
// Bone
// ============================================================================

#[test]
fn bone_composes_translation_rotation_scale() {
    let mut bone = Bone::new(
        "arm",
        3,
        TranslationTrack::constant(Vec3::X),
        RotationTrack::constant(Quat::from_rotation_z(FRAC_PI_2)),
        ScaleTrack::constant(Vec3::splat(2.0)),
    );

    let local = bone.evaluate_local_transform(0.0);

    // Scale first, then rotate about the origin, then translate
    let p = local.transform_point3(Vec3::X);
    assert!(p.abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), EPSILON), "got {p}");
    assert_eq!(bone.local_transform(), local);
    assert_eq!(bone.index(), 3);
}

#[test]
fn bone_local_transform_starts_as_identity() {
    let bone = Bone::rest("hip", 0);
    assert_eq!(bone.local_transform(), Mat4::IDENTITY);
}

#[test]
fn bone_channels_are_sampled_independently() {
    let translation = vec3_track(&[(0.0, Vec3::ZERO), (10.0, Vec3::X * 10.0)]);
    let scale = KeyframeTrack::new(
        "spine",
        Channel::Scale,
        vec![Keyframe::new(0.0, Vec3::ONE), Keyframe::new(2.0, Vec3::splat(3.0))],
    )
    .unwrap();
    let mut bone = Bone::new(
        "spine",
        1,
        translation,
        RotationTrack::constant(Quat::IDENTITY),
        scale,
    );

    let local = bone.evaluate_local_transform(1.0);
    let expected = Mat4::from_translation(Vec3::X) * Mat4::from_scale(Vec3::splat(2.0));
    assert!(local.abs_diff_eq(expected, EPSILON));
    assert!(approx(bone.end_time(), 10.0));
}

#[test]
fn bone_evaluation_is_pure_in_time() {
    let mut bone = Bone::new(
        "neck",
        2,
        vec3_track(&[(0.0, Vec3::ZERO), (4.0, Vec3::Y * 4.0)]),
        quat_track(&[(0.0, Quat::IDENTITY), (4.0, Quat::from_rotation_x(1.0))]),
        ScaleTrack::constant(Vec3::ONE),
    );

    let first = bone.evaluate_local_transform(1.5);
    let _ = bone.evaluate_local_transform(3.0);
    let again = bone.evaluate_local_transform(1.5);
    assert!(first.abs_diff_eq(again, EPSILON));
}
