use glam::{Quat, Vec3};

use crate::animation::Channel;
use crate::animation::values::Interpolatable;
use crate::errors::{Result, SkeletalError};

/// A single timestamped value. Time is in clip ticks, not seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe<T> {
    pub value: T,
    pub time: f32,
}

impl<T> Keyframe<T> {
    #[inline]
    pub const fn new(time: f32, value: T) -> Self {
        Self { value, time }
    }
}

/// Ordered keyframes for one transform component of one bone.
///
/// Invariants upheld by [`KeyframeTrack::new`]:
/// - at least one sample
/// - every timestamp is finite
/// - every value is finite (and non-zero for rotations)
/// - samples are ordered by time, ascending
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    samples: Vec<Keyframe<T>>,
}

pub type TranslationTrack = KeyframeTrack<Vec3>;
pub type RotationTrack = KeyframeTrack<Quat>;
pub type ScaleTrack = KeyframeTrack<Vec3>;

impl<T: Interpolatable> KeyframeTrack<T> {
    /// Builds a validated track.
    ///
    /// `bone` and `channel` are only used to describe failures. Samples that
    /// arrive out of order are stably sorted by time, so samples sharing a
    /// timestamp keep their import order.
    pub fn new(bone: &str, channel: Channel, mut samples: Vec<Keyframe<T>>) -> Result<Self> {
        if samples.is_empty() {
            return Err(SkeletalError::EmptyTrack {
                bone: bone.to_string(),
                channel,
            });
        }

        let invalid = |k: &Keyframe<T>| !k.time.is_finite() || !k.value.is_valid_sample();
        if let Some(index) = samples.iter().position(invalid) {
            return Err(SkeletalError::NonFiniteKeyframe {
                bone: bone.to_string(),
                channel,
                index,
            });
        }

        if !samples.windows(2).all(|w| w[0].time <= w[1].time) {
            log::warn!("{channel} keyframes of bone '{bone}' are not ordered by time, sorting");
            samples.sort_by(|a, b| a.time.total_cmp(&b.time));
        }

        Ok(Self { samples })
    }

    /// A track holding one value for all time.
    #[must_use]
    pub fn constant(value: T) -> Self {
        Self {
            samples: vec![Keyframe::new(0.0, value)],
        }
    }

    #[inline]
    #[must_use]
    pub fn samples(&self) -> &[Keyframe<T>] {
        &self.samples
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`: construction rejects empty tracks.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Timestamp of the last sample.
    #[inline]
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.samples.last().map_or(0.0, |k| k.time)
    }

    /// Finds `i` such that `samples[i].time <= time < samples[i + 1].time`.
    ///
    /// Linear scan in time order; tracks are tens of samples long. Returns
    /// `None` when `time` lies before the first sample, at or after the last
    /// one, or when the track has a single sample.
    #[must_use]
    pub fn segment_index(&self, time: f32) -> Option<usize> {
        self.samples
            .windows(2)
            .position(|w| w[0].time <= time && time < w[1].time)
    }

    /// Samples the track at `time` (ticks).
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        // Fast path: static data (single keyframe)
        if let [only] = self.samples.as_slice() {
            return only.value;
        }

        let index = self.segment_index(time).unwrap_or_else(|| {
            // Playback time is wrapped into [0, duration) before sampling, so a
            // miss here comes from float error around the loop boundary.
            let last_segment = self.samples.len() - 2;
            let clamped = if time < self.samples[0].time {
                0
            } else {
                last_segment
            };
            log::warn!(
                "time {time} outside keyframe range [{}, {}], clamping to segment {clamped}",
                self.samples[0].time,
                self.end_time()
            );
            clamped
        });

        let k0 = &self.samples[index];
        let k1 = &self.samples[index + 1];
        let dt = k1.time - k0.time;

        // Zero-length segment: the later sample wins
        if dt <= 0.0 {
            return k1.value;
        }

        let f = ((time - k0.time) / dt).clamp(0.0, 1.0);
        T::interpolate_linear(k0.value, k1.value, f)
    }
}
