//! Frame sampling and blend weights written to instance records
//!
//! The instanced renderer does not evaluate time itself: for each of the two
//! sequence slots it reads a sequence id, two baked frame indices, the
//! fraction between them and the slot's share of the final pose.

use crate::clock::SequenceClock;
use herd_core::SequenceId;
use serde::{Deserialize, Serialize};

/// Frame spacing used for sequences with fewer than two frames (one frame
/// at 30 fps), so frame derivation never divides by zero.
pub const MINIMUM_ANIMATION_LENGTH: f32 = 1.0 / 30.0;

/// Smallest fade length used as a blend denominator
pub const BLEND_EPSILON: f32 = 0.001;

/// Sampling parameters for one sequence slot of an instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSample {
    pub sequence: SequenceId,
    pub prev_frame: u32,
    pub next_frame: u32,
    /// Fraction of the way from `prev_frame` to `next_frame`, in `[0, 1]`
    pub frame_lerp: f32,
    /// Contribution of this slot to the blended pose, in `[0, 1]`
    pub blend_weight: f32,
}

impl FrameSample {
    pub fn with_blend_weight(mut self, weight: f32) -> Self {
        self.blend_weight = weight;
        self
    }
}

impl Default for FrameSample {
    fn default() -> Self {
        Self {
            sequence: SequenceId::NONE,
            prev_frame: 0,
            next_frame: 0,
            frame_lerp: 0.0,
            blend_weight: 0.0,
        }
    }
}

/// Seconds between two baked frames of `clock`'s sequence
pub fn frame_interval(clock: &SequenceClock) -> f32 {
    if clock.frame_count > 1 && clock.length > 0.0 {
        clock.length / (clock.frame_count - 1) as f32
    } else {
        MINIMUM_ANIMATION_LENGTH
    }
}

/// Project a clock onto its two bounding frames.
///
/// `blend_weight` is left at 0; weights depend on the fade state and are
/// filled in by the caller (see [`blend_weights`]).
pub fn sample_clock(clock: &SequenceClock) -> FrameSample {
    let interval = frame_interval(clock);
    let frame = (clock.elapsed / interval).floor();
    let frame_lerp = ((clock.elapsed - frame * interval) / interval).clamp(0.0, 1.0);

    let last = i64::from(clock.frame_count.saturating_sub(1));
    let frame = frame as i64;
    let prev_frame = frame.clamp(0, last) as u32;
    let next_frame = frame.saturating_add(1).clamp(0, last) as u32;

    FrameSample {
        sequence: clock.id,
        prev_frame,
        next_frame,
        frame_lerp,
        blend_weight: 0.0,
    }
}

/// Blend weights for `[current, next]`.
///
/// When both slots play the same sequence the current one takes the full
/// weight. Otherwise the current slot fades out linearly with the remaining
/// fade time. The two weights always sum to exactly 1.
pub fn blend_weights(
    current: &SequenceClock,
    next: &SequenceClock,
    fade_time: f32,
    fade_duration: f32,
) -> [f32; 2] {
    if current.id == next.id {
        return [1.0, 0.0];
    }
    let weight = (fade_time / fade_duration.max(BLEND_EPSILON)).clamp(0.0, 1.0);
    [weight, 1.0 - weight]
}
