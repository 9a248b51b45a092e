//! Playback clock for one in-flight animation sequence

use herd_core::SequenceId;
use serde::Serialize;

/// Time position inside one animation sequence.
///
/// A plain value: copying a clock snapshots its progress. The sentinel
/// clock (`SequenceClock::NONE`) has no sequence, zero length and no frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SequenceClock {
    /// Sequence being played
    pub id: SequenceId,
    /// Seconds into the sequence, kept within `[0, length]` by `tick`
    pub elapsed: f32,
    /// Total duration in seconds
    pub length: f32,
    /// Number of sampled frames baked for the sequence
    pub frame_count: u32,
}

impl SequenceClock {
    pub const NONE: Self = Self {
        id: SequenceId::NONE,
        elapsed: 0.0,
        length: 0.0,
        frame_count: 0,
    };

    /// Clock positioned at the start of a sequence
    pub fn new(id: SequenceId, length: f32, frame_count: u32) -> Self {
        Self {
            id,
            elapsed: 0.0,
            length,
            frame_count,
        }
    }

    /// True when a real sequence is assigned
    pub fn is_assigned(&self) -> bool {
        self.id.is_some()
    }

    /// Advance by `dt` seconds.
    ///
    /// Looping wraps into `[0, length)`; a zero-length sequence stays at 0.
    /// Otherwise time clamps at `length`.
    pub fn tick(&mut self, dt: f32, looping: bool) {
        self.elapsed += dt;
        if looping {
            self.elapsed = if self.length > 0.0 {
                self.elapsed % self.length
            } else {
                0.0
            };
        } else {
            self.elapsed = self.elapsed.min(self.length);
        }
    }
}

impl Default for SequenceClock {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn walk() -> SequenceClock {
        SequenceClock::new(SequenceId(1), 2.0, 5)
    }

    #[test]
    fn new_clock_starts_at_zero() {
        let clock = walk();
        assert_eq!(clock.elapsed, 0.0);
        assert!(clock.is_assigned());
        assert!(!SequenceClock::NONE.is_assigned());
        assert_eq!(SequenceClock::default(), SequenceClock::NONE);
    }

    #[test]
    fn non_looping_clamps_at_end() {
        let mut clock = walk();
        clock.tick(1.5, false);
        assert_eq!(clock.elapsed, 1.5);
        clock.tick(1.5, false);
        assert_eq!(clock.elapsed, 2.0);
        clock.tick(0.25, false);
        assert_eq!(clock.elapsed, 2.0);
    }

    #[test]
    fn looping_wraps() {
        let mut clock = walk();
        clock.tick(2.5, true);
        assert_eq!(clock.elapsed, 0.5);
        clock.tick(1.5, true);
        assert_eq!(clock.elapsed, 0.0);
    }

    #[test]
    fn zero_length_sequences_stay_at_zero() {
        let mut clock = SequenceClock::new(SequenceId(3), 0.0, 1);
        clock.tick(0.7, true);
        assert_eq!(clock.elapsed, 0.0);
        clock.tick(0.7, false);
        assert_eq!(clock.elapsed, 0.0);

        let mut sentinel = SequenceClock::NONE;
        sentinel.tick(1.0, true);
        assert_eq!(sentinel.elapsed, 0.0);
    }

    #[test]
    fn zero_delta_is_a_no_op() {
        let mut clock = walk();
        clock.tick(0.3, false);
        let before = clock;
        clock.tick(0.0, false);
        assert_eq!(clock, before);
    }

    proptest! {
        #[test]
        fn non_looping_never_exceeds_length(
            length in 0.0f32..10.0,
            deltas in prop::collection::vec(0.0f32..3.0, 1..20),
        ) {
            let mut clock = SequenceClock::new(SequenceId(0), length, 10);
            let mut previous = clock.elapsed;
            for dt in deltas {
                clock.tick(dt, false);
                prop_assert!(clock.elapsed <= length);
                prop_assert!(clock.elapsed >= previous);
                previous = clock.elapsed;
            }
        }

        #[test]
        fn looping_stays_within_length(
            length in 0.0f32..10.0,
            deltas in prop::collection::vec(0.0f32..30.0, 1..20),
        ) {
            let mut clock = SequenceClock::new(SequenceId(0), length, 10);
            for dt in deltas {
                clock.tick(dt, true);
                prop_assert!(clock.elapsed >= 0.0);
                if length > 0.0 {
                    prop_assert!(clock.elapsed < length);
                } else {
                    prop_assert_eq!(clock.elapsed, 0.0);
                }
            }
        }
    }
}
