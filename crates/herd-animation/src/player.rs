//! Per-entity cross-fade state machine

use crate::clock::SequenceClock;
use crate::sample::{blend_weights, sample_clock, FrameSample};

/// Fade progress of a [`CrossFadePlayer`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeState {
    /// Only `current` contributes to the pose
    Idle,
    /// `next` is fading in; promoted to `current` when `remaining` hits zero.
    /// Both `remaining` and `duration` are positive while in this state.
    Fading {
        next: SequenceClock,
        remaining: f32,
        duration: f32,
    },
}

/// Advances a current sequence and, during a cross-fade, an incoming one.
///
/// The looping flag belongs to the player, not to a sequence: it is only
/// written by `play` (and by a `cross_fade` that falls back to `play`), so a
/// sequence promoted at the end of a fade keeps whatever flag was set before.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossFadePlayer {
    current: SequenceClock,
    looping: bool,
    fade: FadeState,
}

impl CrossFadePlayer {
    /// Player with no sequence assigned
    pub fn new() -> Self {
        Self {
            current: SequenceClock::NONE,
            looping: false,
            fade: FadeState::Idle,
        }
    }

    pub fn current(&self) -> &SequenceClock {
        &self.current
    }

    /// The incoming sequence, or `current` when no fade is in progress
    pub fn next(&self) -> &SequenceClock {
        match &self.fade {
            FadeState::Fading { next, .. } => next,
            FadeState::Idle => &self.current,
        }
    }

    /// Seconds left in the active fade (0 when idle)
    pub fn fade_time(&self) -> f32 {
        match self.fade {
            FadeState::Fading { remaining, .. } => remaining,
            FadeState::Idle => 0.0,
        }
    }

    /// Configured length of the active fade (0 when idle)
    pub fn fade_duration(&self) -> f32 {
        match self.fade {
            FadeState::Fading { duration, .. } => duration,
            FadeState::Idle => 0.0,
        }
    }

    pub fn fade_state(&self) -> &FadeState {
        &self.fade
    }

    pub fn is_fading(&self) -> bool {
        matches!(self.fade, FadeState::Fading { .. })
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Snap to `seq` from its start, cancelling any fade.
    pub fn play(&mut self, seq: SequenceClock, looping: bool) {
        self.looping = looping;
        self.current = seq;
        self.fade = FadeState::Idle;
    }

    /// Start fading from the current sequence to `seq` over `fade` seconds.
    ///
    /// With nothing playing yet this is `play(seq, looping)`. Otherwise the
    /// looping flag is left alone and any fade in progress is replaced. A
    /// fade length that is not positive cuts straight to `seq`.
    pub fn cross_fade(&mut self, seq: SequenceClock, looping: bool, fade: f32) {
        if !self.current.is_assigned() {
            self.play(seq, looping);
            return;
        }

        if fade > 0.0 {
            self.fade = FadeState::Fading {
                next: seq,
                remaining: fade,
                duration: fade,
            };
        } else {
            self.current = seq;
            self.fade = FadeState::Idle;
        }
    }

    /// Advance both sequences by `dt` seconds.
    ///
    /// `current` always advances first with the player's looping flag; the
    /// incoming sequence never loops while fading in.
    pub fn tick(&mut self, dt: f32) {
        self.current.tick(dt, self.looping);

        if let FadeState::Fading {
            next, remaining, ..
        } = &mut self.fade
        {
            *remaining = (*remaining - dt).max(0.0);
            next.tick(dt, false);

            if *remaining <= 0.0 {
                self.current = *next;
                self.fade = FadeState::Idle;
            }
        }
    }

    /// Blend weights for `[current, next]`
    pub fn blend_weights(&self) -> [f32; 2] {
        blend_weights(
            self.current(),
            self.next(),
            self.fade_time(),
            self.fade_duration(),
        )
    }

    /// Frame samples for `[current, next]` with blend weights filled in
    pub fn frame_samples(&self) -> [FrameSample; 2] {
        let [current_weight, next_weight] = self.blend_weights();
        [
            sample_clock(self.current()).with_blend_weight(current_weight),
            sample_clock(self.next()).with_blend_weight(next_weight),
        ]
    }
}

impl Default for CrossFadePlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herd_core::SequenceId;
    use proptest::prelude::*;

    fn walk() -> SequenceClock {
        SequenceClock::new(SequenceId(1), 2.0, 5)
    }

    fn wave() -> SequenceClock {
        SequenceClock::new(SequenceId(2), 1.0, 3)
    }

    #[test]
    fn new_player_is_idle_sentinel() {
        let player = CrossFadePlayer::new();
        assert!(!player.current().is_assigned());
        assert_eq!(player.fade_state(), &FadeState::Idle);
        assert_eq!(player.fade_time(), 0.0);
        assert_eq!(player.fade_duration(), 0.0);
        assert_eq!(player.blend_weights(), [1.0, 0.0]);
    }

    #[test]
    fn play_lands_in_idle() {
        let mut player = CrossFadePlayer::new();
        player.play(walk(), true);
        assert_eq!(player.current().id, SequenceId(1));
        assert_eq!(player.next().id, SequenceId(1));
        assert!(player.is_looping());
        assert!(!player.is_fading());
        assert_eq!(player.blend_weights(), [1.0, 0.0]);
    }

    #[test]
    fn play_cancels_fade_and_restarts() {
        let mut player = CrossFadePlayer::new();
        player.play(walk(), false);
        player.tick(0.5);
        player.cross_fade(wave(), false, 1.0);
        player.tick(0.25);
        player.play(walk(), false);
        assert!(!player.is_fading());
        assert_eq!(player.current().elapsed, 0.0);
        assert_eq!(player.fade_time(), 0.0);
        assert_eq!(player.fade_duration(), 0.0);
    }

    #[test]
    fn scenario_play_then_tick() {
        let mut player = CrossFadePlayer::new();
        player.play(walk(), false);
        player.tick(0.5);

        assert_eq!(player.current().elapsed, 0.5);
        let [current, _] = player.frame_samples();
        assert_eq!(current.prev_frame, 1);
        assert_eq!(current.next_frame, 2);
        assert_eq!(current.frame_lerp, 0.0);
        assert_eq!(current.blend_weight, 1.0);
    }

    #[test]
    fn scenario_cross_fade_half_way_then_complete() {
        let mut player = CrossFadePlayer::new();
        player.play(walk(), false);
        player.tick(0.5);

        player.cross_fade(wave(), false, 1.0);
        player.tick(0.5);
        assert!(player.is_fading());
        assert_eq!(player.fade_time(), 0.5);
        assert_eq!(player.fade_duration(), 1.0);
        assert_eq!(player.blend_weights(), [0.5, 0.5]);
        assert_eq!(player.next().elapsed, 0.5);
        assert_eq!(player.current().elapsed, 1.0);

        player.tick(0.6);
        assert!(!player.is_fading());
        assert_eq!(player.fade_time(), 0.0);
        assert_eq!(player.current().id, SequenceId(2));
        assert_eq!(player.blend_weights(), [1.0, 0.0]);
        // Incoming sequence clamps at its end, it never loops while fading in
        assert_eq!(player.current().elapsed, 1.0);
    }

    #[test]
    fn cross_fade_from_sentinel_is_play() {
        let mut faded = CrossFadePlayer::new();
        faded.cross_fade(walk(), true, 0.75);

        let mut played = CrossFadePlayer::new();
        played.play(walk(), true);

        assert_eq!(faded, played);
        faded.tick(0.4);
        played.tick(0.4);
        assert_eq!(faded, played);
    }

    #[test]
    fn cross_fade_keeps_current_and_loop_flag() {
        let mut player = CrossFadePlayer::new();
        player.play(walk(), true);
        player.tick(0.3);
        player.cross_fade(wave(), false, 1.0);

        assert_eq!(player.current().id, SequenceId(1));
        assert_eq!(player.current().elapsed, 0.3);
        assert_eq!(player.next().id, SequenceId(2));
        assert!(player.is_looping());
    }

    #[test]
    fn newest_cross_fade_wins() {
        let mut player = CrossFadePlayer::new();
        player.play(walk(), false);
        player.cross_fade(wave(), false, 1.0);
        player.tick(0.4);

        let run = SequenceClock::new(SequenceId(7), 3.0, 10);
        player.cross_fade(run, false, 0.5);
        assert_eq!(player.next().id, SequenceId(7));
        assert_eq!(player.next().elapsed, 0.0);
        assert_eq!(player.fade_time(), 0.5);
        assert_eq!(player.fade_duration(), 0.5);

        player.tick(0.5);
        assert_eq!(player.current().id, SequenceId(7));
    }

    #[test]
    fn non_positive_fade_cuts_immediately() {
        let mut player = CrossFadePlayer::new();
        player.play(walk(), true);
        player.tick(0.3);

        player.cross_fade(wave(), false, 0.0);
        assert!(!player.is_fading());
        assert_eq!(player.current().id, SequenceId(2));
        assert_eq!(player.current().elapsed, 0.0);
        assert!(player.is_looping());
        assert_eq!(player.blend_weights(), [1.0, 0.0]);
    }

    #[test]
    fn tiny_fade_uses_epsilon_denominator() {
        let mut player = CrossFadePlayer::new();
        player.play(walk(), false);
        player.cross_fade(wave(), false, 0.0005);
        let [current, next] = player.blend_weights();
        assert!((current - 0.5).abs() < 1e-6);
        assert_eq!(current + next, 1.0);
    }

    #[test]
    fn current_advances_before_promotion() {
        let mut player = CrossFadePlayer::new();
        player.play(walk(), true);
        player.tick(1.9);
        player.cross_fade(wave(), false, 0.2);
        // Crosses the end of `walk` in the same tick that completes the fade;
        // `walk` wraps with the old flag, then `wave` replaces it.
        player.tick(0.3);
        assert_eq!(player.current().id, SequenceId(2));
        assert!((player.current().elapsed - 0.3).abs() < 1e-6);
    }

    #[test]
    fn cross_fade_to_same_sequence_keeps_full_weight() {
        let mut player = CrossFadePlayer::new();
        player.play(walk(), false);
        player.tick(1.0);
        player.cross_fade(walk(), false, 0.5);

        assert!(player.is_fading());
        assert_eq!(player.blend_weights(), [1.0, 0.0]);
        player.tick(0.25);
        assert_eq!(player.next().elapsed, 0.25);

        player.tick(0.25);
        assert!(!player.is_fading());
        assert_eq!(player.current().elapsed, 0.5);
    }

    // Looping is a player-level flag: a sequence that fades in inherits the
    // flag set by the last `play`, whatever `cross_fade` was asked for.
    #[test]
    fn promoted_sequence_inherits_loop_flag() {
        let mut player = CrossFadePlayer::new();
        player.play(walk(), true);
        player.cross_fade(wave(), false, 0.25);
        player.tick(0.25);
        assert_eq!(player.current().id, SequenceId(2));
        assert!(player.is_looping());

        player.tick(1.0);
        // 0.25 + 1.0 wraps on a 1.0s sequence instead of clamping
        assert_eq!(player.current().elapsed, 0.25);
    }

    #[test]
    fn non_looping_fade_inherits_clamp() {
        let mut player = CrossFadePlayer::new();
        player.play(walk(), false);
        player.cross_fade(wave(), true, 0.25);
        player.tick(0.25);
        player.tick(5.0);
        assert!(!player.is_looping());
        assert_eq!(player.current().elapsed, 1.0);
    }

    proptest! {
        #[test]
        fn weights_always_sum_to_one(
            fade in 0.0f32..2.0,
            deltas in prop::collection::vec(0.0f32..0.5, 1..30),
        ) {
            let mut player = CrossFadePlayer::new();
            player.play(walk(), true);
            player.tick(0.2);
            player.cross_fade(wave(), false, fade);
            for dt in deltas {
                player.tick(dt);
                let [current, next] = player.blend_weights();
                prop_assert_eq!(current + next, 1.0);
                prop_assert!((0.0..=1.0).contains(&current));
                prop_assert!((0.0..=1.0).contains(&next));
                prop_assert!(player.fade_time() <= player.fade_duration());
            }
        }

        #[test]
        fn fade_completes_after_its_length(
            fade in 0.01f32..2.0,
            step in 0.01f32..0.25,
        ) {
            let mut player = CrossFadePlayer::new();
            player.play(walk(), false);
            player.cross_fade(wave(), false, fade);
            let mut total = 0.0f32;
            while total < fade {
                player.tick(step);
                total += step;
            }
            // Float accumulation can land a hair short of `fade`
            if player.is_fading() {
                player.tick(step);
            }
            prop_assert!(!player.is_fading());
            prop_assert_eq!(player.current().id, SequenceId(2));
            prop_assert_eq!(player.blend_weights(), [1.0, 0.0]);
        }
    }
}
