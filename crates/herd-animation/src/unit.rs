//! Per-entity driver connecting a cross-fade player to an instance slot

use crate::clock::SequenceClock;
use crate::library::SequenceLookup;
use crate::player::CrossFadePlayer;
use crate::registry::{InstanceRegistry, SlotId};
use crate::sample::FrameSample;
use herd_core::{Mat4, SequenceId};

/// One animated crowd member.
///
/// Owns its player by value. The registry and the sequence lookup are
/// borrowed per call, so a unit never holds on to shared state.
#[derive(Debug, Clone, Default)]
pub struct CrowdUnit {
    player: CrossFadePlayer,
    slot: Option<SlotId>,
    output: [FrameSample; 2],
}

impl CrowdUnit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(&self) -> &CrossFadePlayer {
        &self.player
    }

    /// Slot allocated in the registry, once the unit has ticked
    pub fn slot(&self) -> Option<SlotId> {
        self.slot
    }

    /// `[current, next]` samples computed by the most recent tick
    pub fn output(&self) -> &[FrameSample; 2] {
        &self.output
    }

    /// Request a cross-fade to `sequence` over `fade_length` seconds.
    ///
    /// Returns `false` and leaves the player untouched when `lookup` does not
    /// know the sequence.
    pub fn cross_fade(
        &mut self,
        sequence: SequenceId,
        fade_length: f32,
        looping: bool,
        lookup: &dyn SequenceLookup,
    ) -> bool {
        let Some(clock) = resolve(sequence, lookup) else {
            return false;
        };
        log::debug!(
            "Cross-fading {} -> {} over {:.3}s (loop: {})",
            self.player.current().id,
            sequence,
            fade_length,
            looping
        );
        self.player.cross_fade(clock, looping, fade_length);
        true
    }

    /// Snap to `sequence` without fading. Same lookup rules as `cross_fade`.
    pub fn play(
        &mut self,
        sequence: SequenceId,
        looping: bool,
        lookup: &dyn SequenceLookup,
    ) -> bool {
        let Some(clock) = resolve(sequence, lookup) else {
            return false;
        };
        self.player.play(clock, looping);
        true
    }

    /// Advance by `dt` and publish the result into this unit's slot.
    ///
    /// The slot is allocated lazily; if the registry refuses, the unit still
    /// advances and retries allocation on the next tick.
    pub fn tick(&mut self, dt: f32, transform: &Mat4, registry: &mut dyn InstanceRegistry) {
        if self.slot.is_none() {
            self.slot = registry.allocate_slot(transform);
            match self.slot {
                Some(slot) => log::debug!("Allocated instance slot {}", slot),
                None => log::debug!("Instance registry refused a slot, retrying next tick"),
            }
        }

        self.player.tick(dt);
        self.output = self.player.frame_samples();

        let Some(slot) = self.slot else {
            return;
        };
        match registry.slot_output_mut(slot) {
            Some(record) => {
                record.transform = *transform;
                record.anim = self.output;
            }
            None => {
                log::warn!("Instance slot {} vanished from the registry, reallocating", slot);
                self.slot = None;
            }
        }
    }

    /// Give the slot back to the registry. Safe to call more than once.
    pub fn release(&mut self, registry: &mut dyn InstanceRegistry) {
        if let Some(slot) = self.slot.take() {
            log::debug!("Released instance slot {}", slot);
            registry.release_slot(slot);
        }
    }
}

fn resolve(sequence: SequenceId, lookup: &dyn SequenceLookup) -> Option<SequenceClock> {
    let Some(timing) = lookup.lookup(sequence) else {
        log::warn!("Ignoring request for unknown sequence {}", sequence);
        return None;
    };
    Some(SequenceClock::new(sequence, timing.length, timing.frame_count))
}
