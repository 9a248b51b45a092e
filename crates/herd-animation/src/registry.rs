//! Instance slots holding per-entity transform and frame samples
//!
//! The batcher reads one [`InstanceRecord`] per live slot. Units allocate a
//! slot on their first tick and release it on teardown.

use crate::sample::FrameSample;
use herd_core::{Mat4, MAT4_IDENTITY};
use serde::Serialize;

/// Slot handle; valid slots are always greater than zero
pub type SlotId = u32;

/// Output of one crowd instance for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InstanceRecord {
    pub transform: Mat4,
    /// `[current, next]` sequence samples
    pub anim: [FrameSample; 2],
}

impl InstanceRecord {
    pub fn new(transform: Mat4) -> Self {
        Self {
            transform,
            anim: [FrameSample::default(); 2],
        }
    }
}

impl Default for InstanceRecord {
    fn default() -> Self {
        Self::new(MAT4_IDENTITY)
    }
}

/// Storage the crowd units write their per-frame output into
pub trait InstanceRegistry {
    /// Reserve a slot initialized with `transform`; `None` if no slot is free
    fn allocate_slot(&mut self, transform: &Mat4) -> Option<SlotId>;

    /// Free a slot. Unknown slots are ignored.
    fn release_slot(&mut self, slot: SlotId);

    fn slot_output_mut(&mut self, slot: SlotId) -> Option<&mut InstanceRecord>;
}

/// Live records packed contiguously for upload
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PackedInstances {
    /// Slot of each record, ascending
    pub slots: Vec<SlotId>,
    pub records: Vec<InstanceRecord>,
}

/// Slab of instance records with slot recycling.
///
/// Slots are only freed through `release_slot`, so a slot stays with the
/// unit that allocated it until that unit lets go.
#[derive(Debug, Clone, Default)]
pub struct InstanceBuffer {
    /// Index `i` holds slot `i + 1`
    slots: Vec<Option<InstanceRecord>>,
    free: Vec<SlotId>,
    live: usize,
    /// Maximum live slots, unbounded when `None`
    limit: Option<usize>,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer that refuses allocation past `limit` live slots
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn get(&self, slot: SlotId) -> Option<&InstanceRecord> {
        let index = slot.checked_sub(1)? as usize;
        self.slots.get(index)?.as_ref()
    }

    /// Live `(slot, record)` pairs in slot order
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &InstanceRecord)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, record)| record.as_ref().map(|r| (i as SlotId + 1, r)))
    }

    /// Copy live records into contiguous arrays
    pub fn pack(&self) -> PackedInstances {
        let mut packed = PackedInstances {
            slots: Vec::with_capacity(self.live),
            records: Vec::with_capacity(self.live),
        };
        for (slot, record) in self.iter() {
            packed.slots.push(slot);
            packed.records.push(*record);
        }
        packed
    }
}

impl InstanceRegistry for InstanceBuffer {
    fn allocate_slot(&mut self, transform: &Mat4) -> Option<SlotId> {
        if self.limit.is_some_and(|limit| self.live >= limit) {
            return None;
        }

        let record = InstanceRecord::new(*transform);
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot as usize - 1] = Some(record);
                slot
            }
            None => {
                self.slots.push(Some(record));
                self.slots.len() as SlotId
            }
        };
        self.live += 1;
        Some(slot)
    }

    fn release_slot(&mut self, slot: SlotId) {
        let Some(index) = slot.checked_sub(1) else {
            return;
        };
        if let Some(entry) = self.slots.get_mut(index as usize) {
            if entry.take().is_some() {
                self.live -= 1;
                self.free.push(slot);
            }
        }
    }

    fn slot_output_mut(&mut self, slot: SlotId) -> Option<&mut InstanceRecord> {
        let index = slot.checked_sub(1)? as usize;
        self.slots.get_mut(index)?.as_mut()
    }
}
