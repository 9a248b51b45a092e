//! Sequence registry resolving ids to timing information

use crate::clock::SequenceClock;
use herd_core::{HerdError, Result, SequenceId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Length and frame count of a baked sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SequenceTiming {
    pub length: f32,
    pub frame_count: u32,
}

/// Resolves sequence ids for the cross-fade driver.
///
/// `None` means the id is unknown; callers skip the request.
pub trait SequenceLookup {
    fn lookup(&self, id: SequenceId) -> Option<SequenceTiming>;
}

impl<F> SequenceLookup for F
where
    F: Fn(SequenceId) -> Option<SequenceTiming>,
{
    fn lookup(&self, id: SequenceId) -> Option<SequenceTiming> {
        self(id)
    }
}

/// A named sequence known to the instanced renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceInfo {
    pub id: SequenceId,
    pub name: String,
    /// Duration in seconds
    pub length: f32,
    pub frame_count: u32,
}

impl SequenceInfo {
    pub fn new(
        id: impl Into<SequenceId>,
        name: impl Into<String>,
        length: f32,
        frame_count: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            length,
            frame_count,
        }
    }

    pub fn timing(&self) -> SequenceTiming {
        SequenceTiming {
            length: self.length,
            frame_count: self.frame_count,
        }
    }

    /// A clock at the start of this sequence
    pub fn clock(&self) -> SequenceClock {
        SequenceClock::new(self.id, self.length, self.frame_count)
    }
}

/// Registry of sequences by id, with name lookup
#[derive(Debug, Clone, Default)]
pub struct SequenceLibrary {
    sequences: BTreeMap<SequenceId, SequenceInfo>,
    names: HashMap<String, SequenceId>,
}

impl SequenceLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sequence.
    ///
    /// Ids must be non-negative (negative ids mean "no sequence"), lengths
    /// finite and non-negative, and both ids and names unique.
    pub fn add(&mut self, info: SequenceInfo) -> Result<()> {
        if info.id.is_none() {
            return Err(HerdError::InvalidSequence(format!(
                "'{}' has negative id {}",
                info.name, info.id
            )));
        }
        if !info.length.is_finite() || info.length < 0.0 {
            return Err(HerdError::InvalidSequence(format!(
                "'{}' has invalid length {}",
                info.name, info.length
            )));
        }
        if self.sequences.contains_key(&info.id) {
            return Err(HerdError::DuplicateSequence {
                id: info.id.raw(),
                name: info.name,
            });
        }
        if self.names.contains_key(&info.name) {
            return Err(HerdError::InvalidSequence(format!(
                "name '{}' is used by more than one sequence",
                info.name
            )));
        }

        self.names.insert(info.name.clone(), info.id);
        self.sequences.insert(info.id, info);
        Ok(())
    }

    pub fn get(&self, id: SequenceId) -> Option<&SequenceInfo> {
        self.sequences.get(&id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&SequenceInfo> {
        self.names.get(name).and_then(|id| self.sequences.get(id))
    }

    /// Resolve a reference written as a numeric id or a sequence name
    pub fn resolve(&self, reference: &str) -> Option<&SequenceInfo> {
        match reference.trim().parse::<i32>() {
            Ok(raw) => self.get(SequenceId(raw)),
            Err(_) => self.get_by_name(reference.trim()),
        }
    }

    pub fn contains(&self, id: SequenceId) -> bool {
        self.sequences.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Sequences in id order
    pub fn iter(&self) -> impl Iterator<Item = &SequenceInfo> {
        self.sequences.values()
    }
}

impl SequenceLookup for SequenceLibrary {
    fn lookup(&self, id: SequenceId) -> Option<SequenceTiming> {
        self.get(id).map(SequenceInfo::timing)
    }
}
