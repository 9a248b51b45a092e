//! Bridges ECS `crowd_unit` components to crowd units and instance slots

use crate::library::SequenceLibrary;
use crate::registry::InstanceRegistry;
use crate::unit::CrowdUnit;
use herd_core::{EntityId, SequenceId};
use herd_ecs::HerdWorld;
use std::collections::{BTreeMap, HashSet};

/// Name of the component that marks an entity as an animated crowd member
pub const CROWD_UNIT_COMPONENT: &str = "crowd_unit";

const DEFAULT_FADE: f32 = 0.2;

/// A playback request read from a `crowd_unit` component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitRequest {
    pub sequence: SequenceId,
    /// Cross-fade length in seconds
    pub fade: f32,
    pub looping: bool,
    /// Snap to the sequence instead of fading
    pub snap: bool,
}

impl UnitRequest {
    /// Parse a `crowd_unit` table.
    ///
    /// `sequence` may be an id or a name from `library`. Returns `None` when
    /// the field is missing or names an unknown sequence.
    pub fn from_component(component: &toml::Value, library: &SequenceLibrary) -> Option<Self> {
        let sequence = match component.get("sequence")? {
            toml::Value::Integer(raw) => SequenceId(i32::try_from(*raw).ok()?),
            toml::Value::String(name) => match library.resolve(name) {
                Some(info) => info.id,
                None => {
                    log::warn!("crowd_unit references unknown sequence '{}'", name);
                    return None;
                }
            },
            other => {
                log::warn!("crowd_unit.sequence must be an id or a name, got {}", other.type_str());
                return None;
            }
        };

        let fade = component
            .get("fade")
            .and_then(|v| v.as_float().or_else(|| v.as_integer().map(|i| i as f64)))
            .map(|f| f as f32)
            .unwrap_or(DEFAULT_FADE);

        let looping = component
            .get("loop")
            .and_then(|v| v.as_bool())
            .unwrap_or(true);

        let snap = component
            .get("snap")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        Some(Self {
            sequence,
            fade,
            looping,
            snap,
        })
    }
}

#[derive(Debug, Default)]
struct TrackedUnit {
    unit: CrowdUnit,
    /// Last raw `sequence` value seen, so a field is parsed once per edit
    last_value: Option<toml::Value>,
    /// Sequence of the last request issued
    requested: Option<SequenceId>,
}

/// Manages per-entity crowd units, syncing between ECS components and slots
#[derive(Debug, Default)]
pub struct CrowdSync {
    units: BTreeMap<EntityId, TrackedUnit>,
}

impl CrowdSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked crowd entities
    pub fn active_count(&self) -> usize {
        self.units.len()
    }

    pub fn unit(&self, entity_id: EntityId) -> Option<&CrowdUnit> {
        self.units.get(&entity_id).map(|t| &t.unit)
    }

    /// Tracked units in entity order
    pub fn units(&self) -> impl Iterator<Item = (EntityId, &CrowdUnit)> {
        self.units.iter().map(|(id, t)| (*id, &t.unit))
    }

    /// Scan the world for `crowd_unit` components.
    ///
    /// New entities get a unit; a changed `sequence` field issues a
    /// cross-fade (or a snap); entities that were despawned or lost the
    /// component release their slot.
    pub fn sync_from_world(
        &mut self,
        world: &HerdWorld,
        library: &SequenceLibrary,
        registry: &mut dyn InstanceRegistry,
    ) {
        let mut seen = HashSet::new();

        for entity in world.all_entities() {
            let Some(component) = world.get_component(entity.id, CROWD_UNIT_COMPONENT) else {
                continue;
            };
            seen.insert(entity.id);

            let tracked = self.units.entry(entity.id).or_insert_with(|| {
                log::debug!("Tracking crowd unit '{}' ({})", entity.name, entity.id);
                TrackedUnit::default()
            });

            let value = component.get("sequence");
            if value == tracked.last_value.as_ref() {
                continue;
            }
            tracked.last_value = value.cloned();

            let Some(request) = UnitRequest::from_component(component, library) else {
                continue;
            };
            // An id and a name for the same sequence are one request
            if tracked.requested == Some(request.sequence) {
                continue;
            }
            tracked.requested = Some(request.sequence);
            if request.snap {
                tracked.unit.play(request.sequence, request.looping, library);
            } else {
                tracked
                    .unit
                    .cross_fade(request.sequence, request.fade, request.looping, library);
            }
        }

        let gone: Vec<EntityId> = self
            .units
            .keys()
            .filter(|id| !seen.contains(*id))
            .copied()
            .collect();
        for entity_id in gone {
            if let Some(mut tracked) = self.units.remove(&entity_id) {
                log::debug!("Crowd unit {} removed", entity_id);
                tracked.unit.release(registry);
            }
        }
    }

    /// Tick every unit and write its output into the registry
    pub fn advance(&mut self, world: &HerdWorld, registry: &mut dyn InstanceRegistry, dt: f32) {
        for (entity_id, tracked) in &mut self.units {
            let transform = world.get_transform(*entity_id).unwrap_or_default();
            tracked.unit.tick(dt, &transform.to_matrix(), registry);
        }
    }

    /// Release every slot and forget all units (scene transition)
    pub fn clear(&mut self, registry: &mut dyn InstanceRegistry) {
        for tracked in self.units.values_mut() {
            tracked.unit.release(registry);
        }
        self.units.clear();
    }
}
