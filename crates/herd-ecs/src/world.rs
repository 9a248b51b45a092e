//! HerdWorld - ECS world with stable IDs and dynamic components

use crate::component::DynamicComponents;
use crate::entity::EntityInfo;
use bimap::BiMap;
use herd_core::{EntityId, HerdError, Result, Transform, Vec3};
use std::collections::HashMap;

/// The ECS world hosting crowd entities
///
/// Wraps hecs::World with:
/// - Stable EntityId mapping
/// - Dynamic component storage
/// - Named entity lookup
pub struct HerdWorld {
    world: hecs::World,
    /// Bidirectional mapping: EntityId <-> hecs::Entity
    id_map: BiMap<EntityId, hecs::Entity>,
    name_map: HashMap<String, EntityId>,
    components: HashMap<EntityId, DynamicComponents>,
}

impl Default for HerdWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl HerdWorld {
    pub fn new() -> Self {
        Self {
            world: hecs::World::new(),
            id_map: BiMap::new(),
            name_map: HashMap::new(),
            components: HashMap::new(),
        }
    }

    /// Spawn a new entity with a unique name
    pub fn spawn(&mut self, name: impl Into<String>) -> Result<EntityId> {
        let name = name.into();

        if self.name_map.contains_key(&name) {
            return Err(HerdError::DuplicateEntityName(name));
        }

        let entity_id = EntityId::new();
        let hecs_entity = self.world.spawn(());

        self.id_map.insert(entity_id, hecs_entity);
        self.name_map.insert(name, entity_id);
        self.components.insert(entity_id, DynamicComponents::new());

        Ok(entity_id)
    }

    /// Despawn an entity
    pub fn despawn(&mut self, id: EntityId) -> Result<()> {
        let hecs_entity = self
            .id_map
            .get_by_left(&id)
            .copied()
            .ok_or_else(|| HerdError::EntityNotFound(id.to_string()))?;

        self.world
            .despawn(hecs_entity)
            .map_err(|_| HerdError::EntityNotFound(id.to_string()))?;

        self.name_map.retain(|_, v| *v != id);
        self.id_map.remove_by_left(&id);
        self.components.remove(&id);

        Ok(())
    }

    pub fn get_id(&self, name: &str) -> Option<EntityId> {
        self.name_map.get(name).copied()
    }

    pub fn get_name(&self, id: EntityId) -> Option<&str> {
        self.name_map
            .iter()
            .find(|(_, v)| **v == id)
            .map(|(k, _)| k.as_str())
    }

    /// Set a component on an entity
    pub fn set_component(
        &mut self,
        id: EntityId,
        component: &str,
        data: toml::Value,
    ) -> Result<()> {
        let components = self
            .components
            .get_mut(&id)
            .ok_or_else(|| HerdError::EntityNotFound(id.to_string()))?;

        components.set(component, data);
        Ok(())
    }

    /// Set one field of a component on an entity
    pub fn set_field(
        &mut self,
        id: EntityId,
        component: &str,
        field: &str,
        value: toml::Value,
    ) -> Result<()> {
        let components = self
            .components
            .get_mut(&id)
            .ok_or_else(|| HerdError::EntityNotFound(id.to_string()))?;

        components.set_field(component, field, value);
        Ok(())
    }

    /// Remove a component from an entity, returning its data
    pub fn remove_component(&mut self, id: EntityId, component: &str) -> Option<toml::Value> {
        self.components.get_mut(&id).and_then(|c| c.remove(component))
    }

    pub fn get_component(&self, id: EntityId, component: &str) -> Option<&toml::Value> {
        self.components.get(&id).and_then(|c| c.get(component))
    }

    /// Info about all entities, ordered by id (spawn order)
    pub fn all_entities(&self) -> Vec<EntityInfo> {
        let mut infos: Vec<EntityInfo> = self
            .name_map
            .iter()
            .map(|(name, id)| {
                let comp_names = self
                    .components
                    .get(id)
                    .map(|c| c.component_names().into_iter().map(String::from).collect())
                    .unwrap_or_default();
                EntityInfo::new(*id, name.clone()).with_components(comp_names)
            })
            .collect();
        infos.sort_by_key(|info| info.id);
        infos
    }

    pub fn entity_count(&self) -> usize {
        self.name_map.len()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.id_map.contains_left(&id)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.name_map.contains_key(name)
    }

    /// Read an entity's `transform` component.
    ///
    /// Missing fields fall back to identity values; `None` only when the
    /// entity has no `transform` component at all.
    pub fn get_transform(&self, id: EntityId) -> Option<Transform> {
        let transform_data = self.components.get(&id)?.get("transform")?;

        let read = |field: &str, default: Vec3| {
            transform_data
                .get(field)
                .and_then(parse_vec3)
                .unwrap_or(default)
        };

        Some(Transform {
            position: read("position", Vec3::ZERO),
            rotation: read("rotation", Vec3::ZERO),
            scale: read("scale", Vec3::ONE),
        })
    }
}

fn parse_number(value: &toml::Value) -> Option<f32> {
    value
        .as_float()
        .or_else(|| value.as_integer().map(|i| i as f64))
        .map(|f| f as f32)
}

fn parse_vec3(value: &toml::Value) -> Option<Vec3> {
    if let Some(table) = value.as_table() {
        let axis = |key: &str| table.get(key).and_then(parse_number).unwrap_or(0.0);
        return Some(Vec3::new(axis("x"), axis("y"), axis("z")));
    }

    let arr = value.as_array()?;
    if arr.len() < 3 {
        return None;
    }
    Some(Vec3::new(
        parse_number(&arr[0]).unwrap_or(0.0),
        parse_number(&arr[1]).unwrap_or(0.0),
        parse_number(&arr[2]).unwrap_or(0.0),
    ))
}
