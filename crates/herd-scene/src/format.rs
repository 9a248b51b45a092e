//! Scene file format definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root structure of a scene TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    pub scene: SceneMetadata,
    /// Entities by name, in name order so spawn order is stable
    #[serde(default)]
    pub entities: BTreeMap<String, EntityDef>,
    /// Playback requests applied while the scene runs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<TimelineCommand>,
}

/// Scene metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Definition of an entity in a scene file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityDef {
    /// Every table under the entity is a component
    #[serde(flatten)]
    pub components: BTreeMap<String, toml::Value>,
}

impl EntityDef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component(mut self, name: impl Into<String>, data: toml::Value) -> Self {
        self.components.insert(name.into(), data);
        self
    }
}

/// A scheduled `crowd_unit` change.
///
/// ```toml
/// [[commands]]
/// time = 1.5
/// entity = "grunt_01"
/// sequence = "wave"
/// fade = 0.3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineCommand {
    /// Seconds since the scene started
    pub time: f64,
    pub entity: String,
    /// Sequence id or name
    pub sequence: toml::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade: Option<f64>,
    #[serde(default, rename = "loop", skip_serializing_if = "Option::is_none")]
    pub looping: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap: Option<bool>,
}

impl SceneFile {
    /// Create a new scene file
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scene: SceneMetadata {
                name: name.into(),
                version: default_version(),
                description: None,
            },
            entities: BTreeMap::new(),
            commands: Vec::new(),
        }
    }

    /// Add an entity to the scene
    pub fn add_entity(&mut self, name: impl Into<String>, entity: EntityDef) {
        self.entities.insert(name.into(), entity);
    }
}
