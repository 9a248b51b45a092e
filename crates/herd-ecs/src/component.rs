//! Dynamic component storage

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dynamic components stored as TOML values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DynamicComponents {
    /// Component data: component_name -> field data
    #[serde(flatten)]
    pub data: HashMap<String, toml::Value>,
}

impl DynamicComponents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get component data by name
    pub fn get(&self, component: &str) -> Option<&toml::Value> {
        self.data.get(component)
    }

    /// Set component data, replacing any previous value
    pub fn set(&mut self, component: impl Into<String>, data: toml::Value) {
        self.data.insert(component.into(), data);
    }

    pub fn remove(&mut self, component: &str) -> Option<toml::Value> {
        self.data.remove(component)
    }

    pub fn has(&self, component: &str) -> bool {
        self.data.contains_key(component)
    }

    /// Get all component names, sorted
    pub fn component_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.data.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get a field value from a component
    pub fn get_field(&self, component: &str, field: &str) -> Option<&toml::Value> {
        self.data.get(component).and_then(|v| v.get(field))
    }

    /// Set a field value in a component, creating the component table if needed
    pub fn set_field(&mut self, component: &str, field: &str, value: toml::Value) {
        let comp = self
            .data
            .entry(component.to_string())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));

        if let Some(table) = comp.as_table_mut() {
            table.insert(field.to_string(), value);
        }
    }
}
