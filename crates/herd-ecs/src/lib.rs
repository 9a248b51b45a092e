//! Herd ECS - Entity Component System with stable IDs
//!
//! Wraps hecs with stable entity identifiers and dynamic TOML component
//! storage, so scene files can attach `transform` and `crowd_unit` data
//! without a Rust type per component.

mod component;
mod entity;
mod world;

pub use component::DynamicComponents;
pub use entity::EntityInfo;
pub use world::HerdWorld;
