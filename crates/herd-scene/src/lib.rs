//! Herd Scene - TOML crowd scenes
//!
//! Loads crowd entities into a `HerdWorld` and exposes the scene's timeline
//! of playback commands.

mod format;
mod loader;
mod timeline;

pub use format::{EntityDef, SceneFile, SceneMetadata, TimelineCommand};
pub use loader::{load_scene, load_scene_string};
pub use timeline::Timeline;
