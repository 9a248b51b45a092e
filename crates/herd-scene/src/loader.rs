//! Scene loading from TOML files

use crate::format::SceneFile;
use herd_core::{HerdError, Result};
use herd_ecs::HerdWorld;
use std::fs;
use std::path::Path;

/// Load a scene from a TOML file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<(HerdWorld, SceneFile)> {
    let content = fs::read_to_string(path)?;
    load_scene_string(&content)
}

/// Load a scene from a TOML string.
///
/// Entities are spawned in name order. Timeline commands must have a finite,
/// non-negative time, name an entity of the scene and give the sequence as
/// an id or a name.
pub fn load_scene_string(content: &str) -> Result<(HerdWorld, SceneFile)> {
    let scene_file: SceneFile = toml::from_str(content)?;
    let mut world = HerdWorld::new();

    for (name, entity_def) in &scene_file.entities {
        let id = world.spawn(name.clone())?;
        for (comp_name, comp_data) in &entity_def.components {
            world.set_component(id, comp_name, comp_data.clone())?;
        }
    }

    for command in &scene_file.commands {
        if !command.time.is_finite() || command.time < 0.0 {
            return Err(HerdError::SceneError(format!(
                "command for '{}' has invalid time {}",
                command.entity, command.time
            )));
        }
        if !world.contains_name(&command.entity) {
            return Err(HerdError::SceneError(format!(
                "command at {}s targets unknown entity '{}'",
                command.time, command.entity
            )));
        }
        if !(command.sequence.is_integer() || command.sequence.is_str()) {
            return Err(HerdError::SceneError(format!(
                "command at {}s: sequence must be an id or a name",
                command.time
            )));
        }
    }

    log::debug!(
        "Loaded scene '{}' ({} entities, {} commands)",
        scene_file.scene.name,
        world.entity_count(),
        scene_file.commands.len()
    );
    Ok((world, scene_file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_scene_string() {
        let toml_str = r#"
[scene]
name = "Plaza"

[entities.grunt_02.crowd_unit]
sequence = "walk"

[entities.grunt_01.crowd_unit]
sequence = 0
fade = 0.5

[entities.grunt_01.transform]
position = [5, 0, 0]

[entities.fountain.transform]
position = [0, 0, 0]

[[commands]]
time = 0.5
entity = "grunt_02"
sequence = "wave"
"#;

        let (world, scene) = load_scene_string(toml_str).unwrap();

        assert_eq!(scene.scene.name, "Plaza");
        assert_eq!(world.entity_count(), 3);
        assert_eq!(scene.commands.len(), 1);

        let names: Vec<String> = world.all_entities().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["fountain", "grunt_01", "grunt_02"]);

        let grunt = world.get_id("grunt_01").unwrap();
        let unit = world.get_component(grunt, "crowd_unit").unwrap();
        assert_eq!(unit.get("fade").and_then(|v| v.as_float()), Some(0.5));
    }

    #[test]
    fn test_transform_parsing_pipeline() {
        let toml_str = r#"
[scene]
name = "Transform Test"

[entities.left.transform]
position = [-4, 0, 0]

[entities.right.transform]
position = { x = 2.5, y = 1.0, z = -3.5 }
"#;

        let (world, _) = load_scene_string(toml_str).unwrap();

        let left = world.get_transform(world.get_id("left").unwrap()).unwrap();
        assert!((left.position.x - (-4.0)).abs() < 0.001);

        let right = world.get_transform(world.get_id("right").unwrap()).unwrap();
        assert!((right.position.x - 2.5).abs() < 0.001);
        assert!((right.position.y - 1.0).abs() < 0.001);
        assert!((right.position.z - (-3.5)).abs() < 0.001);
    }

    #[test]
    fn reject_bad_commands() {
        let base = "[scene]\nname = \"s\"\n[entities.a.crowd_unit]\nsequence = 0\n";
        let cases = [
            "[[commands]]\ntime = -1.0\nentity = \"a\"\nsequence = 1\n",
            "[[commands]]\ntime = 1.0\nentity = \"b\"\nsequence = 1\n",
            "[[commands]]\ntime = 1.0\nentity = \"a\"\nsequence = 1.5\n",
        ];
        for case in cases {
            let content = format!("{}{}", base, case);
            assert!(
                matches!(load_scene_string(&content), Err(HerdError::SceneError(_))),
                "accepted: {}",
                case
            );
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load_scene("no/such/plaza.scene.toml"),
            Err(HerdError::IoError(_))
        ));
    }
}
