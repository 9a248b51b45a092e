//! Scheduled `crowd_unit` changes

use crate::format::{SceneFile, TimelineCommand};
use herd_core::{HerdError, Result};
use herd_ecs::HerdWorld;

const CROWD_UNIT: &str = "crowd_unit";

impl TimelineCommand {
    /// Write this command into the entity's `crowd_unit` component.
    ///
    /// `fade` and `loop` are only touched when the command sets them and
    /// persist otherwise. `snap` applies to this command alone and is reset
    /// to `false` when omitted. The animation bridge notices the new
    /// `sequence` on its next sync.
    pub fn apply(&self, world: &mut HerdWorld) -> Result<()> {
        let id = world
            .get_id(&self.entity)
            .ok_or_else(|| HerdError::EntityNotFound(self.entity.clone()))?;

        if let Some(fade) = self.fade {
            world.set_field(id, CROWD_UNIT, "fade", toml::Value::Float(fade))?;
        }
        if let Some(looping) = self.looping {
            world.set_field(id, CROWD_UNIT, "loop", toml::Value::Boolean(looping))?;
        }
        let snap = self.snap.unwrap_or(false);
        world.set_field(id, CROWD_UNIT, "snap", toml::Value::Boolean(snap))?;
        world.set_field(id, CROWD_UNIT, "sequence", self.sequence.clone())
    }
}

/// Commands ordered by time, consumed as a clock passes them
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    commands: Vec<TimelineCommand>,
    cursor: usize,
}

impl Timeline {
    /// Commands with equal times keep their file order
    pub fn new(mut commands: Vec<TimelineCommand>) -> Self {
        commands.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            commands,
            cursor: 0,
        }
    }

    pub fn from_scene(scene: &SceneFile) -> Self {
        Self::new(scene.commands.clone())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands not yet consumed
    pub fn remaining(&self) -> usize {
        self.commands.len() - self.cursor
    }

    /// Consume every command scheduled at or before `time`
    pub fn due(&mut self, time: f64) -> &[TimelineCommand] {
        let start = self.cursor;
        while self
            .commands
            .get(self.cursor)
            .is_some_and(|c| c.time <= time)
        {
            self.cursor += 1;
        }
        &self.commands[start..self.cursor]
    }

    /// Apply the commands that became due by `time`, returning how many ran
    pub fn apply_due(&mut self, world: &mut HerdWorld, time: f64) -> Result<usize> {
        let due = self.due(time);
        for command in due {
            log::debug!(
                "t={:.3}s: '{}' -> sequence {}",
                command.time,
                command.entity,
                command.sequence
            );
            command.apply(world)?;
        }
        Ok(due.len())
    }

    /// Rewind to the first command
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(time: f64, entity: &str, sequence: i64) -> TimelineCommand {
        TimelineCommand {
            time,
            entity: entity.to_string(),
            sequence: toml::Value::Integer(sequence),
            fade: None,
            looping: None,
            snap: None,
        }
    }

    #[test]
    fn commands_are_sorted_stably() {
        let mut timeline = Timeline::new(vec![
            command(2.0, "a", 1),
            command(0.5, "b", 2),
            command(2.0, "c", 3),
        ]);
        assert_eq!(timeline.len(), 3);

        assert!(timeline.due(0.1).is_empty());
        let due: Vec<&str> = timeline.due(0.5).iter().map(|c| c.entity.as_str()).collect();
        assert_eq!(due, vec!["b"]);
        let due: Vec<&str> = timeline.due(5.0).iter().map(|c| c.entity.as_str()).collect();
        assert_eq!(due, vec!["a", "c"]);
        assert_eq!(timeline.remaining(), 0);

        timeline.reset();
        assert_eq!(timeline.remaining(), 3);
    }

    #[test]
    fn apply_writes_crowd_unit_fields() {
        let mut world = HerdWorld::new();
        let id = world.spawn("grunt").unwrap();
        world
            .set_component(id, CROWD_UNIT, toml::from_str("sequence = 0\nfade = 0.2").unwrap())
            .unwrap();

        let mut wave = command(1.0, "grunt", 4);
        wave.looping = Some(false);
        wave.apply(&mut world).unwrap();

        let unit = world.get_component(id, CROWD_UNIT).unwrap();
        assert_eq!(unit.get("sequence").and_then(|v| v.as_integer()), Some(4));
        assert_eq!(unit.get("loop").and_then(|v| v.as_bool()), Some(false));
        // Untouched fields survive
        assert_eq!(unit.get("fade").and_then(|v| v.as_float()), Some(0.2));
        assert_eq!(unit.get("snap").and_then(|v| v.as_bool()), Some(false));
    }

    #[test]
    fn snap_does_not_leak_into_later_commands() {
        let mut world = HerdWorld::new();
        let id = world.spawn("grunt").unwrap();

        let mut cheer = command(1.0, "grunt", 4);
        cheer.snap = Some(true);
        cheer.looping = Some(false);
        cheer.apply(&mut world).unwrap();
        let unit = world.get_component(id, CROWD_UNIT).unwrap();
        assert_eq!(unit.get("snap").and_then(|v| v.as_bool()), Some(true));

        command(2.0, "grunt", 1).apply(&mut world).unwrap();
        let unit = world.get_component(id, CROWD_UNIT).unwrap();
        assert_eq!(unit.get("snap").and_then(|v| v.as_bool()), Some(false));
        // `loop` persists until a command sets it
        assert_eq!(unit.get("loop").and_then(|v| v.as_bool()), Some(false));
    }

    #[test]
    fn apply_due_reports_missing_entities() {
        let mut world = HerdWorld::new();
        world.spawn("grunt").unwrap();
        let mut timeline = Timeline::new(vec![command(0.0, "grunt", 1), command(1.0, "ghost", 1)]);

        assert_eq!(timeline.apply_due(&mut world, 0.5).unwrap(), 1);
        assert!(matches!(
            timeline.apply_due(&mut world, 1.0),
            Err(HerdError::EntityNotFound(_))
        ));
    }
}
