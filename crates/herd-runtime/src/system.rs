//! Runtime system trait

use herd_core::Result;
use herd_ecs::HerdWorld;

/// A system ticked by the frame loop.
///
/// Systems are updated in registration order, exactly once per frame, with
/// a non-negative `dt` in seconds.
pub trait RuntimeSystem {
    /// Called once when the system is first registered
    fn initialize(&mut self, world: &mut HerdWorld) -> Result<()>;

    /// Called once per frame
    fn update(&mut self, world: &mut HerdWorld, dt: f64) -> Result<()>;

    /// Called when the system is being shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
