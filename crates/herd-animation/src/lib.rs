//! Crowd animation for Herd
//!
//! Each crowd entity plays baked vertex-animation sequences and cross-fades
//! between them. Per frame, a unit publishes two frame samples (current and
//! incoming sequence) plus blend weights into an instance slot that the
//! instanced renderer consumes.

pub mod clock;
pub mod library;
pub mod loader;
pub mod player;
pub mod registry;
pub mod sample;
pub mod sync;
pub mod unit;

use herd_core::Result;
use herd_ecs::HerdWorld;
use herd_runtime::RuntimeSystem;

use library::SequenceLibrary;
use registry::InstanceBuffer;
use sync::CrowdSync;

pub use clock::SequenceClock;
pub use player::{CrossFadePlayer, FadeState};
pub use sample::{FrameSample, BLEND_EPSILON, MINIMUM_ANIMATION_LENGTH};

/// Top-level crowd animation system.
///
/// Implements `RuntimeSystem`: each update bridges `crowd_unit` components
/// through `CrowdSync`, then ticks every unit into `instances`.
pub struct CrowdAnimationSystem {
    pub library: SequenceLibrary,
    pub instances: InstanceBuffer,
    pub sync: CrowdSync,
}

impl CrowdAnimationSystem {
    pub fn new(library: SequenceLibrary) -> Self {
        Self::with_instances(library, InstanceBuffer::new())
    }

    pub fn with_instances(library: SequenceLibrary, instances: InstanceBuffer) -> Self {
        Self {
            library,
            instances,
            sync: CrowdSync::new(),
        }
    }

    /// Release every slot for a scene transition. The library is kept.
    pub fn clear(&mut self) {
        self.sync.clear(&mut self.instances);
    }
}

impl Default for CrowdAnimationSystem {
    fn default() -> Self {
        Self::new(SequenceLibrary::new())
    }
}

impl RuntimeSystem for CrowdAnimationSystem {
    fn initialize(&mut self, world: &mut HerdWorld) -> Result<()> {
        self.sync
            .sync_from_world(world, &self.library, &mut self.instances);
        log::info!(
            "Crowd animation initialized ({} sequences, {} units)",
            self.library.len(),
            self.sync.active_count()
        );
        Ok(())
    }

    fn update(&mut self, world: &mut HerdWorld, dt: f64) -> Result<()> {
        self.sync
            .sync_from_world(world, &self.library, &mut self.instances);
        self.sync.advance(world, &mut self.instances, dt as f32);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.clear();
        log::info!("Crowd animation shut down");
        Ok(())
    }

    fn name(&self) -> &str {
        "crowd_animation"
    }
}
