//! Herd Runtime - Frame loop infrastructure
//!
//! - `FrameClock` - produces the per-frame `dt` handed to systems
//! - `RuntimeSystem` - trait for systems ticked once per frame

mod clock;
mod system;

pub use clock::FrameClock;
pub use system::RuntimeSystem;
