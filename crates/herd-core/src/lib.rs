//! Herd Core - Foundational types shared by every Herd crate
//!
//! - `EntityId` - Stable entity identifiers
//! - `SequenceId` - Animation sequence identifiers with a "none" sentinel
//! - `Transform`, `Vec3`, `Mat4` - Spatial types
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{HerdError, Result};
pub use id::{EntityId, SequenceId};
pub use types::{Mat4, Transform, Vec3, MAT4_IDENTITY};
