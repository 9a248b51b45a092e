//! TOML-based sequence library loading

use crate::library::{SequenceInfo, SequenceLibrary};
use herd_core::{HerdError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct LibraryFile {
    #[serde(default, rename = "sequence")]
    sequences: Vec<SequenceDef>,
}

#[derive(Debug, Deserialize)]
struct SequenceDef {
    id: i32,
    name: String,
    length: f32,
    frames: u32,
}

/// Load a sequence library from a `.seq.toml` file.
///
/// ```toml
/// [[sequence]]
/// id = 0
/// name = "idle"
/// length = 2.0
/// frames = 61
/// ```
pub fn load_library_from_file(path: &Path) -> Result<SequenceLibrary> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        HerdError::LibraryError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    load_library_from_str(&content, path)
}

/// Parse a sequence library from a TOML string. `path` is only used in errors.
pub fn load_library_from_str(content: &str, path: &Path) -> Result<SequenceLibrary> {
    let file: LibraryFile = toml::from_str(content).map_err(|e| {
        HerdError::LibraryError(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    let mut library = SequenceLibrary::new();
    for def in file.sequences {
        library
            .add(SequenceInfo::new(def.id, def.name, def.length, def.frames))
            .map_err(|e| HerdError::LibraryError(format!("{}: {}", path.display(), e)))?;
    }

    log::debug!(
        "Loaded {} sequences from {}",
        library.len(),
        path.display()
    );
    Ok(library)
}
