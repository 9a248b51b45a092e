//! Sequence library listing

use anyhow::{Context, Result};
use herd_animation::library::SequenceLibrary;
use herd_animation::loader::load_library_from_file;
use herd_animation::sample::frame_interval;
use std::fmt::Write;
use std::path::Path;

pub fn run(library_path: &str, format: &str) -> Result<()> {
    let library = load_library_from_file(Path::new(library_path))
        .with_context(|| format!("Failed to load sequence library: {}", library_path))?;

    println!("{}", render(&library, library_path, format)?);
    Ok(())
}

/// Format `library` as a text table or a JSON array
fn render(library: &SequenceLibrary, library_path: &str, format: &str) -> Result<String> {
    match format {
        "json" => {
            let items: Vec<serde_json::Value> = library
                .iter()
                .map(|info| {
                    serde_json::json!({
                        "id": info.id,
                        "name": info.name,
                        "length": info.length,
                        "frames": info.frame_count,
                        "interval": frame_interval(&info.clock()),
                    })
                })
                .collect();
            Ok(serde_json::to_string_pretty(&items)?)
        }
        "text" => {
            if library.is_empty() {
                return Ok(format!("No sequences in {}", library_path));
            }
            let mut out = String::new();
            writeln!(
                out,
                "{:>4}  {:<20} {:>8} {:>7} {:>9}",
                "ID", "NAME", "LENGTH", "FRAMES", "INTERVAL"
            )?;
            for info in library.iter() {
                writeln!(
                    out,
                    "{:>4}  {:<20} {:>7.3}s {:>7} {:>8.4}s",
                    info.id.raw(),
                    info.name,
                    info.length,
                    info.frame_count,
                    frame_interval(&info.clock())
                )?;
            }
            write!(out, "\n{} sequence(s)", library.len())?;
            Ok(out)
        }
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}
