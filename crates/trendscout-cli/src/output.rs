//! Writing report files and append-only history snapshots.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

/// Serializes `value` as pretty-printed JSON at `path`, creating parent
/// directories as needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }

    let body = serde_json::to_string_pretty(value).context("serializing report")?;
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;

    tracing::info!(path = %path.display(), "report written");
    Ok(())
}

/// Copies the given report files into `dir`, a dated history directory.
/// Existing snapshots for the same date are overwritten file by file, never
/// deleted wholesale.
pub fn snapshot(dir: &Path, files: &[&Path]) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating history directory {}", dir.display()))?;

    for file in files {
        let name = file
            .file_name()
            .with_context(|| format!("snapshot source has no file name: {}", file.display()))?;
        fs::copy(file, dir.join(name))
            .with_context(|| format!("copying {} into {}", file.display(), dir.display()))?;
    }

    tracing::info!(dir = %dir.display(), files = files.len(), "history snapshot saved");
    Ok(())
}
