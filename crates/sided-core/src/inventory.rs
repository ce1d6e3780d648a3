//! Listing of configuration files available for comparison

use rustc_hash::FxHashSet;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Extensions treated as configuration files
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".txt", ".conf", ".cfg", ".config", ".ini", ".yml", ".yaml", ".json",
];

/// A configuration file found under the listing root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigFile {
    pub name: String,
    /// Path relative to the listing root
    pub path: PathBuf,
    pub size: u64,
    /// Modification time in unix seconds, when the platform reports one
    pub modified: Option<i64>,
}

fn extension_set(extensions: &[impl AsRef<str>]) -> FxHashSet<String> {
    extensions
        .iter()
        .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

fn has_allowed_extension(path: &Path, allowed: &FxHashSet<String>) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| allowed.contains(&e.to_ascii_lowercase()))
        .unwrap_or(false)
}

fn collect_files(
    dir: &Path,
    base: &Path,
    allowed: &FxHashSet<String>,
    files: &mut Vec<ConfigFile>,
) -> Result<(), std::io::Error> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.file_name().is_some_and(|n| n == ".git") {
            continue;
        }

        // Symlinked directories are not followed
        if entry.file_type()?.is_dir() {
            collect_files(&path, base, allowed, files)?;
        } else if path.is_file() && has_allowed_extension(&path, allowed) {
            let Ok(rel) = path.strip_prefix(base) else {
                continue;
            };
            let metadata = match std::fs::metadata(&path) {
                Ok(m) => m,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "skipping unreadable file");
                    continue;
                }
            };
            let modified = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs() as i64);
            files.push(ConfigFile {
                name: entry.file_name().to_string_lossy().to_string(),
                path: rel.to_path_buf(),
                size: metadata.len(),
                modified,
            });
        }
    }
    Ok(())
}

/// List configuration files below `dir`, sorted by file name (case-insensitive).
/// A missing directory yields an empty list.
pub fn list_config_files(
    dir: &Path,
    extensions: &[impl AsRef<str>],
) -> Result<Vec<ConfigFile>, std::io::Error> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let allowed = extension_set(extensions);
    let mut files = Vec::new();
    collect_files(dir, dir, &allowed, &mut files)?;
    files.sort_by_key(|f| f.name.to_lowercase());
    tracing::debug!(dir = %dir.display(), count = files.len(), "listed config files");
    Ok(files)
}
