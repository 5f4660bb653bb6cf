use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ff_core::FormFlowError;
use walkdir::WalkDir;

use crate::{map_cli_snapshot_path, map_cli_snapshot_read, map_cli_snapshot_scan};

const SNAPSHOT_EXTENSIONS: [&str; 2] = ["xhtml", "xml"];

pub(crate) fn read_snapshot(path: &str) -> Result<String, FormFlowError> {
    let path = Path::new(path);
    if !path.is_file() {
        return Err(FormFlowError::new(
            "CLI_SNAPSHOT_NOT_FOUND",
            format!("snapshot does not exist: {}", path.display()),
        ));
    }
    fs::read_to_string(path).map_err(map_cli_snapshot_read)
}

pub(crate) fn resolve_snapshots_dir(snapshots_dir: &str) -> Result<PathBuf, FormFlowError> {
    let path = PathBuf::from(snapshots_dir);
    let absolute = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map_err(map_cli_snapshot_path)?
            .join(path)
    };

    if !absolute.exists() {
        return Err(FormFlowError::new(
            "CLI_SNAPSHOTS_NOT_FOUND",
            format!("snapshots-dir does not exist: {}", absolute.display()),
        ));
    }

    if !absolute.is_dir() {
        return Err(FormFlowError::new(
            "CLI_SNAPSHOTS_NOT_DIR",
            format!("snapshots-dir is not a directory: {}", absolute.display()),
        ));
    }

    Ok(absolute)
}

fn is_snapshot_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| SNAPSHOT_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Snapshot files under `snapshots_dir`, keyed by their `/`-separated
/// relative path so batch output is ordered the same on every platform.
pub(crate) fn collect_snapshots(
    snapshots_dir: &Path,
) -> Result<BTreeMap<String, PathBuf>, FormFlowError> {
    let mut snapshots = BTreeMap::new();

    for entry in WalkDir::new(snapshots_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() || !is_snapshot_file(entry.path()) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(snapshots_dir)
            .map_err(map_cli_snapshot_scan)?
            .to_string_lossy()
            .replace('\\', "/");
        snapshots.insert(relative, entry.path().to_path_buf());
    }

    if snapshots.is_empty() {
        return Err(FormFlowError::new(
            "CLI_SNAPSHOTS_EMPTY",
            format!(
                "No .xhtml/.xml files under {}",
                snapshots_dir.display()
            ),
        ));
    }

    Ok(snapshots)
}
