use std::path::Path;

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::{BundleError, MARKER_FILE, SkillBundle};

/// Find every bundle below `root`, sorted by path.
///
/// A directory holding [`MARKER_FILE`] is a bundle root and the walk does not
/// descend into it, so bundles never nest. If `root` itself is a bundle it is
/// the only result. Hidden directories and `node_modules` are skipped.
pub fn discover_bundles(root: &Path) -> Result<Vec<SkillBundle>, BundleError> {
    if !root.exists() {
        return Err(BundleError::MissingSource(root.display().to_string()));
    }

    let mut out = Vec::new();
    let mut walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped(e));

    while let Some(entry) = walker.next() {
        let entry =
            entry.map_err(|e| BundleError::WalkError(root.display().to_string(), e))?;

        if !entry.file_type().is_dir() {
            continue;
        }

        if entry.path().join(MARKER_FILE).is_file() {
            debug!("found bundle at {}", entry.path().display());
            out.push(SkillBundle::load(entry.path())?);
            walker.skip_current_dir();
        }
    }

    out.sort_by(|a, b| a.root.cmp(&b.root));
    Ok(out)
}

fn is_skipped(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    entry.file_type().is_dir() && (name.starts_with('.') || name == "node_modules")
}
