//! File enumeration for rendering: templates under `customize/` and the
//! passthrough files of the bundle root.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use crate::bundle::CUSTOMIZE_DIR;

/// Suffix marking a template file. Stripped to form the output path.
pub const TEMPLATE_SUFFIX: &str = ".jinja";

/// Files never copied from a bundle root: packaging manifests and dependency
/// folders. Names starting with `.` are skipped as well.
const NON_DISTRIBUTABLE: &[&str] =
    &["package.json", "package-lock.json", "pnpm-lock.yaml", "yarn.lock", "node_modules"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    /// Full path to the template file.
    pub path: PathBuf,
    /// Path of the rendered file, relative to the output root.
    pub output: PathBuf,
}

#[derive(Debug, Error)]
pub enum TemplateDiscoveryError {
    #[error("failed to read directory {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),
}

/// Find every template below `customize_dir`, recursively.
///
/// A missing directory yields no templates. Results are sorted by output path.
pub fn discover_templates(
    customize_dir: &Path,
) -> Result<Vec<TemplateInfo>, TemplateDiscoveryError> {
    if !customize_dir.is_dir() {
        return Ok(vec![]);
    }

    let mut out = Vec::new();

    for entry in WalkDir::new(customize_dir).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            TemplateDiscoveryError::WalkError(customize_dir.display().to_string(), e)
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let rel = path.strip_prefix(customize_dir).unwrap_or(path);
        if let Some(output) = output_from_relative(rel) {
            out.push(TemplateInfo { path: path.to_path_buf(), output });
        }
    }

    out.sort_by(|a, b| a.output.cmp(&b.output));
    Ok(out)
}

/// List the files of a bundle root that are copied verbatim, as paths
/// relative to `bundle_root`, in walk order.
///
/// Skips the customization directory, hidden entries and non-distributable
/// files. Symlinks are not followed.
pub fn discover_passthrough(bundle_root: &Path) -> Result<Vec<PathBuf>, TemplateDiscoveryError> {
    let mut out = Vec::new();

    for entry in WalkDir::new(bundle_root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e))
    {
        let entry = entry.map_err(|e| {
            TemplateDiscoveryError::WalkError(bundle_root.display().to_string(), e)
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        out.push(path.strip_prefix(bundle_root).unwrap_or(path).to_path_buf());
    }

    Ok(out)
}

fn is_excluded(entry: &DirEntry) -> bool {
    // Never filter the root directory (depth 0)
    if entry.depth() == 0 {
        return false;
    }

    let name = entry.file_name().to_string_lossy();

    if name.starts_with('.') || NON_DISTRIBUTABLE.contains(&name.as_ref()) {
        return true;
    }

    entry.depth() == 1 && entry.file_type().is_dir() && name == CUSTOMIZE_DIR
}

fn output_from_relative(rel: &Path) -> Option<PathBuf> {
    let name = rel.file_name()?.to_str()?;
    let stem = name.strip_suffix(TEMPLATE_SUFFIX)?;
    if stem.is_empty() {
        return None;
    }
    Some(rel.with_file_name(stem))
}
