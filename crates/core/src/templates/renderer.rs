//! Bundle rendering.
//!
//! Two phases over one bundle:
//!
//! 1. every template under `customize/` is rendered to its output path
//!    (suffix stripped) below the output root; those paths are *claimed*;
//! 2. every other distributable file of the bundle root is copied verbatim,
//!    unless its relative path was claimed in phase 1.
//!
//! The returned list holds template outputs in processing order followed by
//! copied files in walk order. A dry run returns the same list and writes
//! nothing.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::bundle::CUSTOMIZE_DIR;
use crate::customize::ValueMap;

use super::discovery::{TemplateDiscoveryError, discover_passthrough, discover_templates};
use super::engine::TemplateEngine;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Discovery(#[from] TemplateDiscoveryError),

    #[error("failed to render template {path}: {source:#}")]
    Template {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Run phase 2 (verbatim copy of non-template files).
    pub copy_passthrough: bool,
    /// Report intended writes without touching the filesystem.
    pub dry_run: bool,
}

impl RenderOptions {
    /// Full install rendering: templates plus passthrough files.
    pub fn install() -> Self {
        Self { copy_passthrough: true, dry_run: false }
    }

    /// Templates only, used to sync a bundle with its own defaults.
    pub fn templates_only() -> Self {
        Self { copy_passthrough: false, dry_run: false }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Render a bundle into `output_root`. Returns written paths relative to it.
pub fn render_bundle(
    bundle_root: &Path,
    output_root: &Path,
    values: &ValueMap,
    options: RenderOptions,
) -> Result<Vec<PathBuf>, RenderError> {
    let engine = TemplateEngine::new();
    let customize_dir = bundle_root.join(CUSTOMIZE_DIR);
    let templates = discover_templates(&customize_dir)?;

    // Render everything before the first write so a broken template leaves
    // the output root untouched.
    let mut rendered = Vec::with_capacity(templates.len());
    for tpl in &templates {
        let source = fs::read_to_string(&tpl.path)
            .map_err(|e| RenderError::Read { path: tpl.path.clone(), source: e })?;

        let name = tpl.path.strip_prefix(bundle_root).unwrap_or(&tpl.path);
        let content = engine
            .render(&name.to_string_lossy(), &source, values)
            .map_err(|e| RenderError::Template { path: tpl.path.clone(), source: e })?;

        rendered.push((tpl.output.clone(), content));
    }

    let mut written = Vec::with_capacity(rendered.len());
    let mut claimed = HashSet::with_capacity(rendered.len());

    for (rel, content) in rendered {
        if !options.dry_run {
            write_file(&output_root.join(&rel), content.as_bytes())?;
        }
        debug!("rendered {}", rel.display());
        claimed.insert(rel.clone());
        written.push(rel);
    }

    if options.copy_passthrough {
        written.extend(copy_passthrough(bundle_root, output_root, &claimed, options.dry_run)?);
    }

    Ok(written)
}

/// Copy the distributable files of `bundle_root` into `output_root`,
/// skipping any relative path in `claimed`.
pub fn copy_passthrough(
    bundle_root: &Path,
    output_root: &Path,
    claimed: &HashSet<PathBuf>,
    dry_run: bool,
) -> Result<Vec<PathBuf>, RenderError> {
    let mut copied = Vec::new();

    for rel in discover_passthrough(bundle_root)? {
        if claimed.contains(&rel) {
            debug!("skipping {}: shadowed by template output", rel.display());
            continue;
        }

        if !dry_run {
            let dest = output_root.join(&rel);
            ensure_parent(&dest)?;
            fs::copy(bundle_root.join(&rel), &dest)
                .map_err(|e| RenderError::Write { path: dest.clone(), source: e })?;
        }
        debug!("copied {}", rel.display());
        copied.push(rel);
    }

    Ok(copied)
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), RenderError> {
    ensure_parent(path)?;
    fs::write(path, content)
        .map_err(|e| RenderError::Write { path: path.to_path_buf(), source: e })
}

fn ensure_parent(path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| RenderError::Write { path: parent.to_path_buf(), source: e })?;
    }
    Ok(())
}
