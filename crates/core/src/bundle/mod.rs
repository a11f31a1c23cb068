//! Skill bundles: directories identified by a `SKILL.md` marker.
//!
//! ```text
//! my-skill/
//! ├── SKILL.md               marker, frontmatter gives name/description
//! ├── reference.md           copied verbatim
//! └── customize/
//!     ├── config.toml        schema (makes the bundle customizable)
//!     └── SKILL.md.jinja     rendered to SKILL.md, shadowing the plain copy
//! ```

pub mod discovery;
pub mod manifest;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use discovery::discover_bundles;
pub use manifest::{SkillManifest, parse_manifest};

/// File whose presence makes a directory a bundle root.
pub const MARKER_FILE: &str = "SKILL.md";

/// Subdirectory holding the schema and templates.
pub const CUSTOMIZE_DIR: &str = "customize";

/// Schema document inside [`CUSTOMIZE_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("no SKILL.md found in {0}")]
    NotABundle(String),

    #[error("source path does not exist: {0}")]
    MissingSource(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid SKILL.md frontmatter: {0}")]
    Manifest(#[from] serde_yaml::Error),

    #[error("failed to walk {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),
}

/// A bundle found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillBundle {
    pub root: PathBuf,
    /// Frontmatter `name`, else the directory name.
    pub name: String,
    pub description: Option<String>,
    /// Path of `customize/config.toml` when the bundle is customizable.
    pub config: Option<PathBuf>,
}

impl SkillBundle {
    pub fn load(root: &Path) -> Result<Self, BundleError> {
        let marker = root.join(MARKER_FILE);
        if !marker.is_file() {
            return Err(BundleError::NotABundle(root.display().to_string()));
        }

        let content = fs::read_to_string(&marker)
            .map_err(|e| BundleError::Io { path: marker.clone(), source: e })?;
        let manifest = parse_manifest(&content)?;

        let name = manifest
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| dir_name(root));

        let config = root.join(CUSTOMIZE_DIR).join(CONFIG_FILE);
        let config = config.is_file().then_some(config);

        Ok(Self { root: root.to_path_buf(), name, description: manifest.description, config })
    }
}

fn dir_name(root: &Path) -> String {
    root.canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(root)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("skill")
        .to_string()
}
