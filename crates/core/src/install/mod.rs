//! Installing bundles into an agent's skills directory.

mod installer;
mod sync;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::bundle::BundleError;
use crate::customize::{PresetError, ResolveError, SchemaError};
use crate::ledger::{Ledger, LedgerEntry, LedgerError};
use crate::templates::RenderError;

pub use installer::{InstallReport, Installer};
pub use sync::sync_defaults;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Preset(#[from] PresetError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("failed to clear {path}: {source}")]
    Clear {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to stage install at {path}: {source}")]
    Stage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("refusing to install '{0}' over its own source directory")]
    SameLocation(String),

    #[error("skill '{0}' has no customize/config.toml")]
    NotCustomizable(String),

    #[error("invalid skill name '{0}'")]
    InvalidName(String),

    #[error("skill '{0}' is not installed")]
    NotInstalled(String),
}

/// Delete an installed skill and its ledger entry.
///
/// A skill directory without a ledger entry is still removed; a name that is
/// neither on disk nor in the ledger is [`InstallError::NotInstalled`].
pub fn uninstall(skills_dir: &Path, name: &str) -> Result<Option<LedgerEntry>, InstallError> {
    installer::validate_name(name)?;

    let dir = skills_dir.join(name);
    let mut ledger = Ledger::load(skills_dir)?;
    let on_disk = dir.is_dir();

    if !on_disk && ledger.get(name).is_none() {
        return Err(InstallError::NotInstalled(name.to_string()));
    }

    if on_disk {
        fs::remove_dir_all(&dir).map_err(|e| InstallError::Clear { path: dir.clone(), source: e })?;
    }
    let entry = ledger.remove(name)?;
    info!("removed skill '{}'", name);
    Ok(entry)
}
