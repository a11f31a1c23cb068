use std::path::PathBuf;

use tracing::debug;

use crate::bundle::SkillBundle;
use crate::customize::{Schema, resolve_defaults};
use crate::templates::{RenderOptions, render_bundle};

use super::InstallError;

/// Re-render a bundle's templates in place using schema defaults.
///
/// Keeps the uncustomized copy of a bundle (its own `SKILL.md` and friends)
/// in step with its templates. Only template outputs are written, so running
/// it twice changes nothing the second time.
pub fn sync_defaults(bundle: &SkillBundle, dry_run: bool) -> Result<Vec<PathBuf>, InstallError> {
    let Some(config) = &bundle.config else {
        return Err(InstallError::NotCustomizable(bundle.name.clone()));
    };

    let schema = Schema::load(config)?;
    let values = resolve_defaults(&schema, None)?;
    debug!("syncing '{}' with {} default values", bundle.name, values.len());

    let options = RenderOptions::templates_only().dry_run(dry_run);
    Ok(render_bundle(&bundle.root, &bundle.root, &values, options)?)
}
