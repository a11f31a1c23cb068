//! Top-level install operation.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::bundle::SkillBundle;
use crate::customize::{AnswerCache, Collector, Mode, Preset, Schema, ValueMap, resolve};
use crate::ledger::{Ledger, LedgerEntry};
use crate::outcome::Outcome;
use crate::templates::{RenderOptions, copy_passthrough, render_bundle};

use super::InstallError;

/// What one bundle install produced.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallReport {
    pub name: String,
    /// Directory the skill was (or would be) written to.
    pub destination: PathBuf,
    pub customized: bool,
    /// Resolved values, for customized installs.
    pub values: Option<ValueMap>,
    /// Files written, relative to `destination`.
    pub files: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Installs bundles into one skills directory.
///
/// Without a collector, variables without a preset value take their
/// defaults. With one, the operator is asked and answers are cached for
/// the remaining bundles of the same [`Installer::install_all`] call.
pub struct Installer<'c> {
    skills_dir: PathBuf,
    preset: Option<Preset>,
    overrides: Vec<(String, String)>,
    dry_run: bool,
    collector: Option<&'c mut dyn Collector>,
    cache: AnswerCache,
}

impl<'c> Installer<'c> {
    pub fn new(skills_dir: &Path) -> Self {
        Self {
            skills_dir: skills_dir.to_path_buf(),
            preset: None,
            overrides: Vec::new(),
            dry_run: false,
            collector: None,
            cache: AnswerCache::new(),
        }
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = Some(preset);
        self
    }

    /// `KEY=VALUE` pairs applied over the preset, typed per bundle schema.
    pub fn with_overrides(mut self, overrides: Vec<(String, String)>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_collector(mut self, collector: &'c mut dyn Collector) -> Self {
        self.collector = Some(collector);
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Install several bundles in order, sharing one answer cache.
    ///
    /// The cache is cleared first. Stops at the first error; on cancellation
    /// nothing further is installed and no ledger entry is written for the
    /// bundle being resolved.
    pub fn install_all(
        &mut self,
        bundles: &[SkillBundle],
        source: &str,
    ) -> Result<Outcome<Vec<InstallReport>>, InstallError> {
        self.cache.clear();

        let mut reports = Vec::with_capacity(bundles.len());
        for bundle in bundles {
            match self.install(bundle, source)? {
                Outcome::Done(report) => reports.push(report),
                Outcome::Cancelled => return Ok(Outcome::Cancelled),
            }
        }
        Ok(Outcome::Done(reports))
    }

    /// Install one bundle.
    pub fn install(
        &mut self,
        bundle: &SkillBundle,
        source: &str,
    ) -> Result<Outcome<InstallReport>, InstallError> {
        validate_name(&bundle.name)?;
        let destination = self.skills_dir.join(&bundle.name);
        guard_same_location(bundle, &destination)?;

        let (values, files) = match &bundle.config {
            Some(config) => {
                let schema = Schema::load(config)?;
                let values = match self.resolve(&schema)? {
                    Outcome::Done(values) => values,
                    Outcome::Cancelled => {
                        info!("install of '{}' cancelled", bundle.name);
                        return Ok(Outcome::Cancelled);
                    }
                };

                // A template that fails to render must leave the previous install intact.
                let planned = RenderOptions::install().dry_run(true);
                let mut files = render_bundle(&bundle.root, &destination, &values, planned)?;

                if !self.dry_run {
                    self.clear_destination(&destination)?;
                    let options = RenderOptions::install();
                    files = render_bundle(&bundle.root, &destination, &values, options)?;
                }
                (Some(values), files)
            }
            None if self.dry_run => {
                (None, copy_passthrough(&bundle.root, &destination, &HashSet::new(), true)?)
            }
            None => (None, self.copy_staged(bundle, &destination)?),
        };

        if !self.dry_run {
            let mut entry = LedgerEntry::new(&bundle.name, source).with_files(files.clone());
            if let Some(values) = &values {
                entry = entry.with_values(values.clone());
            }
            Ledger::load(&self.skills_dir)?.record(entry)?;
            info!("installed '{}' into {}", bundle.name, destination.display());
        }

        Ok(Outcome::Done(InstallReport {
            name: bundle.name.clone(),
            destination,
            customized: values.is_some(),
            values,
            files,
            dry_run: self.dry_run,
        }))
    }

    fn resolve(&mut self, schema: &Schema) -> Result<Outcome<ValueMap>, InstallError> {
        let preset = match &self.preset {
            Some(p) => p.with_overrides(schema, &self.overrides)?,
            None => Preset::new().with_overrides(schema, &self.overrides)?,
        };
        let preset = (!preset.is_empty()).then_some(&preset);

        let mode = match self.collector.as_deref_mut() {
            Some(collector) => Mode::Interactive { collector, cache: &mut self.cache },
            None => Mode::Defaults,
        };

        Ok(resolve(schema, preset, mode)?)
    }

    /// Copy a plain bundle next to its destination, then swap it in.
    ///
    /// The previous install is only removed once the copy has succeeded.
    fn copy_staged(
        &self,
        bundle: &SkillBundle,
        destination: &Path,
    ) -> Result<Vec<PathBuf>, InstallError> {
        let staging = self.skills_dir.join(format!(".{}.staging", bundle.name));
        self.clear_destination(&staging)?;
        fs::create_dir_all(&staging)
            .map_err(|e| InstallError::Stage { path: staging.clone(), source: e })?;

        let files = match copy_passthrough(&bundle.root, &staging, &HashSet::new(), false) {
            Ok(files) => files,
            Err(e) => {
                let _ = fs::remove_dir_all(&staging);
                return Err(e.into());
            }
        };

        self.clear_destination(destination)?;
        fs::rename(&staging, destination)
            .map_err(|e| InstallError::Stage { path: destination.to_path_buf(), source: e })?;
        Ok(files)
    }

    /// Remove a previous install so the new one fully replaces it.
    fn clear_destination(&self, destination: &Path) -> Result<(), InstallError> {
        if self.dry_run || !destination.exists() {
            return Ok(());
        }
        debug!("clearing previous install at {}", destination.display());
        fs::remove_dir_all(destination)
            .map_err(|e| InstallError::Clear { path: destination.to_path_buf(), source: e })
    }
}

/// Reject names that would escape the skills directory or collide with
/// hidden entries in it, such as the ledger file.
pub(crate) fn validate_name(name: &str) -> Result<(), InstallError> {
    let bad = name.is_empty()
        || name.starts_with('.')
        || name.contains('/')
        || name.contains('\\');
    if bad {
        return Err(InstallError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn guard_same_location(bundle: &SkillBundle, destination: &Path) -> Result<(), InstallError> {
    let Ok(src) = bundle.root.canonicalize() else {
        return Ok(());
    };
    let dst = match destination.canonicalize() {
        Ok(dst) => dst,
        Err(_) => match destination.parent().map(Path::canonicalize) {
            Some(Ok(parent)) => parent.join(&bundle.name),
            _ => return Ok(()),
        },
    };
    if dst == src || src.starts_with(&dst) || dst.starts_with(&src) {
        return Err(InstallError::SameLocation(bundle.name.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_like_names() {
        assert!(validate_name("lint-helper").is_ok());
        assert!(validate_name("..").is_err());
        assert!(validate_name(Ledger::FILE).is_err());
        assert!(validate_name(".hidden").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("").is_err());
    }
}
