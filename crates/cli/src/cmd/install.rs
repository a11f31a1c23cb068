use skillpack_core::Outcome;
use skillpack_core::bundle::discover_bundles;
use skillpack_core::customize::{Preset, parse_override};
use skillpack_core::install::{InstallReport, Installer};
use std::path::Path;

use super::{cancelled, fail, skills_dir};
use crate::InstallArgs;
use crate::prompt::{DialoguerCollector, is_interactive};

const CMD: &str = "install";

pub fn run(config: Option<&Path>, agent: Option<&str>, args: &InstallArgs) {
    let target = skills_dir(CMD, args.target.as_deref(), config, agent);

    let mut bundles = discover_bundles(&args.source).unwrap_or_else(|e| fail(CMD, &e));
    if !args.skills.is_empty() {
        if let Some(missing) = args.skills.iter().find(|s| !bundles.iter().any(|b| &b.name == *s))
        {
            println!("FAIL skillpack {CMD}");
            println!("skill '{missing}' not found under {}", args.source.display());
            std::process::exit(1);
        }
        bundles.retain(|b| args.skills.contains(&b.name));
    }
    if bundles.is_empty() {
        println!("FAIL skillpack {CMD}");
        println!("no skills found under {}", args.source.display());
        std::process::exit(1);
    }

    let preset = match &args.preset {
        Some(path) => Preset::load(path).unwrap_or_else(|e| fail(CMD, &e)),
        None => Preset::new(),
    };
    let overrides = args
        .set
        .iter()
        .map(|arg| parse_override(arg))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| fail(CMD, &e));

    let source = args
        .source
        .canonicalize()
        .unwrap_or_else(|_| args.source.clone())
        .display()
        .to_string();

    let mut collector = DialoguerCollector::new();
    let mut installer = Installer::new(&target)
        .with_preset(preset)
        .with_overrides(overrides)
        .dry_run(args.dry_run);
    if !args.defaults && is_interactive() {
        installer = installer.with_collector(&mut collector);
    }

    match installer.install_all(&bundles, &source) {
        Ok(Outcome::Done(reports)) => print_reports(&reports, args.dry_run),
        Ok(Outcome::Cancelled) => cancelled(),
        Err(e) => fail(CMD, &e),
    }
}

fn print_reports(reports: &[InstallReport], dry_run: bool) {
    println!("OK   skillpack {CMD}");
    for report in reports {
        let kind = if report.customized { "customized" } else { "copied" };
        println!(
            "{} -> {} ({kind}, {} files)",
            report.name,
            report.destination.display(),
            report.files.len()
        );
        if dry_run {
            for file in &report.files {
                println!("  would write {}", file.display());
            }
        }
    }
}
