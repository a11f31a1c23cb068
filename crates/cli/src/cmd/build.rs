use skillpack_core::bundle::SkillBundle;
use skillpack_core::install::sync_defaults;

use super::fail;
use crate::BuildArgs;

const CMD: &str = "build";

pub fn run(args: &BuildArgs) {
    let bundle = SkillBundle::load(&args.bundle).unwrap_or_else(|e| fail(CMD, &e));
    let written = sync_defaults(&bundle, args.dry_run).unwrap_or_else(|e| fail(CMD, &e));

    println!("OK   skillpack {CMD}");
    let verb = if args.dry_run { "would write" } else { "wrote" };
    for file in written {
        println!("{verb} {}", file.display());
    }
}
