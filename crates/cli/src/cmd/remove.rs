use skillpack_core::install::uninstall;
use std::path::Path;

use super::{fail, skills_dir};
use crate::RemoveArgs;

const CMD: &str = "remove";

pub fn run(config: Option<&Path>, agent: Option<&str>, args: &RemoveArgs) {
    let target = skills_dir(CMD, args.target.as_deref(), config, agent);

    match uninstall(&target, &args.name) {
        Ok(_) => {
            println!("OK   skillpack {CMD}");
            println!("removed {}", target.join(&args.name).display());
        }
        Err(e) => fail(CMD, &e),
    }
}
