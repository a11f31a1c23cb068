pub mod build;
pub mod doctor;
pub mod inspect;
pub mod install;
pub mod list;
pub mod remove;

use skillpack_core::config::loader::ConfigLoader;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Print a failed command with its error chain and exit 1.
pub fn fail(command: &str, err: &dyn Error) -> ! {
    println!("FAIL skillpack {command}");
    println!("{err}");
    let mut source = err.source();
    while let Some(cause) = source {
        println!("  caused by: {cause}");
        source = cause.source();
    }
    std::process::exit(1);
}

/// Operator cancellation is not a failure, but the install did not happen.
pub fn cancelled() -> ! {
    eprintln!("cancelled");
    std::process::exit(130);
}

/// `--target` when given, else the skills directory of the selected agent.
pub fn skills_dir(
    command: &str,
    target: Option<&Path>,
    config: Option<&Path>,
    agent: Option<&str>,
) -> PathBuf {
    if let Some(dir) = target {
        return dir.to_path_buf();
    }
    match ConfigLoader::load(config, agent) {
        Ok(rc) => rc.skills_dir,
        Err(e) => fail(command, &e),
    }
}
