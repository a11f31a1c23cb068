use skillpack_core::config::loader::{ConfigLoader, default_config_path};
use std::path::Path;

pub fn run(config: Option<&Path>, agent: Option<&str>) {
    match ConfigLoader::load(config, agent) {
        Ok(rc) => {
            println!("OK   skillpack doctor");
            println!("version: {}", skillpack_core::version());
            match &rc.source {
                Some(path) => println!("path: {}", path.display()),
                None => println!("path: (none, using built-in defaults)"),
            }
            println!("agent: {}", rc.active_agent);
            println!("skills_dir: {}", rc.skills_dir.display());
            for (name, dir) in &rc.agents {
                println!("agents.{name}: {}", dir.display());
            }
            println!("logging.level: {}", rc.logging.level);
            if let Some(file) = &rc.logging.file {
                println!("logging.file: {}", file.display());
            }
        }
        Err(e) => {
            println!("FAIL skillpack doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
