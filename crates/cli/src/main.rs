mod cmd;
mod logging;
mod prompt;

use clap::{Args, Parser, Subcommand};
use skillpack_core::config::loader::ConfigLoader;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "skillpack", version, about = "Install and customize agent skills")]
struct Cli {
    /// Path to config file (default: ~/.config/skillpack/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Agent whose skills directory is used
    #[arg(long, global = true)]
    agent: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Discover skill bundles under SOURCE and install them
    Install(InstallArgs),

    /// Re-render a bundle's templates in place using schema defaults
    Build(BuildArgs),

    /// Show a bundle's customization schema
    Inspect(InspectArgs),

    /// List installed skills
    List(ListArgs),

    /// Remove an installed skill
    Remove(RemoveArgs),

    /// Validate configuration and print resolved paths
    Doctor,
}

#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Bundle directory, or a directory containing bundles
    pub source: PathBuf,

    /// Install into this directory instead of the agent's skills directory
    #[arg(long)]
    pub target: Option<PathBuf>,

    /// Only install the named skills (repeatable)
    #[arg(long = "skill", value_name = "NAME")]
    pub skills: Vec<String>,

    /// TOML file with preset variable values
    #[arg(long, value_name = "FILE")]
    pub preset: Option<PathBuf>,

    /// Set a variable (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Never prompt; use presets and defaults only
    #[arg(long)]
    pub defaults: bool,

    /// Show what would be written without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Bundle directory
    pub bundle: PathBuf,

    /// Show what would be written without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Bundle directory
    pub bundle: PathBuf,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Skills directory to list instead of the agent's
    #[arg(long)]
    pub target: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Installed skill name
    pub name: String,

    /// Skills directory to remove from instead of the agent's
    #[arg(long)]
    pub target: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // Config errors are reported by the commands that need it; logging
    // falls back to its defaults.
    let logging = ConfigLoader::load(cli.config.as_deref(), cli.agent.as_deref())
        .map(|rc| rc.logging)
        .unwrap_or_default();
    logging::init(&logging, cli.verbose);

    let config = cli.config.as_deref();
    let agent = cli.agent.as_deref();

    match cli.command {
        Commands::Install(args) => cmd::install::run(config, agent, &args),
        Commands::Build(args) => cmd::build::run(&args),
        Commands::Inspect(args) => cmd::inspect::run(&args),
        Commands::List(args) => cmd::list::run(config, agent, &args),
        Commands::Remove(args) => cmd::remove::run(config, agent, &args),
        Commands::Doctor => cmd::doctor::run(config, agent),
    }
}
