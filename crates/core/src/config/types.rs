use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    /// Agent used when `--agent` is not given.
    pub agent: Option<String>,
    #[serde(default)]
    pub agents: BTreeMap<String, AgentProfile>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct AgentProfile {
    /// Directory the agent loads skills from. Supports `~` and `$VAR`.
    pub skills_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Where the configuration came from; `None` when built-in defaults apply.
    pub source: Option<PathBuf>,
    pub active_agent: String,
    /// Skills directory of the active agent.
    pub skills_dir: PathBuf,
    /// Every known agent and its skills directory, sorted by name.
    pub agents: Vec<(String, PathBuf)>,
    pub logging: LoggingConfig,
}
