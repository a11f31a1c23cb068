use crate::config::types::{ConfigFile, LoggingConfig, ResolvedConfig};
use shellexpand::full;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;

/// Agents known without any configuration file.
const BUILTIN_AGENTS: &[(&str, &str)] =
    &[("claude", "~/.claude/skills"), ("codex", "~/.codex/skills")];

const DEFAULT_AGENT: &str = "claude";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("agent '{0}' not found")]
    AgentNotFound(String),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '{0}'")]
    NoHome(String),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the configuration.
    ///
    /// An explicit `config_path` must exist. When no path is given the default
    /// location is used if present, otherwise built-in agent defaults apply.
    pub fn load(
        config_path: Option<&Path>,
        agent_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let (path, explicit) = match config_path {
            Some(p) => (p.to_path_buf(), true),
            None => (default_config_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            tracing::debug!("no config at {}, using built-in defaults", path.display());
            return Self::resolve(
                None,
                None,
                BTreeMap::new(),
                LoggingConfig::default(),
                agent_override,
            );
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }

        let agents =
            cf.agents.into_iter().map(|(name, prof)| (name, prof.skills_dir)).collect();

        Self::resolve(Some(path), cf.agent, agents, cf.logging, agent_override)
    }

    fn resolve(
        source: Option<PathBuf>,
        configured_agent: Option<String>,
        configured: BTreeMap<String, String>,
        log_cfg: LoggingConfig,
        agent_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        // Built-ins stay available unless the file redefines them.
        let mut raw: BTreeMap<String, String> = BUILTIN_AGENTS
            .iter()
            .map(|(n, d)| ((*n).to_string(), (*d).to_string()))
            .collect();
        raw.extend(configured);

        let mut agents = Vec::with_capacity(raw.len());
        for (name, dir) in raw {
            agents.push((name, expand_path(&dir)?));
        }

        let active = agent_override
            .map(ToOwned::to_owned)
            .or(configured_agent)
            .unwrap_or_else(|| DEFAULT_AGENT.to_string());

        let skills_dir = agents
            .iter()
            .find(|(n, _)| *n == active)
            .map(|(_, p)| p.clone())
            .ok_or_else(|| ConfigError::AgentNotFound(active.clone()))?;

        // Resolve log file path if present
        let logging = if let Some(ref file) = log_cfg.file {
            LoggingConfig {
                level: log_cfg.level.clone(),
                file_level: log_cfg.file_level.clone(),
                file: Some(expand_path(&file.to_string_lossy())?),
            }
        } else {
            log_cfg
        };

        Ok(ResolvedConfig { source, active_agent: active, skills_dir, agents, logging })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("skillpack").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("skillpack").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome(input.to_string()))?;
    Ok(PathBuf::from(expanded.to_string()))
}
