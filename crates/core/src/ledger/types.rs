//! Ledger record types.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::customize::ValueMap;

/// One installed skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Skill name, also the directory name under the skills directory.
    pub name: String,

    /// Where the skill was installed from (path or remote identifier).
    pub source: String,

    /// Whether the customization pipeline produced this install.
    pub customized: bool,

    /// Installation time (UTC)
    pub installed_at: DateTime<Utc>,

    /// Files written, relative to the skill directory
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// Final resolved values, present only for customized installs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<ValueMap>,
}

impl LedgerEntry {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            customized: false,
            installed_at: Utc::now(),
            files: Vec::new(),
            values: None,
        }
    }

    pub fn with_values(mut self, values: ValueMap) -> Self {
        self.customized = true;
        self.values = Some(values);
        self
    }

    pub fn with_files(mut self, files: Vec<PathBuf>) -> Self {
        self.files = files;
        self
    }
}

/// On-disk layout of the ledger file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerState {
    #[serde(default)]
    pub skills: Vec<LedgerEntry>,
}
