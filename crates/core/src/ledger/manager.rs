//! Persistent record of installed skills.

use std::fs;
use std::path::{Path, PathBuf};

use crate::ledger::types::{LedgerEntry, LedgerState};

/// Error type for ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Failed to access ledger {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse ledger {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize ledger: {0}")]
    Serialize(#[from] toml::ser::Error),
}

type Result<T> = std::result::Result<T, LedgerError>;

/// Installed-skill bookkeeping for one skills directory.
///
/// State is stored in `.skillpack.toml` at the root of the skills directory.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    state: LedgerState,
}

impl Ledger {
    /// Ledger file name relative to the skills directory.
    pub const FILE: &'static str = ".skillpack.toml";

    /// Load the ledger of a skills directory.
    ///
    /// A missing file is an empty ledger; nothing is written until a change.
    pub fn load(skills_dir: &Path) -> Result<Self> {
        let path = skills_dir.join(Self::FILE);

        let state = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| LedgerError::Io { path: path.clone(), source: e })?;
            toml::from_str(&content)
                .map_err(|e| LedgerError::Parse { path: path.clone(), source: e })?
        } else {
            LedgerState::default()
        };

        Ok(Self { path, state })
    }

    /// Save current state to disk.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| LedgerError::Io { path: parent.to_path_buf(), source: e })?;
        }

        let content = toml::to_string_pretty(&self.state)?;
        fs::write(&self.path, content)
            .map_err(|e| LedgerError::Io { path: self.path.clone(), source: e })
    }

    /// Insert an entry, replacing any entry with the same name, and save.
    pub fn record(&mut self, entry: LedgerEntry) -> Result<()> {
        match self.state.skills.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.state.skills.push(entry),
        }
        self.state.skills.sort_by(|a, b| a.name.cmp(&b.name));
        self.save()
    }

    /// Remove an entry by name and save. Returns the removed entry.
    pub fn remove(&mut self, name: &str) -> Result<Option<LedgerEntry>> {
        let Some(idx) = self.state.skills.iter().position(|e| e.name == name) else {
            return Ok(None);
        };
        let removed = self.state.skills.remove(idx);
        self.save()?;
        Ok(Some(removed))
    }

    pub fn get(&self, name: &str) -> Option<&LedgerEntry> {
        self.state.skills.iter().find(|e| e.name == name)
    }

    /// All entries, sorted by name.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.state.skills
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customize::{ValueMap, VarValue};
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_empty_and_not_created() {
        let tmp = tempdir().unwrap();
        let ledger = Ledger::load(tmp.path()).unwrap();
        assert!(ledger.entries().is_empty());
        assert!(!tmp.path().join(Ledger::FILE).exists());
    }

    #[test]
    fn record_upserts_by_name() {
        let tmp = tempdir().unwrap();
        let mut ledger = Ledger::load(tmp.path()).unwrap();

        ledger.record(LedgerEntry::new("b", "/src/b")).unwrap();
        ledger.record(LedgerEntry::new("a", "/src/a")).unwrap();
        let mut values = ValueMap::new();
        values.insert("PM", VarValue::from("pnpm"));
        ledger.record(LedgerEntry::new("b", "/src/b2").with_values(values.clone())).unwrap();

        let reloaded = Ledger::load(tmp.path()).unwrap();
        let names: Vec<&str> = reloaded.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);

        let b = reloaded.get("b").unwrap();
        assert_eq!(b.source, "/src/b2");
        assert!(b.customized);
        assert_eq!(b.values.as_ref(), Some(&values));
    }

    #[test]
    fn remove_returns_entry() {
        let tmp = tempdir().unwrap();
        let mut ledger = Ledger::load(tmp.path()).unwrap();
        ledger.record(LedgerEntry::new("a", "/src/a")).unwrap();

        assert!(ledger.remove("a").unwrap().is_some());
        assert!(ledger.remove("a").unwrap().is_none());
        assert!(Ledger::load(tmp.path()).unwrap().entries().is_empty());
    }
}
