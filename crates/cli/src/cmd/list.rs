//! List installed skills from the ledger.

use serde::Serialize;
use skillpack_core::ledger::{Ledger, LedgerEntry};
use std::path::Path;
use tabled::{Table, Tabled, settings::Style};

use super::{fail, skills_dir};
use crate::ListArgs;

const CMD: &str = "list";

#[derive(Tabled)]
struct SkillRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Customized")]
    customized: String,
    #[tabled(rename = "Files")]
    files: usize,
    #[tabled(rename = "Installed")]
    installed: String,
    #[tabled(rename = "Source")]
    source: String,
}

impl From<&LedgerEntry> for SkillRow {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            name: entry.name.clone(),
            customized: if entry.customized { "yes" } else { "no" }.to_string(),
            files: entry.files.len(),
            installed: entry.installed_at.format("%Y-%m-%d %H:%M").to_string(),
            source: entry.source.clone(),
        }
    }
}

#[derive(Serialize)]
struct ListOutput<'a> {
    skills_dir: &'a Path,
    skills: &'a [LedgerEntry],
}

pub fn run(config: Option<&Path>, agent: Option<&str>, args: &ListArgs) {
    let target = skills_dir(CMD, args.target.as_deref(), config, agent);
    let ledger = Ledger::load(&target).unwrap_or_else(|e| fail(CMD, &e));

    if args.json {
        let out = ListOutput { skills_dir: &target, skills: ledger.entries() };
        match serde_json::to_string_pretty(&out) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(CMD, &e),
        }
        return;
    }

    if ledger.entries().is_empty() {
        println!("(no skills installed in {})", target.display());
        return;
    }

    let rows: Vec<SkillRow> = ledger.entries().iter().map(SkillRow::from).collect();
    println!("{}", Table::new(&rows).with(Style::rounded()));
    println!("\nTotal: {} skills", rows.len());
}
