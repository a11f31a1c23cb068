//! `SKILL.md` frontmatter.

use serde::Deserialize;

use super::BundleError;

/// The fields of `SKILL.md` frontmatter this crate reads. Others are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SkillManifest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Parse the YAML frontmatter of a `SKILL.md` document.
///
/// Documents without a `---` delimited block give an empty manifest.
pub fn parse_manifest(content: &str) -> Result<SkillManifest, BundleError> {
    let Some(yaml) = frontmatter_block(content) else {
        return Ok(SkillManifest::default());
    };
    if yaml.trim().is_empty() {
        return Ok(SkillManifest::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

fn frontmatter_block(content: &str) -> Option<&str> {
    let trimmed = content.trim_start();
    let after_first = trimmed.strip_prefix("---")?;

    // Skip the newline after opening ---
    let body = after_first
        .strip_prefix('\n')
        .or_else(|| after_first.strip_prefix("\r\n"))?;

    // Look for --- at the start of a line
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(&body[..offset]);
        }
        offset += line.len();
    }
    None
}
