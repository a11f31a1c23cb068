//! Preset answers supplied by the caller.
//!
//! A preset is a flat TOML document mapping variable names to final values:
//!
//! ```toml
//! PACKAGE_MANAGER = "pnpm"
//! STRICT = true
//! LANGUAGES = ["en", "fr"]
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use toml::{Table, Value};

use super::errors::PresetError;
use super::schema::{Schema, VarKind};
use super::value::{VarValue, parse_list};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preset {
    values: HashMap<String, VarValue>,
}

impl Preset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, PresetError> {
        let text = fs::read_to_string(path)
            .map_err(|e| PresetError::Io { path: path.to_path_buf(), source: e })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, PresetError> {
        let table: Table = text.parse()?;
        let mut values = HashMap::with_capacity(table.len());

        for (key, raw) in table {
            let value = match raw {
                Value::String(s) => VarValue::String(s),
                Value::Boolean(b) => VarValue::Bool(b),
                Value::Array(items) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect::<Option<Vec<_>>>()
                    .map(VarValue::List)
                    .ok_or_else(|| PresetError::InvalidValue { key: key.clone() })?,
                _ => return Err(PresetError::InvalidValue { key }),
            };
            values.insert(key, value);
        }

        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&VarValue> {
        self.values.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: VarValue) {
        self.values.insert(name.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Apply command-line `KEY=VALUE` overrides on top of this preset.
    ///
    /// Override text is typed by the variable's kind in `schema`: booleans
    /// accept `true/false/yes/no/1/0`, arrays use the comma list rule. Keys
    /// the schema does not declare are kept as strings.
    pub fn with_overrides(
        &self,
        schema: &Schema,
        overrides: &[(String, String)],
    ) -> Result<Self, PresetError> {
        let mut merged = self.clone();
        for (key, raw) in overrides {
            let kind = schema.get(key).map(|v| v.kind);
            let value = match kind {
                Some(VarKind::Boolean) => VarValue::Bool(parse_bool(key, raw)?),
                Some(VarKind::Array) => VarValue::List(parse_list(raw)),
                Some(VarKind::String | VarKind::Choice) | None => VarValue::String(raw.clone()),
            };
            merged.insert(key.clone(), value);
        }
        Ok(merged)
    }
}

/// Split a `KEY=VALUE` argument. The value may be empty or contain `=`.
pub fn parse_override(arg: &str) -> Result<(String, String), PresetError> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(PresetError::InvalidOverride(arg.to_string())),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, PresetError> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(PresetError::InvalidBoolean { key: key.to_string(), value: raw.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_values() {
        let preset = Preset::parse(
            r#"
PM = "pnpm"
STRICT = false
LANGS = ["en", "fr"]
"#,
        )
        .unwrap();

        assert_eq!(preset.len(), 3);
        assert_eq!(preset.get("PM"), Some(&VarValue::from("pnpm")));
        assert_eq!(preset.get("STRICT"), Some(&VarValue::Bool(false)));
        assert_eq!(preset.get("LANGS"), Some(&VarValue::List(vec!["en".into(), "fr".into()])));
    }

    #[test]
    fn rejects_numbers_and_tables() {
        let err = Preset::parse("PORT = 8080").unwrap_err();
        assert!(matches!(err, PresetError::InvalidValue { ref key } if key == "PORT"));

        let err = Preset::parse("[nested]\nx = 1").unwrap_err();
        assert!(matches!(err, PresetError::InvalidValue { .. }));

        let err = Preset::parse("LANGS = [\"en\", 1]").unwrap_err();
        assert!(matches!(err, PresetError::InvalidValue { ref key } if key == "LANGS"));
    }

    #[test]
    fn parse_override_splits_on_first_equals() {
        assert_eq!(parse_override("A=b=c").unwrap(), ("A".into(), "b=c".into()));
        assert_eq!(parse_override("EMPTY=").unwrap(), ("EMPTY".into(), String::new()));
        assert!(parse_override("novalue").is_err());
        assert!(parse_override("=x").is_err());
    }

    #[test]
    fn parse_bool_variants() {
        assert!(parse_bool("K", "Yes").unwrap());
        assert!(!parse_bool("K", "0").unwrap());
        assert!(parse_bool("K", "maybe").is_err());
    }
}
