//! Customization schema: bundle metadata plus an ordered list of variables.
//!
//! The schema is read from `customize/config.toml`:
//!
//! ```toml
//! [skill]
//! name = "lint-helper"
//! version = "1.2.0"
//!
//! [variables.PACKAGE_MANAGER]
//! kind = "choice"
//! prompt = "Which package manager?"
//! default = "npm"
//! [[variables.PACKAGE_MANAGER.options]]
//! value = "npm"
//! label = "npm"
//! [[variables.PACKAGE_MANAGER.options]]
//! value = "pnpm"
//! label = "pnpm"
//!
//! [variables.LINT_COMMAND]
//! kind = "string"
//! prompt = "Lint command"
//! default = "${PACKAGE_MANAGER} run lint"
//! ```
//!
//! Declaration order matters: a variable may only interpolate variables
//! declared before it.

use std::fmt;
use std::fs;
use std::path::Path;

use regex::Regex;
use toml::{Table, Value};

use super::errors::SchemaError;
use super::interpolate::referenced_names;
use super::value::VarValue;

/// The kind of a variable, which fixes the shape of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    String,
    Choice,
    Boolean,
    Array,
}

impl VarKind {
    /// Parse a kind name. Accepts `bool` and `array-of-string` as aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(VarKind::String),
            "choice" => Some(VarKind::Choice),
            "boolean" | "bool" => Some(VarKind::Boolean),
            "array" | "array-of-string" => Some(VarKind::Array),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VarKind::String => "string",
            VarKind::Choice => "choice",
            VarKind::Boolean => "boolean",
            VarKind::Array => "array",
        }
    }

    /// Value used when neither a preset nor a default provides one.
    pub fn zero_value(&self) -> VarValue {
        match self {
            VarKind::String | VarKind::Choice => VarValue::String(String::new()),
            VarKind::Boolean => VarValue::Bool(false),
            VarKind::Array => VarValue::List(Vec::new()),
        }
    }

    /// Whether a value has the shape this kind stores.
    pub fn accepts(&self, value: &VarValue) -> bool {
        matches!(
            (self, value),
            (VarKind::String | VarKind::Choice, VarValue::String(_))
                | (VarKind::Boolean, VarValue::Bool(_))
                | (VarKind::Array, VarValue::List(_))
        )
    }
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a `choice` variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Stored value. Never interpolated.
    pub value: String,
    /// Text shown to the operator. May contain `${name}` tokens.
    pub label: String,
}

/// A named, typed customization point.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub kind: VarKind,
    /// Question shown to the operator. May contain `${name}` tokens.
    pub prompt: String,
    /// Longer help text printed before the prompt.
    pub description: Option<String>,
    /// Default value. For `string` and `choice` this is a template string.
    pub default: Option<VarValue>,
    /// Advisory only.
    pub required: bool,
    /// Pattern a non-empty `string` value must match.
    pub validate: Option<Regex>,
    /// Options of a `choice` variable, in declaration order.
    pub options: Vec<ChoiceOption>,
}

impl Variable {
    /// Build a plain `string` variable. Used by tests and builders.
    pub fn string(name: &str, prompt: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: VarKind::String,
            prompt: prompt.to_string(),
            description: None,
            default: None,
            required: false,
            validate: None,
            options: Vec::new(),
        }
    }

    pub fn with_default(mut self, default: impl Into<VarValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Names referenced through `${name}` in the prompt, default and labels.
    pub fn references(&self) -> Vec<String> {
        let mut names = referenced_names(&self.prompt);
        if let Some(VarValue::String(d)) = &self.default {
            names.extend(referenced_names(d));
        }
        for opt in &self.options {
            names.extend(referenced_names(&opt.label));
        }
        let mut seen = std::collections::HashSet::new();
        names.retain(|n| seen.insert(n.clone()));
        names
    }
}

/// Bundle metadata from the `[skill]` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMeta {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// Parsed configuration document.
#[derive(Debug, Clone)]
pub struct Schema {
    pub meta: SkillMeta,
    pub variables: Vec<Variable>,
}

/// A `${name}` token that can never resolve because `name` is declared at
/// or after the variable using it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardReference {
    pub variable: String,
    pub reference: String,
}

impl Schema {
    /// Read and parse a configuration document from disk.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let text = fs::read_to_string(path)
            .map_err(|e| SchemaError::Io { path: path.to_path_buf(), source: e })?;
        Self::parse(&text)
    }

    /// Parse configuration document text.
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        let doc: Table = text.parse()?;

        let meta = parse_meta(doc.get("skill"))?;

        let variables = match doc.get("variables") {
            None => Vec::new(),
            Some(Value::Table(vars)) => vars
                .iter()
                .map(|(name, entry)| parse_variable(name, entry))
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(SchemaError::VariablesNotTable),
        };

        Ok(Self { meta, variables })
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Tokens that refer to variables not declared earlier.
    ///
    /// Such tokens are left as-is during resolution; this only reports them.
    /// Names unknown to the schema entirely are not reported.
    pub fn forward_references(&self) -> Vec<ForwardReference> {
        let mut out = Vec::new();
        for (idx, var) in self.variables.iter().enumerate() {
            for name in var.references() {
                let declared_later = self.variables[idx..].iter().any(|v| v.name == name);
                if declared_later {
                    out.push(ForwardReference {
                        variable: var.name.clone(),
                        reference: name,
                    });
                }
            }
        }
        out
    }
}

fn parse_meta(value: Option<&Value>) -> Result<SkillMeta, SchemaError> {
    let Some(Value::Table(table)) = value else {
        return Err(SchemaError::MissingMeta);
    };

    let name = match table.get("name") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => return Err(SchemaError::MissingMeta),
    };

    Ok(SkillMeta {
        name,
        version: optional_meta_string(table, "version")?,
        description: optional_meta_string(table, "description")?,
    })
}

fn optional_meta_string(table: &Table, field: &'static str) -> Result<Option<String>, SchemaError> {
    match table.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(SchemaError::InvalidMeta { field }),
    }
}

fn parse_variable(name: &str, entry: &Value) -> Result<Variable, SchemaError> {
    let invalid = |message: String| SchemaError::InvalidField {
        variable: name.to_string(),
        message,
    };

    let Value::Table(table) = entry else {
        return Err(invalid("expected a table".into()));
    };

    let kind_raw = table
        .get("kind")
        .or_else(|| table.get("type"))
        .ok_or_else(|| SchemaError::MissingField { variable: name.to_string(), field: "kind" })?;
    let kind_str = kind_raw
        .as_str()
        .ok_or_else(|| invalid("`kind` must be a string".into()))?;
    let kind = VarKind::parse(kind_str).ok_or_else(|| SchemaError::UnknownKind {
        variable: name.to_string(),
        kind: kind_str.to_string(),
    })?;

    let prompt = match table.get("prompt") {
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(invalid("`prompt` must be a string".into())),
        None => {
            return Err(SchemaError::MissingField {
                variable: name.to_string(),
                field: "prompt",
            });
        }
    };

    let description = match table.get("description") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(invalid("`description` must be a string".into())),
    };

    let required = match table.get("required") {
        None => false,
        Some(Value::Boolean(b)) => *b,
        Some(_) => return Err(invalid("`required` must be a boolean".into())),
    };

    let default = match table.get("default") {
        None => None,
        Some(raw) => Some(parse_default(kind, raw).map_err(invalid)?),
    };

    let validate = match (table.get("validate"), kind) {
        (None, _) => None,
        (Some(Value::String(pattern)), VarKind::String) => Some(
            Regex::new(pattern)
                .map_err(|e| invalid(format!("invalid `validate` pattern: {e}")))?,
        ),
        (Some(Value::String(_)), other) => {
            tracing::warn!(
                "variable '{name}': `validate` only applies to string variables, ignored for {other}"
            );
            None
        }
        (Some(_), _) => return Err(invalid("`validate` must be a string".into())),
    };

    let options = if kind == VarKind::Choice {
        parse_options(name, table.get("options"))?
    } else {
        Vec::new()
    };

    Ok(Variable {
        name: name.to_string(),
        kind,
        prompt,
        description,
        default,
        required,
        validate,
        options,
    })
}

fn parse_default(kind: VarKind, raw: &Value) -> Result<VarValue, String> {
    match (kind, raw) {
        (VarKind::String | VarKind::Choice, Value::String(s)) => Ok(VarValue::String(s.clone())),
        (VarKind::Boolean, Value::Boolean(b)) => Ok(VarValue::Bool(*b)),
        (VarKind::Array, Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(ToOwned::to_owned))
            .collect::<Option<Vec<_>>>()
            .map(VarValue::List)
            .ok_or_else(|| "`default` must be an array of strings".to_string()),
        (VarKind::Array, _) => Err("`default` must be an array of strings".into()),
        (VarKind::Boolean, _) => Err("`default` must be a boolean".into()),
        (VarKind::String | VarKind::Choice, _) => Err("`default` must be a string".into()),
    }
}

fn parse_options(name: &str, raw: Option<&Value>) -> Result<Vec<ChoiceOption>, SchemaError> {
    let items = match raw {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(SchemaError::InvalidField {
                variable: name.to_string(),
                message: "`options` must be an array of tables".into(),
            });
        }
        None => {
            return Err(SchemaError::MissingField {
                variable: name.to_string(),
                field: "options",
            });
        }
    };

    if items.is_empty() {
        return Err(SchemaError::InvalidField {
            variable: name.to_string(),
            message: "`options` must not be empty".into(),
        });
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let field = |key: &str| item.get(key).and_then(Value::as_str).map(ToOwned::to_owned);
            match (field("value"), field("label")) {
                (Some(value), Some(label)) => Ok(ChoiceOption { value, label }),
                _ => Err(SchemaError::InvalidOption { variable: name.to_string(), index }),
            }
        })
        .collect()
}
