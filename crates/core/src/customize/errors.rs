//! Error types for schema parsing, presets and value resolution.

use std::path::PathBuf;
use thiserror::Error;

use super::schema::VarKind;

/// A malformed or incomplete configuration document.
///
/// Always fatal for the current install.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The `[skill]` table is absent or has no non-empty `name`.
    #[error("configuration is missing [skill] metadata with a non-empty `name`")]
    MissingMeta,

    #[error("`skill.{field}` must be a string")]
    InvalidMeta { field: &'static str },

    #[error("`variables` must be a table")]
    VariablesNotTable,

    #[error("variable '{variable}' is missing required field `{field}`")]
    MissingField { variable: String, field: &'static str },

    #[error("variable '{variable}' has unknown kind '{kind}'")]
    UnknownKind { variable: String, kind: String },

    #[error("option {index} of variable '{variable}' must define string `value` and `label`")]
    InvalidOption { variable: String, index: usize },

    #[error("variable '{variable}': {message}")]
    InvalidField { variable: String, message: String },
}

/// A preset file or a `KEY=VALUE` override that cannot be used.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("failed to read preset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in preset: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("preset value for '{key}' must be a string, boolean or array of strings")]
    InvalidValue { key: String },

    #[error("invalid override '{0}' (expected KEY=VALUE)")]
    InvalidOverride(String),

    #[error("override for boolean '{key}' must be true or false, got '{value}'")]
    InvalidBoolean { key: String, value: String },
}

/// A resolved value that does not satisfy its variable.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("'{value}' is not a valid choice for '{variable}' (expected one of: {})", .allowed.join(", "))]
    InvalidChoice {
        variable: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("value '{value}' for '{variable}' does not match pattern {pattern}")]
    ValidationFailed {
        variable: String,
        value: String,
        pattern: String,
    },

    #[error("value for '{variable}' must be {expected}, got {found}")]
    TypeMismatch {
        variable: String,
        expected: VarKind,
        found: &'static str,
    },

    #[error(transparent)]
    Collect(#[from] CollectError),
}

/// Failure of the interactive collector itself (not a cancellation).
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("failed to read answer for '{variable}': {source}")]
    Io {
        variable: String,
        #[source]
        source: std::io::Error,
    },
}
