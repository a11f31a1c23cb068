//! Customization pipeline: schema parsing, value resolution and `${}` interpolation.
//!
//! A customizable bundle carries `customize/config.toml`. The schema parsed
//! from it is resolved into a [`ValueMap`], either from defaults or through an
//! interactive [`Collector`], optionally seeded by a [`Preset`].

pub mod cache;
pub mod errors;
pub mod interpolate;
pub mod preset;
pub mod resolver;
pub mod schema;
pub mod value;

pub use cache::AnswerCache;
pub use errors::{CollectError, PresetError, ResolveError, SchemaError};
pub use interpolate::{interpolate, referenced_names};
pub use preset::{Preset, parse_override};
pub use resolver::{
    Collector, EffectiveVariable, Mode, resolve, resolve_defaults, validate_value,
};
pub use schema::{ChoiceOption, ForwardReference, Schema, SkillMeta, VarKind, Variable};
pub use value::{ValueMap, VarValue, parse_list};
