//! Variable value resolution.
//!
//! Variables are resolved one at a time in schema order. For each variable:
//!
//! 1. a preset value is taken verbatim (only checked, never interpolated);
//! 2. otherwise the prompt, default and option labels are interpolated
//!    against the values resolved so far;
//! 3. in defaults mode the effective default is used, falling back to the
//!    first option of a `choice` and then to the kind's zero value;
//! 4. in interactive mode the [`Collector`] is asked, with any cached answer
//!    (or the effective default) as the suggestion, until it returns a valid
//!    value or the operator cancels.
//!
//! Choice answers must equal an option's `value` exactly.

use tracing::debug;

use crate::outcome::Outcome;

use super::cache::AnswerCache;
use super::errors::{CollectError, ResolveError};
use super::interpolate::interpolate;
use super::preset::Preset;
use super::schema::{ChoiceOption, Schema, VarKind, Variable};
use super::value::{ValueMap, VarValue, parse_list};

/// A variable with its prompt, default and option labels interpolated for
/// the current step of resolution.
#[derive(Debug, Clone)]
pub struct EffectiveVariable<'a> {
    pub variable: &'a Variable,
    pub prompt: String,
    pub default: Option<VarValue>,
    pub options: Vec<ChoiceOption>,
}

impl<'a> EffectiveVariable<'a> {
    pub fn new(variable: &'a Variable, values: &ValueMap) -> Self {
        let default = match &variable.default {
            Some(VarValue::String(s)) => Some(VarValue::String(interpolate(s, values))),
            other => other.clone(),
        };
        let options = variable
            .options
            .iter()
            .map(|opt| ChoiceOption {
                value: opt.value.clone(),
                label: interpolate(&opt.label, values),
            })
            .collect();

        Self { variable, prompt: interpolate(&variable.prompt, values), default, options }
    }

    pub fn name(&self) -> &str {
        &self.variable.name
    }

    pub fn kind(&self) -> VarKind {
        self.variable.kind
    }

    /// Position of the option whose value equals `value`.
    pub fn option_index(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|opt| opt.value == value)
    }

    /// Value used when nobody answers.
    ///
    /// A `choice` default that names no option is unusable, so the first
    /// declared option wins.
    pub fn default_value(&self) -> VarValue {
        if self.kind() == VarKind::Choice {
            let usable = self
                .default
                .as_ref()
                .and_then(VarValue::as_str)
                .filter(|d| self.option_index(d).is_some());
            if let Some(d) = usable {
                return VarValue::String(d.to_string());
            }
            if let Some(first) = self.options.first() {
                return VarValue::String(first.value.clone());
            }
        }
        self.default.clone().unwrap_or_else(|| self.kind().zero_value())
    }

    /// Initial value offered to the operator.
    pub fn suggestion(&self) -> Option<VarValue> {
        match self.kind() {
            VarKind::Choice => Some(self.default_value()),
            _ => self.default.clone(),
        }
    }
}

/// Source of operator answers for interactive resolution.
pub trait Collector {
    /// Ask for a value for `var`. `suggested` is the cached answer from an
    /// earlier bundle, or the effective default.
    fn collect(
        &mut self,
        var: &EffectiveVariable<'_>,
        suggested: Option<&VarValue>,
    ) -> Result<Outcome<VarValue>, CollectError>;

    /// The last answer for `var` was rejected; it will be asked again.
    fn reject(&mut self, var: &EffectiveVariable<'_>, error: &ResolveError);
}

/// How values without a preset are obtained.
pub enum Mode<'a> {
    /// Use defaults only. Never cancels.
    Defaults,
    /// Ask the operator through `collector`, suggesting answers from `cache`.
    Interactive { collector: &'a mut dyn Collector, cache: &'a mut AnswerCache },
}

/// Resolve every variable of `schema` in declaration order.
pub fn resolve(
    schema: &Schema,
    preset: Option<&Preset>,
    mut mode: Mode<'_>,
) -> Result<Outcome<ValueMap>, ResolveError> {
    let mut values = ValueMap::new();

    for var in &schema.variables {
        if let Some(given) = preset.and_then(|p| p.get(&var.name)) {
            let value = validate_value(var, given.clone())?;
            debug!(variable = %var.name, value = %value, "using preset value");
            values.insert(var.name.clone(), value);
            continue;
        }

        let effective = EffectiveVariable::new(var, &values);

        let value = match &mut mode {
            Mode::Defaults => validate_value(var, effective.default_value())?,
            Mode::Interactive { collector, cache } => {
                match ask(&effective, &mut **collector, cache)? {
                    Outcome::Done(v) => v,
                    Outcome::Cancelled => {
                        debug!(variable = %var.name, "resolution cancelled");
                        return Ok(Outcome::Cancelled);
                    }
                }
            }
        };

        debug!(variable = %var.name, value = %value, "resolved");
        values.insert(var.name.clone(), value);
    }

    Ok(Outcome::Done(values))
}

/// Resolve without operator interaction.
pub fn resolve_defaults(schema: &Schema, preset: Option<&Preset>) -> Result<ValueMap, ResolveError> {
    let outcome = resolve(schema, preset, Mode::Defaults)?;
    Ok(outcome.done().unwrap_or_default())
}

fn ask(
    effective: &EffectiveVariable<'_>,
    collector: &mut dyn Collector,
    cache: &mut AnswerCache,
) -> Result<Outcome<VarValue>, ResolveError> {
    let suggested = cache.get(effective.name()).cloned().or_else(|| effective.suggestion());

    loop {
        let answer = match collector.collect(effective, suggested.as_ref())? {
            Outcome::Done(v) => v,
            Outcome::Cancelled => return Ok(Outcome::Cancelled),
        };

        match validate_value(effective.variable, answer) {
            Ok(value) => {
                cache.remember(effective.name(), value.clone());
                return Ok(Outcome::Done(value));
            }
            Err(err) => {
                debug!(variable = %effective.name(), error = %err, "answer rejected");
                collector.reject(effective, &err);
            }
        }
    }
}

/// Check that `value` fits `var`.
///
/// A string given for an `array` variable is split with the comma list
/// rule; every other shape must already match the kind.
pub fn validate_value(var: &Variable, value: VarValue) -> Result<VarValue, ResolveError> {
    let value = match (var.kind, value) {
        (VarKind::Array, VarValue::String(s)) => VarValue::List(parse_list(&s)),
        (_, v) => v,
    };

    if !var.kind.accepts(&value) {
        return Err(ResolveError::TypeMismatch {
            variable: var.name.clone(),
            expected: var.kind,
            found: value.shape(),
        });
    }

    if let VarValue::String(s) = &value {
        match var.kind {
            VarKind::Choice if !var.options.iter().any(|opt| opt.value == *s) => {
                return Err(ResolveError::InvalidChoice {
                    variable: var.name.clone(),
                    value: s.clone(),
                    allowed: var.options.iter().map(|opt| opt.value.clone()).collect(),
                });
            }
            VarKind::String => {
                if let Some(re) = &var.validate
                    && !s.is_empty()
                    && !re.is_match(s)
                {
                    return Err(ResolveError::ValidationFailed {
                        variable: var.name.clone(),
                        value: s.clone(),
                        pattern: re.as_str().to_string(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn choice(name: &str, values: &[&str]) -> Variable {
        Variable {
            kind: VarKind::Choice,
            options: values
                .iter()
                .map(|v| ChoiceOption { value: v.to_string(), label: v.to_uppercase() })
                .collect(),
            ..Variable::string(name, "pick")
        }
    }

    #[test]
    fn choice_default_falls_back_to_first_option() {
        let var = choice("PM", &["npm", "pnpm"]);
        let eff = EffectiveVariable::new(&var, &ValueMap::new());
        assert_eq!(eff.default_value(), VarValue::from("npm"));

        let var = choice("PM", &["npm", "pnpm"]).with_default("yarn");
        let eff = EffectiveVariable::new(&var, &ValueMap::new());
        assert_eq!(eff.default_value(), VarValue::from("npm"));

        let var = choice("PM", &["npm", "pnpm"]).with_default("pnpm");
        let eff = EffectiveVariable::new(&var, &ValueMap::new());
        assert_eq!(eff.default_value(), VarValue::from("pnpm"));
    }

    #[test]
    fn choice_match_is_exact_on_value() {
        let var = choice("PM", &["npm", "pnpm"]);
        assert!(validate_value(&var, "pnpm".into()).is_ok());
        // labels and case-folded values are not accepted
        assert!(matches!(
            validate_value(&var, "PNPM".into()),
            Err(ResolveError::InvalidChoice { .. })
        ));
    }

    #[test]
    fn empty_string_skips_pattern() {
        let mut var = Variable::string("NAME", "name");
        var.validate = Some(Regex::new("^[a-z]+$").unwrap());
        assert!(validate_value(&var, "".into()).is_ok());
        assert!(validate_value(&var, "abc".into()).is_ok());
        assert!(matches!(
            validate_value(&var, "ABC".into()),
            Err(ResolveError::ValidationFailed { ref value, .. }) if value == "ABC"
        ));
    }

    #[test]
    fn array_accepts_comma_string() {
        let var = Variable { kind: VarKind::Array, ..Variable::string("LANGS", "langs") };
        assert_eq!(
            validate_value(&var, "en, es ,  fr".into()).unwrap(),
            VarValue::List(vec!["en".into(), "es".into(), "fr".into()])
        );
    }

    #[test]
    fn boolean_rejects_string() {
        let var = Variable { kind: VarKind::Boolean, ..Variable::string("FLAG", "flag") };
        assert!(matches!(
            validate_value(&var, "true".into()),
            Err(ResolveError::TypeMismatch { found: "string", .. })
        ));
    }
}
