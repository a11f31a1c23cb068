use std::collections::VecDeque;

use skillpack_core::Outcome;
use skillpack_core::customize::{
    AnswerCache, CollectError, Collector, EffectiveVariable, Mode, Preset, ResolveError, Schema,
    VarValue, resolve, resolve_defaults,
};

/// Collector that replays canned answers and records what it was asked.
#[derive(Default)]
struct Scripted {
    answers: VecDeque<Outcome<VarValue>>,
    asked: Vec<Asked>,
    rejected: Vec<String>,
}

#[derive(Debug)]
struct Asked {
    name: String,
    prompt: String,
    suggested: Option<VarValue>,
    labels: Vec<String>,
}

impl Scripted {
    fn answering(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| Outcome::Done(VarValue::from(*a))).collect(),
            ..Self::default()
        }
    }
}

impl Collector for Scripted {
    fn collect(
        &mut self,
        var: &EffectiveVariable<'_>,
        suggested: Option<&VarValue>,
    ) -> Result<Outcome<VarValue>, CollectError> {
        self.asked.push(Asked {
            name: var.name().to_string(),
            prompt: var.prompt.clone(),
            suggested: suggested.cloned(),
            labels: var.options.iter().map(|o| o.label.clone()).collect(),
        });
        Ok(self.answers.pop_front().expect("a scripted answer for every prompt"))
    }

    fn reject(&mut self, var: &EffectiveVariable<'_>, _error: &ResolveError) {
        self.rejected.push(var.name().to_string());
    }
}

const LINT_HELPER: &str = r#"
[skill]
name = "lint-helper"

[variables.PACKAGE_MANAGER]
kind = "choice"
prompt = "Which package manager?"
default = "npm"
[[variables.PACKAGE_MANAGER.options]]
value = "npm"
label = "npm"
[[variables.PACKAGE_MANAGER.options]]
value = "pnpm"
label = "pnpm"
[[variables.PACKAGE_MANAGER.options]]
value = "yarn"
label = "yarn"

[variables.LINT_COMMAND]
kind = "string"
prompt = "Lint command for ${PACKAGE_MANAGER}?"
default = "${PACKAGE_MANAGER} run lint"
"#;

fn schema(text: &str) -> Schema {
    Schema::parse(text).expect("schema parses")
}

fn interactive(
    schema: &Schema,
    preset: Option<&Preset>,
    collector: &mut Scripted,
    cache: &mut AnswerCache,
) -> Outcome<skillpack_core::customize::ValueMap> {
    resolve(schema, preset, Mode::Interactive { collector, cache }).expect("resolve ok")
}

#[test]
fn defaults_interpolate_earlier_values() {
    let values = resolve_defaults(&schema(LINT_HELPER), None).unwrap();

    assert_eq!(values.get("PACKAGE_MANAGER"), Some(&VarValue::from("npm")));
    assert_eq!(values.get("LINT_COMMAND"), Some(&VarValue::from("npm run lint")));
}

#[test]
fn preset_feeds_later_defaults() {
    let mut preset = Preset::new();
    preset.insert("PACKAGE_MANAGER", VarValue::from("yarn"));

    let values = resolve_defaults(&schema(LINT_HELPER), Some(&preset)).unwrap();
    assert_eq!(values.get("LINT_COMMAND"), Some(&VarValue::from("yarn run lint")));
}

#[test]
fn preset_values_are_taken_verbatim() {
    let mut preset = Preset::new();
    preset.insert("LINT_COMMAND", VarValue::from("${PACKAGE_MANAGER} exec eslint"));

    let values = resolve_defaults(&schema(LINT_HELPER), Some(&preset)).unwrap();
    assert_eq!(
        values.get("LINT_COMMAND"),
        Some(&VarValue::from("${PACKAGE_MANAGER} exec eslint"))
    );
}

#[test]
fn interactive_prompt_and_suggestion_use_earlier_answers() {
    let schema = schema(LINT_HELPER);
    let mut collector = Scripted::answering(&["pnpm", "pnpm run lint --fix"]);
    let mut cache = AnswerCache::new();

    let values = interactive(&schema, None, &mut collector, &mut cache).done().unwrap();
    assert_eq!(values.get("LINT_COMMAND"), Some(&VarValue::from("pnpm run lint --fix")));

    let second = &collector.asked[1];
    assert_eq!(second.name, "LINT_COMMAND");
    assert_eq!(second.prompt, "Lint command for pnpm?");
    assert_eq!(second.suggested, Some(VarValue::from("pnpm run lint")));
}

#[test]
fn preset_values_are_never_asked() {
    let schema = schema(LINT_HELPER);
    let mut preset = Preset::new();
    preset.insert("PACKAGE_MANAGER", VarValue::from("pnpm"));
    preset.insert("LINT_COMMAND", VarValue::from("pnpm lint"));

    let mut collector = Scripted::default();
    let mut cache = AnswerCache::new();
    let values = interactive(&schema, Some(&preset), &mut collector, &mut cache);

    assert!(collector.asked.is_empty());
    assert_eq!(values.done().unwrap().get("LINT_COMMAND"), Some(&VarValue::from("pnpm lint")));
}

#[test]
fn invalid_answers_are_asked_again() {
    let schema = schema(
        r#"
[skill]
name = "s"

[variables.PM]
kind = "choice"
prompt = "pm"
[[variables.PM.options]]
value = "npm"
label = "npm"

[variables.SLUG]
kind = "string"
prompt = "slug"
validate = "^[a-z-]+$"
"#,
    );
    let mut collector = Scripted::answering(&["NPM", "npm", "Not A Slug", "my-slug"]);
    let mut cache = AnswerCache::new();

    let values = interactive(&schema, None, &mut collector, &mut cache).done().unwrap();

    assert_eq!(values.get("PM"), Some(&VarValue::from("npm")));
    assert_eq!(values.get("SLUG"), Some(&VarValue::from("my-slug")));
    assert_eq!(collector.rejected, vec!["PM".to_string(), "SLUG".to_string()]);
    assert_eq!(collector.asked.len(), 4);
}

#[test]
fn cancellation_stops_resolution() {
    let schema = schema(LINT_HELPER);
    let mut collector = Scripted {
        answers: VecDeque::from([Outcome::Done(VarValue::from("npm")), Outcome::Cancelled]),
        ..Scripted::default()
    };
    let mut cache = AnswerCache::new();

    let outcome = interactive(&schema, None, &mut collector, &mut cache);
    assert!(outcome.is_cancelled());
    assert!(cache.get("LINT_COMMAND").is_none());
}

#[test]
fn cached_answers_are_suggested_next_time() {
    let schema = schema(LINT_HELPER);
    let mut cache = AnswerCache::new();

    let mut first = Scripted::answering(&["yarn", "yarn lint"]);
    let _ = interactive(&schema, None, &mut first, &mut cache);

    let mut second = Scripted::answering(&["yarn", "yarn lint"]);
    let _ = interactive(&schema, None, &mut second, &mut cache);

    assert_eq!(second.asked[0].suggested, Some(VarValue::from("yarn")));
    assert_eq!(second.asked[1].suggested, Some(VarValue::from("yarn lint")));
}

#[test]
fn option_labels_are_interpolated() {
    let schema = schema(
        r#"
[skill]
name = "s"

[variables.TOOL]
kind = "string"
prompt = "tool"
default = "eslint"

[variables.MODE]
kind = "choice"
prompt = "How should ${TOOL} run?"
[[variables.MODE.options]]
value = "fix"
label = "${TOOL} --fix"
[[variables.MODE.options]]
value = "check"
label = "${TOOL} only"
"#,
    );
    let mut preset = Preset::new();
    preset.insert("TOOL", VarValue::from("biome"));

    let mut collector = Scripted::answering(&["check"]);
    let mut cache = AnswerCache::new();
    let values = interactive(&schema, Some(&preset), &mut collector, &mut cache).done().unwrap();

    assert_eq!(values.get("MODE"), Some(&VarValue::from("check")));
    assert_eq!(collector.asked[0].prompt, "How should biome run?");
    assert_eq!(collector.asked[0].labels, vec!["biome --fix", "biome only"]);
}

#[test]
fn forward_and_unknown_tokens_stay_verbatim() {
    let schema = schema(
        r#"
[skill]
name = "s"

[variables.GREETING]
kind = "string"
prompt = "greeting"
default = "hi ${TARGET} ${NOPE}"

[variables.TARGET]
kind = "string"
prompt = "target"
default = "world"
"#,
    );

    let values = resolve_defaults(&schema, None).unwrap();
    assert_eq!(values.get("GREETING"), Some(&VarValue::from("hi ${TARGET} ${NOPE}")));
}

#[test]
fn choice_without_usable_default_takes_first_option() {
    let schema = schema(
        r#"
[skill]
name = "s"

[variables.PM]
kind = "choice"
prompt = "pm"
default = "bun"
[[variables.PM.options]]
value = "npm"
label = "npm"
[[variables.PM.options]]
value = "pnpm"
label = "pnpm"
"#,
    );

    let values = resolve_defaults(&schema, None).unwrap();
    assert_eq!(values.get("PM"), Some(&VarValue::from("npm")));
}

#[test]
fn zero_values_for_missing_defaults() {
    let schema = schema(
        r#"
[skill]
name = "s"

[variables.NAME]
kind = "string"
prompt = "name"

[variables.STRICT]
kind = "boolean"
prompt = "strict"

[variables.LANGS]
kind = "array"
prompt = "langs"
"#,
    );

    let values = resolve_defaults(&schema, None).unwrap();
    assert_eq!(values.get("NAME"), Some(&VarValue::from("")));
    assert_eq!(values.get("STRICT"), Some(&VarValue::Bool(false)));
    assert_eq!(values.get("LANGS"), Some(&VarValue::List(vec![])));
}

#[test]
fn bad_preset_and_default_values_are_fatal() {
    let schema = schema(
        r#"
[skill]
name = "s"

[variables.PM]
kind = "choice"
prompt = "pm"
[[variables.PM.options]]
value = "npm"
label = "npm"

[variables.STRICT]
kind = "boolean"
prompt = "strict"

[variables.SLUG]
kind = "string"
prompt = "slug"
default = "Not A Slug"
validate = "^[a-z-]+$"
"#,
    );

    let mut preset = Preset::new();
    preset.insert("PM", VarValue::from("npm "));
    assert!(matches!(
        resolve_defaults(&schema, Some(&preset)),
        Err(ResolveError::InvalidChoice { .. })
    ));

    let mut preset = Preset::new();
    preset.insert("STRICT", VarValue::from("true"));
    assert!(matches!(
        resolve_defaults(&schema, Some(&preset)),
        Err(ResolveError::TypeMismatch { .. })
    ));

    match resolve_defaults(&schema, None) {
        Err(ResolveError::ValidationFailed { variable, .. }) => assert_eq!(variable, "SLUG"),
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
}

#[test]
fn string_preset_splits_for_arrays() {
    let schema = schema("[skill]\nname = \"s\"\n[variables.LANGS]\nkind = \"array\"\nprompt = \"l\"\n");
    let mut preset = Preset::new();
    preset.insert("LANGS", VarValue::from("en, fr ,"));

    let values = resolve_defaults(&schema, Some(&preset)).unwrap();
    assert_eq!(values.get("LANGS"), Some(&VarValue::List(vec!["en".into(), "fr".into()])));
}

#[test]
fn overrides_are_typed_by_kind() {
    let schema = schema(
        r#"
[skill]
name = "s"

[variables.STRICT]
kind = "boolean"
prompt = "strict"
default = true

[variables.LANGS]
kind = "array"
prompt = "langs"
"#,
    );
    let overrides = vec![
        ("STRICT".to_string(), "no".to_string()),
        ("LANGS".to_string(), "de,it".to_string()),
    ];
    let preset = Preset::new().with_overrides(&schema, &overrides).unwrap();

    let values = resolve_defaults(&schema, Some(&preset)).unwrap();
    assert_eq!(values.get("STRICT"), Some(&VarValue::Bool(false)));
    assert_eq!(values.get("LANGS"), Some(&VarValue::List(vec!["de".into(), "it".into()])));
}

#[test]
fn backward_reference_stays_in_prompt() {
    let schema = schema(
        r#"
[skill]
name = "s"

[variables.A]
kind = "string"
prompt = "A depends on ${B}"

[variables.B]
kind = "string"
prompt = "B after ${A}"
"#,
    );
    let mut collector = Scripted::answering(&["first", "second"]);
    let mut cache = AnswerCache::new();

    interactive(&schema, None, &mut collector, &mut cache).done().unwrap();

    assert_eq!(collector.asked[0].prompt, "A depends on ${B}");
    assert_eq!(collector.asked[1].prompt, "B after first");
}

#[test]
fn empty_answer_clears_a_defaulted_string() {
    let schema = schema(LINT_HELPER);
    let mut collector = Scripted::answering(&["npm", ""]);
    let mut cache = AnswerCache::new();

    let values = interactive(&schema, None, &mut collector, &mut cache).done().unwrap();

    assert_eq!(collector.asked[1].suggested, Some(VarValue::from("npm run lint")));
    assert_eq!(values.get("LINT_COMMAND"), Some(&VarValue::from("")));
}
