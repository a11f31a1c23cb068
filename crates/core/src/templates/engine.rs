use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};

use crate::customize::ValueMap;

/// Template engine wrapper around minijinja.
///
/// Values are exposed as named bindings, so lists stay iterable and booleans
/// stay booleans. Undefined names are errors, output is never escaped and a
/// trailing newline in the source is kept.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Self { env }
    }

    /// Render `source` with `values` as bindings. `name` shows up in errors.
    pub fn render(
        &self,
        name: &str,
        source: &str,
        values: &ValueMap,
    ) -> Result<String, minijinja::Error> {
        self.env.render_named_str(name, source, Value::from_serialize(values))
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
