//! Terminal collector for interactive installs.
//!
//! Maps each variable kind to a dialoguer widget: `choice` to a select list,
//! `boolean` to a confirm, `string` and `array` to a line of text. Escape,
//! Ctrl-C and end of input cancel the install.

use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use skillpack_core::Outcome;
use skillpack_core::customize::{
    CollectError, Collector, EffectiveVariable, ResolveError, VarKind, VarValue,
};
use std::io::{self, IsTerminal};

/// Whether prompts can be shown at all.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

pub struct DialoguerCollector {
    theme: ColorfulTheme,
}

impl DialoguerCollector {
    pub fn new() -> Self {
        Self { theme: ColorfulTheme::default() }
    }

    fn select(
        &self,
        var: &EffectiveVariable<'_>,
        suggested: Option<&VarValue>,
    ) -> Result<Option<VarValue>, dialoguer::Error> {
        let labels: Vec<&str> = var.options.iter().map(|o| o.label.as_str()).collect();
        let initial = suggested
            .and_then(VarValue::as_str)
            .and_then(|s| var.option_index(s))
            .unwrap_or(0);

        let picked = Select::with_theme(&self.theme)
            .with_prompt(&var.prompt)
            .items(&labels)
            .default(initial)
            .interact_opt()?;

        Ok(picked.map(|idx| VarValue::String(var.options[idx].value.clone())))
    }

    fn confirm(
        &self,
        var: &EffectiveVariable<'_>,
        suggested: Option<&VarValue>,
    ) -> Result<Option<VarValue>, dialoguer::Error> {
        let initial = suggested.and_then(VarValue::as_bool).unwrap_or(false);
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(&var.prompt)
            .default(initial)
            .interact_opt()?;
        Ok(answer.map(VarValue::Bool))
    }

    fn text(
        &self,
        var: &EffectiveVariable<'_>,
        suggested: Option<&VarValue>,
    ) -> Result<Option<VarValue>, dialoguer::Error> {
        let mut prompt = var.prompt.clone();
        if var.kind() == VarKind::Array {
            prompt.push_str(" (comma separated)");
        }

        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        // Prefilled rather than a default, so the operator can erase it.
        if let Some(value) = suggested {
            input = input.with_initial_text(value.to_string());
        }

        // Arrays come back as text; resolution splits them.
        Ok(Some(VarValue::String(input.interact_text()?)))
    }
}

impl Collector for DialoguerCollector {
    fn collect(
        &mut self,
        var: &EffectiveVariable<'_>,
        suggested: Option<&VarValue>,
    ) -> Result<Outcome<VarValue>, CollectError> {
        if let Some(desc) = &var.variable.description {
            eprintln!("  {desc}");
        }

        let answer = match var.kind() {
            VarKind::Choice => self.select(var, suggested),
            VarKind::Boolean => self.confirm(var, suggested),
            VarKind::String | VarKind::Array => self.text(var, suggested),
        };

        match answer {
            Ok(Some(value)) => Ok(Outcome::Done(value)),
            Ok(None) => Ok(Outcome::Cancelled),
            Err(e) => cancelled_or_error(var.name(), e),
        }
    }

    fn reject(&mut self, _var: &EffectiveVariable<'_>, error: &ResolveError) {
        eprintln!("  {error}");
    }
}

/// End of input and interrupts cancel; anything else is a real failure.
fn cancelled_or_error(
    variable: &str,
    e: dialoguer::Error,
) -> Result<Outcome<VarValue>, CollectError> {
    match e {
        dialoguer::Error::IO(io_err) => match io_err.kind() {
            io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted => Ok(Outcome::Cancelled),
            _ => Err(CollectError::Io { variable: variable.to_string(), source: io_err }),
        },
    }
}
