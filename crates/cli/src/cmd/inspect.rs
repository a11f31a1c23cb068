//! Show the customization schema of one bundle.

use skillpack_core::bundle::SkillBundle;
use skillpack_core::customize::{Schema, Variable};
use tabled::{Table, Tabled, settings::Style};

use super::fail;
use crate::InspectArgs;

const CMD: &str = "inspect";

#[derive(Tabled)]
struct VariableRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Default")]
    default: String,
    #[tabled(rename = "Options")]
    options: String,
    #[tabled(rename = "Validate")]
    validate: String,
}

impl From<&Variable> for VariableRow {
    fn from(var: &Variable) -> Self {
        Self {
            name: var.name.clone(),
            kind: var.kind.to_string(),
            default: var.default.as_ref().map(ToString::to_string).unwrap_or_default(),
            options: var.options.iter().map(|o| o.value.as_str()).collect::<Vec<_>>().join(", "),
            validate: var.validate.as_ref().map(|re| re.as_str().to_string()).unwrap_or_default(),
        }
    }
}

pub fn run(args: &InspectArgs) {
    let bundle = SkillBundle::load(&args.bundle).unwrap_or_else(|e| fail(CMD, &e));

    println!("OK   skillpack {CMD}");
    println!("name: {}", bundle.name);
    if let Some(desc) = &bundle.description {
        println!("description: {desc}");
    }

    let Some(config) = &bundle.config else {
        println!("customizable: no");
        return;
    };
    let schema = Schema::load(config).unwrap_or_else(|e| fail(CMD, &e));

    println!("customizable: yes");
    if let Some(version) = &schema.meta.version {
        println!("version: {version}");
    }

    if schema.is_empty() {
        println!("(no variables)");
    } else {
        let rows: Vec<VariableRow> = schema.variables.iter().map(VariableRow::from).collect();
        println!("{}", Table::new(&rows).with(Style::rounded()));
    }

    for fwd in schema.forward_references() {
        println!(
            "warning: {} refers to {} before it is declared; the token is kept as-is",
            fwd.variable, fwd.reference
        );
    }
}
