//! `${name}` string interpolation.
//!
//! Purely textual: values are substituted with their display form and
//! unknown names are left untouched, delimiters included.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::value::ValueMap;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]*)\}").expect("valid regex"));

/// Substitute every `${name}` token found in `values`.
///
/// ```
/// use skillpack_core::customize::{interpolate, ValueMap, VarValue};
///
/// let mut values = ValueMap::new();
/// values.insert("PM", VarValue::from("pnpm"));
/// assert_eq!(interpolate("${PM} run ${TASK}", &values), "pnpm run ${TASK}");
/// ```
pub fn interpolate(template: &str, values: &ValueMap) -> String {
    if !template.contains("${") {
        return template.to_string();
    }

    TOKEN_RE
        .replace_all(template, |caps: &Captures<'_>| {
            let name = caps[1].trim();
            match values.get(name) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Names referenced by `${name}` tokens, in order of appearance.
pub fn referenced_names(template: &str) -> Vec<String> {
    TOKEN_RE
        .captures_iter(template)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customize::value::VarValue;

    fn values() -> ValueMap {
        [
            ("PM", VarValue::from("pnpm")),
            ("LANGS", VarValue::List(vec!["en".into(), "fr".into()])),
            ("STRICT", VarValue::Bool(true)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn substitutes_known_names() {
        assert_eq!(interpolate("${PM} run lint", &values()), "pnpm run lint");
    }

    #[test]
    fn trims_names_inside_braces() {
        assert_eq!(interpolate("${ PM }", &values()), "pnpm");
    }

    #[test]
    fn lists_and_bools_use_display_form() {
        assert_eq!(interpolate("${LANGS} / ${STRICT}", &values()), "en, fr / true");
    }

    #[test]
    fn unknown_tokens_are_left_verbatim() {
        assert_eq!(interpolate("x ${LATER} y", &values()), "x ${LATER} y");
        assert_eq!(interpolate("${}", &values()), "${}");
    }

    #[test]
    fn unterminated_token_is_plain_text() {
        assert_eq!(interpolate("${PM", &values()), "${PM");
    }

    #[test]
    fn jinja_syntax_is_not_touched() {
        assert_eq!(interpolate("{{ PM }}", &values()), "{{ PM }}");
    }

    #[test]
    fn referenced_names_in_order() {
        assert_eq!(referenced_names("${B} ${ A } ${}"), vec!["B", "A"]);
    }
}
