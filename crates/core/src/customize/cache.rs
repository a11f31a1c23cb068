//! Answers remembered across the bundles of one install invocation.

use std::collections::HashMap;

use super::value::VarValue;

/// Previously answered values keyed by variable name.
///
/// Owned by the top-level install operation and cleared when it starts, so
/// a batch install suggests earlier answers for same-named variables but
/// nothing survives into a later invocation.
#[derive(Debug, Default)]
pub struct AnswerCache {
    answers: HashMap<String, VarValue>,
}

impl AnswerCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&VarValue> {
        self.answers.get(name)
    }

    pub fn remember(&mut self, name: &str, value: VarValue) {
        self.answers.insert(name.to_string(), value);
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}
