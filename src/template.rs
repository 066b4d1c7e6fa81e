//! `{placeholder}` substitution for prompt templates.
//!
//! A placeholder is any brace pair around a non-empty name without braces or
//! whitespace, so `{name}`, `{prénom}`, `{first-name}` and `{1st}` all count.
//! `{{` and `}}` render as literal braces. Brace groups containing whitespace
//! are copied through untouched; literal JSON belongs inside the escapes.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::BTreeMap;

/// Values supplied for a single run, keyed by placeholder name.
pub type Variables = BTreeMap<String, Value>;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{|\}\}|\{([^{}\s]+)\}").expect("placeholder pattern is valid")
});

/// Placeholders with no usable value, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no value supplied for {}", .0.join(", "))]
pub struct MissingPlaceholders(pub Vec<String>);

/// Borrowed view over template text.
#[derive(Debug, Clone, Copy)]
pub struct Template<'a> {
    source: &'a str,
}

impl<'a> Template<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Distinct placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = Vec::new();
        for caps in PLACEHOLDER.captures_iter(self.source) {
            if let Some(name) = caps.get(1).map(|m| m.as_str()) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Substitute every placeholder. Either all of them resolve or nothing
    /// is returned; there is no partial render.
    pub fn render(&self, variables: &Variables) -> Result<String, MissingPlaceholders> {
        let mut missing: Vec<String> = Vec::new();
        let rendered = PLACEHOLDER.replace_all(self.source, |caps: &Captures| {
            match caps.get(1) {
                None if &caps[0] == "{{" => "{".to_string(),
                None => "}".to_string(),
                Some(name) => match variables.get(name.as_str()).and_then(value_to_text) {
                    Some(text) => text,
                    None => {
                        if !missing.iter().any(|m| m == name.as_str()) {
                            missing.push(name.as_str().to_string());
                        }
                        String::new()
                    }
                },
            }
        });

        if missing.is_empty() {
            Ok(rendered.into_owned())
        } else {
            Err(MissingPlaceholders(missing))
        }
    }
}

/// Text form of a variable. `null` has none and counts as missing.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Text form of every usable variable, for hook contexts and logs.
pub fn normalize_variables(variables: &Variables) -> BTreeMap<String, String> {
    variables
        .iter()
        .filter_map(|(k, v)| value_to_text(v).map(|text| (k.clone(), text)))
        .collect()
}
