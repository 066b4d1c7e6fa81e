//! Document validation: turns a parsed source tree into a [`PromptConfig`].
//!
//! Cross-references between the `models`, `providers` and `temperatures`
//! tables and the per-prompt tables are resolved here, once, so the runner
//! only ever sees complete [`PromptDefinition`] records.

use super::{ConfigError, ModelConfig, PromptConfig, PromptDefinition};
use crate::types::ToolSpecification;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const MODELS_TABLE: &str = "models";
pub const PROVIDERS_TABLE: &str = "providers";
pub const TEMPERATURES_TABLE: &str = "temperatures";

const RESERVED_TABLES: [&str; 3] = [MODELS_TABLE, PROVIDERS_TABLE, TEMPERATURES_TABLE];

#[derive(Debug, Deserialize)]
struct RawPromptTable {
    template: Option<String>,
    #[serde(default)]
    structured: bool,
    #[serde(default)]
    tools: Vec<ToolSpecification>,
}

/// Build the configuration model from a parsed document.
pub fn build_config(document: Value) -> Result<PromptConfig, ConfigError> {
    let mut root = match document {
        Value::Object(map) => map,
        other => {
            return Err(ConfigError::InvalidValue {
                field: "<root>".to_string(),
                reason: format!("expected a table, found {}", type_name(&other)),
            })
        }
    };

    let models = take_table(&mut root, MODELS_TABLE, |field, v| {
        v.as_str().map(str::to_string).ok_or_else(|| invalid(field, "expected a string", v))
    })?;
    let providers = take_table(&mut root, PROVIDERS_TABLE, |field, v| {
        match v.as_str().map(str::trim) {
            Some(p) if !p.is_empty() => Ok(p.to_string()),
            Some(_) => Err(ConfigError::InvalidValue {
                field: field.to_string(),
                reason: "provider name must not be empty".to_string(),
            }),
            None => Err(invalid(field, "expected a string", v)),
        }
    })?;
    let temperatures = take_table(&mut root, TEMPERATURES_TABLE, |field, v| {
        let t = v.as_f64().ok_or_else(|| invalid(field, "expected a number", v))?;
        if !t.is_finite() || t < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                reason: format!("temperature must be a non-negative number, found {}", t),
            });
        }
        Ok(t)
    })?;

    // Every remaining top-level key is a prompt table.
    for (name, value) in &root {
        if !value.is_object() {
            return Err(ConfigError::InvalidValue {
                field: name.clone(),
                reason: format!(
                    "expected a prompt table, found {}; only [{}] may sit beside prompt tables",
                    type_name(value),
                    RESERVED_TABLES.join("], [")
                ),
            });
        }
    }

    let references: [(&str, Vec<&String>); 3] = [
        (MODELS_TABLE, models.keys().collect()),
        (PROVIDERS_TABLE, providers.keys().collect()),
        (TEMPERATURES_TABLE, temperatures.keys().collect()),
    ];
    for (table, keys) in references {
        for key in keys {
            if !root.contains_key(key) {
                return Err(ConfigError::UndefinedPrompt {
                    prompt: key.clone(),
                    referenced_by: table.to_string(),
                    hint: Some(format!("Add a [{}] table with a 'template' field", key)),
                });
            }
        }
    }

    let mut definitions = Vec::with_capacity(root.len());
    for (name, value) in root {
        let raw: RawPromptTable =
            serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
                field: name.clone(),
                reason: e.to_string(),
            })?;

        let template = match raw.template {
            Some(t) if !t.trim().is_empty() => t,
            _ => {
                return Err(ConfigError::MissingField {
                    field: format!("{}.template", name),
                    hint: Some("Every prompt table needs a non-empty 'template' string".to_string()),
                })
            }
        };

        let model = ModelConfig {
            name: lookup(&models, MODELS_TABLE, &name)?,
            provider: lookup(&providers, PROVIDERS_TABLE, &name)?,
            temperature: lookup(&temperatures, TEMPERATURES_TABLE, &name)?,
            structured: raw.structured,
        };

        for (idx, tool) in raw.tools.iter().enumerate() {
            if tool.name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("{}.tools[{}].name", name, idx),
                    reason: "tool name must not be empty".to_string(),
                });
            }
        }

        definitions.push(PromptDefinition::new(name, template, model).with_tools(raw.tools));
    }

    Ok(PromptConfig::new(definitions))
}

fn take_table<T>(
    root: &mut Map<String, Value>,
    table: &str,
    convert: impl Fn(&str, &Value) -> Result<T, ConfigError>,
) -> Result<BTreeMap<String, T>, ConfigError> {
    let entries = match root.remove(table) {
        None => return Ok(BTreeMap::new()),
        Some(Value::Object(entries)) => entries,
        Some(other) => return Err(invalid(table, "expected a table keyed by prompt name", &other)),
    };
    entries
        .iter()
        .map(|(key, v)| {
            let field = format!("{}.{}", table, key);
            convert(&field, v).map(|converted| (key.clone(), converted))
        })
        .collect()
}

fn lookup<T: Clone>(
    table: &BTreeMap<String, T>,
    table_name: &str,
    prompt: &str,
) -> Result<T, ConfigError> {
    table.get(prompt).cloned().ok_or_else(|| ConfigError::MissingField {
        field: format!("{}.{}", table_name, prompt),
        hint: Some(format!(
            "Add an entry for '{}' to the [{}] table",
            prompt, table_name
        )),
    })
}

fn invalid(field: &str, expected: &str, found: &Value) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: format!("{}, found {}", expected, type_name(found)),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}
