//! Form fields and the required/min-length checks run before submitting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Checks applied to one named field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldRule {
    pub required: bool,
    pub min_length: Option<usize>,
}

impl FieldRule {
    #[must_use]
    pub fn required() -> Self {
        Self {
            required: true,
            min_length: None,
        }
    }

    #[must_use]
    pub fn min_length(self, min_length: usize) -> Self {
        Self {
            min_length: Some(min_length),
            ..self
        }
    }

    /// The message for the first check `value` fails, if any
    #[must_use]
    pub fn check(&self, field_name: &str, value: &str) -> Option<String> {
        let value = value.trim();

        if self.required && value.is_empty() {
            return Some(format!("{field_name} is required"));
        }

        match self.min_length {
            Some(min) if value.chars().count() < min => {
                Some(format!("Minimum {min} characters required"))
            }
            _ => None,
        }
    }
}

/// Rules keyed by field name
pub type ValidationRules = BTreeMap<String, FieldRule>;

/// Border color applied to a field in error
pub const ERROR_BORDER_COLOR: &str = "var(--danger)";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
    /// Inline message shown under the field
    pub error: Option<String>,
    pub border_color: Option<String>,
}

impl Field {
    pub fn show_error(&mut self, message: String) {
        self.border_color = Some(ERROR_BORDER_COLOR.to_string());
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.border_color = None;
        self.error = None;
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A form and its fields, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub id: String,
    fields: Vec<Field>,
}

impl Form {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style field insertion
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
            ..Field::default()
        });
        self
    }

    /// First field with the given name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Set a field's current value. Returns false if the field does not exist.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Run `rules` against the current values, annotating each checked field.
    ///
    /// Rules naming a field this form does not have are skipped.
    pub fn validate(&mut self, rules: &ValidationRules) -> bool {
        let mut is_valid = true;

        for (field_name, rule) in rules {
            let Some(field) = self.field_mut(field_name) else {
                tracing::debug!("No field named {field_name}; rule skipped");
                continue;
            };

            match rule.check(field_name, &field.value) {
                Some(message) => {
                    field.show_error(message);
                    is_valid = false;
                }
                None => field.clear_error(),
            }
        }

        is_valid
    }
}
