//! Transient editable draft of one entity, from open to save or cancel.
//!
//! A draft is never written into a [`ResourceStore`] directly; it is
//! only promoted once a persist round trip echoes the canonical entity
//! back.

use crate::entity::{EntityId, Resource};
use crate::error::ClientError;
use crate::store::ResourceStore;
use crate::transport::FormField;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// Field name → human-readable message. Non-empty blocks submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Component-declared validation rule over draft fields.
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Non-empty trimmed string, or any non-null value for select/date
    /// and numeric fields.
    Required(&'static str),
    /// Cross-field equality, e.g. password confirmation.
    MatchesField {
        field: &'static str,
        other: &'static str,
    },
    /// Numeric bounds; only evaluated when the field holds a value.
    NumericRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    /// Minimum length of the trimmed string; only evaluated when the
    /// field holds a value (pair with `Required` to also reject blanks).
    MinLength { field: &'static str, min: usize },
}

/// Whether a draft value satisfies a `Required` rule.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn as_text(value: Option<&Value>) -> &str {
    match value {
        Some(Value::String(s)) => s.as_str(),
        _ => "",
    }
}

/// Evaluates rules against a draft map. Shared with the multi-step
/// wizard, which keeps its own draft but validates fields the same way.
pub fn check_rules(draft: &Map<String, Value>, rules: &[FieldRule]) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for rule in rules {
        match rule {
            FieldRule::Required(field) => {
                if !is_present(draft.get(*field)) {
                    errors.insert(*field, "This field is required");
                }
            }
            FieldRule::MatchesField { field, other } => {
                if as_text(draft.get(*field)) != as_text(draft.get(*other)) {
                    errors.insert(*field, format!("Does not match {}", other));
                }
            }
            FieldRule::NumericRange { field, min, max } => {
                let value = draft.get(*field);
                if !is_present(value) {
                    continue;
                }
                match value.and_then(as_number) {
                    Some(n) if n >= *min && n <= *max => {}
                    Some(_) => {
                        errors.insert(*field, format!("Must be between {} and {}", min, max))
                    }
                    None => errors.insert(*field, "Must be a number"),
                }
            }
            FieldRule::MinLength { field, min } => {
                let value = draft.get(*field);
                if !is_present(value) {
                    continue;
                }
                if as_text(value).trim().chars().count() < *min {
                    errors.insert(*field, format!("Must be at least {} characters", min));
                }
            }
        }
    }
    errors
}

/// Editable draft of one entity plus its validation state.
pub struct FormSession<T: Resource> {
    draft: Map<String, Value>,
    editing: Option<EntityId>,
    rules: Vec<FieldRule>,
    attachments: Vec<FormField>,
    errors: ValidationErrors,
    _marker: PhantomData<T>,
}

impl<T: Resource> FormSession<T> {
    /// Opens a create form seeded from an empty skeleton. Non-object
    /// skeletons seed an empty draft.
    pub fn open_new(skeleton: Value, rules: Vec<FieldRule>) -> Self {
        let draft = match skeleton {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            draft,
            editing: None,
            rules,
            attachments: Vec::new(),
            errors: ValidationErrors::default(),
            _marker: PhantomData,
        }
    }

    /// Opens an edit form seeded from an existing entity's fields.
    pub fn open_edit(entity: &T, rules: Vec<FieldRule>) -> Self {
        let draft = serde_json::to_value(entity)
            .ok()
            .and_then(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .unwrap_or_default();
        Self {
            draft,
            editing: Some(entity.id()),
            rules,
            attachments: Vec::new(),
            errors: ValidationErrors::default(),
            _marker: PhantomData,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Local mutation only; clears any standing error on the field.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        self.errors.remove(&name);
        self.draft.insert(name, value.into());
    }

    pub fn remove_field(&mut self, name: &str) {
        self.errors.remove(name);
        self.draft.remove(name);
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.draft.get(name)
    }

    /// The field as a string slice, `""` when absent or non-string.
    pub fn text(&self, name: &str) -> &str {
        as_text(self.draft.get(name))
    }

    /// Attaches an upload to ride along on a multipart submit.
    pub fn attach(&mut self, field: FormField) {
        self.attachments.push(field);
    }

    pub fn draft(&self) -> Value {
        Value::Object(self.draft.clone())
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Evaluates the declared rules. Empty result means submittable.
    pub fn validate(&mut self) -> &ValidationErrors {
        self.errors = check_rules(&self.draft, &self.rules);
        &self.errors
    }

    /// Persists the draft as JSON, choosing create vs. update by origin.
    ///
    /// Fails fast with [`ClientError::ValidationFailed`] before any
    /// network I/O when validation rejects the draft. On success the
    /// draft is cleared; on failure draft and store are untouched so the
    /// user can retry.
    pub async fn submit(&mut self, store: &ResourceStore<T>) -> Result<T, ClientError> {
        if !self.validate().is_empty() {
            return Err(ClientError::ValidationFailed(self.errors.clone()));
        }
        let body = Value::Object(self.draft.clone());
        let saved = match self.editing.clone() {
            Some(id) => store.update(&id, body).await?,
            None => store.create(body).await?,
        };
        self.reset();
        Ok(saved)
    }

    /// Persists the draft as multipart form-data (string fields plus any
    /// attachments), for resources saved with uploads.
    pub async fn submit_multipart(&mut self, store: &ResourceStore<T>) -> Result<T, ClientError> {
        if !self.validate().is_empty() {
            return Err(ClientError::ValidationFailed(self.errors.clone()));
        }
        let mut fields: Vec<FormField> = Vec::new();
        for (name, value) in &self.draft {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            fields.push(FormField::text(name.clone(), text));
        }
        fields.extend(self.attachments.iter().cloned());

        let saved = match self.editing.clone() {
            Some(id) => store.update_multipart(&id, fields).await?,
            None => store.create_multipart(fields).await?,
        };
        self.reset();
        Ok(saved)
    }

    fn reset(&mut self) {
        self.draft.clear();
        self.attachments.clear();
        self.errors = ValidationErrors::default();
    }
}
