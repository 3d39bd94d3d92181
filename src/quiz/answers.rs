//! Answer store
//!
//! Holds one typed value per catalog question. Every edit is checked against
//! the question it targets, so a stored value is always inside the declared
//! domain.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};

use super::catalog::{Catalog, Question, QuestionKind, SLIDER_DEFAULT};

/// Current value of one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Single(Option<String>),
    /// Selected options in the order they were first toggled on
    Multi(Vec<String>),
    Slider(i64),
    Text(String),
}

impl AnswerValue {
    /// Typed default for a question
    pub fn default_for(question: &Question) -> Self {
        match question {
            Question::SingleSelect { .. } => AnswerValue::Single(None),
            Question::MultiSelect { .. } => AnswerValue::Multi(Vec::new()),
            Question::Slider { min, max, .. } => {
                AnswerValue::Slider(SLIDER_DEFAULT.clamp(*min, *max))
            }
            Question::FreeText { .. } => AnswerValue::Text(String::new()),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            AnswerValue::Single(Some(v)) => Value::String(v.clone()),
            AnswerValue::Single(None) => Value::Null,
            AnswerValue::Multi(values) => {
                Value::Array(values.iter().cloned().map(Value::String).collect())
            }
            AnswerValue::Slider(v) => Value::from(*v),
            AnswerValue::Text(v) => Value::String(v.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    question: &'static Question,
    value: AnswerValue,
}

/// Mapping of question id to current value, in catalog order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerStore {
    entries: Vec<Entry>,
}

impl AnswerStore {
    /// Fresh store with every question at its typed default
    pub fn defaults(catalog: &Catalog) -> Self {
        let entries = catalog
            .questions()
            .map(|question| Entry {
                question,
                value: AnswerValue::default_for(question),
            })
            .collect();
        Self { entries }
    }

    /// Number of questions tracked
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.entries
            .iter()
            .find(|e| e.question.id() == id)
            .map(|e| &e.value)
    }

    /// Selected option of a single-select, `None` when unset or not a single-select
    pub fn single(&self, id: &str) -> Option<&str> {
        match self.get(id) {
            Some(AnswerValue::Single(Some(v))) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Selected options of a multi-select
    pub fn multi(&self, id: &str) -> &[String] {
        match self.get(id) {
            Some(AnswerValue::Multi(values)) => values,
            _ => &[],
        }
    }

    pub fn slider(&self, id: &str) -> Option<i64> {
        match self.get(id) {
            Some(AnswerValue::Slider(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        match self.get(id) {
            Some(AnswerValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Iterate `(id, value)` pairs in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &AnswerValue)> {
        self.entries.iter().map(|e| (e.question.id(), &e.value))
    }

    // ─────────────────────────────────────────────────────────────
    // Edits
    // ─────────────────────────────────────────────────────────────

    fn entry_mut(&mut self, id: &str, expected: QuestionKind) -> Result<&mut Entry> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.question.id() == id)
            .ok_or_else(|| Error::unknown_question(id))?;

        let actual = entry.question.kind();
        if actual != expected {
            return Err(Error::WrongQuestionKind {
                question_id: id.to_string(),
                expected: expected.as_str(),
                actual: actual.as_str(),
            });
        }

        Ok(entry)
    }

    /// Overwrite a single-select answer
    pub fn select_single(&mut self, id: &str, value: &str) -> Result<()> {
        let entry = self.entry_mut(id, QuestionKind::SingleSelect)?;
        if !entry.question.has_option(value) {
            return Err(Error::option_not_allowed(id, value));
        }
        entry.value = AnswerValue::Single(Some(value.to_string()));
        Ok(())
    }

    /// Flip membership of one option, returning whether it is now selected
    pub fn toggle_multi(&mut self, id: &str, value: &str) -> Result<bool> {
        let entry = self.entry_mut(id, QuestionKind::MultiSelect)?;
        if !entry.question.has_option(value) {
            return Err(Error::option_not_allowed(id, value));
        }

        let AnswerValue::Multi(selected) = &mut entry.value else {
            return Err(Error::Internal(format!("answer for {} is not a multi-select", id)));
        };

        if let Some(pos) = selected.iter().position(|v| v == value) {
            selected.remove(pos);
            Ok(false)
        } else {
            selected.push(value.to_string());
            Ok(true)
        }
    }

    /// Set a slider value; values outside the declared range are rejected
    pub fn set_slider(&mut self, id: &str, value: i64) -> Result<()> {
        let entry = self.entry_mut(id, QuestionKind::Slider)?;
        let Question::Slider { min, max, .. } = entry.question else {
            return Err(Error::Internal(format!("question {} is not a slider", id)));
        };

        if value < *min || value > *max {
            return Err(Error::SliderOutOfRange {
                question_id: id.to_string(),
                value,
                min: *min,
                max: *max,
            });
        }

        entry.value = AnswerValue::Slider(value);
        Ok(())
    }

    /// Overwrite a free-text answer verbatim
    pub fn set_text(&mut self, id: &str, value: &str) -> Result<()> {
        let entry = self.entry_mut(id, QuestionKind::FreeText)?;
        entry.value = AnswerValue::Text(value.to_string());
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // JSON
    // ─────────────────────────────────────────────────────────────

    /// Build a store from a JSON object keyed by question id.
    ///
    /// Each present key is applied through the same edit operations the
    /// wizard uses. Absent keys keep their defaults.
    pub fn from_json(catalog: &Catalog, value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::answers_malformed("expected a JSON object keyed by question id"))?;

        let mut store = Self::defaults(catalog);

        for (id, raw) in object {
            let question = catalog
                .question(id)
                .ok_or_else(|| Error::unknown_question(id.as_str()))?;

            match question.kind() {
                QuestionKind::SingleSelect => match raw {
                    Value::Null => {}
                    Value::String(v) => store.select_single(id, v)?,
                    _ => return Err(type_mismatch(id, "a string or null")),
                },
                QuestionKind::MultiSelect => {
                    let items = raw
                        .as_array()
                        .ok_or_else(|| type_mismatch(id, "an array of strings"))?;
                    for item in items {
                        let v = item
                            .as_str()
                            .ok_or_else(|| type_mismatch(id, "an array of strings"))?;
                        if !store.multi(id).iter().any(|s| s == v) {
                            store.toggle_multi(id, v)?;
                        }
                    }
                }
                QuestionKind::Slider => {
                    let v = raw.as_i64().ok_or_else(|| type_mismatch(id, "an integer"))?;
                    store.set_slider(id, v)?;
                }
                QuestionKind::FreeText => {
                    let v = raw.as_str().ok_or_else(|| type_mismatch(id, "a string"))?;
                    store.set_text(id, v)?;
                }
            }
        }

        Ok(store)
    }

    /// JSON object keyed by question id, unset single-selects as `null`.
    /// Key order follows serde_json and is not significant.
    pub fn to_json(&self) -> Value {
        let map = self
            .entries
            .iter()
            .map(|e| (e.question.id().to_string(), e.value.to_json()))
            .collect();
        Value::Object(map)
    }
}

fn type_mismatch(id: &str, expected: &str) -> Error {
    Error::answers_malformed(format!("answer for {} must be {}", id, expected))
}

impl Serialize for AnswerStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.question.id(), &entry.value.to_json())?;
        }
        map.end()
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
