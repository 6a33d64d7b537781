use super::schema::{FieldKind, StepDefinition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw field values handed over by the presentation layer on submit.
pub type FieldValues = BTreeMap<String, String>;

/// Completed answers for one step, keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepRecord(BTreeMap<String, String>);

/// The patient record shares the step shape; it only ever holds step 0 fields.
pub type PatientRecord = StepRecord;

impl StepRecord {
    /// Builds a record for `step`, trimming every value. Fails with one error
    /// per missing or out-of-domain field; keys outside the step are ignored.
    pub fn from_submission(
        step: &StepDefinition,
        values: &FieldValues,
    ) -> Result<Self, Vec<FieldError>> {
        let mut record = BTreeMap::new();
        let mut errors = Vec::new();

        for field in &step.fields {
            let value = values
                .get(field.id)
                .map(|value| value.trim())
                .unwrap_or_default();

            if value.is_empty() {
                errors.push(FieldError {
                    field_id: field.id.to_string(),
                    label: field.label.to_string(),
                    reason: FieldErrorReason::Required,
                });
                continue;
            }

            if let FieldKind::Select(options) = &field.kind {
                if !options.contains(&value) {
                    errors.push(FieldError {
                        field_id: field.id.to_string(),
                        label: field.label.to_string(),
                        reason: FieldErrorReason::NotAnOption {
                            options: options.iter().map(|option| option.to_string()).collect(),
                        },
                    });
                    continue;
                }
            }

            record.insert(field.id.to_string(), value.to_string());
        }

        if errors.is_empty() {
            Ok(Self(record))
        } else {
            Err(errors)
        }
    }

    pub fn get(&self, field_id: &str) -> Option<&str> {
        self.0.get(field_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// A record completes `step` when it holds exactly as many keys as the
    /// step has fields and every field carries a non-blank value.
    pub fn is_complete_for(&self, step: &StepDefinition) -> bool {
        self.len() == step.fields.len()
            && step.fields.iter().all(|field| {
                self.get(field.id)
                    .map(|value| !value.trim().is_empty())
                    .unwrap_or(false)
            })
    }
}

impl From<BTreeMap<String, String>> for StepRecord {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self(value)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StepRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Observation records keyed by step id (the patient step is never stored here).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservationRecord(BTreeMap<String, StepRecord>);

impl ObservationRecord {
    pub fn get(&self, step_id: &str) -> Option<&StepRecord> {
        self.0.get(step_id)
    }

    pub fn insert(&mut self, step_id: impl Into<String>, record: StepRecord) {
        self.0.insert(step_id.into(), record);
    }

    /// Field value for a rule lookup; absent steps and fields read as empty.
    pub fn field_value(&self, step_id: &str, field_id: &str) -> &str {
        self.get(step_id)
            .and_then(|record| record.get(field_id))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StepRecord)> {
        self.0.iter().map(|(key, record)| (key.as_str(), record))
    }
}

impl<K: Into<String>> FromIterator<(K, StepRecord)> for ObservationRecord {
    fn from_iter<T: IntoIterator<Item = (K, StepRecord)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, record)| (key.into(), record))
                .collect(),
        )
    }
}

/// Per-field rejection returned to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field_id: String,
    pub label: String,
    pub reason: FieldErrorReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldErrorReason {
    Required,
    NotAnOption { options: Vec<String> },
}

impl FieldError {
    pub fn message(&self) -> String {
        match &self.reason {
            FieldErrorReason::Required => format!("{} is required", self.label),
            FieldErrorReason::NotAnOption { options } => {
                format!("{} must be one of: {}", self.label, options.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl NoticeLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Transient, non-fatal message for the presentation layer to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
