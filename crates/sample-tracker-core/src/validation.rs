//! Form validation for sample drafts.
//!
//! Rules:
//! - `sampleName`: non-empty after trimming
//! - `sampleType` / `status`: present and one of the enumerated values
//! - `collectedOn`: present, a valid ISO calendar date, not later than today

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{DraftField, SampleDraft, SampleFields, SampleStatus, SampleType, DATE_FORMAT};

/// Field name → human-readable error. An empty map means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldErrors(BTreeMap<DraftField, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.0.contains_key(&field)
    }

    /// Drop the error for one field (used when the user edits it).
    pub fn clear(&mut self, field: DraftField) {
        self.0.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: DraftField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

/// Validate a draft against `today`.
pub fn validate(draft: &SampleDraft, today: NaiveDate) -> FieldErrors {
    match check(draft, today) {
        Ok(_) => FieldErrors::default(),
        Err(errors) => errors,
    }
}

/// Validate a draft and, if valid, convert it to typed fields.
pub fn check(draft: &SampleDraft, today: NaiveDate) -> Result<SampleFields, FieldErrors> {
    let mut errors = FieldErrors::default();

    let sample_name = draft.sample_name.trim();
    if sample_name.is_empty() {
        errors.insert(DraftField::SampleName, "Sample Name is required.");
    }

    let sample_type = match non_blank(&draft.sample_type) {
        None => {
            errors.insert(DraftField::SampleType, "Sample Type is required.");
            None
        }
        Some(raw) => match raw.parse::<SampleType>() {
            Ok(t) => Some(t),
            Err(_) => {
                errors.insert(DraftField::SampleType, choice_message("Sample Type", &SampleType::ALL));
                None
            }
        },
    };

    let status = match non_blank(&draft.status) {
        None => {
            errors.insert(DraftField::Status, "Status is required.");
            None
        }
        Some(raw) => match raw.parse::<SampleStatus>() {
            Ok(s) => Some(s),
            Err(_) => {
                errors.insert(DraftField::Status, choice_message("Status", &SampleStatus::ALL));
                None
            }
        },
    };

    let collected_on = match non_blank(&draft.collected_on) {
        None => {
            errors.insert(DraftField::CollectedOn, "Collected Date is required.");
            None
        }
        Some(raw) => match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
            Err(_) => {
                errors.insert(
                    DraftField::CollectedOn,
                    "Invalid date format. Please use DD/MM/YYYY.",
                );
                None
            }
            Ok(date) if date > today => {
                errors.insert(DraftField::CollectedOn, "Collected Date cannot be in the future.");
                None
            }
            Ok(date) => Some(date),
        },
    };

    match (sample_type, status, collected_on) {
        (Some(sample_type), Some(status), Some(collected_on)) if errors.is_empty() => {
            Ok(SampleFields {
                sample_name: sample_name.to_string(),
                sample_type,
                collected_on,
                status,
                description: draft.description.clone(),
            })
        }
        _ => Err(errors),
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn choice_message<T: ToString>(label: &str, options: &[T]) -> String {
    let names: Vec<String> = options.iter().map(ToString::to_string).collect();
    format!("{} must be one of {}.", label, names.join(", "))
}
