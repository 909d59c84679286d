//! Draft models: the in-progress, possibly invalid form copy of a sample.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::sample::{Sample, SampleStatus};

/// Format used for `collected_on` text in drafts.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Form fields that carry user input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    SampleName,
    SampleType,
    CollectedOn,
    Status,
    Description,
}

impl DraftField {
    /// Wire name of the field, as used in error maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::SampleName => "sampleName",
            DraftField::SampleType => "sampleType",
            DraftField::CollectedOn => "collectedOn",
            DraftField::Status => "status",
            DraftField::Description => "description",
        }
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sampleName" => Ok(DraftField::SampleName),
            "sampleType" => Ok(DraftField::SampleType),
            "collectedOn" => Ok(DraftField::CollectedOn),
            "status" => Ok(DraftField::Status),
            "description" => Ok(DraftField::Description),
            _ => Err(format!("Unknown draft field: {}", s)),
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw form state. Enumerated and date fields are kept as text so that
/// partially filled or malformed input can be represented and reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SampleDraft {
    pub sample_name: String,
    pub sample_type: Option<String>,
    /// ISO `YYYY-MM-DD`
    pub collected_on: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl SampleDraft {
    /// Fresh defaults for the Add flow.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            sample_name: String::new(),
            sample_type: None,
            collected_on: Some(today.format(DATE_FORMAT).to_string()),
            status: Some(SampleStatus::Pending.to_string()),
            description: String::new(),
        }
    }

    /// Apply a single field edit.
    pub fn apply(&mut self, change: DraftChange) {
        match change {
            DraftChange::SampleName(v) => self.sample_name = v,
            DraftChange::SampleType(v) => self.sample_type = v,
            DraftChange::CollectedOn(v) => self.collected_on = v,
            DraftChange::Status(v) => self.status = v,
            DraftChange::Description(v) => self.description = v,
        }
    }
}

impl From<&Sample> for SampleDraft {
    fn from(sample: &Sample) -> Self {
        Self {
            sample_name: sample.sample_name.clone(),
            sample_type: Some(sample.sample_type.to_string()),
            collected_on: Some(sample.collected_on.format(DATE_FORMAT).to_string()),
            status: Some(sample.status.to_string()),
            description: sample.description.clone(),
        }
    }
}

/// One user edit to a draft field.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftChange {
    SampleName(String),
    SampleType(Option<String>),
    CollectedOn(Option<String>),
    Status(Option<String>),
    Description(String),
}

impl DraftChange {
    /// Build a change from a field and raw input. `None` clears the field.
    pub fn new(field: DraftField, value: Option<String>) -> Self {
        match field {
            DraftField::SampleName => DraftChange::SampleName(value.unwrap_or_default()),
            DraftField::SampleType => DraftChange::SampleType(value),
            DraftField::CollectedOn => DraftChange::CollectedOn(value),
            DraftField::Status => DraftChange::Status(value),
            DraftField::Description => DraftChange::Description(value.unwrap_or_default()),
        }
    }

    /// The field this change targets.
    pub fn field(&self) -> DraftField {
        match self {
            DraftChange::SampleName(_) => DraftField::SampleName,
            DraftChange::SampleType(_) => DraftField::SampleType,
            DraftChange::CollectedOn(_) => DraftField::CollectedOn,
            DraftChange::Status(_) => DraftField::Status,
            DraftChange::Description(_) => DraftField::Description,
        }
    }
}
