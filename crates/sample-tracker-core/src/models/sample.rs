//! Sample models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to parse an enumerated field from its display string.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unknown sample type: {0}")]
    SampleType(String),

    #[error("Unknown status: {0}")]
    Status(String),
}

/// Kind of biological material collected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SampleType {
    Blood,
    Urine,
    Tissue,
    Saliva,
    Other,
}

impl SampleType {
    /// All sample types, in the order offered to the user.
    pub const ALL: [SampleType; 5] = [
        SampleType::Blood,
        SampleType::Urine,
        SampleType::Tissue,
        SampleType::Saliva,
        SampleType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SampleType::Blood => "Blood",
            SampleType::Urine => "Urine",
            SampleType::Tissue => "Tissue",
            SampleType::Saliva => "Saliva",
            SampleType::Other => "Other",
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SampleType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseError::SampleType(s.to_string()))
    }
}

/// Processing status of a sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SampleStatus {
    /// Collected, not yet picked up by the lab
    Pending,
    /// Currently being analysed
    Processing,
    /// Results available
    Completed,
}

impl SampleStatus {
    /// All statuses, in workflow order.
    pub const ALL: [SampleStatus; 3] = [
        SampleStatus::Pending,
        SampleStatus::Processing,
        SampleStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SampleStatus::Pending => "Pending",
            SampleStatus::Processing => "Processing",
            SampleStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for SampleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SampleStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| ParseError::Status(s.to_string()))
    }
}

/// A stored sample record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// Store-assigned identifier, immutable after creation
    pub id: String,
    /// Display name
    pub sample_name: String,
    /// Kind of material
    pub sample_type: SampleType,
    /// Collection date (no time component)
    pub collected_on: NaiveDate,
    /// Processing status
    pub status: SampleStatus,
    /// Free-text notes, may be empty
    #[serde(default)]
    pub description: String,
}

impl Sample {
    /// Build a record from validated fields under the given id.
    pub fn from_fields(id: String, fields: SampleFields) -> Self {
        Self {
            id,
            sample_name: fields.sample_name,
            sample_type: fields.sample_type,
            collected_on: fields.collected_on,
            status: fields.status,
            description: fields.description,
        }
    }

    /// Merge a patch into this record. The id is never touched.
    pub fn apply(&mut self, patch: SamplePatch) {
        if let Some(name) = patch.sample_name {
            self.sample_name = name;
        }
        if let Some(sample_type) = patch.sample_type {
            self.sample_type = sample_type;
        }
        if let Some(collected_on) = patch.collected_on {
            self.collected_on = collected_on;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

/// Validated field values for a sample, without an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SampleFields {
    pub sample_name: String,
    pub sample_type: SampleType,
    pub collected_on: NaiveDate,
    pub status: SampleStatus,
    #[serde(default)]
    pub description: String,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SamplePatch {
    pub sample_name: Option<String>,
    pub sample_type: Option<SampleType>,
    pub collected_on: Option<NaiveDate>,
    pub status: Option<SampleStatus>,
    pub description: Option<String>,
}

impl SamplePatch {
    /// A patch that touches only the status.
    pub fn status(status: SampleStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl From<SampleFields> for SamplePatch {
    fn from(fields: SampleFields) -> Self {
        Self {
            sample_name: Some(fields.sample_name),
            sample_type: Some(fields.sample_type),
            collected_on: Some(fields.collected_on),
            status: Some(fields.status),
            description: Some(fields.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_sample() -> Sample {
        Sample {
            id: "S-1".into(),
            sample_name: "Liver biopsy".into(),
            sample_type: SampleType::Tissue,
            collected_on: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            status: SampleStatus::Pending,
            description: String::new(),
        }
    }

    #[test]
    fn test_enum_round_trip_through_display() {
        for t in SampleType::ALL {
            assert_eq!(t.to_string().parse::<SampleType>().unwrap(), t);
        }
        for s in SampleStatus::ALL {
            assert_eq!(s.to_string().parse::<SampleStatus>().unwrap(), s);
        }
    }

    #[test]
    fn test_enum_parse_is_case_sensitive() {
        assert!(matches!("blood".parse::<SampleType>(), Err(ParseError::SampleType(_))));
        assert!(matches!("done".parse::<SampleStatus>(), Err(ParseError::Status(_))));
    }

    #[test]
    fn test_status_patch_keeps_other_fields() {
        let mut sample = make_sample();
        sample.apply(SamplePatch::status(SampleStatus::Completed));

        assert_eq!(sample.status, SampleStatus::Completed);
        assert_eq!(sample.sample_name, "Liver biopsy");
        assert_eq!(sample.sample_type, SampleType::Tissue);
        assert_eq!(sample.id, "S-1");
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(make_sample()).unwrap();
        assert_eq!(json["sampleName"], "Liver biopsy");
        assert_eq!(json["sampleType"], "Tissue");
        assert_eq!(json["collectedOn"], "2024-03-01");
        assert_eq!(json["status"], "Pending");
    }
}
