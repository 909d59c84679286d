//! Filter and sort samples for display.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{ParseError, Sample, SampleStatus};

/// Status filter; `All` disables filtering.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(SampleStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: SampleStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("All"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

/// Sortable columns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Id,
    SampleName,
    SampleType,
    CollectedOn,
    Status,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::SampleName => "sampleName",
            SortKey::SampleType => "sampleType",
            SortKey::CollectedOn => "collectedOn",
            SortKey::Status => "status",
        }
    }

    /// Compare two samples on this key, ascending.
    fn compare(&self, a: &Sample, b: &Sample) -> Ordering {
        match self {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::SampleName => a.sample_name.cmp(&b.sample_name),
            SortKey::SampleType => a.sample_type.as_str().cmp(b.sample_type.as_str()),
            SortKey::CollectedOn => a.collected_on.cmp(&b.collected_on),
            SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortKey::Id),
            "sampleName" => Ok(SortKey::SampleName),
            "sampleType" => Ok(SortKey::SampleType),
            "collectedOn" => Ok(SortKey::CollectedOn),
            "status" => Ok(SortKey::Status),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::ascending(SortKey::Id)
    }
}

impl SortSpec {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }

    /// Column-header click: the active ascending column flips to descending,
    /// anything else becomes ascending on `key`.
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key && self.direction == SortDirection::Ascending {
            Self::descending(key)
        } else {
            Self::ascending(key)
        }
    }

    fn compare(&self, a: &Sample, b: &Sample) -> Ordering {
        let ord = self.key.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Inputs to the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Query {
    pub search: String,
    pub status: StatusFilter,
    pub sort: SortSpec,
}

impl Query {
    /// Whether `sample` passes both filters.
    pub fn matches(&self, sample: &Sample) -> bool {
        matches_search(&self.search, &sample.sample_name) && self.status.matches(sample.status)
    }
}

/// Case-insensitive substring match on the name. Whitespace-only search
/// text matches everything.
pub fn matches_search(search: &str, name: &str) -> bool {
    if search.trim().is_empty() {
        return true;
    }
    name.to_lowercase().contains(&search.to_lowercase())
}

/// Run the pipeline: every matching record, ordered by `query.sort`.
/// Ties keep their input order in both directions.
pub fn run<'a>(samples: &'a [Sample], query: &Query) -> Vec<&'a Sample> {
    let mut matched: Vec<&Sample> = samples.iter().filter(|s| query.matches(s)).collect();
    // slice::sort_by is stable
    matched.sort_by(|a, b| query.sort.compare(a, b));
    matched
}
