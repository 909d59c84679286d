//! In-memory record store.
//!
//! The store is the single owner of the canonical sample collection. Ids are
//! assigned here, never by callers.

mod ids;

pub use ids::*;

use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Sample, SampleFields, SamplePatch, SampleStatus};

/// Upper bound on id draws before `create` gives up.
const MAX_ID_ATTEMPTS: usize = 16;

/// Store errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Sample not found: {0}")]
    NotFound(String),

    #[error("Duplicate sample id: {0}")]
    DuplicateId(String),

    #[error("Could not allocate a unique id after {0} attempts")]
    IdExhausted(usize),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Authoritative sample collection.
pub struct SampleStore {
    samples: Vec<Sample>,
    ids: Box<dyn IdSource>,
}

impl Default for SampleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleStore {
    /// Empty store with random UUID ids.
    pub fn new() -> Self {
        Self::with_id_source(Box::new(UuidIdSource))
    }

    /// Empty store drawing ids from `ids`.
    pub fn with_id_source(ids: Box<dyn IdSource>) -> Self {
        Self {
            samples: Vec::new(),
            ids,
        }
    }

    /// Seed the store once with an initial record set, keeping its order.
    pub fn from_seed(seed: Vec<Sample>) -> StoreResult<Self> {
        let mut store = Self::new();
        store.seed(seed)?;
        Ok(store)
    }

    /// Append seed records. Fails without modifying the store if any id repeats.
    pub fn seed(&mut self, seed: Vec<Sample>) -> StoreResult<()> {
        let mut seen: Vec<&str> = self.samples.iter().map(|s| s.id.as_str()).collect();
        for sample in &seed {
            if seen.contains(&sample.id.as_str()) {
                return Err(StoreError::DuplicateId(sample.id.clone()));
            }
            seen.push(&sample.id);
        }
        info!(count = seed.len(), "seeded sample store");
        self.samples.extend(seed);
        Ok(())
    }

    /// Full collection, in storage order.
    pub fn all(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Create a record from validated fields. The new record is prepended.
    pub fn create(&mut self, fields: SampleFields) -> StoreResult<Sample> {
        let id = self.fresh_id()?;
        let sample = Sample::from_fields(id, fields);
        self.samples.insert(0, sample.clone());
        info!(id = %sample.id, name = %sample.sample_name, "created sample");
        Ok(sample)
    }

    /// Merge `patch` into the record with `id`.
    pub fn update(&mut self, id: &str, patch: SamplePatch) -> StoreResult<Sample> {
        let Some(sample) = self.samples.iter_mut().find(|s| s.id == id) else {
            warn!(id, "update target not found");
            return Err(StoreError::NotFound(id.to_string()));
        };
        sample.apply(patch);
        info!(id, status = %sample.status, "updated sample");
        Ok(sample.clone())
    }

    /// Change only the status of the record with `id`.
    pub fn update_status(&mut self, id: &str, status: SampleStatus) -> StoreResult<Sample> {
        self.update(id, SamplePatch::status(status))
    }

    fn contains(&self, id: &str) -> bool {
        self.samples.iter().any(|s| s.id == id)
    }

    fn fresh_id(&mut self) -> StoreResult<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            if !self.contains(&candidate) {
                return Ok(candidate);
            }
            warn!(id = %candidate, "generated id collides with existing sample, retrying");
        }
        Err(StoreError::IdExhausted(MAX_ID_ATTEMPTS))
    }
}
