//! Sample Tracker Core Library
//!
//! In-memory lab sample tracking: a record store, a filter/sort/paginate
//! query pipeline, draft validation and the Add/Edit form workflow.
//!
//! # Architecture
//!
//! ```text
//! user input ──► Dashboard (ViewState) ──► Query Pipeline ──► Pagination ──► rows
//!                     │
//!          Add/Edit form submit
//!                     │
//!                 Validator ──(valid)──► SampleStore create/update ──► refresh
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (Sample, SampleDraft, SamplePatch, etc.)
//! - [`store`]: Canonical sample collection and id assignment
//! - [`query`]: Search/status filtering, stable sort, pagination
//! - [`validation`]: Per-field draft validation
//! - [`dashboard`]: View controller and form state machine
//! - [`seed`]: Bundled mock dataset

pub mod dashboard;
pub mod models;
pub mod query;
pub mod seed;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use dashboard::{Dashboard, DashboardConfig, DashboardError, DashboardView, Editor, SaveOutcome};
pub use models::{
    DraftChange, DraftField, Sample, SampleDraft, SampleFields, SamplePatch, SampleStatus,
    SampleType,
};
pub use query::{Query, SortDirection, SortKey, SortSpec, StatusFilter};
pub use store::{SampleStore, StoreError};
pub use validation::FieldErrors;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum SampleTrackerError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for SampleTrackerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => SampleTrackerError::NotFound(id),
            other => SampleTrackerError::Internal(other.to_string()),
        }
    }
}

impl From<DashboardError> for SampleTrackerError {
    fn from(e: DashboardError) -> Self {
        match e {
            DashboardError::Store(store) => store.into(),
            e @ DashboardError::InvalidTransition { .. } => {
                SampleTrackerError::InvalidState(e.to_string())
            }
            e @ DashboardError::UnsupportedPageSize(_) => {
                SampleTrackerError::InvalidInput(e.to_string())
            }
        }
    }
}

impl From<dashboard::ConfigError> for SampleTrackerError {
    fn from(e: dashboard::ConfigError) -> Self {
        SampleTrackerError::InvalidInput(e.to_string())
    }
}

impl From<seed::SeedError> for SampleTrackerError {
    fn from(e: seed::SeedError) -> Self {
        SampleTrackerError::SerializationError(e.to_string())
    }
}

impl From<models::ParseError> for SampleTrackerError {
    fn from(e: models::ParseError) -> Self {
        SampleTrackerError::InvalidInput(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for SampleTrackerError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        SampleTrackerError::Internal(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Install a `tracing` subscriber writing to stderr.
///
/// `filter` uses `RUST_LOG` syntax; when absent, `RUST_LOG` is read and
/// falls back to `info`.
#[uniffi::export]
pub fn init_logging(filter: Option<String>) -> Result<(), SampleTrackerError> {
    let filter = match filter {
        Some(directives) => tracing_subscriber::EnvFilter::try_new(directives)
            .map_err(|e| SampleTrackerError::InvalidInput(e.to_string()))?,
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| SampleTrackerError::Internal(e.to_string()))
}

/// Open a dashboard over caller-supplied data.
///
/// `config_json` and `seed_json` are optional; absent config uses defaults,
/// absent seed starts empty.
#[uniffi::export]
pub fn open_dashboard(
    config_json: Option<String>,
    seed_json: Option<String>,
) -> Result<Arc<SampleTrackerCore>, SampleTrackerError> {
    let config = match config_json {
        Some(json) => DashboardConfig::from_json(&json)?,
        None => DashboardConfig::default(),
    };
    let seed = match seed_json {
        Some(json) => seed::samples_from_json(&json)?,
        None => Vec::new(),
    };
    let store = SampleStore::from_seed(seed)?;
    Ok(SampleTrackerCore::wrap(Dashboard::new(store, config)))
}

/// Open a dashboard over the bundled mock dataset.
#[uniffi::export]
pub fn open_dashboard_with_mock_data() -> Result<Arc<SampleTrackerCore>, SampleTrackerError> {
    let store = SampleStore::from_seed(seed::mock_samples()?)?;
    Ok(SampleTrackerCore::wrap(Dashboard::new(
        store,
        DashboardConfig::default(),
    )))
}

/// Options for the sample type select.
#[uniffi::export]
pub fn sample_type_options() -> Vec<String> {
    SampleType::ALL.iter().map(ToString::to_string).collect()
}

/// Options for the status select, without the "All" filter sentinel.
#[uniffi::export]
pub fn status_options() -> Vec<String> {
    SampleStatus::ALL.iter().map(ToString::to_string).collect()
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe dashboard wrapper for FFI.
#[derive(uniffi::Object)]
pub struct SampleTrackerCore {
    dashboard: Arc<Mutex<Dashboard>>,
}

impl SampleTrackerCore {
    fn wrap(dashboard: Dashboard) -> Arc<Self> {
        Arc::new(Self {
            dashboard: Arc::new(Mutex::new(dashboard)),
        })
    }
}

#[uniffi::export]
impl SampleTrackerCore {
    // =========================================================================
    // Table
    // =========================================================================

    /// Current visible page.
    pub fn get_view(&self) -> Result<FfiDashboardView, SampleTrackerError> {
        let dashboard = self.dashboard.lock()?;
        Ok(FfiDashboardView::from(dashboard.view()))
    }

    /// All samples, unfiltered and in storage order.
    pub fn list_samples(&self) -> Result<Vec<FfiSample>, SampleTrackerError> {
        let dashboard = self.dashboard.lock()?;
        Ok(dashboard.samples().iter().map(FfiSample::from).collect())
    }

    pub fn set_search(&self, search: String) -> Result<FfiDashboardView, SampleTrackerError> {
        let mut dashboard = self.dashboard.lock()?;
        dashboard.set_search(search);
        Ok(FfiDashboardView::from(dashboard.view()))
    }

    /// `"All"` or one status name.
    pub fn set_status_filter(&self, status: String) -> Result<FfiDashboardView, SampleTrackerError> {
        let filter: StatusFilter = status.parse()?;
        let mut dashboard = self.dashboard.lock()?;
        dashboard.set_status_filter(filter);
        Ok(FfiDashboardView::from(dashboard.view()))
    }

    /// Column-header click on `key` (e.g. `"collectedOn"`).
    pub fn toggle_sort(&self, key: String) -> Result<FfiDashboardView, SampleTrackerError> {
        let key: SortKey = key.parse().map_err(SampleTrackerError::InvalidInput)?;
        let mut dashboard = self.dashboard.lock()?;
        dashboard.toggle_sort(key);
        Ok(FfiDashboardView::from(dashboard.view()))
    }

    pub fn set_page(&self, page: u32) -> Result<FfiDashboardView, SampleTrackerError> {
        let mut dashboard = self.dashboard.lock()?;
        dashboard.set_page(page as usize);
        Ok(FfiDashboardView::from(dashboard.view()))
    }

    pub fn set_page_size(&self, page_size: u32) -> Result<FfiDashboardView, SampleTrackerError> {
        let mut dashboard = self.dashboard.lock()?;
        dashboard.set_page_size(page_size as usize)?;
        Ok(FfiDashboardView::from(dashboard.view()))
    }

    /// Inline status change from a table row.
    pub fn change_status(&self, id: String, status: String) -> Result<FfiSample, SampleTrackerError> {
        let status: SampleStatus = status.parse()?;
        let mut dashboard = self.dashboard.lock()?;
        let sample = dashboard.change_status(&id, status)?;
        Ok(FfiSample::from(&sample))
    }

    // =========================================================================
    // Form
    // =========================================================================

    pub fn get_editor(&self) -> Result<FfiEditor, SampleTrackerError> {
        let dashboard = self.dashboard.lock()?;
        Ok(FfiEditor::from(dashboard.editor()))
    }

    pub fn open_add(&self) -> Result<FfiEditor, SampleTrackerError> {
        let mut dashboard = self.dashboard.lock()?;
        dashboard.open_add()?;
        Ok(FfiEditor::from(dashboard.editor()))
    }

    pub fn open_edit(&self, id: String) -> Result<FfiEditor, SampleTrackerError> {
        let mut dashboard = self.dashboard.lock()?;
        dashboard.open_edit(&id)?;
        Ok(FfiEditor::from(dashboard.editor()))
    }

    /// Set one draft field by its wire name (e.g. `"sampleName"`).
    pub fn edit_draft_field(
        &self,
        field: String,
        value: Option<String>,
    ) -> Result<FfiEditor, SampleTrackerError> {
        let field: DraftField = field.parse().map_err(SampleTrackerError::InvalidInput)?;
        let mut dashboard = self.dashboard.lock()?;
        dashboard.edit_draft(DraftChange::new(field, value))?;
        Ok(FfiEditor::from(dashboard.editor()))
    }

    pub fn cancel(&self) -> Result<(), SampleTrackerError> {
        let mut dashboard = self.dashboard.lock()?;
        dashboard.cancel()?;
        Ok(())
    }

    pub fn save(&self) -> Result<FfiSaveOutcome, SampleTrackerError> {
        let mut dashboard = self.dashboard.lock()?;
        let outcome = dashboard.save()?;
        Ok(outcome.into())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe sample.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSample {
    pub id: String,
    pub sample_name: String,
    pub sample_type: String,
    /// ISO `YYYY-MM-DD`
    pub collected_on: String,
    pub status: String,
    pub description: String,
}

impl From<&Sample> for FfiSample {
    fn from(sample: &Sample) -> Self {
        Self {
            id: sample.id.clone(),
            sample_name: sample.sample_name.clone(),
            sample_type: sample.sample_type.to_string(),
            collected_on: sample.collected_on.format(models::DATE_FORMAT).to_string(),
            status: sample.status.to_string(),
            description: sample.description.clone(),
        }
    }
}

/// FFI-safe draft.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDraft {
    pub sample_name: String,
    pub sample_type: Option<String>,
    pub collected_on: Option<String>,
    pub status: Option<String>,
    pub description: String,
}

impl From<&SampleDraft> for FfiDraft {
    fn from(draft: &SampleDraft) -> Self {
        Self {
            sample_name: draft.sample_name.clone(),
            sample_type: draft.sample_type.clone(),
            collected_on: draft.collected_on.clone(),
            status: draft.status.clone(),
            description: draft.description.clone(),
        }
    }
}

/// FFI-safe form state.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEditor {
    /// "idle", "adding" or "editing"
    pub state: String,
    pub editing_id: Option<String>,
    pub draft: Option<FfiDraft>,
    /// Field wire name → message
    pub errors: HashMap<String, String>,
}

impl From<&Editor> for FfiEditor {
    fn from(editor: &Editor) -> Self {
        let editing_id = match editor {
            Editor::Editing { id, .. } => Some(id.clone()),
            _ => None,
        };
        Self {
            state: editor.name().to_string(),
            editing_id,
            draft: editor.draft().map(FfiDraft::from),
            errors: editor.errors().map(errors_to_map).unwrap_or_default(),
        }
    }
}

/// FFI-safe table page.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDashboardView {
    pub rows: Vec<FfiSample>,
    pub total: u32,
    pub page_count: u32,
    pub page: u32,
    pub page_size: u32,
}

impl From<&DashboardView> for FfiDashboardView {
    fn from(view: &DashboardView) -> Self {
        Self {
            rows: view.rows.iter().map(FfiSample::from).collect(),
            total: view.total as u32,
            page_count: view.page_count as u32,
            page: view.page as u32,
            page_size: view.page_size as u32,
        }
    }
}

/// FFI-safe save result.
#[derive(Debug, Clone, uniffi::Enum)]
pub enum FfiSaveOutcome {
    Created { sample: FfiSample },
    Updated { sample: FfiSample },
    Rejected { errors: HashMap<String, String> },
}

impl From<SaveOutcome> for FfiSaveOutcome {
    fn from(outcome: SaveOutcome) -> Self {
        match outcome {
            SaveOutcome::Created(sample) => FfiSaveOutcome::Created {
                sample: FfiSample::from(&sample),
            },
            SaveOutcome::Updated(sample) => FfiSaveOutcome::Updated {
                sample: FfiSample::from(&sample),
            },
            SaveOutcome::Rejected(errors) => FfiSaveOutcome::Rejected {
                errors: errors_to_map(&errors),
            },
        }
    }
}

fn errors_to_map(errors: &FieldErrors) -> HashMap<String, String> {
    errors
        .iter()
        .map(|(field, message)| (field.to_string(), message.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_with_mock_data() {
        let core = open_dashboard_with_mock_data().unwrap();
        let view = core.get_view().unwrap();
        assert_eq!(view.total, 12);
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.page_count, 3);
    }

    #[test]
    fn test_bad_filter_is_invalid_input() {
        let core = open_dashboard(None, None).unwrap();
        let result = core.set_status_filter("Lost".into());
        assert!(matches!(result, Err(SampleTrackerError::InvalidInput(_))));
    }

    #[test]
    fn test_not_found_maps_through() {
        let core = open_dashboard(None, None).unwrap();
        let result = core.change_status("missing".into(), "Completed".into());
        assert!(matches!(result, Err(SampleTrackerError::NotFound(id)) if id == "missing"));
    }

    #[test]
    fn test_rejected_save_reports_field_names() {
        let core = open_dashboard(None, None).unwrap();
        core.open_add().unwrap();
        match core.save().unwrap() {
            FfiSaveOutcome::Rejected { errors } => {
                assert_eq!(errors.get("sampleName").map(String::as_str), Some("Sample Name is required."));
                assert!(errors.contains_key("sampleType"));
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
        assert_eq!(core.get_editor().unwrap().state, "adding");
    }

    #[test]
    fn test_invalid_transition_is_invalid_state() {
        let core = open_dashboard(None, None).unwrap();
        assert!(matches!(core.cancel(), Err(SampleTrackerError::InvalidState(_))));
    }

    #[test]
    fn test_options() {
        assert_eq!(sample_type_options(), vec!["Blood", "Urine", "Tissue", "Saliva", "Other"]);
        assert_eq!(status_options(), vec!["Pending", "Processing", "Completed"]);
    }
}
